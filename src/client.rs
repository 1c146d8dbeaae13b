use std::fmt::Display;

use http::{
    Method, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::Serialize;
use url::Url;

use crate::{
    concepts::{Gateway, Operation, Operator},
    config::{Credentials, Endpoints},
    digest,
    draft::TransactionDraft,
    errors::{Error, Result, ValidationError},
    resolver::{self, ResolvedTarget},
    transport::{
        AdditionalInfos, BalanceRequest, CashinRequest, GatewayResponse, TransactionRequest,
    },
    types::{ServiceCode, TransactionId},
    validation::{
        TransferFields, ValidatedFields, check_balance, check_minimum_requirements, check_transfer,
    },
};

/// A client for the InTouch gateway.
///
/// Holds the account credentials and a pooled HTTP client. Cloning is cheap
/// and clones may be used concurrently; per-transaction fields live in a
/// [`TransactionDraft`], never in the client.
#[derive(Debug, Clone)]
pub struct IntouchClient {
    credentials: Credentials,
    endpoints: Endpoints,
    client: reqwest::Client,
}

impl IntouchClient {
    /// Create a client against the production gateway.
    ///
    /// Fails if any credential is empty. No request is made.
    pub fn new(credentials: Credentials) -> std::result::Result<Self, ValidationError> {
        credentials.validate()?;
        Ok(IntouchClient {
            credentials,
            endpoints: Endpoints::default(),
            client: reqwest::Client::new(),
        })
    }

    /// Create a client from the credentials in the process environment.
    pub fn from_env() -> std::result::Result<Self, ValidationError> {
        IntouchClient::new(Credentials::from_env()?)
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Use a preconfigured HTTP client, e.g. with timeouts or a proxy.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Start a new transaction draft bound to this client.
    pub fn transaction(&self) -> Transaction<'_> {
        Transaction {
            client: self,
            draft: TransactionDraft::new(),
        }
    }

    /// Resolve the target of `operation` for `draft`.
    ///
    /// The result depends only on the operation, the draft's operator and the
    /// client configuration. Service code and endpoint values stored on the
    /// draft are replaced by the resolved ones.
    pub fn resolve(
        &self,
        draft: &TransactionDraft,
        operation: Operation,
    ) -> Result<ResolvedTarget> {
        resolver::resolve(operation, draft.operator, &self.credentials, &self.endpoints)
    }

    /// Validate and resolve a money-moving operation. Nothing is sent.
    fn prepare_transfer(
        &self,
        draft: &TransactionDraft,
        operation: Operation,
    ) -> Result<(TransferFields, ServiceCode, Url)> {
        let fields = check_transfer(draft, operation)?;
        let ResolvedTarget {
            service_code,
            endpoint,
        } = self.resolve(draft, operation)?;
        // Resolution yields a code for every operator; only a missing one leaves it empty.
        let service_code = service_code.ok_or(ValidationError::MissingOperator(operation))?;
        Ok((fields, service_code, endpoint))
    }

    async fn transaction_request(
        &self,
        operation: Operation,
        draft: TransactionDraft,
        additional_infos: AdditionalInfos,
        id_from_client: Option<TransactionId>,
    ) -> Result<GatewayResponse> {
        let (fields, service_code, endpoint) = self.prepare_transfer(&draft, operation)?;

        let request = TransactionRequest {
            id_from_client: id_from_client.unwrap_or_else(TransactionId::generate),
            amount: fields.amount,
            callback: fields.callback.into(),
            recipient_number: fields.phone,
            service_code,
            additional_infos,
        };

        self.send_digest(Method::PUT, endpoint, &request).await
    }

    /// Send `body` once; answer a digest challenge with one authenticated retry.
    async fn send_digest<B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<GatewayResponse> {
        let body = serde_json::to_vec(body)?;

        let first = self
            .client
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body.clone())
            .send()
            .await?;

        if first.status() != StatusCode::UNAUTHORIZED {
            return GatewayResponse::read(first).await;
        }

        let Some(challenge) = digest::challenge(first.headers()).map(str::to_owned) else {
            return GatewayResponse::read(first).await;
        };

        #[cfg(feature = "tracing")]
        tracing::debug!("Digest challenge received, answering: method={method}");

        let authorization = digest::authorization(
            &challenge,
            &self.credentials.username,
            &self.credentials.password,
            &method,
            &url,
            &body,
        )?;

        let response = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, authorization)
            .body(body)
            .send()
            .await?;

        GatewayResponse::read(response).await
    }

    async fn send_basic<B: Serialize>(&self, url: Url, body: &B) -> Result<GatewayResponse> {
        let response = self
            .client
            .post(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .json(body)
            .send()
            .await?;

        GatewayResponse::read(response).await
    }
}

impl Gateway for IntouchClient {
    type Draft = TransactionDraft;
    type Error = Error;

    async fn merchant_payment(
        &self,
        draft: TransactionDraft,
        additional_infos: AdditionalInfos,
        id_from_client: Option<TransactionId>,
    ) -> Result<GatewayResponse> {
        self.transaction_request(Operation::Merchant, draft, additional_infos, id_from_client)
            .await
    }

    async fn cashout(
        &self,
        draft: TransactionDraft,
        additional_infos: AdditionalInfos,
        id_from_client: Option<TransactionId>,
    ) -> Result<GatewayResponse> {
        self.transaction_request(Operation::Cashout, draft, additional_infos, id_from_client)
            .await
    }

    async fn cashin(
        &self,
        draft: TransactionDraft,
        partner_transaction_id: Option<TransactionId>,
    ) -> Result<GatewayResponse> {
        let (fields, service_id, endpoint) = self.prepare_transfer(&draft, Operation::Cashin)?;
        let partner_id = fields.partner_id.ok_or(ValidationError::MissingPartnerId)?;

        let request = CashinRequest {
            service_id,
            recipient_phone_number: fields.phone,
            amount: fields.amount,
            partner_id,
            partner_transaction_id: partner_transaction_id.unwrap_or_else(TransactionId::generate),
            login_api: self.credentials.login_agent.clone(),
            password_api: self.credentials.password_agent.clone(),
            callback_url: fields.callback.into(),
        };

        self.send_basic(endpoint, &request).await
    }

    async fn balance(&self, draft: TransactionDraft) -> Result<GatewayResponse> {
        let fields = check_balance(&draft)?;
        let target = self.resolve(&draft, Operation::Balance)?;

        let request = BalanceRequest {
            partner_id: fields.partner_id,
            login_api: self.credentials.login_agent.clone(),
            password_api: self.credentials.password_agent.clone(),
        };

        self.send_basic(target.endpoint, &request).await
    }
}

/// A transaction draft bound to a client, ending in one terminal operation.
///
/// ```no_run
/// # use intouch_kit::{client::IntouchClient, config::Credentials, transport::AdditionalInfos};
/// # async fn run() -> Result<(), intouch_kit::errors::Error> {
/// let client = IntouchClient::new(
///     Credentials::builder()
///         .username("api-user")
///         .password("api-pass")
///         .login_agent("AG1")
///         .password_agent("PW1")
///         .intouch_id("123")
///         .build(),
/// )?;
///
/// let response = client
///     .transaction()
///     .amount(1500)
///     .phone("690000000")
///     .operator("orange")?
///     .callback("https://merchant.example/intouch/callback")
///     .make_merchant_payment(AdditionalInfos::default(), None)
///     .await?;
///
/// println!("{}: {}", response.status, response.body);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Transaction<'c> {
    client: &'c IntouchClient,
    draft: TransactionDraft,
}

impl<'c> Transaction<'c> {
    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }

    pub fn into_draft(self) -> TransactionDraft {
        self.draft
    }

    pub fn amount(self, amount: impl Display) -> Self {
        self.map(|draft| draft.amount(amount))
    }

    pub fn phone(self, phone: impl Into<String>) -> Self {
        self.map(|draft| draft.phone(phone))
    }

    /// Select the operator by name; fails immediately if it is not supported.
    pub fn operator(self, operator: &str) -> std::result::Result<Self, ValidationError> {
        let draft = self.draft.operator(operator)?;
        Ok(Transaction {
            client: self.client,
            draft,
        })
    }

    pub fn with_operator(self, operator: Operator) -> Self {
        self.map(|draft| draft.with_operator(operator))
    }

    pub fn callback(self, url: impl Into<String>) -> Self {
        self.map(|draft| draft.callback(url))
    }

    pub fn partner_id(self, partner_id: impl Into<String>) -> Self {
        self.map(|draft| draft.partner_id(partner_id))
    }

    /// Replaced by the resolved code when a terminal operation runs.
    pub fn service_code(self, service_code: impl Into<ServiceCode>) -> Self {
        self.map(|draft| draft.service_code(service_code))
    }

    /// Replaced by the resolved endpoint when a terminal operation runs.
    pub fn endpoint(self, endpoint: impl Into<String>) -> Self {
        self.map(|draft| draft.endpoint(endpoint))
    }

    /// Run the validation gate for `operation` without sending anything.
    pub fn validate(
        &self,
        operation: Operation,
    ) -> std::result::Result<ValidatedFields, ValidationError> {
        check_minimum_requirements(&self.draft, operation)
    }

    /// Resolve the service code and endpoint for `operation` without sending anything.
    pub fn resolve(&self, operation: Operation) -> Result<ResolvedTarget> {
        self.client.resolve(&self.draft, operation)
    }

    /// Pay a merchant. `PUT` with Digest authentication.
    pub async fn make_merchant_payment(
        self,
        additional_infos: AdditionalInfos,
        id_from_client: Option<TransactionId>,
    ) -> Result<GatewayResponse> {
        self.client
            .merchant_payment(self.draft, additional_infos, id_from_client)
            .await
    }

    /// Collect funds from a subscriber. `PUT` with Digest authentication.
    pub async fn make_cashout(
        self,
        additional_infos: AdditionalInfos,
        id_from_client: Option<TransactionId>,
    ) -> Result<GatewayResponse> {
        self.client
            .cashout(self.draft, additional_infos, id_from_client)
            .await
    }

    /// Credit a subscriber's wallet. `POST` with Basic authentication.
    pub async fn make_cashin(
        self,
        partner_transaction_id: Option<TransactionId>,
    ) -> Result<GatewayResponse> {
        self.client.cashin(self.draft, partner_transaction_id).await
    }

    /// Query the partner account balance. `POST` with Basic authentication.
    pub async fn get_balance(self) -> Result<GatewayResponse> {
        self.client.balance(self.draft).await
    }

    fn map(self, f: impl FnOnce(TransactionDraft) -> TransactionDraft) -> Self {
        Transaction {
            client: self.client,
            draft: f(self.draft),
        }
    }
}

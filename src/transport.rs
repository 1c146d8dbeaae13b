//! Request bodies sent to the gateway and the response handed back to callers.

use bon::Builder;
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::types::{Amount, AnyJson, PhoneNumber, Record, ServiceCode, TransactionId};

/// Extra recipient details attached to a merchant payment or cash-out.
#[derive(Builder, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInfos {
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_first_name: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_last_name: Option<String>,
    /// Recipient as displayed by the gateway, usually the phone number.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destinataire: Option<String>,
    /// Any other key the gateway accepts.
    #[builder(default)]
    #[serde(flatten)]
    pub extra: Record<AnyJson>,
}

/// `PUT` body for merchant payments and cash-outs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub id_from_client: TransactionId,
    pub amount: Amount,
    pub callback: String,
    pub recipient_number: PhoneNumber,
    pub service_code: ServiceCode,
    pub additional_infos: AdditionalInfos,
}

/// `POST` body for cash-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashinRequest {
    pub service_id: ServiceCode,
    pub recipient_phone_number: PhoneNumber,
    pub amount: Amount,
    pub partner_id: String,
    pub partner_transaction_id: TransactionId,
    pub login_api: String,
    pub password_api: String,
    #[serde(rename = "callBackUrl")]
    pub callback_url: String,
}

/// `POST` body for balance inquiries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRequest {
    pub partner_id: String,
    pub login_api: String,
    pub password_api: String,
}

/// The gateway's immediate answer to a request.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: StatusCode,
    /// Parsed JSON body; `Null` when the gateway sent none, a string when it
    /// sent something other than JSON.
    pub body: AnyJson,
}

impl GatewayResponse {
    /// Read a successful response. Non-2xx statuses become errors unchanged.
    pub(crate) async fn read(response: reqwest::Response) -> crate::errors::Result<Self> {
        let response = response.error_for_status()?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = decode_body(&bytes);

        #[cfg(feature = "tracing")]
        tracing::debug!("Gateway responded: status={status}");

        Ok(GatewayResponse { status, body })
    }
}

/// Empty bodies become `Null`; bodies that are not JSON are kept as text.
fn decode_body(bytes: &[u8]) -> AnyJson {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return AnyJson::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| AnyJson::String(String::from_utf8_lossy(bytes).into_owned()))
}

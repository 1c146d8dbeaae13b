//! Operation × operator lookup of service codes and endpoints.

use url::Url;

use crate::{
    concepts::{Operation, Operator},
    config::{Credentials, Endpoints},
    errors::{Error, ValidationError},
    types::ServiceCode,
};

pub mod service_codes {
    pub const OM_MERCHANT: &str = "CM_PAIEMENTMARCHAND_OM_TP";
    pub const MOMO_MERCHANT: &str = "PAIEMENTMARCHAND_MTN_CM";
    pub const OM_CASH_IN: &str = "CASHINOMCMB2BDIST";
    pub const MOMO_CASH_IN: &str = "CASHINMTNCM2_DYNATECH";
    pub const OM_CASH_OUT: &str = "CASHOUTOMCMB2BDIST";
    pub const MOMO_CASH_OUT: &str = "CASHOUTMTNCM2_DYNATECH";
}

pub const LOGIN_AGENT_PLACEHOLDER: &str = "[LOGIN_AGENT]";
pub const PASSWORD_AGENT_PLACEHOLDER: &str = "[PASSWORD_AGENT]";
pub const INTOUCH_ID_PLACEHOLDER: &str = "[INTOUCH_ID]";

/// Where and how a transaction is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// `None` for balance inquiries.
    pub service_code: Option<ServiceCode>,
    pub endpoint: Url,
}

/// Service code for an operation and operator. Balance has none.
pub fn service_code(operation: Operation, operator: Operator) -> Option<ServiceCode> {
    use service_codes::*;

    let code = match (operation, operator) {
        (Operation::Merchant, Operator::Orange) => OM_MERCHANT,
        (Operation::Merchant, Operator::Mtn) => MOMO_MERCHANT,
        (Operation::Cashin, Operator::Orange) => OM_CASH_IN,
        (Operation::Cashin, Operator::Mtn) => MOMO_CASH_IN,
        (Operation::Cashout, Operator::Orange) => OM_CASH_OUT,
        (Operation::Cashout, Operator::Mtn) => MOMO_CASH_OUT,
        (Operation::Balance, _) => return None,
    };
    Some(ServiceCode::from(code))
}

/// Endpoint template used by an operation.
pub fn endpoint_template(operation: Operation, endpoints: &Endpoints) -> &str {
    match operation {
        Operation::Merchant | Operation::Cashout => &endpoints.transaction,
        Operation::Cashin => &endpoints.cashin,
        Operation::Balance => &endpoints.balance,
    }
}

/// Replace every agent placeholder in `template` with the matching credential.
pub fn substitute_credentials(template: &str, credentials: &Credentials) -> String {
    template
        .replace(LOGIN_AGENT_PLACEHOLDER, &credentials.login_agent)
        .replace(PASSWORD_AGENT_PLACEHOLDER, &credentials.password_agent)
        .replace(INTOUCH_ID_PLACEHOLDER, &credentials.intouch_id)
}

/// Resolve the service code and concrete endpoint for an operation.
///
/// Every operation except [`Operation::Balance`] needs an operator.
pub fn resolve(
    operation: Operation,
    operator: Option<Operator>,
    credentials: &Credentials,
    endpoints: &Endpoints,
) -> Result<ResolvedTarget, Error> {
    let service_code = match operator {
        Some(operator) => service_code(operation, operator),
        None if operation.requires_operator() => {
            return Err(ValidationError::MissingOperator(operation).into());
        }
        None => None,
    };

    let endpoint = Url::parse(&substitute_credentials(
        endpoint_template(operation, endpoints),
        credentials,
    ))?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Resolved {operation} target: operator={:?}, service_code={:?}, host={:?}, path='{}'",
        operator,
        service_code,
        endpoint.host_str(),
        endpoint.path()
    );

    Ok(ResolvedTarget {
        service_code,
        endpoint,
    })
}

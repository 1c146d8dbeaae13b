//! Per-transaction fields accumulated before a terminal operation.

use std::fmt::Display;

use crate::{concepts::Operator, errors::ValidationError, types::ServiceCode};

/// Fields of a single transaction.
///
/// Every setter consumes the draft and returns the updated value, so a draft
/// is owned by exactly one call chain. Nothing is validated at set time except
/// the operator; the remaining rules are checked once the terminal operation
/// is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub amount: Option<String>,
    pub phone: Option<String>,
    pub operator: Option<Operator>,
    pub callback: Option<String>,
    pub partner_id: Option<String>,
    /// Resolution always replaces this with the code for the operation and operator.
    pub service_code: Option<ServiceCode>,
    /// Resolution always replaces this with the configured endpoint.
    pub endpoint: Option<String>,
}

impl TransactionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount in XAF. Accepts numbers or raw text; checked at call time.
    pub fn amount(mut self, amount: impl Display) -> Self {
        self.amount = Some(amount.to_string());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Select the operator by name, case-insensitively.
    pub fn operator(mut self, operator: &str) -> Result<Self, ValidationError> {
        self.operator = Some(operator.parse()?);
        Ok(self)
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn callback(mut self, url: impl Into<String>) -> Self {
        self.callback = Some(url.into());
        self
    }

    pub fn partner_id(mut self, partner_id: impl Into<String>) -> Self {
        self.partner_id = Some(partner_id.into());
        self
    }

    pub fn service_code(mut self, service_code: impl Into<ServiceCode>) -> Self {
        self.service_code = Some(service_code.into());
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

//! Core traits and types used across the InTouch Kit.

use std::{fmt::Display, str::FromStr};

use crate::{
    errors::ValidationError,
    transport::{AdditionalInfos, GatewayResponse},
    types::TransactionId,
};

/// Telecom operators offering mobile-money on the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Orange,
    Mtn,
}

impl Operator {
    /// All supported operators, in gateway order.
    pub const SUPPORTED: [Operator; 2] = [Operator::Orange, Operator::Mtn];

    /// Comma separated list of supported operator names.
    pub const SUPPORTED_LIST: &'static str = "ORANGE,MTN";

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Orange => "ORANGE",
            Operator::Mtn => "MTN",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = ValidationError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Operator::SUPPORTED
            .into_iter()
            .find(|op| op.as_str() == normalized)
            .ok_or(ValidationError::UnsupportedOperator {
                given: normalized,
                supported: Operator::SUPPORTED_LIST,
            })
    }
}

/// The kind of terminal operation a transaction draft is about to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Merchant,
    Cashin,
    Cashout,
    Balance,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Merchant => "merchant",
            Operation::Cashin => "cashin",
            Operation::Cashout => "cashout",
            Operation::Balance => "balance",
        }
    }

    /// Whether the operation moves money, and therefore needs an amount.
    pub fn requires_amount(&self) -> bool {
        !matches!(self, Operation::Balance)
    }

    pub fn requires_partner_id(&self) -> bool {
        matches!(self, Operation::Cashin | Operation::Balance)
    }

    pub fn requires_callback(&self) -> bool {
        !matches!(self, Operation::Balance)
    }

    pub fn requires_operator(&self) -> bool {
        !matches!(self, Operation::Balance)
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mobile-money gateway interface.
///
/// Each method consumes a fully configured draft and performs one logical
/// request against the remote gateway.
pub trait Gateway {
    type Draft;
    type Error: std::error::Error;

    fn merchant_payment(
        &self,
        draft: Self::Draft,
        additional_infos: AdditionalInfos,
        id_from_client: Option<TransactionId>,
    ) -> impl Future<Output = Result<GatewayResponse, Self::Error>>;

    fn cashout(
        &self,
        draft: Self::Draft,
        additional_infos: AdditionalInfos,
        id_from_client: Option<TransactionId>,
    ) -> impl Future<Output = Result<GatewayResponse, Self::Error>>;

    fn cashin(
        &self,
        draft: Self::Draft,
        partner_transaction_id: Option<TransactionId>,
    ) -> impl Future<Output = Result<GatewayResponse, Self::Error>>;

    fn balance(
        &self,
        draft: Self::Draft,
    ) -> impl Future<Output = Result<GatewayResponse, Self::Error>>;
}

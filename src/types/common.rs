use std::fmt::{Debug, Display};

use rand::Rng;
use serde::{Deserialize, Serialize};

pub type Record<V> = serde_json::Map<String, V>;

pub type AnyJson = serde_json::Value;

/// Identifier attached to a transaction so the caller can correlate the
/// gateway's asynchronous callback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl TransactionId {
    /// Number of random bytes in a generated id.
    pub const RANDOM_BYTES: usize = 16;

    /// Generate a fresh id from the thread-local CSPRNG, lowercase hex encoded.
    pub fn generate() -> Self {
        let bytes: [u8; Self::RANDOM_BYTES] = rand::rng().random();
        TransactionId(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        TransactionId(value)
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        TransactionId(value.to_owned())
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Gateway-defined identifier of a product flow, e.g. `CASHINOMCMB2BDIST`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCode(pub String);

impl ServiceCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ServiceCode {
    fn from(value: &str) -> Self {
        ServiceCode(value.to_owned())
    }
}

impl From<String> for ServiceCode {
    fn from(value: String) -> Self {
        ServiceCode(value)
    }
}

impl Display for ServiceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for ServiceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ServiceCode({})", self.0)
    }
}

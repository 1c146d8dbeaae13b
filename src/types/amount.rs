use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// An amount in whole XAF. The franc CFA has no minor unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(pub u64);

impl Amount {
    /// Smallest amount the gateway accepts for money-moving operations.
    pub const MINIMUM: Amount = Amount(100);

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u8> for Amount {
    fn from(value: u8) -> Self {
        Amount(value.into())
    }
}

impl From<u16> for Amount {
    fn from(value: u16) -> Self {
        Amount(value.into())
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Amount(value.into())
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(value)
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidAmount);
        }
        s.parse::<u64>()
            .map(Amount)
            .map_err(|_| ValidationError::InvalidAmount)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Amount)
    }
}

//! Shared types used across the DeedVault API

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account or component identifier. Users, the title registry and the escrow
/// ledger all live in the same address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(Uuid);

impl Address {
    /// Generate a fresh address
    pub fn new() -> Self {
        Address(Uuid::new_v4())
    }
}

impl Default for Address {
    fn default() -> Self {
        Address::new()
    }
}

impl From<Uuid> for Address {
    fn from(id: Uuid) -> Self {
        Address(id)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Address {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Address)
    }
}

/// Monetary amount in the smallest currency unit.
///
/// u128 because realistic listing prices (e.g. 20 * 10^18 units) exceed u64.
pub type Amount = u128;

/// Serde helper encoding [`Amount`] as a decimal string.
///
/// JSON numbers cannot carry full u128 precision, so amounts travel as
/// strings on the wire.
pub mod amount_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::Amount;

    pub fn serialize<S>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(amount)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Amount, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Amount>()
            .map_err(|_| de::Error::custom(format!("invalid amount: '{}'", s)))
    }
}

/// Standard API response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response wrapping `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

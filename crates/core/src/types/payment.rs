//! Payment methods accepted at checkout.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an unknown payment method key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid payment method: {0} (expected cash, card, gcash or paymaya)")]
pub struct PaymentMethodError(pub String);

/// Payment method chosen at checkout.
///
/// No payment is actually taken; the method is only echoed back on the
/// order confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    #[serde(rename = "gcash")]
    GCash,
    #[serde(rename = "paymaya")]
    PayMaya,
}

impl PaymentMethod {
    /// All accepted methods, in display order.
    pub const ALL: [Self; 4] = [Self::Cash, Self::Card, Self::GCash, Self::PayMaya];

    /// Stable key used on the wire and on the command line.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::GCash => "gcash",
            Self::PayMaya => "paymaya",
        }
    }

    /// Human-readable label shown on the confirmation.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Credit/Debit Card",
            Self::GCash => "GCash",
            Self::PayMaya => "PayMaya",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = PaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PaymentMethodError(s.to_string()))
    }
}

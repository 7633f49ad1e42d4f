//! Unified error handling for cart operations.
//!
//! Nothing here is fatal to the cart itself: the store always falls back to
//! a usable (possibly empty) state. Errors surface persistence failures and
//! bad lookups from the presentation layer.

use thiserror::Error;

use crate::storage::StorageError;

/// Cart-level error type.
#[derive(Debug, Error)]
pub enum CartError {
    /// Persisting the cart failed. The in-memory change still applies.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serializing the cart for persistence failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No menu item has this slug.
    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(String),

    /// The menu item does not offer this variant.
    #[error("Unknown variant {variant:?} for {item}")]
    UnknownVariant { item: String, variant: String },

    /// The change would push the cart total past what can be represented.
    /// The cart is left as it was.
    #[error("Cart total too large after changing {0}")]
    AmountOverflow(String),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

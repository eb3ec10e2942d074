//! # Session Error Types
//!
//! Unified error type for the session layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Flow in Tiffin                               │
//! │                                                                         │
//! │  Storefront                  Session Layer                              │
//! │  ──────────                  ─────────────                              │
//! │                                                                         │
//! │  store.add(item, seller)                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Bad descriptor? ── CoreError::Validation ──┐                     │  │
//! │  │         │                                   │                     │  │
//! │  │  place_order(..)                            ▼                     │  │
//! │  │  Empty cart? ───── EmptyCart ───────► SessionError ─────────────►│  │
//! │  │  Wrong profile? ── SellerMismatch ──────────▲                     │  │
//! │  │  Service said no? ─ Submission(OrderFailure)│                     │  │
//! │  │  Backend broke? ─── Storage / Snapshot ─────┘                     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) { switch (e.code) { case 'EMPTY_CART': ... } }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Soft cart conditions (capacity ceiling, absent item, foreign-seller
//! replacement) are NOT here. They are outcome codes on the operations
//! themselves; only genuine failures become `SessionError`.

use thiserror::Error;
use tiffin_core::{CoreError, OrderFailure, ValidationError};

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session error type covering everything above the pure core.
///
/// ## Design Principles
/// - Each variant includes enough context for debugging
/// - `code()` gives the storefront a stable machine-readable key
/// - All errors are `Send + Sync`
#[derive(Debug, Error)]
pub enum SessionError {
    /// The pure core rejected an input.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The session storage backend failed.
    #[error("session storage failed for key '{key}': {reason}")]
    Storage { key: String, reason: String },

    /// A cart snapshot could not be encoded or decoded.
    #[error("cart snapshot unreadable: {0}")]
    Snapshot(String),

    /// Checkout was attempted on an empty cart.
    #[error("cannot place an order from an empty cart")]
    EmptyCart,

    /// The seller profile handed to checkout is not the seller the cart
    /// is pinned to.
    #[error("cart is pinned to seller {cart} but the profile is for seller {profile}")]
    SellerMismatch { cart: i64, profile: i64 },

    /// The order service refused the order.
    #[error(transparent)]
    Submission(#[from] OrderFailure),
}

impl SessionError {
    /// Stable machine-readable code for programmatic handling.
    ///
    /// ## Usage in Frontend
    /// ```typescript
    /// try {
    ///   await placeOrder();
    /// } catch (e) {
    ///   switch (e.code) {
    ///     case 'EMPTY_CART': showCartPage(); break;
    ///     case 'ORDER_REJECTED': showRetryBanner(e.message); break;
    ///   }
    /// }
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::Core(_) => "VALIDATION_ERROR",
            SessionError::Storage { .. } => "STORAGE_ERROR",
            SessionError::Snapshot(_) => "SNAPSHOT_ERROR",
            SessionError::EmptyCart => "EMPTY_CART",
            SessionError::SellerMismatch { .. } => "SELLER_MISMATCH",
            SessionError::Submission(_) => "ORDER_REJECTED",
        }
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::Core(CoreError::Validation(err))
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Snapshot(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SessionError::EmptyCart.code(), "EMPTY_CART");
        assert_eq!(
            SessionError::SellerMismatch { cart: 3, profile: 9 }.code(),
            "SELLER_MISMATCH"
        );
        assert_eq!(
            SessionError::Storage {
                key: "tiffin.cart".into(),
                reason: "quota exceeded".into()
            }
            .code(),
            "STORAGE_ERROR"
        );
        assert_eq!(
            SessionError::Submission(OrderFailure::new("seller offline")).code(),
            "ORDER_REJECTED"
        );
    }

    #[test]
    fn test_error_display() {
        let err = SessionError::SellerMismatch { cart: 3, profile: 9 };
        assert_eq!(
            err.to_string(),
            "cart is pinned to seller 3 but the profile is for seller 9"
        );

        let err = SessionError::Storage {
            key: "tiffin.cart".into(),
            reason: "quota exceeded".into(),
        };
        assert!(err.to_string().contains("tiffin.cart"));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn test_validation_error_converts() {
        let err: SessionError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_snapshot_conversion_from_serde() {
        let parse_err = serde_json::from_str::<tiffin_core::Cart>("not json").unwrap_err();
        let err: SessionError = parse_err.into();
        assert_eq!(err.code(), "SNAPSHOT_ERROR");
    }
}

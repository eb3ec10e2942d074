//! # Domain Types
//!
//! Core domain types used throughout Tiffin.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │  OrderRequest   │   │    OrderAck     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_id     │   │  user_id        │   │  order_id       │       │
//! │  │  name           │   │  seller_id      │   │  status         │       │
//! │  │  price (Money)  │   │  seller_response│   │  placed_at      │       │
//! │  │  max_quantity   │   │  product_id[]   │   └─────────────────┘       │
//! │  └─────────────────┘   │  quantity[]     │                             │
//! │                        │  price (Money)  │   ┌─────────────────┐       │
//! │  ┌─────────────────┐   └─────────────────┘   │  OrderFailure   │       │
//! │  │  SellerProfile  │                         │  ─────────────  │       │
//! │  │  ─────────────  │   ┌─────────────────┐   │  message        │       │
//! │  │  user_id        │   │   OrderStatus   │   │  code?          │       │
//! │  │  username       │   │  ─────────────  │   │  details?       │       │
//! │  │  hostel_name    │   │  Placed         │   └─────────────────┘       │
//! │  │  room_number    │   │  Accepted       │                             │
//! │  │  ...            │   │  Completed      │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Parallel-Array Order Payload
//! The order service expects `productId` and `quantity` as two arrays of
//! equal length where index `i` of one describes index `i` of the other.
//! `OrderRequest::validate` enforces that shape before submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_entity_id, ValidationResult};

// =============================================================================
// Catalog Item
// =============================================================================

/// A product listing fetched from the seller's catalog.
///
/// ## Design Notes
/// This is the *input* to cart operations, not cart state. The cart
/// freezes a copy of these fields into a `LineItem` the moment the
/// buyer adds the product, so later catalog edits never mutate a cart.
/// The owning seller's id is not part of the descriptor; it travels as
/// a separate argument to `Cart::add`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogItem {
    /// Catalog-issued product identifier.
    pub product_id: i64,

    /// Display name shown on the product card and in the cart.
    pub name: String,

    /// Free-text description. Carried opaque, never validated.
    pub description: String,

    /// Image URL. Carried opaque, never validated.
    pub image_url: String,

    /// Unit price at listing time.
    pub price: Money,

    /// Seller-declared availability ceiling for one order.
    pub max_quantity: i64,
}

// =============================================================================
// Seller Profile
// =============================================================================

/// Public profile of the seller whose food is in the cart.
///
/// ## Design Notes
/// The profile arrives from the seller service and is passed through to
/// the order payload untouched. The only field cart logic ever inspects
/// is `user_id`, to confirm the profile matches the cart's pinned
/// seller at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SellerProfile {
    /// The seller's account id. Must match the cart's seller at checkout.
    pub user_id: i64,

    pub username: String,

    pub email: String,

    pub phone_no: String,

    /// Hostel the seller cooks from.
    pub hostel_name: String,

    pub room_number: String,

    pub profile_image: Option<String>,

    pub location: Option<String>,
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle of a placed order, as reported by the order service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order submitted, waiting for the seller to accept.
    Placed,
    /// Seller accepted and is preparing the food.
    Accepted,
    /// Food handed over, order closed.
    Completed,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Placed
    }
}

// =============================================================================
// Order Request
// =============================================================================

/// Payload submitted to the order service at checkout.
///
/// ## Wire Shape
/// Serialized with camelCase keys to match the order service contract.
/// `productId` and `quantity` are singular on the wire even though they
/// hold arrays; that is the collaborator's naming, kept verbatim:
/// ```json
/// {
///   "userId": 7,
///   "sellerId": 3,
///   "sellerResponse": { "userId": 3, "username": "anita", ... },
///   "productId": [11, 12],
///   "quantity": [2, 1],
///   "price": 2400
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderRequest {
    /// The buyer placing the order.
    pub user_id: i64,

    /// The seller all products belong to.
    pub seller_id: i64,

    /// Seller contact snapshot, passed through unchanged for the order
    /// confirmation the service sends back to both parties.
    pub seller_response: SellerProfile,

    /// Product ids, parallel to `quantity`.
    pub product_id: Vec<i64>,

    /// Quantity per product, parallel to `product_id`.
    pub quantity: Vec<i64>,

    /// Cart total at submission time, for server-side cross-checking.
    pub price: Money,
}

impl OrderRequest {
    /// Validates the payload shape before submission.
    ///
    /// ## Rules
    /// The same preconditions the order service re-checks server-side:
    /// - `user_id` and `seller_id` must be positive
    /// - at least one product
    /// - `product_id` and `quantity` must have equal length
    /// - every quantity must be positive
    ///
    /// The total is NOT re-derivable from the arrays alone (unit prices
    /// are not in the payload), so it is not cross-checked here.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_entity_id("userId", self.user_id)?;
        validate_entity_id("sellerId", self.seller_id)?;

        if self.product_id.is_empty() {
            return Err(ValidationError::Required {
                field: "productId".to_string(),
            });
        }

        if self.product_id.len() != self.quantity.len() {
            return Err(ValidationError::InvalidFormat {
                field: "quantity".to_string(),
                reason: "length must match productId".to_string(),
            });
        }

        if self.quantity.iter().any(|&qty| qty < 1) {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }

        Ok(())
    }
}

// =============================================================================
// Order Acknowledgement
// =============================================================================

/// Returned by the order service when an order is accepted for processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderAck {
    /// Service-issued order id.
    pub order_id: i64,

    /// Initial lifecycle state, normally `Placed`.
    pub status: OrderStatus,

    /// Server-side submission timestamp.
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

// =============================================================================
// Order Failure
// =============================================================================

/// The order service's structured refusal.
///
/// ## Design Notes
/// Failure is data, not just an error string: the storefront shows
/// `message` to the buyer while `code` and `details` drive programmatic
/// handling (retry banner, "item sold out" highlighting).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
#[error("order failed: {message}")]
pub struct OrderFailure {
    /// Human-readable reason, shown to the buyer as-is.
    pub message: String,

    /// Machine-readable code from the service, when it sent one.
    pub code: Option<String>,

    /// Extra context (offending product, upstream error id, ...).
    pub details: Option<String>,
}

impl OrderFailure {
    /// Creates a failure with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        OrderFailure {
            message: message.into(),
            code: None,
            details: None,
        }
    }

    /// Attaches a machine-readable code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attaches extra context.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seller(user_id: i64) -> SellerProfile {
        SellerProfile {
            user_id,
            username: "anita".to_string(),
            email: "anita@example.com".to_string(),
            phone_no: "9876543210".to_string(),
            hostel_name: "Ganga".to_string(),
            room_number: "B-214".to_string(),
            profile_image: None,
            location: None,
        }
    }

    fn request() -> OrderRequest {
        OrderRequest {
            user_id: 7,
            seller_id: 3,
            seller_response: seller(3),
            product_id: vec![11, 12],
            quantity: vec![2, 1],
            price: Money::from_cents(2400),
        }
    }

    #[test]
    fn test_order_request_validate_accepts_well_formed() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_order_request_validate_rejects_missing_ids() {
        let mut bad = request();
        bad.user_id = 0;
        assert!(bad.validate().is_err());

        let mut bad = request();
        bad.seller_id = -1;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_order_request_validate_rejects_empty_order() {
        let mut bad = request();
        bad.product_id.clear();
        bad.quantity.clear();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_order_request_validate_rejects_ragged_arrays() {
        let mut bad = request();
        bad.quantity.pop();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_order_request_validate_rejects_nonpositive_quantity() {
        let mut bad = request();
        bad.quantity[1] = 0;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Placed);
    }

    #[test]
    fn test_order_request_wire_shape() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["userId"], 7);
        assert_eq!(json["sellerId"], 3);
        assert_eq!(json["sellerResponse"]["userId"], 3);
        assert_eq!(json["sellerResponse"]["hostelName"], "Ganga");
        assert_eq!(json["productId"][0], 11);
        assert_eq!(json["quantity"][1], 1);
        assert_eq!(json["price"], 2400);
    }

    #[test]
    fn test_order_failure_display() {
        let failure = OrderFailure::new("seller is offline")
            .with_code("SELLER_OFFLINE")
            .with_details("seller 3 last seen 2h ago");

        assert_eq!(failure.to_string(), "order failed: seller is offline");
        assert_eq!(failure.code.as_deref(), Some("SELLER_OFFLINE"));
    }
}

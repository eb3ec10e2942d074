//! # Checkout
//!
//! Turns a cart into an order: payload assembly, the submission seam,
//! and the clear-on-success flow.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Lifecycle                               │
//! │                                                                         │
//! │  Buyer taps "Place order"                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_order_request(cart, user_id, seller)                             │
//! │       │                                                                 │
//! │       ├── cart empty?          → Err(EmptyCart)                         │
//! │       ├── profile ≠ cart pin?  → Err(SellerMismatch)                    │
//! │       └── OK: parallel arrays in item order + total + profile           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  gateway.place(&request)          ┌──────────────────────────────┐      │
//! │       │                           │ The cart is cleared ONLY     │      │
//! │       ├── Ok(ack)  → clear cart ──│ after the service accepts.   │      │
//! │       │              return ack   │ On any failure it is left    │      │
//! │       └── Err(f)   → keep cart ───│ exactly as it was, so the    │      │
//! │                      return Err   │ buyer can retry.             │      │
//! │                                   └──────────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tiffin_core::{Cart, OrderAck, OrderFailure, OrderRequest, SellerProfile};
use tracing::{debug, info, warn};

use crate::error::{SessionError, SessionResult};
use crate::store::CartStore;

// =============================================================================
// Order Gateway Port
// =============================================================================

/// The order-submission collaborator seam.
///
/// Synchronous like the rest of this crate; implementations sitting on
/// async transports adapt outside. Object-safe so callers can hold
/// `&dyn OrderGateway` / `Arc<dyn OrderGateway>`.
pub trait OrderGateway: Send + Sync {
    /// Submits one order. `Ok` means the service accepted it for
    /// processing; `Err` carries the service's structured refusal.
    fn place(&self, request: &OrderRequest) -> Result<OrderAck, OrderFailure>;
}

// =============================================================================
// Request Assembly
// =============================================================================

/// Assembles the order payload for a cart.
///
/// ## Behavior
/// Lines become the `productId`/`quantity` parallel arrays in cart
/// order, with the cart total and the passthrough seller profile. The
/// cart itself is not modified.
///
/// ## Returns
/// - `Err(EmptyCart)` when there is nothing to order
/// - `Err(SellerMismatch)` when the profile is not the pinned seller's
pub fn build_order_request(
    cart: &Cart,
    user_id: i64,
    seller: &SellerProfile,
) -> SessionResult<OrderRequest> {
    let seller_id = match cart.seller_id() {
        Some(id) if !cart.is_empty() => id,
        _ => return Err(SessionError::EmptyCart),
    };

    // The storefront fetches the profile separately from cart state; a
    // stale screen can hand checkout the wrong seller's profile.
    if seller.user_id != seller_id {
        return Err(SessionError::SellerMismatch {
            cart: seller_id,
            profile: seller.user_id,
        });
    }

    let request = OrderRequest {
        user_id,
        seller_id,
        seller_response: seller.clone(),
        product_id: cart.items().iter().map(|line| line.product_id).collect(),
        quantity: cart.items().iter().map(|line| line.qty_in_cart).collect(),
        price: cart.total(),
    };
    request.validate()?;
    Ok(request)
}

// =============================================================================
// Place Order Flow
// =============================================================================

/// Builds the order, dispatches it, and clears the cart on success.
///
/// On failure the cart is left untouched so the buyer can retry; the
/// gateway's refusal comes back as [`SessionError::Submission`].
pub fn place_order(
    store: &CartStore,
    gateway: &dyn OrderGateway,
    user_id: i64,
    seller: &SellerProfile,
) -> SessionResult<OrderAck> {
    let request = store.with_cart(|cart| build_order_request(cart, user_id, seller))?;
    debug!(
        user_id,
        seller_id = request.seller_id,
        lines = request.product_id.len(),
        "placing order"
    );

    match gateway.place(&request) {
        Ok(ack) => {
            info!(order_id = ack.order_id, "order placed, clearing cart");
            store.clear();
            Ok(ack)
        }
        Err(failure) => {
            warn!(error = %failure, "order submission failed, cart kept");
            Err(SessionError::Submission(failure))
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::Utc;
    use tiffin_core::{CatalogItem, Money, OrderStatus};

    fn listing(product_id: i64, price_cents: i64, max_quantity: i64) -> CatalogItem {
        CatalogItem {
            product_id,
            name: format!("Dish {}", product_id),
            description: "Fresh from the hostel kitchen".to_string(),
            image_url: format!("https://cdn.example/dish-{}.jpg", product_id),
            price: Money::from_cents(price_cents),
            max_quantity,
        }
    }

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

    fn ack(order_id: i64) -> OrderAck {
        OrderAck {
            order_id,
            status: OrderStatus::Placed,
            placed_at: Utc::now(),
        }
    }

    struct RecordingGateway {
        respond: Result<OrderAck, OrderFailure>,
        seen: Mutex<Vec<OrderRequest>>,
    }

    impl RecordingGateway {
        fn accepting(order_id: i64) -> Self {
            RecordingGateway {
                respond: Ok(ack(order_id)),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn refusing(failure: OrderFailure) -> Self {
            RecordingGateway {
                respond: Err(failure),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<OrderRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl OrderGateway for RecordingGateway {
        fn place(&self, request: &OrderRequest) -> Result<OrderAck, OrderFailure> {
            self.seen.lock().unwrap().push(request.clone());
            self.respond.clone()
        }
    }

    fn loaded_store() -> CartStore {
        let store = CartStore::new();
        store.add(&listing(11, 9000, 5), 3).unwrap();
        store.add(&listing(12, 4500, 5), 3).unwrap();
        store.set_quantity(11, 2);
        store
    }

    #[test]
    fn test_build_order_request_arrays_follow_item_order() {
        let store = loaded_store();

        let request = store
            .with_cart(|cart| build_order_request(cart, 7, &seller(3)))
            .unwrap();

        assert_eq!(request.user_id, 7);
        assert_eq!(request.seller_id, 3);
        assert_eq!(request.product_id, vec![11, 12]);
        assert_eq!(request.quantity, vec![2, 1]);
        assert_eq!(request.price, Money::from_cents(2 * 9000 + 4500));
        assert_eq!(request.seller_response.hostel_name, "Ganga");
    }

    #[test]
    fn test_place_order_success_clears_cart() {
        let store = loaded_store();
        let gateway = RecordingGateway::accepting(101);

        let ack = place_order(&store, &gateway, 7, &seller(3)).unwrap();

        assert_eq!(ack.order_id, 101);
        assert_eq!(ack.status, OrderStatus::Placed);
        assert!(store.snapshot().items.is_empty());
        assert_eq!(store.snapshot().seller_id, None);

        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].quantity, vec![2, 1]);
    }

    #[test]
    fn test_place_order_failure_keeps_cart() {
        let store = loaded_store();
        let gateway =
            RecordingGateway::refusing(OrderFailure::new("seller offline").with_code("SELLER_OFFLINE"));

        let err = place_order(&store, &gateway, 7, &seller(3)).unwrap_err();

        assert_eq!(err.code(), "ORDER_REJECTED");
        // Nothing was cleared; the buyer can retry as-is.
        let snapshot = store.snapshot();
        assert_eq!(snapshot.totals.line_count, 2);
        assert_eq!(snapshot.seller_id, Some(3));
    }

    #[test]
    fn test_place_order_empty_cart() {
        let store = CartStore::new();
        let gateway = RecordingGateway::accepting(101);

        let err = place_order(&store, &gateway, 7, &seller(3)).unwrap_err();

        assert_eq!(err.code(), "EMPTY_CART");
        assert!(gateway.requests().is_empty());
    }

    #[test]
    fn test_place_order_seller_mismatch() {
        let store = loaded_store();
        let gateway = RecordingGateway::accepting(101);

        let err = place_order(&store, &gateway, 7, &seller(9)).unwrap_err();

        match err {
            SessionError::SellerMismatch { cart, profile } => {
                assert_eq!(cart, 3);
                assert_eq!(profile, 9);
            }
            other => panic!("expected SellerMismatch, got {other:?}"),
        }
        assert!(gateway.requests().is_empty());
        assert_eq!(store.snapshot().totals.line_count, 2);
    }
}

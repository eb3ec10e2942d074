//! # Cart Store
//!
//! Thread-safe owner of one session's cart.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple storefront handlers may touch the cart concurrently
//! 2. Only one of them may modify it at a time
//! 3. Watchers must observe whole operations, never a half-applied one
//!
//! ## Change Notification Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Mutation Lifecycle                             │
//! │                                                                         │
//! │  store.add(item, seller)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────┐                                        │
//! │  │ lock cart                   │   One mutex guards the whole cart:     │
//! │  │ run the pure operation      │   watchers never see a torn state.     │
//! │  │ take CartSnapshot if changed│                                        │
//! │  │ unlock cart                 │                                        │
//! │  └──────────────┬──────────────┘                                        │
//! │                 │ lock released BEFORE callbacks run                    │
//! │                 ▼                                                       │
//! │  ┌─────────────────────────────┐                                        │
//! │  │ watcher #1 (&CartSnapshot)  │   Registration order. A watcher may    │
//! │  │ watcher #2 (&CartSnapshot)  │   read the store again, but must not   │
//! │  │ ...                         │   subscribe/unsubscribe from inside.   │
//! │  └─────────────────────────────┘                                        │
//! │                                                                         │
//! │  No state change (AtCapacity, NotFound) ⇒ no notification.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Not RwLock?
//! Cart operations are quick and most of them write. A `RwLock` would add
//! complexity with minimal benefit.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tiffin_core::{AddOutcome, Cart, CatalogItem, LineItem, Money, SetQuantityOutcome};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::SessionResult;
use crate::session::{SessionStorage, CART_STORAGE_KEY};

// =============================================================================
// Snapshot Types
// =============================================================================

/// Precomputed cart totals for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Distinct products.
    pub line_count: usize,

    /// Units across all lines.
    pub total_quantity: i64,

    /// Grand total.
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

/// Immutable picture of the cart at one instant.
///
/// This is what watchers receive and what `snapshot()` returns: the
/// render model for a cart page. It shares nothing with the live cart,
/// so holding one across later mutations is always safe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    /// Lines in insertion order.
    pub items: Vec<LineItem>,

    /// Seller the cart is pinned to, `None` while empty.
    pub seller_id: Option<i64>,

    /// Precomputed totals.
    pub totals: CartTotals,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        CartSnapshot {
            items: cart.items().to_vec(),
            seller_id: cart.seller_id(),
            totals: CartTotals::from(cart),
        }
    }
}

// =============================================================================
// Watchers
// =============================================================================

/// Handle returned by [`CartStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatcherId(u64);

type Watcher = Box<dyn Fn(&CartSnapshot) + Send + Sync + 'static>;

// =============================================================================
// Cart Store
// =============================================================================

/// Session-owned cart state.
///
/// ## Usage
/// ```rust
/// use tiffin_core::{CatalogItem, Money};
/// use tiffin_session::store::CartStore;
///
/// let store = CartStore::new();
/// let dosa = CatalogItem {
///     product_id: 1,
///     name: "Masala Dosa".to_string(),
///     description: String::new(),
///     image_url: String::new(),
///     price: Money::from_cents(6000),
///     max_quantity: 4,
/// };
///
/// store.subscribe(|snapshot| {
///     // refresh the cart badge
///     let _ = snapshot.totals.total_quantity;
/// });
/// store.add(&dosa, 3).unwrap();
/// ```
pub struct CartStore {
    cart: Arc<Mutex<Cart>>,
    watchers: Mutex<Vec<(WatcherId, Watcher)>>,
    next_watcher_id: AtomicU64,
}

impl CartStore {
    /// Creates a store holding a new empty cart.
    pub fn new() -> Self {
        CartStore {
            cart: Arc::new(Mutex::new(Cart::new())),
            watchers: Mutex::new(Vec::new()),
            next_watcher_id: AtomicU64::new(0),
        }
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Adds one unit of a listing. See `Cart::add` for the semantics.
    ///
    /// Logs `warn!` when the quantity ceiling blocks the add and `info!`
    /// when a foreign seller evicts the previous cart.
    pub fn add(&self, item: &CatalogItem, seller_id: i64) -> SessionResult<AddOutcome> {
        debug!(product_id = item.product_id, seller_id, "cart add");

        let (outcome, snapshot) = {
            let mut cart = self.cart.lock().expect("cart mutex poisoned");
            let previous_seller = cart.seller_id();
            let outcome = cart.add(item, seller_id)?;

            match outcome {
                AddOutcome::AtCapacity => {
                    warn!(
                        product_id = item.product_id,
                        max_quantity = item.max_quantity,
                        "quantity ceiling reached, cart unchanged"
                    );
                }
                AddOutcome::ReplacedCart { evicted } => {
                    info!(
                        from_seller = ?previous_seller,
                        to_seller = seller_id,
                        evicted,
                        "cart replaced for a different seller"
                    );
                }
                _ => {}
            }

            let snapshot = if outcome.changed_cart() {
                Some(CartSnapshot::from(&*cart))
            } else {
                None
            };
            (outcome, snapshot)
        };

        if let Some(snapshot) = snapshot {
            self.notify(&snapshot);
        }
        Ok(outcome)
    }

    /// Removes a line by product id. Returns whether anything was removed.
    pub fn remove(&self, product_id: i64) -> bool {
        debug!(product_id, "cart remove");

        let snapshot = {
            let mut cart = self.cart.lock().expect("cart mutex poisoned");
            if cart.remove(product_id) {
                Some(CartSnapshot::from(&*cart))
            } else {
                None
            }
        };

        match snapshot {
            Some(snapshot) => {
                self.notify(&snapshot);
                true
            }
            None => false,
        }
    }

    /// Sets a line's quantity. See `Cart::set_quantity` for the semantics.
    pub fn set_quantity(&self, product_id: i64, quantity: i64) -> SetQuantityOutcome {
        debug!(product_id, quantity, "cart set quantity");

        let (outcome, snapshot) = {
            let mut cart = self.cart.lock().expect("cart mutex poisoned");
            let outcome = cart.set_quantity(product_id, quantity);

            if let SetQuantityOutcome::Set { clamped: true } = outcome {
                warn!(product_id, requested = quantity, "quantity clamped to ceiling");
            }

            let snapshot = if outcome.changed_cart() {
                Some(CartSnapshot::from(&*cart))
            } else {
                None
            };
            (outcome, snapshot)
        };

        if let Some(snapshot) = snapshot {
            self.notify(&snapshot);
        }
        outcome
    }

    /// Empties the cart. Watchers are always notified.
    pub fn clear(&self) {
        debug!("cart clear");

        let snapshot = {
            let mut cart = self.cart.lock().expect("cart mutex poisoned");
            cart.clear();
            CartSnapshot::from(&*cart)
        };
        self.notify(&snapshot);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Takes an immutable snapshot of the current cart.
    pub fn snapshot(&self) -> CartSnapshot {
        self.with_cart(|cart| CartSnapshot::from(cart))
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = store.with_cart(|cart| cart.total());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// Watchers are notified afterwards regardless of what the closure
    /// did, because the store cannot tell. Prefer the typed operations;
    /// they skip notification when nothing changed.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let (result, snapshot) = {
            let mut cart = self.cart.lock().expect("cart mutex poisoned");
            let result = f(&mut cart);
            (result, CartSnapshot::from(&*cart))
        };
        self.notify(&snapshot);
        result
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Registers a watcher invoked after every cart change.
    ///
    /// ## Callback Rules
    /// - Runs with the cart lock already released; reading the store
    ///   from inside is fine
    /// - Must not call `subscribe` or `unsubscribe` from inside
    /// - Watchers run in registration order
    pub fn subscribe<F>(&self, watcher: F) -> WatcherId
    where
        F: Fn(&CartSnapshot) + Send + Sync + 'static,
    {
        let id = WatcherId(self.next_watcher_id.fetch_add(1, Ordering::Relaxed));
        let mut watchers = self.watchers.lock().expect("watcher mutex poisoned");
        watchers.push((id, Box::new(watcher)));
        id
    }

    /// Deregisters a watcher. Returns whether it was still registered.
    pub fn unsubscribe(&self, id: WatcherId) -> bool {
        let mut watchers = self.watchers.lock().expect("watcher mutex poisoned");
        let before = watchers.len();
        watchers.retain(|(watcher_id, _)| *watcher_id != id);
        watchers.len() != before
    }

    fn notify(&self, snapshot: &CartSnapshot) {
        let watchers = self.watchers.lock().expect("watcher mutex poisoned");
        for (_, watcher) in watchers.iter() {
            watcher(snapshot);
        }
    }

    // =========================================================================
    // Session Persistence
    // =========================================================================

    /// Writes the current cart to session storage under
    /// [`CART_STORAGE_KEY`].
    pub fn persist_to(&self, storage: &dyn SessionStorage) -> SessionResult<()> {
        let payload = self.with_cart(|cart| serde_json::to_string(cart))?;
        storage.save(CART_STORAGE_KEY, &payload)
    }

    /// Replaces the cart with the one in session storage.
    ///
    /// ## Behavior
    /// - Key absent: store untouched, returns `Ok(false)`
    /// - Payload valid: cart replaced, watchers notified, `Ok(true)`
    /// - Payload unreadable or invariant-violating: falls back to an
    ///   empty cart (a torn snapshot must never produce a bad cart),
    ///   watchers notified, `Ok(false)`
    ///
    /// Only backend failures surface as `Err`.
    pub fn restore_from(&self, storage: &dyn SessionStorage) -> SessionResult<bool> {
        debug!("restoring cart from session storage");

        let payload = match storage.load(CART_STORAGE_KEY)? {
            Some(payload) => payload,
            None => return Ok(false),
        };

        let restored = match serde_json::from_str::<Cart>(&payload) {
            Ok(cart) if cart.is_well_formed() => Some(cart),
            Ok(_) => {
                warn!("persisted cart violates invariants, starting empty");
                None
            }
            Err(err) => {
                warn!(error = %err, "persisted cart unreadable, starting empty");
                None
            }
        };
        let valid = restored.is_some();

        let snapshot = {
            let mut cart = self.cart.lock().expect("cart mutex poisoned");
            *cart = restored.unwrap_or_default();
            CartSnapshot::from(&*cart)
        };
        if valid {
            info!(
                lines = snapshot.totals.line_count,
                seller_id = ?snapshot.seller_id,
                "cart restored from session storage"
            );
        }
        self.notify(&snapshot);
        Ok(valid)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use crate::session::MemoryStorage;

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

    fn collector(store: &CartStore) -> Arc<Mutex<Vec<CartSnapshot>>> {
        let seen: Arc<Mutex<Vec<CartSnapshot>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |snapshot| sink.lock().unwrap().push(snapshot.clone()));
        seen
    }

    #[test]
    fn test_operations_update_snapshot() {
        let store = CartStore::new();

        store.add(&listing(1, 9000, 5), 3).unwrap();
        store.add(&listing(2, 4500, 5), 3).unwrap();
        store.set_quantity(2, 3);
        store.remove(1);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.seller_id, Some(3));
        assert_eq!(snapshot.totals.line_count, 1);
        assert_eq!(snapshot.totals.total_quantity, 3);
        assert_eq!(snapshot.totals.total, Money::from_cents(3 * 4500));
    }

    #[test]
    fn test_watchers_see_changes_only() {
        let store = CartStore::new();
        let seen = collector(&store);
        let dish = listing(1, 6000, 2);

        store.add(&dish, 3).unwrap(); // Added           -> notify
        store.add(&dish, 3).unwrap(); // Incremented     -> notify
        store.add(&dish, 3).unwrap(); // AtCapacity      -> silent
        store.remove(42); //              absent          -> silent
        store.set_quantity(42, 2); //     NotFound        -> silent
        store.clear(); //                 always notifies

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].totals.total_quantity, 1);
        assert_eq!(seen[1].totals.total_quantity, 2);
        assert!(seen[2].items.is_empty());
        assert_eq!(seen[2].seller_id, None);
    }

    #[test]
    fn test_watchers_run_in_registration_order() {
        let store = CartStore::new();
        let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&order);
        store.subscribe(move |_| first.lock().unwrap().push("first"));
        let second = Arc::clone(&order);
        store.subscribe(move |_| second.lock().unwrap().push("second"));

        store.add(&listing(1, 6000, 5), 3).unwrap();

        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = CartStore::new();
        let seen: Arc<Mutex<Vec<CartSnapshot>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = store.subscribe(move |snapshot| sink.lock().unwrap().push(snapshot.clone()));

        store.add(&listing(1, 6000, 5), 3).unwrap();
        assert!(store.unsubscribe(id));
        store.add(&listing(2, 6000, 5), 3).unwrap();

        assert_eq!(seen.lock().unwrap().len(), 1);
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn test_with_cart_mut_notifies() {
        let store = CartStore::new();
        store.add(&listing(1, 6000, 5), 3).unwrap();
        let seen = collector(&store);

        store.with_cart_mut(|cart| cart.clear());

        assert_eq!(seen.lock().unwrap().len(), 1);
        assert!(seen.lock().unwrap()[0].items.is_empty());
    }

    #[test]
    fn test_threaded_adds_stay_invariant_clean() {
        let store = Arc::new(CartStore::new());
        let mut handles = Vec::new();

        for _ in 0..4 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for _ in 0..50 {
                    store.add(&listing(1, 6000, 1000), 3).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.totals.total_quantity, 200);
        assert_eq!(snapshot.totals.line_count, 1);
        assert!(store.with_cart(|cart| cart.is_well_formed()));
    }

    #[test]
    fn test_persist_restore_roundtrip() {
        let storage = MemoryStorage::new();
        let store = CartStore::new();
        store.add(&listing(1, 9000, 5), 3).unwrap();
        store.set_quantity(1, 2);

        store.persist_to(&storage).unwrap();

        let fresh = CartStore::new();
        assert!(fresh.restore_from(&storage).unwrap());

        let snapshot = fresh.snapshot();
        assert_eq!(snapshot.seller_id, Some(3));
        assert_eq!(snapshot.totals.total_quantity, 2);
        assert_eq!(snapshot.totals.total, Money::from_cents(18000));
    }

    #[test]
    fn test_restore_missing_key_leaves_store_untouched() {
        let storage = MemoryStorage::new();
        let store = CartStore::new();
        store.add(&listing(1, 9000, 5), 3).unwrap();

        assert!(!store.restore_from(&storage).unwrap());
        assert_eq!(store.snapshot().totals.line_count, 1);
    }

    #[test]
    fn test_restore_corrupt_payload_falls_back_empty() {
        let storage = MemoryStorage::new();
        storage.save(CART_STORAGE_KEY, "{ definitely not json").unwrap();

        let store = CartStore::new();
        store.add(&listing(1, 9000, 5), 3).unwrap();
        let seen = collector(&store);

        assert!(!store.restore_from(&storage).unwrap());
        assert!(store.snapshot().items.is_empty());
        // The fallback is a state change and watchers hear about it.
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_restore_invariant_violation_falls_back_empty() {
        let storage = MemoryStorage::new();
        // Parses fine, but a seller pin without items is not a cart the
        // operations could ever have produced.
        storage
            .save(
                CART_STORAGE_KEY,
                r#"{"items":[],"sellerId":3,"createdAt":"2026-08-01T10:00:00Z"}"#,
            )
            .unwrap();

        let store = CartStore::new();
        assert!(!store.restore_from(&storage).unwrap());
        assert!(store.snapshot().items.is_empty());
        assert_eq!(store.snapshot().seller_id, None);
    }

    #[test]
    fn test_storage_failures_propagate() {
        struct FailingStorage;

        impl SessionStorage for FailingStorage {
            fn save(&self, key: &str, _value: &str) -> SessionResult<()> {
                Err(SessionError::Storage {
                    key: key.to_string(),
                    reason: "disk full".to_string(),
                })
            }

            fn load(&self, key: &str) -> SessionResult<Option<String>> {
                Err(SessionError::Storage {
                    key: key.to_string(),
                    reason: "disk full".to_string(),
                })
            }

            fn remove(&self, _key: &str) -> SessionResult<()> {
                Ok(())
            }
        }

        let store = CartStore::new();
        store.add(&listing(1, 9000, 5), 3).unwrap();

        let err = store.persist_to(&FailingStorage).unwrap_err();
        assert_eq!(err.code(), "STORAGE_ERROR");

        let err = store.restore_from(&FailingStorage).unwrap_err();
        assert_eq!(err.code(), "STORAGE_ERROR");
        // The cart survives a broken backend.
        assert_eq!(store.snapshot().totals.line_count, 1);
    }
}

//! # tiffin-session: Cart Session Layer for Tiffin
//!
//! This crate wraps the pure cart logic from `tiffin-core` in the stateful
//! shell a storefront needs: a thread-safe store, change notification,
//! session persistence, checkout, and storefront configuration.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Session Architecture                         │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │                    CartStore (Main Entry Point)                  │   │
//! │  │                                                                  │   │
//! │  │  Owns the one live Cart behind Arc<Mutex<_>>                     │   │
//! │  │  Shared by every storefront surface                              │   │
//! │  └────────────────────────────┬─────────────────────────────────────┘   │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                   │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐     │
//! │  │   Watchers     │  │ SessionStorage │  │     OrderGateway       │     │
//! │  │                │  │                │  │                        │     │
//! │  │ Snapshot fan-  │  │ Key/value port │  │ Order submission port  │     │
//! │  │ out after each │  │ for cart save/ │  │ place_order clears the │     │
//! │  │ state change   │  │ restore across │  │ cart only once the     │     │
//! │  │                │  │ sessions       │  │ service says yes       │     │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                         StoreConfig                             │    │
//! │  │                                                                 │    │
//! │  │ Store name + currency display settings, TIFFIN_* env overrides  │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`checkout`] - Order assembly, gateway port, place-order flow
//! - [`config`] - Storefront configuration and currency formatting
//! - [`error`] - Session error types with stable frontend codes
//! - [`session`] - Persistence port and in-memory backend
//! - [`store`] - Thread-safe cart store, snapshots, watchers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tiffin_session::{place_order, CartStore, MemoryStorage};
//!
//! let store = CartStore::new();
//! store.subscribe(|snapshot| render_cart_badge(snapshot.totals.total_quantity));
//!
//! store.add(&listing, seller_id)?;
//!
//! // Survive a page reload.
//! let storage = MemoryStorage::new();
//! store.persist_to(&storage)?;
//! store.restore_from(&storage)?;
//!
//! // Checkout: cart is cleared only if the gateway accepts.
//! let ack = place_order(&store, &gateway, buyer_id, &seller_profile)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod error;
pub mod session;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::{build_order_request, place_order, OrderGateway};
pub use config::StoreConfig;
pub use error::{SessionError, SessionResult};
pub use session::{MemoryStorage, SessionStorage, CART_STORAGE_KEY};
pub use store::{CartSnapshot, CartStore, CartTotals, WatcherId};

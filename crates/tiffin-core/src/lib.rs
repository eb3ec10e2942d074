//! # tiffin-core: Pure Business Logic for Tiffin
//!
//! This crate is the **heart** of Tiffin. It contains all cart and
//! checkout business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tiffin Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Storefront (web frontend)                     │   │
//! │  │     Menu UI ──► Cart UI ──► Checkout UI ──► Confirmation UI    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ generated TS bindings                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tiffin-session (State Layer)                    │   │
//! │  │     CartStore, watchers, session storage, order dispatch       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tiffin-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ Catalog   │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │  Order*   │  │  (cents)  │  │ LineItem  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK BEYOND TIMESTAMPS • PURE      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - The cart itself: line items, operations, outcome codes
//! - [`types`] - Domain types (CatalogItem, SellerProfile, OrderRequest, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: Every operation is deterministic - same input = same output
//! 2. **No I/O**: Network, storage, and UI access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Soft Conditions Are Outcomes**: Hitting a quantity ceiling or switching
//!    sellers returns an outcome code, never an error
//!
//! ## Example Usage
//!
//! ```rust
//! use tiffin_core::cart::{AddOutcome, Cart};
//! use tiffin_core::money::Money;
//! use tiffin_core::types::CatalogItem;
//!
//! let dosa = CatalogItem {
//!     product_id: 1,
//!     name: "Masala Dosa".to_string(),
//!     description: "Crisp, with chutney".to_string(),
//!     image_url: "https://cdn.example/dosa.jpg".to_string(),
//!     price: Money::from_cents(6000),
//!     max_quantity: 4,
//! };
//!
//! let mut cart = Cart::new();
//! let outcome = cart.add(&dosa, 3).unwrap();
//!
//! assert_eq!(outcome, AddOutcome::Added);
//! assert_eq!(cart.total(), Money::from_cents(6000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tiffin_core::Cart` instead of
// `use tiffin_core::cart::Cart`

pub use cart::{AddOutcome, Cart, LineItem, SetQuantityOutcome};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product display name.
///
/// ## Business Reason
/// Matches the catalog service's column limit. Anything longer is a
/// malformed listing, not a real dish name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

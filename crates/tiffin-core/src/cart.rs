//! # Cart
//!
//! Single-seller shopping cart: line items, the seller pin, and the four
//! state transitions the storefront drives.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart State Operations                             │
//! │                                                                         │
//! │  Storefront Action         Operation               Cart State Change    │
//! │  ─────────────────         ─────────               ─────────────────    │
//! │                                                                         │
//! │  Tap "Add" ──────────────► add() ────────────────► push / qty += 1      │
//! │                                                                         │
//! │  Edit quantity ──────────► set_quantity() ───────► qty = n (clamped)    │
//! │                                                                         │
//! │  Tap trash icon ─────────► remove() ─────────────► items.retain(..)     │
//! │                                                                         │
//! │  "Empty cart" ───────────► clear() ──────────────► items.clear()        │
//! │                                                                         │
//! │  Render cart page ───────► total(), items() ─────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Single-Seller Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart pinned to seller A          add(item, seller_b)                   │
//! │  ┌───────────────────────┐        ┌───────────────────────┐             │
//! │  │ sellerId: 3           │  ───►  │ sellerId: 9           │             │
//! │  │ items: [dosa, thali]  │        │ items: [biryani]      │             │
//! │  └───────────────────────┘        └───────────────────────┘             │
//! │                                                                         │
//! │  The old cart is evicted wholesale. One order, one kitchen: a mixed     │
//! │  cart could never be submitted, so it is never allowed to exist.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `seller_id` is `Some` exactly when `items` is non-empty
//! - items are unique by `product_id`
//! - every line satisfies `1 <= qty_in_cart <= max_quantity`
//!
//! Fields are private so the operations below are the only write path;
//! the invariants hold after any sequence of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::CatalogItem;
use crate::validation::{validate_catalog_item, validate_entity_id};

// =============================================================================
// Line Item
// =============================================================================

/// One product in the cart.
///
/// ## Design Notes
/// Every catalog field is frozen at add time. If the seller renames the
/// dish or raises the price while it sits in a cart, the cart keeps
/// showing (and totalling) what the buyer agreed to add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Product id (frozen).
    pub product_id: i64,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Description at time of adding (frozen).
    pub description: String,

    /// Image URL at time of adding (frozen).
    pub image_url: String,

    /// Unit price at time of adding (frozen).
    pub price: Money,

    /// Availability ceiling at time of adding (frozen).
    pub max_quantity: i64,

    /// How many the buyer wants. Always within `1..=max_quantity`.
    pub qty_in_cart: i64,

    /// When this line entered the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Freezes a catalog listing into a cart line with quantity 1.
    pub fn from_catalog(item: &CatalogItem) -> Self {
        LineItem {
            product_id: item.product_id,
            name: item.name.clone(),
            description: item.description.clone(),
            image_url: item.image_url.clone(),
            price: item.price,
            max_quantity: item.max_quantity,
            qty_in_cart: 1,
            added_at: Utc::now(),
        }
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price * self.qty_in_cart
    }

    /// Whether the line already holds as many as the seller allows.
    #[inline]
    pub const fn at_capacity(&self) -> bool {
        self.qty_in_cart >= self.max_quantity
    }
}

// =============================================================================
// Operation Outcomes
// =============================================================================

/// What `Cart::add` did.
///
/// ## Why An Enum?
/// Two of these are soft conditions the storefront surfaces differently:
/// `AtCapacity` shows a "max N per order" toast, `ReplacedCart` shows a
/// "started a new cart" notice. Neither is an error, so neither may
/// abort the flow the way a `Result::Err` would. Callers that don't
/// care may ignore the outcome and observe state, exactly as before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    /// New line appended with quantity 1.
    Added,
    /// Product was already in the cart, quantity went up by one.
    Incremented,
    /// Quantity already at the seller's ceiling. Cart unchanged.
    AtCapacity,
    /// Item belonged to a different seller: the previous cart was
    /// evicted wholesale and a fresh one started around this item.
    ReplacedCart { evicted: usize },
}

impl AddOutcome {
    /// Whether the operation mutated cart state.
    ///
    /// Watchers are only notified when this is true.
    #[inline]
    pub const fn changed_cart(&self) -> bool {
        !matches!(self, AddOutcome::AtCapacity)
    }
}

/// What `Cart::set_quantity` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SetQuantityOutcome {
    /// Quantity updated. `clamped` is true when the request exceeded the
    /// seller's ceiling and was lowered to it.
    Set { clamped: bool },
    /// Requested quantity was below 1, so the line was removed.
    Removed,
    /// Product is not in the cart. No-op.
    NotFound,
}

impl SetQuantityOutcome {
    /// Whether the operation mutated cart state.
    #[inline]
    pub const fn changed_cart(&self) -> bool {
        !matches!(self, SetQuantityOutcome::NotFound)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - The seller pin is set exactly while the cart holds items
/// - Items are unique by `product_id` (adding the same product again
///   increments its quantity)
/// - `1 <= qty_in_cart <= max_quantity` on every line
///
/// Nothing in here is fatal: over-capacity adds and foreign-seller adds
/// resolve to [`AddOutcome`] values, not errors. The only errors `add`
/// can return are for malformed catalog descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    /// Lines in the cart, in the order they were first added.
    items: Vec<LineItem>,

    /// The seller every line belongs to. `None` while the cart is empty.
    seller_id: Option<i64>,

    /// When the cart was created or last emptied.
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            seller_id: None,
            created_at: Utc::now(),
        }
    }

    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Adds one unit of a catalog listing to the cart.
    ///
    /// ## Behavior
    /// - Cart pinned to a *different* seller: the whole cart is replaced
    ///   by a fresh one holding this item (`ReplacedCart`)
    /// - Product already present below its ceiling: quantity + 1
    ///   (`Incremented`)
    /// - Product already present at its ceiling: nothing changes
    ///   (`AtCapacity`)
    /// - Otherwise: a new line with quantity 1, and the cart pins itself
    ///   to `seller_id` if it was empty (`Added`)
    ///
    /// ## Returns
    /// `Err` only for a malformed descriptor (blank name, negative
    /// price, ceiling below 1) or a non-positive seller id. The cart is
    /// untouched in that case.
    pub fn add(&mut self, item: &CatalogItem, seller_id: i64) -> CoreResult<AddOutcome> {
        validate_catalog_item(item)?;
        validate_entity_id("sellerId", seller_id)?;

        // Foreign seller evicts the cart before anything else is
        // considered. Product ids are catalog-global, so a pinned cart
        // can never already contain a foreign seller's product.
        if let Some(current) = self.seller_id {
            if current != seller_id {
                let evicted = self.items.len();
                self.items.clear();
                self.items.push(LineItem::from_catalog(item));
                self.seller_id = Some(seller_id);
                return Ok(AddOutcome::ReplacedCart { evicted });
            }
        }

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product_id == item.product_id)
        {
            if line.at_capacity() {
                return Ok(AddOutcome::AtCapacity);
            }
            line.qty_in_cart += 1;
            return Ok(AddOutcome::Incremented);
        }

        self.items.push(LineItem::from_catalog(item));
        self.seller_id = Some(seller_id);
        Ok(AddOutcome::Added)
    }

    /// Removes a line from the cart by product id.
    ///
    /// ## Behavior
    /// - Product absent: no-op, returns `false`
    /// - Last line removed: the seller pin is released so the next add
    ///   can come from any seller
    pub fn remove(&mut self, product_id: i64) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|line| line.product_id != product_id);

        let removed = self.items.len() != initial_len;
        if removed && self.items.is_empty() {
            self.seller_id = None;
        }
        removed
    }

    /// Sets the quantity of a line directly.
    ///
    /// ## Behavior
    /// - Quantity below 1 means "remove the line" (releasing the seller
    ///   pin if it was the last one)
    /// - Quantity above the line's ceiling is clamped down to it; the
    ///   stored value never exceeds the request either
    /// - Product absent: no-op (`NotFound`)
    pub fn set_quantity(&mut self, product_id: i64, quantity: i64) -> SetQuantityOutcome {
        if quantity < 1 {
            return if self.remove(product_id) {
                SetQuantityOutcome::Removed
            } else {
                SetQuantityOutcome::NotFound
            };
        }

        match self
            .items
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            Some(line) => {
                let clamped = quantity > line.max_quantity;
                line.qty_in_cart = if clamped { line.max_quantity } else { quantity };
                SetQuantityOutcome::Set { clamped }
            }
            None => SetQuantityOutcome::NotFound,
        }
    }

    /// Empties the cart and releases the seller pin. Idempotent.
    pub fn clear(&mut self) {
        self.items.clear();
        self.seller_id = None;
        self.created_at = Utc::now();
    }

    // =========================================================================
    // Read Operations
    // =========================================================================

    /// Lines in the cart, in insertion order.
    #[inline]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The seller the cart is pinned to, `None` while empty.
    #[inline]
    pub const fn seller_id(&self) -> Option<i64> {
        self.seller_id
    }

    /// When the cart was created or last emptied.
    #[inline]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Grand total across all lines.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Number of distinct products in the cart.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|line| line.qty_in_cart).sum()
    }

    /// Quantity of one product, or `None` if it is not in the cart.
    pub fn quantity_of(&self, product_id: i64) -> Option<i64> {
        self.items
            .iter()
            .find(|line| line.product_id == product_id)
            .map(|line| line.qty_in_cart)
    }

    /// Checks if the cart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checks every cart invariant.
    ///
    /// ## When This Occurs
    /// The operations above can't produce a bad cart, but a cart
    /// rehydrated from persisted JSON can claim anything. Session
    /// restore calls this and falls back to an empty cart when it
    /// fails.
    pub fn is_well_formed(&self) -> bool {
        if self.seller_id.is_some() == self.items.is_empty() {
            return false;
        }

        for (idx, line) in self.items.iter().enumerate() {
            if line.qty_in_cart < 1 || line.qty_in_cart > line.max_quantity {
                return false;
            }
            if self.items[..idx]
                .iter()
                .any(|earlier| earlier.product_id == line.product_id)
            {
                return false;
            }
        }

        true
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

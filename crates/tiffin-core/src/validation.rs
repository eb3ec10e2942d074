//! # Validation Module
//!
//! Input validation for catalog descriptors and order payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Storefront frontend                                       │
//! │  ├── Disables +/- buttons at the quantity bounds                    │
//! │  └── Immediate user feedback                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE                                               │
//! │  ├── Catalog descriptor checks before `Cart::add` touches state     │
//! │  └── Order payload preconditions before submission                  │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Order-submission service                                  │
//! │  └── Re-validates ids, array lengths, quantities server-side        │
//! │                                                                     │
//! │  Defense in depth: the cart never trusts its callers                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tiffin_core::validation::{validate_max_quantity, validate_product_name};
//!
//! // Validate catalog data before it enters a cart
//! validate_product_name("Paneer Roll").unwrap();
//! validate_max_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::CatalogItem;
use crate::MAX_PRODUCT_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product display name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// Description and image URL are deliberately NOT validated: they are
/// opaque display attributes the cart only carries.
///
/// ## Example
/// ```rust
/// use tiffin_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Masala Dosa").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a seller-declared availability ceiling.
///
/// ## Rules
/// - Must be at least 1; a listing with no available quantity must not
///   reach the cart at all
///
/// ## Example
/// ```rust
/// use tiffin_core::validation::validate_max_quantity;
///
/// assert!(validate_max_quantity(1).is_ok());
/// assert!(validate_max_quantity(0).is_err());
/// assert!(validate_max_quantity(-3).is_err());
/// ```
pub fn validate_max_quantity(max_quantity: i64) -> ValidationResult<()> {
    if max_quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "maxQuantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog price.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (free items, e.g. promotional samples the seller
///   lists at no charge)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a collaborator-issued entity id (user, seller, product).
///
/// ## Rules
/// - Must be positive; the catalog and order services issue ids from 1
///   and treat 0 as "missing"
pub fn validate_entity_id(field: &str, id: i64) -> ValidationResult<()> {
    if id < 1 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a full catalog descriptor before it is admitted to a cart.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  Buyer taps "Add" on a product card                                 │
/// │       │                                                             │
/// │       ▼                                                             │
/// │  validate_catalog_item(&item) ← THIS FUNCTION                       │
/// │       │                                                             │
/// │       ├── maxQuantity < 1? → Error: "maxQuantity must be positive"  │
/// │       │                                                             │
/// │       ├── price < 0?       → Error: "price must not be negative"    │
/// │       │                                                             │
/// │       ├── name blank?      → Error: "name is required"              │
/// │       │                                                             │
/// │       └── OK → Cart::add proceeds                                   │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_catalog_item(item: &CatalogItem) -> ValidationResult<()> {
    validate_product_name(&item.name)?;
    validate_price(item.price)?;
    validate_max_quantity(item.max_quantity)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

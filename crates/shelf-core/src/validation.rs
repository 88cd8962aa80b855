//! # Validation Module
//!
//! Product rules checked before a record may enter a catalog.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (external)                                              │
//! │  └── Raw text → ProductDraft (Money::parse_lenient, date pickers)      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── validate_draft: code, name, dates, prices, quantity               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog (shelf-store)                                        │
//! │  └── unique code guard on insert                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rules run in a fixed order and the first failure is returned.
//!
//! ## Usage
//! ```rust
//! use shelf_core::validation::{validate_code, validate_stock_quantity};
//!
//! assert!(validate_code("ABC12345").is_ok());
//! assert!(validate_stock_quantity(-1).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ProductDraft;
use crate::{CODE_LENGTH, MIN_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code.
///
/// ## Rules
/// - Exactly 8 characters
/// - ASCII letters and digits only (`^[A-Za-z0-9]{8}$`)
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_code;
///
/// assert!(validate_code("ABC12345").is_ok());
/// assert!(validate_code("ABC-1234").is_err());
/// assert!(validate_code("ABC1234").is_err());
/// ```
pub fn validate_code(code: &str) -> ValidationResult<()> {
    let well_formed =
        code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_alphanumeric());

    if !well_formed {
        return Err(ValidationError::InvalidCode {
            code: code.to_string(),
            len: CODE_LENGTH,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At least 3 characters once surrounding whitespace is removed
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().chars().count() < MIN_NAME_LENGTH {
        return Err(ValidationError::NameTooShort {
            min: MIN_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates that a product was not manufactured after `today`.
pub fn validate_manufacture_date(manufacture: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if manufacture > today {
        return Err(ValidationError::ManufactureDateInFuture { manufacture, today });
    }

    Ok(())
}

/// Validates that expiry does not precede manufacture.
///
/// Same-day expiry is allowed.
pub fn validate_expiry_date(expiry: NaiveDate, manufacture: NaiveDate) -> ValidationResult<()> {
    if expiry < manufacture {
        return Err(ValidationError::ExpiryBeforeManufacture {
            expiry,
            manufacture,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a purchase/sell price pair.
///
/// ## Rules
/// - Purchase price must be non-negative (zero is allowed: free stock)
/// - Sell price must be strictly greater than purchase price once both are
///   rounded to export precision (2 decimals), so the pair still holds after
///   the catalog file is written and read back
///
/// ## Example
/// ```rust
/// use shelf_core::money::Money;
/// use shelf_core::validation::validate_prices;
///
/// assert!(validate_prices(Money::from_cents(200), Money::from_cents(500)).is_ok());
/// assert!(validate_prices(Money::from_cents(500), Money::from_cents(300)).is_err());
/// assert!(validate_prices(Money::from_cents(500), Money::from_cents(500)).is_err());
/// // 1.001 and 1.004 are both written as 1.00
/// assert!(validate_prices(Money::parse("1.001").unwrap(), Money::parse("1.004").unwrap()).is_err());
/// ```
pub fn validate_prices(purchase: Money, sell: Money) -> ValidationResult<()> {
    if purchase.is_negative() {
        return Err(ValidationError::NegativePrice { price: purchase });
    }

    if sell.round_to_export() <= purchase.round_to_export() {
        return Err(ValidationError::SellPriceNotAbovePurchase { sell, purchase });
    }

    Ok(())
}

/// Validates a stock quantity (zero allowed).
pub fn validate_stock_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::NegativeQuantity { quantity });
    }

    Ok(())
}

// =============================================================================
// Record Validator
// =============================================================================

/// Runs every product rule against a draft, in order: code, name,
/// manufacture date, expiry date, prices, quantity.
pub fn validate_draft(draft: &ProductDraft, today: NaiveDate) -> ValidationResult<()> {
    validate_code(&draft.code)?;
    validate_product_name(&draft.name)?;
    validate_manufacture_date(draft.manufacture_date, today)?;
    validate_expiry_date(draft.expiry_date, draft.manufacture_date)?;
    validate_prices(draft.purchase_price, draft.sell_price)?;
    validate_stock_quantity(draft.stock_quantity)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

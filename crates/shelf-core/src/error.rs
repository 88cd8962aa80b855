//! # Error Types
//!
//! Domain-specific error types for shelf-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelf-core errors (this file)                                         │
//! │  └── ValidationError  - A product field broke a rule                   │
//! │                                                                         │
//! │  shelf-store errors (separate crate)                                   │
//! │  └── StoreError       - Duplicate key, malformed line, I/O             │
//! │                                                                         │
//! │  Flow: ValidationError → StoreError::MalformedRecord / caller          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is recoverable: the caller corrects the input and retries.

use chrono::NaiveDate;
use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Validation Error
// =============================================================================

/// Product validation failures.
///
/// Raised while turning a [`crate::ProductDraft`] into a
/// [`crate::Product`], before any catalog is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Code is not exactly 8 ASCII letters/digits.
    #[error("code '{code}' must be exactly {len} alphanumeric characters")]
    InvalidCode { code: String, len: usize },

    /// Name is blank or shorter than the minimum.
    #[error("name must not be blank and must have at least {min} characters")]
    NameTooShort { min: usize },

    /// Manufacture date lies after the reference day.
    #[error("manufacture date {manufacture} is after today ({today})")]
    ManufactureDateInFuture {
        manufacture: NaiveDate,
        today: NaiveDate,
    },

    /// Expiry date precedes the manufacture date.
    #[error("expiry date {expiry} is before manufacture date {manufacture}")]
    ExpiryBeforeManufacture {
        expiry: NaiveDate,
        manufacture: NaiveDate,
    },

    /// Purchase price is negative.
    #[error("purchase price {price} must not be negative")]
    NegativePrice { price: Money },

    /// Sell price is not strictly above the purchase price.
    #[error("sell price {sell} must be greater than purchase price {purchase}")]
    SellPriceNotAbovePurchase { sell: Money, purchase: Money },

    /// Stock quantity is negative.
    #[error("stock quantity {quantity} must not be negative")]
    NegativeQuantity { quantity: i64 },

    /// A raw text value could not be parsed.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::InvalidCode {
            code: "AB1".to_string(),
            len: 8,
        };
        assert_eq!(
            err.to_string(),
            "code 'AB1' must be exactly 8 alphanumeric characters"
        );

        let err = ValidationError::NameTooShort { min: 3 };
        assert_eq!(
            err.to_string(),
            "name must not be blank and must have at least 3 characters"
        );
    }

    #[test]
    fn test_price_error_shows_money() {
        let err = ValidationError::SellPriceNotAbovePurchase {
            sell: Money::from_cents(300),
            purchase: Money::from_cents(500),
        };
        assert_eq!(
            err.to_string(),
            "sell price 3.00 must be greater than purchase price 5.00"
        );
    }
}

//! # Money Module
//!
//! Provides the `Money` type for handling prices exactly.
//!
//! ## Why a Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With f64:                                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Imported files may carry any number of fractional digits              │
//! │  ("2.5", "2.499", "19.9900"), so fixed integer cents are not enough.   │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal (rust_decimal)                           │
//! │    Exact storage, exact comparison, explicit rounding on output        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Floats only appear at the very edge, when an aggregate (an average) is
//! handed to the caller.
//!
//! ## Usage
//! ```rust
//! use shelf_core::money::Money;
//!
//! let price = Money::parse("10.99").unwrap();
//! let cost = Money::from_cents(550);
//!
//! assert_eq!((price - cost).to_fixed2(), "5.49");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::validation::ValidationResult;

/// Number of fractional digits used when a price is written out.
pub const EXPORT_SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount stored as an exact decimal.
///
/// ## Design Decisions
/// - **Decimal (signed)**: comparisons like "sell > purchase" are exact
/// - **Single field tuple struct**: zero-cost wrapper over `Decimal`
/// - **Serde**: serialized as a string (`"12.50"`), never as a float
///
/// Equality is numeric: `2.5` and `2.50` are the same amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps an existing decimal.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (two implied fractional digits).
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).to_fixed2(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Parses any valid decimal literal.
    ///
    /// Accepts plain (`"12"`, `"-3.125"`) and scientific (`"1.5e2"`)
    /// notation. No precision limit is applied.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// assert_eq!(Money::parse("2.5").unwrap(), Money::from_cents(250));
    /// assert!(Money::parse("abc").is_err());
    /// ```
    pub fn parse(text: &str) -> ValidationResult<Money> {
        let text = text.trim();

        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map(Money)
            .map_err(|_| ValidationError::invalid_format("price", format!("'{text}' is not a decimal number")))
    }

    /// Parses form input: blank means zero and `,` is accepted as the
    /// decimal separator.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// assert_eq!(Money::parse_lenient("4,75").unwrap(), Money::from_cents(475));
    /// assert_eq!(Money::parse_lenient("  ").unwrap(), Money::zero());
    /// ```
    pub fn parse_lenient(text: &str) -> ValidationResult<Money> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Money::zero());
        }
        Money::parse(&text.replace(',', "."))
    }

    /// Formats with exactly two fractional digits, rounding half away from
    /// zero.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// assert_eq!(Money::parse("5").unwrap().to_fixed2(), "5.00");
    /// assert_eq!(Money::parse("2.005").unwrap().to_fixed2(), "2.01");
    /// ```
    pub fn to_fixed2(&self) -> String {
        self.round_to_export().0.to_string()
    }

    /// Rounds to [`EXPORT_SCALE`] digits, half away from zero: the value a
    /// file round trip yields.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// assert_eq!(Money::parse("1.004").unwrap().round_to_export(), Money::from_cents(100));
    /// ```
    pub fn round_to_export(&self) -> Money {
        let mut rounded = self
            .0
            .round_dp_with_strategy(EXPORT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(EXPORT_SCALE);
        Money(rounded)
    }

    /// Adds, returning `None` when the sum leaves the decimal range.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Converts to `f64` for aggregate reporting.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with two decimals, no currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fixed2())
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

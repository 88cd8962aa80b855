//! # Domain Types
//!
//! Core domain types used throughout Shelf.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  validate(today)  ┌─────────────────┐             │
//! │  │  ProductDraft   │ ────────────────► │    Product      │             │
//! │  │  ─────────────  │                   │  ─────────────  │             │
//! │  │  pub fields     │                   │  private fields │             │
//! │  │  unchecked      │ ◄──────────────── │  always valid   │             │
//! │  └─────────────────┘    to_draft()     └────────┬────────┘             │
//! │                                                 │ embeds                │
//! │                                        ┌────────▼────────┐             │
//! │                                        │    Category     │             │
//! │                                        │  name (key)     │             │
//! │                                        │  sector?        │             │
//! │                                        │  description?   │             │
//! │                                        └─────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! - Product: `code` (8 alphanumeric characters) is the primary key
//! - Category: `name` is the grouping key; there is no category registry,
//!   every product carries its own copy

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::validation::{validate_draft, ValidationResult};
use crate::{NO_SECTOR, UNCATEGORIZED};

/// Fractional digits kept when computing a margin ratio.
pub const MARGIN_SCALE: u32 = 6;

// =============================================================================
// Category
// =============================================================================

/// A named grouping attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Grouping key for every per-category report.
    pub name: String,

    /// Secondary grouping label, used only by the sector report.
    pub sector: Option<String>,

    pub description: Option<String>,
}

impl Category {
    /// Creates a category with no sector and no description.
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            name: name.into(),
            sector: None,
            description: None,
        }
    }

    /// The category assigned when none was chosen.
    pub fn uncategorized() -> Self {
        Category::new(UNCATEGORIZED)
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the sector, or [`NO_SECTOR`] when it is absent or blank.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::{Category, NO_SECTOR};
    ///
    /// assert_eq!(Category::new("Limpeza").with_sector("Casa").sector_label(), "Casa");
    /// assert_eq!(Category::new("Limpeza").with_sector("  ").sector_label(), NO_SECTOR);
    /// assert_eq!(Category::new("Limpeza").sector_label(), NO_SECTOR);
    /// ```
    pub fn sector_label(&self) -> &str {
        match self.sector.as_deref() {
            Some(sector) if !sector.trim().is_empty() => sector,
            _ => NO_SECTOR,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::uncategorized()
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// Unvalidated product input, as collected by a form or a file line.
///
/// The only way to obtain a [`Product`] is [`ProductDraft::validate`]
/// (or [`Product::new`], which is the same call).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub code: String,
    pub name: String,
    pub description: String,
    pub manufacture_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub purchase_price: Money,
    pub sell_price: Money,
    pub stock_quantity: i64,
    pub category: Category,
}

impl ProductDraft {
    /// Checks every product rule against `today` and builds the product.
    ///
    /// Nothing is constructed when a rule fails.
    pub fn validate(self, today: NaiveDate) -> ValidationResult<Product> {
        validate_draft(&self, today)?;

        Ok(Product {
            code: self.code,
            name: self.name,
            description: self.description,
            manufacture_date: self.manufacture_date,
            expiry_date: self.expiry_date,
            purchase_price: self.purchase_price,
            sell_price: self.sell_price,
            stock_quantity: self.stock_quantity,
            category: self.category,
        })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A validated product record.
///
/// ## Invariants
/// - `code` matches `^[A-Za-z0-9]{8}$`
/// - `name` has at least 3 non-blank characters
/// - `manufacture_date` was not in the future when validated
/// - `expiry_date >= manufacture_date`
/// - `0 <= purchase_price < sell_price`
/// - `stock_quantity >= 0`
///
/// Fields are private so the invariants cannot be broken after validation.
/// To edit, call [`Product::to_draft`], change the draft and validate again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    code: String,
    name: String,
    description: String,
    manufacture_date: NaiveDate,
    expiry_date: NaiveDate,
    purchase_price: Money,
    sell_price: Money,
    stock_quantity: i64,
    category: Category,
}

impl Product {
    /// Validates a draft against `today`. Same as [`ProductDraft::validate`].
    pub fn new(draft: ProductDraft, today: NaiveDate) -> ValidationResult<Product> {
        draft.validate(today)
    }

    /// Returns an editable copy of this record.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            code: self.code.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            manufacture_date: self.manufacture_date,
            expiry_date: self.expiry_date,
            purchase_price: self.purchase_price,
            sell_price: self.sell_price,
            stock_quantity: self.stock_quantity,
            category: self.category.clone(),
        }
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn manufacture_date(&self) -> NaiveDate {
        self.manufacture_date
    }

    #[inline]
    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    #[inline]
    pub fn purchase_price(&self) -> Money {
        self.purchase_price
    }

    #[inline]
    pub fn sell_price(&self) -> Money {
        self.sell_price
    }

    #[inline]
    pub fn stock_quantity(&self) -> i64 {
        self.stock_quantity
    }

    #[inline]
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// True when the product expired strictly before `as_of`.
    ///
    /// A product expiring on `as_of` itself is still good that day.
    pub fn is_expired(&self, as_of: NaiveDate) -> bool {
        self.expiry_date < as_of
    }

    /// True when expiry falls in the closed range `[from, until]`.
    pub fn expires_between(&self, from: NaiveDate, until: NaiveDate) -> bool {
        self.expiry_date >= from && self.expiry_date <= until
    }

    /// Profit margin `(sell - purchase) / sell`.
    ///
    /// The division is done in decimal and rounded to 6 fractional digits
    /// (half up) before becoming a float. Returns `None` when the sell price
    /// is not positive.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use shelf_core::{Category, Money, ProductDraft};
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let product = ProductDraft {
    ///     code: "MARGIN01".to_string(),
    ///     name: "Thirds".to_string(),
    ///     description: String::new(),
    ///     manufacture_date: day,
    ///     expiry_date: day,
    ///     purchase_price: Money::from_cents(200),
    ///     sell_price: Money::from_cents(300),
    ///     stock_quantity: 1,
    ///     category: Category::new("Test"),
    /// }
    /// .validate(day)
    /// .unwrap();
    ///
    /// // 1 / 3 = 0.333333 (6 digits)
    /// assert_eq!(product.margin(), Some(0.333333));
    /// ```
    pub fn margin(&self) -> Option<f64> {
        if !self.sell_price.is_positive() {
            return None;
        }

        let sell = self.sell_price.amount();
        let profit = sell - self.purchase_price.amount();
        profit
            .checked_div(sell)?
            .round_dp_with_strategy(MARGIN_SCALE, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # shelf-core: Pure Domain Logic for Shelf
//!
//! This crate holds the product model and every rule a product must satisfy
//! before it can enter a catalog. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Shelf Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Form / presentation layer (external)               │   │
//! │  │      fills a ProductDraft ──► validate ──► Catalog::add         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shelf-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │  Product  │  │   Money   │  │   rules   │                  │   │
//! │  │   │ Category  │  │ (Decimal) │  │   checks  │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • PURE FUNCTIONS                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              shelf-store (Catalog + text import/export)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductDraft, Category)
//! - [`money`] - Money type backed by an exact decimal
//! - [`error`] - Domain error types
//! - [`validation`] - Product validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use shelf_core::{Category, Money, ProductDraft};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let product = ProductDraft {
//!     code: "ABC12345".to_string(),
//!     name: "Soap".to_string(),
//!     description: String::new(),
//!     manufacture_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     expiry_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!     purchase_price: Money::parse("2.00").unwrap(),
//!     sell_price: Money::parse("5.00").unwrap(),
//!     stock_quantity: 10,
//!     category: Category::new("Limpeza").with_sector("Casa"),
//! }
//! .validate(today)
//! .unwrap();
//!
//! assert_eq!(product.code(), "ABC12345");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Exact length of a product code.
pub const CODE_LENGTH: usize = 8;

/// Minimum number of characters in a product name.
pub const MIN_NAME_LENGTH: usize = 3;

/// Bucket used by sector reports when a category has no sector.
pub const NO_SECTOR: &str = "Sem setor";

/// Category name used when the form submits no category.
pub const UNCATEGORIZED: &str = "Sem categoria";

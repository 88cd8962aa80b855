//! # shelf-store: Catalog Layer for Shelf
//!
//! This crate keeps the product collection in memory and moves it to and
//! from the semicolon text file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Shelf Data Flow                                │
//! │                                                                         │
//! │  Form submits ProductDraft ──► shelf_core::validate ──► Product        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  shelf-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Catalog    │    │  text_format  │    │ StoreConfig  │  │   │
//! │  │   │ (catalog.rs)  │    │               │    │ (config.rs)  │  │   │
//! │  │   │               │    │ encode/decode │    │              │  │   │
//! │  │   │ add / remove  │───►│ header + 9    │    │ TOML + env   │  │   │
//! │  │   │ reports       │    │ fields / line │    │ overrides    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     produtos.csv                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`catalog`] - The record collection and its reports
//! - [`text_format`] - Semicolon-delimited encoding
//! - [`report`] - Combined report snapshot
//! - [`config`] - File location and report thresholds
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Local;
//! use shelf_store::{Catalog, StoreConfig};
//!
//! let config = StoreConfig::load_or_default(None);
//! let catalog = Catalog::new();
//! catalog.import_from_path(&config.data_file, config.import_mode)?;
//!
//! let report = catalog.report(
//!     Local::now().date_naive(),
//!     config.near_expiry_days,
//!     config.low_stock_threshold,
//! );
//! println!("{report}");
//! # Ok::<(), shelf_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod report;
pub mod text_format;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{Catalog, ImportMode};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use report::CatalogReport;

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shelf_store=trace` - Show trace for the store only
/// - Default: INFO, with DEBUG for shelf crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shelf=debug"));

    // Embedders may already have installed a subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

//! # Store Error Types
//!
//! Error types for catalog operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Catalog::add ──────────► DuplicateKey     (choose another code)       │
//! │                                                                         │
//! │  text_format::decode ───► MalformedRecord  (line number + reason)      │
//! │                                                                         │
//! │  export/import file ────► Io               (std::io::Error)            │
//! │                                                                         │
//! │  StoreConfig::load ─────► Config           (bad TOML / env value)      │
//! │                                                                         │
//! │  None of these leave the catalog half-modified.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "Not found" is not an error: lookups return `Option`.

use thiserror::Error;

/// Catalog operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with this code is already stored.
    ///
    /// ## When This Occurs
    /// - `add` with a code already in the catalog
    /// - `replace` onto the code of a different record
    /// - merge import whose file collides with stored codes
    /// - an import file listing the same code twice
    #[error("Duplicate code: '{code}' already exists")]
    DuplicateKey { code: String },

    /// A line of an import file could not be turned into a product.
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Reading or writing the catalog file failed.
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// Creates a DuplicateKey error.
    pub fn duplicate(code: impl Into<String>) -> Self {
        StoreError::DuplicateKey { code: code.into() }
    }

    /// Creates a MalformedRecord error.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        StoreError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for catalog operations.
pub type StoreResult<T> = Result<T, StoreError>;

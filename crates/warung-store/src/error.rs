//! # Store Error Types
//!
//! Error types for flat-file store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error (disk unavailable, permission denied)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds the file path; fatal, never retried    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError (warung-service) ← what the caller maps to a response     │
//! │                                                                         │
//! │  FormatError never reaches here: corrupt lines are skipped in-store     │
//! │  with a warning (partial corruption must not block the dataset).        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Flat-file store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Lookup by id found nothing.
    ///
    /// Distinguished from validation errors so callers can map it to a
    /// different response code.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// A stock mutation would drive the level below zero.
    /// The store is left unmodified when this is returned.
    #[error("Insufficient stock for '{name}': available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// File I/O failed. Treated as fatal: propagated with no retry.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Creates a NotFound error for a given entity kind and id.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        StoreError::NotFound { entity, id }
    }

    /// Creates an InsufficientStock error naming the product and shortfall.
    pub fn insufficient_stock(name: impl Into<String>, available: i64, requested: i64) -> Self {
        StoreError::InsufficientStock {
            name: name.into(),
            available,
            requested,
        }
    }

    /// Wraps an I/O failure with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the not-found outcome (vs. a hard failure).
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

//! # Service Error Types
//!
//! What external callers see. The taxonomy keeps not-found outcomes
//! distinguishable from validation errors so a caller can map them to
//! different response codes (404 vs 400/422), without this crate knowing
//! anything about HTTP.

use thiserror::Error;
use warung_core::ValidationError;
use warung_store::StoreError;

/// Service operation errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A store-level failure: not found, insufficient stock, or I/O.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Caller input failed a business rule. Surfaced before any mutation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ServiceError {
    /// True for the not-found outcome (a caller would answer 404).
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Store(err) if err.is_not_found())
    }

    /// True for validation failures, including duplicate names (400/422).
    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation(_))
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================

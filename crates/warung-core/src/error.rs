//! # Error Types
//!
//! Domain-level error types for warung-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  warung-core errors                                                     │
//! │  ├── ValidationError  - Input validation failures (this file)           │
//! │  └── FormatError      - Stored line doesn't match the codec (codec.rs)  │
//! │                                                                         │
//! │  warung-store errors (separate crate)                                   │
//! │  └── StoreError       - NotFound / InsufficientStock / I/O              │
//! │                                                                         │
//! │  warung-service errors (separate crate)                                 │
//! │  └── ServiceError     - What the HTTP layer maps to response codes      │
//! │                                                                         │
//! │  Flow: ValidationError → ServiceError → caller                          │
//! │        FormatError is recovered in-store (skip + warn), never surfaced  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, offending value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet the business rules, and are
/// always surfaced **before** any mutation happens.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Invalid content (e.g. a delimiter character in a name).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Duplicate value (case-insensitive product name collision).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: &'static str, value: String },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

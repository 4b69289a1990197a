//! # warung-core: Pure Domain Logic for Warung POS
//!
//! This crate is the **heart** of Warung POS. It contains the domain types,
//! the flat-file line codec, and input validation as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Warung POS Data Flow                             │
//! │                                                                         │
//! │  Caller (HTTP layer / CLI — out of scope, external collaborator)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  warung-service                                                        │
//! │    ProductService ──► SaleService (validate, price, commit)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  warung-store                                                          │
//! │    ProductStore / TransactionStore over locked .txt files              │
//! │       │                                                                 │
//! │  ┌────▼────────────────────────────────────────────────────────────┐   │
//! │  │               ★ warung-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   codec   │  │ validation│  │   error   │   │   │
//! │  │   │  Product  │  │ LineRecord│  │   rules   │  │ Validation│   │   │
//! │  │   │Transaction│  │ id|nama|..│  │   checks  │  │   Error   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILE SYSTEM • NO CLOCK • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Transaction, requests, reports)
//! - [`codec`] - The pipe-delimited line format for the two data files
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: File system access is FORBIDDEN here; that is warung-store's job
//! 3. **Integer Money**: Prices and totals are whole Rupiah (i64), never floats
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use warung_core::codec::LineRecord;
//! use warung_core::Product;
//!
//! let line = "1|Kopi|15000|20|2026-08-29T09:30:00.000000+00:00";
//! let product = Product::from_line(line).unwrap();
//!
//! assert_eq!(product.name, "Kopi");
//! assert_eq!(product.price, 15000);
//! assert_eq!(product.to_line(), line);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use warung_core::Product` instead of
// `use warung_core::types::Product`

pub use codec::{FormatError, LineRecord};
pub use error::ValidationError;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name, in characters.
///
/// ## Business Reason
/// Keeps names printable on a receipt line and bounds the .txt row width.
pub const MAX_NAME_CHARS: usize = 100;

/// Cashier name recorded when a sale request does not carry one.
pub const DEFAULT_CASHIER: &str = "admin";

/// Default stock level at or below which a product counts as "low stock".
///
/// ## Business Reason
/// Ten units is the restock trigger for a small warung shelf. Callers can
/// pass their own threshold; this is only the default.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// How many low-stock products the dashboard snapshot carries.
pub const LOW_STOCK_SNAPSHOT_LEN: usize = 5;

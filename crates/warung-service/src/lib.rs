//! # warung-service: Business Rules and the Sale Workflow
//!
//! The orchestration layer of Warung POS, and the crate external callers
//! (an HTTP layer, a CLI) depend on. It knows nothing about routing, status
//! codes, or templates: inputs arrive already deserialized, outputs are
//! plain domain objects or typed errors.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Warung POS Services                              │
//! │                                                                         │
//! │  Caller (HTTP layer / CLI — external collaborator)                      │
//! │       │                                                                 │
//! │  ┌────▼────────────────────────────────────────────────────────────┐    │
//! │  │              warung-service (THIS CRATE)                        │    │
//! │  │                                                                 │    │
//! │  │   ┌──────────────────┐        ┌──────────────────┐              │    │
//! │  │   │  ProductService  │◄───────│   SaleService    │              │    │
//! │  │   │  dup-name guard  │        │  validate+price  │              │    │
//! │  │   │  search, low-stk │        │  then commit     │              │    │
//! │  │   └────────┬─────────┘        └────────┬─────────┘              │    │
//! │  └────────────┼───────────────────────────┼────────────────────────┘    │
//! │               ▼                           ▼                             │
//! │          ProductStore              TransactionStore                     │
//! │           (stok.txt)            (laporan_penjualan.txt)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`product`] - Catalog rules on top of the product store
//! - [`sale`] - The two-phase sale workflow and reports
//! - [`error`] - Service error type callers map to response codes

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod product;
pub mod sale;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ServiceError, ServiceResult};
pub use product::ProductService;
pub use sale::{DailyReport, SaleService};

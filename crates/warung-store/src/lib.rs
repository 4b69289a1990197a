//! # warung-store: Flat-File Persistence for Warung POS
//!
//! This crate owns every read and write of the two data files. It uses
//! pipe-delimited UTF-8 text with a header row, one record per line.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Warung POS Data Flow                             │
//! │                                                                         │
//! │  warung-service (ProductService / SaleService)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    warung-store (THIS CRATE)                    │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌───────────────┐  │    │
//! │  │   │   textfile    │    │  ProductStore  │   │TransactionStore│ │    │
//! │  │   │ lock registry │◄───│ read-modify-   │   │ append-only   │  │    │
//! │  │   │ read/write/   │    │ write cycles   │   │ + date filters│  │    │
//! │  │   │ append        │◄───┼────────────────┴───┴───────────────┘  │    │
//! │  │   └───────────────┘    └─── skip-and-warn on corrupt lines     │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  data/stok.txt              data/laporan_penjualan.txt                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`textfile`] - Per-path lock registry + header-aware file operations
//! - [`product`] - Product repository (full rewrite on every mutation)
//! - [`transaction`] - Sales record repository (append-only)
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use warung_store::{ProductStore, TransactionStore};
//!
//! let products = ProductStore::open("data/stok.txt").await?;
//! let kopi = products.create(&NewProduct {
//!     name: "Kopi".into(),
//!     price: 15000,
//!     stock: 20,
//! }).await?;
//!
//! let sales = TransactionStore::open("data/laporan_penjualan.txt").await?;
//! let summary = sales.daily_summary(None).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod product;
pub mod textfile;
pub mod transaction;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use product::ProductStore;
pub use transaction::TransactionStore;

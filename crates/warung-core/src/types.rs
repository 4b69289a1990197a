//! # Domain Types
//!
//! Core domain types used throughout Warung POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    Product      │   │  Transaction    │   │ TransactionItem │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id (i64)       │   │  id (i64)       │   │  product_id     │        │
//! │  │  name (nama)    │   │  timestamp      │   │  name snapshot  │        │
//! │  │  price (harga)  │   │  items          │   │  qty            │        │
//! │  │  stock (stok)   │   │  total, cashier │   │  subtotal       │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Field Naming
//! The project predates this rewrite and its wire vocabulary is Indonesian
//! (`nama`, `harga`, `stok`, `tanggal`, `kasir`) — both in the .txt headers
//! and in the JSON the HTTP layer serves. Rust fields use English names with
//! `#[serde(rename)]` keeping the external vocabulary intact.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog, one row of `stok.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier (max existing id + 1, starting at 1).
    pub id: i64,

    /// Display name, unique case-insensitively across the catalog.
    #[serde(rename = "nama")]
    pub name: String,

    /// Unit price in whole Rupiah. Always > 0.
    #[serde(rename = "harga")]
    pub price: i64,

    /// Units on hand. Never negative.
    #[serde(rename = "stok")]
    pub stock: i64,

    /// When the product was created. Set once, immutable.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Checks whether the current stock covers a requested quantity.
    #[inline]
    pub fn covers(&self, qty: i64) -> bool {
        self.stock >= qty
    }
}

/// Input for creating a product. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "harga")]
    pub price: i64,
    #[serde(rename = "stok")]
    pub stock: i64,
}

/// Partial update for a product. `None` fields are left untouched.
///
/// ## Why Option per field?
/// The original API accepts any subset of {nama, harga, stok} on update.
/// An explicit optional wrapper per attribute models that without any
/// reflective mechanism.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(rename = "nama", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "harga", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(rename = "stok", default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl ProductPatch {
    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.stock.is_none()
    }
}

// =============================================================================
// Transaction Item
// =============================================================================

/// A line item in a sale.
/// Uses snapshot pattern to freeze the product name at time of sale — the
/// item stays valid even if the product is later renamed or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionItem {
    pub product_id: i64,
    /// Product name at time of sale (frozen).
    #[serde(rename = "nama")]
    pub name: String,
    /// Quantity sold. Always > 0.
    pub qty: i64,
    /// Line total (unit price × qty at time of sale).
    pub subtotal: i64,
}

// =============================================================================
// Transaction
// =============================================================================

/// A recorded sale, one row of `laporan_penjualan.txt`.
/// Append-only: never mutated or deleted once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identifier, numbered independently from products.
    pub id: i64,

    /// When the sale was recorded.
    #[serde(rename = "tanggal")]
    pub timestamp: DateTime<Utc>,

    /// Line items in sale input order. At least one.
    pub items: Vec<TransactionItem>,

    /// Sum of item subtotals, in whole Rupiah.
    pub total: i64,

    /// Cashier who rang the sale up.
    #[serde(rename = "kasir")]
    pub cashier: String,
}

impl Transaction {
    /// Total number of units sold across all line items.
    pub fn items_sold(&self) -> i64 {
        self.items.iter().map(|item| item.qty).sum()
    }

    /// Calendar date of the sale (UTC), used by date-range reports.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

// =============================================================================
// Sale Requests
// =============================================================================

/// One requested line of a sale: which product, how many units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SaleItemRequest {
    pub product_id: i64,
    pub qty: i64,
}

/// A sale as requested by the caller, before validation and pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRequest {
    pub items: Vec<SaleItemRequest>,
    /// Defaults to [`crate::DEFAULT_CASHIER`] when absent.
    #[serde(rename = "kasir", default, skip_serializing_if = "Option::is_none")]
    pub cashier: Option<String>,
}

// =============================================================================
// Reports
// =============================================================================

/// Aggregate figures for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_transactions: usize,
    pub total_revenue: i64,
    pub items_sold: i64,
}

/// A low-stock entry in the dashboard snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockProduct {
    pub id: i64,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "stok")]
    pub stock: i64,
}

impl From<&Product> for LowStockProduct {
    fn from(p: &Product) -> Self {
        LowStockProduct {
            id: p.id,
            name: p.name.clone(),
            stock: p.stock,
        }
    }
}

/// The dashboard aggregate: today's summary plus all-time totals and a
/// low-stock snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub today: DailySummary,
    pub total_products: usize,
    pub total_transactions_all_time: usize,
    pub total_revenue_all_time: i64,
    pub low_stock_count: usize,
    /// At most [`crate::LOW_STOCK_SNAPSHOT_LEN`] entries.
    pub low_stock_products: Vec<LowStockProduct>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_product() -> Product {
        Product {
            id: 1,
            name: "Kopi".to_string(),
            price: 15000,
            stock: 20,
            created_at: Utc.with_ymd_and_hms(2026, 8, 29, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_json_field_names_match_original_api() {
        let json = serde_json::to_value(sample_product()).unwrap();
        assert_eq!(json["nama"], "Kopi");
        assert_eq!(json["harga"], 15000);
        assert_eq!(json["stok"], 20);
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_patch_deserializes_partial_fields() {
        let patch: ProductPatch = serde_json::from_str(r#"{"harga": 17000}"#).unwrap();
        assert_eq!(patch.price, Some(17000));
        assert!(patch.name.is_none());
        assert!(patch.stock.is_none());
        assert!(!patch.is_empty());
        assert!(ProductPatch::default().is_empty());
    }

    #[test]
    fn test_covers() {
        let product = sample_product();
        assert!(product.covers(20));
        assert!(!product.covers(21));
    }

    #[test]
    fn test_items_sold_sums_quantities() {
        let trx = Transaction {
            id: 1,
            timestamp: Utc.with_ymd_and_hms(2026, 8, 29, 10, 0, 0).unwrap(),
            items: vec![
                TransactionItem {
                    product_id: 1,
                    name: "Kopi".to_string(),
                    qty: 2,
                    subtotal: 30000,
                },
                TransactionItem {
                    product_id: 2,
                    name: "Teh".to_string(),
                    qty: 1,
                    subtotal: 10000,
                },
            ],
            total: 40000,
            cashier: "admin".to_string(),
        };
        assert_eq!(trx.items_sold(), 3);
        assert_eq!(trx.date(), NaiveDate::from_ymd_opt(2026, 8, 29).unwrap());
    }
}

//! # Sale Workflow
//!
//! The multi-item sale: validate, price, decrement stock, persist. Plus the
//! date-range reports and the dashboard aggregate built on the sales file.
//!
//! ## Two-Phase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       create_sale(request)                              │
//! │                                                                         │
//! │  Phase 1: VALIDATE & PRICE (no mutation)                                │
//! │    read catalog once                                                    │
//! │    for each (product_id, qty):                                          │
//! │       product exists?        ── no ──► NotFound, nothing touched        │
//! │       stock covers qty?      ── no ──► InsufficientStock, nothing       │
//! │       subtotal = price × qty          touched                           │
//! │       snapshot name into item                                           │
//! │                                                                         │
//! │  Phase 2: COMMIT                                                        │
//! │    for each item: decrement stock (one store call per item)             │
//! │       └── on failure: restore the already-applied decrements,           │
//! │           then surface the error                                        │
//! │    append ONE transaction record with all items and the total           │
//! │                                                                         │
//! │  The product file and the sales file are separately locked; there is    │
//! │  no cross-file transaction. A concurrent sale can race the stock down   │
//! │  between phase 1 and phase 2 — the decrement itself re-checks under     │
//! │  the lock, and the compensation path puts back whatever was applied.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, error};

use crate::error::ServiceResult;
use crate::product::ProductService;
use warung_core::validation::{validate_cashier, validate_quantity};
use warung_core::{
    DailySummary, DashboardStats, LowStockProduct, SaleRequest, Transaction, TransactionItem,
    ValidationError, DEFAULT_CASHIER, LOW_STOCK_SNAPSHOT_LEN,
};
use warung_store::{StoreError, TransactionStore};

/// A day's summary together with the transactions behind it.
#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    #[serde(flatten)]
    pub summary: DailySummary,
    pub transactions: Vec<Transaction>,
}

/// Orchestrates the product catalog and the sales file to execute sales
/// and produce reports.
#[derive(Debug, Clone)]
pub struct SaleService {
    transactions: TransactionStore,
    products: ProductService,
}

impl SaleService {
    /// Creates the workflow over an opened sales store and product service.
    pub fn new(transactions: TransactionStore, products: ProductService) -> Self {
        SaleService {
            transactions,
            products,
        }
    }

    /// The catalog side of the workflow, for callers that hold only this
    /// service.
    pub fn products(&self) -> &ProductService {
        &self.products
    }

    // =========================================================================
    // Sale Creation
    // =========================================================================

    /// Executes a multi-item sale.
    ///
    /// Phase 1 validates and prices every line against one read of the
    /// catalog; nothing is mutated until all lines pass. Phase 2 decrements
    /// stock per item and appends a single transaction record. If a
    /// decrement or the final append fails partway, already-applied
    /// decrements are restored before the error is returned.
    pub async fn create_sale(&self, request: SaleRequest) -> ServiceResult<Transaction> {
        if request.items.is_empty() {
            return Err(ValidationError::Required { field: "items" }.into());
        }

        let cashier = match &request.cashier {
            Some(name) => {
                validate_cashier(name)?;
                name.trim().to_string()
            }
            None => DEFAULT_CASHIER.to_string(),
        };

        // Phase 1: validate & price from a single consistent catalog read.
        let catalog = self.products.store().list_all().await?;
        let mut items = Vec::with_capacity(request.items.len());
        let mut total: i64 = 0;

        for line in &request.items {
            validate_quantity(line.qty)?;

            let product = catalog
                .iter()
                .find(|p| p.id == line.product_id)
                .ok_or_else(|| StoreError::not_found("Product", line.product_id))?;

            if !product.covers(line.qty) {
                return Err(StoreError::insufficient_stock(
                    product.name.clone(),
                    product.stock,
                    line.qty,
                )
                .into());
            }

            let subtotal = product.price * line.qty;
            total += subtotal;
            items.push(TransactionItem {
                product_id: product.id,
                name: product.name.clone(),
                qty: line.qty,
                subtotal,
            });
        }

        debug!(lines = items.len(), total, cashier = %cashier, "sale validated");

        // Phase 2: decrement stock per item, then append the record.
        let mut applied: Vec<&TransactionItem> = Vec::new();
        for item in &items {
            if let Err(err) = self
                .products
                .store()
                .adjust_stock(item.product_id, -item.qty)
                .await
            {
                self.restore_stock(&applied).await;
                return Err(err.into());
            }
            applied.push(item);
        }

        match self.transactions.create(items.clone(), total, &cashier).await {
            Ok(transaction) => Ok(transaction),
            Err(err) => {
                self.restore_stock(&applied).await;
                Err(err.into())
            }
        }
    }

    /// Best-effort compensation: puts back stock for decrements that already
    /// committed before a later step failed.
    async fn restore_stock(&self, applied: &[&TransactionItem]) {
        for item in applied.iter().rev() {
            if let Err(err) = self
                .products
                .store()
                .adjust_stock(item.product_id, item.qty)
                .await
            {
                // The sale already failed; all we can do is report the
                // inconsistent stock level.
                error!(
                    product_id = item.product_id,
                    qty = item.qty,
                    %err,
                    "failed to restore stock after aborted sale"
                );
            }
        }
    }

    // =========================================================================
    // Queries & Reports
    // =========================================================================

    /// A single transaction, or a not-found outcome.
    pub async fn get_sale(&self, id: i64) -> ServiceResult<Transaction> {
        self.transactions
            .find_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found("Transaction", id).into())
    }

    /// All transactions, newest first.
    pub async fn list_sales(&self) -> ServiceResult<Vec<Transaction>> {
        let mut sales = self.transactions.list_all().await?;
        sales.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(sales)
    }

    /// Today's transactions.
    pub async fn today_sales(&self) -> ServiceResult<Vec<Transaction>> {
        Ok(self.transactions.today().await?)
    }

    /// Transactions in an inclusive date range, newest first. Either bound
    /// may be omitted.
    pub async fn sales_between(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> ServiceResult<Vec<Transaction>> {
        let mut sales = self.transactions.by_date_range(start, end).await?;
        sales.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(sales)
    }

    /// One day's summary plus the transactions behind it. Defaults to today.
    pub async fn daily_report(&self, date: Option<NaiveDate>) -> ServiceResult<DailyReport> {
        let summary = self.transactions.daily_summary(date).await?;
        let transactions = self
            .transactions
            .by_date_range(Some(summary.date), Some(summary.date))
            .await?;

        Ok(DailyReport {
            summary,
            transactions,
        })
    }

    /// The dashboard aggregate: today's summary, all-time totals, and a
    /// low-stock snapshot (top entries only).
    pub async fn dashboard_stats(&self) -> ServiceResult<DashboardStats> {
        let today = self.transactions.daily_summary(None).await?;
        let all_sales = self.transactions.list_all().await?;
        let all_products = self.products.list_products().await?;
        let low_stock = self.products.low_stock_products(None).await?;

        Ok(DashboardStats {
            today,
            total_products: all_products.len(),
            total_transactions_all_time: all_sales.len(),
            total_revenue_all_time: all_sales.iter().map(|t| t.total).sum(),
            low_stock_count: low_stock.len(),
            low_stock_products: low_stock
                .iter()
                .take(LOW_STOCK_SNAPSHOT_LEN)
                .map(LowStockProduct::from)
                .collect(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

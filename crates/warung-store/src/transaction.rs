//! # Transaction Store
//!
//! Repository for the sales record file (`laporan_penjualan.txt`).
//!
//! ## Write Strategy
//! Transactions are never edited in place, so `create` appends one line
//! instead of rewriting the file. Reads are still full scans — the file is
//! the sole source of truth, nothing is cached across calls.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, SubsecRound, Utc};
use tracing::debug;

use crate::error::StoreResult;
use crate::textfile;
use warung_core::codec::LineRecord;
use warung_core::{DailySummary, Transaction, TransactionItem};

/// Repository for sales records. Append-only: once written, a transaction
/// is never mutated or deleted.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    path: PathBuf,
}

impl TransactionStore {
    /// Opens the store, creating the file with its header row if missing.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        textfile::ensure_exists(&path, Transaction::HEADER).await?;
        Ok(TransactionStore { path })
    }

    /// The data file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lists every valid transaction, in file order.
    pub async fn list_all(&self) -> StoreResult<Vec<Transaction>> {
        textfile::read_records(&self.path).await
    }

    /// Finds a transaction by id. Linear scan of [`Self::list_all`].
    pub async fn find_by_id(&self, id: i64) -> StoreResult<Option<Transaction>> {
        Ok(self.list_all().await?.into_iter().find(|t| t.id == id))
    }

    /// Records a sale: allocates the next id (max existing + 1), stamps the
    /// current time, and appends one line. The id scan and the append run
    /// under the same hold of the path lock.
    pub async fn create(
        &self,
        items: Vec<TransactionItem>,
        total: i64,
        cashier: &str,
    ) -> StoreResult<Transaction> {
        let _guard = textfile::lock_path(&self.path).await;
        let existing: Vec<Transaction> = textfile::read_records_unlocked(&self.path).await?;

        let transaction = Transaction {
            id: textfile::next_id(&existing),
            timestamp: Utc::now().trunc_subsecs(6),
            items,
            total,
            cashier: cashier.trim().to_string(),
        };

        debug!(
            id = transaction.id,
            total = transaction.total,
            items = transaction.items.len(),
            "recording transaction"
        );

        textfile::append_line_unlocked(&self.path, &transaction.to_line()).await?;
        Ok(transaction)
    }

    /// Transactions whose date component falls inside the inclusive range.
    ///
    /// Either bound may be omitted to mean unbounded on that side; omitting
    /// both returns everything.
    pub async fn by_date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> StoreResult<Vec<Transaction>> {
        let transactions = self.list_all().await?;

        if start.is_none() && end.is_none() {
            return Ok(transactions);
        }

        Ok(transactions
            .into_iter()
            .filter(|trx| {
                let date = trx.date();
                start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
            })
            .collect())
    }

    /// Today's transactions (UTC date).
    pub async fn today(&self) -> StoreResult<Vec<Transaction>> {
        let today = Utc::now().date_naive();
        self.by_date_range(Some(today), Some(today)).await
    }

    /// Aggregates one day's sales: transaction count, revenue sum, and
    /// total units sold. Defaults to the current date.
    pub async fn daily_summary(&self, date: Option<NaiveDate>) -> StoreResult<DailySummary> {
        let date = date.unwrap_or_else(|| Utc::now().date_naive());
        let transactions = self.by_date_range(Some(date), Some(date)).await?;

        Ok(DailySummary {
            date,
            total_transactions: transactions.len(),
            total_revenue: transactions.iter().map(|t| t.total).sum(),
            items_sold: transactions.iter().map(Transaction::items_sold).sum(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn store() -> (TempDir, TransactionStore) {
        let dir = TempDir::new().unwrap();
        let store = TransactionStore::open(dir.path().join("laporan_penjualan.txt"))
            .await
            .unwrap();
        (dir, store)
    }

    fn item(product_id: i64, name: &str, qty: i64, subtotal: i64) -> TransactionItem {
        TransactionItem {
            product_id,
            name: name.to_string(),
            qty,
            subtotal,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let (_dir, store) = store().await;
        let first = store
            .create(vec![item(1, "Kopi", 1, 15000)], 15000, "admin")
            .await
            .unwrap();
        let second = store
            .create(vec![item(2, "Teh", 2, 20000)], 20000, "budi")
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.cashier, "budi");
    }

    #[tokio::test]
    async fn test_create_appends_and_round_trips() {
        let (_dir, store) = store().await;
        let created = store
            .create(
                vec![item(1, "Kopi", 2, 30000), item(2, "Teh", 1, 10000)],
                40000,
                "admin",
            )
            .await
            .unwrap();

        let read_back = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(read_back, created);
        assert_eq!(read_back.items.len(), 2);
        assert_eq!(read_back.items_sold(), 3);
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let (_dir, store) = store().await;
        assert!(store.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_date_range_bounds_are_inclusive() {
        let (_dir, store) = store().await;
        store
            .create(vec![item(1, "Kopi", 1, 15000)], 15000, "admin")
            .await
            .unwrap();

        let today = Utc::now().date_naive();
        let tomorrow = today.succ_opt().unwrap();
        let yesterday = today.pred_opt().unwrap();

        assert_eq!(
            store
                .by_date_range(Some(today), Some(today))
                .await
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            store
                .by_date_range(Some(tomorrow), None)
                .await
                .unwrap()
                .len(),
            0
        );
        assert_eq!(
            store
                .by_date_range(None, Some(yesterday))
                .await
                .unwrap()
                .len(),
            0
        );
        // Both bounds omitted returns everything.
        assert_eq!(store.by_date_range(None, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_daily_summary_aggregates_one_day() {
        let (_dir, store) = store().await;
        store
            .create(
                vec![item(1, "Kopi", 2, 30000), item(2, "Teh", 1, 10000)],
                40000,
                "admin",
            )
            .await
            .unwrap();
        store
            .create(vec![item(1, "Kopi", 1, 15000)], 15000, "admin")
            .await
            .unwrap();

        let summary = store.daily_summary(None).await.unwrap();
        assert_eq!(summary.total_transactions, 2);
        assert_eq!(summary.total_revenue, 55000);
        assert_eq!(summary.items_sold, 4);
    }

    #[tokio::test]
    async fn test_daily_summary_for_empty_day_is_zero() {
        let (_dir, store) = store().await;
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let summary = store.daily_summary(Some(date)).await.unwrap();
        assert_eq!(
            summary,
            DailySummary {
                date,
                total_transactions: 0,
                total_revenue: 0,
                items_sold: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_corrupt_line_is_skipped_not_fatal() {
        let (_dir, store) = store().await;
        store
            .create(vec![item(1, "Kopi", 1, 15000)], 15000, "admin")
            .await
            .unwrap();
        textfile::append_line(store.path(), "not|a|transaction")
            .await
            .unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
    }
}

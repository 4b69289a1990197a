//! # Product Store
//!
//! Repository for the product catalog file (`stok.txt`).
//!
//! ## Write Strategy
//! Every mutation is a full read-modify-write cycle under the path lock:
//! parse all rows, change the in-memory list, rewrite the whole file. O(n)
//! per write, which is fine at warung scale — a known scalability ceiling,
//! not a place to silently change the on-disk format.

use std::path::{Path, PathBuf};

use chrono::{SubsecRound, Utc};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::textfile;
use warung_core::codec::LineRecord;
use warung_core::{NewProduct, Product, ProductPatch};

/// Repository for product operations on the catalog file.
///
/// The file is the sole source of truth: every call re-reads it from disk,
/// nothing is cached across calls.
///
/// ## Usage
/// ```rust,ignore
/// let store = ProductStore::open("data/stok.txt").await?;
/// let kopi = store.create(&NewProduct { name: "Kopi".into(), price: 15000, stock: 20 }).await?;
/// store.adjust_stock(kopi.id, -2).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductStore {
    path: PathBuf,
}

impl ProductStore {
    /// Opens the store, creating the file with its header row if missing.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        textfile::ensure_exists(&path, Product::HEADER).await?;
        Ok(ProductStore { path })
    }

    /// The data file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lists every valid product, in file order.
    ///
    /// Callers sort downstream; corrupt lines are skipped with a warning.
    pub async fn list_all(&self) -> StoreResult<Vec<Product>> {
        textfile::read_records(&self.path).await
    }

    /// Finds a product by id. Linear scan of [`Self::list_all`].
    pub async fn find_by_id(&self, id: i64) -> StoreResult<Option<Product>> {
        Ok(self.list_all().await?.into_iter().find(|p| p.id == id))
    }

    /// Creates a product with a store-assigned id (max existing + 1) and a
    /// creation timestamp, then rewrites the file.
    ///
    /// No duplicate-name check happens here — that is a service concern.
    pub async fn create(&self, new: &NewProduct) -> StoreResult<Product> {
        let _guard = textfile::lock_path(&self.path).await;
        let mut products: Vec<Product> = textfile::read_records_unlocked(&self.path).await?;

        let product = Product {
            id: textfile::next_id(&products),
            name: new.name.trim().to_string(),
            price: new.price,
            stock: new.stock,
            // Truncated to the codec's resolution so reads return exactly
            // what was written.
            created_at: Utc::now().trunc_subsecs(6),
        };

        debug!(id = product.id, name = %product.name, "creating product");

        products.push(product.clone());
        textfile::write_records_unlocked(&self.path, &products).await?;
        Ok(product)
    }

    /// Applies a partial update: each present field overwrites the existing
    /// value, absent fields are left untouched. `created_at` never changes.
    pub async fn update(&self, id: i64, patch: &ProductPatch) -> StoreResult<Product> {
        let _guard = textfile::lock_path(&self.path).await;
        let mut products: Vec<Product> = textfile::read_records_unlocked(&self.path).await?;

        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        if let Some(name) = &patch.name {
            product.name = name.trim().to_string();
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        let updated = product.clone();

        debug!(id, "updating product");
        textfile::write_records_unlocked(&self.path, &products).await?;
        Ok(updated)
    }

    /// Deletes a product by id. Rewrites only when something was removed.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let _guard = textfile::lock_path(&self.path).await;
        let mut products: Vec<Product> = textfile::read_records_unlocked(&self.path).await?;

        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(StoreError::not_found("Product", id));
        }

        debug!(id, "deleting product");
        textfile::write_records_unlocked(&self.path, &products).await
    }

    /// Adjusts stock by a signed delta (negative for sales, positive for
    /// restocking). The whole cycle runs under the path lock, so a
    /// concurrent adjustment always reads the latest level.
    ///
    /// Fails with [`StoreError::InsufficientStock`] when the result would go
    /// negative; the file is left unmodified in that case.
    pub async fn adjust_stock(&self, id: i64, delta: i64) -> StoreResult<Product> {
        let _guard = textfile::lock_path(&self.path).await;
        let mut products: Vec<Product> = textfile::read_records_unlocked(&self.path).await?;

        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        let new_stock = product.stock + delta;
        if new_stock < 0 {
            return Err(StoreError::insufficient_stock(
                product.name.clone(),
                product.stock,
                -delta,
            ));
        }

        product.stock = new_stock;
        let updated = product.clone();

        debug!(id, delta, new_stock, "adjusting stock");
        textfile::write_records_unlocked(&self.path, &products).await?;
        Ok(updated)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn store() -> (TempDir, ProductStore) {
        let dir = TempDir::new().unwrap();
        let store = ProductStore::open(dir.path().join("stok.txt"))
            .await
            .unwrap();
        (dir, store)
    }

    fn new_product(name: &str, price: i64, stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price,
            stock,
        }
    }

    #[tokio::test]
    async fn test_create_on_empty_file_assigns_id_one() {
        let (_dir, store) = store().await;
        let kopi = store.create(&new_product("Kopi", 15000, 20)).await.unwrap();

        assert_eq!(kopi.id, 1);
        assert_eq!(kopi.name, "Kopi");
        assert_eq!(kopi.price, 15000);
        assert_eq!(kopi.stock, 20);
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let (_dir, store) = store().await;
        for (i, name) in ["Kopi", "Teh", "Gula"].iter().enumerate() {
            let p = store.create(&new_product(name, 1000, 1)).await.unwrap();
            assert_eq!(p.id, i as i64 + 1);
        }
    }

    #[tokio::test]
    async fn test_delete_then_create_does_not_reuse_live_max() {
        let (_dir, store) = store().await;
        store.create(&new_product("Kopi", 1000, 1)).await.unwrap(); // id 1
        store.create(&new_product("Teh", 1000, 1)).await.unwrap(); // id 2
        store.create(&new_product("Gula", 1000, 1)).await.unwrap(); // id 3

        store.delete(1).await.unwrap();
        let next = store.create(&new_product("Susu", 8000, 6)).await.unwrap();
        // Allocation scans live rows: max(2, 3) + 1.
        assert_eq!(next.id, 4);
    }

    #[tokio::test]
    async fn test_list_all_is_idempotent_without_writes() {
        let (_dir, store) = store().await;
        store.create(&new_product("Kopi", 15000, 20)).await.unwrap();
        store.create(&new_product("Teh", 10000, 5)).await.unwrap();

        let first = store.list_all().await.unwrap();
        let second = store.list_all().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_round_trip_preserves_created_at() {
        let (_dir, store) = store().await;
        let created = store.create(&new_product("Kopi", 15000, 20)).await.unwrap();
        let read_back = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(read_back, created);
    }

    #[tokio::test]
    async fn test_update_overwrites_only_present_fields() {
        let (_dir, store) = store().await;
        let kopi = store.create(&new_product("Kopi", 15000, 20)).await.unwrap();

        let updated = store
            .update(
                kopi.id,
                &ProductPatch {
                    price: Some(17000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Kopi");
        assert_eq!(updated.price, 17000);
        assert_eq!(updated.stock, 20);
        assert_eq!(updated.created_at, kopi.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let (_dir, store) = store().await;
        let err = store
            .update(99, &ProductPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_not_found() {
        let (_dir, store) = store().await;
        assert!(store.delete(99).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_adjust_stock_below_zero_fails_and_leaves_stock() {
        let (_dir, store) = store().await;
        let p = store.create(&new_product("Kopi", 15000, 5)).await.unwrap();

        let err = store.adjust_stock(p.id, -6).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientStock {
                available: 5,
                requested: 6,
                ..
            }
        ));

        let unchanged = store.find_by_id(p.id).await.unwrap().unwrap();
        assert_eq!(unchanged.stock, 5);
    }

    #[tokio::test]
    async fn test_adjust_stock_to_exactly_zero_is_allowed() {
        let (_dir, store) = store().await;
        let p = store.create(&new_product("Kopi", 15000, 5)).await.unwrap();
        let updated = store.adjust_stock(p.id, -5).await.unwrap();
        assert_eq!(updated.stock, 0);
    }

    #[tokio::test]
    async fn test_corrupt_line_is_skipped_not_fatal() {
        let (_dir, store) = store().await;
        store.create(&new_product("Kopi", 15000, 20)).await.unwrap();
        textfile::append_line(store.path(), "garbage|row")
            .await
            .unwrap();
        store.create(&new_product("Teh", 10000, 5)).await.unwrap();

        let products = store.list_all().await.unwrap();
        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.id == 1 || p.id == 2));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adjustments_lose_no_updates() {
        let (_dir, store) = store().await;
        let p = store
            .create(&new_product("Kopi", 15000, 100))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = store.clone();
            let id = p.id;
            handles.push(tokio::spawn(async move {
                store.adjust_stock(id, -1).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let after = store.find_by_id(p.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 80);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_stock_never_observably_negative_under_contention() {
        let (_dir, store) = store().await;
        let p = store.create(&new_product("Kopi", 15000, 10)).await.unwrap();

        // 20 workers each try to take 1 unit; exactly 10 can succeed.
        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = store.clone();
            let id = p.id;
            handles.push(tokio::spawn(
                async move { store.adjust_stock(id, -1).await },
            ));
        }

        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }

        assert_eq!(ok, 10);
        let after = store.find_by_id(p.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 0);
    }
}

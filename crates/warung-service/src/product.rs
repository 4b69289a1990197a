//! # Product Service
//!
//! Catalog business rules on top of [`ProductStore`]: validation and the
//! case-insensitive duplicate-name guard run here, before any file is
//! touched; the store itself stays rule-free.

use tracing::debug;

use crate::error::{ServiceError, ServiceResult};
use warung_core::validation::{
    validate_price, validate_product_name, validate_quantity, validate_stock,
};
use warung_core::{NewProduct, Product, ProductPatch, ValidationError, DEFAULT_LOW_STOCK_THRESHOLD};
use warung_store::{ProductStore, StoreError};

/// Catalog operations with business rules applied.
#[derive(Debug, Clone)]
pub struct ProductService {
    store: ProductStore,
}

impl ProductService {
    /// Creates a service over an opened product store.
    pub fn new(store: ProductStore) -> Self {
        ProductService { store }
    }

    /// The underlying store, for collaborators that need raw operations
    /// (the sale workflow's stock decrements go through here).
    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    /// All products, sorted by name (case-insensitive).
    pub async fn list_products(&self) -> ServiceResult<Vec<Product>> {
        let mut products = self.store.list_all().await?;
        products.sort_by_key(|p| p.name.to_lowercase());
        Ok(products)
    }

    /// A single product, or a not-found outcome.
    pub async fn get_product(&self, id: i64) -> ServiceResult<Product> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found("Product", id).into())
    }

    /// Creates a product after validating fields and checking the
    /// case-insensitive name uniqueness rule. Nothing is written when a
    /// check fails.
    pub async fn create_product(&self, new: NewProduct) -> ServiceResult<Product> {
        validate_product_name(&new.name)?;
        validate_price(new.price)?;
        validate_stock(new.stock)?;
        self.ensure_name_free(&new.name, None).await?;

        Ok(self.store.create(&new).await?)
    }

    /// Applies a partial update. A rename re-runs the duplicate check,
    /// excluding the product itself.
    pub async fn update_product(&self, id: i64, patch: ProductPatch) -> ServiceResult<Product> {
        if let Some(name) = &patch.name {
            validate_product_name(name)?;
            self.ensure_name_free(name, Some(id)).await?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }
        if let Some(stock) = patch.stock {
            validate_stock(stock)?;
        }

        Ok(self.store.update(id, &patch).await?)
    }

    /// Deletes a product by id.
    pub async fn delete_product(&self, id: i64) -> ServiceResult<()> {
        Ok(self.store.delete(id).await?)
    }

    /// Adds stock after a restock delivery.
    pub async fn add_stock(&self, id: i64, qty: i64) -> ServiceResult<Product> {
        validate_quantity(qty)?;
        Ok(self.store.adjust_stock(id, qty).await?)
    }

    /// Removes stock, e.g. after a sale. Fails with InsufficientStock when
    /// the level would go negative.
    pub async fn reduce_stock(&self, id: i64, qty: i64) -> ServiceResult<Product> {
        validate_quantity(qty)?;
        Ok(self.store.adjust_stock(id, -qty).await?)
    }

    /// Case-insensitive substring search on product names.
    pub async fn search_products(&self, keyword: &str) -> ServiceResult<Vec<Product>> {
        let needle = keyword.trim().to_lowercase();
        let products = self.store.list_all().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Products at or below a stock threshold. `None` uses the default
    /// restock trigger.
    pub async fn low_stock_products(&self, threshold: Option<i64>) -> ServiceResult<Vec<Product>> {
        let threshold = threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
        let products = self.store.list_all().await?;
        Ok(products.into_iter().filter(|p| p.stock <= threshold).collect())
    }

    /// Fails with a Duplicate validation error when another product already
    /// carries this name (case-insensitive). `exclude_id` skips the product
    /// being renamed.
    async fn ensure_name_free(&self, name: &str, exclude_id: Option<i64>) -> ServiceResult<()> {
        let wanted = name.trim().to_lowercase();
        let products = self.store.list_all().await?;

        let taken = products
            .iter()
            .any(|p| Some(p.id) != exclude_id && p.name.to_lowercase() == wanted);

        if taken {
            debug!(name, "rejecting duplicate product name");
            return Err(ServiceError::Validation(ValidationError::Duplicate {
                field: "nama",
                value: name.trim().to_string(),
            }));
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

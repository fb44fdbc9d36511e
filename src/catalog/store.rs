//! Catalog Store
//!
//! Authoritative in-memory holder of every product. The primary map and the
//! per-merchant index live behind one `RwLock` so that no reader can observe
//! one of them updated without the other.

use super::models::{MerchantId, Product, Sku};
use crate::error::CatalogError;
use parking_lot::RwLock;
use std::collections::HashMap;
use thiserror::Error;

/// The only failure the store itself reports.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("product {0} not found")]
    NotFound(Sku),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(sku) => CatalogError::NotFound(sku),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Default)]
struct Catalog {
    products: HashMap<Sku, Product>,
    /// SKUs per merchant, in insertion order.
    by_merchant: HashMap<MerchantId, Vec<Sku>>,
}

impl Catalog {
    fn upsert(&mut self, product: Product) {
        let sku = product.sku;
        let merchant = product.merchant_id;

        match self.products.insert(sku, product) {
            Some(previous) if previous.merchant_id == merchant => {}
            Some(previous) => {
                self.unindex(&previous.merchant_id, &sku);
                self.by_merchant.entry(merchant).or_default().push(sku);
            }
            None => self.by_merchant.entry(merchant).or_default().push(sku),
        }
    }

    fn take(&mut self, sku: &Sku) -> Option<Product> {
        let product = self.products.remove(sku)?;
        self.unindex(&product.merchant_id, sku);
        Some(product)
    }

    fn unindex(&mut self, merchant: &MerchantId, sku: &Sku) {
        if let Some(skus) = self.by_merchant.get_mut(merchant) {
            if let Some(pos) = skus.iter().position(|s| s == sku) {
                skus.remove(pos);
            }
            if skus.is_empty() {
                self.by_merchant.remove(merchant);
            }
        }
    }
}

/// Thread-safe product store keyed by SKU with a secondary merchant index.
#[derive(Debug, Default)]
pub struct CatalogStore {
    inner: RwLock<Catalog>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the entry for `product.sku`.
    ///
    /// Overwriting under a different merchant moves the SKU to the end of the
    /// new merchant's index list.
    pub fn put(&self, product: Product) {
        self.inner.write().upsert(product);
    }

    pub fn get(&self, sku: &Sku) -> StoreResult<Product> {
        self.inner
            .read()
            .products
            .get(sku)
            .cloned()
            .ok_or(StoreError::NotFound(*sku))
    }

    /// Products indexed under `merchant`, in insertion order.
    pub fn list_by_merchant(&self, merchant: &MerchantId) -> Vec<Product> {
        let catalog = self.inner.read();
        catalog
            .by_merchant
            .get(merchant)
            .map(|skus| {
                skus.iter()
                    .filter_map(|sku| catalog.products.get(sku).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Removes `sku` from both the primary map and its merchant's index.
    pub fn remove(&self, sku: &Sku) -> StoreResult<Product> {
        self.inner
            .write()
            .take(sku)
            .ok_or(StoreError::NotFound(*sku))
    }

    /// Inserts `product` only if its SKU is not present yet.
    ///
    /// Returns `false` and leaves the store untouched when the SKU is taken.
    pub fn insert_new(&self, product: Product) -> bool {
        let mut catalog = self.inner.write();
        if catalog.products.contains_key(&product.sku) {
            return false;
        }
        catalog.upsert(product);
        true
    }

    /// Replaces the entry for `sku` with the product derived by `f`, holding the
    /// write lock for the whole read-modify-write.
    pub fn update_with<F, E>(&self, sku: &Sku, f: F) -> Result<Product, E>
    where
        F: FnOnce(&Product) -> Result<Product, E>,
        E: From<StoreError>,
    {
        let mut catalog = self.inner.write();
        let current = catalog
            .products
            .get(sku)
            .ok_or(StoreError::NotFound(*sku))?;
        let next = f(current)?;

        if next.sku != *sku {
            catalog.take(sku);
        }
        catalog.upsert(next.clone());
        Ok(next)
    }

    /// Removes `sku` only if `check` accepts the stored entry.
    pub fn remove_if<F, E>(&self, sku: &Sku, check: F) -> Result<Product, E>
    where
        F: FnOnce(&Product) -> Result<(), E>,
        E: From<StoreError>,
    {
        let mut catalog = self.inner.write();
        let current = catalog
            .products
            .get(sku)
            .ok_or(StoreError::NotFound(*sku))?;
        check(current)?;

        Ok(catalog.take(sku).ok_or(StoreError::NotFound(*sku))?)
    }

    pub fn len(&self) -> usize {
        self.inner.read().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().products.is_empty()
    }
}

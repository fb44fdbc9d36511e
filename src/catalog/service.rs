//! Catalog Service
//!
//! Business rules layered over [`CatalogStore`]: SKU uniqueness on create,
//! existence and ownership checks on update/delete, partial-update merging.

use super::{
    helpers::{format_listing_summary, merge_patch, require_text, validate_price},
    models::{MerchantId, Product, ProductPatch, Sku},
    store::CatalogStore,
};
use crate::error::{CatalogError, CatalogResult};
use chrono::Utc;
use std::{str::FromStr, sync::Arc};

/// Whether mutations must come from the merchant owning the product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MerchantScope {
    #[default]
    Enforced,
    Disabled,
}

impl FromStr for MerchantScope {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enforced" | "on" | "true" => Ok(Self::Enforced),
            "disabled" | "off" | "false" => Ok(Self::Disabled),
            other => Err(CatalogError::config(format!(
                "unknown merchant scope '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogService {
    store: Arc<CatalogStore>,
    scope: MerchantScope,
}

impl CatalogService {
    pub fn new(store: Arc<CatalogStore>, scope: MerchantScope) -> Self {
        Self { store, scope }
    }

    pub fn scope(&self) -> MerchantScope {
        self.scope
    }

    pub fn create_product(
        &self,
        merchant_id: MerchantId,
        sku: Sku,
        name: &str,
        description: &str,
        price: i64,
    ) -> CatalogResult<Product> {
        require_text(name, "name")?;
        require_text(description, "description")?;
        let price = validate_price(price)?;

        let now = Utc::now();
        let product = Product {
            sku,
            merchant_id,
            name: name.to_string(),
            description: description.to_string(),
            price,
            created_at: now,
            updated_at: now,
        };

        if !self.store.insert_new(product.clone()) {
            return Err(CatalogError::AlreadyExists(sku));
        }

        tracing::info!(sku = %sku, merchant = %merchant_id, "Product created");
        Ok(product)
    }

    /// Merges `patch` into the stored product. See [`merge_patch`] for the
    /// field rules.
    pub fn update_product(
        &self,
        merchant_id: MerchantId,
        sku: Sku,
        patch: ProductPatch,
    ) -> CatalogResult<Product> {
        let updated = self.store.update_with(&sku, |current| {
            self.authorize(merchant_id, current)?;
            merge_patch(current, &patch, Utc::now())
        })?;

        tracing::info!(sku = %sku, merchant = %merchant_id, "Product updated");
        Ok(updated)
    }

    pub fn delete_product(&self, merchant_id: MerchantId, sku: Sku) -> CatalogResult<()> {
        self.store
            .remove_if(&sku, |current| self.authorize(merchant_id, current))?;

        tracing::info!(sku = %sku, merchant = %merchant_id, "Product deleted");
        Ok(())
    }

    pub fn get_product(&self, sku: Sku) -> CatalogResult<Product> {
        Ok(self.store.get(&sku)?)
    }

    pub fn list_by_merchant(&self, merchant_id: MerchantId) -> Vec<Product> {
        let products = self.store.list_by_merchant(&merchant_id);
        tracing::debug!("Listing {}", format_listing_summary(&products));
        products
    }

    fn authorize(&self, caller: MerchantId, product: &Product) -> CatalogResult<()> {
        if self.scope == MerchantScope::Enforced && product.merchant_id != caller {
            return Err(CatalogError::NotAuthorized);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Barrier;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(CatalogStore::new()), MerchantScope::Enforced)
    }

    fn create(svc: &CatalogService, merchant: MerchantId, name: &str, price: i64) -> Product {
        svc.create_product(merchant, Sku::generate(), name, "a description", price)
            .unwrap()
    }

    #[test]
    fn create_then_get_round_trips() {
        let svc = service();
        let merchant = MerchantId::generate();
        let sku = Sku::generate();

        let created = svc
            .create_product(merchant, sku, "Lamp", "Desk lamp", 2599)
            .unwrap();
        assert_eq!(created.created_at, created.updated_at);

        let fetched = svc.get_product(sku).unwrap();
        assert_eq!(fetched.name, "Lamp");
        assert_eq!(fetched.description, "Desk lamp");
        assert_eq!(fetched.price, 2599);
        assert_eq!(fetched.merchant_id, merchant);
    }

    #[test]
    fn duplicate_sku_is_rejected() {
        let svc = service();
        let sku = Sku::generate();
        svc.create_product(MerchantId::generate(), sku, "a", "b", 1)
            .unwrap();

        let err = svc
            .create_product(MerchantId::generate(), sku, "c", "d", 2)
            .unwrap_err();
        assert_eq!(err, CatalogError::AlreadyExists(sku));
        assert_eq!(svc.get_product(sku).unwrap().name, "a");
    }

    #[test]
    fn create_validates_fields() {
        let svc = service();
        let merchant = MerchantId::generate();

        let cases = [
            ("", "desc", 1, "name required"),
            ("name", "  ", 1, "description required"),
            ("name", "desc", -5, "price cannot be less than zero"),
        ];
        for (name, description, price, message) in cases {
            let err = svc
                .create_product(merchant, Sku::generate(), name, description, price)
                .unwrap_err();
            assert_eq!(err, CatalogError::invalid_input(message));
        }
        assert!(svc.list_by_merchant(merchant).is_empty());
    }

    #[test]
    fn partial_update_keeps_unsupplied_fields() {
        let svc = service();
        let merchant = MerchantId::generate();
        let created = create(&svc, merchant, "A", 100);

        let patch = ProductPatch {
            name: Some(String::new()),
            description: None,
            price: Some(150),
        };
        let updated = svc.update_product(merchant, created.sku, patch).unwrap();

        assert_eq!(updated.name, "A");
        assert_eq!(updated.price, 150);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= updated.created_at);
        assert_eq!(svc.get_product(created.sku).unwrap(), updated);
    }

    #[test]
    fn update_unknown_sku_is_not_found() {
        let svc = service();
        let sku = Sku::generate();
        let err = svc
            .update_product(MerchantId::generate(), sku, ProductPatch::default())
            .unwrap_err();
        assert_eq!(err, CatalogError::NotFound(sku));
    }

    #[test]
    fn update_by_other_merchant_is_refused_when_scoped() {
        let svc = service();
        let owner = MerchantId::generate();
        let created = create(&svc, owner, "Owned", 10);

        let patch = ProductPatch {
            name: Some("Hijacked".into()),
            ..ProductPatch::default()
        };
        let err = svc
            .update_product(MerchantId::generate(), created.sku, patch)
            .unwrap_err();
        assert_eq!(err, CatalogError::NotAuthorized);
        assert_eq!(svc.get_product(created.sku).unwrap().name, "Owned");
    }

    #[test]
    fn update_never_moves_product_between_merchants() {
        let svc = CatalogService::new(Arc::new(CatalogStore::new()), MerchantScope::Disabled);
        let owner = MerchantId::generate();
        let other = MerchantId::generate();
        let created = create(&svc, owner, "Owned", 10);

        let updated = svc
            .update_product(other, created.sku, ProductPatch::default())
            .unwrap();
        assert_eq!(updated.merchant_id, owner);
        assert!(svc.list_by_merchant(other).is_empty());
    }

    #[test]
    fn second_delete_is_not_found() {
        let svc = service();
        let merchant = MerchantId::generate();
        let created = create(&svc, merchant, "Once", 1);

        svc.delete_product(merchant, created.sku).unwrap();
        assert_eq!(
            svc.delete_product(merchant, created.sku),
            Err(CatalogError::NotFound(created.sku))
        );
    }

    #[test]
    fn delete_removes_from_lookup_and_listing() {
        let svc = service();
        let merchant = MerchantId::generate();
        let kept = create(&svc, merchant, "Kept", 1);
        let gone = create(&svc, merchant, "Gone", 1);

        svc.delete_product(merchant, gone.sku).unwrap();

        assert_eq!(
            svc.get_product(gone.sku),
            Err(CatalogError::NotFound(gone.sku))
        );
        let listed = svc.list_by_merchant(merchant);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].sku, kept.sku);
    }

    #[test]
    fn delete_respects_merchant_scope() {
        let scoped = service();
        let owner = MerchantId::generate();
        let created = create(&scoped, owner, "Mine", 1);
        assert_eq!(
            scoped.delete_product(MerchantId::generate(), created.sku),
            Err(CatalogError::NotAuthorized)
        );
        assert!(scoped.get_product(created.sku).is_ok());

        let open = CatalogService::new(Arc::new(CatalogStore::new()), MerchantScope::Disabled);
        let created = create(&open, owner, "Anyone", 1);
        open.delete_product(MerchantId::generate(), created.sku)
            .unwrap();
        assert!(open.get_product(created.sku).is_err());
    }

    #[test]
    fn listing_isolates_merchants() {
        let svc = service();
        let x = MerchantId::generate();
        let y = MerchantId::generate();
        for i in 0..20 {
            create(&svc, x, &format!("x-{i}"), i);
        }
        for i in 0..5 {
            create(&svc, y, &format!("y-{i}"), i);
        }

        let listed = svc.list_by_merchant(x);
        assert_eq!(listed.len(), 20);
        assert!(listed.iter().all(|p| p.merchant_id == x));
        assert!(svc.list_by_merchant(MerchantId::generate()).is_empty());
    }

    #[test]
    fn concurrent_create_with_same_sku_has_one_winner() {
        for _ in 0..50 {
            let svc = service();
            let sku = Sku::generate();
            let barrier = Barrier::new(2);

            let results: Vec<CatalogResult<Product>> = std::thread::scope(|scope| {
                let handles: Vec<_> = (0..2)
                    .map(|i| {
                        let svc = &svc;
                        let barrier = &barrier;
                        scope.spawn(move || {
                            barrier.wait();
                            svc.create_product(
                                MerchantId::generate(),
                                sku,
                                &format!("racer-{i}"),
                                "race",
                                1,
                            )
                        })
                    })
                    .collect();
                handles.into_iter().map(|h| h.join().unwrap()).collect()
            });

            let wins = results.iter().filter(|r| r.is_ok()).count();
            assert_eq!(wins, 1);
            assert!(results
                .iter()
                .any(|r| r == &Err(CatalogError::AlreadyExists(sku))));
            assert_eq!(svc.store.len(), 1);
        }
    }

    #[derive(Debug, Clone)]
    enum Op {
        Create(usize, usize),
        Update(usize, usize),
        Delete(usize, usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..4usize, 0..3usize).prop_map(|(s, m)| Op::Create(s, m)),
            (0..4usize, 0..3usize).prop_map(|(s, m)| Op::Update(s, m)),
            (0..4usize, 0..3usize).prop_map(|(s, m)| Op::Delete(s, m)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: whatever the operation sequence, each SKU appears at most
        /// once across all merchant listings and the listing matches the map.
        #[test]
        fn at_most_one_live_product_per_sku(ops in prop::collection::vec(op(), 1..40)) {
            let svc = service();
            let skus: Vec<Sku> = (0..4).map(|_| Sku::generate()).collect();
            let merchants: Vec<MerchantId> = (0..3).map(|_| MerchantId::generate()).collect();

            for op in ops {
                let _ = match op {
                    Op::Create(s, m) => svc
                        .create_product(merchants[m], skus[s], "n", "d", 1)
                        .map(|_| ()),
                    Op::Update(s, m) => svc
                        .update_product(merchants[m], skus[s], ProductPatch::default())
                        .map(|_| ()),
                    Op::Delete(s, m) => svc.delete_product(merchants[m], skus[s]),
                };
            }

            let listed: Vec<Product> = merchants
                .iter()
                .flat_map(|m| svc.list_by_merchant(*m))
                .collect();
            prop_assert_eq!(listed.len(), svc.store.len());
            for sku in &skus {
                let copies = listed.iter().filter(|p| &p.sku == sku).count();
                prop_assert!(copies <= 1);
                prop_assert_eq!(copies == 1, svc.get_product(*sku).is_ok());
            }
        }
    }
}

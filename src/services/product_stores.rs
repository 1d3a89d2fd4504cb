use std::collections::HashMap;

use crate::domain::product_store::{
    DesiredStorePrice, NewProductStore, ProductStore, UpdateProductStore,
};
use crate::repository::{ProductReader, ProductStoreReader, ProductStoreWriter, StoreReader};
use crate::services::{ServiceError, ServiceResult};

/// One price change applied to an existing association during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedUpdate {
    /// Identifier of the association record being changed.
    pub product_store_id: i32,
    /// Store the association targets after the update. Always the store it
    /// already targets; carried so the update path can re-check it.
    pub store_id: i32,
    /// New sale price in the smallest currency unit.
    pub sale_price_cents: i64,
}

/// The operations that transform a product's existing store prices into the
/// desired set. The three partitions are keyed by store id and are disjoint,
/// so they carry no ordering dependency on each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcilePlan {
    pub to_update: Vec<PlannedUpdate>,
    pub to_remove: Vec<i32>,
    pub to_add: Vec<DesiredStorePrice>,
}

impl ReconcilePlan {
    /// Diff the existing associations against the desired set.
    ///
    /// Stores present on both sides are updated when their price differs,
    /// stores present only in the existing set are removed, and stores present
    /// only in the desired set are added. Reconciling an already-converged
    /// state produces an empty plan.
    pub fn compute(existing: &[ProductStore], desired: &[DesiredStorePrice]) -> Self {
        let existing_by_store: HashMap<i32, &ProductStore> =
            existing.iter().map(|link| (link.store_id, link)).collect();
        let desired_by_store: HashMap<i32, &DesiredStorePrice> =
            desired.iter().map(|want| (want.store_id, want)).collect();

        let to_update = existing
            .iter()
            .filter_map(|link| {
                let want = desired_by_store.get(&link.store_id)?;
                let changed = want.sale_price_cents != link.sale_price_cents
                    || want.store_id != link.store_id;
                changed.then_some(PlannedUpdate {
                    product_store_id: link.id,
                    store_id: want.store_id,
                    sale_price_cents: want.sale_price_cents,
                })
            })
            .collect();

        let to_remove = existing
            .iter()
            .filter(|link| !desired_by_store.contains_key(&link.store_id))
            .map(|link| link.id)
            .collect();

        let to_add = desired
            .iter()
            .filter(|want| !existing_by_store.contains_key(&want.store_id))
            .copied()
            .collect();

        Self {
            to_update,
            to_remove,
            to_add,
        }
    }

    /// Whether the plan performs no operations at all.
    pub fn is_empty(&self) -> bool {
        self.to_update.is_empty() && self.to_remove.is_empty() && self.to_add.is_empty()
    }
}

/// Creates a sale price binding `product_id` to `store_id`.
///
/// Fails with `Conflict` when the pair already has a live association and with
/// `NotFound` when either side is missing. The checks are independent queries
/// with no enclosing transaction; the unique index on the association table
/// backstops the remaining race.
pub fn create_association<R>(
    repo: &R,
    product_id: i32,
    store_id: i32,
    sale_price_cents: i64,
) -> ServiceResult<ProductStore>
where
    R: ProductReader + StoreReader + ProductStoreReader + ProductStoreWriter + ?Sized,
{
    let duplicate = repo
        .get_product_store_by_product_and_store(product_id, store_id)
        .map_err(ServiceError::from)?;
    if duplicate.is_some() {
        return Err(ServiceError::Conflict(
            "only one sale price is allowed per store".to_string(),
        ));
    }

    if repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    if repo
        .get_store_by_id(store_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let new_link = NewProductStore::new(product_id, store_id, sale_price_cents);
    repo.create_product_store(&new_link)
        .map_err(ServiceError::from)
}

/// Applies the supplied slots of `updates` to an existing association.
///
/// Reassigning the price to a different store fails with `Conflict` when that
/// store already carries a price for the same product.
pub fn update_association<R>(
    repo: &R,
    association_id: i32,
    updates: UpdateProductStore,
) -> ServiceResult<ProductStore>
where
    R: ProductStoreReader + ProductStoreWriter + ?Sized,
{
    let existing = repo
        .get_product_store_by_id(association_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if let Some(new_store_id) = updates.store_id {
        if new_store_id != existing.store_id
            && repo
                .get_product_store_by_product_and_store(existing.product_id, new_store_id)
                .map_err(ServiceError::from)?
                .is_some()
        {
            return Err(ServiceError::Conflict(
                "only one sale price is allowed per store".to_string(),
            ));
        }
    }

    repo.update_product_store(association_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes an association, failing with `NotFound` when it does not exist.
///
/// Does not check whether the owning product keeps at least one price; only
/// the bulk update path enforces that invariant.
pub fn remove_association<R>(repo: &R, association_id: i32) -> ServiceResult<()>
where
    R: ProductStoreReader + ProductStoreWriter + ?Sized,
{
    if repo
        .get_product_store_by_id(association_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    repo.delete_product_store(association_id)
        .map_err(ServiceError::from)
}

/// Returns all associations owned by `product_id`, in no particular order.
pub fn list_by_product<R>(repo: &R, product_id: i32) -> ServiceResult<Vec<ProductStore>>
where
    R: ProductStoreReader + ?Sized,
{
    repo.list_product_stores_by_product(product_id)
        .map_err(ServiceError::from)
}

/// Reconciles a product's persisted store prices with the caller-supplied
/// desired set, issuing the minimal add/update/remove operations.
///
/// Every planned branch runs even after one fails; the first failure is
/// reported once all of them have completed, and applied branches are not
/// rolled back.
pub fn reconcile<R>(repo: &R, product_id: i32, desired: &[DesiredStorePrice]) -> ServiceResult<()>
where
    R: ProductReader + StoreReader + ProductStoreReader + ProductStoreWriter + ?Sized,
{
    let existing = repo
        .list_product_stores_by_product(product_id)
        .map_err(ServiceError::from)?;

    let plan = ReconcilePlan::compute(&existing, desired);

    let mut first_failure: Option<ServiceError> = None;

    for planned in &plan.to_update {
        let updates = UpdateProductStore::new()
            .store_id(planned.store_id)
            .sale_price_cents(planned.sale_price_cents);
        if let Err(err) = update_association(repo, planned.product_store_id, updates) {
            first_failure.get_or_insert(err);
        }
    }

    for &association_id in &plan.to_remove {
        if let Err(err) = remove_association(repo, association_id) {
            first_failure.get_or_insert(err);
        }
    }

    for want in &plan.to_add {
        if let Err(err) = create_association(repo, product_id, want.store_id, want.sale_price_cents)
        {
            first_failure.get_or_insert(err);
        }
    }

    match first_failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::product::{Product, ProductListQuery};
    use crate::domain::store::{Store, StoreListQuery};
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::repository::mock::{
        MockProductReader, MockProductStoreReader, MockProductStoreWriter, MockStoreReader,
    };

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn link(id: i32, product_id: i32, store_id: i32, sale_price_cents: i64) -> ProductStore {
        ProductStore {
            id,
            product_id,
            store_id,
            sale_price_cents,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn sample_product(id: i32) -> Product {
        Product {
            id,
            description: format!("Product {id}"),
            cost_cents: None,
            image: None,
            product_stores: Vec::new(),
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn sample_store(id: i32) -> Store {
        Store {
            id,
            description: format!("Store {id}"),
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    struct FakeRepo {
        product_reader: MockProductReader,
        store_reader: MockStoreReader,
        link_reader: MockProductStoreReader,
        link_writer: MockProductStoreWriter,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                product_reader: MockProductReader::new(),
                store_reader: MockStoreReader::new(),
                link_reader: MockProductStoreReader::new(),
                link_writer: MockProductStoreWriter::new(),
            }
        }
    }

    impl ProductReader for FakeRepo {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
            self.product_reader.get_product_by_id(id)
        }

        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
            self.product_reader.list_products(query)
        }
    }

    impl StoreReader for FakeRepo {
        fn get_store_by_id(&self, id: i32) -> RepositoryResult<Option<Store>> {
            self.store_reader.get_store_by_id(id)
        }

        fn get_stores_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Store>> {
            self.store_reader.get_stores_by_ids(ids)
        }

        fn list_stores(&self, query: StoreListQuery) -> RepositoryResult<(usize, Vec<Store>)> {
            self.store_reader.list_stores(query)
        }
    }

    impl ProductStoreReader for FakeRepo {
        fn get_product_store_by_id(&self, id: i32) -> RepositoryResult<Option<ProductStore>> {
            self.link_reader.get_product_store_by_id(id)
        }

        fn get_product_store_by_product_and_store(
            &self,
            product_id: i32,
            store_id: i32,
        ) -> RepositoryResult<Option<ProductStore>> {
            self.link_reader
                .get_product_store_by_product_and_store(product_id, store_id)
        }

        fn list_product_stores_by_product(
            &self,
            product_id: i32,
        ) -> RepositoryResult<Vec<ProductStore>> {
            self.link_reader.list_product_stores_by_product(product_id)
        }
    }

    impl ProductStoreWriter for FakeRepo {
        fn create_product_store(
            &self,
            new_product_store: &NewProductStore,
        ) -> RepositoryResult<ProductStore> {
            self.link_writer.create_product_store(new_product_store)
        }

        fn update_product_store(
            &self,
            product_store_id: i32,
            updates: &UpdateProductStore,
        ) -> RepositoryResult<ProductStore> {
            self.link_writer
                .update_product_store(product_store_id, updates)
        }

        fn delete_product_store(&self, product_store_id: i32) -> RepositoryResult<()> {
            self.link_writer.delete_product_store(product_store_id)
        }
    }

    #[test]
    fn plan_is_empty_when_sets_already_match() {
        let existing = vec![link(1, 10, 1, 1550), link(2, 10, 2, 2000)];
        let desired = vec![DesiredStorePrice::new(1, 1550), DesiredStorePrice::new(2, 2000)];

        let plan = ReconcilePlan::compute(&existing, &desired);

        assert!(plan.is_empty());
    }

    #[test]
    fn plan_updates_changed_price_and_adds_new_store() {
        let existing = vec![link(1, 10, 1, 1550)];
        let desired = vec![DesiredStorePrice::new(1, 1650), DesiredStorePrice::new(2, 2000)];

        let plan = ReconcilePlan::compute(&existing, &desired);

        assert_eq!(
            plan.to_update,
            vec![PlannedUpdate {
                product_store_id: 1,
                store_id: 1,
                sale_price_cents: 1650,
            }]
        );
        assert!(plan.to_remove.is_empty());
        assert_eq!(plan.to_add, vec![DesiredStorePrice::new(2, 2000)]);
    }

    #[test]
    fn plan_removes_dropped_store_and_keeps_unchanged_one() {
        let existing = vec![link(1, 10, 1, 1650), link(2, 10, 2, 2000)];
        let desired = vec![DesiredStorePrice::new(2, 2000)];

        let plan = ReconcilePlan::compute(&existing, &desired);

        assert!(plan.to_update.is_empty());
        assert_eq!(plan.to_remove, vec![1]);
        assert!(plan.to_add.is_empty());
    }

    #[test]
    fn plan_is_idempotent_after_convergence() {
        let existing = vec![link(1, 10, 1, 1550)];
        let desired = vec![DesiredStorePrice::new(1, 1650), DesiredStorePrice::new(2, 2000)];

        let plan = ReconcilePlan::compute(&existing, &desired);
        assert!(!plan.is_empty());

        // State after the plan has been applied.
        let converged = vec![link(1, 10, 1, 1650), link(3, 10, 2, 2000)];

        let second_pass = ReconcilePlan::compute(&converged, &desired);
        assert!(second_pass.is_empty());
    }

    #[test]
    fn plan_partitions_are_disjoint_by_store() {
        let existing = vec![link(1, 10, 1, 100), link(2, 10, 2, 200), link(3, 10, 3, 300)];
        let desired = vec![
            DesiredStorePrice::new(2, 250),
            DesiredStorePrice::new(3, 300),
            DesiredStorePrice::new(4, 400),
        ];

        let plan = ReconcilePlan::compute(&existing, &desired);

        let updated: Vec<i32> = plan.to_update.iter().map(|planned| planned.store_id).collect();
        let added: Vec<i32> = plan.to_add.iter().map(|want| want.store_id).collect();

        assert_eq!(updated, vec![2]);
        assert_eq!(plan.to_remove, vec![1]);
        assert_eq!(added, vec![4]);
    }

    #[test]
    fn create_association_rejects_duplicate_store() {
        let mut repo = FakeRepo::new();

        repo.link_reader
            .expect_get_product_store_by_product_and_store()
            .times(1)
            .withf(|product_id, store_id| {
                assert_eq!(*product_id, 10);
                assert_eq!(*store_id, 1);
                true
            })
            .returning(|product_id, store_id| Ok(Some(link(7, product_id, store_id, 1550))));

        let result = create_association(&repo, 10, 1, 1650);

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn create_association_rejects_missing_product() {
        let mut repo = FakeRepo::new();

        repo.link_reader
            .expect_get_product_store_by_product_and_store()
            .returning(|_, _| Ok(None));
        repo.product_reader
            .expect_get_product_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = create_association(&repo, 10, 1, 1650);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn create_association_rejects_missing_store() {
        let mut repo = FakeRepo::new();

        repo.link_reader
            .expect_get_product_store_by_product_and_store()
            .returning(|_, _| Ok(None));
        repo.product_reader
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id))));
        repo.store_reader
            .expect_get_store_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = create_association(&repo, 10, 99, 1650);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn create_association_persists_new_link() {
        let mut repo = FakeRepo::new();

        repo.link_reader
            .expect_get_product_store_by_product_and_store()
            .returning(|_, _| Ok(None));
        repo.product_reader
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id))));
        repo.store_reader
            .expect_get_store_by_id()
            .returning(|id| Ok(Some(sample_store(id))));
        repo.link_writer
            .expect_create_product_store()
            .times(1)
            .withf(|new_link| {
                assert_eq!(new_link.product_id, 10);
                assert_eq!(new_link.store_id, 1);
                assert_eq!(new_link.sale_price_cents, 1550);
                true
            })
            .returning(|new_link| {
                Ok(link(
                    1,
                    new_link.product_id,
                    new_link.store_id,
                    new_link.sale_price_cents,
                ))
            });

        let created = create_association(&repo, 10, 1, 1550).expect("expected success");

        assert_eq!(created.store_id, 1);
        assert_eq!(created.sale_price_cents, 1550);
    }

    #[test]
    fn create_association_maps_lost_unique_race_to_conflict() {
        let mut repo = FakeRepo::new();

        repo.link_reader
            .expect_get_product_store_by_product_and_store()
            .returning(|_, _| Ok(None));
        repo.product_reader
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id))));
        repo.store_reader
            .expect_get_store_by_id()
            .returning(|id| Ok(Some(sample_store(id))));
        repo.link_writer
            .expect_create_product_store()
            .returning(|_| Err(RepositoryError::Conflict));

        let result = create_association(&repo, 10, 1, 1550);

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn update_association_requires_existing_record() {
        let mut repo = FakeRepo::new();

        repo.link_reader
            .expect_get_product_store_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = update_association(&repo, 5, UpdateProductStore::new().sale_price_cents(900));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn update_association_rejects_reassignment_to_taken_store() {
        let mut repo = FakeRepo::new();

        repo.link_reader
            .expect_get_product_store_by_id()
            .returning(|id| Ok(Some(link(id, 10, 1, 1550))));
        repo.link_reader
            .expect_get_product_store_by_product_and_store()
            .times(1)
            .withf(|product_id, store_id| {
                assert_eq!(*product_id, 10);
                assert_eq!(*store_id, 2);
                true
            })
            .returning(|product_id, store_id| Ok(Some(link(8, product_id, store_id, 2000))));

        let result = update_association(&repo, 5, UpdateProductStore::new().store_id(2));

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn update_association_skips_conflict_check_for_unchanged_store() {
        let mut repo = FakeRepo::new();

        repo.link_reader
            .expect_get_product_store_by_id()
            .returning(|id| Ok(Some(link(id, 10, 1, 1550))));
        // No expectation on the pair lookup: resending the current store must
        // not collide with the association itself.
        repo.link_writer
            .expect_update_product_store()
            .times(1)
            .withf(|id, updates| {
                assert_eq!(*id, 5);
                assert_eq!(updates.store_id, Some(1));
                assert_eq!(updates.sale_price_cents, Some(1650));
                true
            })
            .returning(|id, _| Ok(link(id, 10, 1, 1650)));

        let updated = update_association(
            &repo,
            5,
            UpdateProductStore::new().store_id(1).sale_price_cents(1650),
        )
        .expect("expected success");

        assert_eq!(updated.sale_price_cents, 1650);
    }

    #[test]
    fn remove_association_requires_existing_record() {
        let mut repo = FakeRepo::new();

        repo.link_reader
            .expect_get_product_store_by_id()
            .returning(|_| Ok(None));

        let result = remove_association(&repo, 5);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn remove_association_deletes_without_minimum_count_guard() {
        let mut repo = FakeRepo::new();

        repo.link_reader
            .expect_get_product_store_by_id()
            .returning(|id| Ok(Some(link(id, 10, 1, 1550))));
        repo.link_writer
            .expect_delete_product_store()
            .times(1)
            .withf(|id| *id == 5)
            .returning(|_| Ok(()));

        remove_association(&repo, 5).expect("expected success");
    }

    #[test]
    fn reconcile_applies_update_and_add_branches() {
        let mut repo = FakeRepo::new();

        repo.link_reader
            .expect_list_product_stores_by_product()
            .times(1)
            .withf(|product_id| *product_id == 10)
            .returning(|_| Ok(vec![link(1, 10, 1, 1550)]));

        // Update branch re-reads the association it touches.
        repo.link_reader
            .expect_get_product_store_by_id()
            .returning(|id| Ok(Some(link(id, 10, 1, 1550))));
        repo.link_writer
            .expect_update_product_store()
            .times(1)
            .withf(|id, updates| {
                assert_eq!(*id, 1);
                assert_eq!(updates.sale_price_cents, Some(1650));
                true
            })
            .returning(|id, _| Ok(link(id, 10, 1, 1650)));

        // Add branch runs the full creation checks for store 2.
        repo.link_reader
            .expect_get_product_store_by_product_and_store()
            .returning(|_, _| Ok(None));
        repo.product_reader
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id))));
        repo.store_reader
            .expect_get_store_by_id()
            .returning(|id| Ok(Some(sample_store(id))));
        repo.link_writer
            .expect_create_product_store()
            .times(1)
            .withf(|new_link| {
                assert_eq!(new_link.store_id, 2);
                assert_eq!(new_link.sale_price_cents, 2000);
                true
            })
            .returning(|new_link| {
                Ok(link(
                    2,
                    new_link.product_id,
                    new_link.store_id,
                    new_link.sale_price_cents,
                ))
            });

        let desired = vec![DesiredStorePrice::new(1, 1650), DesiredStorePrice::new(2, 2000)];

        reconcile(&repo, 10, &desired).expect("expected success");
    }

    #[test]
    fn reconcile_runs_remaining_branches_after_a_failure() {
        let mut repo = FakeRepo::new();

        repo.link_reader
            .expect_list_product_stores_by_product()
            .returning(|_| Ok(vec![link(1, 10, 1, 1550)]));

        // The removal branch fails...
        repo.link_reader
            .expect_get_product_store_by_id()
            .returning(|_| Ok(None));

        // ...but the add branch must still run to completion.
        repo.link_reader
            .expect_get_product_store_by_product_and_store()
            .returning(|_, _| Ok(None));
        repo.product_reader
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id))));
        repo.store_reader
            .expect_get_store_by_id()
            .returning(|id| Ok(Some(sample_store(id))));
        repo.link_writer
            .expect_create_product_store()
            .times(1)
            .returning(|new_link| {
                Ok(link(
                    9,
                    new_link.product_id,
                    new_link.store_id,
                    new_link.sale_price_cents,
                ))
            });

        let desired = vec![DesiredStorePrice::new(2, 2000)];

        let result = reconcile(&repo, 10, &desired);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn reconcile_with_converged_state_issues_no_writes() {
        let mut repo = FakeRepo::new();

        repo.link_reader
            .expect_list_product_stores_by_product()
            .returning(|_| Ok(vec![link(1, 10, 1, 1550)]));

        // No writer expectations: any create/update/delete call would panic.
        let desired = vec![DesiredStorePrice::new(1, 1550)];

        reconcile(&repo, 10, &desired).expect("expected success");
    }
}

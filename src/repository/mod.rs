use crate::db::{DbConnection, DbPool};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::domain::product_store::{NewProductStore, ProductStore, UpdateProductStore};
use crate::domain::store::{NewStore, Store, StoreListQuery, UpdateStore};

use errors::RepositoryResult;

pub mod errors;
pub mod product;
pub mod product_store;
pub mod store;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over store records.
pub trait StoreReader {
    fn get_store_by_id(&self, id: i32) -> RepositoryResult<Option<Store>>;
    fn get_stores_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Store>>;
    fn list_stores(&self, query: StoreListQuery) -> RepositoryResult<(usize, Vec<Store>)>;
}

/// Write operations over store records.
pub trait StoreWriter {
    fn create_store(&self, new_store: &NewStore) -> RepositoryResult<Store>;
    fn update_store(&self, store_id: i32, updates: &UpdateStore) -> RepositoryResult<Store>;
    fn delete_store(&self, store_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over product-store price associations.
pub trait ProductStoreReader {
    fn get_product_store_by_id(&self, id: i32) -> RepositoryResult<Option<ProductStore>>;
    fn get_product_store_by_product_and_store(
        &self,
        product_id: i32,
        store_id: i32,
    ) -> RepositoryResult<Option<ProductStore>>;
    fn list_product_stores_by_product(
        &self,
        product_id: i32,
    ) -> RepositoryResult<Vec<ProductStore>>;
}

/// Write operations over product-store price associations.
pub trait ProductStoreWriter {
    fn create_product_store(
        &self,
        new_product_store: &NewProductStore,
    ) -> RepositoryResult<ProductStore>;
    fn update_product_store(
        &self,
        product_store_id: i32,
        updates: &UpdateProductStore,
    ) -> RepositoryResult<ProductStore>;
    fn delete_product_store(&self, product_store_id: i32) -> RepositoryResult<()>;
}

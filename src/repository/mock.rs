use mockall::mock;

use super::{
    ProductReader, ProductStoreReader, ProductStoreWriter, ProductWriter, StoreReader, StoreWriter,
};
use crate::domain::{
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    product_store::{NewProductStore, ProductStore, UpdateProductStore},
    store::{NewStore, Store, StoreListQuery, UpdateStore},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub StoreReader {}

    impl StoreReader for StoreReader {
        fn get_store_by_id(&self, id: i32) -> RepositoryResult<Option<Store>>;
        fn get_stores_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Store>>;
        fn list_stores(&self, query: StoreListQuery) -> RepositoryResult<(usize, Vec<Store>)>;
    }
}

mock! {
    pub StoreWriter {}

    impl StoreWriter for StoreWriter {
        fn create_store(&self, new_store: &NewStore) -> RepositoryResult<Store>;
        fn update_store(&self, store_id: i32, updates: &UpdateStore) -> RepositoryResult<Store>;
        fn delete_store(&self, store_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProductStoreReader {}

    impl ProductStoreReader for ProductStoreReader {
        fn get_product_store_by_id(&self, id: i32) -> RepositoryResult<Option<ProductStore>>;
        fn get_product_store_by_product_and_store(&self, product_id: i32, store_id: i32) -> RepositoryResult<Option<ProductStore>>;
        fn list_product_stores_by_product(&self, product_id: i32) -> RepositoryResult<Vec<ProductStore>>;
    }
}

mock! {
    pub ProductStoreWriter {}

    impl ProductStoreWriter for ProductStoreWriter {
        fn create_product_store(&self, new_product_store: &NewProductStore) -> RepositoryResult<ProductStore>;
        fn update_product_store(&self, product_store_id: i32, updates: &UpdateProductStore) -> RepositoryResult<ProductStore>;
        fn delete_product_store(&self, product_store_id: i32) -> RepositoryResult<()>;
    }
}

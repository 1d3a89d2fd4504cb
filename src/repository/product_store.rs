use diesel::prelude::*;

use crate::{
    domain::product_store::{
        NewProductStore as DomainNewProductStore, ProductStore as DomainProductStore,
        UpdateProductStore as DomainUpdateProductStore,
    },
    models::product_store::{
        NewProductStore as DbNewProductStore, ProductStore as DbProductStore,
        UpdateProductStore as DbUpdateProductStore,
    },
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, ProductStoreReader, ProductStoreWriter},
};

impl ProductStoreReader for DieselRepository {
    fn get_product_store_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProductStore>> {
        use crate::schema::product_stores;

        let mut conn = self.conn()?;
        let link = product_stores::table
            .filter(product_stores::id.eq(id))
            .first::<DbProductStore>(&mut conn)
            .optional()?;

        Ok(link.map(Into::into))
    }

    fn get_product_store_by_product_and_store(
        &self,
        product_id: i32,
        store_id: i32,
    ) -> RepositoryResult<Option<DomainProductStore>> {
        use crate::schema::product_stores;

        let mut conn = self.conn()?;
        let link = product_stores::table
            .filter(product_stores::product_id.eq(product_id))
            .filter(product_stores::store_id.eq(store_id))
            .first::<DbProductStore>(&mut conn)
            .optional()?;

        Ok(link.map(Into::into))
    }

    fn list_product_stores_by_product(
        &self,
        product_id: i32,
    ) -> RepositoryResult<Vec<DomainProductStore>> {
        use crate::schema::product_stores;

        let mut conn = self.conn()?;
        let rows = product_stores::table
            .filter(product_stores::product_id.eq(product_id))
            .order(product_stores::created_at.asc())
            .load::<DbProductStore>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl ProductStoreWriter for DieselRepository {
    fn create_product_store(
        &self,
        new_product_store: &DomainNewProductStore,
    ) -> RepositoryResult<DomainProductStore> {
        use crate::schema::product_stores;

        let mut conn = self.conn()?;
        let db_new = DbNewProductStore::from(new_product_store);

        // The UNIQUE (product_id, store_id) index turns a lost duplicate race
        // into RepositoryError::Conflict here.
        let created = diesel::insert_into(product_stores::table)
            .values(&db_new)
            .get_result::<DbProductStore>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product_store(
        &self,
        product_store_id: i32,
        updates: &DomainUpdateProductStore,
    ) -> RepositoryResult<DomainProductStore> {
        use crate::schema::product_stores;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProductStore::from(updates);

        let target = product_stores::table.filter(product_stores::id.eq(product_store_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbProductStore>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_product_store(&self, product_store_id: i32) -> RepositoryResult<()> {
        use crate::schema::product_stores;

        let mut conn = self.conn()?;

        let target = product_stores::table.filter(product_stores::id.eq(product_store_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

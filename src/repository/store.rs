use diesel::prelude::*;

use crate::{
    domain::store::{
        NewStore as DomainNewStore, Store as DomainStore, StoreListQuery,
        UpdateStore as DomainUpdateStore,
    },
    models::store::{NewStore as DbNewStore, Store as DbStore, UpdateStore as DbUpdateStore},
    pagination::SortOrder,
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, StoreReader, StoreWriter},
};

impl StoreReader for DieselRepository {
    fn get_store_by_id(&self, id: i32) -> RepositoryResult<Option<DomainStore>> {
        use crate::schema::stores;

        let mut conn = self.conn()?;
        let store = stores::table
            .filter(stores::id.eq(id))
            .first::<DbStore>(&mut conn)
            .optional()?;

        Ok(store.map(Into::into))
    }

    fn get_stores_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<DomainStore>> {
        use crate::schema::stores;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let db_stores = stores::table
            .filter(stores::id.eq_any(ids))
            .load::<DbStore>(&mut conn)?;

        Ok(db_stores.into_iter().map(Into::into).collect())
    }

    fn list_stores(&self, query: StoreListQuery) -> RepositoryResult<(usize, Vec<DomainStore>)> {
        use crate::schema::stores;

        let mut conn = self.conn()?;

        let mut count_query = stores::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.filter.as_ref() {
            let pattern = format!("%{}%", term);
            match term.trim().parse::<i32>() {
                Ok(id) => {
                    count_query =
                        count_query.filter(stores::description.like(pattern).or(stores::id.eq(id)));
                }
                Err(_) => {
                    count_query = count_query.filter(stores::description.like(pattern));
                }
            }
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = stores::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.filter.as_ref() {
            let pattern = format!("%{}%", term);
            match term.trim().parse::<i32>() {
                Ok(id) => {
                    items = items.filter(stores::description.like(pattern).or(stores::id.eq(id)));
                }
                Err(_) => {
                    items = items.filter(stores::description.like(pattern));
                }
            }
        }

        if let Some(pagination) = &query.pagination {
            if let Some(sort_by) = pagination.sort_by.as_deref() {
                items = match (sort_by, pagination.order) {
                    ("id", SortOrder::Asc) => items.order(stores::id.asc()),
                    ("id", SortOrder::Desc) => items.order(stores::id.desc()),
                    ("description", SortOrder::Asc) => items.order(stores::description.asc()),
                    ("description", SortOrder::Desc) => items.order(stores::description.desc()),
                    ("createdAt", SortOrder::Asc) => items.order(stores::created_at.asc()),
                    ("createdAt", SortOrder::Desc) => items.order(stores::created_at.desc()),
                    ("updatedAt", SortOrder::Asc) => items.order(stores::updated_at.asc()),
                    ("updatedAt", SortOrder::Desc) => items.order(stores::updated_at.desc()),
                    _ => items,
                };
            }

            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_stores = items.load::<DbStore>(&mut conn)?;

        Ok((total, db_stores.into_iter().map(Into::into).collect()))
    }
}

impl StoreWriter for DieselRepository {
    fn create_store(&self, new_store: &DomainNewStore) -> RepositoryResult<DomainStore> {
        use crate::schema::stores;

        let mut conn = self.conn()?;
        let db_new = DbNewStore::from(new_store);

        let created = diesel::insert_into(stores::table)
            .values(&db_new)
            .get_result::<DbStore>(&mut conn)?;

        Ok(created.into())
    }

    fn update_store(
        &self,
        store_id: i32,
        updates: &DomainUpdateStore,
    ) -> RepositoryResult<DomainStore> {
        use crate::schema::stores;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateStore::from(updates);

        let target = stores::table.filter(stores::id.eq(store_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbStore>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_store(&self, store_id: i32) -> RepositoryResult<()> {
        use crate::schema::stores;

        let mut conn = self.conn()?;

        let target = stores::table.filter(stores::id.eq(store_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::store::Store;
use crate::forms::stores::{CreateStoreForm, StoresQuery, UpdateStoreForm};
use crate::pagination::Paginated;
use crate::repository::{StoreReader, StoreWriter};
use crate::services::{ServiceError, ServiceResult};

/// View model of a store exposed by the store endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreView {
    pub id: i32,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Store> for StoreView {
    fn from(store: Store) -> Self {
        Self {
            id: store.id,
            description: store.description,
            created_at: store.created_at,
            updated_at: store.updated_at,
        }
    }
}

/// Lists stores matching the free-text/id filter, one page at a time.
pub fn list_stores<R>(repo: &R, query: StoresQuery) -> ServiceResult<Paginated<StoreView>>
where
    R: StoreReader + ?Sized,
{
    let (list_query, pagination) = query
        .into_parts()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let (total, stores) = repo.list_stores(list_query).map_err(ServiceError::from)?;

    let views: Vec<StoreView> = stores.into_iter().map(StoreView::from).collect();

    Ok(Paginated::new(views, total, &pagination))
}

/// Creates a new store.
pub fn create_store<R>(repo: &R, form: CreateStoreForm) -> ServiceResult<StoreView>
where
    R: StoreWriter + ?Sized,
{
    let new_store = form
        .into_new_store()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    repo.create_store(&new_store)
        .map(StoreView::from)
        .map_err(ServiceError::from)
}

/// Loads one store, failing with `NotFound` when it does not exist.
pub fn find_store_by_id<R>(repo: &R, id: i32) -> ServiceResult<StoreView>
where
    R: StoreReader + ?Sized,
{
    repo.get_store_by_id(id)
        .map_err(ServiceError::from)?
        .map(StoreView::from)
        .ok_or(ServiceError::NotFound)
}

/// Replaces a store's description.
pub fn update_store<R>(repo: &R, id: i32, form: UpdateStoreForm) -> ServiceResult<StoreView>
where
    R: StoreReader + StoreWriter + ?Sized,
{
    let updates = form
        .into_update_store()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    if repo
        .get_store_by_id(id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    repo.update_store(id, &updates)
        .map(StoreView::from)
        .map_err(ServiceError::from)
}

/// Deletes a store; the schema cascade removes the prices referencing it.
pub fn delete_store<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: StoreReader + StoreWriter + ?Sized,
{
    if repo
        .get_store_by_id(id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    repo.delete_store(id).map_err(ServiceError::from)
}

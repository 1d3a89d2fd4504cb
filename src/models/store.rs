use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::store::{
    NewStore as DomainNewStore, Store as DomainStore, UpdateStore as DomainUpdateStore,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::stores)]
pub struct Store {
    pub id: i32,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::stores)]
pub struct NewStore<'a> {
    pub description: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::stores)]
pub struct UpdateStore<'a> {
    pub description: &'a str,
    pub updated_at: NaiveDateTime,
}

impl From<Store> for DomainStore {
    fn from(value: Store) -> Self {
        Self {
            id: value.id,
            description: value.description,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewStore> for NewStore<'a> {
    fn from(value: &'a DomainNewStore) -> Self {
        Self {
            description: value.description.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateStore> for UpdateStore<'a> {
    fn from(value: &'a DomainUpdateStore) -> Self {
        Self {
            description: value.description.as_str(),
            updated_at: value.updated_at,
        }
    }
}

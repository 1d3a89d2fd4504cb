use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product_store::{
    NewProductStore as DomainNewProductStore, ProductStore as DomainProductStore,
    UpdateProductStore as DomainUpdateProductStore,
};

#[derive(Debug, Clone, Identifiable, Queryable, Associations, Selectable)]
#[diesel(
    table_name = crate::schema::product_stores,
    belongs_to(super::product::Product, foreign_key = product_id),
    belongs_to(super::store::Store, foreign_key = store_id)
)]
pub struct ProductStore {
    pub id: i32,
    pub product_id: i32,
    pub store_id: i32,
    pub sale_price_cents: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_stores)]
pub struct NewProductStore {
    pub product_id: i32,
    pub store_id: i32,
    pub sale_price_cents: i64,
}

// Absent slots are skipped, so an update only touches the supplied fields.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::product_stores)]
pub struct UpdateProductStore {
    pub store_id: Option<i32>,
    pub sale_price_cents: Option<i64>,
    pub updated_at: NaiveDateTime,
}

impl From<ProductStore> for DomainProductStore {
    fn from(value: ProductStore) -> Self {
        Self {
            id: value.id,
            product_id: value.product_id,
            store_id: value.store_id,
            sale_price_cents: value.sale_price_cents,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<&DomainNewProductStore> for NewProductStore {
    fn from(value: &DomainNewProductStore) -> Self {
        Self {
            product_id: value.product_id,
            store_id: value.store_id,
            sale_price_cents: value.sale_price_cents,
        }
    }
}

impl From<&DomainUpdateProductStore> for UpdateProductStore {
    fn from(value: &DomainUpdateProductStore) -> Self {
        Self {
            store_id: value.store_id,
            sale_price_cents: value.sale_price_cents,
            updated_at: value.updated_at,
        }
    }
}

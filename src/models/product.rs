use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub description: String,
    pub cost_cents: Option<i64>,
    pub image: Option<Vec<u8>>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub description: &'a str,
    pub cost_cents: Option<i64>,
    pub image: Option<&'a [u8]>,
}

// Absent slots are skipped, so an update only touches the supplied fields.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub description: Option<&'a str>,
    pub cost_cents: Option<i64>,
    pub image: Option<&'a [u8]>,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            description: value.description,
            cost_cents: value.cost_cents,
            image: value.image,
            product_stores: Vec::new(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            description: value.description.as_str(),
            cost_cents: value.cost_cents,
            image: value.image.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            description: value.description.as_deref(),
            cost_cents: value.cost_cents,
            image: value.image.as_deref(),
            updated_at: value.updated_at,
        }
    }
}

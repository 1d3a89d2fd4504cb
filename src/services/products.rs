use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::product::Product;
use crate::domain::store::Store;
use crate::forms::products::{CreateProductForm, ProductsQuery, UpdateProductForm};
use crate::pagination::Paginated;
use crate::repository::{
    ProductReader, ProductStoreReader, ProductStoreWriter, ProductWriter, StoreReader,
};
use crate::services::product_stores;
use crate::services::{ServiceError, ServiceResult};

/// View model of one store price exposed by the product endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStoreView {
    pub id: i32,
    pub store_id: i32,
    /// Description of the referenced store, resolved by lookup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_description: Option<String>,
    /// Sale price as a decimal currency value.
    pub sale_price: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// View model of a product exposed by the product endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: i32,
    pub description: String,
    /// Acquisition cost as a decimal currency value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Base64 rendering of the stored image. Derived on read, never persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    pub product_stores: Vec<ProductStoreView>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ProductView {
    fn from_product(product: Product, store_lookup: &HashMap<i32, &Store>) -> Self {
        let Product {
            id,
            description,
            cost_cents,
            image,
            product_stores,
            created_at,
            updated_at,
        } = product;

        let product_stores = product_stores
            .into_iter()
            .map(|link| ProductStoreView {
                id: link.id,
                store_id: link.store_id,
                store_description: store_lookup
                    .get(&link.store_id)
                    .map(|store| store.description.clone()),
                sale_price: link.sale_price_cents as f64 / 100.0,
                created_at: link.created_at,
                updated_at: link.updated_at,
            })
            .collect();

        Self {
            id,
            description,
            cost: cost_cents.map(|cents| cents as f64 / 100.0),
            image_base64: image.map(|bytes| BASE64.encode(bytes)),
            product_stores,
            created_at,
            updated_at,
        }
    }
}

/// Lists products matching the supplied filters, one page at a time.
pub fn list_products<R>(repo: &R, query: ProductsQuery) -> ServiceResult<Paginated<ProductView>>
where
    R: ProductReader + StoreReader + ?Sized,
{
    let (list_query, pagination) = query
        .into_parts()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let (total, products) = repo.list_products(list_query).map_err(ServiceError::from)?;

    let mut store_ids: Vec<i32> = products
        .iter()
        .flat_map(|product| product.product_stores.iter().map(|link| link.store_id))
        .collect();
    store_ids.sort_unstable();
    store_ids.dedup();

    let stores = repo
        .get_stores_by_ids(&store_ids)
        .map_err(ServiceError::from)?;
    let store_lookup: HashMap<i32, &Store> = stores.iter().map(|store| (store.id, store)).collect();

    let views: Vec<ProductView> = products
        .into_iter()
        .map(|product| ProductView::from_product(product, &store_lookup))
        .collect();

    Ok(Paginated::new(views, total, &pagination))
}

/// Creates a product together with its initial store prices.
///
/// Every desired price is attempted even when an earlier one fails; the first
/// failure is reported after the rest have run and the already-created rows
/// are left in place.
pub fn create_product<R>(repo: &R, form: CreateProductForm) -> ServiceResult<ProductView>
where
    R: ProductReader + ProductWriter + StoreReader + ProductStoreReader + ProductStoreWriter + ?Sized,
{
    let payload = form
        .into_new_product()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    if payload.associations.is_empty() {
        return Err(ServiceError::BadRequest(
            "at least one store price must be provided for the product".to_string(),
        ));
    }

    let created = repo
        .create_product(&payload.product)
        .map_err(ServiceError::from)?;

    let mut first_failure: Option<ServiceError> = None;
    for want in &payload.associations {
        if let Err(err) = product_stores::create_association(
            repo,
            created.id,
            want.store_id,
            want.sale_price_cents,
        ) {
            first_failure.get_or_insert(err);
        }
    }
    if let Some(err) = first_failure {
        return Err(err);
    }

    find_product_by_id(repo, created.id)
}

/// Loads one product with its store prices and their store descriptions.
pub fn find_product_by_id<R>(repo: &R, id: i32) -> ServiceResult<ProductView>
where
    R: ProductReader + StoreReader + ?Sized,
{
    let product = repo
        .get_product_by_id(id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let store_ids: Vec<i32> = product
        .product_stores
        .iter()
        .map(|link| link.store_id)
        .collect();
    let stores = repo
        .get_stores_by_ids(&store_ids)
        .map_err(ServiceError::from)?;
    let store_lookup: HashMap<i32, &Store> = stores.iter().map(|store| (store.id, store)).collect();

    Ok(ProductView::from_product(product, &store_lookup))
}

/// Applies the supplied scalar changes and, when a desired association set is
/// present, reconciles the product's store prices against it.
pub fn update_product<R>(repo: &R, id: i32, form: UpdateProductForm) -> ServiceResult<ProductView>
where
    R: ProductReader + ProductWriter + StoreReader + ProductStoreReader + ProductStoreWriter + ?Sized,
{
    let (updates, desired) = form
        .into_update_product()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    if repo
        .get_product_by_id(id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    // An empty desired set is refused before anything is written so the
    // product comes out of a failed call unchanged.
    if let Some(desired) = &desired {
        if desired.is_empty() {
            return Err(ServiceError::BadRequest(
                "cannot remove all store prices; at least one must remain".to_string(),
            ));
        }
    }

    repo.update_product(id, &updates).map_err(ServiceError::from)?;

    if let Some(desired) = desired {
        product_stores::reconcile(repo, id, &desired)?;
    }

    find_product_by_id(repo, id)
}

/// Deletes a product; the schema cascade removes its store prices.
pub fn delete_product<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    if repo
        .get_product_by_id(id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    repo.delete_product(id).map_err(ServiceError::from)
}

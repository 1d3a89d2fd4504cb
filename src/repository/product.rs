use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
        UpdateProduct as DomainUpdateProduct,
    },
    domain::product_store::ProductStore as DomainProductStore,
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    models::product_store::ProductStore as DbProductStore,
    pagination::SortOrder,
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, ProductReader, ProductWriter},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        if let Some(db_product) = product {
            let mut domain: DomainProduct = db_product.into();
            let mut links = load_product_stores_for_products(&mut conn, &[domain.id])?;
            domain.product_stores = links.remove(&domain.id).unwrap_or_default();
            Ok(Some(domain))
        } else {
            Ok(None)
        }
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        use crate::schema::{product_stores, products};

        let mut conn = self.conn()?;

        let mut count_query = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(id) = query.id {
            count_query = count_query.filter(products::id.eq(id));
        }

        if let Some(term) = query.description.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(products::description.like(pattern));
        }

        if let Some(cost) = query.cost_cents {
            count_query = count_query.filter(products::cost_cents.eq(cost));
        }

        if let Some(price) = query.sale_price_cents {
            let priced = product_stores::table
                .filter(product_stores::sale_price_cents.eq(price))
                .select(product_stores::product_id);
            count_query = count_query.filter(products::id.eq_any(priced));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(id) = query.id {
            items = items.filter(products::id.eq(id));
        }

        if let Some(term) = query.description.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(products::description.like(pattern));
        }

        if let Some(cost) = query.cost_cents {
            items = items.filter(products::cost_cents.eq(cost));
        }

        if let Some(price) = query.sale_price_cents {
            let priced = product_stores::table
                .filter(product_stores::sale_price_cents.eq(price))
                .select(product_stores::product_id);
            items = items.filter(products::id.eq_any(priced));
        }

        if let Some(pagination) = &query.pagination {
            if let Some(sort_by) = pagination.sort_by.as_deref() {
                // Attribute names come from the wire; anything unknown leaves
                // the order unspecified instead of failing the request.
                items = match (sort_by, pagination.order) {
                    ("id", SortOrder::Asc) => items.order(products::id.asc()),
                    ("id", SortOrder::Desc) => items.order(products::id.desc()),
                    ("description", SortOrder::Asc) => items.order(products::description.asc()),
                    ("description", SortOrder::Desc) => items.order(products::description.desc()),
                    ("cost", SortOrder::Asc) => items.order(products::cost_cents.asc()),
                    ("cost", SortOrder::Desc) => items.order(products::cost_cents.desc()),
                    ("createdAt", SortOrder::Asc) => items.order(products::created_at.asc()),
                    ("createdAt", SortOrder::Desc) => items.order(products::created_at.desc()),
                    ("updatedAt", SortOrder::Asc) => items.order(products::updated_at.asc()),
                    ("updatedAt", SortOrder::Desc) => items.order(products::updated_at.desc()),
                    _ => items,
                };
            }

            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        if db_products.is_empty() {
            return Ok((total, Vec::new()));
        }

        let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
        let mut link_map = load_product_stores_for_products(&mut conn, &product_ids)?;

        let mut domain_products = Vec::with_capacity(db_products.len());
        for db_product in db_products {
            let mut domain: DomainProduct = db_product.into();
            domain.product_stores = link_map.remove(&domain.id).unwrap_or_default();
            domain_products.push(domain);
        }

        Ok((total, domain_products))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let target = products::table.filter(products::id.eq(product_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbProduct>(&mut conn)?;

        let mut domain: DomainProduct = updated.into();
        let mut links = load_product_stores_for_products(&mut conn, &[domain.id])?;
        domain.product_stores = links.remove(&domain.id).unwrap_or_default();

        Ok(domain)
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let target = products::table.filter(products::id.eq(product_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

fn load_product_stores_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainProductStore>>> {
    use crate::schema::product_stores;

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_stores::table
        .filter(product_stores::product_id.eq_any(product_ids))
        .order(product_stores::created_at.asc())
        .load::<DbProductStore>(conn)?;

    let mut map: HashMap<i32, Vec<DomainProductStore>> = HashMap::new();
    for row in rows {
        map.entry(row.product_id).or_default().push(row.into());
    }

    Ok(map)
}

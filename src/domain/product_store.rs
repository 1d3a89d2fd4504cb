use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of one store-specific sale price owned by a product.
///
/// Carries only the ids of its product and store; callers resolve the related
/// records by lookup when they need them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductStore {
    /// Unique identifier of the association record.
    pub id: i32,
    /// Identifier of the owning product.
    pub product_id: i32,
    /// Identifier of the store this price applies to.
    pub store_id: i32,
    /// Sale price in the smallest currency unit (cents).
    pub sale_price_cents: i64,
    /// Timestamp for when the association record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the association record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new store price for a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProductStore {
    /// Identifier of the owning product.
    pub product_id: i32,
    /// Identifier of the store this price applies to.
    pub store_id: i32,
    /// Sale price in the smallest currency unit (cents).
    pub sale_price_cents: i64,
}

impl NewProductStore {
    /// Construct a new association payload between a product and a store.
    pub fn new(product_id: i32, store_id: i32, sale_price_cents: i64) -> Self {
        Self {
            product_id,
            store_id,
            sale_price_cents,
        }
    }
}

/// Patch data applied when updating an existing store price. Slots left as
/// `None` keep their persisted value.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProductStore {
    /// Optional store reassignment.
    pub store_id: Option<i32>,
    /// Optional price update in the smallest currency unit.
    pub sale_price_cents: Option<i64>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProductStore {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            store_id: None,
            sale_price_cents: None,
            updated_at: now,
        }
    }

    /// Reassign the price to another store.
    pub fn store_id(mut self, store_id: i32) -> Self {
        self.store_id = Some(store_id);
        self
    }

    /// Update the sale price.
    pub fn sale_price_cents(mut self, sale_price_cents: i64) -> Self {
        self.sale_price_cents = Some(sale_price_cents);
        self
    }
}

/// One entry of the caller-supplied desired state for a product's store prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesiredStorePrice {
    /// Identifier of the store the price should apply to.
    pub store_id: i32,
    /// Sale price in the smallest currency unit (cents).
    pub sale_price_cents: i64,
}

impl DesiredStorePrice {
    /// Construct a desired store price entry.
    pub fn new(store_id: i32, sale_price_cents: i64) -> Self {
        Self {
            store_id,
            sale_price_cents,
        }
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::product_store::ProductStore;
use crate::pagination::Pagination;

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable description shown to callers.
    pub description: String,
    /// Optional acquisition cost in the smallest currency unit (cents).
    pub cost_cents: Option<i64>,
    /// Optional raw image bytes. Exposed to callers only as a derived base64
    /// string, never stored in encoded form.
    pub image: Option<Vec<u8>>,
    /// Store-specific sale prices owned by this product.
    pub product_stores: Vec<ProductStore>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Human-readable description shown to callers.
    pub description: String,
    /// Optional acquisition cost in the smallest currency unit (cents).
    pub cost_cents: Option<i64>,
    /// Optional raw image bytes.
    pub image: Option<Vec<u8>>,
}

impl NewProduct {
    /// Build a new product payload with the supplied description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            cost_cents: None,
            image: None,
        }
    }

    /// Attach an acquisition cost to the product payload.
    pub fn with_cost_cents(mut self, cost_cents: i64) -> Self {
        self.cost_cents = Some(cost_cents);
        self
    }

    /// Attach raw image bytes to the product payload.
    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }
}

/// Patch data applied when updating an existing product. Slots left as `None`
/// keep their persisted value.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    /// Optional description update.
    pub description: Option<String>,
    /// Optional cost update in the smallest currency unit.
    pub cost_cents: Option<i64>,
    /// Optional replacement image; the existing image is kept when absent.
    pub image: Option<Vec<u8>>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            description: None,
            cost_cents: None,
            image: None,
            updated_at: now,
        }
    }

    /// Update the product description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Update the product cost.
    pub fn cost_cents(mut self, cost_cents: i64) -> Self {
        self.cost_cents = Some(cost_cents);
        self
    }

    /// Replace the product image.
    pub fn image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }
}

/// Query definition used to filter and paginate the product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Optional exact id filter.
    pub id: Option<i32>,
    /// Optional case-insensitive substring filter on the description.
    pub description: Option<String>,
    /// Optional exact cost filter in the smallest currency unit.
    pub cost_cents: Option<i64>,
    /// Optional exact sale price filter matched against the product's store
    /// prices through the association table.
    pub sale_price_cents: Option<i64>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    /// Construct a query that targets all products.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results to the product with the exact `id`.
    pub fn id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    /// Filter the results by a substring of the description.
    pub fn description(mut self, term: impl Into<String>) -> Self {
        self.description = Some(term.into());
        self
    }

    /// Filter the results by an exact cost.
    pub fn cost_cents(mut self, cost_cents: i64) -> Self {
        self.cost_cents = Some(cost_cents);
        self
    }

    /// Filter the results to products with a store price of exactly this amount.
    pub fn sale_price_cents(mut self, sale_price_cents: i64) -> Self {
        self.sale_price_cents = Some(sale_price_cents);
        self
    }

    /// Apply pagination to the query.
    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

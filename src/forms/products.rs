use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, ProductListQuery, UpdateProduct};
use crate::domain::product_store::DesiredStorePrice;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Pagination, SortOrder};

/// Maximum allowed length for a product description.
const DESCRIPTION_MAX_LEN: u64 = 60;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product request payloads.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided description is empty after trimming.
    #[error("product description cannot be empty")]
    EmptyDescription,
    /// The image payload is not valid base64.
    #[error("image is not valid base64: {0}")]
    InvalidImage(#[from] base64::DecodeError),
}

/// One desired store price carried by a product payload.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StorePriceForm {
    /// Store the price applies to.
    pub store_id: i32,
    /// Sale price as a decimal currency value.
    #[validate(range(min = 0.0))]
    pub sale_price: f64,
}

impl StorePriceForm {
    fn into_desired(self) -> DesiredStorePrice {
        DesiredStorePrice::new(self.store_id, to_cents(self.sale_price))
    }
}

/// Validated payload produced from a create request.
#[derive(Debug)]
pub struct NewProductPayload {
    /// Scalar product fields ready for insertion.
    pub product: NewProduct,
    /// Desired store prices to attach after the product row exists.
    pub associations: Vec<DesiredStorePrice>,
}

/// Body accepted when creating a product.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductForm {
    #[validate(length(min = 1, max = DESCRIPTION_MAX_LEN))]
    pub description: String,
    /// Optional acquisition cost as a decimal currency value.
    pub cost: Option<f64>,
    /// Optional base64-encoded image payload.
    pub image: Option<String>,
    /// Desired store prices; the catalog service rejects an empty list.
    #[validate(nested)]
    #[serde(default)]
    pub desired_associations: Vec<StorePriceForm>,
}

impl CreateProductForm {
    /// Validates and converts the payload into domain types, decoding the
    /// image from its transport encoding.
    pub fn into_new_product(self) -> ProductFormResult<NewProductPayload> {
        self.validate()?;

        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(ProductFormError::EmptyDescription);
        }

        let mut product = NewProduct::new(description);

        if let Some(cost) = self.cost {
            product = product.with_cost_cents(to_cents(cost));
        }

        if let Some(image) = self.image.as_deref() {
            product = product.with_image(BASE64.decode(image)?);
        }

        let associations = self
            .desired_associations
            .into_iter()
            .map(StorePriceForm::into_desired)
            .collect();

        Ok(NewProductPayload {
            product,
            associations,
        })
    }
}

/// Body accepted when updating a product. Absent fields leave the persisted
/// value untouched.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductForm {
    #[validate(length(min = 1, max = DESCRIPTION_MAX_LEN))]
    pub description: Option<String>,
    /// Optional cost update as a decimal currency value.
    pub cost: Option<f64>,
    /// Optional replacement image, base64-encoded.
    pub image: Option<String>,
    /// When present, the full desired set of store prices; `None` leaves the
    /// existing associations untouched.
    #[validate(nested)]
    pub desired_associations: Option<Vec<StorePriceForm>>,
}

impl UpdateProductForm {
    /// Validates and converts the payload into a scalar patch plus the
    /// optional desired association set.
    pub fn into_update_product(
        self,
    ) -> ProductFormResult<(UpdateProduct, Option<Vec<DesiredStorePrice>>)> {
        self.validate()?;

        let mut updates = UpdateProduct::new();

        if let Some(description) = self.description {
            let trimmed = description.trim().to_string();
            if trimmed.is_empty() {
                return Err(ProductFormError::EmptyDescription);
            }
            updates = updates.description(trimmed);
        }

        if let Some(cost) = self.cost {
            updates = updates.cost_cents(to_cents(cost));
        }

        if let Some(image) = self.image.as_deref() {
            updates = updates.image(BASE64.decode(image)?);
        }

        let desired = self.desired_associations.map(|entries| {
            entries
                .into_iter()
                .map(StorePriceForm::into_desired)
                .collect()
        });

        Ok((updates, desired))
    }
}

/// Query parameters accepted by the product listing.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQuery {
    /// Optional exact id filter.
    pub id: Option<i32>,
    /// Optional description substring filter.
    pub description: Option<String>,
    /// Optional exact cost filter as a decimal currency value.
    pub cost: Option<f64>,
    /// Optional exact sale price filter matched through the associations.
    pub sale_price: Option<f64>,
    /// Page requested by the caller (1-based).
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    /// Page size; zero is rejected.
    #[validate(range(min = 1))]
    pub limit: Option<usize>,
    /// Optional product attribute to order by.
    pub sort_by: Option<String>,
    /// Sort direction applied when `sort_by` is present.
    pub order: Option<SortOrder>,
}

impl ProductsQuery {
    /// Validates the parameters and splits them into the repository filter
    /// query and the pagination that produced it.
    pub fn into_parts(self) -> ProductFormResult<(ProductListQuery, Pagination)> {
        self.validate()?;

        let mut pagination = Pagination::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(DEFAULT_ITEMS_PER_PAGE),
        );
        pagination.sort_by = self.sort_by;
        pagination.order = self.order.unwrap_or_default();

        let mut list_query = ProductListQuery::new();

        if let Some(id) = self.id {
            list_query = list_query.id(id);
        }

        if let Some(term) = self.description {
            list_query = list_query.description(term);
        }

        if let Some(cost) = self.cost {
            list_query = list_query.cost_cents(to_cents(cost));
        }

        if let Some(price) = self.sale_price {
            list_query = list_query.sale_price_cents(to_cents(price));
        }

        Ok((list_query.paginate(pagination.clone()), pagination))
    }
}

/// Convert a decimal currency value into integer cents.
pub(crate) fn to_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::store::{NewStore, StoreListQuery, UpdateStore};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Pagination, SortOrder};

/// Maximum allowed length for a store description.
const DESCRIPTION_MAX_LEN: u64 = 60;

/// Result type returned by the store form helpers.
pub type StoreFormResult<T> = Result<T, StoreFormError>;

/// Errors that can occur while processing store request payloads.
#[derive(Debug, Error)]
pub enum StoreFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided description is empty after trimming.
    #[error("store description cannot be empty")]
    EmptyDescription,
}

/// Body accepted when creating a store.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStoreForm {
    #[validate(length(min = 1, max = DESCRIPTION_MAX_LEN))]
    pub description: String,
}

impl CreateStoreForm {
    /// Validates and converts the payload into a domain `NewStore`.
    pub fn into_new_store(self) -> StoreFormResult<NewStore> {
        self.validate()?;

        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(StoreFormError::EmptyDescription);
        }

        Ok(NewStore::new(description))
    }
}

/// Body accepted when updating a store. The description is required, matching
/// the create shape.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStoreForm {
    #[validate(length(min = 1, max = DESCRIPTION_MAX_LEN))]
    pub description: String,
}

impl UpdateStoreForm {
    /// Validates and converts the payload into a domain `UpdateStore`.
    pub fn into_update_store(self) -> StoreFormResult<UpdateStore> {
        self.validate()?;

        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(StoreFormError::EmptyDescription);
        }

        Ok(UpdateStore::new(description))
    }
}

/// Query parameters accepted by the store listing.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StoresQuery {
    /// Free-text filter matched against the description, or the id when the
    /// term is numeric.
    pub filter: Option<String>,
    /// Page requested by the caller (1-based).
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    /// Page size; zero is rejected.
    #[validate(range(min = 1))]
    pub limit: Option<usize>,
    /// Optional store attribute to order by.
    pub sort_by: Option<String>,
    /// Sort direction applied when `sort_by` is present.
    pub order: Option<SortOrder>,
}

impl StoresQuery {
    /// Validates the parameters and splits them into the repository filter
    /// query and the pagination that produced it.
    pub fn into_parts(self) -> StoreFormResult<(StoreListQuery, Pagination)> {
        self.validate()?;

        let mut pagination = Pagination::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(DEFAULT_ITEMS_PER_PAGE),
        );
        pagination.sort_by = self.sort_by;
        pagination.order = self.order.unwrap_or_default();

        let mut list_query = StoreListQuery::new();

        if let Some(term) = self.filter {
            list_query = list_query.filter(term);
        }

        Ok((list_query.paginate(pagination.clone()), pagination))
    }
}

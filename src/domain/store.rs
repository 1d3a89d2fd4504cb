use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Domain representation of a store products can be priced for.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Store {
    /// Unique identifier of the store.
    pub id: i32,
    /// Human-readable description shown to callers.
    pub description: String,
    /// Timestamp for when the store record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the store record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new store.
#[derive(Debug, Clone)]
pub struct NewStore {
    /// Human-readable description shown to callers.
    pub description: String,
}

impl NewStore {
    /// Build a new store payload with the supplied description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Replacement data applied when updating an existing store.
#[derive(Debug, Clone)]
pub struct UpdateStore {
    /// New description for the store.
    pub description: String,
    /// Timestamp captured when the update was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateStore {
    /// Build an update payload with the supplied description.
    pub fn new(description: impl Into<String>) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            description: description.into(),
            updated_at: now,
        }
    }
}

/// Query definition used to filter and paginate the store listing.
#[derive(Debug, Clone, Default)]
pub struct StoreListQuery {
    /// Free-text filter: matches the description as a case-insensitive
    /// substring, or the id exactly when the term parses as an integer.
    pub filter: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl StoreListQuery {
    /// Construct a query that targets all stores.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by a free-text term.
    pub fn filter(mut self, term: impl Into<String>) -> Self {
        self.filter = Some(term.into());
        self
    }

    /// Apply pagination to the query.
    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

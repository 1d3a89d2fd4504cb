use serde::{Deserialize, Serialize};

/// Page size applied when a listing request does not specify one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Sort direction accepted and echoed back by paginated listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

/// Pagination options applied to a listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Requested page, 1-based. Must be at least 1; request validation rejects 0.
    pub page: usize,
    /// Page size. Must be at least 1; request validation rejects 0.
    pub per_page: usize,
    /// Attribute of the primary entity to order by. Names the repository does
    /// not recognize skip ordering instead of failing.
    pub sort_by: Option<String>,
    /// Direction applied when `sort_by` is present.
    pub order: SortOrder,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_ITEMS_PER_PAGE)
    }
}

impl Pagination {
    /// Pagination without ordering.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page,
            per_page,
            sort_by: None,
            order: SortOrder::default(),
        }
    }

    /// Order the results by `sort_by` in the given direction.
    pub fn sort(mut self, sort_by: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(sort_by.into());
        self.order = order;
        self
    }

    /// Number of rows to skip before the requested page starts.
    pub fn offset(&self) -> i64 {
        ((self.page.max(1) - 1) * self.per_page) as i64
    }

    /// Maximum number of rows on the requested page.
    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

/// Metadata envelope returned alongside a page of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_items: usize,
    pub items_per_page: usize,
    pub current_page: usize,
    pub total_pages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    pub order: SortOrder,
}

/// One page of results together with its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    /// Wrap a page of `items` with metadata derived from the total count and
    /// the pagination that produced it.
    pub fn new(items: Vec<T>, total_items: usize, pagination: &Pagination) -> Self {
        let meta = PageMeta {
            total_items,
            items_per_page: pagination.per_page,
            current_page: pagination.page,
            total_pages: total_items.div_ceil(pagination.per_page),
            sort_by: pagination.sort_by.clone(),
            order: pagination.order,
        };

        Self { items, meta }
    }
}

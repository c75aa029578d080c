/// Page/limit/search query handling shared by the list endpoints
///
/// # Example
///
/// ```
/// use eventdesk_shared::pagination::{PageQuery, Pagination};
///
/// let query = PageQuery { page: Some(3), limit: Some(20), search: None };
/// assert_eq!(query.offset(), 40);
///
/// let page = Pagination::new(45, &query);
/// assert_eq!(page.total_pages, 3);
/// ```

use serde::{Deserialize, Serialize};

/// Default page size
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest accepted page size
pub const MAX_LIMIT: i64 = 100;

/// List query parameters (`?page=&limit=&search=`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl PageQuery {
    /// 1-based page number, at least 1
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size clamped to `1..=MAX_LIMIT`
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Rows to skip, saturating at `i64::MAX`
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// Search term, if any non-blank one was given
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Pagination block of a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Matching rows across all pages
    pub total: i64,
    pub total_pages: i64,
    /// Page returned
    pub current: i64,
}

impl Pagination {
    pub fn new(total: i64, query: &PageQuery) -> Self {
        let limit = query.limit();

        Self {
            total,
            total_pages: (total + limit - 1) / limit,
            current: query.page(),
        }
    }
}

//! Offset pagination: `offset = (page - 1) * limit`, total page count
//! rounded up.

use serde::{Deserialize, Serialize};

/// Incoming pagination parameters. `keyword` is a substring filter where the
/// listing supports it (products); order listings carry it unused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: i64,
    pub page: i64,
    pub keyword: Option<String>,
}

impl PageRequest {
    /// Clamps `limit` and `page` to at least 1 so the offset formula stays
    /// well-defined for hostile query strings.
    pub fn new(limit: i64, page: i64, keyword: Option<String>) -> Self {
        Self {
            limit: limit.max(1),
            page: page.max(1),
            keyword,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: 10,
            page: 1,
            keyword: None,
        }
    }
}

/// One page of results plus the counts a client needs to paginate further.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub limit: i64,
    pub page: i64,
    pub total_rows: i64,
    pub total_pages: i64,
    pub keyword: Option<String>,
    #[serde(rename = "data")]
    pub rows: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(request: &PageRequest, total_rows: i64, rows: Vec<T>) -> Self {
        Self {
            limit: request.limit,
            page: request.page,
            total_rows,
            total_pages: total_pages(total_rows, request.limit),
            keyword: request.keyword.clone(),
            rows,
        }
    }
}

/// `ceil(total_rows / limit)`; zero when there are no rows.
pub fn total_pages(total_rows: i64, limit: i64) -> i64 {
    if limit <= 0 || total_rows <= 0 {
        return 0;
    }
    (total_rows + limit - 1) / limit
}

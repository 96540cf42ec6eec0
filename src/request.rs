use crate::error::SearchError;
use crate::types::SearchKind;

pub const DEFAULT_PER_PAGE: u8 = 30;
pub const MAX_PER_PAGE: u8 = 100;

/// GitHub only serves the first 1000 hits of any search.
pub const MAX_REACHABLE_RESULTS: u64 = 1000;

/// Paging and ordering parameters accepted by the search endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub page: u32,
    pub per_page: u8,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            order: None,
        }
    }
}

/// A fully described search. Built once via [`build`], never changed after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    kind: SearchKind,
    query: String,
    page: u32,
    per_page: u8,
    sort: Option<String>,
    order: Option<String>,
}

impl SearchRequest {
    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u8 {
        self.per_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn order(&self) -> Option<&str> {
        self.order.as_deref()
    }

    /// Same search, different page
    pub fn with_page(&self, page: u32) -> SearchRequest {
        SearchRequest {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Last page that can be fetched for `total_count` hits
    pub fn last_page(&self, total_count: u64) -> u32 {
        let reachable = total_count.min(MAX_REACHABLE_RESULTS);
        let per_page = u64::from(self.per_page);
        (reachable.div_ceil(per_page).max(1)) as u32
    }
}

pub fn build(
    kind: SearchKind,
    query: &str,
    options: RequestOptions,
) -> Result<SearchRequest, SearchError> {
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    Ok(SearchRequest {
        kind,
        query: query.to_string(),
        page: options.page.max(1),
        per_page: options.per_page.clamp(1, MAX_PER_PAGE),
        sort: options.sort,
        order: options.order,
    })
}

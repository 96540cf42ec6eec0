use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of GitHub search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Commits,
    Code,
    Issues,
    Repositories,
    Users,
}

impl SearchKind {
    /// Picker order
    pub const ALL: [SearchKind; 5] = [
        SearchKind::Commits,
        SearchKind::Code,
        SearchKind::Issues,
        SearchKind::Repositories,
        SearchKind::Users,
    ];

    pub fn key(&self) -> char {
        match self {
            SearchKind::Commits => 'C',
            SearchKind::Code => 'c',
            SearchKind::Issues => 'i',
            SearchKind::Repositories => 'r',
            SearchKind::Users => 'u',
        }
    }

    pub fn from_key(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == c)
    }

    /// Path segment under `/search/`
    pub fn as_api_str(&self) -> &'static str {
        match self {
            SearchKind::Commits => "commits",
            SearchKind::Code => "code",
            SearchKind::Issues => "issues",
            SearchKind::Repositories => "repositories",
            SearchKind::Users => "users",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

/// One row of a result list. `raw` is the record exactly as the API sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    pub display_name: String,
    pub detail: Option<String>,
    pub raw: serde_json::Value,
}

impl ResultItem {
    pub fn url(&self) -> Option<&str> {
        self.raw.get("html_url").and_then(|u| u.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
    pub total_count: u64,
    pub page: u32,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

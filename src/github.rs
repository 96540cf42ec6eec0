use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::SearchClient;
use crate::error::{GhsError, Result, SearchError};
use crate::request::SearchRequest;
use crate::types::{ResultItem, ResultSet, SearchKind};

const PUBLIC_API: &str = "https://api.github.com";
const PUBLIC_WEB: &str = "https://github.com";

pub struct GitHub {
    client: Octocrab,
    web_base: String,
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub")
            .field("web_base", &self.web_base)
            .finish_non_exhaustive()
    }
}

impl GitHub {
    /// `api_url` of `None` targets api.github.com; a GitHub Enterprise
    /// `https://host/api/v3` is also accepted.
    pub fn new(api_url: Option<&str>, token: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(token) = token {
            builder = builder.personal_token(token);
        }
        if let Some(url) = api_url {
            builder = builder
                .base_uri(url)
                .map_err(|e| GhsError::Config(format!("invalid api_url {url}: {e}")))?;
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            web_base: web_base_for(api_url.unwrap_or(PUBLIC_API)),
        })
    }
}

/// Web host that serves the UI for an API base URL
fn web_base_for(api_url: &str) -> String {
    let api_url = api_url.trim_end_matches('/');
    if api_url == PUBLIC_API {
        return PUBLIC_WEB.to_string();
    }
    api_url
        .strip_suffix("/api/v3")
        .unwrap_or(api_url)
        .to_string()
}

#[derive(Serialize)]
struct SearchParams<'a> {
    q: &'a str,
    page: u32,
    per_page: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<&'a str>,
}

#[derive(Deserialize)]
struct SearchPage {
    total_count: u64,
    #[serde(default)]
    items: Vec<Value>,
}

#[async_trait]
impl SearchClient for GitHub {
    fn name(&self) -> &str {
        "GitHub"
    }

    fn web_url(&self, request: &SearchRequest) -> String {
        format!(
            "{}/search?q={}&type={}",
            self.web_base,
            urlencoding::encode(request.query()),
            request.kind().as_api_str()
        )
    }

    async fn search(&self, request: &SearchRequest) -> std::result::Result<ResultSet, SearchError> {
        let route = format!("/search/{}", request.kind().as_api_str());
        let params = SearchParams {
            q: request.query(),
            page: request.page(),
            per_page: request.per_page(),
            sort: request.sort(),
            order: request.order(),
        };

        tracing::debug!(%route, query = request.query(), page = request.page(), "searching");
        let page: SearchPage = self.client.get(&route, Some(&params)).await?;

        Ok(result_set(request.kind(), page, request.page()))
    }
}

fn result_set(kind: SearchKind, page: SearchPage, page_number: u32) -> ResultSet {
    ResultSet {
        items: page
            .items
            .into_iter()
            .map(|raw| result_item(kind, raw))
            .collect(),
        total_count: page.total_count,
        page: page_number,
    }
}

fn str_at<'a>(raw: &'a Value, pointer: &str) -> Option<&'a str> {
    raw.pointer(pointer).and_then(Value::as_str)
}

/// `owner/repo` from an issue's `repository_url`
fn repo_from_api_url(url: &str) -> Option<String> {
    let mut parts = url.trim_end_matches('/').rsplit('/');
    let repo = parts.next()?;
    let owner = parts.next()?;
    Some(format!("{}/{}", owner, repo))
}

fn result_item(kind: SearchKind, raw: Value) -> ResultItem {
    let (display_name, detail) = match kind {
        SearchKind::Repositories => {
            let name = str_at(&raw, "/full_name").unwrap_or("unknown").to_string();
            let stars = raw
                .get("stargazers_count")
                .and_then(Value::as_u64)
                .unwrap_or(0);
            let detail = match str_at(&raw, "/description") {
                Some(desc) => format!("★ {}  {}", stars, desc),
                None => format!("★ {}", stars),
            };
            (name, Some(detail))
        }
        SearchKind::Users => {
            let login = str_at(&raw, "/login").unwrap_or("unknown").to_string();
            (login, str_at(&raw, "/type").map(str::to_string))
        }
        SearchKind::Issues => {
            let number = raw.get("number").and_then(Value::as_u64).unwrap_or(0);
            let title = str_at(&raw, "/title").unwrap_or_default();
            let mut parts = Vec::new();
            if let Some(state) = str_at(&raw, "/state") {
                parts.push(state.to_string());
            }
            if let Some(repo) = str_at(&raw, "/repository_url").and_then(repo_from_api_url) {
                parts.push(repo);
            }
            if let Some(age) = str_at(&raw, "/updated_at").and_then(format_age) {
                parts.push(age);
            }
            let detail = (!parts.is_empty()).then(|| parts.join(" · "));
            (format!("#{} {}", number, title), detail)
        }
        SearchKind::Code => {
            let repo = str_at(&raw, "/repository/full_name").unwrap_or("unknown");
            let path = str_at(&raw, "/path").unwrap_or_default();
            (format!("{}: {}", repo, path), None)
        }
        SearchKind::Commits => {
            let sha = str_at(&raw, "/sha").unwrap_or_default();
            let short_sha: String = sha.chars().take(7).collect();
            let message = str_at(&raw, "/commit/message")
                .and_then(|m| m.lines().next())
                .unwrap_or_default();
            let repo = str_at(&raw, "/repository/full_name");
            let author = str_at(&raw, "/author/login")
                .or_else(|| str_at(&raw, "/commit/author/name"));
            let detail = match (repo, author) {
                (Some(repo), Some(author)) => Some(format!("{} · {}", repo, author)),
                (Some(repo), None) => Some(repo.to_string()),
                (None, Some(author)) => Some(author.to_string()),
                (None, None) => None,
            };
            (format!("{} {}", short_sha, message), detail)
        }
    };

    ResultItem {
        display_name,
        detail,
        raw,
    }
}

fn format_age(timestamp: &str) -> Option<String> {
    let dt = DateTime::parse_from_rfc3339(timestamp).ok()?;
    let duration = Utc::now().signed_duration_since(dt);

    let age = if duration.num_days() > 0 {
        format!("{}d", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m", duration.num_minutes())
    } else {
        "now".to_string()
    };
    Some(age)
}

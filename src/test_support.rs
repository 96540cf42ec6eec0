use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::app::App;
use crate::client::SearchClient;
use crate::error::SearchError;
use crate::event::{Event, Key};
use crate::request::SearchRequest;
use crate::types::{ResultItem, ResultSet};

/// What the mock client answers with
#[derive(Debug, Clone)]
pub enum Reply {
    /// Items for every page, plus the total hit count
    Items(Vec<ResultItem>, u64),
    Fail(String),
    /// Never completes
    Hang,
}

#[derive(Debug)]
pub struct MockClient {
    reply: Mutex<Reply>,
    calls: Mutex<Vec<SearchRequest>>,
}

impl MockClient {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply: Mutex::new(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> Vec<SearchRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchClient for MockClient {
    fn name(&self) -> &str {
        "Mock"
    }

    fn web_url(&self, request: &SearchRequest) -> String {
        format!("https://example.test/search?q={}", request.query())
    }

    async fn search(&self, request: &SearchRequest) -> Result<ResultSet, SearchError> {
        self.calls.lock().unwrap().push(request.clone());
        let reply = self.reply.lock().unwrap().clone();
        match reply {
            Reply::Items(items, total_count) => Ok(ResultSet {
                items,
                total_count,
                page: request.page(),
            }),
            Reply::Fail(msg) => Err(SearchError::Client(msg)),
            Reply::Hang => std::future::pending().await,
        }
    }
}

pub fn item(name: &str) -> ResultItem {
    ResultItem {
        display_name: name.to_string(),
        detail: Some(format!("about {}", name)),
        raw: json!({
            "full_name": name,
            "html_url": format!("https://github.com/{}", name),
        }),
    }
}

pub fn press(app: &mut App, key: Key) {
    let action = app.handle_event(Event::Key(key));
    app.update(action);
}

pub fn type_str(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, Key::Char(c));
    }
}

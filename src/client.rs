use async_trait::async_trait;

use crate::error::SearchError;
use crate::request::SearchRequest;
use crate::types::ResultSet;

#[async_trait]
pub trait SearchClient: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// Browser URL showing the same search
    fn web_url(&self, request: &SearchRequest) -> String;

    async fn search(&self, request: &SearchRequest) -> Result<ResultSet, SearchError>;
}

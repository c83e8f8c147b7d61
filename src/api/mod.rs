pub mod http_api;

use async_trait::async_trait;

use crate::app::FetchError;
use crate::domain::{Article, SearchResult};

pub use http_api::HttpNewsApi;

/// The backend consumed by the client: an article listing and a
/// search/summarization endpoint.
#[async_trait]
pub trait NewsApi: Send + Sync {
    /// `GET /articles`
    async fn list_articles(&self) -> Result<Vec<Article>, FetchError>;

    /// `GET /search?query=<encoded>`. A blank query or an absent result
    /// yields [`FetchError::EmptyResult`].
    async fn search(&self, query: &str) -> Result<SearchResult, FetchError>;
}

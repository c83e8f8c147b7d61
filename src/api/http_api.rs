use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::api::NewsApi;
use crate::app::{FetchError, Result};
use crate::config::ApiConfig;
use crate::domain::{Article, SearchResult};
use crate::routing::codec::{QueryCodec, QUERY_PARAM};

pub struct HttpNewsApi {
    client: Client,
    base_url: Url,
}

impl HttpNewsApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("clarity/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&config.base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, relative: &str) -> std::result::Result<Url, FetchError> {
        self.base_url
            .join(relative)
            .map_err(|e| FetchError::NetworkFailure(format!("invalid endpoint {}: {}", relative, e)))
    }

    async fn get(&self, url: Url) -> std::result::Result<Response, FetchError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }
        Ok(response)
    }
}

/// Ensure the base URL ends with a slash so relative joins keep any path prefix.
fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl NewsApi for HttpNewsApi {
    async fn list_articles(&self) -> std::result::Result<Vec<Article>, FetchError> {
        let url = self.endpoint("articles")?;
        let articles = self.get(url).await?.json::<Vec<Article>>().await?;
        Ok(articles)
    }

    async fn search(&self, query: &str) -> std::result::Result<SearchResult, FetchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FetchError::EmptyResult);
        }

        let url = self.endpoint(&format!(
            "search?{}={}",
            QUERY_PARAM,
            QueryCodec::encode(query)
        ))?;

        // The backend answers `null` when it has nothing for the query.
        let result = self.get(url).await?.json::<Option<SearchResult>>().await?;
        result.ok_or(FetchError::EmptyResult)
    }
}

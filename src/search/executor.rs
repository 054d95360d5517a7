//! Store-facing search execution

use crate::search::config::SearchConfig;
use crate::search::error::{SearchError, SearchResult};
use crate::search::response::{RawGetResponse, RawSearchResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;

/// Runs search bodies against a document store
#[async_trait]
pub trait SearchExecutor: Send + Sync {
    /// Execute a search body against `index`
    async fn search(&self, index: &str, body: &serde_json::Value) -> SearchResult<RawSearchResponse>;

    /// Fetch one document's source by id; `None` when it does not exist
    async fn get_source(&self, index: &str, id: &str) -> SearchResult<Option<serde_json::Value>>;
}

/// Elasticsearch over its HTTP API
#[derive(Clone)]
pub struct ElasticsearchExecutor {
    client: Client,
    base_url: Url,
    credentials: Option<(String, String)>,
}

impl ElasticsearchExecutor {
    pub fn new(config: &SearchConfig) -> SearchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                SearchError::InvalidConfiguration(format!("Failed to create HTTP client: {}", e))
            })?;

        let credentials = match (&config.username, &config.password_env) {
            (Some(username), Some(password_env)) => {
                let password = std::env::var(password_env).map_err(|_| {
                    SearchError::InvalidConfiguration(format!(
                        "Password environment variable {} is not set",
                        password_env
                    ))
                })?;
                Some((username.clone(), password))
            }
            (Some(username), None) => Some((username.clone(), String::new())),
            (None, _) => None,
        };

        let base_url = Url::parse(&config.url).map_err(|e| {
            SearchError::InvalidConfiguration(format!("Invalid store URL {}: {}", config.url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SearchError::InvalidConfiguration(format!(
                "Store URL {} cannot be used as a base",
                config.url
            )));
        }

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Appends percent-encoded path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.credentials {
            Some((username, password)) => builder.basic_auth(username, Some(password)),
            None => builder,
        }
    }
}

#[async_trait]
impl SearchExecutor for ElasticsearchExecutor {
    #[tracing::instrument(level = "debug", skip_all, fields(index = %index))]
    async fn search(&self, index: &str, body: &serde_json::Value) -> SearchResult<RawSearchResponse> {
        let url = self.endpoint(&[index, "_search"]);
        tracing::debug!(body = %body, "Executing search");

        let response = self
            .request(reqwest::Method::POST, url)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Search rejected by store");
            return Err(SearchError::Store(format!(
                "Search on {} failed with {}: {}",
                index, status, text
            )));
        }

        let raw: RawSearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(format!("Malformed search response: {}", e)))?;

        tracing::debug!(took_ms = raw.took, timed_out = raw.timed_out, "Search completed");
        Ok(raw)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(index = %index, id = %id))]
    async fn get_source(&self, index: &str, id: &str) -> SearchResult<Option<serde_json::Value>> {
        let url = self.endpoint(&[index, "_doc", id]);

        let response = self.request(reqwest::Method::GET, url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SearchError::Store(format!(
                "Get {}/{} failed with {}: {}",
                index, id, status, text
            )));
        }

        let raw: RawGetResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(format!("Malformed get response: {}", e)))?;

        if !raw.found {
            return Ok(None);
        }
        Ok(raw.source)
    }
}

//! Main search service implementation

use crate::models::Alert;
use crate::search::assembler::{AlertsResults, InfoResults};
use crate::search::config::SearchConfig;
use crate::search::error::{SearchError, SearchResult};
use crate::search::executor::{ElasticsearchExecutor, SearchExecutor};
use crate::search::filter::FilterSpec;
use crate::search::kind::{AlertKind, FinderKind, InfoKind};
use crate::search::request::SearchRequest;
use std::sync::Arc;

/// Compiles filters, runs them against the store and assembles the results.
///
/// Holds no per-request state; one instance serves concurrent requests.
#[derive(Clone)]
pub struct SearchService {
    executor: Arc<dyn SearchExecutor>,
    config: SearchConfig,
}

impl SearchService {
    pub fn new(executor: Arc<dyn SearchExecutor>, config: SearchConfig) -> Self {
        Self { executor, config }
    }

    /// Service backed by the Elasticsearch HTTP API
    pub fn elasticsearch(config: SearchConfig) -> SearchResult<Self> {
        let executor = ElasticsearchExecutor::new(&config)?;
        Ok(Self::new(Arc::new(executor), config))
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run `spec` against documents of kind `K`
    #[tracing::instrument(level = "info", skip_all, fields(kind = K::NAME))]
    pub async fn find<K: FinderKind>(&self, spec: &FilterSpec) -> SearchResult<K::Results> {
        let request = SearchRequest::build::<K>(spec);
        let body = request.to_json();

        let raw = self.executor.search(K::index(&self.config), &body).await?;
        let returned = raw.hits.hits.len();
        let total = raw.hits.total_value();

        let results = K::assemble(raw)?;
        tracing::info!(total, returned, "Search finished");

        Ok(results)
    }

    /// Alerts with the information blocks and areas that matched
    pub async fn search_alerts(&self, spec: &FilterSpec) -> SearchResult<AlertsResults> {
        self.find::<AlertKind>(spec).await
    }

    /// Matching information blocks, one hit each
    pub async fn search_infos(&self, spec: &FilterSpec) -> SearchResult<InfoResults> {
        self.find::<InfoKind>(spec).await
    }

    /// Fetch one alert by document id
    #[tracing::instrument(level = "info", skip(self))]
    pub async fn get_alert(&self, id: &str) -> SearchResult<Alert> {
        let source = self
            .executor
            .get_source(&self.config.alerts_index, id)
            .await?
            .ok_or_else(|| SearchError::NotFound(format!("Alert {} not found", id)))?;

        serde_json::from_value(source)
            .map_err(|e| SearchError::Decode(format!("Alert {} could not be decoded: {}", id, e)))
    }
}

//! Common test utilities for search testing
//!
//! Provides a canned [`SearchExecutor`] that records every request body and
//! replays fixed store responses, plus CAP document fixtures.

#![allow(dead_code)]

use async_trait::async_trait;
use cap_alert_search::search::{
    RawSearchResponse, SearchConfig, SearchError, SearchExecutor, SearchResult, SearchService,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Replays one canned search response and a fixed set of documents
#[derive(Default)]
pub struct CannedExecutor {
    search_response: Option<Value>,
    search_error: Option<String>,
    documents: HashMap<String, Value>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl CannedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_response(mut self, response: Value) -> Self {
        self.search_response = Some(response);
        self
    }

    /// Every search fails as if the store rejected it
    pub fn with_store_failure(mut self, message: &str) -> Self {
        self.search_error = Some(message.to_string());
        self
    }

    pub fn with_document(mut self, id: &str, source: Value) -> Self {
        self.documents.insert(id.to_string(), source);
        self
    }

    /// `(index, body)` of every search seen so far
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> Value {
        self.requests()
            .last()
            .map(|(_, body)| body.clone())
            .expect("no search was executed")
    }
}

#[async_trait]
impl SearchExecutor for CannedExecutor {
    async fn search(&self, index: &str, body: &Value) -> SearchResult<RawSearchResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((index.to_string(), body.clone()));

        if let Some(message) = &self.search_error {
            return Err(SearchError::Store(message.clone()));
        }

        let response = self.search_response.clone().unwrap_or_else(empty_response);
        serde_json::from_value(response).map_err(|e| SearchError::Decode(e.to_string()))
    }

    async fn get_source(&self, _index: &str, id: &str) -> SearchResult<Option<Value>> {
        Ok(self.documents.get(id).cloned())
    }
}

/// Service over `executor`, returning the executor for later inspection
pub fn service_with(executor: CannedExecutor) -> (SearchService, Arc<CannedExecutor>) {
    let executor = Arc::new(executor);
    let service = SearchService::new(executor.clone(), SearchConfig::default());
    (service, executor)
}

pub fn empty_response() -> Value {
    json!({
        "took": 1,
        "timed_out": false,
        "hits": { "total": { "value": 0, "relation": "eq" }, "hits": [] }
    })
}

pub fn area(description: &str) -> Value {
    json!({
        "description": description,
        "polygons": {
            "type": "polygon",
            "coordinates": [[[-76.0, 45.0], [-75.0, 45.0], [-75.0, 46.0], [-76.0, 46.0], [-76.0, 45.0]]]
        }
    })
}

pub fn info(language: &str, severity: &str, areas: Vec<Value>) -> Value {
    json!({
        "language": language,
        "categories": ["Met"],
        "event": "Winter storm",
        "urgency": "Expected",
        "severity": severity,
        "certainty": "Likely",
        "expires": "2024-01-02T00:00:00-05:00",
        "headline": "Winter storm warning",
        "areas": areas
    })
}

pub fn alert(identifier: &str, infos: Vec<Value>) -> Value {
    json!({
        "identifier": identifier,
        "sender": "cap-pac@canada.ca",
        "sent": "2024-01-01T10:00:00-05:00",
        "status": "Actual",
        "message_type": "Alert",
        "scope": "Public",
        "infos": infos
    })
}

/// An alert with three information blocks of two areas each
pub fn storm_alert(identifier: &str) -> Value {
    alert(
        identifier,
        vec![
            info("en-CA", "Moderate", vec![area("Ottawa"), area("Gatineau")]),
            info("fr-CA", "Moderate", vec![area("Ottawa"), area("Gatineau")]),
            info("en-CA", "Extreme", vec![area("Kingston"), area("Ottawa")]),
        ],
    )
}

/// Inner hit for the info block at `info_offset`, carrying area hits at `area_offsets`
pub fn info_inner_hit(info_offset: usize, area_offsets: &[usize]) -> Value {
    let areas = area_offsets
        .iter()
        .map(|offset| {
            json!({
                "_index": "alerts",
                "_id": "ignored",
                "_nested": {
                    "field": "infos",
                    "offset": info_offset,
                    "_nested": { "field": "areas", "offset": offset }
                },
                "_score": 1.0
            })
        })
        .collect::<Vec<_>>();

    json!({
        "_index": "alerts",
        "_id": "ignored",
        "_nested": { "field": "infos", "offset": info_offset },
        "_score": 1.0,
        "inner_hits": {
            "infos.areas": {
                "hits": {
                    "total": { "value": areas.len(), "relation": "eq" },
                    "hits": areas
                }
            }
        }
    })
}

pub fn alert_hit(id: &str, source: Value, info_hits: Vec<Value>) -> Value {
    json!({
        "_index": "alerts",
        "_id": id,
        "_score": 2.5,
        "_source": source,
        "inner_hits": {
            "infos": {
                "hits": {
                    "total": { "value": info_hits.len(), "relation": "eq" },
                    "hits": info_hits
                }
            }
        }
    })
}

pub fn search_response(total: u64, hits: Vec<Value>) -> Value {
    json!({
        "took": 3,
        "timed_out": false,
        "hits": {
            "total": { "value": total, "relation": "eq" },
            "max_score": 2.5,
            "hits": hits
        }
    })
}

//! Rebuilds alert -> info -> area hit structure from flat store responses

use crate::models::{Alert, Info};
use crate::search::error::{SearchError, SearchResult};
use crate::search::response::{RawHit, RawSearchResponse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A matched information block, identified by its offset in the alert
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoHit {
    /// Offsets of matched areas within the block, in store order.
    /// Empty when no area filter was applied.
    pub area_hits: Vec<usize>,
}

/// A matched alert and the information blocks that satisfied the filters.
///
/// `info_hits` is empty when no information-level filter was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertHit {
    pub alert: Alert,
    pub info_hits: BTreeMap<usize, InfoHit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertsResults {
    /// Total matches in the store; may exceed `hits.len()`
    pub total: u64,
    pub hits: Vec<AlertHit>,
}

/// A matched information-index document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoMatch {
    pub id: String,
    pub alert_id: String,
    pub info: Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoResults {
    pub total_hits: u64,
    pub hits: Vec<InfoMatch>,
}

#[derive(Deserialize)]
struct InfoSource {
    alert_id: String,
    #[serde(flatten)]
    info: Info,
}

/// Turns raw store responses into result values.
///
/// Any undecodable hit fails the whole response.
pub struct ResultAssembler;

impl ResultAssembler {
    pub fn alerts(
        response: RawSearchResponse,
        info_path: &str,
        area_path: &str,
    ) -> SearchResult<AlertsResults> {
        let total = response.hits.total_value();
        let hits = response
            .hits
            .hits
            .into_iter()
            .map(|hit| Self::alert_hit(hit, info_path, area_path))
            .collect::<SearchResult<Vec<_>>>()?;

        Ok(AlertsResults { total, hits })
    }

    pub fn infos(response: RawSearchResponse) -> SearchResult<InfoResults> {
        let total_hits = response.hits.total_value();
        let hits = response
            .hits
            .hits
            .into_iter()
            .map(Self::info_match)
            .collect::<SearchResult<Vec<_>>>()?;

        Ok(InfoResults { total_hits, hits })
    }

    fn alert_hit(hit: RawHit, info_path: &str, area_path: &str) -> SearchResult<AlertHit> {
        let mut info_hits = BTreeMap::new();

        for info in hit.inner(info_path).unwrap_or_default() {
            let offset = nested_offset(info, info_path)?;
            let area_hits = info
                .inner(area_path)
                .unwrap_or_default()
                .iter()
                .map(|area| {
                    area.nested
                        .as_ref()
                        .map(|identity| identity.leaf_offset())
                        .ok_or_else(|| missing_identity(area_path))
                })
                .collect::<SearchResult<Vec<_>>>()?;

            info_hits.insert(offset, InfoHit { area_hits });
        }

        let alert = decode_source::<Alert>(&hit)?;

        Ok(AlertHit { alert, info_hits })
    }

    fn info_match(hit: RawHit) -> SearchResult<InfoMatch> {
        let source = decode_source::<InfoSource>(&hit)?;
        let id = hit
            .id
            .ok_or_else(|| SearchError::Decode("Information hit has no _id".to_string()))?;

        Ok(InfoMatch {
            id,
            alert_id: source.alert_id,
            info: source.info,
        })
    }
}

fn nested_offset(hit: &RawHit, path: &str) -> SearchResult<usize> {
    hit.nested
        .as_ref()
        .map(|identity| identity.offset)
        .ok_or_else(|| missing_identity(path))
}

fn missing_identity(path: &str) -> SearchError {
    SearchError::Decode(format!("Inner hit for '{}' has no nested identity", path))
}

fn decode_source<T: serde::de::DeserializeOwned>(hit: &RawHit) -> SearchResult<T> {
    let id = hit.id.as_deref().unwrap_or("<unknown>");
    let source = hit
        .source
        .clone()
        .ok_or_else(|| SearchError::Decode(format!("Hit {} has no _source", id)))?;

    serde_json::from_value(source)
        .map_err(|e| SearchError::Decode(format!("Hit {} could not be decoded: {}", id, e)))
}

//! Search request body

use crate::search::compiler::QueryCompiler;
use crate::search::filter::{FilterSpec, SortKey, Window};
use crate::search::kind::FinderKind;
use crate::search::query::Query;

/// Everything handed to the store for one search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: Query,
    pub window: Window,
    pub sort: Vec<SortKey>,
    pub source_excludes: Vec<String>,
}

impl SearchRequest {
    pub fn build<K: FinderKind>(spec: &FilterSpec) -> Self {
        Self {
            query: QueryCompiler::<K>::compile(spec),
            window: spec.window(),
            sort: spec.sort_keys(),
            source_excludes: K::SOURCE_EXCLUDES.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let sort = self.sort.iter().map(SortKey::to_json).collect::<Vec<_>>();

        let mut body = serde_json::json!({
            "query": self.query.to_json(),
            "sort": sort,
            "track_total_hits": true,
        });

        if !self.source_excludes.is_empty() {
            body["_source"] = serde_json::json!({ "excludes": self.source_excludes });
        }

        if let Some(from) = self.window.from {
            body["from"] = serde_json::json!(from);
        }

        if let Some(size) = self.window.size {
            body["size"] = serde_json::json!(size);
        }

        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::kind::{AlertKind, InfoKind};

    #[test]
    fn test_default_window_is_left_to_the_store() {
        let body = SearchRequest::build::<AlertKind>(&FilterSpec::new()).to_json();

        assert!(body.get("from").is_none());
        assert!(body.get("size").is_none());
        assert_eq!(body["query"], serde_json::json!({ "match_all": {} }));
        assert_eq!(body["sort"], serde_json::json!([{ "_score": { "order": "desc" } }]));
    }

    #[test]
    fn test_explicit_window() {
        let spec = FilterSpec::new().start(20).count(10);
        let body = SearchRequest::build::<AlertKind>(&spec).to_json();

        assert_eq!(body["from"], 20);
        assert_eq!(body["size"], 10);
    }

    #[test]
    fn test_sort_keys_in_order() {
        let spec = FilterSpec::new().sort(["-effective", "headline"]);
        let body = SearchRequest::build::<AlertKind>(&spec).to_json();

        assert_eq!(
            body["sort"],
            serde_json::json!([
                { "effective": { "order": "desc" } },
                { "headline": { "order": "asc" } },
            ])
        );
    }

    #[test]
    fn test_source_exclusions_per_kind() {
        let alerts = SearchRequest::build::<AlertKind>(&FilterSpec::new()).to_json();
        let infos = SearchRequest::build::<InfoKind>(&FilterSpec::new()).to_json();

        assert_eq!(
            alerts["_source"]["excludes"],
            serde_json::json!(["infos.resources.deref_uri"])
        );
        assert_eq!(infos["_source"]["excludes"], serde_json::json!(["resources.deref_uri"]));
    }
}

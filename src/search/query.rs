//! Query AST and its Elasticsearch rendering

use crate::search::filter::TimeRange;
use crate::search::geo::GeoPredicate;
use chrono::SecondsFormat;

/// Upper bound on inner hits per nested level. Matches the store's default
/// `index.max_inner_result_window`; the store otherwise reports only 3.
pub const INNER_HITS_SIZE: u64 = 100;

/// A compiled search predicate.
///
/// Every leaf that targets a field inside an array of objects must sit below
/// exactly one [`Query::Nested`] for that array, so that all leaves under it
/// are evaluated against the same element.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    MatchAll,
    ExactMatch { field: String, value: String },
    TextMatch { field: String, query: String },
    Range { field: String, range: TimeRange },
    GeoContains(GeoPredicate),
    Conjunction(Vec<Query>),
    Nested {
        path: String,
        query: Box<Query>,
        inner_hits: bool,
    },
}

impl Query {
    pub fn exact(field: impl Into<String>, value: impl Into<String>) -> Self {
        Query::ExactMatch {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn text(field: impl Into<String>, query: impl Into<String>) -> Self {
        Query::TextMatch {
            field: field.into(),
            query: query.into(),
        }
    }

    pub fn nested(path: impl Into<String>, query: Query, inner_hits: bool) -> Self {
        Query::Nested {
            path: path.into(),
            query: Box::new(query),
            inner_hits,
        }
    }

    /// A single clause stays as is; anything else becomes a conjunction
    pub fn all(mut clauses: Vec<Query>) -> Self {
        if clauses.len() == 1 {
            clauses.remove(0)
        } else {
            Query::Conjunction(clauses)
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Query::MatchAll => serde_json::json!({ "match_all": {} }),

            Query::ExactMatch { field, value } => serde_json::json!({
                "term": {
                    field.as_str(): value
                }
            }),

            Query::TextMatch { field, query } => serde_json::json!({
                "match": {
                    field.as_str(): {
                        "query": query
                    }
                }
            }),

            Query::Range { field, range } => {
                let bounds = range
                    .bounds()
                    .map(|(op, at)| {
                        (
                            op.as_ref().to_string(),
                            serde_json::Value::String(at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
                        )
                    })
                    .collect::<serde_json::Map<_, _>>();

                serde_json::json!({
                    "range": {
                        field.as_str(): bounds
                    }
                })
            }

            Query::GeoContains(predicate) => predicate.to_json(),

            Query::Conjunction(clauses) => {
                let parts = clauses.iter().map(Self::to_json).collect::<Vec<_>>();
                serde_json::json!({
                    "bool": {
                        "must": parts
                    }
                })
            }

            Query::Nested {
                path,
                query,
                inner_hits,
            } => {
                let mut nested = serde_json::json!({
                    "path": path,
                    "query": query.to_json(),
                });

                // Inner hits only report offsets, the source is never re-fetched
                if *inner_hits {
                    nested["inner_hits"] = serde_json::json!({
                        "_source": false,
                        "size": INNER_HITS_SIZE,
                    });
                }

                serde_json::json!({ "nested": nested })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::filter::RangeOp;
    use crate::search::geo::GeoPoint;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_leaf_rendering() {
        assert_eq!(
            Query::exact("status", "Actual").to_json(),
            serde_json::json!({ "term": { "status": "Actual" } })
        );
        assert_eq!(
            Query::text("infos.headline", "tornado warning").to_json(),
            serde_json::json!({ "match": { "infos.headline": { "query": "tornado warning" } } })
        );
        assert_eq!(Query::MatchAll.to_json(), serde_json::json!({ "match_all": {} }));
    }

    #[test]
    fn test_range_rendering() {
        let mut range = TimeRange::default();
        range.set(RangeOp::Gte, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
        range.set(RangeOp::Lt, Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap());

        let query = Query::Range {
            field: "infos.effective".to_string(),
            range,
        };

        assert_eq!(
            query.to_json(),
            serde_json::json!({
                "range": {
                    "infos.effective": {
                        "gte": "2024-03-01T12:00:00Z",
                        "lt": "2024-03-02T00:00:00Z",
                    }
                }
            })
        );
    }

    #[test]
    fn test_range_keeps_fractional_seconds() {
        let mut range = TimeRange::default();
        range.set(
            RangeOp::Gt,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::milliseconds(900),
        );

        let json = Query::Range {
            field: "infos.effective".to_string(),
            range,
        }
        .to_json();

        assert_eq!(json["range"]["infos.effective"]["gt"], "2024-01-01T00:00:00.900Z");
    }

    #[test]
    fn test_nested_rendering_with_inner_hits() {
        let query = Query::nested(
            "infos.areas",
            Query::GeoContains(GeoPredicate::new(
                "infos.areas.polygons",
                GeoPoint::new(45.0, -75.0).unwrap(),
            )),
            true,
        );
        let json = query.to_json();

        assert_eq!(json["nested"]["path"], "infos.areas");
        assert_eq!(json["nested"]["inner_hits"]["_source"], false);
        assert_eq!(json["nested"]["inner_hits"]["size"], INNER_HITS_SIZE);
        assert!(json["nested"]["query"]["geo_shape"].is_object());
    }

    #[test]
    fn test_nested_rendering_without_inner_hits() {
        let json = Query::nested("areas", Query::text("areas.description", "Ottawa"), false).to_json();
        assert!(json["nested"].get("inner_hits").is_none());
    }

    #[test]
    fn test_all_collapses_single_clause() {
        let single = Query::all(vec![Query::exact("scope", "Public")]);
        assert_eq!(single, Query::exact("scope", "Public"));

        let pair = Query::all(vec![Query::exact("scope", "Public"), Query::MatchAll]);
        assert!(matches!(pair, Query::Conjunction(ref c) if c.len() == 2));
    }
}

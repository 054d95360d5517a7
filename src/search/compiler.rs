//! FilterSpec -> Query compilation

use crate::search::filter::FilterSpec;
use crate::search::geo::GeoPredicate;
use crate::search::kind::FinderKind;
use crate::search::query::Query;
use std::marker::PhantomData;

/// Compiles a [`FilterSpec`] into a query for documents of kind `K`.
///
/// Information-level leaves are grouped under one nested scope and area-level
/// leaves under a second scope inside it, so every leaf in a group must hold
/// for the same array element. A flat query would let the language of one
/// block and the severity of another satisfy the filter together.
pub struct QueryCompiler<K> {
    _kind: PhantomData<K>,
}

impl<K: FinderKind> QueryCompiler<K> {
    pub fn compile(spec: &FilterSpec) -> Query {
        if spec.is_unfiltered() {
            return Query::MatchAll;
        }

        let mut must = spec
            .alert_terms()
            .iter()
            .map(|(field, value)| Query::exact(K::alert_field(*field), value))
            .collect::<Vec<_>>();

        if spec.has_info_filters() {
            let info_clauses = Self::info_clauses(spec);
            match K::INFO_PATH {
                Some(path) => must.push(Query::nested(path, Query::Conjunction(info_clauses), true)),
                None => must.extend(info_clauses),
            }
        }

        Query::Conjunction(must)
    }

    fn info_clauses(spec: &FilterSpec) -> Vec<Query> {
        let mut clauses = spec
            .info_terms()
            .iter()
            .map(|(field, value)| Query::exact(K::info_term_field(*field), value))
            .collect::<Vec<_>>();

        clauses.extend(
            spec.info_texts()
                .iter()
                .map(|(field, query)| Query::text(K::info_text_field(*field), query)),
        );

        clauses.extend(
            spec.info_ranges()
                .iter()
                .filter(|(_, range)| !range.is_empty())
                .map(|(field, range)| Query::Range {
                    field: K::info_time_field(*field),
                    range: *range,
                }),
        );

        if let Some(area) = Self::area_query(spec) {
            clauses.push(area);
        }

        clauses
    }

    fn area_query(spec: &FilterSpec) -> Option<Query> {
        let mut clauses = Vec::new();

        if let Some(point) = spec.geo_point() {
            clauses.push(Query::GeoContains(GeoPredicate::new(
                K::area_field("polygons"),
                point,
            )));
        }

        if let Some(text) = spec.area_text() {
            clauses.push(Query::text(K::area_field("description"), text));
        }

        if clauses.is_empty() {
            return None;
        }

        Some(Query::nested(
            K::AREA_PATH,
            Query::all(clauses),
            K::AREA_INNER_HITS,
        ))
    }
}

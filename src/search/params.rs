//! Inbound request parameters -> FilterSpec

use crate::search::error::{SearchError, SearchResult};
use crate::search::filter::{AlertField, FilterSpec, InfoField, RangeOp, TextField, TimeField};
use crate::search::geo::GeoPoint;
use chrono::{DateTime, Utc};

/// Builds a [`FilterSpec`] from already-split `(name, value)` pairs.
///
/// Single-valued parameters follow setter semantics, so a repeated name keeps
/// the last value. `sort` accumulates, and each value may hold a
/// comma-separated list. Unknown names are ignored.
pub fn filter_from_params<'a, I>(params: I) -> SearchResult<FilterSpec>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    params
        .into_iter()
        .try_fold(FilterSpec::new(), |spec, (name, value)| apply(spec, name, value))
}

fn apply(spec: FilterSpec, name: &str, value: &str) -> SearchResult<FilterSpec> {
    if let Ok(field) = name.parse::<AlertField>() {
        return Ok(spec.alert_term(field, value));
    }
    if let Ok(field) = name.parse::<InfoField>() {
        return Ok(spec.info_term(field, value));
    }
    if let Ok(field) = name.parse::<TextField>() {
        return Ok(spec.info_text(field, value));
    }
    if let Some((field, op)) = time_bound(name) {
        return Ok(spec.info_time(field, op, parse_time(name, value)?));
    }

    let spec = match name {
        "area" | "point" => spec.point(value.parse::<GeoPoint>()?),
        "area_desc" => spec.area_description(value),
        "from" | "start" => spec.start(parse_integer(name, value)?),
        "size" | "count" => spec.count(parse_integer(name, value)?),
        "sort" => spec.sort(value.split(',')),
        _ => {
            tracing::debug!(parameter = name, "Ignoring unknown search parameter");
            spec
        }
    };

    Ok(spec)
}

/// `effective_gte` -> (Effective, Gte)
fn time_bound(name: &str) -> Option<(TimeField, RangeOp)> {
    let (field, op) = name.rsplit_once('_')?;
    Some((field.parse().ok()?, op.parse().ok()?))
}

fn parse_time(name: &str, value: &str) -> SearchResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| SearchError::Parse(format!("Invalid {} \"{}\": {}", name, value, e)))
}

fn parse_integer(name: &str, value: &str) -> SearchResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|e| SearchError::Parse(format!("Invalid {} \"{}\": {}", name, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::filter::{SortKey, Window};
    use chrono::TimeZone;

    #[test]
    fn test_all_filters_map_to_their_slots() {
        let spec = filter_from_params([
            ("status", "Actual"),
            ("message_type", "Update"),
            ("scope", "Public"),
            ("language", "en-CA"),
            ("certainty", "Likely"),
            ("severity", "Severe"),
            ("urgency", "Expected"),
            ("headline", "wind"),
            ("description", "gusts"),
            ("instruction", "secure objects"),
            ("point", "45.4,-75.7"),
        ])
        .unwrap();

        assert_eq!(spec.alert_terms().len(), 3);
        assert_eq!(spec.info_terms().len(), 4);
        assert_eq!(spec.info_texts().len(), 3);
        assert_eq!(spec.geo_point(), Some(GeoPoint::new(45.4, -75.7).unwrap()));
    }

    #[test]
    fn test_area_is_an_alias_of_point() {
        let spec = filter_from_params([("area", "10,20")]).unwrap();
        assert_eq!(spec.geo_point(), Some(GeoPoint::new(10.0, 20.0).unwrap()));
    }

    #[test]
    fn test_repeated_parameter_keeps_last_value() {
        let spec = filter_from_params([("severity", "Minor"), ("severity", "Extreme")]).unwrap();
        assert_eq!(spec.info_terms()[&InfoField::Severity], "Extreme");
    }

    #[test]
    fn test_pagination() {
        let spec = filter_from_params([("from", "20"), ("size", "10")]).unwrap();
        assert_eq!(
            spec.window(),
            Window {
                from: Some(20),
                size: Some(10)
            }
        );

        let spec = filter_from_params([("start", "-3"), ("count", "0")]).unwrap();
        assert_eq!(spec.window(), Window::default());
    }

    #[test]
    fn test_unparseable_pagination_is_a_parse_error() {
        let err = filter_from_params([("size", "ten")]).unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn test_malformed_point_is_a_parse_error() {
        let err = filter_from_params([("point", "91,not-a-number")]).unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn test_sort_accumulates() {
        let spec = filter_from_params([("sort", "-effective,headline"), ("sort", "sent")]).unwrap();
        let fields: Vec<_> = spec
            .sort_keys()
            .into_iter()
            .map(|key| match key {
                SortKey::Field { field, ascending } => (field, ascending),
                SortKey::Relevance => panic!("unexpected relevance key"),
            })
            .collect();

        assert_eq!(
            fields,
            vec![
                ("effective".to_string(), false),
                ("headline".to_string(), true),
                ("sent".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_time_bounds() {
        let spec = filter_from_params([
            ("effective_gte", "2024-01-01T00:00:00Z"),
            ("onset_lt", "2024-01-02T00:00:00-05:00"),
        ])
        .unwrap();

        let effective = spec.info_ranges()[&TimeField::Effective];
        assert_eq!(effective.gte, Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));

        let onset = spec.info_ranges()[&TimeField::Onset];
        assert_eq!(onset.lt, Some(Utc.with_ymd_and_hms(2024, 1, 2, 5, 0, 0).unwrap()));
    }

    #[test]
    fn test_fractional_time_bound_reaches_the_query() {
        use crate::search::compiler::QueryCompiler;
        use crate::search::kind::AlertKind;

        let spec = filter_from_params([("effective_gt", "2024-01-01T00:00:00.900Z")]).unwrap();
        let json = QueryCompiler::<AlertKind>::compile(&spec).to_json();

        assert_eq!(
            json["bool"]["must"][0]["nested"]["query"]["bool"]["must"][0]["range"]["infos.effective"]["gt"],
            "2024-01-01T00:00:00.900Z"
        );
    }

    #[test]
    fn test_invalid_time_is_a_parse_error() {
        let err = filter_from_params([("expires_lte", "tomorrow")]).unwrap_err();
        assert!(matches!(err, SearchError::Parse(ref msg) if msg.contains("expires_lte")));
    }

    #[test]
    fn test_area_description_and_unknown_parameters() {
        let spec = filter_from_params([("area_desc", "Ottawa"), ("callback", "x")]).unwrap();
        assert_eq!(spec.area_text(), Some("Ottawa"));
        assert!(spec.alert_terms().is_empty());
    }
}

//! Filter accumulation, pagination and sort directives

use crate::search::geo::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{AsRefStr, Display, EnumString};

/// Exact-match fields on the alert itself
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum AlertField {
    Status,
    MessageType,
    Scope,
}

/// Exact-match fields on an information block
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum InfoField {
    Language,
    Certainty,
    Severity,
    Urgency,
}

/// Free-text fields on an information block
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum TextField {
    Headline,
    Description,
    Instruction,
}

/// Timestamp fields on an information block
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum TimeField {
    Effective,
    Expires,
    Onset,
}

/// Comparison used by a time bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum RangeOp {
    Gte,
    Gt,
    Lte,
    Lt,
}

/// Bounds on a timestamp field. Each bound is its own slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub gte: Option<DateTime<Utc>>,
    pub gt: Option<DateTime<Utc>>,
    pub lte: Option<DateTime<Utc>>,
    pub lt: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn set(&mut self, op: RangeOp, at: DateTime<Utc>) {
        let slot = match op {
            RangeOp::Gte => &mut self.gte,
            RangeOp::Gt => &mut self.gt,
            RangeOp::Lte => &mut self.lte,
            RangeOp::Lt => &mut self.lt,
        };
        *slot = Some(at);
    }

    pub fn is_empty(&self) -> bool {
        self.gte.is_none() && self.gt.is_none() && self.lte.is_none() && self.lt.is_none()
    }

    /// Bounds that are set, in gte/gt/lte/lt order
    pub fn bounds(&self) -> impl Iterator<Item = (RangeOp, DateTime<Utc>)> {
        [
            (RangeOp::Gte, self.gte),
            (RangeOp::Gt, self.gt),
            (RangeOp::Lte, self.lte),
            (RangeOp::Lt, self.lt),
        ]
        .into_iter()
        .filter_map(|(op, at)| at.map(|at| (op, at)))
    }
}

/// Pagination window. `None` leaves the store default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub from: Option<u64>,
    pub size: Option<u64>,
}

impl Window {
    /// Zero means "store default", not "return nothing"
    pub fn new(start: u64, count: u64) -> Self {
        Self {
            from: (start > 0).then_some(start),
            size: (count > 0).then_some(count),
        }
    }
}

/// One sort key as given by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    pub field: String,
    pub ascending: bool,
}

impl SortDirective {
    /// `"-effective"` sorts descending, `"headline"` ascending.
    /// Blank input yields `None`.
    pub fn parse(directive: &str) -> Option<Self> {
        let directive = directive.trim();
        let (field, ascending) = match directive.strip_prefix('-') {
            Some(field) => (field.trim(), false),
            None => (directive, true),
        };

        if field.is_empty() {
            return None;
        }

        Some(Self {
            field: field.to_string(),
            ascending,
        })
    }
}

/// Sort key handed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    /// Score, descending
    Relevance,
    Field { field: String, ascending: bool },
}

impl SortKey {
    /// Compound sort keys in directive order; relevance when none are given
    pub fn from_directives(directives: &[SortDirective]) -> Vec<SortKey> {
        if directives.is_empty() {
            return vec![SortKey::Relevance];
        }

        directives
            .iter()
            .map(|d| SortKey::Field {
                field: d.field.clone(),
                ascending: d.ascending,
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SortKey::Relevance => serde_json::json!({ "_score": { "order": "desc" } }),
            SortKey::Field { field, ascending } => serde_json::json!({
                field.as_str(): {
                    "order": if *ascending { "asc" } else { "desc" },
                }
            }),
        }
    }
}

/// Optional filter values for one search, plus pagination and sorting.
///
/// Every setter overwrites its slot; order of composition does not matter.
/// Values are opaque strings here, validating CAP enumerations is up to the
/// caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    alert_terms: BTreeMap<AlertField, String>,
    info_terms: BTreeMap<InfoField, String>,
    info_text: BTreeMap<TextField, String>,
    info_ranges: BTreeMap<TimeField, TimeRange>,
    area_text: Option<String>,
    point: Option<GeoPoint>,
    start: u64,
    count: u64,
    sort: Vec<SortDirective>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alert_term(mut self, field: AlertField, value: impl Into<String>) -> Self {
        self.alert_terms.insert(field, value.into());
        self
    }

    pub fn info_term(mut self, field: InfoField, value: impl Into<String>) -> Self {
        self.info_terms.insert(field, value.into());
        self
    }

    pub fn info_text(mut self, field: TextField, query: impl Into<String>) -> Self {
        self.info_text.insert(field, query.into());
        self
    }

    pub fn info_time(mut self, field: TimeField, op: RangeOp, at: DateTime<Utc>) -> Self {
        self.info_ranges.entry(field).or_default().set(op, at);
        self
    }

    pub fn status(self, status: impl Into<String>) -> Self {
        self.alert_term(AlertField::Status, status)
    }

    pub fn message_type(self, message_type: impl Into<String>) -> Self {
        self.alert_term(AlertField::MessageType, message_type)
    }

    pub fn scope(self, scope: impl Into<String>) -> Self {
        self.alert_term(AlertField::Scope, scope)
    }

    pub fn language(self, language: impl Into<String>) -> Self {
        self.info_term(InfoField::Language, language)
    }

    pub fn certainty(self, certainty: impl Into<String>) -> Self {
        self.info_term(InfoField::Certainty, certainty)
    }

    pub fn severity(self, severity: impl Into<String>) -> Self {
        self.info_term(InfoField::Severity, severity)
    }

    pub fn urgency(self, urgency: impl Into<String>) -> Self {
        self.info_term(InfoField::Urgency, urgency)
    }

    pub fn headline(self, headline: impl Into<String>) -> Self {
        self.info_text(TextField::Headline, headline)
    }

    pub fn description(self, description: impl Into<String>) -> Self {
        self.info_text(TextField::Description, description)
    }

    pub fn instruction(self, instruction: impl Into<String>) -> Self {
        self.info_text(TextField::Instruction, instruction)
    }

    pub fn effective(self, op: RangeOp, at: DateTime<Utc>) -> Self {
        self.info_time(TimeField::Effective, op, at)
    }

    pub fn expires(self, op: RangeOp, at: DateTime<Utc>) -> Self {
        self.info_time(TimeField::Expires, op, at)
    }

    pub fn onset(self, op: RangeOp, at: DateTime<Utc>) -> Self {
        self.info_time(TimeField::Onset, op, at)
    }

    /// Free-text match on the area description
    pub fn area_description(mut self, text: impl Into<String>) -> Self {
        self.area_text = Some(text.into());
        self
    }

    pub fn point(mut self, point: GeoPoint) -> Self {
        self.point = Some(point);
        self
    }

    /// Negative values clamp to 0, the store default
    pub fn start(mut self, start: i64) -> Self {
        self.start = start.max(0) as u64;
        self
    }

    /// Negative values clamp to 0, the store default
    pub fn count(mut self, count: i64) -> Self {
        self.count = count.max(0) as u64;
        self
    }

    /// Appends sort directives; a leading `-` means descending
    pub fn sort<I, S>(mut self, directives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sort
            .extend(directives.into_iter().filter_map(|d| SortDirective::parse(d.as_ref())));
        self
    }

    pub fn alert_terms(&self) -> &BTreeMap<AlertField, String> {
        &self.alert_terms
    }

    pub fn info_terms(&self) -> &BTreeMap<InfoField, String> {
        &self.info_terms
    }

    pub fn info_texts(&self) -> &BTreeMap<TextField, String> {
        &self.info_text
    }

    pub fn info_ranges(&self) -> &BTreeMap<TimeField, TimeRange> {
        &self.info_ranges
    }

    pub fn area_text(&self) -> Option<&str> {
        self.area_text.as_deref()
    }

    pub fn geo_point(&self) -> Option<GeoPoint> {
        self.point
    }

    pub fn window(&self) -> Window {
        Window::new(self.start, self.count)
    }

    pub fn sort_directives(&self) -> &[SortDirective] {
        &self.sort
    }

    pub fn sort_keys(&self) -> Vec<SortKey> {
        SortKey::from_directives(&self.sort)
    }

    /// Any predicate on an area element
    pub fn has_area_filters(&self) -> bool {
        self.point.is_some() || self.area_text.is_some()
    }

    /// Any predicate on an information block or one of its areas
    pub fn has_info_filters(&self) -> bool {
        !self.info_terms.is_empty()
            || !self.info_text.is_empty()
            || self.info_ranges.values().any(|r| !r.is_empty())
            || self.has_area_filters()
    }

    /// No predicate of any kind; pagination and sort do not count
    pub fn is_unfiltered(&self) -> bool {
        self.alert_terms.is_empty() && !self.has_info_filters()
    }
}

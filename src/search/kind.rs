//! Document layouts the compiler and assembler can target

use crate::search::assembler::{AlertsResults, InfoResults, ResultAssembler};
use crate::search::config::SearchConfig;
use crate::search::error::SearchResult;
use crate::search::filter::{AlertField, InfoField, TextField, TimeField};
use crate::search::response::RawSearchResponse;
use serde::Serialize;

/// Where each filter lives in the indexed document, and how hits come back.
pub trait FinderKind: Send + Sync + 'static {
    /// Used in logs and spans
    const NAME: &'static str;

    /// Nested path of information blocks, or `None` when each document is one block
    const INFO_PATH: Option<&'static str>;

    /// Nested path of areas
    const AREA_PATH: &'static str;

    /// Whether area offsets are reported back
    const AREA_INNER_HITS: bool;

    /// Large sub-fields never returned in `_source`
    const SOURCE_EXCLUDES: &'static [&'static str];

    type Results: Serialize + Send;

    fn index(config: &SearchConfig) -> &str;

    fn assemble(response: RawSearchResponse) -> SearchResult<Self::Results>;

    fn alert_field(field: AlertField) -> String {
        field.as_ref().to_string()
    }

    fn info_field(field: &str) -> String {
        match Self::INFO_PATH {
            Some(path) => format!("{}.{}", path, field),
            None => field.to_string(),
        }
    }

    fn info_term_field(field: InfoField) -> String {
        Self::info_field(field.as_ref())
    }

    fn info_text_field(field: TextField) -> String {
        Self::info_field(field.as_ref())
    }

    fn info_time_field(field: TimeField) -> String {
        Self::info_field(field.as_ref())
    }

    fn area_field(field: &str) -> String {
        format!("{}.{}", Self::AREA_PATH, field)
    }
}

const INFOS: &str = "infos";

/// Alert documents with nested `infos` and `infos.areas`
pub struct AlertKind;

impl FinderKind for AlertKind {
    const NAME: &'static str = "alerts";
    const INFO_PATH: Option<&'static str> = Some(INFOS);
    const AREA_PATH: &'static str = "infos.areas";
    const AREA_INNER_HITS: bool = true;
    const SOURCE_EXCLUDES: &'static [&'static str] = &["infos.resources.deref_uri"];

    type Results = AlertsResults;

    fn index(config: &SearchConfig) -> &str {
        &config.alerts_index
    }

    fn assemble(response: RawSearchResponse) -> SearchResult<AlertsResults> {
        ResultAssembler::alerts(response, INFOS, Self::AREA_PATH)
    }
}

/// One document per information block, alert fields copied onto it, nested `areas`
pub struct InfoKind;

impl FinderKind for InfoKind {
    const NAME: &'static str = "infos";
    const INFO_PATH: Option<&'static str> = None;
    const AREA_PATH: &'static str = "areas";
    const AREA_INNER_HITS: bool = false;
    const SOURCE_EXCLUDES: &'static [&'static str] = &["resources.deref_uri"];

    type Results = InfoResults;

    fn index(config: &SearchConfig) -> &str {
        &config.infos_index
    }

    fn assemble(response: RawSearchResponse) -> SearchResult<InfoResults> {
        ResultAssembler::infos(response)
    }
}

//! Structured search over CAP alerts stored in Elasticsearch
//!
//! This module turns a fixed set of optional filters into a single store
//! query and rebuilds the store's flat inner-hit response into the nested
//! shape of the documents:
//!
//! - **Filters**: exact match on alert fields (status, message type, scope),
//!   exact match, free text and time ranges on information blocks, point
//!   containment and description text on areas
//! - **Nesting**: information and area predicates are scoped to a single
//!   array element, so filters never match across sibling blocks
//! - **Inner hits**: each matched alert reports which information blocks and
//!   which areas within them matched, by array offset
//! - **Two layouts**: alert documents, or one document per information block
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │           FilterSpec (+ params)                  │
//! └─────────────────────────────────────────────────┘
//!                      │  QueryCompiler<K>
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │   SearchRequest: Query AST, window, sort keys   │
//! └─────────────────────────────────────────────────┘
//!                      │  SearchExecutor
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │   RawSearchResponse: hits, inner hits, offsets  │
//! └─────────────────────────────────────────────────┘
//!                      │  ResultAssembler
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │   AlertsResults { total, hits: [AlertHit] }     │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use cap_alert_search::search::{FilterSpec, GeoPoint, SearchConfig, SearchService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let search = SearchService::elasticsearch(SearchConfig::default())?;
//!
//!     let spec = FilterSpec::new()
//!         .status("Actual")
//!         .severity("Extreme")
//!         .point("45.42,-75.69".parse::<GeoPoint>()?)
//!         .count(20);
//!
//!     let results = search.search_alerts(&spec).await?;
//!     println!("Found {} alerts", results.total);
//!
//!     Ok(())
//! }
//! ```

mod assembler;
mod compiler;
mod config;
mod error;
mod executor;
mod filter;
mod geo;
mod kind;
mod params;
mod query;
mod request;
mod response;
mod service;

pub use assembler::{AlertHit, AlertsResults, InfoHit, InfoMatch, InfoResults, ResultAssembler};
pub use compiler::QueryCompiler;
pub use config::{SearchConfig, SearchConfigBuilder};
pub use error::{SearchError, SearchResult};
pub use executor::{ElasticsearchExecutor, SearchExecutor};
pub use filter::{
    AlertField, FilterSpec, InfoField, RangeOp, SortDirective, SortKey, TextField, TimeField,
    TimeRange, Window,
};
pub use geo::{GeoPoint, GeoPredicate};
pub use kind::{AlertKind, FinderKind, InfoKind};
pub use params::filter_from_params;
pub use query::{Query, INNER_HITS_SIZE};
pub use request::SearchRequest;
pub use response::{
    NestedIdentity, RawGetResponse, RawHit, RawHits, RawInnerHits, RawSearchResponse, RawTotal,
    RawTotalRelation,
};
pub use service::SearchService;

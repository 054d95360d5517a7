//! Search service for CAP alerts.
//!
//! Filters over alert, information-block and area fields are compiled into a
//! nested Elasticsearch query; matches come back as alerts annotated with the
//! offsets of the information blocks and areas that satisfied them.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod search;

pub use error::{AppError, Result};

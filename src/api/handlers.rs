use crate::api::AppState;
use crate::error::Result;
use crate::models::Alert;
use crate::search::{filter_from_params, AlertsResults, FilterSpec, InfoResults};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Query-string pairs in request order. Repeated names (`sort`) are kept.
type SearchParams = Query<Vec<(String, String)>>;

fn filter_spec(params: &[(String, String)]) -> Result<FilterSpec> {
    let spec = filter_from_params(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
    Ok(spec)
}

/// Search alerts
pub async fn search_alerts(
    State(state): State<AppState>,
    Query(params): SearchParams,
) -> Result<Json<AlertsResults>> {
    let spec = filter_spec(&params)?;
    let results = state.search.search_alerts(&spec).await?;
    Ok(Json(results))
}

/// Search information blocks
pub async fn search_infos(
    State(state): State<AppState>,
    Query(params): SearchParams,
) -> Result<Json<InfoResults>> {
    let spec = filter_spec(&params)?;
    let results = state.search.search_infos(&spec).await?;
    Ok(Json(results))
}

/// Get an alert by id
pub async fn get_alert(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Alert>> {
    let alert = state.search.get_alert(&id).await?;
    Ok(Json(alert))
}

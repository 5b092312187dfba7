//! Natural-language filtering endpoint.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use stringlens_core::{FilterSet, StoredString};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NaturalLanguageParams {
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: FilterSet,
}

#[derive(Debug, Serialize)]
pub struct NaturalLanguageResponse {
    pub data: Vec<StoredString>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

/// GET /strings/filter-by-natural-language?query=...
///
/// A query that parses but yields conflicting filters is rejected with 422
/// here, even though the parser itself reports it as a success.
pub(crate) async fn filter(
    State(state): State<AppState>,
    params: Result<Query<NaturalLanguageParams>, QueryRejection>,
) -> Result<Json<NaturalLanguageResponse>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        warn!("Rejected query string: {rejection}");
        ApiError::bad_request("Invalid query parameters").with_details(rejection.body_text())
    })?;
    let Some(query) = params.query.filter(|q| !q.is_empty()) else {
        return Err(ApiError::bad_request("Missing \"query\" parameter"));
    };

    let parsed = state.parser.parse(&query).map_err(|e| {
        ApiError::bad_request("Unable to parse natural language query").with_details(e.to_string())
    })?;
    debug!(rules = ?parsed.rules, "Interpreted query {query:?}");

    if parsed.has_conflicts() {
        return Err(
            ApiError::unprocessable("Query parsed but resulted in conflicting filters")
                .with_conflicts(parsed.conflicts.iter().map(ToString::to_string).collect()),
        );
    }

    let data = state.store.filter(&parsed.filters).await?;

    Ok(Json(NaturalLanguageResponse {
        count: data.len(),
        data,
        interpreted_query: InterpretedQuery {
            original: query,
            parsed_filters: parsed.filters,
        },
    }))
}

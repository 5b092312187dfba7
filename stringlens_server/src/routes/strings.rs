//! CRUD and explicit-filter endpoints under `/strings`.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use stringlens_core::{FilterSet, StoredString, content_hash};
use tracing::warn;

use crate::error::ApiError;
use crate::params::FilterParams;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub data: Vec<StoredString>,
    pub count: usize,
    pub filters_applied: FilterSet,
}

/// POST /strings
///
/// Analyzes and stores `{ "value": "<string>" }`.
pub(crate) async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredString>), ApiError> {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!("Rejected request body: {rejection}");
            return Err(
                ApiError::bad_request("Invalid request body").with_details(rejection.body_text())
            );
        }
    };

    let Some(fields) = body.as_object() else {
        return Err(ApiError::bad_request("Invalid request body"));
    };
    let Some(value) = fields.get("value") else {
        return Err(ApiError::bad_request(
            "Missing \"value\" field in request body",
        ));
    };
    let Some(value) = value.as_str() else {
        return Err(ApiError::unprocessable(
            "Invalid data type for \"value\" (must be string)",
        ));
    };

    if state.store.exists(&content_hash(value)).await? {
        return Err(ApiError::conflict("String already exists in the system"));
    }

    let record = state.store.insert(StoredString::new(value)).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /strings/:string_value
pub(crate) async fn get_one(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<StoredString>, ApiError> {
    let value = string_value(path)?;
    state
        .store
        .find_by_hash(&content_hash(&value))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("String does not exist in the system"))
}

/// DELETE /strings/:string_value
pub(crate) async fn delete_one(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let value = string_value(path)?;
    if state.store.delete(&content_hash(&value)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("String does not exist in the system"))
    }
}

/// GET /strings
///
/// Lists stored strings matching every supplied filter parameter.
pub(crate) async fn list(
    State(state): State<AppState>,
    query: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<ListResponse>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        warn!("Rejected query string: {rejection}");
        ApiError::bad_request("Invalid query parameters").with_details(rejection.body_text())
    })?;
    let filters = FilterSet::try_from(params)?;
    let data = state.store.filter(&filters).await?;

    Ok(Json(ListResponse {
        count: data.len(),
        data,
        filters_applied: filters,
    }))
}

fn string_value(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    path.map(|Path(value)| value).map_err(|rejection| {
        warn!("Rejected path: {rejection}");
        ApiError::bad_request("Invalid string value in path").with_details(rejection.body_text())
    })
}

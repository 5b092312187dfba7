use axum::Json;
use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use serde_json::{Value, json};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::error::{ApiError, panic_response};
use crate::state::AppState;

mod natural_language;
mod strings;

/// Build the application router.
///
/// The natural-language route is registered as a static segment, which the
/// router matches ahead of the `:string_value` capture.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/strings", get(strings::list).post(strings::create))
        .route(
            "/strings/filter-by-natural-language",
            get(natural_language::filter),
        )
        .route(
            "/strings/:string_value",
            get(strings::get_one).delete(strings::delete_one),
        )
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(log_request))
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "String Analysis API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /strings": "Create and analyze a new string",
            "GET /strings/:string_value": "Get a specific string by its value",
            "GET /strings": "Get all strings with optional filtering",
            "GET /strings/filter-by-natural-language": "Filter strings using natural language",
            "DELETE /strings/:string_value": "Delete a specific string"
        }
    }))
}

async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> ApiError {
    ApiError::not_found("The requested endpoint does not exist")
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;
    info!("{method} {path} -> {}", response.status().as_u16());
    response
}

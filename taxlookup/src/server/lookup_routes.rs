use super::log_request;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use taxlookup_core::validate::{LookupOutcome, ValidationOutcome, Validator};

const INDEX_HTML: &str = include_str!("../../assets/index.html");

#[derive(Deserialize, Debug)]
struct ValidateQuery {
    address: Option<String>,
    jurisdiction: Option<String>,
}

#[derive(Deserialize, Debug)]
struct LookupQuery {
    address: Option<String>,
}

/// the jurisdiction validation API, the manual lookup form and the
/// health check at `health_path`.
pub fn lookup_routes(validator: Arc<Validator>, health_path: &str) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/validate", get(validate))
        .route("/api/lookup", get(lookup))
        .route(health_path, get(health))
        .layer(middleware::from_fn(log_request))
        .with_state(validator)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy"}))
}

async fn validate(
    State(validator): State<Arc<Validator>>,
    query: Result<Query<ValidateQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return unprocessable(ValidationOutcome::error(&rejection.body_text()))
        }
    };
    let params = (
        required(query.address, "address"),
        required(query.jurisdiction, "jurisdiction"),
    );
    let (address, claim) = match params {
        (Ok(address), Ok(claim)) => (address, claim),
        (Err(msg), _) | (_, Err(msg)) => return unprocessable(ValidationOutcome::error(&msg)),
    };
    Json(validator.validate(&address, &claim).await).into_response()
}

async fn lookup(
    State(validator): State<Arc<Validator>>,
    query: Result<Query<LookupQuery>, QueryRejection>,
) -> Response {
    let address = query
        .map_err(|rejection| rejection.body_text())
        .and_then(|Query(query)| required(query.address, "address"));
    match address {
        Ok(address) => Json(validator.lookup(&address).await).into_response(),
        Err(msg) => unprocessable(LookupOutcome::error(&msg)),
    }
}

fn unprocessable<T: Serialize>(outcome: T) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(outcome)).into_response()
}

/// blank values count as missing.
fn required(value: Option<String>, name: &str) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(format!("missing required query parameter '{name}'")),
    }
}

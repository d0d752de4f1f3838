use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
}

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "patientql",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "graphql": patientql_graphql::GRAPHQL_PATH,
    });
    (StatusCode::OK, Json(body))
}

/// Liveness check. Does not touch storage.
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use reconview_core::{ReconciliationView, RowView};
use serde::Serialize;
use serde_json::json;

use crate::server::AppState;

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
}

#[derive(Serialize)]
struct RowsResponse<'a> {
    status: &'a str,
    rows: &'a [RowView],
}

/// The reconciliation page. Upstream failures are rendered inline, so this is always 200.
pub async fn reconciliation_page(State(state): State<AppState>) -> impl IntoResponse {
    Html(state.page.render().await)
}

/// Same data as the page, as the JSON view-model.
pub async fn reconciliation_json(State(state): State<AppState>) -> Response {
    match state.page.view().await {
        ReconciliationView::Table(rows) => (
            StatusCode::OK,
            Json(RowsResponse {
                status: "ok",
                rows: &rows,
            }),
        )
            .into_response(),
        ReconciliationView::Empty => (
            StatusCode::OK,
            Json(RowsResponse {
                status: "empty",
                rows: &[],
            }),
        )
            .into_response(),
        ReconciliationView::Failed(failure) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({
                "status": "error",
                "kind": failure.kind,
                "message": failure.message,
            })),
        )
            .into_response(),
    }
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

pub async fn readyz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ready" }))
}

pub async fn favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

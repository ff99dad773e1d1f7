use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::service::DashboardService;
use super::DashboardError;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SummaryQuery {
    center: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResidentsUpdate {
    residents: u32,
}

/// Router builder exposing the contracts dashboard.
pub fn dashboard_router(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/v1/dashboard/summary", get(summary_handler))
        .route("/api/v1/dashboard/residents/:center", put(residents_handler))
        .with_state(service)
}

pub(crate) async fn summary_handler(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<SummaryQuery>,
) -> Response {
    let center = query.center.as_deref().filter(|name| !name.trim().is_empty());
    match service.summary(center) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn residents_handler(
    State(service): State<Arc<DashboardService>>,
    Path(center): Path<String>,
    axum::Json(update): axum::Json<ResidentsUpdate>,
) -> Response {
    match service.set_residents(&center, update.residents) {
        Ok(()) => {
            let payload = json!({
                "center": center,
                "residents": update.residents,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: DashboardError) -> Response {
    let status = match &error {
        DashboardError::NotConfigured | DashboardError::UnknownCenter(_) => StatusCode::NOT_FOUND,
        DashboardError::Io(_) | DashboardError::Json(_) | DashboardError::RegistryUnavailable => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

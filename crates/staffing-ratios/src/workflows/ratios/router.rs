use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::CalculationError;
use super::report::ReportPeriod;
use super::repository::{CalculationId, ResultStore, StoreError};
use super::service::{CalculationRequest, RatioCalculationService, RatioServiceError};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportQuery {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

/// Router builder exposing the profile catalog, calculations and reports.
pub fn ratio_router<S>(service: Arc<RatioCalculationService<S>>) -> Router
where
    S: ResultStore + 'static,
{
    Router::new()
        .route("/api/v1/ratios/profiles", get(profiles_handler::<S>))
        .route("/api/v1/ratios/calculations", post(calculate_handler::<S>))
        .route(
            "/api/v1/ratios/calculations/:calculation_id",
            get(calculation_handler::<S>),
        )
        .route(
            "/api/v1/ratios/calculations/:calculation_id/report",
            get(report_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn profiles_handler<S>(
    State(service): State<Arc<RatioCalculationService<S>>>,
) -> Response
where
    S: ResultStore + 'static,
{
    (StatusCode::OK, axum::Json(service.profiles())).into_response()
}

pub(crate) async fn calculate_handler<S>(
    State(service): State<Arc<RatioCalculationService<S>>>,
    axum::Json(request): axum::Json<CalculationRequest>,
) -> Response
where
    S: ResultStore + 'static,
{
    match service.calculate(request) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn calculation_handler<S>(
    State(service): State<Arc<RatioCalculationService<S>>>,
    Path(calculation_id): Path<String>,
) -> Response
where
    S: ResultStore + 'static,
{
    match service.get(&CalculationId(calculation_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<S>(
    State(service): State<Arc<RatioCalculationService<S>>>,
    Path(calculation_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Response
where
    S: ResultStore + 'static,
{
    let today = Local::now().date_naive();
    let start = query.start.unwrap_or(today);
    let end = query.end.unwrap_or(start);

    let period = match ReportPeriod::new(start, end) {
        Ok(period) => period,
        Err(error) => return error_response(error.into()),
    };

    match service.report(&CalculationId(calculation_id), period) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: RatioServiceError) -> Response {
    let status = match &error {
        RatioServiceError::Calculation(CalculationError::InvalidPeriod { .. }) => {
            StatusCode::BAD_REQUEST
        }
        RatioServiceError::Calculation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RatioServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        RatioServiceError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        RatioServiceError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::dashboard::DashboardError;
use crate::workflows::ratios::{RatioServiceError, StoreError, TimesheetImportError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Ratio(RatioServiceError),
    Timesheet(TimesheetImportError),
    Dashboard(DashboardError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Ratio(err) => write!(f, "calculation error: {}", err),
            AppError::Timesheet(err) => write!(f, "timesheet error: {}", err),
            AppError::Dashboard(err) => write!(f, "dashboard error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Ratio(err) => Some(err),
            AppError::Timesheet(err) => Some(err),
            AppError::Dashboard(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Ratio(RatioServiceError::Calculation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Ratio(RatioServiceError::Store(StoreError::NotFound))
            | AppError::Dashboard(DashboardError::NotConfigured)
            | AppError::Dashboard(DashboardError::UnknownCenter(_)) => StatusCode::NOT_FOUND,
            AppError::Timesheet(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Ratio(_)
            | AppError::Dashboard(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<RatioServiceError> for AppError {
    fn from(value: RatioServiceError) -> Self {
        Self::Ratio(value)
    }
}

impl From<crate::workflows::ratios::CalculationError> for AppError {
    fn from(value: crate::workflows::ratios::CalculationError) -> Self {
        Self::Ratio(RatioServiceError::Calculation(value))
    }
}

impl From<TimesheetImportError> for AppError {
    fn from(value: TimesheetImportError) -> Self {
        Self::Timesheet(value)
    }
}

impl From<DashboardError> for AppError {
    fn from(value: DashboardError) -> Self {
        Self::Dashboard(value)
    }
}

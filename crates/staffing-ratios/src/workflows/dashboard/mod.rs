//! Utility and service contract costs per center, aggregated from the contracts
//! JSON export.

pub mod aggregate;
pub mod domain;
mod parser;
pub mod residents;
pub mod router;
pub mod service;

pub use aggregate::{CenterSummary, ContractLedger, ContractSummary, DashboardSummary};
pub use domain::{Contract, Invoice};
pub use residents::ResidentRegistry;
pub use router::dashboard_router;
pub use service::DashboardService;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("failed to read dashboard data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid dashboard JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no contracts file configured")]
    NotConfigured,
    #[error("unknown center '{0}'")]
    UnknownCenter(String),
    #[error("resident registry unavailable")]
    RegistryUnavailable,
}

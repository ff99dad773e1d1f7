//! Staffing ratio compliance for residential and day-care centers: EJC conversion,
//! tiered hour minimums, threshold checks and the reports built from them.

pub mod domain;
pub(crate) mod evaluation;
pub mod format;
pub mod fte;
pub mod import;
pub mod profile;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod tiers;

#[cfg(test)]
mod tests;

pub use domain::{CalculationError, CareKind, Occupancy, StaffCategory, StaffingInput};
pub use evaluation::{
    CheckKind, ComplianceCheck, ComplianceEngine, FteAggregate, FteSummary, MeasureUnit,
    RatioAssessment, StaffingDeficit, Threshold,
};
pub use import::{TimesheetImportError, TimesheetImporter};
pub use profile::{CategorySpec, ProfileDescriptor, RegulationConstants, RegulationProfile};
pub use report::{build_report, ComplianceReport, ReportPeriod};
pub use repository::{CalculationId, CalculationRecord, CalculationView, ResultStore, StoreError};
pub use router::ratio_router;
pub use service::{CalculationRequest, ProfileCatalog, RatioCalculationService, RatioServiceError};
pub use tiers::{TierRounding, TieredHours};

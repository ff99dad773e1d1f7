use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::domain::StaffingInput;
use super::evaluation::RatioAssessment;
use super::profile::RegulationProfile;

/// Identifier under which a calculation result is kept for later reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationId(pub String);

impl fmt::Display for CalculationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored result of one calculation pass, reused by the report step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: CalculationId,
    pub input: StaffingInput,
    pub assessment: RatioAssessment,
    pub calculated_at: DateTime<Utc>,
}

impl CalculationRecord {
    pub fn profile(&self) -> RegulationProfile {
        self.assessment.profile
    }

    pub fn view(&self) -> CalculationView {
        CalculationView {
            calculation_id: self.id.clone(),
            profile: self.assessment.profile,
            profile_label: self.assessment.profile.label(),
            occupancy: self.assessment.occupancy.get(),
            compliant: self.assessment.is_compliant(),
            calculated_at: self.calculated_at,
            assessment: self.assessment.clone(),
        }
    }
}

/// Storage seam for calculation results so the service can be exercised in isolation.
pub trait ResultStore: Send + Sync {
    fn insert(&self, record: CalculationRecord) -> Result<CalculationRecord, StoreError>;
    fn fetch(&self, id: &CalculationId) -> Result<Option<CalculationRecord>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("calculation already stored")]
    Conflict,
    #[error("calculation not found")]
    NotFound,
    #[error("result store unavailable: {0}")]
    Unavailable(String),
}

/// Response payload for a stored calculation.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationView {
    pub calculation_id: CalculationId,
    pub profile: RegulationProfile,
    pub profile_label: &'static str,
    pub occupancy: u32,
    pub compliant: bool,
    pub calculated_at: DateTime<Utc>,
    pub assessment: RatioAssessment,
}

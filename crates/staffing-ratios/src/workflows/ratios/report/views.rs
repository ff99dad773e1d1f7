use super::super::domain::{CalculationError, CareKind, StaffCategory};
use super::super::profile::RegulationProfile;
use super::super::repository::CalculationId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Week (or any span) the reported hours refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalculationError> {
        if end < start {
            return Err(CalculationError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HoursLine {
    pub category: StaffCategory,
    pub label: &'static str,
    pub care: CareKind,
    pub weekly_hours: f64,
    pub formatted: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FigureLine {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckLine {
    pub label: String,
    pub source_label: &'static str,
    pub measured: String,
    pub requirement: String,
    pub compliant: bool,
    pub verdict: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeficitView {
    pub required_fte: String,
    pub deficit_fte: String,
    pub cost_per_hire: String,
    pub estimated_annual_cost: String,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    pub calculation_id: CalculationId,
    pub title: String,
    pub profile: RegulationProfile,
    pub profile_label: &'static str,
    pub period: ReportPeriod,
    pub occupancy: u32,
    pub occupant_label: &'static str,
    pub hours: Vec<HoursLine>,
    pub figures: Vec<FigureLine>,
    pub checks: Vec<CheckLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deficit: Option<DeficitView>,
    pub compliant: bool,
    pub verdict: &'static str,
}

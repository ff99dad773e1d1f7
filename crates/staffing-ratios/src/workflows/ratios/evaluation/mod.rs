mod checks;
mod day_center;
mod residential;

pub use checks::{CheckKind, ComplianceCheck, MeasureUnit, Threshold};

use super::domain::{CalculationError, Occupancy, StaffingInput};
use super::profile::{RegulationConstants, RegulationProfile};
use serde::{Deserialize, Serialize};

/// Stateless evaluator that applies the regulation constants to a staffing input.
#[derive(Debug, Clone, Default)]
pub struct ComplianceEngine {
    constants: RegulationConstants,
}

impl ComplianceEngine {
    pub fn new(constants: RegulationConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &RegulationConstants {
        &self.constants
    }

    pub fn assess(
        &self,
        profile: RegulationProfile,
        occupancy: Occupancy,
        input: &StaffingInput,
    ) -> Result<RatioAssessment, CalculationError> {
        profile.validate(input)?;

        let constants = &self.constants;
        let assessment = match profile {
            RegulationProfile::CamResidential => residential::assess_cam(constants, occupancy, input),
            RegulationProfile::Order2680 => {
                residential::assess_order_2680(constants, occupancy, input)
            }
            RegulationProfile::CamDayCenter => day_center::assess_cam(constants, occupancy, input),
            RegulationProfile::MunicipalDayCenter => day_center::assess_municipal(occupancy, input),
            RegulationProfile::CombinedDayCenter => {
                day_center::assess_combined(constants, occupancy, input)
            }
        };

        Ok(assessment)
    }
}

/// Full-time-equivalent aggregate for one care group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FteAggregate {
    pub fte: f64,
    /// EJC per resident or user.
    pub ratio: f64,
    /// EJC per 100 residents or users.
    pub per_hundred: f64,
}

impl FteAggregate {
    pub fn new(fte: f64, occupancy: Occupancy) -> Self {
        let ratio = occupancy.ratio(fte);
        Self {
            fte,
            ratio,
            per_hundred: ratio * 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FteSummary {
    pub direct: FteAggregate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indirect: Option<FteAggregate>,
}

/// Staff shortfall against the Order 2680/2024 direct-care minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingDeficit {
    pub minimum_ratio: f64,
    pub required_fte: f64,
    pub current_fte: f64,
    /// Never negative.
    pub deficit_fte: f64,
    pub cost_per_hire: f64,
    pub estimated_annual_cost: f64,
}

impl StaffingDeficit {
    pub fn compute(
        minimum_ratio: f64,
        occupancy: Occupancy,
        current_fte: f64,
        cost_per_hire: f64,
    ) -> Self {
        let required_fte = f64::from(occupancy.get()) * minimum_ratio;
        let deficit_fte = (required_fte - current_fte).max(0.0);
        Self {
            minimum_ratio,
            required_fte,
            current_fte,
            deficit_fte,
            cost_per_hire,
            estimated_annual_cost: deficit_fte * cost_per_hire,
        }
    }

    pub fn has_shortfall(&self) -> bool {
        self.deficit_fte > 0.0
    }
}

/// Everything produced by one calculation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioAssessment {
    pub profile: RegulationProfile,
    pub occupancy: Occupancy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fte: Option<FteSummary>,
    pub checks: Vec<ComplianceCheck>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deficit: Option<StaffingDeficit>,
}

impl RatioAssessment {
    pub fn is_compliant(&self) -> bool {
        self.checks.iter().all(|check| check.compliant)
    }

    pub fn failing(&self) -> impl Iterator<Item = &ComplianceCheck> {
        self.checks.iter().filter(|check| !check.compliant)
    }

    pub fn check(&self, kind: CheckKind) -> Option<&ComplianceCheck> {
        self.checks.iter().find(|check| check.kind == kind)
    }
}

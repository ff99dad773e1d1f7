use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{CalculationError, Occupancy, StaffingInput};
use super::evaluation::ComplianceEngine;
use super::profile::{ProfileDescriptor, RegulationConstants, RegulationProfile};
use super::report::{build_report, ComplianceReport, ReportPeriod};
use super::repository::{CalculationId, CalculationRecord, ResultStore, StoreError};

/// Payload accepted by the calculate operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub profile: RegulationProfile,
    pub occupancy: u32,
    #[serde(default)]
    pub hours: StaffingInput,
}

/// Profiles offered to callers together with the constants in force.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileCatalog {
    pub constants: RegulationConstants,
    pub profiles: Vec<ProfileDescriptor>,
}

/// Service composing the compliance engine with the result store.
pub struct RatioCalculationService<S> {
    store: Arc<S>,
    engine: ComplianceEngine,
}

static CALCULATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_calculation_id() -> CalculationId {
    let id = CALCULATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CalculationId(format!("calc-{id:06}"))
}

impl<S> RatioCalculationService<S>
where
    S: ResultStore + 'static,
{
    pub fn new(store: Arc<S>, constants: RegulationConstants) -> Self {
        Self {
            store,
            engine: ComplianceEngine::new(constants),
        }
    }

    pub fn constants(&self) -> &RegulationConstants {
        self.engine.constants()
    }

    pub fn profiles(&self) -> ProfileCatalog {
        ProfileCatalog {
            constants: self.constants().clone(),
            profiles: RegulationProfile::ordered()
                .into_iter()
                .map(RegulationProfile::descriptor)
                .collect(),
        }
    }

    /// Validate and evaluate a staffing input, storing the result for reporting.
    pub fn calculate(
        &self,
        request: CalculationRequest,
    ) -> Result<CalculationRecord, RatioServiceError> {
        let CalculationRequest {
            profile,
            occupancy,
            hours,
        } = request;

        let occupancy = Occupancy::new(occupancy)?;
        let assessment = self.engine.assess(profile, occupancy, &hours)?;

        let record = CalculationRecord {
            id: next_calculation_id(),
            input: hours,
            assessment,
            calculated_at: Utc::now(),
        };

        let stored = self.store.insert(record)?;
        let failing = stored.assessment.failing().count();

        info!(
            calculation_id = %stored.id,
            profile = profile.key(),
            occupancy = occupancy.get(),
            checks = stored.assessment.checks.len(),
            "staffing ratios calculated"
        );
        if failing > 0 {
            warn!(
                calculation_id = %stored.id,
                profile = profile.key(),
                failing,
                "staffing below regulatory minimum"
            );
        }

        Ok(stored)
    }

    /// Build the report for a previously stored calculation.
    pub fn report(
        &self,
        calculation_id: &CalculationId,
        period: ReportPeriod,
    ) -> Result<ComplianceReport, RatioServiceError> {
        let record = self.get(calculation_id)?;
        Ok(build_report(&record, period))
    }

    pub fn get(
        &self,
        calculation_id: &CalculationId,
    ) -> Result<CalculationRecord, RatioServiceError> {
        let record = self
            .store
            .fetch(calculation_id)?
            .ok_or(StoreError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the ratio calculation service.
#[derive(Debug, thiserror::Error)]
pub enum RatioServiceError {
    #[error(transparent)]
    Calculation(#[from] CalculationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

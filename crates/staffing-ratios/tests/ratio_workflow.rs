use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use staffing_ratios::workflows::ratios::fte::full_time_equivalent;
use staffing_ratios::workflows::ratios::format::{compliance_label, format_number};
use staffing_ratios::workflows::ratios::tiers::{
    gerocultor_hours_required, municipal_minimums, therapy_hours_required,
};
use staffing_ratios::workflows::ratios::{
    CalculationError, CalculationId, CalculationRecord, CalculationRequest, CheckKind,
    RatioCalculationService, RatioServiceError, RegulationConstants, RegulationProfile,
    ReportPeriod, ResultStore, StaffCategory, StaffingInput, StoreError, TierRounding,
    TimesheetImporter,
};

#[derive(Default)]
struct SharedStore {
    records: Mutex<HashMap<CalculationId, CalculationRecord>>,
}

impl ResultStore for SharedStore {
    fn insert(&self, record: CalculationRecord) -> Result<CalculationRecord, StoreError> {
        let mut records = self.records.lock().expect("store mutex poisoned");
        records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &CalculationId) -> Result<Option<CalculationRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .expect("store mutex poisoned")
            .get(id)
            .cloned())
    }
}

fn close(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-6
}

#[test]
fn full_time_equivalent_boundaries() {
    assert_eq!(full_time_equivalent(0.0), 0.0);
    assert!(close(full_time_equivalent(1772.0 / 52.14), 1.0));
    assert!(full_time_equivalent(20.0) < full_time_equivalent(20.5));
}

#[test]
fn tiered_requirements_match_regulation_examples() {
    assert!(close(therapy_hours_required(50, TierRounding::Proportional), 20.0));
    assert!(close(therapy_hours_required(75, TierRounding::Proportional), 30.0));
    assert!(close(therapy_hours_required(51, TierRounding::Proportional), 20.4));
    assert!(close(therapy_hours_required(51, TierRounding::Ceiling), 30.0));

    assert!(close(gerocultor_hours_required(35, TierRounding::Proportional), 225.0));
    assert!(close(
        gerocultor_hours_required(36, TierRounding::Proportional),
        225.0 + 225.0 / 35.0
    ));
    assert!(close(gerocultor_hours_required(36, TierRounding::Ceiling), 450.0));

    let half_block = municipal_minimums(15);
    assert!(half_block
        .iter()
        .any(|(category, hours)| *category == StaffCategory::Gerocultor && close(*hours, 68.0)));
}

#[test]
fn order_2680_minimum_steps_strictly_above_fifty() {
    let service = RatioCalculationService::new(
        Arc::new(SharedStore::default()),
        RegulationConstants::default(),
    );
    let hours = StaffingInput::new().with_hours(StaffCategory::Gerocultor, 600.0);

    for (occupancy, minimum) in [(50, 0.37), (51, 0.45)] {
        let record = service
            .calculate(CalculationRequest {
                profile: RegulationProfile::Order2680,
                occupancy,
                hours: hours.clone(),
            })
            .expect("calculation succeeds");

        let direct = record
            .assessment
            .check(CheckKind::DirectCareRatio)
            .expect("direct ratio check");
        assert!(close(direct.required(), minimum));
    }
}

#[test]
fn timesheet_to_report_round_trip() {
    let csv = "Categoria,Horas\n\
Gerocultor,200\n\
Gerocultor (aux. ruta),30\n\
Fisioterapeuta,\"15,5\"\n\
Coordinador,15\n";
    let hours = TimesheetImporter::from_reader(csv.as_bytes()).expect("timesheet imports");

    let service = RatioCalculationService::new(
        Arc::new(SharedStore::default()),
        RegulationConstants::default(),
    );
    let record = service
        .calculate(CalculationRequest {
            profile: RegulationProfile::CombinedDayCenter,
            occupancy: 30,
            hours,
        })
        .expect("calculation succeeds");

    let period = ReportPeriod::new(
        NaiveDate::from_ymd_opt(2025, 2, 3).expect("valid date"),
        NaiveDate::from_ymd_opt(2025, 2, 9).expect("valid date"),
    )
    .expect("ordered period");
    let report = service.report(&record.id, period).expect("report builds");

    assert_eq!(report.profile, RegulationProfile::CombinedDayCenter);
    assert_eq!(report.occupant_label, "usuarios");
    assert_eq!(report.verdict, compliance_label(false));
    let physio = report
        .hours
        .iter()
        .find(|line| line.category == StaffCategory::Physiotherapist)
        .expect("physiotherapist line");
    assert_eq!(physio.formatted, format!("{} h/sem", format_number(15.5)));
    assert_eq!(report.checks.len(), 11);
}

#[test]
fn zero_occupancy_never_produces_a_ratio() {
    let service = RatioCalculationService::new(
        Arc::new(SharedStore::default()),
        RegulationConstants::default(),
    );

    let outcome = service.calculate(CalculationRequest {
        profile: RegulationProfile::MunicipalDayCenter,
        occupancy: 0,
        hours: StaffingInput::new(),
    });

    assert!(matches!(
        outcome,
        Err(RatioServiceError::Calculation(CalculationError::ZeroOccupancy))
    ));
}

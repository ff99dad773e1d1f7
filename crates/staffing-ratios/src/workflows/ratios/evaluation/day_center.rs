use super::super::domain::{CareKind, Occupancy, StaffCategory, StaffingInput};
use super::super::fte::total_full_time_equivalent;
use super::super::profile::{RegulationConstants, RegulationProfile, DAY_CENTER_DIRECT};
use super::super::tiers::municipal_minimums;
use super::checks::{CheckKind, ComplianceCheck};
use super::{FteAggregate, FteSummary, RatioAssessment};

pub(crate) fn assess_cam(
    constants: &RegulationConstants,
    occupancy: Occupancy,
    input: &StaffingInput,
) -> RatioAssessment {
    let (direct, checks) = cam_checks(constants, occupancy, input, false);
    RatioAssessment {
        profile: RegulationProfile::CamDayCenter,
        occupancy,
        fte: Some(FteSummary {
            direct,
            indirect: None,
        }),
        checks,
        deficit: None,
    }
}

pub(crate) fn assess_municipal(occupancy: Occupancy, input: &StaffingInput) -> RatioAssessment {
    RatioAssessment {
        profile: RegulationProfile::MunicipalDayCenter,
        occupancy,
        fte: None,
        checks: municipal_checks(occupancy, input),
        deficit: None,
    }
}

/// Applies the CAM rules and the municipal rules to the same user count. Route
/// aides count as gerocultors on the CAM side.
pub(crate) fn assess_combined(
    constants: &RegulationConstants,
    occupancy: Occupancy,
    input: &StaffingInput,
) -> RatioAssessment {
    let (direct, mut checks) = cam_checks(constants, occupancy, input, true);
    checks.extend(municipal_checks(occupancy, input));
    RatioAssessment {
        profile: RegulationProfile::CombinedDayCenter,
        occupancy,
        fte: Some(FteSummary {
            direct,
            indirect: None,
        }),
        checks,
        deficit: None,
    }
}

fn cam_checks(
    constants: &RegulationConstants,
    occupancy: Occupancy,
    input: &StaffingInput,
    include_route_aides: bool,
) -> (FteAggregate, Vec<ComplianceCheck>) {
    let source = RegulationProfile::CamDayCenter;
    let direct = FteAggregate::new(
        total_full_time_equivalent(input, &DAY_CENTER_DIRECT),
        occupancy,
    );

    let mut gerocultor_hours = input.hours(StaffCategory::Gerocultor);
    if include_route_aides {
        gerocultor_hours += input.hours(StaffCategory::RouteGerocultor);
    }

    let checks = vec![
        ComplianceCheck::ratio(
            CheckKind::DirectCareRatio,
            source,
            CareKind::Direct.label(),
            direct.fte,
            occupancy,
            constants.day_center_direct_min,
        ),
        ComplianceCheck::weekly_hours(
            CheckKind::GerocultorHours,
            source,
            StaffCategory::Gerocultor,
            gerocultor_hours,
            constants.gerocultor.weekly_hours(occupancy.get()),
        ),
    ];

    (direct, checks)
}

fn municipal_checks(occupancy: Occupancy, input: &StaffingInput) -> Vec<ComplianceCheck> {
    municipal_minimums(occupancy.get())
        .into_iter()
        .map(|(category, required)| {
            ComplianceCheck::weekly_hours(
                CheckKind::MunicipalCategoryHours,
                RegulationProfile::MunicipalDayCenter,
                category,
                input.hours(category),
                required,
            )
        })
        .collect()
}

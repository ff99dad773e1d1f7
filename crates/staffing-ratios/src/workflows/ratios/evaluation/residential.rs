use super::super::domain::{CareKind, Occupancy, StaffCategory, StaffingInput};
use super::super::fte::{full_time_equivalent, total_full_time_equivalent};
use super::super::profile::{
    RegulationConstants, RegulationProfile, RESIDENTIAL_DIRECT, RESIDENTIAL_INDIRECT,
};
use super::checks::{CheckKind, ComplianceCheck, MeasureUnit, Threshold};
use super::{FteAggregate, FteSummary, RatioAssessment, StaffingDeficit};

pub(crate) fn assess_cam(
    constants: &RegulationConstants,
    occupancy: Occupancy,
    input: &StaffingInput,
) -> RatioAssessment {
    let profile = RegulationProfile::CamResidential;
    let direct = FteAggregate::new(
        total_full_time_equivalent(input, &RESIDENTIAL_DIRECT),
        occupancy,
    );
    let indirect = FteAggregate::new(
        total_full_time_equivalent(input, &RESIDENTIAL_INDIRECT),
        occupancy,
    );
    let gerocultor_fte = full_time_equivalent(input.hours(StaffCategory::Gerocultor));
    let therapy_required = constants.therapy.weekly_hours(occupancy.get());

    let checks = vec![
        ComplianceCheck::ratio(
            CheckKind::DirectCareRatio,
            profile,
            CareKind::Direct.label(),
            direct.fte,
            occupancy,
            constants.residential_direct_min,
        ),
        ComplianceCheck::ratio(
            CheckKind::IndirectCareRatio,
            profile,
            CareKind::Indirect.label(),
            indirect.fte,
            occupancy,
            constants.residential_indirect_min,
        ),
        ComplianceCheck::ratio(
            CheckKind::GerocultorRatio,
            profile,
            "Gerocultores",
            gerocultor_fte,
            occupancy,
            constants.residential_gerocultor_min,
        )
        .for_category(StaffCategory::Gerocultor),
        ComplianceCheck::weekly_hours(
            CheckKind::PhysiotherapyHours,
            profile,
            StaffCategory::Physiotherapist,
            input.hours(StaffCategory::Physiotherapist),
            therapy_required,
        ),
        ComplianceCheck::weekly_hours(
            CheckKind::OccupationalTherapyHours,
            profile,
            StaffCategory::OccupationalTherapist,
            input.hours(StaffCategory::OccupationalTherapist),
            therapy_required,
        ),
        ComplianceCheck::evaluate(
            CheckKind::SocialWorkerStaffed,
            profile,
            StaffCategory::SocialWorker.label(),
            MeasureUnit::WeeklyHours,
            input.hours(StaffCategory::SocialWorker),
            Threshold::GreaterThan(0.0),
        )
        .for_category(StaffCategory::SocialWorker),
        ComplianceCheck::weekly_hours(
            CheckKind::PhysicianHours,
            profile,
            StaffCategory::Physician,
            input.hours(StaffCategory::Physician),
            constants.physician_min_weekly_hours,
        ),
        ComplianceCheck::weekly_hours(
            CheckKind::NursingHours,
            profile,
            StaffCategory::Nurse,
            input.hours(StaffCategory::Nurse),
            constants.nursing_min_weekly_hours,
        ),
    ];

    RatioAssessment {
        profile,
        occupancy,
        fte: Some(FteSummary {
            direct,
            indirect: Some(indirect),
        }),
        checks,
        deficit: None,
    }
}

pub(crate) fn assess_order_2680(
    constants: &RegulationConstants,
    occupancy: Occupancy,
    input: &StaffingInput,
) -> RatioAssessment {
    let profile = RegulationProfile::Order2680;
    let direct = FteAggregate::new(
        total_full_time_equivalent(input, &RESIDENTIAL_DIRECT),
        occupancy,
    );
    let minimum = constants.order2680_minimum(occupancy);

    let checks = vec![ComplianceCheck::ratio(
        CheckKind::DirectCareRatio,
        profile,
        CareKind::Direct.label(),
        direct.fte,
        occupancy,
        minimum,
    )];
    let deficit = StaffingDeficit::compute(minimum, occupancy, direct.fte, constants.cost_per_hire);

    RatioAssessment {
        profile,
        occupancy,
        fte: Some(FteSummary {
            direct,
            indirect: None,
        }),
        checks,
        deficit: Some(deficit),
    }
}

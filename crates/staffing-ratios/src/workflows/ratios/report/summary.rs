use super::super::evaluation::{ComplianceCheck, RatioAssessment, StaffingDeficit};
use super::super::format::{compliance_label, format_number, format_ratio};
use super::super::profile::RegulationProfile;
use super::super::repository::CalculationRecord;
use super::views::{CheckLine, ComplianceReport, DeficitView, FigureLine, HoursLine, ReportPeriod};

/// Builds the report from a stored calculation without recomputing it.
pub fn build_report(record: &CalculationRecord, period: ReportPeriod) -> ComplianceReport {
    let assessment = &record.assessment;
    let profile = assessment.profile;

    let hours = profile
        .categories()
        .iter()
        .map(|category| {
            let weekly_hours = record.input.hours(*category);
            HoursLine {
                category: *category,
                label: category.label(),
                care: category.care(),
                weekly_hours,
                formatted: format!("{} h/sem", format_number(weekly_hours)),
            }
        })
        .collect();

    let compliant = assessment.is_compliant();

    ComplianceReport {
        calculation_id: record.id.clone(),
        title: format!("Informe de Ratios Semanal ({})", profile.label()),
        profile,
        profile_label: profile.label(),
        period,
        occupancy: assessment.occupancy.get(),
        occupant_label: profile.occupant_label(),
        hours,
        figures: figures(assessment),
        checks: assessment.checks.iter().map(check_line).collect(),
        deficit: assessment.deficit.as_ref().map(deficit_view),
        compliant,
        verdict: compliance_label(compliant),
    }
}

fn figures(assessment: &RatioAssessment) -> Vec<FigureLine> {
    let Some(fte) = &assessment.fte else {
        return Vec::new();
    };

    let per = match assessment.profile {
        RegulationProfile::CamResidential | RegulationProfile::Order2680 => "residente",
        _ => "usuario",
    };

    let mut lines = vec![
        FigureLine {
            label: "Total EJC de Atención Directa".to_string(),
            value: format_number(fte.direct.fte),
        },
        FigureLine {
            label: format!("Ratio de Atención Directa (EJC/{per})"),
            value: format_ratio(fte.direct.ratio),
        },
    ];

    if assessment.profile == RegulationProfile::CamResidential {
        lines.push(FigureLine {
            label: "Atención Directa por cada 100 residentes".to_string(),
            value: format_number(fte.direct.per_hundred),
        });
    }

    if let Some(indirect) = &fte.indirect {
        lines.push(FigureLine {
            label: "Total EJC de Atención No Directa".to_string(),
            value: format_number(indirect.fte),
        });
        lines.push(FigureLine {
            label: format!("Ratio de Atención No Directa (EJC/{per})"),
            value: format_ratio(indirect.ratio),
        });
        lines.push(FigureLine {
            label: "Atención No Directa por cada 100 residentes".to_string(),
            value: format_number(indirect.per_hundred),
        });
    }

    lines
}

fn check_line(check: &ComplianceCheck) -> CheckLine {
    CheckLine {
        label: check.label.clone(),
        source_label: check.source.label(),
        measured: check.unit.format(check.measured),
        requirement: check.threshold.describe(check.unit),
        compliant: check.compliant,
        verdict: compliance_label(check.compliant),
    }
}

fn deficit_view(deficit: &StaffingDeficit) -> DeficitView {
    let notes = if deficit.has_shortfall() {
        vec![
            format!(
                "La ratio mínima es {}.",
                format_number(deficit.minimum_ratio)
            ),
            format!(
                "Habría que contratar {} empleados más.",
                format_number(deficit.deficit_fte)
            ),
            format!(
                "El coste anual adicional estimado es {} €.",
                format_number(deficit.estimated_annual_cost)
            ),
            format!(
                "(Coste base por persona: {} €/año).",
                format_number(deficit.cost_per_hire)
            ),
        ]
    } else {
        vec!["El centro CUMPLE con la ratio mínima requerida.".to_string()]
    };

    DeficitView {
        required_fte: format_number(deficit.required_fte),
        deficit_fte: format_number(deficit.deficit_fte),
        cost_per_hire: format_number(deficit.cost_per_hire),
        estimated_annual_cost: format_number(deficit.estimated_annual_cost),
        notes,
    }
}

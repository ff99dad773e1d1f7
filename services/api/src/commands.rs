use crate::infra::{parse_date, parse_hours_entry, InMemoryResultStore};
use chrono::{Local, NaiveDate};
use clap::Args;
use staffing_ratios::config::AppConfig;
use staffing_ratios::error::AppError;
use staffing_ratios::telemetry;
use staffing_ratios::workflows::dashboard::{ContractLedger, DashboardSummary, ResidentRegistry};
use staffing_ratios::workflows::ratios::format::format_number;
use staffing_ratios::workflows::ratios::{
    CalculationRequest, ComplianceReport, ProfileCatalog, RatioCalculationService,
    RegulationProfile, ReportPeriod, StaffCategory, StaffingInput, TimesheetImporter,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Regulation profile (order_2680, cam_residential, cam_day_center, municipal_day_center, combined_day_center)
    #[arg(long)]
    pub(crate) profile: RegulationProfile,
    /// Number of residents or day-center users
    #[arg(long)]
    pub(crate) occupancy: u32,
    /// Weekly hours as CATEGORY=HOURS; repeat for each category
    #[arg(long = "hours", value_parser = parse_hours_entry)]
    pub(crate) hours: Vec<(StaffCategory, f64)>,
    /// CSV timesheet with Categoria,Horas columns; --hours entries override it
    #[arg(long)]
    pub(crate) timesheet: Option<PathBuf>,
    /// First day of the reported week (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Last day of the reported week (YYYY-MM-DD, defaults to the start date)
    #[arg(long, value_parser = parse_date)]
    pub(crate) end: Option<NaiveDate>,
    /// Print the report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DashboardArgs {
    /// Contracts JSON export
    #[arg(long)]
    pub(crate) contracts: PathBuf,
    /// Resident counts per center (defaults to DASHBOARD_RESIDENTS_PATH)
    #[arg(long)]
    pub(crate) residents: Option<PathBuf>,
    /// Restrict the summary to one center
    #[arg(long)]
    pub(crate) center: Option<String>,
    /// Print the summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_profiles() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = RatioCalculationService::new(
        Arc::new(InMemoryResultStore::default()),
        config.ratios.constants(),
    );
    println!("{}", render_profiles(&service.profiles()));
    Ok(())
}

pub(crate) fn run_calculate(args: CalculateArgs) -> Result<(), AppError> {
    let CalculateArgs {
        profile,
        occupancy,
        hours: entries,
        timesheet,
        start,
        end,
        json,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init_for_cli(&config.telemetry)?;

    let mut hours = match timesheet {
        Some(path) => TimesheetImporter::from_path(path)?,
        None => StaffingInput::new(),
    };
    for (category, value) in entries {
        hours.set(category, value);
    }

    let start = start.unwrap_or_else(|| Local::now().date_naive());
    let period = ReportPeriod::new(start, end.unwrap_or(start))?;

    let service = RatioCalculationService::new(
        Arc::new(InMemoryResultStore::default()),
        config.ratios.constants(),
    );
    let record = service.calculate(CalculationRequest {
        profile,
        occupancy,
        hours,
    })?;
    let report = service.report(&record.id, period)?;

    if json {
        let body = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{body}");
    } else {
        println!("{}", render_report(&report));
    }
    Ok(())
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let DashboardArgs {
        contracts,
        residents,
        center,
        json,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init_for_cli(&config.telemetry)?;

    let ledger = ContractLedger::from_path(contracts)?;
    let registry =
        ResidentRegistry::load(residents.unwrap_or(config.dashboard.residents_path))?;
    let summary = ledger.summary(center.as_deref(), &registry)?;

    if json {
        let body = serde_json::to_string_pretty(&summary).map_err(std::io::Error::from)?;
        println!("{body}");
    } else {
        println!("{}", render_dashboard(&summary));
    }
    Ok(())
}

pub(crate) fn render_profiles(catalog: &ProfileCatalog) -> String {
    let mut lines = vec!["Regulation profiles".to_string()];
    for descriptor in &catalog.profiles {
        lines.push(format!(
            "\n{} ({}), per {}",
            descriptor.label,
            descriptor.profile.key(),
            descriptor.occupant_label
        ));
        for spec in &descriptor.categories {
            lines.push(format!(
                "- {} [{}]: {}",
                spec.label,
                spec.category.key(),
                spec.care.label()
            ));
        }
    }

    let constants = &catalog.constants;
    lines.push(format!(
        "\nTier rounding: therapy {}, gerocultor {}",
        constants.therapy.rounding, constants.gerocultor.rounding
    ));
    lines.push(format!(
        "Cost per additional hire: {} €/año",
        format_number(constants.cost_per_hire)
    ));
    lines.join("\n")
}

pub(crate) fn render_report(report: &ComplianceReport) -> String {
    let mut lines = vec![
        report.title.clone(),
        format!(
            "Periodo: {} -> {} | {} {} | Cálculo {}",
            report.period.start,
            report.period.end,
            report.occupancy,
            report.occupant_label,
            report.calculation_id
        ),
        "\nHoras semanales".to_string(),
    ];

    for line in &report.hours {
        lines.push(format!("- {}: {}", line.label, line.formatted));
    }

    if !report.figures.is_empty() {
        lines.push("\nResultados".to_string());
        for figure in &report.figures {
            lines.push(format!("- {}: {}", figure.label, figure.value));
        }
    }

    lines.push("\nComprobaciones".to_string());
    for check in &report.checks {
        lines.push(format!(
            "- [{}] {}: {} ({}) {}",
            check.source_label, check.label, check.measured, check.requirement, check.verdict
        ));
    }

    if let Some(deficit) = &report.deficit {
        lines.push("\nDéficit de personal".to_string());
        lines.extend(deficit.notes.iter().cloned());
    }

    lines.push(format!("\nResultado global: {}", report.verdict));
    lines.join("\n")
}

pub(crate) fn render_dashboard(summary: &DashboardSummary) -> String {
    let mut lines = vec![format!("Centros: {}", summary.centers.join(", "))];

    for center in &summary.summaries {
        lines.push(format!("\n{}", center.center));
        for contract in &center.contracts {
            lines.push(format!(
                "- {} ({}): total anual {} €",
                contract.name,
                contract.kind,
                format_number(contract.annual_total)
            ));
            for (month, amount) in &contract.monthly {
                lines.push(format!("    {month}: {} €", format_number(*amount)));
            }
        }
        for (supply, amount) in &center.by_supply {
            lines.push(format!("  {supply}: {} €", format_number(*amount)));
        }
        lines.push(format!(
            "  Total anual: {} €",
            format_number(center.annual_total)
        ));
        if let Some(cost) = center.cost_per_resident {
            lines.push(format!(
                "  Coste por residente: {} €",
                format_number(cost)
            ));
        }
    }

    if summary.skipped_invoices > 0 {
        lines.push(format!(
            "\nFacturas omitidas por fecha no válida: {}",
            summary.skipped_invoices
        ));
    }
    lines.join("\n")
}

use staffing_ratios::workflows::dashboard::{
    ContractLedger, DashboardError, DashboardService, ResidentRegistry,
};

const CONTRACTS: &[u8] = include_bytes!("fixtures/contracts.json");

fn close(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-6
}

fn ledger() -> ContractLedger {
    ContractLedger::from_reader(CONTRACTS).expect("fixture parses")
}

fn empty_registry(dir: &tempfile::TempDir) -> ResidentRegistry {
    ResidentRegistry::load(dir.path().join("residents.json")).expect("registry loads")
}

#[test]
fn lists_distinct_centers_alphabetically() {
    let ledger = ledger();
    assert_eq!(ledger.contracts().len(), 3);
    assert_eq!(
        ledger.centers(),
        vec!["Centro de Día Sur".to_string(), "Residencia Norte".to_string()]
    );
}

#[test]
fn aggregates_monthly_totals_and_skips_undated_invoices() {
    let dir = tempfile::tempdir().expect("temp dir");
    let summary = ledger()
        .summary(Some("Residencia Norte"), &empty_registry(&dir))
        .expect("center known");

    assert_eq!(summary.summaries.len(), 1);
    assert_eq!(summary.skipped_invoices, 1);
    let center = &summary.summaries[0];

    let electricity = &center.contracts[0];
    assert_eq!(electricity.name, "CT-ELEC-01");
    assert!(close(electricity.monthly["2024-01"], 1500.5));
    assert!(close(electricity.monthly["2024-02"], 950.25));
    assert!(close(electricity.annual_total, 2450.75));
    assert!(close(electricity.consumption_total, 15_700.0));
    assert_eq!(electricity.skipped_invoices, 1);

    let gas = &center.contracts[1];
    assert_eq!(gas.name, "Gas");
    assert!(gas.expires_on.is_none());
    assert_eq!(gas.monthly.keys().collect::<Vec<_>>(), vec!["2024-02"]);

    assert_eq!(
        center.monthly_totals.keys().collect::<Vec<_>>(),
        vec!["2024-01", "2024-02"]
    );
    assert!(close(center.monthly_totals["2024-02"], 1350.25));
    assert!(close(center.annual_total, 2850.75));
    assert!(close(center.consumption_total, 18_700.0));
    assert!(close(center.by_supply["Electricidad"], 2450.75));
    assert!(close(center.by_supply["Gas"], 400.0));
    assert!(center.cost_per_resident.is_none());
}

#[test]
fn cost_per_resident_uses_registry_counts() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut registry = empty_registry(&dir);
    registry.set("Residencia Norte", 50);

    let summary = ledger().summary(None, &registry).expect("summary builds");

    assert_eq!(summary.summaries.len(), 2);
    let norte = summary
        .summaries
        .iter()
        .find(|center| center.center == "Residencia Norte")
        .expect("norte summarised");
    assert_eq!(norte.residents, Some(50));
    assert!(close(norte.cost_per_resident.expect("cost computed"), 57.015));

    let sur = summary
        .summaries
        .iter()
        .find(|center| center.center == "Centro de Día Sur")
        .expect("sur summarised");
    assert!(close(sur.consumption_total, 95.5));
    assert!(sur.cost_per_resident.is_none());
}

#[test]
fn unknown_center_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = ledger()
        .summary(Some("Residencia Este"), &empty_registry(&dir))
        .expect_err("unknown center");
    assert!(matches!(err, DashboardError::UnknownCenter(name) if name == "Residencia Este"));
}

#[test]
fn service_persists_resident_updates() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("residents.json");
    let registry = ResidentRegistry::load(&path).expect("registry loads");
    let service = DashboardService::new(Some(ledger()), registry);

    service
        .set_residents("Centro de Día Sur", 30)
        .expect("update persists");

    let reloaded = ResidentRegistry::load(&path).expect("registry reloads");
    assert_eq!(reloaded.get("Centro de Día Sur"), Some(30));

    let summary = service
        .summary(Some("Centro de Día Sur"))
        .expect("summary builds");
    assert!(close(
        summary.summaries[0].cost_per_resident.expect("cost computed"),
        7.0
    ));
}

#[test]
fn service_without_ledger_reports_not_configured() {
    let dir = tempfile::tempdir().expect("temp dir");
    let service = DashboardService::new(None, empty_registry(&dir));

    assert!(!service.is_configured());
    assert!(matches!(
        service.summary(None),
        Err(DashboardError::NotConfigured)
    ));
}

#[test]
fn null_invoice_date_is_skipped_not_fatal() {
    let json = r#"[{"tipo": "Gas", "centro": "Norte", "facturas": [
        {"fecha": "05/02/2024", "total": 100},
        {"fecha": null, "total": 5}
    ]}]"#;
    let ledger = ContractLedger::from_reader(json.as_bytes()).expect("ledger parses");
    let dir = tempfile::tempdir().expect("temp dir");

    let summary = ledger
        .summary(Some("Norte"), &empty_registry(&dir))
        .expect("summary builds");

    assert_eq!(summary.skipped_invoices, 1);
    assert!(close(summary.summaries[0].annual_total, 100.0));
}

#[test]
fn failed_resident_save_leaves_counts_unchanged() {
    let json = r#"[{"tipo": "Gas", "centro": "Norte", "facturas": [
        {"fecha": "05/02/2024", "total": 100}
    ]}]"#;
    let ledger = ContractLedger::from_reader(json.as_bytes()).expect("ledger parses");
    let dir = tempfile::tempdir().expect("temp dir");
    let registry = ResidentRegistry::load(dir.path().join("missing_dir").join("residents.json"))
        .expect("missing file reads as empty");
    let service = DashboardService::new(Some(ledger), registry);

    let err = service
        .set_residents("Norte", 50)
        .expect_err("parent directory does not exist");
    assert!(matches!(err, DashboardError::Io(_)));

    assert_eq!(service.residents("Norte").expect("registry readable"), None);
    let summary = service.summary(Some("Norte")).expect("summary builds");
    assert_eq!(summary.summaries[0].residents, None);
    assert!(summary.summaries[0].cost_per_resident.is_none());
}

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use staffing_ratios::config::DashboardConfig;
use staffing_ratios::workflows::dashboard::{
    ContractLedger, DashboardError, DashboardService, ResidentRegistry,
};
use staffing_ratios::workflows::ratios::format::parse_hours;
use staffing_ratios::workflows::ratios::{
    CalculationId, CalculationRecord, ResultStore, StaffCategory, StoreError,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Calculations kept before the oldest ones are evicted.
pub(crate) const DEFAULT_STORE_CAPACITY: usize = 1_024;

/// Process-local result store holding the most recent calculations. Older
/// entries are evicted first once the capacity is reached.
#[derive(Clone)]
pub(crate) struct InMemoryResultStore {
    inner: Arc<Mutex<StoredResults>>,
    capacity: usize,
}

#[derive(Default)]
struct StoredResults {
    records: HashMap<CalculationId, CalculationRecord>,
    order: VecDeque<CalculationId>,
}

impl Default for InMemoryResultStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_STORE_CAPACITY)
    }
}

impl InMemoryResultStore {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoredResults::default())),
            capacity: capacity.max(1),
        }
    }
}

impl ResultStore for InMemoryResultStore {
    fn insert(&self, record: CalculationRecord) -> Result<CalculationRecord, StoreError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| StoreError::Unavailable("result store mutex poisoned".to_string()))?;
        if guard.records.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }

        while guard.records.len() >= self.capacity {
            let Some(oldest) = guard.order.pop_front() else {
                break;
            };
            guard.records.remove(&oldest);
        }

        guard.order.push_back(record.id.clone());
        guard.records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &CalculationId) -> Result<Option<CalculationRecord>, StoreError> {
        let guard = self
            .inner
            .lock()
            .map_err(|_| StoreError::Unavailable("result store mutex poisoned".to_string()))?;
        Ok(guard.records.get(id).cloned())
    }
}

pub(crate) fn build_dashboard_service(
    config: &DashboardConfig,
) -> Result<DashboardService, DashboardError> {
    let ledger = config
        .contracts_path
        .as_ref()
        .map(ContractLedger::from_path)
        .transpose()?;
    let residents = ResidentRegistry::load(&config.residents_path)?;
    Ok(DashboardService::new(ledger, residents))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Parses a `CATEGORY=HOURS` pair such as `gerocultor=37,5`.
pub(crate) fn parse_hours_entry(raw: &str) -> Result<(StaffCategory, f64), String> {
    let (category, hours) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=HOURS, found '{raw}'"))?;
    let category = category
        .parse::<StaffCategory>()
        .map_err(|err| err.to_string())?;
    let hours = parse_hours(hours).map_err(|err| err.to_string())?;
    Ok((category, hours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffing_ratios::workflows::ratios::{
        ComplianceEngine, Occupancy, RegulationProfile, StaffingInput,
    };

    #[test]
    fn parses_hours_entries_with_decimal_comma() {
        assert_eq!(
            parse_hours_entry("gerocultor=37,5"),
            Ok((StaffCategory::Gerocultor, 37.5))
        );
        assert_eq!(
            parse_hours_entry("Terapeuta Ocupacional=20"),
            Ok((StaffCategory::OccupationalTherapist, 20.0))
        );
        assert!(parse_hours_entry("gerocultor").is_err());
        assert!(parse_hours_entry("astronauta=4").is_err());
        assert!(parse_hours_entry("nurse=-2").is_err());
    }

    #[test]
    fn dashboard_without_contracts_is_unconfigured() {
        let dir = tempfile::tempdir().expect("temp dir");
        let service = build_dashboard_service(&DashboardConfig {
            contracts_path: None,
            residents_path: dir.path().join("residents.json"),
        })
        .expect("service builds");
        assert!(!service.is_configured());
    }

    fn record(id: &str) -> CalculationRecord {
        let input = StaffingInput::new();
        let assessment = ComplianceEngine::default()
            .assess(
                RegulationProfile::CamDayCenter,
                Occupancy::new(10).expect("non-zero"),
                &input,
            )
            .expect("valid input");
        CalculationRecord {
            id: CalculationId(id.to_string()),
            input,
            assessment,
            calculated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn store_rejects_duplicate_ids() {
        let store = InMemoryResultStore::default();
        let record = record("calc-000042");

        store.insert(record.clone()).expect("first insert");
        assert!(matches!(store.insert(record), Err(StoreError::Conflict)));
    }

    #[test]
    fn store_evicts_oldest_calculation_at_capacity() {
        let store = InMemoryResultStore::with_capacity(2);
        for id in ["calc-000001", "calc-000002", "calc-000003"] {
            store.insert(record(id)).expect("insert");
        }

        let fetch = |id: &str| {
            store
                .fetch(&CalculationId(id.to_string()))
                .expect("store available")
        };
        assert!(fetch("calc-000001").is_none());
        assert!(fetch("calc-000002").is_some());
        assert!(fetch("calc-000003").is_some());
    }
}

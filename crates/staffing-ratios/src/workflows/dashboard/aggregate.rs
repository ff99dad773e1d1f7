use super::domain::Contract;
use super::residents::ResidentRegistry;
use super::DashboardError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Contracts loaded once from the JSON export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractLedger {
    contracts: Vec<Contract>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractSummary {
    pub name: String,
    pub kind: String,
    pub center: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<String>,
    /// Invoice totals per `yyyy-mm`; months summing to zero are left out.
    pub monthly: BTreeMap<String, f64>,
    pub annual_total: f64,
    pub consumption_total: f64,
    pub skipped_invoices: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CenterSummary {
    pub center: String,
    pub contracts: Vec<ContractSummary>,
    pub monthly_totals: BTreeMap<String, f64>,
    pub monthly_consumption: BTreeMap<String, f64>,
    pub by_supply: BTreeMap<String, f64>,
    pub annual_total: f64,
    pub consumption_total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residents: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_resident: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub centers: Vec<String>,
    pub summaries: Vec<CenterSummary>,
    pub skipped_invoices: usize,
}

impl ContractLedger {
    pub fn new(contracts: Vec<Contract>) -> Self {
        Self { contracts }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DashboardError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DashboardError> {
        let contracts: Vec<Contract> = serde_json::from_reader(reader)?;
        Ok(Self::new(contracts))
    }

    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    /// Distinct center names in alphabetical order.
    pub fn centers(&self) -> Vec<String> {
        self.contracts
            .iter()
            .map(|contract| contract.center.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Aggregates every center, or only `center` when given.
    pub fn summary(
        &self,
        center: Option<&str>,
        residents: &ResidentRegistry,
    ) -> Result<DashboardSummary, DashboardError> {
        let centers = self.centers();
        let selected: Vec<&String> = match center {
            Some(name) => {
                let found = centers
                    .iter()
                    .find(|candidate| candidate.as_str() == name)
                    .ok_or_else(|| DashboardError::UnknownCenter(name.to_string()))?;
                vec![found]
            }
            None => centers.iter().collect(),
        };

        let summaries: Vec<CenterSummary> = selected
            .into_iter()
            .map(|name| self.center_summary(name, residents.get(name)))
            .collect();
        let skipped_invoices: usize = summaries
            .iter()
            .flat_map(|summary| summary.contracts.iter())
            .map(|contract| contract.skipped_invoices)
            .sum();

        Ok(DashboardSummary {
            centers,
            summaries,
            skipped_invoices,
        })
    }

    fn center_summary(&self, center: &str, residents: Option<u32>) -> CenterSummary {
        let mut monthly_totals = BTreeMap::new();
        let mut monthly_consumption = BTreeMap::new();
        let mut by_supply = BTreeMap::new();
        let mut contracts = Vec::new();

        for contract in self.contracts.iter().filter(|c| c.center == center) {
            let mut monthly = BTreeMap::new();
            let mut consumption_total = 0.0;
            let mut skipped_invoices = 0;

            for invoice in &contract.invoices {
                let Some(month) = invoice.month_key() else {
                    warn!(
                        center,
                        contract = contract.display_name(),
                        date = %invoice.date,
                        "skipping invoice with unparseable date"
                    );
                    skipped_invoices += 1;
                    continue;
                };

                *monthly.entry(month.clone()).or_insert(0.0) += invoice.total;
                *monthly_totals.entry(month.clone()).or_insert(0.0) += invoice.total;
                *monthly_consumption.entry(month).or_insert(0.0) += invoice.consumption;
                *by_supply
                    .entry(invoice.supply_label().to_string())
                    .or_insert(0.0) += invoice.total;
                consumption_total += invoice.consumption;
            }

            monthly.retain(|_, total: &mut f64| *total != 0.0);
            let annual_total: f64 = monthly.values().sum();

            contracts.push(ContractSummary {
                name: contract.display_name().to_string(),
                kind: contract.kind.clone(),
                center: contract.center.clone(),
                signed_on: contract.signed_on.clone(),
                expires_on: contract.expires_on.clone(),
                monthly,
                annual_total,
                consumption_total,
                skipped_invoices,
            });
        }

        monthly_totals.retain(|_, total: &mut f64| *total != 0.0);
        monthly_consumption.retain(|_, total: &mut f64| *total != 0.0);
        let annual_total: f64 = monthly_totals.values().sum();
        let consumption_total: f64 = monthly_consumption.values().sum();
        let cost_per_resident = residents
            .filter(|count| *count > 0)
            .map(|count| annual_total / f64::from(count));

        CenterSummary {
            center: center.to_string(),
            contracts,
            monthly_totals,
            monthly_consumption,
            by_supply,
            annual_total,
            consumption_total,
            residents,
            cost_per_resident,
        }
    }
}

use std::sync::Mutex;

use tracing::info;

use super::aggregate::{ContractLedger, DashboardSummary};
use super::residents::ResidentRegistry;
use super::DashboardError;

/// Contracts ledger plus the editable resident registry behind the dashboard.
pub struct DashboardService {
    ledger: Option<ContractLedger>,
    residents: Mutex<ResidentRegistry>,
}

impl DashboardService {
    pub fn new(ledger: Option<ContractLedger>, residents: ResidentRegistry) -> Self {
        Self {
            ledger,
            residents: Mutex::new(residents),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.ledger.is_some()
    }

    pub fn summary(&self, center: Option<&str>) -> Result<DashboardSummary, DashboardError> {
        let ledger = self.ledger.as_ref().ok_or(DashboardError::NotConfigured)?;
        let residents = self
            .residents
            .lock()
            .map_err(|_| DashboardError::RegistryUnavailable)?;
        ledger.summary(center, &residents)
    }

    /// Updates one center's resident count and rewrites the registry file. The
    /// in-memory count only changes once the file is written.
    pub fn set_residents(&self, center: &str, residents: u32) -> Result<(), DashboardError> {
        let center = center.trim();
        if center.is_empty() {
            return Err(DashboardError::UnknownCenter(center.to_string()));
        }

        let mut registry = self
            .residents
            .lock()
            .map_err(|_| DashboardError::RegistryUnavailable)?;
        let mut updated = registry.clone();
        updated.set(center, residents);
        updated.save()?;
        *registry = updated;

        info!(center, residents, path = %registry.path().display(), "resident count updated");
        Ok(())
    }

    pub fn residents(&self, center: &str) -> Result<Option<u32>, DashboardError> {
        let registry = self
            .residents
            .lock()
            .map_err(|_| DashboardError::RegistryUnavailable)?;
        Ok(registry.get(center))
    }
}

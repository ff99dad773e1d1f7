use super::DashboardError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Resident counts per center, persisted as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResidentRegistry {
    path: PathBuf,
    counts: BTreeMap<String, u32>,
}

impl ResidentRegistry {
    /// A missing file reads as an empty registry.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DashboardError> {
        let path = path.as_ref().to_path_buf();
        let counts = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, counts })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, center: &str) -> Option<u32> {
        self.counts.get(center).copied()
    }

    pub fn set(&mut self, center: impl Into<String>, residents: u32) {
        self.counts.insert(center.into(), residents);
    }

    pub fn counts(&self) -> &BTreeMap<String, u32> {
        &self.counts
    }

    pub fn save(&self) -> Result<(), DashboardError> {
        let json = serde_json::to_vec_pretty(&self.counts)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

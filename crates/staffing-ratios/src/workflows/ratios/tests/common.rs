use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::ratios::domain::{Occupancy, StaffCategory, StaffingInput};
use crate::workflows::ratios::repository::{
    CalculationId, CalculationRecord, ResultStore, StoreError,
};
use crate::workflows::ratios::{
    ratio_router, CalculationRequest, RatioCalculationService, RegulationConstants,
    RegulationProfile,
};

#[derive(Default)]
pub(super) struct MemoryStore {
    records: Mutex<HashMap<CalculationId, CalculationRecord>>,
}

impl MemoryStore {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }
}

impl ResultStore for MemoryStore {
    fn insert(&self, record: CalculationRecord) -> Result<CalculationRecord, StoreError> {
        let mut records = self.records.lock().expect("store mutex poisoned");
        if records.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &CalculationId) -> Result<Option<CalculationRecord>, StoreError> {
        let records = self.records.lock().expect("store mutex poisoned");
        Ok(records.get(id).cloned())
    }
}

pub(super) struct ConflictStore;

impl ResultStore for ConflictStore {
    fn insert(&self, _record: CalculationRecord) -> Result<CalculationRecord, StoreError> {
        Err(StoreError::Conflict)
    }

    fn fetch(&self, _id: &CalculationId) -> Result<Option<CalculationRecord>, StoreError> {
        Ok(None)
    }
}

pub(super) struct UnavailableStore;

impl ResultStore for UnavailableStore {
    fn insert(&self, _record: CalculationRecord) -> Result<CalculationRecord, StoreError> {
        Err(StoreError::Unavailable("cache offline".to_string()))
    }

    fn fetch(&self, _id: &CalculationId) -> Result<Option<CalculationRecord>, StoreError> {
        Err(StoreError::Unavailable("cache offline".to_string()))
    }
}

pub(super) fn occupancy(count: u32) -> Occupancy {
    Occupancy::new(count).expect("non-zero occupancy")
}

pub(super) fn close(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-6
}

/// 100-resident CAM residence that meets every minimum.
pub(super) fn compliant_residence() -> StaffingInput {
    StaffingInput::new()
        .with_hours(StaffCategory::Physician, 10.0)
        .with_hours(StaffCategory::Nurse, 200.0)
        .with_hours(StaffCategory::Gerocultor, 1200.0)
        .with_hours(StaffCategory::Physiotherapist, 40.0)
        .with_hours(StaffCategory::OccupationalTherapist, 40.0)
        .with_hours(StaffCategory::SocialWorker, 20.0)
        .with_hours(StaffCategory::Psychologist, 20.0)
        .with_hours(StaffCategory::SocioculturalAnimator, 40.0)
        .with_hours(StaffCategory::Director, 40.0)
        .with_hours(StaffCategory::Cleaning, 300.0)
        .with_hours(StaffCategory::Kitchen, 200.0)
        .with_hours(StaffCategory::Maintenance, 40.0)
}

/// 50-place residence well below the Order 2680 minimum.
pub(super) fn understaffed_order_2680() -> StaffingInput {
    StaffingInput::new()
        .with_hours(StaffCategory::Gerocultor, 400.0)
        .with_hours(StaffCategory::Nurse, 40.0)
}

/// 35-user CAM day center that meets both day-center minimums.
pub(super) fn compliant_day_center() -> StaffingInput {
    StaffingInput::new()
        .with_hours(StaffCategory::Gerocultor, 240.0)
        .with_hours(StaffCategory::Physiotherapist, 20.0)
        .with_hours(StaffCategory::OccupationalTherapist, 20.0)
}

pub(super) fn request(
    profile: RegulationProfile,
    occupancy: u32,
    hours: StaffingInput,
) -> CalculationRequest {
    CalculationRequest {
        profile,
        occupancy,
        hours,
    }
}

pub(super) fn build_service() -> (RatioCalculationService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = RatioCalculationService::new(store.clone(), RegulationConstants::default());
    (service, store)
}

pub(super) fn ratio_router_with_service(
    service: RatioCalculationService<MemoryStore>,
) -> axum::Router {
    ratio_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

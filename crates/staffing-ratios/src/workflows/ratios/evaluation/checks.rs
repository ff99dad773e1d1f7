use super::super::domain::{Occupancy, StaffCategory};
use super::super::format::{format_number, format_ratio};
use super::super::profile::RegulationProfile;
use serde::{Deserialize, Serialize};

/// Comparison applied between a measured figure and its regulatory minimum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Threshold {
    /// Inclusive minimum (`>=`).
    AtLeast(f64),
    /// Strict minimum (`>`), used when a role merely has to be staffed.
    GreaterThan(f64),
}

impl Threshold {
    pub const fn minimum(self) -> f64 {
        match self {
            Self::AtLeast(value) | Self::GreaterThan(value) => value,
        }
    }

    pub fn is_met(self, measured: f64) -> bool {
        if !measured.is_finite() {
            return false;
        }
        match self {
            Self::AtLeast(minimum) => measured >= minimum,
            Self::GreaterThan(minimum) => measured > minimum,
        }
    }

    /// Spanish description of the requirement, e.g. `mínimo 0,47`.
    pub fn describe(self, unit: MeasureUnit) -> String {
        match self {
            Self::AtLeast(minimum) => format!("mínimo {}", unit.format(minimum)),
            Self::GreaterThan(minimum) => format!("mínimo > {}", unit.format(minimum)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureUnit {
    /// Full-time equivalents per resident or user.
    FtePerOccupant,
    WeeklyHours,
}

impl MeasureUnit {
    pub fn format(self, value: f64) -> String {
        match self {
            Self::FtePerOccupant => format_ratio(value),
            Self::WeeklyHours => format!("{} h/sem", format_number(value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    DirectCareRatio,
    IndirectCareRatio,
    GerocultorRatio,
    PhysiotherapyHours,
    OccupationalTherapyHours,
    SocialWorkerStaffed,
    PhysicianHours,
    NursingHours,
    GerocultorHours,
    MunicipalCategoryHours,
}

/// Outcome of comparing one measured figure against its minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    pub kind: CheckKind,
    /// Rule set the check belongs to; differs from the assessed profile only for
    /// combined day centers.
    pub source: RegulationProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<StaffCategory>,
    pub label: String,
    pub unit: MeasureUnit,
    pub measured: f64,
    pub threshold: Threshold,
    pub compliant: bool,
    /// `measured - minimum`; negative when short of the requirement.
    pub gap: f64,
}

impl ComplianceCheck {
    pub fn evaluate(
        kind: CheckKind,
        source: RegulationProfile,
        label: impl Into<String>,
        unit: MeasureUnit,
        measured: f64,
        threshold: Threshold,
    ) -> Self {
        Self {
            kind,
            source,
            category: None,
            label: label.into(),
            unit,
            measured,
            threshold,
            compliant: threshold.is_met(measured),
            gap: measured - threshold.minimum(),
        }
    }

    /// Ratio of an aggregate over the occupancy against an inclusive minimum.
    pub fn ratio(
        kind: CheckKind,
        source: RegulationProfile,
        label: impl Into<String>,
        aggregate: f64,
        occupancy: Occupancy,
        minimum: f64,
    ) -> Self {
        Self::evaluate(
            kind,
            source,
            label,
            MeasureUnit::FtePerOccupant,
            occupancy.ratio(aggregate),
            Threshold::AtLeast(minimum),
        )
    }

    /// Weekly hours of a category against an inclusive minimum.
    pub fn weekly_hours(
        kind: CheckKind,
        source: RegulationProfile,
        category: StaffCategory,
        measured: f64,
        minimum: f64,
    ) -> Self {
        Self::evaluate(
            kind,
            source,
            category.label(),
            MeasureUnit::WeeklyHours,
            measured,
            Threshold::AtLeast(minimum),
        )
        .for_category(category)
    }

    pub fn for_category(mut self, category: StaffCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn required(&self) -> f64 {
        self.threshold.minimum()
    }
}

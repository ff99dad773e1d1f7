use super::domain::{CalculationError, CareKind, Occupancy, StaffCategory, StaffingInput};
use super::tiers::{TierRounding, TieredHours, GEROCULTOR_HOURS, THERAPY_HOURS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direct-care categories counted in residential ratios.
pub const RESIDENTIAL_DIRECT: [StaffCategory; 9] = [
    StaffCategory::Physician,
    StaffCategory::Nurse,
    StaffCategory::Gerocultor,
    StaffCategory::Physiotherapist,
    StaffCategory::OccupationalTherapist,
    StaffCategory::SocialWorker,
    StaffCategory::Psychologist,
    StaffCategory::SocioculturalAnimator,
    StaffCategory::Director,
];

/// Support categories counted in the CAM residential indirect-care ratio.
pub const RESIDENTIAL_INDIRECT: [StaffCategory; 3] = [
    StaffCategory::Cleaning,
    StaffCategory::Kitchen,
    StaffCategory::Maintenance,
];

/// Direct-care categories counted in the CAM day-center ratio.
pub const DAY_CENTER_DIRECT: [StaffCategory; 6] = [
    StaffCategory::Nurse,
    StaffCategory::Gerocultor,
    StaffCategory::Physiotherapist,
    StaffCategory::OccupationalTherapist,
    StaffCategory::SocialWorker,
    StaffCategory::Psychologist,
];

const CAM_RESIDENTIAL_CATEGORIES: [StaffCategory; 12] = [
    StaffCategory::Physician,
    StaffCategory::Nurse,
    StaffCategory::Gerocultor,
    StaffCategory::Physiotherapist,
    StaffCategory::OccupationalTherapist,
    StaffCategory::SocialWorker,
    StaffCategory::Psychologist,
    StaffCategory::SocioculturalAnimator,
    StaffCategory::Director,
    StaffCategory::Cleaning,
    StaffCategory::Kitchen,
    StaffCategory::Maintenance,
];

const MUNICIPAL_CATEGORIES: [StaffCategory; 9] = [
    StaffCategory::Coordinator,
    StaffCategory::Nurse,
    StaffCategory::SocialWorker,
    StaffCategory::Physiotherapist,
    StaffCategory::OccupationalTherapist,
    StaffCategory::Psychologist,
    StaffCategory::Gerocultor,
    StaffCategory::RouteGerocultor,
    StaffCategory::Driver,
];

const COMBINED_DAY_CENTER_CATEGORIES: [StaffCategory; 9] = [
    StaffCategory::Nurse,
    StaffCategory::Gerocultor,
    StaffCategory::Physiotherapist,
    StaffCategory::OccupationalTherapist,
    StaffCategory::SocialWorker,
    StaffCategory::Psychologist,
    StaffCategory::Coordinator,
    StaffCategory::RouteGerocultor,
    StaffCategory::Driver,
];

/// Regulation variant a calculation is assessed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegulationProfile {
    CamResidential,
    #[serde(rename = "order_2680", alias = "order2680")]
    Order2680,
    CamDayCenter,
    MunicipalDayCenter,
    /// Day center with both CAM and municipal places, assessed under both rule sets.
    CombinedDayCenter,
}

impl RegulationProfile {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Order2680,
            Self::CamResidential,
            Self::CamDayCenter,
            Self::MunicipalDayCenter,
            Self::CombinedDayCenter,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::CamResidential => "cam_residential",
            Self::Order2680 => "order_2680",
            Self::CamDayCenter => "cam_day_center",
            Self::MunicipalDayCenter => "municipal_day_center",
            Self::CombinedDayCenter => "combined_day_center",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CamResidential => "Residencia CAM",
            Self::Order2680 => "Residencia Orden 2680/2024",
            Self::CamDayCenter => "Centro de Día CAM",
            Self::MunicipalDayCenter => "Centro de Día Ayuntamiento de Madrid",
            Self::CombinedDayCenter => "Centro de Día CAM y Ayuntamiento de Madrid",
        }
    }

    /// Categories whose hours are collected for this profile, in display order.
    pub fn categories(self) -> &'static [StaffCategory] {
        match self {
            Self::CamResidential => &CAM_RESIDENTIAL_CATEGORIES,
            Self::Order2680 => &RESIDENTIAL_DIRECT,
            Self::CamDayCenter => &DAY_CENTER_DIRECT,
            Self::MunicipalDayCenter => &MUNICIPAL_CATEGORIES,
            Self::CombinedDayCenter => &COMBINED_DAY_CENTER_CATEGORIES,
        }
    }

    pub const fn occupant_label(self) -> &'static str {
        match self {
            Self::CamResidential | Self::Order2680 => "residentes",
            _ => "usuarios",
        }
    }

    pub fn descriptor(self) -> ProfileDescriptor {
        ProfileDescriptor {
            profile: self,
            label: self.label(),
            occupant_label: self.occupant_label(),
            categories: self.category_specs(),
        }
    }

    pub fn category_specs(self) -> Vec<CategorySpec> {
        self.categories()
            .iter()
            .copied()
            .map(CategorySpec::weekly_hours)
            .collect()
    }

    /// Checks that every entry belongs to this profile and holds usable hours.
    pub fn validate(self, input: &StaffingInput) -> Result<(), CalculationError> {
        for (category, hours) in input.iter() {
            if !self.categories().contains(&category) {
                return Err(CalculationError::CategoryNotInProfile {
                    category: category.label(),
                    profile: self.label(),
                });
            }
            CategorySpec::weekly_hours(category).check(hours)?;
        }
        Ok(())
    }
}

impl fmt::Display for RegulationProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProfile(pub String);

impl fmt::Display for UnknownProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = RegulationProfile::ordered()
            .iter()
            .map(|profile| profile.key())
            .collect();
        write!(
            f,
            "unknown regulation profile '{}' (expected one of {})",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for UnknownProfile {}

impl FromStr for RegulationProfile {
    type Err = UnknownProfile;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ordered()
            .into_iter()
            .find(|profile| profile.key() == normalized)
            .ok_or_else(|| UnknownProfile(value.trim().to_string()))
    }
}

/// Catalog entry describing the inputs a profile expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileDescriptor {
    pub profile: RegulationProfile,
    pub label: &'static str,
    pub occupant_label: &'static str,
    pub categories: Vec<CategorySpec>,
}

/// Input constraints for one category field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpec {
    pub category: StaffCategory,
    pub label: &'static str,
    pub care: CareKind,
    pub min_value: f64,
    pub step: f64,
    pub decimal_places: u8,
}

impl CategorySpec {
    pub fn weekly_hours(category: StaffCategory) -> Self {
        Self {
            category,
            label: category.label(),
            care: category.care(),
            min_value: 0.0,
            step: 0.01,
            decimal_places: 2,
        }
    }

    pub fn check(&self, hours: f64) -> Result<(), CalculationError> {
        if hours.is_finite() && hours >= self.min_value {
            Ok(())
        } else {
            Err(CalculationError::InvalidHours {
                category: self.label,
                value: hours,
            })
        }
    }
}

const DEFAULT_COST_PER_HIRE: f64 = 17_000.0 * 1.32;

/// Numeric thresholds and tier rules applied by the compliance engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulationConstants {
    pub residential_direct_min: f64,
    pub residential_indirect_min: f64,
    pub residential_gerocultor_min: f64,
    pub physician_min_weekly_hours: f64,
    pub nursing_min_weekly_hours: f64,
    pub therapy: TieredHours,
    pub order2680_large_center_min: f64,
    pub order2680_small_center_min: f64,
    pub order2680_large_center_above: u32,
    /// Annual employer cost of one additional full-time hire.
    pub cost_per_hire: f64,
    pub day_center_direct_min: f64,
    pub gerocultor: TieredHours,
}

impl Default for RegulationConstants {
    fn default() -> Self {
        Self {
            residential_direct_min: 0.47,
            residential_indirect_min: 0.15,
            residential_gerocultor_min: 0.33,
            physician_min_weekly_hours: 5.0,
            nursing_min_weekly_hours: 168.0,
            therapy: THERAPY_HOURS,
            order2680_large_center_min: 0.45,
            order2680_small_center_min: 0.37,
            order2680_large_center_above: 50,
            cost_per_hire: DEFAULT_COST_PER_HIRE,
            day_center_direct_min: 0.23,
            gerocultor: GEROCULTOR_HOURS,
        }
    }
}

impl RegulationConstants {
    pub fn with_therapy_rounding(mut self, rounding: TierRounding) -> Self {
        self.therapy = self.therapy.with_rounding(rounding);
        self
    }

    pub fn with_gerocultor_rounding(mut self, rounding: TierRounding) -> Self {
        self.gerocultor = self.gerocultor.with_rounding(rounding);
        self
    }

    /// Falls back to the default cost when the value is not a positive number.
    pub fn with_cost_per_hire(mut self, cost_per_hire: f64) -> Self {
        self.cost_per_hire = if cost_per_hire.is_finite() && cost_per_hire > 0.0 {
            cost_per_hire
        } else {
            DEFAULT_COST_PER_HIRE
        };
        self
    }

    /// Order 2680/2024 direct-care minimum, which steps up strictly above 50 places.
    pub fn order2680_minimum(&self, occupancy: Occupancy) -> f64 {
        if occupancy.get() > self.order2680_large_center_above {
            self.order2680_large_center_min
        } else {
            self.order2680_small_center_min
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_2680_minimum_steps_above_fifty_places() {
        let constants = RegulationConstants::default();
        let fifty = Occupancy::new(50).expect("non-zero");
        let fifty_one = Occupancy::new(51).expect("non-zero");
        assert_eq!(constants.order2680_minimum(fifty), 0.37);
        assert_eq!(constants.order2680_minimum(fifty_one), 0.45);
    }

    #[test]
    fn default_cost_per_hire_matches_loaded_salary() {
        let constants = RegulationConstants::default();
        assert!((constants.cost_per_hire - 22_440.0).abs() < 1e-9);
        let sanitized = constants.with_cost_per_hire(f64::NAN);
        assert!((sanitized.cost_per_hire - 22_440.0).abs() < 1e-9);
    }

    #[test]
    fn validation_rejects_foreign_categories_and_bad_hours() {
        let input = StaffingInput::new().with_hours(StaffCategory::Driver, 10.0);
        assert!(matches!(
            RegulationProfile::CamResidential.validate(&input),
            Err(CalculationError::CategoryNotInProfile { .. })
        ));

        let input = StaffingInput::new().with_hours(StaffCategory::Gerocultor, -1.0);
        assert!(matches!(
            RegulationProfile::CamDayCenter.validate(&input),
            Err(CalculationError::InvalidHours { .. })
        ));

        let input = StaffingInput::new().with_hours(StaffCategory::Gerocultor, f64::INFINITY);
        assert!(RegulationProfile::CamDayCenter.validate(&input).is_err());
    }

    #[test]
    fn profiles_parse_from_keys() {
        assert_eq!(
            "order-2680".parse::<RegulationProfile>(),
            Ok(RegulationProfile::Order2680)
        );
        assert!("residencia".parse::<RegulationProfile>().is_err());
    }

    #[test]
    fn serialized_names_match_keys() {
        for profile in RegulationProfile::ordered() {
            let json = serde_json::to_string(&profile).expect("serializes");
            assert_eq!(json, format!("\"{}\"", profile.key()));
        }
    }

    #[test]
    fn category_specs_expose_widget_constraints() {
        let specs = RegulationProfile::CamResidential.category_specs();
        assert_eq!(specs.len(), 12);
        assert!(specs
            .iter()
            .all(|spec| spec.min_value == 0.0 && spec.decimal_places == 2));
        assert_eq!(specs[11].care, CareKind::Indirect);
    }
}

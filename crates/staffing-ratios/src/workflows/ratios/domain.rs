use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Personnel categories recognised by any regulation profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StaffCategory {
    Physician,
    Nurse,
    Gerocultor,
    RouteGerocultor,
    Physiotherapist,
    OccupationalTherapist,
    SocialWorker,
    Psychologist,
    SocioculturalAnimator,
    Director,
    Coordinator,
    Driver,
    Cleaning,
    Kitchen,
    Maintenance,
}

impl StaffCategory {
    pub const fn ordered() -> [Self; 15] {
        [
            Self::Physician,
            Self::Nurse,
            Self::Gerocultor,
            Self::RouteGerocultor,
            Self::Physiotherapist,
            Self::OccupationalTherapist,
            Self::SocialWorker,
            Self::Psychologist,
            Self::SocioculturalAnimator,
            Self::Director,
            Self::Coordinator,
            Self::Driver,
            Self::Cleaning,
            Self::Kitchen,
            Self::Maintenance,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Physician => "physician",
            Self::Nurse => "nurse",
            Self::Gerocultor => "gerocultor",
            Self::RouteGerocultor => "route_gerocultor",
            Self::Physiotherapist => "physiotherapist",
            Self::OccupationalTherapist => "occupational_therapist",
            Self::SocialWorker => "social_worker",
            Self::Psychologist => "psychologist",
            Self::SocioculturalAnimator => "sociocultural_animator",
            Self::Director => "director",
            Self::Coordinator => "coordinator",
            Self::Driver => "driver",
            Self::Cleaning => "cleaning",
            Self::Kitchen => "kitchen",
            Self::Maintenance => "maintenance",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Physician => "Médico",
            Self::Nurse => "ATS/DUE (Enfermería)",
            Self::Gerocultor => "Gerocultor",
            Self::RouteGerocultor => "Gerocultor (aux. ruta)",
            Self::Physiotherapist => "Fisioterapeuta",
            Self::OccupationalTherapist => "Terapeuta Ocupacional",
            Self::SocialWorker => "Trabajador Social",
            Self::Psychologist => "Psicólogo/a",
            Self::SocioculturalAnimator => "Animador sociocultural / TASOC",
            Self::Director => "Director/a",
            Self::Coordinator => "Coordinador/a",
            Self::Driver => "Conductor/a",
            Self::Cleaning => "Limpieza",
            Self::Kitchen => "Cocina",
            Self::Maintenance => "Mantenimiento",
        }
    }

    /// Alternative spellings used on the various timesheet and form exports.
    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Physician => &["medico"],
            Self::Nurse => &["enfermería", "enfermeria", "enfermera/o", "ats/due"],
            Self::Psychologist => &["psicologo/a", "psicólogo", "psicologo"],
            Self::SocioculturalAnimator => &["tasoc", "animador sociocultural"],
            Self::Director => &["director"],
            Self::Coordinator => &["coordinador"],
            Self::Driver => &["conductor"],
            _ => &[],
        }
    }

    pub const fn care(self) -> CareKind {
        match self {
            Self::Cleaning | Self::Kitchen | Self::Maintenance | Self::Driver => CareKind::Indirect,
            _ => CareKind::Direct,
        }
    }
}

impl fmt::Display for StaffCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StaffCategory {
    type Err = CalculationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needle = raw.trim().to_lowercase();
        Self::ordered()
            .into_iter()
            .find(|category| {
                category.key() == needle
                    || category.label().to_lowercase() == needle
                    || category.aliases().iter().any(|alias| *alias == needle)
            })
            .ok_or_else(|| CalculationError::UnknownCategory(raw.trim().to_string()))
    }
}

impl TryFrom<String> for StaffCategory {
    type Error = CalculationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StaffCategory> for String {
    fn from(value: StaffCategory) -> Self {
        value.key().to_string()
    }
}

/// Regulatory split between resident-facing and support staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareKind {
    Direct,
    Indirect,
}

impl CareKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Direct => "Atención Directa",
            Self::Indirect => "Atención No Directa",
        }
    }
}

/// Weekly hours worked per staff category. Categories never entered read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffingInput {
    hours: BTreeMap<StaffCategory, f64>,
}

impl StaffingInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hours(mut self, category: StaffCategory, weekly_hours: f64) -> Self {
        self.set(category, weekly_hours);
        self
    }

    pub fn set(&mut self, category: StaffCategory, weekly_hours: f64) {
        self.hours.insert(category, weekly_hours);
    }

    /// Accumulates hours, used when a timesheet lists a category on several rows.
    pub fn add(&mut self, category: StaffCategory, weekly_hours: f64) {
        *self.hours.entry(category).or_insert(0.0) += weekly_hours;
    }

    pub fn hours(&self, category: StaffCategory) -> f64 {
        self.hours.get(&category).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StaffCategory, f64)> + '_ {
        self.hours.iter().map(|(category, hours)| (*category, *hours))
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }
}

impl FromIterator<(StaffCategory, f64)> for StaffingInput {
    fn from_iter<I: IntoIterator<Item = (StaffCategory, f64)>>(iter: I) -> Self {
        let mut input = Self::new();
        for (category, hours) in iter {
            input.add(category, hours);
        }
        input
    }
}

/// Number of residents or day-center users; never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Occupancy(NonZeroU32);

impl Occupancy {
    pub fn new(count: u32) -> Result<Self, CalculationError> {
        NonZeroU32::new(count)
            .map(Self)
            .ok_or(CalculationError::ZeroOccupancy)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Divides an aggregate (EJC or hours) by the occupancy.
    pub fn ratio(self, aggregate: f64) -> f64 {
        aggregate / f64::from(self.get())
    }
}

impl TryFrom<u32> for Occupancy {
    type Error = CalculationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Occupancy> for u32 {
    fn from(value: Occupancy) -> Self {
        value.get()
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Input problems reported back to the user; none of them are fatal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculationError {
    #[error("occupancy must be greater than zero")]
    ZeroOccupancy,
    #[error("hours for {category} must be a finite, non-negative number (found {value})")]
    InvalidHours { category: &'static str, value: f64 },
    #[error("'{0}' is not a valid number of weekly hours")]
    UnparseableHours(String),
    #[error("unknown staff category '{0}'")]
    UnknownCategory(String),
    #[error("{category} is not assessed under {profile}")]
    CategoryNotInProfile {
        category: &'static str,
        profile: &'static str,
    },
    #[error("report period ends on {end} before it starts on {start}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },
}

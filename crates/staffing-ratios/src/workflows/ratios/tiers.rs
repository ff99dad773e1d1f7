//! Tiered hour requirements: a base allowance plus a fixed increment per block of
//! residents or users beyond the included headcount.

use super::domain::StaffCategory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a partial block contributes to a tiered requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierRounding {
    /// A partial block adds its proportional share of the increment.
    #[default]
    Proportional,
    /// Any started block adds the full increment.
    Ceiling,
}

impl TierRounding {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Proportional => "proportional",
            Self::Ceiling => "ceiling",
        }
    }
}

impl fmt::Display for TierRounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRounding(pub String);

impl fmt::Display for UnknownRounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown tier rounding '{}' (expected 'proportional' or 'ceiling')",
            self.0
        )
    }
}

impl std::error::Error for UnknownRounding {}

impl FromStr for TierRounding {
    type Err = UnknownRounding;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "proportional" | "proporcional" => Ok(Self::Proportional),
            "ceiling" | "ceil" | "fraccion" | "fracción" => Ok(Self::Ceiling),
            other => Err(UnknownRounding(other.to_string())),
        }
    }
}

/// Whether tier amounts are expressed per week or per working day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "basis", rename_all = "snake_case")]
pub enum HourBasis {
    Weekly,
    Daily { days_per_week: u32 },
}

impl HourBasis {
    fn weekly(self, hours: f64) -> f64 {
        match self {
            Self::Weekly => hours,
            Self::Daily { days_per_week } => hours * f64::from(days_per_week),
        }
    }
}

/// A base allowance covering `included_units`, plus `hours_per_block` for every
/// `block_size` units beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TieredHours {
    pub included_units: u32,
    pub base_hours: f64,
    pub block_size: u32,
    pub hours_per_block: f64,
    pub basis: HourBasis,
    pub rounding: TierRounding,
}

impl TieredHours {
    pub fn with_rounding(mut self, rounding: TierRounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Weekly hours required for `units` residents or users.
    pub fn weekly_hours(&self, units: u32) -> f64 {
        let extra = units.saturating_sub(self.included_units);
        let block_size = self.block_size.max(1);
        let additional = match self.rounding {
            TierRounding::Proportional => {
                let whole = f64::from(extra / block_size);
                let fraction = f64::from(extra % block_size) / f64::from(block_size);
                whole * self.hours_per_block + fraction * self.hours_per_block
            }
            TierRounding::Ceiling => f64::from(extra.div_ceil(block_size)) * self.hours_per_block,
        };
        self.basis.weekly(self.base_hours + additional)
    }
}

/// CAM residential physiotherapy and occupational therapy: 4 h/day up to 50
/// residents, plus 2 h/day for every further 25 residents.
pub const THERAPY_HOURS: TieredHours = TieredHours {
    included_units: 50,
    base_hours: 4.0,
    block_size: 25,
    hours_per_block: 2.0,
    basis: HourBasis::Daily { days_per_week: 5 },
    rounding: TierRounding::Proportional,
};

/// CAM day centers: 225 gerocultor hours per week for every 35 users.
pub const GEROCULTOR_HOURS: TieredHours = TieredHours {
    included_units: 0,
    base_hours: 0.0,
    block_size: 35,
    hours_per_block: 225.0,
    basis: HourBasis::Weekly,
    rounding: TierRounding::Proportional,
};

/// Users per block under the Madrid municipal day-center rules.
pub const MUNICIPAL_BLOCK_SIZE: u32 = 30;

/// Weekly hours owed per category for every block of 30 municipal users.
pub const MUNICIPAL_HOURS_PER_BLOCK: [(StaffCategory, f64); 9] = [
    (StaffCategory::Coordinator, 15.0),
    (StaffCategory::Nurse, 10.0),
    (StaffCategory::SocialWorker, 10.0),
    (StaffCategory::Physiotherapist, 20.0),
    (StaffCategory::OccupationalTherapist, 20.0),
    (StaffCategory::Psychologist, 10.0),
    (StaffCategory::Gerocultor, 136.0),
    (StaffCategory::RouteGerocultor, 30.0),
    (StaffCategory::Driver, 30.0),
];

/// Weekly physiotherapist (and occupational therapist) hours owed for `residents`.
pub fn therapy_hours_required(residents: u32, rounding: TierRounding) -> f64 {
    THERAPY_HOURS.with_rounding(rounding).weekly_hours(residents)
}

/// Weekly gerocultor hours owed by a CAM day center with `users`.
pub fn gerocultor_hours_required(users: u32, rounding: TierRounding) -> f64 {
    GEROCULTOR_HOURS.with_rounding(rounding).weekly_hours(users)
}

/// Municipal minimum weekly hours per category; always proportional.
pub fn municipal_minimums(users: u32) -> Vec<(StaffCategory, f64)> {
    MUNICIPAL_HOURS_PER_BLOCK
        .iter()
        .map(|(category, rate)| {
            let tier = TieredHours {
                included_units: 0,
                base_hours: 0.0,
                block_size: MUNICIPAL_BLOCK_SIZE,
                hours_per_block: *rate,
                basis: HourBasis::Weekly,
                rounding: TierRounding::Proportional,
            };
            (*category, tier.weekly_hours(users))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn therapy_base_covers_fifty_residents() {
        for rounding in [TierRounding::Proportional, TierRounding::Ceiling] {
            assert_eq!(therapy_hours_required(1, rounding), 20.0);
            assert_eq!(therapy_hours_required(50, rounding), 20.0);
        }
    }

    #[test]
    fn therapy_full_tier_adds_ten_weekly_hours() {
        assert!(close(
            therapy_hours_required(75, TierRounding::Proportional),
            30.0
        ));
        assert!(close(therapy_hours_required(75, TierRounding::Ceiling), 30.0));
        assert!(close(
            therapy_hours_required(100, TierRounding::Proportional),
            40.0
        ));
    }

    #[test]
    fn therapy_partial_tier_depends_on_rounding() {
        assert!(close(
            therapy_hours_required(51, TierRounding::Proportional),
            20.4
        ));
        assert!(close(therapy_hours_required(51, TierRounding::Ceiling), 30.0));
    }

    #[test]
    fn gerocultor_block_boundaries() {
        assert!(close(
            gerocultor_hours_required(35, TierRounding::Proportional),
            225.0
        ));
        assert!(close(
            gerocultor_hours_required(35, TierRounding::Ceiling),
            225.0
        ));
        assert!(close(
            gerocultor_hours_required(36, TierRounding::Proportional),
            225.0 + 225.0 / 35.0
        ));
        assert!(close(
            gerocultor_hours_required(36, TierRounding::Ceiling),
            450.0
        ));
        assert_eq!(gerocultor_hours_required(0, TierRounding::Ceiling), 0.0);
    }

    #[test]
    fn municipal_half_block_is_half_rate() {
        for ((category, required), (_, rate)) in municipal_minimums(15)
            .into_iter()
            .zip(MUNICIPAL_HOURS_PER_BLOCK.iter())
        {
            assert!(close(required, rate / 2.0), "{category} expected {rate}/2");
        }
    }

    #[test]
    fn municipal_mixes_whole_and_partial_blocks() {
        let minimums = municipal_minimums(75);
        let (_, physio) = minimums
            .iter()
            .find(|(category, _)| *category == StaffCategory::Physiotherapist)
            .copied()
            .expect("physiotherapist rate present");
        assert!(close(physio, 50.0));
    }

    #[test]
    fn rounding_parses_from_configuration_values() {
        assert_eq!("Ceiling".parse::<TierRounding>(), Ok(TierRounding::Ceiling));
        assert_eq!(
            "proportional".parse::<TierRounding>(),
            Ok(TierRounding::Proportional)
        );
        assert!("round".parse::<TierRounding>().is_err());
    }
}

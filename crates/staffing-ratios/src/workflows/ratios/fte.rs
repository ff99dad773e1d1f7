//! Full-time-equivalent (EJC) conversion.

use super::domain::{StaffCategory, StaffingInput};

/// Weeks per year used to annualise weekly hours.
pub const WEEKS_PER_YEAR: f64 = 52.14;

/// Annual hours of one full-time position.
pub const ANNUAL_FULL_TIME_HOURS: f64 = 1772.0;

/// Converts weekly hours into full-time equivalents.
pub fn full_time_equivalent(weekly_hours: f64) -> f64 {
    weekly_hours * WEEKS_PER_YEAR / ANNUAL_FULL_TIME_HOURS
}

/// Sums the full-time equivalents of the given categories.
pub fn total_full_time_equivalent(input: &StaffingInput, categories: &[StaffCategory]) -> f64 {
    categories
        .iter()
        .map(|category| full_time_equivalent(input.hours(*category)))
        .sum()
}

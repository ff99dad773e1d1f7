pub mod dashboard;
pub mod ratios;

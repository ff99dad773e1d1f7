use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::ratios::{RegulationConstants, TierRounding};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub ratios: RatioConfig,
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            ratios: RatioConfig::from_env()?,
            dashboard: DashboardConfig::from_env(),
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Tier rounding and costing choices applied to every calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioConfig {
    pub therapy_rounding: TierRounding,
    pub gerocultor_rounding: TierRounding,
    pub cost_per_hire: f64,
}

impl Default for RatioConfig {
    fn default() -> Self {
        let constants = RegulationConstants::default();
        Self {
            therapy_rounding: constants.therapy.rounding,
            gerocultor_rounding: constants.gerocultor.rounding,
            cost_per_hire: constants.cost_per_hire,
        }
    }
}

impl RatioConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let therapy_rounding = rounding_from_env("RATIO_THERAPY_ROUNDING")?
            .unwrap_or(defaults.therapy_rounding);
        let gerocultor_rounding = rounding_from_env("RATIO_GEROCULTOR_ROUNDING")?
            .unwrap_or(defaults.gerocultor_rounding);

        let cost_per_hire = match env::var("RATIO_COST_PER_HIRE") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|cost| cost.is_finite() && *cost > 0.0)
                .ok_or(ConfigError::InvalidCostPerHire { value: raw })?,
            Err(_) => defaults.cost_per_hire,
        };

        Ok(Self {
            therapy_rounding,
            gerocultor_rounding,
            cost_per_hire,
        })
    }

    pub fn constants(&self) -> RegulationConstants {
        RegulationConstants::default()
            .with_therapy_rounding(self.therapy_rounding)
            .with_gerocultor_rounding(self.gerocultor_rounding)
            .with_cost_per_hire(self.cost_per_hire)
    }
}

impl From<&RatioConfig> for RegulationConstants {
    fn from(config: &RatioConfig) -> Self {
        config.constants()
    }
}

fn rounding_from_env(key: &'static str) -> Result<Option<TierRounding>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<TierRounding>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidRounding { key, value: raw }),
        Err(_) => Ok(None),
    }
}

/// Where the contracts dashboard reads its data from.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub contracts_path: Option<PathBuf>,
    pub residents_path: PathBuf,
}

impl DashboardConfig {
    fn from_env() -> Self {
        let contracts_path = env::var("DASHBOARD_CONTRACTS_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let residents_path = env::var("DASHBOARD_RESIDENTS_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("residents.json"));

        Self {
            contracts_path,
            residents_path,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRounding { key: &'static str, value: String },
    InvalidCostPerHire { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRounding { key, value } => write!(
                f,
                "{key} must be 'proportional' or 'ceiling' (found '{value}')"
            ),
            ConfigError::InvalidCostPerHire { value } => write!(
                f,
                "RATIO_COST_PER_HIRE must be a positive number (found '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidRounding { .. }
            | ConfigError::InvalidCostPerHire { .. } => None,
        }
    }
}

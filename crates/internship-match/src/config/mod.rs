use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::engine::scoring::criteria::DEFAULT_CORE_WEIGHT;
use crate::engine::scoring::DEFAULT_PAST_PARTICIPATION_PENALTY;

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
    pub engine: EngineConfig,
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
            engine: EngineConfig::from_env()?,
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Which scoring strategy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorerKind {
    Rules,
    Predictive,
}

impl ScorerKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rules" | "rule" | "rule-based" | "taxonomy" => Some(Self::Rules),
            "predictive" | "model" => Some(Self::Predictive),
            _ => None,
        }
    }
}

/// Knobs for the scoring engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub scorer: ScorerKind,
    pub core_weight: f64,
    pub past_participation_penalty: f64,
    pub model_path: Option<PathBuf>,
    pub taxonomy_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scorer: ScorerKind::Rules,
            core_weight: DEFAULT_CORE_WEIGHT,
            past_participation_penalty: DEFAULT_PAST_PARTICIPATION_PENALTY,
            model_path: None,
            taxonomy_path: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let scorer = match env::var("MATCH_SCORER") {
            Ok(raw) => ScorerKind::parse(&raw).ok_or(ConfigError::InvalidScorer(raw))?,
            Err(_) => ScorerKind::Rules,
        };

        let core_weight = match env::var("MATCH_CORE_WEIGHT") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| (0.0..=1.0).contains(value))
                .ok_or(ConfigError::InvalidCoreWeight(raw))?,
            Err(_) => DEFAULT_CORE_WEIGHT,
        };

        let past_participation_penalty = match env::var("MATCH_PAST_PENALTY") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| *value > 0.0 && *value <= 1.0)
                .ok_or(ConfigError::InvalidPastPenalty(raw))?,
            Err(_) => DEFAULT_PAST_PARTICIPATION_PENALTY,
        };

        let model_path = non_empty_path("MATCH_MODEL_PATH");
        let taxonomy_path = non_empty_path("MATCH_TAXONOMY_PATH");

        if scorer == ScorerKind::Predictive && model_path.is_none() {
            return Err(ConfigError::MissingModelPath);
        }

        Ok(Self {
            scorer,
            core_weight,
            past_participation_penalty,
            model_path,
            taxonomy_path,
        })
    }
}

fn non_empty_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(|value| PathBuf::from(value.trim()))
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidScorer(String),
    InvalidCoreWeight(String),
    InvalidPastPenalty(String),
    MissingModelPath,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidScorer(value) => write!(
                f,
                "MATCH_SCORER must be 'rules' or 'predictive' (found '{value}')"
            ),
            ConfigError::InvalidCoreWeight(value) => write!(
                f,
                "MATCH_CORE_WEIGHT must be a number between 0 and 1 (found '{value}')"
            ),
            ConfigError::InvalidPastPenalty(value) => write!(
                f,
                "MATCH_PAST_PENALTY must be a number in (0, 1] (found '{value}')"
            ),
            ConfigError::MissingModelPath => {
                write!(f, "MATCH_MODEL_PATH is required when MATCH_SCORER=predictive")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

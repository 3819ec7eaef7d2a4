use crate::triage::engine::{PolicyError, TriagePolicy};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
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

    pub const fn label(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub triage: TriageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let policy_path = non_empty_var("TRIAGE_POLICY_PATH").map(PathBuf::from);
        let workers = non_empty_var("TRIAGE_WORKERS")
            .map(|value| parse_workers(&value))
            .transpose()?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            triage: TriageConfig {
                policy_path,
                workers,
            },
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parses a worker-pool size; zero is rejected.
pub fn parse_workers(value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(workers) if workers > 0 => Ok(workers),
        _ => Err(ConfigError::InvalidWorkers {
            value: value.to_string(),
        }),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the triage policy comes from and how wide the assessment pool runs.
#[derive(Debug, Clone, Default)]
pub struct TriageConfig {
    pub policy_path: Option<PathBuf>,
    /// `None` runs on the global rayon pool.
    pub workers: Option<usize>,
}

impl TriageConfig {
    pub fn load_policy(&self) -> Result<TriagePolicy, PolicyError> {
        match &self.policy_path {
            Some(path) => TriagePolicy::from_path(path),
            None => Ok(TriagePolicy::default()),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidWorkers { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWorkers { value } => {
                write!(f, "TRIAGE_WORKERS must be a positive integer, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::auth::Role;
use crate::services::order_status::TransitionMode;

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_CREATED_BY: &str = "operator";
const CONFIG_DIR: &str = "config";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application configuration structure with validation
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Application environment
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    #[validate(custom = "validate_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Role selected when a session starts
    #[serde(default = "default_role")]
    pub default_role: Role,

    /// Whether status changes follow the stage table
    #[serde(default)]
    pub status_transitions: TransitionMode,

    /// Keep specialized payloads alongside work orders so edits survive a save
    #[serde(default)]
    pub retain_specialized_payloads: bool,

    /// Load the demo personal files and orders at startup
    #[serde(default = "default_true_bool")]
    pub seed_demo_data: bool,

    /// Name written to `created_by` on new records
    #[serde(default = "default_created_by")]
    #[validate(length(min = 1, message = "created_by must not be empty"))]
    pub created_by: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
            log_json: false,
            default_role: default_role(),
            status_transitions: TransitionMode::default(),
            retain_specialized_payloads: false,
            seed_demo_data: true,
            created_by: default_created_by(),
        }
    }
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    fn validate_additional_constraints(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.is_production() && self.seed_demo_data {
            let mut err = ValidationError::new("seed_demo_data_in_production");
            err.message = Some(
                "Demo data must not be loaded in production. Set APP__SEED_DEMO_DATA=false".into(),
            );
            errors.add("seed_demo_data", err);
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Default value functions
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}

fn default_role() -> Role {
    Role::Registration
}

fn default_created_by() -> String {
    DEFAULT_CREATED_BY.to_string()
}

fn default_true_bool() -> bool {
    true
}

fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        return Ok(());
    }
    let mut err = ValidationError::new("log_level");
    err.message = Some(format!("log_level must be one of {:?}", LOG_LEVELS).into());
    Err(err)
}

/// Initializes tracing using the provided log level as the default filter
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("pno_dashboard={},pno_cli={}", level, level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    if json {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive))
            .json()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive))
            .try_init();
    }
}

/// Loads application configuration
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults
/// 2. Default config (config/default.toml)
/// 3. Environment-specific config (config/{env}.toml)
/// 4. Environment variables (APP__*)
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let config = Config::builder()
        .set_default("environment", run_env.as_str())?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;
    validate_config(&app_config)?;

    info!("Configuration loaded successfully");
    Ok(app_config)
}

/// Field and cross-field checks applied after deserialization
pub fn validate_config(app_config: &AppConfig) -> Result<(), AppConfigError> {
    app_config.validate().map_err(|e| {
        error!("Configuration validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    app_config.validate_additional_constraints().map_err(|e| {
        error!("Configuration constraint validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        assert!(validate_config(&cfg).is_ok());
        assert_eq!(cfg.default_role, Role::Registration);
        assert_eq!(cfg.status_transitions, TransitionMode::Free);
        assert!(!cfg.retain_specialized_payloads);
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let cfg = AppConfig {
            log_level: "loud".into(),
            ..AppConfig::default()
        };
        assert!(matches!(
            validate_config(&cfg),
            Err(AppConfigError::Validation(_))
        ));
    }

    #[test]
    fn production_forbids_demo_data() {
        let mut cfg = AppConfig {
            environment: "production".into(),
            ..AppConfig::default()
        };
        assert!(validate_config(&cfg).is_err());

        cfg.seed_demo_data = false;
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn deserializes_enums_from_ids() {
        let cfg: AppConfig = serde_json::from_value(serde_json::json!({
            "default_role": "workshop",
            "status_transitions": "strict",
            "retain_specialized_payloads": true
        }))
        .unwrap();
        assert_eq!(cfg.default_role, Role::Workshop);
        assert_eq!(cfg.status_transitions, TransitionMode::Strict);
        assert!(cfg.retain_specialized_payloads);
        assert_eq!(cfg.log_level, "info");
    }
}

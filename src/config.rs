use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use validator::{Validate, ValidationError, ValidationErrors};

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_AUTH_BASE_URL: &str = "http://192.168.0.110:8083";
const DEFAULT_API_BASE_URL: &str = "http://192.168.0.110:8081";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const CONFIG_DIR: &str = "config";
const HOME_DIR_NAME: &str = ".poultry";

/// Client configuration with validation
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the authentication service (login, vendor signup)
    #[validate(url)]
    pub auth_base_url: String,

    /// Base URL of the stock and orders service
    #[validate(url)]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Optional HMAC secret; when set, token signatures are verified before role dispatch
    #[serde(default)]
    pub jwt_secret: Option<String>,

    /// Where the session token is kept. Defaults to `$POULTRY_CLI_HOME` or `~/.poultry`.
    #[serde(default)]
    pub session_path: Option<PathBuf>,

    /// Where submitted field reports are kept
    #[serde(default)]
    pub reports_path: Option<PathBuf>,

    /// Application environment
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level
    #[validate(custom = "validate_log_level")]
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: default_request_timeout_secs(),
            jwt_secret: None,
            session_path: None,
            reports_path: None,
            environment: default_environment(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Custom error type for configuration
#[derive(Debug, Error)]
pub enum ClientConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

impl ClientConfig {
    /// Builds a config pointing both services at one base URL. Mostly useful in tests.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            auth_base_url: base_url.clone(),
            api_base_url: base_url,
            ..Self::default()
        }
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Resolved session file location.
    pub fn session_file(&self) -> Option<PathBuf> {
        self.session_path
            .clone()
            .or_else(|| home_dir().map(|dir| dir.join("session.json")))
    }

    /// Resolved reports file location.
    pub fn reports_file(&self) -> Option<PathBuf> {
        self.reports_path
            .clone()
            .or_else(|| home_dir().map(|dir| dir.join("reports.json")))
    }
}

/// `$POULTRY_CLI_HOME` if set, otherwise `~/.poultry`.
fn home_dir() -> Option<PathBuf> {
    if let Ok(dir) = env::var("POULTRY_CLI_HOME") {
        if !dir.trim().is_empty() {
            return Some(PathBuf::from(dir));
        }
    }

    env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(HOME_DIR_NAME))
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Validates log level values
fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if valid_levels.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("log_level");
        err.message = Some("Must be one of: trace, debug, info, warn, error".into());
        Err(err)
    }
}

/// Initializes tracing using the provided log level as the default filter
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("poultry_ops={},poultry_cli={}", level, level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    // Logs go to stderr so `--json` output on stdout stays machine readable.
    if json {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive))
            .with_writer(std::io::stderr)
            .json()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive))
            .with_writer(std::io::stderr)
            .try_init();
    }
}

/// Loads client configuration from the `config/` directory under the working directory.
pub fn load_config() -> Result<ClientConfig, ClientConfigError> {
    load_config_from(Path::new(CONFIG_DIR))
}

/// Loads client configuration
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults
/// 2. `{config_dir}/default.toml`
/// 3. `{config_dir}/{env}.toml`, env taken from RUN_ENV or APP_ENV
/// 4. Environment variables (`POULTRY__*`)
pub fn load_config_from(config_dir: &Path) -> Result<ClientConfig, ClientConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !config_dir.exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            config_dir.display()
        );
    }

    let config = Config::builder()
        .set_default("auth_base_url", DEFAULT_AUTH_BASE_URL)?
        .set_default("api_base_url", DEFAULT_API_BASE_URL)?
        .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?
        .set_default("environment", run_env.as_str())?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::from(config_dir.join("default")).required(false))
        .add_source(File::from(config_dir.join(&run_env)).required(false))
        .add_source(Environment::with_prefix("POULTRY").separator("__"))
        .build()?;

    let client_config: ClientConfig = config.try_deserialize()?;
    client_config.validate()?;

    info!("Configuration loaded successfully");
    Ok(client_config)
}

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "fixtura.toml";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub quoting: QuotingConfig,
    pub logging: LoggingConfig,
}

/// Quote-engine defaults applied when a request does not carry its own.
#[derive(Clone, Debug, PartialEq)]
pub struct QuotingConfig {
    pub default_tax_rate: Decimal,
    pub default_currency: String,
    pub validity_days: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

/// Raw string overrides, highest precedence. `from_env` reads the
/// `FIXTURA_*` variables; tests construct the struct directly.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub tax_rate: Option<String>,
    pub currency: Option<String>,
    pub validity_days: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

impl ConfigOverrides {
    pub fn from_env() -> Self {
        Self {
            tax_rate: env::var("FIXTURA_TAX_RATE").ok(),
            currency: env::var("FIXTURA_CURRENCY").ok(),
            validity_days: env::var("FIXTURA_VALIDITY_DAYS").ok(),
            log_level: env::var("FIXTURA_LOG_LEVEL").ok(),
            log_format: env::var("FIXTURA_LOG_FORMAT").ok(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    /// Explicit config file path. Falls back to `FIXTURA_CONFIG`, then to
    /// `fixtura.toml` in the working directory when that exists.
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    /// `None` means read the process environment.
    pub overrides: Option<ConfigOverrides>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    quoting: RawQuoting,
    #[serde(default)]
    logging: RawLogging,
}

#[derive(Debug, Default, Deserialize)]
struct RawQuoting {
    default_tax_rate: Option<Decimal>,
    default_currency: Option<String>,
    validity_days: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLogging {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            quoting: QuotingConfig {
                default_tax_rate: Decimal::new(20, 0),
                default_currency: "EUR".to_owned(),
                validity_days: 30,
            },
            logging: LoggingConfig { level: "info".to_owned(), format: LogFormat::Compact },
        }
    }
}

impl AppConfig {
    /// Defaults, then the config file when present, then overrides.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match resolve_config_path(&options) {
            Some(path) => {
                let raw = read_config_file(&path)?;
                config.apply_raw(raw);
            }
            None if options.require_file => {
                let fallback = options.config_path.unwrap_or_else(|| DEFAULT_CONFIG_FILE.into());
                return Err(ConfigError::MissingConfigFile(fallback));
            }
            None => {}
        }

        let overrides = options.overrides.unwrap_or_else(ConfigOverrides::from_env);
        config.apply_overrides(&overrides)?;

        config.validate()?;
        Ok(config)
    }

    fn apply_raw(&mut self, raw: RawConfig) {
        if let Some(tax_rate) = raw.quoting.default_tax_rate {
            self.quoting.default_tax_rate = tax_rate;
        }
        if let Some(currency) = raw.quoting.default_currency {
            self.quoting.default_currency = currency;
        }
        if let Some(days) = raw.quoting.validity_days {
            self.quoting.validity_days = days;
        }
        if let Some(level) = raw.logging.level {
            self.logging.level = level;
        }
        if let Some(format) = raw.logging.format {
            self.logging.format = format;
        }
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> Result<(), ConfigError> {
        if let Some(value) = &overrides.tax_rate {
            self.quoting.default_tax_rate = Decimal::from_str(value).map_err(|_| {
                ConfigError::InvalidEnvOverride {
                    key: "FIXTURA_TAX_RATE".to_owned(),
                    value: value.clone(),
                }
            })?;
        }
        if let Some(value) = &overrides.currency {
            self.quoting.default_currency = value.clone();
        }
        if let Some(value) = &overrides.validity_days {
            self.quoting.validity_days = value.parse().map_err(|_| {
                ConfigError::InvalidEnvOverride {
                    key: "FIXTURA_VALIDITY_DAYS".to_owned(),
                    value: value.clone(),
                }
            })?;
        }
        if let Some(value) = &overrides.log_level {
            self.logging.level = value.clone();
        }
        if let Some(value) = &overrides.log_format {
            self.logging.format = match value.as_str() {
                "compact" => LogFormat::Compact,
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidEnvOverride {
                        key: "FIXTURA_LOG_FORMAT".to_owned(),
                        value: value.clone(),
                    })
                }
            };
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let tax_rate = self.quoting.default_tax_rate;
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE_HUNDRED {
            return Err(ConfigError::Validation(format!(
                "quoting.default_tax_rate must be within 0..=100, got {tax_rate}"
            )));
        }

        let currency = &self.quoting.default_currency;
        if currency.len() != 3 || !currency.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ConfigError::Validation(format!(
                "quoting.default_currency must be a three-letter ISO code, got `{currency}`"
            )));
        }

        if self.quoting.validity_days == 0 {
            return Err(ConfigError::Validation(
                "quoting.validity_days must be at least 1".to_owned(),
            ));
        }

        Ok(())
    }
}

fn resolve_config_path(options: &LoadOptions) -> Option<PathBuf> {
    if let Some(path) = &options.config_path {
        return Some(path.clone());
    }
    if let Ok(path) = env::var("FIXTURA_CONFIG") {
        return Some(PathBuf::from(path));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    default.exists().then_some(default)
}

fn read_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str(&contents)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

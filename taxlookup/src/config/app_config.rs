use super::{DatasetConfig, GeocoderConfig, RedirectConfig, ServerConfig};
use crate::app::AppError;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// service configuration. values are layered, later sources winning:
/// built-in defaults, an optional TOML file, `TAXLOOKUP__<SECTION>__<KEY>`
/// environment variables, then `PORT` and `REDIRECT_URL` as set by the
/// hosting platform.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub geocoder: GeocoderConfig,
    pub redirect: RedirectConfig,
}

impl AppConfig {
    pub const ENV_PREFIX: &str = "TAXLOOKUP";

    pub fn load(config_file: Option<&Path>) -> Result<AppConfig, AppError> {
        let mut builder = Config::builder();
        if let Some(f) = config_file {
            log::info!("reading configuration from {f:?}");
            builder = builder.add_source(File::from(f).format(FileFormat::Toml));
        }
        builder = builder.add_source(
            Environment::with_prefix(Self::ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );
        for (variable, key) in [("PORT", "server.port"), ("REDIRECT_URL", "redirect.target_url")] {
            if let Ok(value) = std::env::var(variable) {
                builder = builder
                    .set_override(key, value)
                    .map_err(|e| config_error(&format!("failed applying ${variable}"), e))?;
            }
        }
        Self::build(builder)
    }

    /// reads configuration from TOML text alone, without the environment.
    pub fn from_toml(text: &str) -> Result<AppConfig, AppError> {
        let builder = Config::builder().add_source(File::from_str(text, FileFormat::Toml));
        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<config::builder::DefaultState>) -> Result<AppConfig, AppError> {
        let config = builder
            .build()
            .map_err(|e| config_error("failed reading configuration", e))?;
        let app_config = config
            .try_deserialize::<AppConfig>()
            .map_err(|e| config_error("failed decoding configuration", e))?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// rejects values the router cannot serve.
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, path) in [
            ("server.health_path", &self.server.health_path),
            ("redirect.health_path", &self.redirect.health_path),
        ] {
            if !path.starts_with('/') || path == "/" {
                return Err(AppError::InvalidConfiguration(format!(
                    "{name} must be an absolute path other than '/', found '{path}'"
                )));
            }
            // route captures and wildcards make the router panic
            if path.contains([':', '*', '{', '}']) {
                return Err(AppError::InvalidConfiguration(format!(
                    "{name} must be a literal path without ':', '*', '{{' or '}}', found '{path}'"
                )));
            }
        }
        if self.server.health_path.starts_with("/api/") {
            return Err(AppError::InvalidConfiguration(format!(
                "server.health_path '{}' collides with the /api routes",
                self.server.health_path
            )));
        }
        if self.dataset.tolerance_deg < 0.0 {
            return Err(AppError::InvalidConfiguration(format!(
                "dataset.tolerance_deg must not be negative, found {}",
                self.dataset.tolerance_deg
            )));
        }
        Ok(())
    }
}

fn config_error(msg: &str, source: config::ConfigError) -> AppError {
    AppError::ConfigReadError {
        msg: msg.to_string(),
        source,
    }
}

// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{FormatterError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

const ENV_PREFIX: &str = "DOCX_FORMATTER";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub processing: ProcessingConfig,
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessingConfig {
    /// Uploads whose filename does not end with this suffix are rejected.
    pub allowed_extension: String,
    /// Upper bound on the decompressed size of all parts of one document.
    pub max_unpacked_mb: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PreviewConfig {
    pub escape_html: bool,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1_048_576)
    }
}

impl ProcessingConfig {
    pub fn max_unpacked_bytes(&self) -> usize {
        self.max_unpacked_mb.saturating_mul(1_048_576)
    }
}

impl Config {
    /// Layers built-in defaults, the optional TOML file and `DOCX_FORMATTER__*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| FormatterError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new("config/default.toml")).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| FormatterError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| FormatterError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                max_upload_mb: 25,
            },
            processing: ProcessingConfig {
                allowed_extension: ".docx".to_string(),
                max_unpacked_mb: 100,
            },
            preview: PreviewConfig { escape_html: false },
        }
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_port(self.server.port)
            .map_err(|e| FormatterError::Config(e.to_string()))?;

        if self.server.max_upload_mb == 0 {
            return Err(FormatterError::Config(
                "max_upload_mb must be greater than 0".to_string(),
            ));
        }

        if self.processing.max_unpacked_mb == 0 {
            return Err(FormatterError::Config(
                "max_unpacked_mb must be greater than 0".to_string(),
            ));
        }

        if !self.processing.allowed_extension.starts_with('.') {
            return Err(FormatterError::Config(format!(
                "allowed_extension must start with '.': {}",
                self.processing.allowed_extension
            )));
        }

        Ok(())
    }
}

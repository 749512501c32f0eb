//! Configuration file loading
//!
//! The format follows the file extension: `.toml` or `.json`.

use serde::de::DeserializeOwned;

use crate::{Error, NormalizedPath, Result, io};

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the extension of `path`.
    pub fn detect(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or("").to_lowercase();
        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }

    fn parse<T: DeserializeOwned>(self, content: &str) -> std::result::Result<T, String> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// Read a configuration file.
///
/// A missing file yields `T::default()`, so every field of `T` should have a
/// serde default.
pub fn load_config<T: DeserializeOwned + Default>(path: &NormalizedPath) -> Result<T> {
    let format = ConfigFormat::detect(path)?;
    if !path.exists() {
        tracing::debug!(path = %path, "Config file absent, using defaults");
        return Ok(T::default());
    }

    let content = io::read_text(path)?;
    format.parse(&content).map_err(|message| Error::ConfigParse {
        path: path.to_native(),
        format: format.name().to_string(),
        message,
    })
}

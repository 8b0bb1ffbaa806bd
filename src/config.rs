// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::Mode;
use crate::model::mode::DEFAULT_COUNTRY_CODE;
use anyhow::{Context, Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}
fn default_album_name() -> String {
    "SocialQR".to_string()
}
fn default_module_pixels() -> u32 {
    8
}
fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Dialling prefix preselected on the WhatsApp form.
    #[serde(default = "default_country_code")]
    pub default_country_code: String,
    /// Gallery album that saved QR codes are added to.
    #[serde(default = "default_album_name")]
    pub album_name: String,
    #[serde(default)]
    pub default_mode: Mode,
    /// Edge length in pixels of one QR module in exported PNGs.
    #[serde(default = "default_module_pixels")]
    pub qr_module_pixels: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_country_code: default_country_code(),
            album_name: default_album_name(),
            default_mode: Mode::default(),
            qr_module_pixels: default_module_pixels(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like [`Config::load`] but treats a missing file as "use defaults".
    /// Syntax and permission errors are still reported.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        // Walk the error chain and look for an underlying IO NotFound.
        err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        })
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        atomic_write(&path, toml_str)
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}

// Write to a sibling temp file, then rename over the target.
fn atomic_write(path: &Path, contents: String) -> Result<()> {
    let tmp = path.with_extension("toml.tmp");
    fs::write(&tmp, contents)
        .with_context(|| format!("Failed to write temp file '{}'", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace '{}'", path.display()))?;
    Ok(())
}

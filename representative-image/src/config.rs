//! Settings loading using Figment.
//!
//! Sources are merged in precedence order (later sources override earlier ones):
//! 1. Default values
//! 2. Settings files, in the order they were added
//! 3. Environment variables with the `REPRESENTATIVE_IMAGE_` prefix
//!
//! Nested keys use `__` in environment variable names, so
//! `REPRESENTATIVE_IMAGE_ENTITY_DEFAULTS__NODE__ARTICLE=field_image` sets
//! `entity_defaults.node.article`.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use tracing::{debug, trace};

use crate::error::{RepresentativeImageError, Result};
use crate::logging::SettingsSummary;
use crate::settings::{Settings, SettingsSource};

/// Default environment variable prefix.
pub const ENV_PREFIX: &str = "REPRESENTATIVE_IMAGE_";

/// Builds a `Settings` value from defaults, files and the environment.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    defaults: Settings,
    files: Vec<PathBuf>,
    env_prefix: Option<String>,
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self {
            defaults: Settings::default(),
            files: Vec::new(),
            env_prefix: Some(ENV_PREFIX.to_string()),
        }
    }

    /// Values used when no file or variable sets them.
    pub fn with_defaults(mut self, defaults: Settings) -> Self {
        self.defaults = defaults;
        self
    }

    /// Add a settings file. Missing files are skipped.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Read environment variables with a different prefix.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Ignore the environment entirely.
    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// Extract the merged settings.
    pub fn load(&self) -> Result<Settings> {
        let settings: Settings = self.build_figment()?.extract()?;
        debug!(settings = %SettingsSummary(&settings), "loaded representative image settings");
        Ok(settings)
    }

    /// Wrap this loader as a settings source that reloads on every call.
    pub fn into_source(self) -> FigmentSettings {
        FigmentSettings { loader: self }
    }

    fn build_figment(&self) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(&self.defaults));

        for path in &self.files {
            trace!(path = %path.display(), "merging settings file");
            figment = figment.merge(file_provider(path)?);
        }

        if let Some(prefix) = &self.env_prefix {
            figment = figment.merge(
                Env::prefixed(prefix)
                    .map(|key| key.as_str().to_lowercase().into())
                    .split("__"),
            );
        }

        Ok(figment)
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the figment provider for a file from its extension.
fn file_provider(path: &Path) -> Result<Figment> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("toml") => Ok(Figment::from(Toml::file(path))),
        Some("yaml") | Some("yml") => Ok(Figment::from(Yaml::file(path))),
        Some("json") => Ok(Figment::from(Json::file(path))),
        _ => Err(RepresentativeImageError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Settings source backed by a [`SettingsLoader`].
///
/// No caching is performed: every call re-reads files and environment, so
/// edits take effect on the next resolution.
#[derive(Debug, Clone)]
pub struct FigmentSettings {
    loader: SettingsLoader,
}

impl SettingsSource for FigmentSettings {
    fn settings(&self) -> Result<Settings> {
        self.loader.load()
    }
}

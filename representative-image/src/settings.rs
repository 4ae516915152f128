//! Persisted representative image settings.
//!
//! The host owns persistence; the core only reads a `Settings` snapshot
//! through [`SettingsSource`] at the start of every call.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Cache tag attached to everything rendered from these settings.
pub const SETTINGS_CACHE_TAG: &str = "config:representative_image.settings";

/// Global fallback policy used when no override or alterer produced an image.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Option<String>", into = "String")]
pub enum DefaultBehavior {
    /// Render nothing.
    #[default]
    Unset,
    /// First non-empty image field in catalog order.
    First,
    /// The site logo.
    Logo,
    /// `First`, then the site logo.
    FirstOrLogo,
    /// Legacy: the first image field's configured default image.
    Default,
    /// Legacy: `First`, then the first configured default image.
    FirstOrDefault,
}

impl DefaultBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultBehavior::Unset => "",
            DefaultBehavior::First => "first",
            DefaultBehavior::Logo => "logo",
            DefaultBehavior::FirstOrLogo => "first_or_logo",
            DefaultBehavior::Default => "default",
            DefaultBehavior::FirstOrDefault => "first_or_default",
        }
    }

    /// Whether the policy scans image fields for a stored value.
    pub fn scans_fields(&self) -> bool {
        matches!(
            self,
            DefaultBehavior::First | DefaultBehavior::FirstOrLogo | DefaultBehavior::FirstOrDefault
        )
    }

    /// Whether the policy ends with the site logo.
    pub fn uses_logo(&self) -> bool {
        matches!(self, DefaultBehavior::Logo | DefaultBehavior::FirstOrLogo)
    }

    /// Whether the policy ends with a field's configured default image.
    pub fn uses_default_image(&self) -> bool {
        matches!(
            self,
            DefaultBehavior::Default | DefaultBehavior::FirstOrDefault
        )
    }
}

impl From<Option<String>> for DefaultBehavior {
    fn from(value: Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            Some("first") => DefaultBehavior::First,
            Some("logo") => DefaultBehavior::Logo,
            Some("first_or_logo") => DefaultBehavior::FirstOrLogo,
            Some("default") => DefaultBehavior::Default,
            Some("first_or_default") => DefaultBehavior::FirstOrDefault,
            _ => DefaultBehavior::Unset,
        }
    }
}

impl From<DefaultBehavior> for String {
    fn from(value: DefaultBehavior) -> Self {
        value.as_str().to_string()
    }
}

/// Snapshot of the representative image configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub default_behavior: DefaultBehavior,
    /// `entity_type → bundle → field_name`. Absent entries mean no override.
    #[serde(default)]
    pub entity_defaults: IndexMap<String, IndexMap<String, String>>,
}

impl Settings {
    pub fn with_behavior(mut self, behavior: DefaultBehavior) -> Self {
        self.default_behavior = behavior;
        self
    }

    /// Set the override field for a bundle.
    pub fn with_override(
        mut self,
        entity_type: impl Into<String>,
        bundle: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        self.entity_defaults
            .entry(entity_type.into())
            .or_default()
            .insert(bundle.into(), field.into());
        self
    }

    /// The override field configured for a bundle, if any. Blank names count
    /// as unset.
    pub fn override_for(&self, entity_type: &str, bundle: &str) -> Option<&str> {
        self.entity_defaults
            .get(entity_type)
            .and_then(|bundles| bundles.get(bundle))
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
    }
}

/// Read-only access to the current settings.
pub trait SettingsSource: Send + Sync {
    /// Current settings. Called once per resolution.
    fn settings(&self) -> Result<Settings>;

    /// Cache tags the host invalidates when these settings change.
    fn cache_tags(&self) -> Vec<String> {
        vec![SETTINGS_CACHE_TAG.to_string()]
    }
}

/// Fixed settings held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    settings: Settings,
}

impl StaticSettings {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl SettingsSource for StaticSettings {
    fn settings(&self) -> Result<Settings> {
        Ok(self.settings.clone())
    }
}

impl From<Settings> for StaticSettings {
    fn from(settings: Settings) -> Self {
        Self::new(settings)
    }
}

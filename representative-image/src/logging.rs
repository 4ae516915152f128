//! Log formatting for settings.

use std::fmt;

use crate::settings::Settings;

/// One-line rendering of [`Settings`] for a log field.
///
/// ```ignore
/// debug!(settings = %SettingsSummary(&settings), "loaded settings");
/// // behavior=first overrides=[node.article=field_hero]
/// ```
pub struct SettingsSummary<'a>(pub &'a Settings);

impl fmt::Display for SettingsSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let behavior = match self.0.default_behavior.as_str() {
            "" => "unset",
            name => name,
        };
        write!(f, "behavior={} overrides=[", behavior)?;

        let overrides = self.0.entity_defaults.iter().flat_map(|(entity_type, bundles)| {
            bundles
                .iter()
                .map(move |(bundle, field)| (entity_type, bundle, field))
        });
        for (i, (entity_type, bundle, field)) in overrides.enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}.{}={}", entity_type, bundle, field)?;
        }
        f.write_str("]")
    }
}

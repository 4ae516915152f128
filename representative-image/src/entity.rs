//! Read-only view of a content entity.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::ImageItem;

/// A content entity as seen by the resolver. The host owns the entity; the
/// resolver only reads it.
pub trait Entity {
    /// Entity type name, e.g. `node` or `user`.
    fn entity_type(&self) -> &str;

    /// Bundle name, e.g. `article`.
    fn bundle(&self) -> &str;

    /// Image items stored in a field. `None` when the entity has no such field.
    fn field_items(&self, field: &str) -> Option<&[ImageItem]>;

    /// Canonical URL of the entity, used for `content` links.
    fn canonical_url(&self) -> Result<String>;

    /// A field is empty when it is missing or holds no items.
    fn is_field_empty(&self, field: &str) -> bool {
        self.field_items(field).map_or(true, <[ImageItem]>::is_empty)
    }

    /// First item of a non-empty field.
    fn first_item(&self, field: &str) -> Option<&ImageItem> {
        self.field_items(field).and_then(<[ImageItem]>::first)
    }
}

/// An entity held in memory, deserializable from YAML.
///
/// ```yaml
/// entity_type: node
/// bundle: article
/// url: https://example.com/node/1
/// fields:
///   field_image:
///     - file: "12"
///       alt: Sunrise
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredEntity {
    pub entity_type: String,
    pub bundle: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub fields: IndexMap<String, Vec<ImageItem>>,
}

impl StoredEntity {
    pub fn new(entity_type: impl Into<String>, bundle: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            bundle: bundle.into(),
            url: String::new(),
            fields: IndexMap::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set a field's items. An empty vector declares an empty field.
    pub fn with_field(mut self, name: impl Into<String>, items: Vec<ImageItem>) -> Self {
        self.fields.insert(name.into(), items);
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }
}

impl Entity for StoredEntity {
    fn entity_type(&self) -> &str {
        &self.entity_type
    }

    fn bundle(&self) -> &str {
        &self.bundle
    }

    fn field_items(&self, field: &str) -> Option<&[ImageItem]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    fn canonical_url(&self) -> Result<String> {
        Ok(self.url.clone())
    }
}

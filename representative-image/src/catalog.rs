//! Field catalog lookup.
//!
//! The host declares which fields exist on each bundle. [`FieldCatalog`] is
//! the seam the host implements; the provided methods filter that catalog for
//! image fields and the representative image marker field.

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{RepresentativeImageError, Result};
use crate::types::FieldDescriptor;

/// Source of field definitions for a bundle.
pub trait FieldCatalog: Send + Sync {
    /// All fields declared on `entity_type.bundle`, in declared order.
    ///
    /// Returns [`RepresentativeImageError::UnknownBundle`] for bundles the
    /// host does not know about.
    fn field_definitions(&self, entity_type: &str, bundle: &str) -> Result<Vec<FieldDescriptor>>;

    /// Image fields that may serve as the representative image, keyed by
    /// field name and labelled `"<label> (<field_name>)"`, in catalog order.
    fn supported_image_fields(
        &self,
        entity_type: &str,
        bundle: &str,
    ) -> Result<IndexMap<String, String>> {
        Ok(self
            .field_definitions(entity_type, bundle)?
            .into_iter()
            .filter(|field| field.kind.is_image())
            .map(|field| {
                let label = format!("{} ({})", field.label, field.name);
                (field.name, label)
            })
            .collect())
    }

    /// Name of the bundle's representative image marker field, if any.
    ///
    /// When several marker fields exist the first in catalog order wins.
    fn representative_image_field(&self, entity_type: &str, bundle: &str) -> Result<Option<String>> {
        let fields = self.field_definitions(entity_type, bundle)?;
        let mut markers = fields
            .into_iter()
            .filter(|field| field.kind.is_representative_image())
            .map(|field| field.name);

        let first = markers.next();
        let ignored: Vec<String> = markers.collect();
        if !ignored.is_empty() {
            warn!(
                entity_type,
                bundle,
                used = first.as_deref().unwrap_or_default(),
                ?ignored,
                "more than one representative image field on bundle"
            );
        }
        Ok(first)
    }

    /// A single field definition by name.
    fn field(&self, entity_type: &str, bundle: &str, name: &str) -> Result<Option<FieldDescriptor>> {
        Ok(self
            .field_definitions(entity_type, bundle)?
            .into_iter()
            .find(|field| field.name == name))
    }
}

/// In-memory catalog: `entity_type → bundle → fields`.
///
/// On disk this is a single YAML document:
/// ```yaml
/// node:
///   article:
///     - name: field_image
///       label: Image
///       type:
///         kind: image
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    bundles: IndexMap<String, IndexMap<String, Vec<FieldDescriptor>>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a bundle's fields.
    pub fn with_bundle(
        mut self,
        entity_type: impl Into<String>,
        bundle: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self> {
        self.insert_bundle(entity_type, bundle, fields)?;
        Ok(self)
    }

    /// Add (or replace) a bundle's fields, rejecting duplicate field names.
    pub fn insert_bundle(
        &mut self,
        entity_type: impl Into<String>,
        bundle: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Result<()> {
        let entity_type = entity_type.into();
        let bundle = bundle.into();

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(RepresentativeImageError::DuplicateField {
                    entity_type,
                    bundle,
                    name: field.name.clone(),
                });
            }
        }

        self.bundles
            .entry(entity_type)
            .or_default()
            .insert(bundle, fields);
        Ok(())
    }

    /// Parse a catalog from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let raw: IndexMap<String, IndexMap<String, Vec<FieldDescriptor>>> =
            serde_yaml_ng::from_str(yaml)?;

        let mut catalog = Self::new();
        for (entity_type, bundles) in raw {
            for (bundle, fields) in bundles {
                catalog.insert_bundle(entity_type.clone(), bundle, fields)?;
            }
        }
        debug!(
            entity_types = catalog.bundles.len(),
            bundles = catalog.bundles.values().map(IndexMap::len).sum::<usize>(),
            "field catalog loaded"
        );
        Ok(catalog)
    }

    /// Read a catalog YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }
}

impl FieldCatalog for StaticCatalog {
    fn field_definitions(&self, entity_type: &str, bundle: &str) -> Result<Vec<FieldDescriptor>> {
        self.bundles
            .get(entity_type)
            .and_then(|bundles| bundles.get(bundle))
            .cloned()
            .ok_or_else(|| RepresentativeImageError::unknown_bundle(entity_type, bundle))
    }
}

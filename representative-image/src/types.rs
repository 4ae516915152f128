//! Core field, image and display types.
//!
//! Field descriptors mirror what the host's field catalog declares for a
//! bundle. Image items are the values stored in image fields. All types
//! serialize to/from YAML via serde so catalogs and fixtures can live on disk.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What to render when nothing was resolved for a field.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmptyBehavior {
    /// Render nothing at all.
    Nothing,
    /// Render the first image field, in catalog order, that holds a value.
    First,
    /// Fall back to the field's configured default image, if any.
    #[default]
    #[serde(alias = "default")]
    DefaultImage,
}

/// The declared kind of a field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// A plain image field.
    Image,
    /// The marker field that renders the entity's representative image.
    RepresentativeImage {
        /// Image field this marker mirrors, when configured on the field.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source_field: Option<String>,
        #[serde(default)]
        behavior: EmptyBehavior,
    },
    /// Anything else: text, numbers, references.
    #[serde(other)]
    Other,
}

impl FieldKind {
    pub fn is_image(&self) -> bool {
        matches!(self, FieldKind::Image)
    }

    pub fn is_representative_image(&self) -> bool {
        matches!(self, FieldKind::RepresentativeImage { .. })
    }
}

/// Identifier of a stored file, as the file store knows it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct FileId(pub String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FileId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A default image configured on a field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefaultImage {
    pub file: FileId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl DefaultImage {
    /// Build a presentation-only item from this default image.
    pub fn to_item(&self) -> ImageItem {
        ImageItem {
            file: self.file.clone(),
            alt: self.alt.clone(),
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            is_default: true,
        }
    }
}

/// Field-level settings relevant to image rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_image: Option<DefaultImage>,
}

/// One declared field on a bundle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Instance-level settings (this bundle's copy of the field).
    #[serde(default)]
    pub settings: FieldSettings,
    /// Storage-level settings shared by every bundle using the field.
    #[serde(default)]
    pub storage_settings: FieldSettings,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            settings: FieldSettings::default(),
            storage_settings: FieldSettings::default(),
        }
    }

    /// Shorthand for a plain image field.
    pub fn image(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Image)
    }

    pub fn with_default_image(mut self, image: DefaultImage) -> Self {
        self.settings.default_image = Some(image);
        self
    }

    pub fn with_storage_default_image(mut self, image: DefaultImage) -> Self {
        self.storage_settings.default_image = Some(image);
        self
    }

    /// Default image, checking instance settings before storage settings.
    pub fn effective_default_image(&self) -> Option<&DefaultImage> {
        self.settings
            .default_image
            .as_ref()
            .or(self.storage_settings.default_image.as_ref())
    }

    /// What the marker field renders when nothing resolves. Plain fields
    /// fall back to their default image.
    pub fn empty_behavior(&self) -> EmptyBehavior {
        match &self.kind {
            FieldKind::RepresentativeImage { behavior, .. } => *behavior,
            _ => EmptyBehavior::DefaultImage,
        }
    }
}

/// A single stored image value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageItem {
    pub file: FileId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Set on substituted default images; such items are never stored, so
    /// the flag is never read from input.
    #[serde(skip_deserializing, skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
}

impl ImageItem {
    pub fn new(file: impl Into<FileId>) -> Self {
        Self {
            file: file.into(),
            alt: None,
            title: None,
            width: None,
            height: None,
            is_default: false,
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// The outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepresentativeImage {
    /// A value read from (or substituted for) an image field.
    Field { field: String, item: ImageItem },
    /// A direct absolute URL: the site logo or a URL set by an alterer.
    Url(String),
}

impl RepresentativeImage {
    pub fn field(field: impl Into<String>, item: ImageItem) -> Self {
        Self::Field {
            field: field.into(),
            item,
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    /// The image item, when this is a field value.
    pub fn item(&self) -> Option<&ImageItem> {
        match self {
            RepresentativeImage::Field { item, .. } => Some(item),
            RepresentativeImage::Url(_) => None,
        }
    }
}

/// Where a rendered image links to.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Option<String>", into = "String")]
pub enum LinkTarget {
    #[default]
    None,
    /// The entity's canonical URL.
    Content,
    /// The referenced file's canonical URL.
    File,
}

impl LinkTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkTarget::None => "",
            LinkTarget::Content => "content",
            LinkTarget::File => "file",
        }
    }
}

impl From<Option<String>> for LinkTarget {
    fn from(value: Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            Some("content") => LinkTarget::Content,
            Some("file") => LinkTarget::File,
            _ => LinkTarget::None,
        }
    }
}

impl From<LinkTarget> for String {
    fn from(value: LinkTarget) -> Self {
        value.as_str().to_string()
    }
}

/// Per-call formatting options supplied by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Image style name; `None` or empty renders the original image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_style: Option<String>,
    #[serde(default)]
    pub link: LinkTarget,
    #[serde(default)]
    pub empty: EmptyBehavior,
}

impl DisplayOptions {
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.image_style = Some(style.into());
        self
    }

    pub fn with_link(mut self, link: LinkTarget) -> Self {
        self.link = link;
        self
    }

    pub fn with_empty(mut self, empty: EmptyBehavior) -> Self {
        self.empty = empty;
        self
    }

    /// The requested style, treating an empty name as "original image".
    pub fn style(&self) -> Option<&str> {
        self.image_style
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// A display-ready representative image.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RenderUnit {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cache_tags: Vec<String>,
}

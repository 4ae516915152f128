//! Representative image selection
//!
//! `representative-image` picks the single image that stands for a content
//! entity in listings, teasers and feeds. The host application owns entities,
//! field definitions, configuration storage and file URLs; this crate only
//! reads them through small collaborator traits.
//!
//! # Architecture
//!
//! - **Field catalog lookup** ([`FieldCatalog`]): which image fields a bundle declares
//! - **Resolution** ([`Resolver`]): override → alteration hooks → fallback policy
//! - **Presentation** ([`Presenter`]): URL, image style, link target, default image substitution
//! - **Consumers** ([`FieldFormatter`], [`ViewsField`], [`TokenReplacer`]): resolve then present
//!
//! Settings are read through [`SettingsSource`]; [`SettingsLoader`] builds them
//! from files and `REPRESENTATIVE_IMAGE_` environment variables with figment.

pub mod alter;
pub mod catalog;
pub mod config;
pub mod consumers;
pub mod entity;
pub mod error;
pub mod files;
pub mod logging;
pub mod presenter;
pub mod resolver;
pub mod settings;
pub mod types;

pub use alter::{hook_name, AlterRegistry, ImageAlterer, RenderAlterer, VIEWS_RENDER_HOOK};
pub use catalog::{FieldCatalog, StaticCatalog};
pub use config::{FigmentSettings, SettingsLoader, ENV_PREFIX};
pub use consumers::{FieldFormatter, Renderer, TokenReplacer, ViewsField};
pub use entity::{Entity, StoredEntity};
pub use error::{RepresentativeImageError, Result};
pub use files::{FileStore, LogoSource, StaticFileStore, StaticLogo};
pub use logging::SettingsSummary;
pub use presenter::Presenter;
pub use resolver::{Resolver, ResolverBuilder};
pub use settings::{DefaultBehavior, Settings, SettingsSource, StaticSettings, SETTINGS_CACHE_TAG};
pub use types::{
    DefaultImage, DisplayOptions, EmptyBehavior, FieldDescriptor, FieldKind, FieldSettings, FileId,
    ImageItem, LinkTarget, RenderUnit, RepresentativeImage,
};

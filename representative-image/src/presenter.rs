//! Presentation adapter.
//!
//! Turns a resolved representative image into a [`RenderUnit`]: absolute URL,
//! optional image style, optional link target and the settings cache tags.
//! When nothing was resolved, a field's configured default image may be
//! substituted for the single render; the entity itself is never modified.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::entity::Entity;
use crate::error::Result;
use crate::files::FileStore;
use crate::settings::SettingsSource;
use crate::types::{
    DisplayOptions, EmptyBehavior, FieldDescriptor, ImageItem, LinkTarget, RenderUnit,
    RepresentativeImage,
};

/// Renders resolved images through the host's file store.
#[derive(Clone)]
pub struct Presenter {
    files: Arc<dyn FileStore>,
    settings: Arc<dyn SettingsSource>,
}

impl Presenter {
    pub fn new(files: Arc<dyn FileStore>, settings: Arc<dyn SettingsSource>) -> Self {
        Self { files, settings }
    }

    /// Present `resolved` for `entity`.
    ///
    /// `field` is the field being rendered, if any; its default image (instance
    /// settings first, then storage settings) stands in when nothing resolved
    /// and `options.empty` allows it. Returns `Ok(None)` when there is nothing
    /// to render.
    pub fn present(
        &self,
        resolved: Option<RepresentativeImage>,
        entity: &dyn Entity,
        field: Option<&FieldDescriptor>,
        options: &DisplayOptions,
    ) -> Result<Option<RenderUnit>> {
        let image = match resolved {
            Some(image) => image,
            None => match substitute_default(field, options.empty) {
                Some(image) => image,
                None => {
                    trace!(
                        entity_type = entity.entity_type(),
                        bundle = entity.bundle(),
                        "nothing to render"
                    );
                    return Ok(None);
                }
            },
        };

        let unit = match image {
            RepresentativeImage::Field { item, .. } => self.render_item(item, entity, options)?,
            RepresentativeImage::Url(url) => self.render_url(url, entity, options)?,
        };
        Ok(Some(unit))
    }

    fn render_item(
        &self,
        item: ImageItem,
        entity: &dyn Entity,
        options: &DisplayOptions,
    ) -> Result<RenderUnit> {
        let style = options.style();
        let url = match style {
            Some(style) => self.files.derivative_url(style, &item.file)?,
            None => self.files.file_url(&item.file)?,
        };
        let link = match options.link {
            LinkTarget::None => None,
            LinkTarget::Content => Some(entity.canonical_url()?),
            LinkTarget::File => Some(self.files.canonical_url(&item.file)?),
        };

        Ok(RenderUnit {
            url,
            style: style.map(str::to_string),
            link,
            alt: item.alt,
            title: item.title,
            width: item.width,
            height: item.height,
            is_default: item.is_default,
            cache_tags: self.settings.cache_tags(),
        })
    }

    /// Direct URLs (logo, alterer output) are not styled.
    fn render_url(
        &self,
        url: String,
        entity: &dyn Entity,
        options: &DisplayOptions,
    ) -> Result<RenderUnit> {
        if let Some(style) = options.style() {
            trace!(style, url = %url, "image style not applied to a direct URL");
        }
        let link = match options.link {
            LinkTarget::None => None,
            LinkTarget::Content => Some(entity.canonical_url()?),
            LinkTarget::File => Some(url.clone()),
        };

        Ok(RenderUnit {
            url,
            style: None,
            link,
            alt: None,
            title: None,
            width: None,
            height: None,
            is_default: false,
            cache_tags: self.settings.cache_tags(),
        })
    }
}

/// A presentation-only default image for an empty field.
fn substitute_default(
    field: Option<&FieldDescriptor>,
    empty: EmptyBehavior,
) -> Option<RepresentativeImage> {
    if empty != EmptyBehavior::DefaultImage {
        return None;
    }
    let field = field?;
    let default = field.effective_default_image()?;
    debug!(field = %field.name, file = %default.file, "substituting field default image");
    Some(RepresentativeImage::field(&field.name, default.to_item()))
}

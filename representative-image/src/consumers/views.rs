//! Query-result display field.

use std::sync::Arc;

use tracing::trace;

use super::{FieldFormatter, Renderer};
use crate::alter::{RenderAlterer, VIEWS_RENDER_HOOK};
use crate::entity::Entity;
use crate::error::Result;
use crate::types::{DisplayOptions, RenderUnit};

/// A result-row cell showing the entity's representative image.
///
/// The cell renders the bundle's `representative_image` field through the
/// field formatter with the view's style and link, so both show the same
/// image. Rows whose bundle has no such field render nothing.
#[derive(Clone)]
pub struct ViewsField {
    formatter: FieldFormatter,
    alterers: Vec<Arc<dyn RenderAlterer>>,
}

impl ViewsField {
    pub fn new(renderer: Renderer, options: DisplayOptions) -> Self {
        Self {
            formatter: FieldFormatter::new(renderer, options),
            alterers: Vec::new(),
        }
    }

    /// Add an alterer that may rewrite each rendered cell.
    pub fn with_alterer(mut self, alterer: Arc<dyn RenderAlterer>) -> Self {
        self.alterers.push(alterer);
        self
    }

    pub fn render(&self, entity: &dyn Entity) -> Result<Option<RenderUnit>> {
        let catalog = self.formatter.renderer().resolver().catalog();
        let entity_type = entity.entity_type();
        let bundle = entity.bundle();

        let Some(name) = catalog.representative_image_field(entity_type, bundle)? else {
            trace!(entity_type, bundle, "no representative image field on bundle");
            return Ok(None);
        };
        let Some(field) = catalog.field(entity_type, bundle, &name)? else {
            return Ok(None);
        };

        let mut unit = self.formatter.view(entity, &field)?;
        if !self.alterers.is_empty() {
            trace!(hook = VIEWS_RENDER_HOOK, alterers = self.alterers.len(), "invoking render hook");
        }
        for alterer in &self.alterers {
            alterer.alter_render(entity, &field.name, &mut unit);
        }
        Ok(unit)
    }
}

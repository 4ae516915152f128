//! Field formatter for the representative image marker field.

use tracing::trace;

use super::Renderer;
use crate::entity::Entity;
use crate::error::Result;
use crate::types::{
    DisplayOptions, EmptyBehavior, FieldDescriptor, FieldKind, RenderUnit, RepresentativeImage,
};

/// Renders a `representative_image` field on an entity.
///
/// A `source_field` configured on the marker field takes precedence when it
/// holds a value. Otherwise the marker's empty behavior decides: `first`
/// shows the first non-empty image field in catalog order, the others
/// resolve the entity normally and then render nothing or the field's
/// default image.
#[derive(Clone)]
pub struct FieldFormatter {
    renderer: Renderer,
    options: DisplayOptions,
}

impl FieldFormatter {
    pub fn new(renderer: Renderer, options: DisplayOptions) -> Self {
        Self { renderer, options }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn view(&self, entity: &dyn Entity, field: &FieldDescriptor) -> Result<Option<RenderUnit>> {
        let options = DisplayOptions {
            empty: field.empty_behavior(),
            ..self.options.clone()
        };

        let resolved = match source_image(entity, field) {
            Some(image) => Some(image),
            None if options.empty == EmptyBehavior::First => self.first_available(entity)?,
            None => self.renderer.resolver().resolve(entity)?,
        };
        self.renderer
            .presenter()
            .present(resolved, entity, Some(field), &options)
    }

    fn first_available(&self, entity: &dyn Entity) -> Result<Option<RepresentativeImage>> {
        let fields = self
            .renderer
            .resolver()
            .catalog()
            .supported_image_fields(entity.entity_type(), entity.bundle())?;
        Ok(fields.keys().find_map(|name| {
            entity
                .first_item(name)
                .map(|item| RepresentativeImage::field(name, item.clone()))
        }))
    }
}

/// The marker's configured source field, when it holds a value.
fn source_image(entity: &dyn Entity, field: &FieldDescriptor) -> Option<RepresentativeImage> {
    let FieldKind::RepresentativeImage {
        source_field: Some(source),
        ..
    } = &field.kind
    else {
        return None;
    };
    let item = entity.first_item(source)?;
    trace!(field = %field.name, source = %source, "rendering configured source field");
    Some(RepresentativeImage::field(source, item.clone()))
}

//! Alteration hooks.
//!
//! Other code can inspect and replace the candidate image after the
//! per-bundle override and before the global fallback. Alterers are
//! registered at startup, either for one entity type or for all of them.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::trace;

use crate::entity::Entity;
use crate::types::{RenderUnit, RepresentativeImage};

/// Name of the hook that rewrites rendered query-result cells.
pub const VIEWS_RENDER_HOOK: &str = "representative_image_views_handler_render";

/// Name of the alteration hook for an entity type.
pub fn hook_name(entity_type: &str) -> String {
    format!("representative_image_{}_image", entity_type)
}

/// Replaces or clears the candidate representative image.
pub trait ImageAlterer: Send + Sync {
    /// `image` is `None` when nothing has been resolved yet.
    fn alter(&self, entity_type: &str, image: &mut Option<RepresentativeImage>, entity: &dyn Entity);
}

impl<F> ImageAlterer for F
where
    F: Fn(&str, &mut Option<RepresentativeImage>, &dyn Entity) + Send + Sync,
{
    fn alter(&self, entity_type: &str, image: &mut Option<RepresentativeImage>, entity: &dyn Entity) {
        self(entity_type, image, entity)
    }
}

/// Rewrites or clears a rendered query-result cell.
pub trait RenderAlterer: Send + Sync {
    /// `field` is the marker field the cell was rendered from.
    fn alter_render(&self, entity: &dyn Entity, field: &str, unit: &mut Option<RenderUnit>);
}

impl<F> RenderAlterer for F
where
    F: Fn(&dyn Entity, &str, &mut Option<RenderUnit>) + Send + Sync,
{
    fn alter_render(&self, entity: &dyn Entity, field: &str, unit: &mut Option<RenderUnit>) {
        self(entity, field, unit)
    }
}

/// Alterers grouped by hook name, in registration order.
#[derive(Clone, Default)]
pub struct AlterRegistry {
    by_hook: IndexMap<String, Vec<Arc<dyn ImageAlterer>>>,
    global: Vec<Arc<dyn ImageAlterer>>,
}

impl AlterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an alterer for one entity type.
    pub fn register(&mut self, entity_type: &str, alterer: Arc<dyn ImageAlterer>) {
        self.by_hook
            .entry(hook_name(entity_type))
            .or_default()
            .push(alterer);
    }

    /// Register an alterer that sees every entity type. These run after the
    /// type-specific ones.
    pub fn register_global(&mut self, alterer: Arc<dyn ImageAlterer>) {
        self.global.push(alterer);
    }

    pub fn is_empty(&self) -> bool {
        self.by_hook.is_empty() && self.global.is_empty()
    }

    /// Run the hook for the entity's type. Each registered alterer is called
    /// exactly once.
    pub fn invoke(&self, image: &mut Option<RepresentativeImage>, entity: &dyn Entity) {
        let entity_type = entity.entity_type();
        let hook = hook_name(entity_type);
        let specific = self.by_hook.get(&hook).map(Vec::as_slice).unwrap_or_default();

        trace!(
            hook = %hook,
            alterers = specific.len() + self.global.len(),
            "invoking alter hook"
        );
        for alterer in specific.iter().chain(self.global.iter()) {
            alterer.alter(entity_type, image, entity);
        }
    }
}

impl fmt::Debug for AlterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hooks: Vec<(&str, usize)> = self
            .by_hook
            .iter()
            .map(|(hook, alterers)| (hook.as_str(), alterers.len()))
            .collect();
        f.debug_struct("AlterRegistry")
            .field("hooks", &hooks)
            .field("global", &self.global.len())
            .finish()
    }
}

//! Text token replacement.

use super::Renderer;
use crate::entity::Entity;
use crate::error::Result;
use crate::types::DisplayOptions;

/// The token for an entity type, e.g. `[node:representative_image]`.
pub fn token_for(entity_type: &str) -> String {
    format!("[{}:representative_image]", entity_type)
}

/// Replaces `[<entity_type>:representative_image]` with the image URL.
///
/// The token becomes an empty string when no image resolves.
#[derive(Clone)]
pub struct TokenReplacer {
    renderer: Renderer,
    options: DisplayOptions,
}

impl TokenReplacer {
    pub fn new(renderer: Renderer) -> Self {
        Self {
            renderer,
            options: DisplayOptions::default(),
        }
    }

    /// Render token URLs with an image style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.options = self.options.with_style(style);
        self
    }

    pub fn replace(&self, text: &str, entity: &dyn Entity) -> Result<String> {
        let token = token_for(entity.entity_type());
        if !text.contains(&token) {
            return Ok(text.to_string());
        }

        let url = self
            .renderer
            .render(entity, None, &self.options)?
            .map(|unit| unit.url)
            .unwrap_or_default();
        Ok(text.replace(&token, &url))
    }
}

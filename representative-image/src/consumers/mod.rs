//! Rendering consumers.
//!
//! Each consumer resolves an entity, presents the result and shapes the
//! output for its context: a field formatter, a query-result cell or an
//! inline text token.

use std::sync::Arc;

use crate::entity::Entity;
use crate::error::Result;
use crate::presenter::Presenter;
use crate::resolver::Resolver;
use crate::types::{DisplayOptions, FieldDescriptor, RenderUnit};

mod formatter;
mod token;
mod views;

pub use formatter::FieldFormatter;
pub use token::TokenReplacer;
pub use views::ViewsField;

/// Resolve-then-present pipeline shared by the consumers.
#[derive(Clone)]
pub struct Renderer {
    resolver: Arc<Resolver>,
    presenter: Presenter,
}

impl Renderer {
    pub fn new(resolver: Arc<Resolver>, presenter: Presenter) -> Self {
        Self {
            resolver,
            presenter,
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    /// Resolve `entity` and present the result.
    pub fn render(
        &self,
        entity: &dyn Entity,
        field: Option<&FieldDescriptor>,
        options: &DisplayOptions,
    ) -> Result<Option<RenderUnit>> {
        let resolved = self.resolver.resolve(entity)?;
        self.presenter.present(resolved, entity, field, options)
    }
}

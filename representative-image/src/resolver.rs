//! Resolution engine.
//!
//! Picks a single representative image for an entity, in strict priority order:
//!
//! 1. The per-bundle override field, when it exists and is non-empty
//! 2. Alteration hooks for the entity type, which may replace or clear the candidate
//! 3. The global fallback policy, only when no candidate is left
//!
//! Nothing is cached between calls: settings and the field catalog are read
//! fresh on every resolution.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::alter::{AlterRegistry, ImageAlterer};
use crate::catalog::FieldCatalog;
use crate::entity::Entity;
use crate::error::Result;
use crate::files::LogoSource;
use crate::settings::{DefaultBehavior, Settings, SettingsSource};
use crate::types::{FieldDescriptor, RepresentativeImage};

/// Builder for [`Resolver`]. Created by [`Resolver::builder`].
pub struct ResolverBuilder {
    catalog: Arc<dyn FieldCatalog>,
    settings: Arc<dyn SettingsSource>,
    logo: Option<Arc<dyn LogoSource>>,
    alterers: AlterRegistry,
}

impl ResolverBuilder {
    /// Source of the site logo for the `logo` policies.
    pub fn logo(mut self, logo: Arc<dyn LogoSource>) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Register an alterer for one entity type.
    pub fn alterer(mut self, entity_type: &str, alterer: Arc<dyn ImageAlterer>) -> Self {
        self.alterers.register(entity_type, alterer);
        self
    }

    /// Register an alterer for every entity type.
    pub fn global_alterer(mut self, alterer: Arc<dyn ImageAlterer>) -> Self {
        self.alterers.register_global(alterer);
        self
    }

    /// Replace the whole alterer registry.
    pub fn alterers(mut self, alterers: AlterRegistry) -> Self {
        self.alterers = alterers;
        self
    }

    pub fn build(self) -> Resolver {
        debug!(
            alterers = ?self.alterers,
            logo = self.logo.is_some(),
            "representative image resolver built"
        );
        Resolver {
            catalog: self.catalog,
            settings: self.settings,
            logo: self.logo,
            alterers: self.alterers,
        }
    }
}

/// Resolves the representative image of entities.
pub struct Resolver {
    catalog: Arc<dyn FieldCatalog>,
    settings: Arc<dyn SettingsSource>,
    logo: Option<Arc<dyn LogoSource>>,
    alterers: AlterRegistry,
}

impl Resolver {
    /// Start building a resolver around the host's catalog and settings.
    ///
    /// ```rust,ignore
    /// let resolver = Resolver::builder(catalog, settings)
    ///     .logo(Arc::new(StaticLogo::new("https://example.com", "logo.svg")?))
    ///     .alterer("node", Arc::new(my_node_alterer))
    ///     .build();
    /// ```
    pub fn builder(
        catalog: Arc<dyn FieldCatalog>,
        settings: Arc<dyn SettingsSource>,
    ) -> ResolverBuilder {
        ResolverBuilder {
            catalog,
            settings,
            logo: None,
            alterers: AlterRegistry::new(),
        }
    }

    pub fn catalog(&self) -> &dyn FieldCatalog {
        self.catalog.as_ref()
    }

    pub fn settings(&self) -> &dyn SettingsSource {
        self.settings.as_ref()
    }

    /// Resolve the representative image of `entity`.
    ///
    /// `Ok(None)` means nothing applies and the caller should render nothing.
    /// Errors come only from collaborators, including unknown bundles.
    pub fn resolve(&self, entity: &dyn Entity) -> Result<Option<RepresentativeImage>> {
        let entity_type = entity.entity_type();
        let bundle = entity.bundle();

        let settings = self.settings.settings()?;
        let fields = self.catalog.field_definitions(entity_type, bundle)?;

        let mut image = from_override(&settings, &fields, entity);

        self.alterers.invoke(&mut image, entity);

        if image.is_none() {
            image = self.fallback(settings.default_behavior, &fields, entity)?;
        }

        debug!(
            entity_type,
            bundle,
            found = image.is_some(),
            "representative image resolved"
        );
        Ok(image)
    }

    fn fallback(
        &self,
        behavior: DefaultBehavior,
        fields: &[FieldDescriptor],
        entity: &dyn Entity,
    ) -> Result<Option<RepresentativeImage>> {
        if behavior.scans_fields() {
            if let Some(image) = first_non_empty_image(fields, entity) {
                return Ok(Some(image));
            }
        }

        if behavior.uses_logo() {
            return match &self.logo {
                Some(logo) => Ok(Some(RepresentativeImage::Url(logo.current_logo_url()?))),
                None => {
                    warn!(
                        behavior = behavior.as_str(),
                        "logo fallback configured but no logo source registered"
                    );
                    Ok(None)
                }
            };
        }

        if behavior.uses_default_image() {
            return Ok(first_default_image(fields));
        }

        Ok(None)
    }
}

/// Step 1: the bundle's override field, if it is declared and non-empty.
fn from_override(
    settings: &Settings,
    fields: &[FieldDescriptor],
    entity: &dyn Entity,
) -> Option<RepresentativeImage> {
    let entity_type = entity.entity_type();
    let bundle = entity.bundle();
    let field = settings.override_for(entity_type, bundle)?;

    if !fields.iter().any(|descriptor| descriptor.name == field) {
        debug!(
            entity_type,
            bundle,
            field,
            "override names a field missing from the bundle, ignoring"
        );
        return None;
    }

    let item = entity.first_item(field)?;
    Some(RepresentativeImage::field(field, item.clone()))
}

/// The first image field, in catalog order, holding a value.
fn first_non_empty_image(
    fields: &[FieldDescriptor],
    entity: &dyn Entity,
) -> Option<RepresentativeImage> {
    fields
        .iter()
        .filter(|descriptor| descriptor.kind.is_image())
        .find_map(|descriptor| {
            entity
                .first_item(&descriptor.name)
                .map(|item| RepresentativeImage::field(&descriptor.name, item.clone()))
        })
}

/// The configured default image of the first image field that has one.
fn first_default_image(fields: &[FieldDescriptor]) -> Option<RepresentativeImage> {
    fields
        .iter()
        .filter(|descriptor| descriptor.kind.is_image())
        .find_map(|descriptor| {
            descriptor
                .effective_default_image()
                .map(|default| RepresentativeImage::field(&descriptor.name, default.to_item()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::entity::StoredEntity;
    use crate::error::RepresentativeImageError;
    use crate::files::StaticLogo;
    use crate::settings::StaticSettings;
    use crate::types::{DefaultImage, FieldKind, FileId, ImageItem};
    use rstest::rstest;

    const LOGO: &str = "http://site/logo.png";

    fn catalog() -> StaticCatalog {
        StaticCatalog::new()
            .with_bundle(
                "node",
                "article",
                vec![
                    FieldDescriptor::new("title", "Title", FieldKind::Other),
                    FieldDescriptor::image("field_a", "A"),
                    FieldDescriptor::image("field_b", "B"),
                    FieldDescriptor::image("field_c", "C"),
                ],
            )
            .unwrap()
    }

    fn resolver(settings: Settings) -> Resolver {
        Resolver::builder(Arc::new(catalog()), Arc::new(StaticSettings::new(settings)))
            .logo(Arc::new(StaticLogo::from_url(LOGO)))
            .build()
    }

    fn article() -> StoredEntity {
        StoredEntity::new("node", "article")
            .with_field("field_a", vec![])
            .with_field("field_b", vec![ImageItem::new("X")])
            .with_field("field_c", vec![ImageItem::new("Y")])
    }

    fn file_of(image: &Option<RepresentativeImage>) -> Option<&str> {
        image.as_ref().and_then(|i| i.item()).map(|i| i.file.as_str())
    }

    #[test]
    fn first_returns_first_non_empty_field() {
        let resolver = resolver(Settings::default().with_behavior(DefaultBehavior::First));
        let image = resolver.resolve(&article()).unwrap();
        assert_eq!(
            image,
            Some(RepresentativeImage::field("field_b", ImageItem::new("X")))
        );
    }

    #[test]
    fn logo_ignores_image_fields() {
        let resolver = resolver(Settings::default().with_behavior(DefaultBehavior::Logo));
        let image = resolver.resolve(&article()).unwrap();
        assert_eq!(image, Some(RepresentativeImage::url(LOGO)));
    }

    #[test]
    fn stale_override_is_ignored() {
        let settings = Settings::default()
            .with_behavior(DefaultBehavior::First)
            .with_override("node", "article", "field_gone");
        let image = resolver(settings).resolve(&article()).unwrap();
        assert_eq!(file_of(&image), Some("X"));
    }

    #[rstest]
    #[case(DefaultBehavior::Unset)]
    #[case(DefaultBehavior::First)]
    #[case(DefaultBehavior::Logo)]
    #[case(DefaultBehavior::FirstOrLogo)]
    #[case(DefaultBehavior::FirstOrDefault)]
    fn override_wins_regardless_of_behavior(#[case] behavior: DefaultBehavior) {
        let settings = Settings::default()
            .with_behavior(behavior)
            .with_override("node", "article", "field_c");
        let image = resolver(settings).resolve(&article()).unwrap();
        assert_eq!(
            image,
            Some(RepresentativeImage::field("field_c", ImageItem::new("Y")))
        );
    }

    #[test]
    fn empty_override_falls_through() {
        let settings = Settings::default()
            .with_behavior(DefaultBehavior::First)
            .with_override("node", "article", "field_a");
        let image = resolver(settings).resolve(&article()).unwrap();
        assert_eq!(file_of(&image), Some("X"));
    }

    #[rstest]
    #[case(DefaultBehavior::Unset, None)]
    #[case(DefaultBehavior::First, None)]
    #[case(DefaultBehavior::FirstOrLogo, Some(LOGO))]
    #[case(DefaultBehavior::Logo, Some(LOGO))]
    fn no_images_on_entity(#[case] behavior: DefaultBehavior, #[case] expected: Option<&str>) {
        let entity = StoredEntity::new("node", "article");
        let image = resolver(Settings::default().with_behavior(behavior))
            .resolve(&entity)
            .unwrap();
        assert_eq!(image, expected.map(RepresentativeImage::url));
    }

    #[test]
    fn first_or_logo_prefers_fields() {
        let resolver = resolver(Settings::default().with_behavior(DefaultBehavior::FirstOrLogo));
        let image = resolver.resolve(&article()).unwrap();
        assert_eq!(file_of(&image), Some("X"));
    }

    #[rstest]
    #[case::first_or_default_on_empty_entity(
        DefaultBehavior::FirstOrDefault,
        StoredEntity::new("node", "article")
    )]
    #[case::default_ignores_stored_images(
        DefaultBehavior::Default,
        StoredEntity::new("node", "article").with_field("field_a", vec![ImageItem::new("X")])
    )]
    fn legacy_default_uses_field_default_image(
        #[case] behavior: DefaultBehavior,
        #[case] entity: StoredEntity,
    ) {
        let catalog = StaticCatalog::new()
            .with_bundle(
                "node",
                "article",
                vec![
                    FieldDescriptor::image("field_a", "A"),
                    FieldDescriptor::image("field_b", "B").with_storage_default_image(
                        DefaultImage {
                            file: FileId::new("D"),
                            alt: Some("Default".into()),
                            title: None,
                            width: None,
                            height: None,
                        },
                    ),
                ],
            )
            .unwrap();
        let settings = Settings::default().with_behavior(behavior);
        let resolver =
            Resolver::builder(Arc::new(catalog), Arc::new(StaticSettings::new(settings))).build();

        let image = resolver.resolve(&entity).unwrap().unwrap();
        assert!(matches!(&image, RepresentativeImage::Field { field, .. } if field == "field_b"));
        let item = image.item().unwrap();
        assert_eq!(item.file.as_str(), "D");
        assert!(item.is_default);
        assert!(entity.is_field_empty("field_b"));
    }

    #[test_log::test]
    fn logo_without_source_is_not_found() {
        let resolver = Resolver::builder(
            Arc::new(catalog()),
            Arc::new(StaticSettings::new(
                Settings::default().with_behavior(DefaultBehavior::Logo),
            )),
        )
        .build();
        assert_eq!(resolver.resolve(&article()).unwrap(), None);
    }

    #[test]
    fn unknown_bundle_propagates() {
        let resolver = resolver(Settings::default().with_behavior(DefaultBehavior::First));
        let err = resolver
            .resolve(&StoredEntity::new("node", "gallery"))
            .unwrap_err();
        assert!(matches!(err, RepresentativeImageError::UnknownBundle { .. }));
    }

    #[test]
    fn alterer_overrides_override_field() {
        let settings = Settings::default()
            .with_behavior(DefaultBehavior::First)
            .with_override("node", "article", "field_c");
        let resolver = Resolver::builder(Arc::new(catalog()), Arc::new(StaticSettings::new(settings)))
            .alterer(
                "node",
                Arc::new(|_: &str, image: &mut Option<RepresentativeImage>, entity: &dyn Entity| {
                    assert_eq!(file_of(image), Some("Y"));
                    *image = Some(RepresentativeImage::url(format!(
                        "http://site/{}.png",
                        entity.bundle()
                    )));
                }),
            )
            .build();
        assert_eq!(
            resolver.resolve(&article()).unwrap(),
            Some(RepresentativeImage::url("http://site/article.png"))
        );
    }

    #[test]
    fn alterer_clearing_image_lets_fallback_run() {
        let settings = Settings::default()
            .with_behavior(DefaultBehavior::Logo)
            .with_override("node", "article", "field_c");
        let resolver = Resolver::builder(Arc::new(catalog()), Arc::new(StaticSettings::new(settings)))
            .logo(Arc::new(StaticLogo::from_url(LOGO)))
            .alterer(
                "node",
                Arc::new(|_: &str, image: &mut Option<RepresentativeImage>, _: &dyn Entity| {
                    *image = None;
                }),
            )
            .build();
        assert_eq!(
            resolver.resolve(&article()).unwrap(),
            Some(RepresentativeImage::url(LOGO))
        );
    }
}

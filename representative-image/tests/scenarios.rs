//! End-to-end scenarios: YAML catalog and entity, resolve, present.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use representative_image::{
    DefaultBehavior, DisplayOptions, Entity, ImageAlterer, LinkTarget, Presenter,
    RepresentativeImage, Resolver, Settings, StaticCatalog, StaticFileStore, StaticLogo,
    StaticSettings, StoredEntity,
};

const CATALOG: &str = r#"
node:
  article:
    - name: title
      label: Title
      type:
        kind: string
    - name: field_a
      label: Field A
      type:
        kind: image
      storage_settings:
        default_image:
          file: "default"
          alt: Article placeholder
    - name: field_b
      label: Field B
      type:
        kind: image
    - name: field_representative
      label: Representative image
      type:
        kind: representative_image
  page:
    - name: body
      label: Body
      type:
        kind: text_long
"#;

const ARTICLE: &str = r#"
entity_type: node
bundle: article
url: http://site/node/7
fields:
  field_a: []
  field_b:
    - file: X
      alt: Harbour at dawn
      width: 800
      height: 600
"#;

fn resolver(settings: Settings) -> Resolver {
    Resolver::builder(
        Arc::new(StaticCatalog::from_yaml_str(CATALOG).unwrap()),
        Arc::new(StaticSettings::new(settings)),
    )
    .logo(Arc::new(StaticLogo::new("http://site", "logo.png").unwrap()))
    .build()
}

fn presenter() -> Presenter {
    let files = StaticFileStore::new("http://site/files")
        .unwrap()
        .with_file("X", "harbour.jpg")
        .with_file("default", "placeholder.png");
    Presenter::new(Arc::new(files), Arc::new(StaticSettings::default()))
}

fn article() -> StoredEntity {
    StoredEntity::from_yaml_str(ARTICLE).unwrap()
}

fn file_of(image: Option<RepresentativeImage>) -> Option<String> {
    image.and_then(|image| image.item().map(|item| item.file.to_string()))
}

#[test_log::test]
fn first_skips_empty_field() {
    let resolver = resolver(Settings::default().with_behavior(DefaultBehavior::First));
    let image = resolver.resolve(&article()).unwrap();
    assert_eq!(file_of(image), Some("X".to_string()));
}

#[test_log::test]
fn logo_even_with_images_present() {
    let resolver = resolver(Settings::default().with_behavior(DefaultBehavior::Logo));
    let image = resolver.resolve(&article()).unwrap();
    assert_eq!(image, Some(RepresentativeImage::url("http://site/logo.png")));
}

#[test_log::test]
fn stale_override_falls_back_to_first() {
    let settings = Settings::default()
        .with_behavior(DefaultBehavior::First)
        .with_override("node", "article", "field_c");
    let image = resolver(settings).resolve(&article()).unwrap();
    assert_eq!(file_of(image), Some("X".to_string()));
}

#[test]
fn page_without_images_resolves_nothing() {
    let resolver = resolver(Settings::default().with_behavior(DefaultBehavior::First));
    let page = StoredEntity::new("node", "page");
    assert_eq!(resolver.resolve(&page).unwrap(), None);
}

#[test]
fn alterer_called_exactly_once_per_resolution() {
    struct Counting(AtomicUsize);

    impl ImageAlterer for Counting {
        fn alter(&self, _: &str, _: &mut Option<RepresentativeImage>, _: &dyn Entity) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    let counter = Arc::new(Counting(AtomicUsize::new(0)));
    let resolver = Resolver::builder(
        Arc::new(StaticCatalog::from_yaml_str(CATALOG).unwrap()),
        Arc::new(StaticSettings::new(
            Settings::default()
                .with_behavior(DefaultBehavior::First)
                .with_override("node", "article", "field_b"),
        )),
    )
    .alterer("node", counter.clone())
    .alterer("user", Arc::new(Counting(AtomicUsize::new(0))))
    .build();

    resolver.resolve(&article()).unwrap();
    assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    resolver.resolve(&StoredEntity::new("node", "page")).unwrap();
    assert_eq!(counter.0.load(Ordering::SeqCst), 2);
}

#[test]
fn resolved_image_renders_with_style_and_link() {
    let entity = article();
    let resolved = resolver(Settings::default().with_behavior(DefaultBehavior::First))
        .resolve(&entity)
        .unwrap();
    let options = DisplayOptions::default()
        .with_style("large")
        .with_link(LinkTarget::Content);
    let unit = presenter()
        .present(resolved, &entity, None, &options)
        .unwrap()
        .unwrap();
    assert_eq!(unit.url, "http://site/files/styles/large/harbour.jpg");
    assert_eq!(unit.link.as_deref(), Some("http://site/node/7"));
    assert_eq!(unit.alt.as_deref(), Some("Harbour at dawn"));
    assert_eq!((unit.width, unit.height), (Some(800), Some(600)));
}

#[test]
fn default_substitution_leaves_entity_untouched() {
    let entity = article();
    let before = entity.clone();
    let catalog = StaticCatalog::from_yaml_str(CATALOG).unwrap();
    let field_a = representative_image::FieldCatalog::field(&catalog, "node", "article", "field_a")
        .unwrap()
        .unwrap();

    let unit = presenter()
        .present(None, &entity, Some(&field_a), &DisplayOptions::default())
        .unwrap()
        .unwrap();

    assert!(unit.is_default);
    assert_eq!(unit.url, "http://site/files/placeholder.png");
    assert_eq!(unit.alt.as_deref(), Some("Article placeholder"));
    assert_eq!(entity, before);
    assert!(entity.is_field_empty("field_a"));
}

#[test]
fn rendered_unit_serializes_for_output() {
    let entity = article();
    let resolved = resolver(Settings::default().with_behavior(DefaultBehavior::First))
        .resolve(&entity)
        .unwrap();
    let unit = presenter()
        .present(resolved, &entity, None, &DisplayOptions::default())
        .unwrap()
        .unwrap();
    let json = serde_json::to_value(&unit).unwrap();
    assert_eq!(json["url"], "http://site/files/harbour.jpg");
    assert!(json.get("link").is_none());
    assert!(json.get("is_default").is_none());
}

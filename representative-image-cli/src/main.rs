//! Representative image CLI.
//!
//! Commands:
//! - `representative-image resolve`: resolve an entity and print the rendered image
//! - `representative-image fields`: list a bundle's image fields
//! - `representative-image token`: replace representative image tokens in text
//!
//! Exit codes:
//! - 0: Success (including "no image")
//! - 1: Error

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use representative_image::{
    DisplayOptions, FieldCatalog, LinkTarget, Presenter, Renderer, Resolver, SettingsLoader,
    StaticCatalog, StoredEntity, TokenReplacer,
};

mod cli;
mod site;

use cli::{Cli, Commands, Link, Sources};
use site::Site;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("representative_image=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run(cli.command) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Resolve {
            sources,
            entity,
            style,
            link,
            json,
        } => {
            let renderer = build_renderer(&sources)?;
            let entity = load_entity(&entity)?;
            let mut options = DisplayOptions::default().with_link(link_target(link));
            if let Some(style) = style {
                options = options.with_style(style);
            }

            let unit = renderer.render(&entity, None, &options)?;
            match (unit, json) {
                (Some(unit), true) => println!("{}", serde_json::to_string_pretty(&unit)?),
                (Some(unit), false) => match unit.link {
                    Some(link) => println!("{} -> {}", unit.url, link),
                    None => println!("{}", unit.url),
                },
                (None, true) => println!("null"),
                (None, false) => debug!("no representative image"),
            }
        }

        Commands::Fields {
            catalog,
            entity_type,
            bundle,
        } => {
            let catalog = StaticCatalog::load(&catalog)
                .with_context(|| format!("loading catalog {}", catalog.display()))?;
            for label in catalog.supported_image_fields(&entity_type, &bundle)?.values() {
                println!("{}", label);
            }
            if let Some(marker) = catalog.representative_image_field(&entity_type, &bundle)? {
                println!("representative image field: {}", marker);
            }
        }

        Commands::Token {
            sources,
            entity,
            text,
        } => {
            let renderer = build_renderer(&sources)?;
            let entity = load_entity(&entity)?;
            println!("{}", TokenReplacer::new(renderer).replace(&text, &entity)?);
        }
    }
    Ok(())
}

fn build_renderer(sources: &Sources) -> Result<Renderer> {
    let catalog = StaticCatalog::load(&sources.catalog)
        .with_context(|| format!("loading catalog {}", sources.catalog.display()))?;
    let site = Site::load(&sources.site)?;

    let settings = Arc::new(
        sources
            .settings
            .iter()
            .fold(SettingsLoader::new(), |loader, path| loader.file(path))
            .into_source(),
    );

    let mut builder = Resolver::builder(Arc::new(catalog), settings.clone());
    if let Some(logo) = site.logo()? {
        builder = builder.logo(Arc::new(logo));
    }
    let presenter = Presenter::new(Arc::new(site.file_store()?), settings);
    Ok(Renderer::new(Arc::new(builder.build()), presenter))
}

fn load_entity(path: &Path) -> Result<StoredEntity> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading entity {}", path.display()))?;
    Ok(StoredEntity::from_yaml_str(&content)?)
}

fn link_target(link: Link) -> LinkTarget {
    match link {
        Link::None => LinkTarget::None,
        Link::Content => LinkTarget::Content,
        Link::File => LinkTarget::File,
    }
}

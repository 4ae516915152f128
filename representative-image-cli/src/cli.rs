//! CLI definition for the representative image command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Resolve and render the representative image of entities described in YAML.
///
/// Settings are merged from `--settings` files (TOML, YAML or JSON) and
/// REPRESENTATIVE_IMAGE_* environment variables, e.g.
/// REPRESENTATIVE_IMAGE_DEFAULT_BEHAVIOR=first_or_logo or
/// REPRESENTATIVE_IMAGE_ENTITY_DEFAULTS__NODE__ARTICLE=field_image.
#[derive(Parser, Debug)]
#[command(name = "representative-image")]
#[command(version)]
#[command(about = "Resolve the representative image of content entities")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve an entity and print the rendered image
    Resolve {
        #[command(flatten)]
        sources: Sources,

        /// Entity YAML file
        #[arg(long, value_name = "FILE")]
        entity: PathBuf,

        /// Image style to request
        #[arg(long)]
        style: Option<String>,

        /// Link the image to the entity or to the file
        #[arg(long, value_enum, default_value_t = Link::None)]
        link: Link,

        /// Print the render unit as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the image fields of a bundle
    Fields {
        /// Field catalog YAML file
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        /// Entity type, e.g. node
        entity_type: String,

        /// Bundle, e.g. article
        bundle: String,
    },

    /// Replace [<entity_type>:representative_image] tokens in text
    Token {
        #[command(flatten)]
        sources: Sources,

        /// Entity YAML file
        #[arg(long, value_name = "FILE")]
        entity: PathBuf,

        /// Text containing tokens
        text: String,
    },
}

/// Files the resolver is built from.
#[derive(Args, Debug)]
pub struct Sources {
    /// Field catalog YAML file
    #[arg(long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Settings files, later ones override earlier ones
    #[arg(long = "settings", value_name = "FILE")]
    pub settings: Vec<PathBuf>,

    /// Site YAML file: base URL, logo and file paths
    #[arg(long, value_name = "FILE")]
    pub site: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Link {
    None,
    Content,
    File,
}

//! Error types for representative image resolution

use std::path::PathBuf;
use thiserror::Error;

/// Result type for representative image operations
pub type Result<T> = std::result::Result<T, RepresentativeImageError>;

/// Boxed error raised by a host collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while resolving or presenting a representative image.
///
/// "No image" is never an error: resolution returns `Ok(None)` for that.
#[derive(Debug, Error)]
pub enum RepresentativeImageError {
    /// The field catalog does not know this entity type / bundle pair
    #[error("unknown bundle '{bundle}' for entity type '{entity_type}'")]
    UnknownBundle { entity_type: String, bundle: String },

    /// A catalog file declares the same field twice on one bundle
    #[error("duplicate field '{name}' on {entity_type}.{bundle}")]
    DuplicateField {
        entity_type: String,
        bundle: String,
        name: String,
    },

    /// A host collaborator (catalog, settings, file store, logo) failed
    #[error("{context}: {source}")]
    Collaborator {
        context: String,
        #[source]
        source: BoxError,
    },

    /// Settings file with an extension we cannot parse
    #[error("unsupported settings file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Settings could not be extracted
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// A configured base or logo URL could not be parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl RepresentativeImageError {
    /// Wrap a host error with a short description of the failed call.
    pub fn collaborator(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Collaborator {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn unknown_bundle(entity_type: impl Into<String>, bundle: impl Into<String>) -> Self {
        Self::UnknownBundle {
            entity_type: entity_type.into(),
            bundle: bundle.into(),
        }
    }
}

impl From<figment::Error> for RepresentativeImageError {
    fn from(error: figment::Error) -> Self {
        Self::Config(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_bundle_display() {
        let err = RepresentativeImageError::unknown_bundle("node", "gallery");
        assert_eq!(
            err.to_string(),
            "unknown bundle 'gallery' for entity type 'node'"
        );
    }

    #[test]
    fn test_collaborator_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "file service down");
        let err = RepresentativeImageError::collaborator("file url lookup", io);
        assert!(err.to_string().contains("file url lookup"));
        assert!(err.to_string().contains("file service down"));
        assert!(std::error::Error::source(&err).is_some());
    }
}

//! File URL and site logo collaborators.
//!
//! URL generation belongs to the host. The traits here are the seams; the
//! static implementations back the CLI and tests.

use indexmap::IndexMap;
use url::Url;

use crate::error::{RepresentativeImageError, Result};
use crate::types::FileId;

/// Turns stored file identifiers into absolute URLs.
pub trait FileStore: Send + Sync {
    /// Absolute URL of the original file.
    fn file_url(&self, file: &FileId) -> Result<String>;

    /// Canonical URL of the file entity, used for `file` links.
    fn canonical_url(&self, file: &FileId) -> Result<String>;

    /// URL of the file processed with an image style. Stores without image
    /// processing serve the original.
    fn derivative_url(&self, style: &str, file: &FileId) -> Result<String> {
        let _ = style;
        self.file_url(file)
    }
}

/// The site's current logo.
pub trait LogoSource: Send + Sync {
    fn current_logo_url(&self) -> Result<String>;
}

/// Parse a base URL, making sure relative joins append to its path.
fn base_url(raw: &str) -> Result<Url> {
    let mut base = Url::parse(raw)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

/// File store backed by a map of file id to public path.
///
/// Originals live at `<base>/<path>`, style derivatives at
/// `<base>/styles/<style>/<path>` and file pages at `<base>/file/<id>`.
#[derive(Debug, Clone)]
pub struct StaticFileStore {
    base: Url,
    files: IndexMap<FileId, String>,
}

impl StaticFileStore {
    pub fn new(base: &str) -> Result<Self> {
        Ok(Self {
            base: base_url(base)?,
            files: IndexMap::new(),
        })
    }

    pub fn with_file(mut self, id: impl Into<FileId>, path: impl Into<String>) -> Self {
        self.files.insert(id.into(), path.into());
        self
    }

    pub fn insert(&mut self, id: impl Into<FileId>, path: impl Into<String>) {
        self.files.insert(id.into(), path.into());
    }

    fn path_of(&self, file: &FileId) -> Result<&str> {
        self.files
            .get(file)
            .map(|path| path.trim_start_matches('/'))
            .ok_or_else(|| {
                RepresentativeImageError::collaborator(
                    format!("file {} lookup", file),
                    "file is not in the store",
                )
            })
    }

    fn join(&self, relative: &str) -> Result<String> {
        Ok(self.base.join(relative)?.to_string())
    }
}

impl FileStore for StaticFileStore {
    fn file_url(&self, file: &FileId) -> Result<String> {
        self.join(self.path_of(file)?)
    }

    fn canonical_url(&self, file: &FileId) -> Result<String> {
        self.path_of(file)?;
        self.join(&format!("file/{}", file))
    }

    fn derivative_url(&self, style: &str, file: &FileId) -> Result<String> {
        let path = self.path_of(file)?;
        self.join(&format!("styles/{}/{}", style, path))
    }
}

/// A logo URL fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLogo {
    url: String,
}

impl StaticLogo {
    /// Build the absolute logo URL from the site base URL and the theme's
    /// logo path. A logo path that already starts with the base URL is not
    /// prefixed twice; absolute logo URLs on other hosts are kept.
    pub fn new(site_base: &str, logo: &str) -> Result<Self> {
        let base = base_url(site_base)?;
        let relative = logo
            .strip_prefix(base.as_str())
            .unwrap_or(logo)
            .trim_start_matches('/');
        Ok(Self {
            url: base.join(relative)?.to_string(),
        })
    }

    /// Use an already absolute URL as-is.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl LogoSource for StaticLogo {
    fn current_logo_url(&self) -> Result<String> {
        Ok(self.url.clone())
    }
}

//! Site description used to build the file store and logo collaborators.
//!
//! ```yaml
//! base_url: https://example.com
//! logo: themes/custom/logo.svg
//! files_url: https://example.com/sites/default/files
//! files:
//!   "12": 2024/sunrise.jpg
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use representative_image::{StaticFileStore, StaticLogo};

#[derive(Debug, Deserialize)]
pub struct Site {
    pub base_url: String,
    #[serde(default)]
    pub logo: Option<String>,
    /// Public files location; defaults to `<base_url>/files`.
    #[serde(default)]
    pub files_url: Option<String>,
    #[serde(default)]
    pub files: BTreeMap<String, String>,
}

impl Site {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading site file {}", path.display()))?;
        serde_yaml_ng::from_str(&content)
            .with_context(|| format!("parsing site file {}", path.display()))
    }

    pub fn file_store(&self) -> Result<StaticFileStore> {
        let files_url = match &self.files_url {
            Some(url) => url.clone(),
            None => format!("{}/files", self.base_url.trim_end_matches('/')),
        };
        let mut store = StaticFileStore::new(&files_url)?;
        for (id, path) in &self.files {
            store.insert(id.as_str(), path.as_str());
        }
        Ok(store)
    }

    pub fn logo(&self) -> Result<Option<StaticLogo>> {
        self.logo
            .as_deref()
            .map(|logo| StaticLogo::new(&self.base_url, logo))
            .transpose()
            .map_err(Into::into)
    }
}

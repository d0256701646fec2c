//! Project configuration (`.phpantom-reflect.toml`).
//!
//! The configuration decides which source locators the reflector consults
//! and in which order.  Every field is optional:
//!
//! ```toml
//! [locator]
//! composer = true            # PSR-4 autoloading from composer.json
//! files = ["bootstrap.php"]  # single files, consulted first
//! directories = ["lib"]      # scanned for class declarations, consulted last
//! ```
//!
//! Relative paths are resolved against the project root.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ReflectionError, Result};
use crate::locator::{
    AggregateSourceLocator, AutoloadContext, AutoloadSourceLocator, DirectoriesSourceLocator,
    SingleFileSourceLocator,
};

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = ".phpantom-reflect.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub locator: LocatorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocatorConfig {
    /// Resolve classes through the PSR-4 rules in `composer.json`.
    #[serde(default = "default_true")]
    pub composer: bool,
    #[serde(default)]
    pub files: Vec<PathBuf>,
    #[serde(default)]
    pub directories: Vec<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            composer: true,
            files: Vec::new(),
            directories: Vec::new(),
        }
    }
}

impl Config {
    /// Load `<root>/.phpantom-reflect.toml`, falling back to the defaults
    /// when the file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            tracing::debug!(root = %root.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| ReflectionError::io(&path, e))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ReflectionError::Config(format!("{}: {}", CONFIG_FILE_NAME, e)))
    }

    /// Assemble the locator chain: explicit files, then Composer
    /// autoloading, then directory scanning.
    pub fn build_locator(&self, root: &Path) -> Result<AggregateSourceLocator> {
        let mut locator = AggregateSourceLocator::new();

        for file in &self.locator.files {
            locator.push(Box::new(SingleFileSourceLocator::new(root.join(file))));
        }

        if self.locator.composer {
            let context = AutoloadContext::composer(root)?;
            locator.push(Box::new(AutoloadSourceLocator::new(context)));
        }

        if !self.locator.directories.is_empty() {
            let directories = self.locator.directories.iter().map(|d| root.join(d));
            locator.push(Box::new(DirectoriesSourceLocator::new(directories)));
        }

        tracing::debug!(locators = locator.len(), "built locator chain");
        Ok(locator)
    }
}

//! Source locating strategies.
//!
//! A [`SourceLocator`] maps a class-like [`Identifier`] to raw PHP source.
//! The reflector is indifferent to which locator supplied the text: every
//! strategy returns a [`LocatedSource`] and the reflector parses it and
//! looks for the requested class.
//!
//! "Not found" is never an error here.  Locators return `Ok(None)` and
//! reserve `Err` for genuine I/O failures.

mod aggregate;
mod autoload;
mod directories;
mod file;
mod string;

use std::fmt;
use std::path::PathBuf;

use crate::error::Result;

pub use aggregate::AggregateSourceLocator;
pub use autoload::{AutoloadContext, AutoloadSourceLocator};
pub use directories::DirectoriesSourceLocator;
pub use file::SingleFileSourceLocator;
pub use string::StringSourceLocator;

/// A normalised class-like name.
///
/// The leading `\` of a fully-qualified name is stripped; the original
/// spelling is kept for display, and [`Identifier::cache_key`] gives the
/// case-insensitive form PHP uses for class names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    name: String,
}

impl Identifier {
    pub fn new(name: &str) -> Self {
        Self {
            name: crate::util::strip_fqn_prefix(name.trim()).to_string(),
        }
    }

    /// The fully-qualified name without a leading `\`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The last segment of the name.
    pub fn short_name(&self) -> &str {
        crate::util::short_name(&self.name)
    }

    /// Lowercased name, used as cache and index key.
    pub fn cache_key(&self) -> String {
        self.name.to_ascii_lowercase()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Where a piece of located source came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOrigin {
    File(PathBuf),
    /// Source handed over as a string; the label is for diagnostics only.
    InMemory(String),
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceOrigin::File(path) => write!(f, "{}", path.display()),
            SourceOrigin::InMemory(label) => write!(f, "{}", label),
        }
    }
}

/// Raw PHP source plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSource {
    pub source: String,
    pub origin: SourceOrigin,
}

impl LocatedSource {
    pub fn new(source: impl Into<String>, origin: SourceOrigin) -> Self {
        Self {
            source: source.into(),
            origin,
        }
    }
}

/// A strategy that maps a class-like identifier to PHP source.
pub trait SourceLocator {
    /// Return the source that should contain `identifier`, or `None` when
    /// this locator has nothing for it.
    fn locate(&self, identifier: &Identifier) -> Result<Option<LocatedSource>>;

    /// Return every candidate source for `identifier`, in preference
    /// order.  Single-strategy locators return at most one candidate.
    fn locate_all(&self, identifier: &Identifier) -> Result<Vec<LocatedSource>> {
        Ok(self.locate(identifier)?.into_iter().collect())
    }
}

impl<L: SourceLocator + ?Sized> SourceLocator for Box<L> {
    fn locate(&self, identifier: &Identifier) -> Result<Option<LocatedSource>> {
        (**self).locate(identifier)
    }

    fn locate_all(&self, identifier: &Identifier) -> Result<Vec<LocatedSource>> {
        (**self).locate_all(identifier)
    }
}

/// Read a file into a [`LocatedSource`].
pub(crate) fn read_source_file(path: &std::path::Path) -> Result<LocatedSource> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| crate::error::ReflectionError::io(path, e))?;
    Ok(LocatedSource::new(source, SourceOrigin::File(path.to_path_buf())))
}

/// Autoloader-driven source locating.
use std::fmt;
use std::path::{Path, PathBuf};

use crate::composer::Psr4Map;
use crate::error::Result;

use super::{Identifier, LocatedSource, SourceLocator, read_source_file};

type ResolveFn = dyn Fn(&str) -> Option<PathBuf> + Send + Sync;

/// The autoloading context: a function from a fully-qualified class name to
/// the file that would define it.
///
/// Asking the context never loads or runs anything.  Use
/// [`AutoloadContext::composer`] for a project's PSR-4 rules, or
/// [`AutoloadContext::new`] for a custom mapping.
pub struct AutoloadContext {
    resolve: Box<ResolveFn>,
}

impl AutoloadContext {
    pub fn new(resolve: impl Fn(&str) -> Option<PathBuf> + Send + Sync + 'static) -> Self {
        Self {
            resolve: Box::new(resolve),
        }
    }

    /// A context backed by the PSR-4 section of `<root>/composer.json`.
    pub fn composer(root: &Path) -> Result<Self> {
        let map = Psr4Map::load(root)?;
        Ok(Self::new(move |class_name| map.resolve(class_name)))
    }

    /// The file that would define `class_name`, if any.
    pub fn resolve(&self, class_name: &str) -> Option<PathBuf> {
        (self.resolve)(class_name)
    }
}

impl fmt::Debug for AutoloadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoloadContext").finish_non_exhaustive()
    }
}

/// Asks an [`AutoloadContext`] where a class lives and reads that file.
#[derive(Debug)]
pub struct AutoloadSourceLocator {
    context: AutoloadContext,
}

impl AutoloadSourceLocator {
    pub fn new(context: AutoloadContext) -> Self {
        Self { context }
    }
}

impl SourceLocator for AutoloadSourceLocator {
    fn locate(&self, identifier: &Identifier) -> Result<Option<LocatedSource>> {
        let Some(path) = self.context.resolve(identifier.name()) else {
            tracing::trace!(%identifier, "autoloader has no file");
            return Ok(None);
        };
        if !path.is_file() {
            tracing::debug!(%identifier, path = %path.display(), "autoloader path does not exist");
            return Ok(None);
        }
        tracing::debug!(%identifier, path = %path.display(), "autoloader resolved file");
        read_source_file(&path).map(Some)
    }
}

/// Explicit single-file source locating.
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::{Identifier, LocatedSource, SourceLocator, read_source_file};

/// Offers one PHP file for every identifier.
///
/// Whether the file actually declares the requested class is decided by the
/// reflector after parsing.  A file that cannot be read is an I/O error,
/// not a miss.
#[derive(Debug, Clone)]
pub struct SingleFileSourceLocator {
    path: PathBuf,
}

impl SingleFileSourceLocator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceLocator for SingleFileSourceLocator {
    fn locate(&self, identifier: &Identifier) -> Result<Option<LocatedSource>> {
        tracing::debug!(%identifier, path = %self.path.display(), "offering single file");
        read_source_file(&self.path).map(Some)
    }
}

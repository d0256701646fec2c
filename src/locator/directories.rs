/// Directory-scanning source locating.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::Result;
use crate::parser::parse_php;

use super::{Identifier, LocatedSource, SourceLocator, read_source_file};

/// Scans directories for `.php` files and indexes the class-likes they
/// declare.
///
/// The index is built on the first lookup.  `.gitignore` rules and hidden
/// files are honoured the same way `ignore::WalkBuilder` does by default.
/// Files that fail to read or parse are skipped with a warning; a class
/// declared in several files resolves to the first one walked.
#[derive(Debug)]
pub struct DirectoriesSourceLocator {
    directories: Vec<PathBuf>,
    index: OnceLock<HashMap<String, PathBuf>>,
}

impl DirectoriesSourceLocator {
    pub fn new<I, P>(directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
            index: OnceLock::new(),
        }
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Number of indexed class-likes.  Forces the scan.
    pub fn indexed_count(&self) -> usize {
        self.index().len()
    }

    fn index(&self) -> &HashMap<String, PathBuf> {
        self.index.get_or_init(|| {
            let mut index = HashMap::new();
            for directory in &self.directories {
                scan_directory(directory, &mut index);
            }
            tracing::debug!(
                directories = self.directories.len(),
                classes = index.len(),
                "built class index"
            );
            index
        })
    }
}

fn scan_directory(directory: &Path, index: &mut HashMap<String, PathBuf>) {
    let walker = ignore::WalkBuilder::new(directory).build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(directory = %directory.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        let is_php = entry.file_type().is_some_and(|ft| ft.is_file())
            && path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("php"));
        if !is_php {
            continue;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file");
                continue;
            }
        };

        match parse_php(&content) {
            Ok(parsed) => {
                for class in &parsed.classes {
                    index
                        .entry(class.name.to_ascii_lowercase())
                        .or_insert_with(|| path.to_path_buf());
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unparsable file");
            }
        }
    }
}

impl SourceLocator for DirectoriesSourceLocator {
    fn locate(&self, identifier: &Identifier) -> Result<Option<LocatedSource>> {
        match self.index().get(&identifier.cache_key()) {
            Some(path) => {
                tracing::debug!(%identifier, path = %path.display(), "found in directory index");
                read_source_file(path).map(Some)
            }
            None => Ok(None),
        }
    }
}

/// Composer autoload support.
///
/// This module reads the PSR-4 section of a project's `composer.json` and
/// turns fully-qualified class names into candidate file paths.
///
/// # PSR-4 Resolution
///
/// Given a mapping like `"Acme\\" => "src/"`, the class `Acme\Model\User`
/// resolves by stripping the matching prefix, turning the remaining `\`
/// into `/`, appending `.php` and joining onto the mapped directory:
/// `<root>/src/Model/User.php`.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ReflectionError, Result};

/// File name Composer reads its manifest from.
pub const COMPOSER_MANIFEST: &str = "composer.json";

#[derive(Debug, Default, Deserialize)]
struct ComposerManifest {
    #[serde(default)]
    autoload: AutoloadSection,
    #[serde(default, rename = "autoload-dev")]
    autoload_dev: AutoloadSection,
}

#[derive(Debug, Default, Deserialize)]
struct AutoloadSection {
    #[serde(default, rename = "psr-4")]
    psr4: BTreeMap<String, PathList>,
}

/// Composer accepts either one directory or a list of them per prefix.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PathList {
    One(String),
    Many(Vec<String>),
}

impl PathList {
    fn into_vec(self) -> Vec<String> {
        match self {
            PathList::One(path) => vec![path],
            PathList::Many(paths) => paths,
        }
    }
}

/// A single PSR-4 namespace-to-directory mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Psr4Mapping {
    /// Namespace prefix, ending with `\` unless it is the empty fallback.
    pub prefix: String,
    /// Directory relative to the project root, always ending with `/`.
    pub base_path: String,
}

/// All PSR-4 mappings of a project, longest prefix first.
#[derive(Debug, Clone)]
pub struct Psr4Map {
    root: PathBuf,
    mappings: Vec<Psr4Mapping>,
}

impl Psr4Map {
    /// Load the mappings from `<root>/composer.json`.
    ///
    /// A missing manifest yields an empty map.  An unreadable or malformed
    /// one is an error so that a typo does not silently disable autoloading.
    pub fn load(root: &Path) -> Result<Self> {
        let manifest_path = root.join(COMPOSER_MANIFEST);
        if !manifest_path.is_file() {
            tracing::debug!(root = %root.display(), "no composer.json, PSR-4 map is empty");
            return Ok(Self {
                root: root.to_path_buf(),
                mappings: Vec::new(),
            });
        }

        let content = std::fs::read_to_string(&manifest_path)
            .map_err(|e| ReflectionError::io(&manifest_path, e))?;
        let map = Self::from_manifest(root, &content)?;
        tracing::debug!(
            manifest = %manifest_path.display(),
            mappings = map.mappings.len(),
            "loaded PSR-4 mappings"
        );
        Ok(map)
    }

    /// Build the map from manifest text, resolving paths against `root`.
    pub fn from_manifest(root: &Path, content: &str) -> Result<Self> {
        let manifest: ComposerManifest = serde_json::from_str(content)
            .map_err(|e| ReflectionError::Config(format!("{}: {}", COMPOSER_MANIFEST, e)))?;

        let mut mappings = Vec::new();
        for section in [manifest.autoload, manifest.autoload_dev] {
            for (prefix, paths) in section.psr4 {
                let prefix = normalise_prefix(&prefix);
                for path in paths.into_vec() {
                    mappings.push(Psr4Mapping {
                        prefix: prefix.clone(),
                        base_path: normalise_path(&path),
                    });
                }
            }
        }

        // Stable sort keeps `autoload` ahead of `autoload-dev` for equal
        // prefixes.
        mappings.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));

        Ok(Self {
            root: root.to_path_buf(),
            mappings,
        })
    }

    pub fn mappings(&self) -> &[Psr4Mapping] {
        &self.mappings
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Every path the class could live at, in lookup order, whether or not
    /// it exists.
    pub fn candidate_paths(&self, class_name: &str) -> Vec<PathBuf> {
        let name = crate::util::strip_fqn_prefix(class_name);
        if name.is_empty() || is_reserved_type_name(name) {
            return Vec::new();
        }

        self.mappings
            .iter()
            .filter_map(|mapping| {
                let relative = if mapping.prefix.is_empty() {
                    Some(name)
                } else {
                    strip_prefix_ignore_case(name, &mapping.prefix)
                }?;
                let relative_path = relative.replace('\\', "/");
                Some(
                    self.root
                        .join(&mapping.base_path)
                        .join(format!("{}.php", relative_path)),
                )
            })
            .collect()
    }

    /// The first candidate path that exists on disk.
    pub fn resolve(&self, class_name: &str) -> Option<PathBuf> {
        self.candidate_paths(class_name)
            .into_iter()
            .find(|path| path.is_file())
    }
}

/// Namespace prefixes are case-insensitive in PHP; directories are not, so
/// only the prefix comparison folds case.
fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let head = name.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&name[prefix.len()..])
    } else {
        None
    }
}

fn normalise_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with('\\') {
        prefix.to_string()
    } else {
        format!("{}\\", prefix)
    }
}

fn normalise_path(path: &str) -> String {
    let p = path.replace('\\', "/");
    if p.is_empty() || p.ends_with('/') {
        p
    } else {
        format!("{}/", p)
    }
}

/// Names that can appear in class position but never name a file.
fn is_reserved_type_name(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "self"
            | "static"
            | "parent"
            | "string"
            | "int"
            | "float"
            | "bool"
            | "array"
            | "object"
            | "mixed"
            | "void"
            | "never"
            | "null"
            | "true"
            | "false"
            | "callable"
            | "iterable"
    )
}

// ─── Tests ──────────────────────────────────────────────────────────────────

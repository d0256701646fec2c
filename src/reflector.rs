//! Class-like lookup and caching.
//!
//! The [`Reflector`] is the entry point of the engine.  It asks its
//! [`SourceLocator`] for source, parses it, picks out the requested
//! class-like declaration and hands back a [`ClassEntity`].  Every
//! class-like found in a parsed file is cached, so reflecting a sibling
//! from the same file later does not parse it again.
//!
//! The cache is never invalidated.  Source is assumed not to change while a
//! reflector is alive; create a new one to pick up edits.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{ReflectionError, Result};
use crate::locator::{Identifier, LocatedSource, SourceLocator};
use crate::parser::parse_php;
use crate::reflection::ClassEntity;
use crate::types::ClassLikeDeclaration;

pub struct Reflector {
    locator: Box<dyn SourceLocator>,
    /// Lowercased fully-qualified name → declaration.  Only successful
    /// lookups are stored.
    classes: Mutex<HashMap<String, Arc<ClassLikeDeclaration>>>,
}

impl Reflector {
    pub fn new(locator: impl SourceLocator + 'static) -> Self {
        Self {
            locator: Box::new(locator),
            classes: Mutex::new(HashMap::new()),
        }
    }

    /// Reflect the class-like with the given fully-qualified name.
    ///
    /// The name may carry a leading `\` and is matched case-insensitively.
    pub fn reflect(&self, class_name: &str) -> Result<ClassEntity<'_>> {
        let declaration = self.declaration(&Identifier::new(class_name))?;
        Ok(ClassEntity::new(self, declaration))
    }

    /// Whether a class-like is already in the cache.
    pub fn is_cached(&self, class_name: &str) -> bool {
        let key = Identifier::new(class_name).cache_key();
        self.classes.lock().contains_key(&key)
    }

    /// Fully-qualified names of every class-like declared in `source`, in
    /// declaration order.
    pub fn declared_class_names(source: &LocatedSource) -> Result<Vec<String>> {
        let parsed = parse_php(&source.source)?;
        Ok(parsed.classes.into_iter().map(|c| c.name).collect())
    }

    pub(crate) fn declaration(&self, identifier: &Identifier) -> Result<Arc<ClassLikeDeclaration>> {
        let key = identifier.cache_key();
        if let Some(found) = self.classes.lock().get(&key) {
            tracing::trace!(%identifier, "reflection cache hit");
            return Ok(Arc::clone(found));
        }
        tracing::debug!(%identifier, "reflection cache miss");

        for candidate in self.locator.locate_all(identifier)? {
            let parsed = parse_php(&candidate.source)?;
            if !parsed.classes.iter().any(|c| c.is_named(identifier.name())) {
                tracing::debug!(
                    %identifier,
                    origin = %candidate.origin,
                    "candidate source does not declare the class"
                );
                continue;
            }

            let mut classes = self.classes.lock();
            let mut found = None;
            for class in parsed.classes {
                let class_key = class.name.to_ascii_lowercase();
                // The first declaration of a name wins, here as in the cache.
                let entry = classes
                    .entry(class_key.clone())
                    .or_insert_with(|| Arc::new(class));
                if found.is_none() && class_key == key {
                    found = Some(Arc::clone(entry));
                }
            }
            if let Some(found) = found {
                tracing::debug!(%identifier, origin = %candidate.origin, "reflected class");
                return Ok(found);
            }
        }

        Err(ReflectionError::class_not_found(identifier.name()))
    }
}

impl std::fmt::Debug for Reflector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reflector")
            .field("cached_classes", &self.classes.lock().len())
            .finish_non_exhaustive()
    }
}

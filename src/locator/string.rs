/// In-memory source locating.
use crate::error::Result;

use super::{Identifier, LocatedSource, SourceLocator, SourceOrigin};

/// Offers a raw PHP string for every identifier.
#[derive(Debug, Clone)]
pub struct StringSourceLocator {
    source: String,
}

impl StringSourceLocator {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl SourceLocator for StringSourceLocator {
    fn locate(&self, _identifier: &Identifier) -> Result<Option<LocatedSource>> {
        Ok(Some(LocatedSource::new(
            self.source.clone(),
            SourceOrigin::InMemory("<string>".to_string()),
        )))
    }
}

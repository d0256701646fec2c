/// Chained source locating.
use crate::error::Result;

use super::{Identifier, LocatedSource, SourceLocator};

/// Consults a list of locators in order.
///
/// [`SourceLocator::locate`] returns the first hit; [`SourceLocator::locate_all`]
/// returns every candidate so the reflector can move on when an earlier
/// candidate turns out not to declare the class (a single-file locator
/// offers its file for any name, for instance).
#[derive(Default)]
pub struct AggregateSourceLocator {
    locators: Vec<Box<dyn SourceLocator>>,
}

impl AggregateSourceLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a locator to the end of the chain.
    pub fn with(mut self, locator: impl SourceLocator + 'static) -> Self {
        self.locators.push(Box::new(locator));
        self
    }

    pub fn push(&mut self, locator: Box<dyn SourceLocator>) {
        self.locators.push(locator);
    }

    pub fn len(&self) -> usize {
        self.locators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }
}

impl SourceLocator for AggregateSourceLocator {
    fn locate(&self, identifier: &Identifier) -> Result<Option<LocatedSource>> {
        for locator in &self.locators {
            if let Some(found) = locator.locate(identifier)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    fn locate_all(&self, identifier: &Identifier) -> Result<Vec<LocatedSource>> {
        let mut candidates = Vec::new();
        for locator in &self.locators {
            candidates.extend(locator.locate_all(identifier)?);
        }
        Ok(candidates)
    }
}

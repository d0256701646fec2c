/// Class-like reflection.
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{ReflectionError, Result};
use crate::reflector::Reflector;
use crate::types::{ClassLikeDeclaration, ClassLikeKind, MemberDeclaration, Visibility};

use super::{NamedReflectable, PropertyEntity};

/// Inheritance chains deeper than this are treated as cyclic.
const MAX_INHERITANCE_DEPTH: usize = 20;

/// A reflected class, interface, trait or enum.
///
/// Cheap to clone: the declaration itself lives in the reflector's cache.
#[derive(Debug, Clone)]
pub struct ClassEntity<'r> {
    reflector: &'r Reflector,
    declaration: Arc<ClassLikeDeclaration>,
}

impl<'r> ClassEntity<'r> {
    pub(crate) fn new(reflector: &'r Reflector, declaration: Arc<ClassLikeDeclaration>) -> Self {
        Self {
            reflector,
            declaration,
        }
    }

    pub(super) fn reflector(&self) -> &'r Reflector {
        self.reflector
    }

    pub(super) fn declaration_arc(&self) -> &Arc<ClassLikeDeclaration> {
        &self.declaration
    }

    /// The underlying declaration.
    pub fn declaration(&self) -> &ClassLikeDeclaration {
        &self.declaration
    }

    pub fn get_short_name(&self) -> &str {
        self.declaration.short_name()
    }

    pub fn get_namespace_name(&self) -> &str {
        self.declaration.namespace_name()
    }

    pub fn kind(&self) -> ClassLikeKind {
        self.declaration.kind
    }

    pub fn is_interface(&self) -> bool {
        self.declaration.kind == ClassLikeKind::Interface
    }

    pub fn is_trait(&self) -> bool {
        self.declaration.kind == ClassLikeKind::Trait
    }

    pub fn is_enum(&self) -> bool {
        self.declaration.kind == ClassLikeKind::Enum
    }

    pub fn is_abstract(&self) -> bool {
        self.declaration.is_abstract
    }

    pub fn is_final(&self) -> bool {
        self.declaration.is_final
    }

    pub fn get_parent_class_name(&self) -> Option<&str> {
        self.declaration.parent_class.as_deref()
    }

    pub fn get_interface_names(&self) -> &[String] {
        &self.declaration.interfaces
    }

    /// Reflect the parent class through the same reflector.
    ///
    /// `Ok(None)` when the class has no `extends` clause; a parent that
    /// cannot be located is an error.
    pub fn get_parent_class(&self) -> Result<Option<ClassEntity<'r>>> {
        match &self.declaration.parent_class {
            Some(parent) => self.reflector.reflect(parent).map(Some),
            None => Ok(None),
        }
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.get_property(name).is_ok()
    }

    /// Find a property declared here or inherited from an ancestor.
    ///
    /// Private properties of ancestors are not inherited.  The returned
    /// entity keeps the class that actually declares the property as its
    /// declaring class.
    pub fn get_property(&self, name: &str) -> Result<PropertyEntity<'r>> {
        let name = name.strip_prefix('$').unwrap_or(name);
        let mut found = None;

        self.walk_ancestry(|class, depth| {
            match class.declaration.find_property(name) {
                Some(property) if depth == 0 || property.visibility != Visibility::Private => {
                    found = Some(PropertyEntity::bind(class, Arc::clone(property), true));
                    false
                }
                _ => true,
            }
        })?;

        found.ok_or_else(|| ReflectionError::property_not_found(&self.declaration.name, name))
    }

    /// Properties declared directly in this class-like, in source order.
    pub fn get_immediate_properties(&self) -> Vec<PropertyEntity<'r>> {
        self.declaration
            .properties()
            .map(|property| PropertyEntity::bind(self, Arc::clone(property), true))
            .collect()
    }

    /// Own properties followed by inherited ones.  A property redeclared in
    /// a descendant shadows the ancestor's.
    pub fn get_properties(&self) -> Result<Vec<PropertyEntity<'r>>> {
        let mut seen = HashSet::new();
        let mut properties = Vec::new();

        self.walk_ancestry(|class, depth| {
            for property in class.declaration.properties() {
                if depth > 0 && property.visibility == Visibility::Private {
                    continue;
                }
                if seen.insert(property.name.clone()) {
                    properties.push(PropertyEntity::bind(class, Arc::clone(property), true));
                }
            }
            true
        })?;

        Ok(properties)
    }

    pub fn get_constant_names(&self) -> Vec<&str> {
        self.declaration
            .members
            .iter()
            .filter_map(|member| match member {
                MemberDeclaration::Constant(constant) => Some(constant.name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn get_method_names(&self) -> Vec<&str> {
        self.declaration
            .members
            .iter()
            .filter_map(|member| match member {
                MemberDeclaration::Method(method) => Some(method.name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Visit this class and then each ancestor, passing the distance from
    /// `self`.  The visitor returns `false` to stop early.
    fn walk_ancestry(
        &self,
        mut visit: impl FnMut(&ClassEntity<'r>, usize) -> bool,
    ) -> Result<()> {
        let mut current = self.clone();
        for depth in 0..=MAX_INHERITANCE_DEPTH {
            if !visit(&current, depth) {
                return Ok(());
            }
            match current.get_parent_class()? {
                Some(parent) => current = parent,
                None => return Ok(()),
            }
        }

        tracing::warn!(
            class = %self.declaration.name,
            limit = MAX_INHERITANCE_DEPTH,
            "inheritance chain too deep, probably cyclic"
        );
        Ok(())
    }
}

impl NamedReflectable for ClassEntity<'_> {
    fn get_name(&self) -> String {
        self.declaration.name.clone()
    }

    fn get_doc_comment(&self) -> String {
        self.declaration.doc_comment.clone().unwrap_or_default()
    }

    fn get_start_line(&self) -> u32 {
        self.declaration.start_line
    }

    fn get_end_line(&self) -> u32 {
        self.declaration.end_line
    }
}

/// Two entities are equal when they share the same cached declaration.
impl PartialEq for ClassEntity<'_> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.declaration, &other.declaration)
    }
}

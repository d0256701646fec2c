//! Property reflection.
//!
//! A [`PropertyEntity`] is the reflection handle for one property
//! declaration.  Everything it reports is derived from the owned
//! [`PropertyDeclaration`] produced by the parser and from the class that
//! declares it.  The only mutable state is the visibility, which callers
//! may change with [`PropertyEntity::set_visibility`].
//!
//! Derived facts (folded default value, doc-block types) are computed on
//! first use and memoized per entity.

use std::cell::OnceCell;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::docblock::{DocBlockType, extract_var_raw_type, resolve_doc_block_types, split_union};
use crate::error::{ReflectionError, Result};
use crate::locator::Identifier;
use crate::reflector::Reflector;
use crate::types::{ClassLikeDeclaration, MemberDeclaration, PropertyDeclaration, Visibility};
use crate::value::{ConstantFolder, Value};

use super::{ClassEntity, IS_PRIVATE, IS_PROTECTED, IS_PUBLIC, IS_STATIC, NamedReflectable};

/// Anything that can tell which class an object snapshot belongs to.
pub trait ReflectedInstance {
    /// Fully-qualified class name of the instance.
    fn class_name(&self) -> &str;
}

/// A minimal [`ReflectedInstance`]: just the class name of an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceDescriptor {
    class_name: String,
}

impl InstanceDescriptor {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }
}

impl ReflectedInstance for InstanceDescriptor {
    fn class_name(&self) -> &str {
        &self.class_name
    }
}

/// A reflected property.
///
/// Deliberately not `Clone`: two handles with independently mutable
/// visibility would disagree about the same declaration.  See
/// [`PropertyEntity::try_clone`].
#[derive(Debug)]
pub struct PropertyEntity<'r> {
    reflector: &'r Reflector,
    declaration: Arc<PropertyDeclaration>,
    /// The declaring class, held weakly; the reflector's cache owns it.
    class: Weak<ClassLikeDeclaration>,
    visibility: Visibility,
    is_default: bool,
    /// Folded default value, or the text of the expression that could not
    /// be folded.
    default_value: OnceCell<std::result::Result<Option<Value>, String>>,
    doc_block_type_strings: OnceCell<Vec<String>>,
    doc_block_types: OnceCell<Vec<DocBlockType>>,
}

impl<'r> PropertyEntity<'r> {
    pub(super) fn bind(
        class: &ClassEntity<'r>,
        declaration: Arc<PropertyDeclaration>,
        is_default: bool,
    ) -> Self {
        Self {
            reflector: class.reflector(),
            visibility: declaration.visibility,
            declaration,
            class: Arc::downgrade(class.declaration_arc()),
            is_default,
            default_value: OnceCell::new(),
            doc_block_type_strings: OnceCell::new(),
            doc_block_types: OnceCell::new(),
        }
    }

    /// Bind a property handle directly to a member declaration of `class`.
    ///
    /// `is_default` is `true` for properties found in parsed source; pass
    /// `false` for a declaration built by hand with
    /// [`PropertyDeclaration::new`], e.g. for a member that only exists at
    /// run time.  Any other member kind is rejected with
    /// [`ReflectionError::InvalidNode`].
    pub fn from_declaration(
        class: &ClassEntity<'r>,
        member: &MemberDeclaration,
        is_default: bool,
    ) -> Result<Self> {
        match member {
            MemberDeclaration::Property(property) => {
                Ok(Self::bind(class, Arc::clone(property), is_default))
            }
            other => Err(ReflectionError::InvalidNode {
                expected: "property",
                found: other.kind_name(),
            }),
        }
    }

    /// Reflect `class_name`, then look the property up on it (including
    /// inherited properties).
    pub fn from_name_on_class(
        reflector: &'r Reflector,
        class_name: &str,
        property_name: &str,
    ) -> Result<Self> {
        reflector.reflect(class_name)?.get_property(property_name)
    }

    /// Like [`PropertyEntity::from_name_on_class`], using the class of an
    /// object snapshot.
    pub fn from_name_on_instance(
        reflector: &'r Reflector,
        instance: &impl ReflectedInstance,
        property_name: &str,
    ) -> Result<Self> {
        Self::from_name_on_class(reflector, instance.class_name(), property_name)
    }

    /// Exporting a property is not supported.
    pub fn export_by_name(class_name: &str, property_name: &str) -> Result<String> {
        Err(ReflectionError::UnsupportedOperation(format!(
            "Unable to export {}::${}: export is not supported",
            class_name, property_name
        )))
    }

    /// Exporting a property is not supported.
    pub fn export(&self) -> Result<String> {
        Self::export_by_name(&self.declaration.declaring_class, &self.declaration.name)
    }

    /// Always fails with [`ReflectionError::Uncloneable`].
    pub fn try_clone(&self) -> Result<Self> {
        Err(ReflectionError::Uncloneable(format!(
            "Trying to clone an uncloneable object of class PropertyEntity ({}::${})",
            self.declaration.declaring_class, self.declaration.name
        )))
    }

    pub fn declaration(&self) -> &PropertyDeclaration {
        &self.declaration
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_protected(&self) -> bool {
        self.visibility == Visibility::Protected
    }

    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }

    pub fn is_static(&self) -> bool {
        self.declaration.is_static
    }

    /// Whether the property was declared in source rather than synthesized.
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn is_readonly(&self) -> bool {
        self.declaration.is_readonly
    }

    pub fn is_promoted(&self) -> bool {
        self.declaration.is_promoted
    }

    /// The native type declaration as written, if any.
    pub fn get_type_hint(&self) -> Option<&str> {
        self.declaration.type_hint.as_deref()
    }

    /// One visibility bit, plus [`IS_STATIC`] for static properties.
    pub fn get_modifiers(&self) -> u32 {
        let visibility = match self.visibility {
            Visibility::Public => IS_PUBLIC,
            Visibility::Protected => IS_PROTECTED,
            Visibility::Private => IS_PRIVATE,
        };
        if self.is_static() {
            visibility | IS_STATIC
        } else {
            visibility
        }
    }

    /// Change the visibility.  `flag` must be exactly one of [`IS_PUBLIC`],
    /// [`IS_PROTECTED`] or [`IS_PRIVATE`].
    pub fn set_visibility(&mut self, flag: u32) -> Result<()> {
        self.visibility = match flag {
            IS_PUBLIC => Visibility::Public,
            IS_PROTECTED => Visibility::Protected,
            IS_PRIVATE => Visibility::Private,
            _ => {
                return Err(ReflectionError::InvalidArgument(
                    "Visibility should be \\ReflectionProperty::IS_PRIVATE, ::IS_PROTECTED or ::IS_PUBLIC constants"
                        .to_string(),
                ));
            }
        };
        Ok(())
    }

    /// The folded default value.
    ///
    /// `Ok(None)` when the declaration has no initializer at all.  An
    /// initializer that is not a constant expression is reported as
    /// [`ReflectionError::UnfoldableExpression`] rather than hidden.
    pub fn get_default_value(&self) -> Result<Option<Value>> {
        let memo = self.default_value.get_or_init(|| {
            let Some(expr) = &self.declaration.default_value else {
                return Ok(None);
            };
            let class = self.declaring_class_declaration();
            match ConstantFolder::new(class.as_deref()).fold(expr) {
                Ok(value) => Ok(Some(value)),
                Err(ReflectionError::UnfoldableExpression { expression }) => Err(expression),
                Err(other) => Err(other.to_string()),
            }
        });

        match memo {
            Ok(value) => Ok(value.clone()),
            Err(expression) => Err(ReflectionError::UnfoldableExpression {
                expression: expression.clone(),
            }),
        }
    }

    /// The raw union members of the `@var` tag, as written.
    pub fn get_doc_block_type_strings(&self) -> &[String] {
        self.doc_block_type_strings.get_or_init(|| {
            self.declaration
                .doc_comment
                .as_deref()
                .and_then(extract_var_raw_type)
                .map(|raw| split_union(raw).into_iter().map(str::to_string).collect())
                .unwrap_or_default()
        })
    }

    /// The `@var` tag resolved into structured types.
    pub fn get_doc_block_types(&self) -> &[DocBlockType] {
        self.doc_block_types.get_or_init(|| {
            self.declaration
                .doc_comment
                .as_deref()
                .and_then(extract_var_raw_type)
                .map(resolve_doc_block_types)
                .unwrap_or_default()
        })
    }

    pub fn get_declaring_class_name(&self) -> &str {
        &self.declaration.declaring_class
    }

    pub fn get_declaring_class(&self) -> Result<ClassEntity<'r>> {
        match self.class.upgrade() {
            Some(class) => Ok(ClassEntity::new(self.reflector, class)),
            None => self.reflector.reflect(&self.declaration.declaring_class),
        }
    }

    fn declaring_class_declaration(&self) -> Option<Arc<ClassLikeDeclaration>> {
        self.class.upgrade().or_else(|| {
            self.reflector
                .declaration(&Identifier::new(&self.declaration.declaring_class))
                .ok()
        })
    }
}

impl NamedReflectable for PropertyEntity<'_> {
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

/// `Property [ <default> private $y ]`.  Static properties never carry the
/// `<default>` marker, as in native reflection.
impl fmt::Display for PropertyEntity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Property [ {}{} {}${} ]",
            if self.is_default && !self.is_static() {
                "<default> "
            } else {
                ""
            },
            self.visibility.as_str(),
            if self.is_static() { "static " } else { "" },
            self.declaration.name
        )
    }
}

//! Declaration model produced by the parser.
//!
//! This module contains the owned "declaration" structs that describe what
//! a PHP source file declares: class-likes and their members.  All data is
//! owned so nothing depends on the parser's arena lifetime, and every
//! declaration is immutable once its owning [`ClassLikeDeclaration`] has
//! been built.

use std::sync::Arc;

use crate::value::ConstantExpression;

/// Visibility of a class member (method, property, or constant).
///
/// In PHP, members without an explicit visibility modifier default to `Public`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// The PHP keyword for this visibility.
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

/// The kind of class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassLikeKind {
    Class,
    Interface,
    Trait,
    Enum,
}

/// A property declared in a class-like body, or promoted from a
/// constructor parameter.
///
/// `public $a = 1, $b;` yields two declarations that share the statement's
/// modifiers, doc comment and line span.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDeclaration {
    /// The property name WITHOUT the `$` prefix.
    pub name: String,
    /// Fully-qualified name of the declaring class-like.  This is the
    /// back-reference into the reflector's class registry; it never owns
    /// the class.
    pub declaring_class: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_readonly: bool,
    /// Whether the property was promoted from a constructor parameter.
    pub is_promoted: bool,
    /// Native type declaration as written (e.g. "?int", "string|Foo").
    pub type_hint: Option<String>,
    /// The initializer expression, if the declaration has one.
    pub default_value: Option<ConstantExpression>,
    /// The `/** ... */` comment selected for this declaration.
    pub doc_comment: Option<String>,
    pub start_line: u32,
    pub end_line: u32,
}

impl PropertyDeclaration {
    /// Create a bare public, non-static declaration with no default value,
    /// no doc comment and no source position.
    ///
    /// Used for properties that are not backed by parsed source, such as
    /// members expected to exist only at run time.
    pub fn new(name: impl Into<String>, declaring_class: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: name.strip_prefix('$').map(str::to_string).unwrap_or(name),
            declaring_class: declaring_class.into(),
            visibility: Visibility::Public,
            is_static: false,
            is_readonly: false,
            is_promoted: false,
            type_hint: None,
            default_value: None,
            doc_comment: None,
            start_line: 0,
            end_line: 0,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_default_value(mut self, value: ConstantExpression) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// Stores extracted method information from a parsed PHP class.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDeclaration {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub start_line: u32,
    pub end_line: u32,
}

/// A class constant (`const FOO = 1;`).
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDeclaration {
    pub name: String,
    pub visibility: Visibility,
    pub value: ConstantExpression,
    pub start_line: u32,
    pub end_line: u32,
}

/// A single `case` of an enum.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumCaseDeclaration {
    pub name: String,
}

/// One member of a class-like body, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberDeclaration {
    Property(Arc<PropertyDeclaration>),
    Method(MethodDeclaration),
    Constant(ConstantDeclaration),
    EnumCase(EnumCaseDeclaration),
    /// `use Foo, Bar;` inside a class body; names are fully qualified.
    TraitUse(Vec<String>),
}

impl MemberDeclaration {
    /// Human readable name of the member kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            MemberDeclaration::Property(_) => "property",
            MemberDeclaration::Method(_) => "method",
            MemberDeclaration::Constant(_) => "constant",
            MemberDeclaration::EnumCase(_) => "enum case",
            MemberDeclaration::TraitUse(_) => "trait use",
        }
    }
}

/// A class, interface, trait or enum declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassLikeDeclaration {
    pub kind: ClassLikeKind,
    /// Fully-qualified name without a leading `\` (e.g. "App\Models\User").
    pub name: String,
    /// The parent from the `extends` clause, fully qualified.  For
    /// interfaces this is the first extended interface.
    pub parent_class: Option<String>,
    /// Implemented (or, for interfaces, additionally extended) interfaces.
    pub interfaces: Vec<String>,
    pub members: Vec<MemberDeclaration>,
    pub is_abstract: bool,
    pub is_final: bool,
    pub doc_comment: Option<String>,
    pub start_line: u32,
    pub end_line: u32,
}

impl ClassLikeDeclaration {
    /// The last segment of the fully-qualified name.
    pub fn short_name(&self) -> &str {
        crate::util::short_name(&self.name)
    }

    /// The namespace part of the name, empty for the global namespace.
    pub fn namespace_name(&self) -> &str {
        match self.name.rfind('\\') {
            Some(idx) => &self.name[..idx],
            None => "",
        }
    }

    /// Properties declared directly in this class-like, in source order.
    pub fn properties(&self) -> impl Iterator<Item = &Arc<PropertyDeclaration>> {
        self.members.iter().filter_map(|m| match m {
            MemberDeclaration::Property(p) => Some(p),
            _ => None,
        })
    }

    /// Find a directly declared property by exact name.
    pub fn find_property(&self, name: &str) -> Option<&Arc<PropertyDeclaration>> {
        self.properties().find(|p| p.name == name)
    }

    /// Find a directly declared class constant by exact name.
    pub fn find_constant(&self, name: &str) -> Option<&ConstantDeclaration> {
        self.members.iter().find_map(|m| match m {
            MemberDeclaration::Constant(c) if c.name == name => Some(c),
            _ => None,
        })
    }

    /// Whether the given (possibly `\`-prefixed) name refers to this class.
    pub fn is_named(&self, name: &str) -> bool {
        let name = name.strip_prefix('\\').unwrap_or(name);
        self.name.eq_ignore_ascii_case(name)
    }
}

//! Error types for the reflection engine.
//!
//! Every failure the engine can report is a variant of [`ReflectionError`].
//! Callers that only care about the category can match on
//! [`ReflectionError::kind`].

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReflectionError>;

/// Fieldless category of a [`ReflectionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidNode,
    InvalidArgument,
    UnsupportedOperation,
    Uncloneable,
    UnfoldableExpression,
    Io,
    Parse,
    Config,
}

#[derive(Debug, Error)]
pub enum ReflectionError {
    /// A class, property or source could not be found anywhere searched.
    #[error("{kind} \"{name}\" could not be found")]
    NotFound { kind: &'static str, name: String },

    /// A declaration node of the wrong kind was handed to a constructor.
    #[error("expected a {expected} declaration, got a {found} declaration")]
    InvalidNode {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    UnsupportedOperation(String),

    #[error("{0}")]
    Uncloneable(String),

    /// A default value expression exists but is not a foldable literal.
    #[error("unable to compile expression to a constant value: {expression}")]
    UnfoldableExpression { expression: String },

    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse PHP source: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ReflectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReflectionError::NotFound { .. } => ErrorKind::NotFound,
            ReflectionError::InvalidNode { .. } => ErrorKind::InvalidNode,
            ReflectionError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ReflectionError::UnsupportedOperation(_) => ErrorKind::UnsupportedOperation,
            ReflectionError::Uncloneable(_) => ErrorKind::Uncloneable,
            ReflectionError::UnfoldableExpression { .. } => ErrorKind::UnfoldableExpression,
            ReflectionError::Io { .. } => ErrorKind::Io,
            ReflectionError::Parse(_) => ErrorKind::Parse,
            ReflectionError::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn class_not_found(name: impl Into<String>) -> Self {
        ReflectionError::NotFound {
            kind: "class",
            name: name.into(),
        }
    }

    pub(crate) fn property_not_found(class: &str, property: &str) -> Self {
        ReflectionError::NotFound {
            kind: "property",
            name: format!("{}::${}", class, property),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReflectionError::Io {
            path: path.into(),
            source,
        }
    }
}

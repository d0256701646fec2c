//! Doc-block type model and resolution.
//!
//! A `@var` tag value such as `int|bool[][]|\Foo\Bar` is split on the
//! union delimiter and every token is classified into a [`DocBlockType`].
//! Class names are kept exactly as written; resolving them against the
//! surrounding namespace and imports is left to the caller.

use std::fmt;

/// Keywords that denote built-in (non-class) types.
pub(crate) const SCALAR_KEYWORDS: &[&str] = &[
    "int", "integer", "float", "double", "bool", "boolean", "string", "array", "object", "mixed",
    "null", "void", "callable", "iterable", "resource", "false", "true", "scalar", "self",
    "static", "$this", "never",
];

/// One type from a doc-block type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocBlockType {
    /// A built-in type keyword, stored lowercase (e.g. `int`, `null`).
    Scalar(String),
    /// `T[]`; nesting depth equals the number of `[]` suffixes.
    ArrayOf(Box<DocBlockType>),
    /// Any other name, kept as written (e.g. `\stdClass`, `Foo<int>`).
    ClassReference(String),
    /// `?T`.
    Nullable(Box<DocBlockType>),
}

impl DocBlockType {
    /// Classify a single (already trimmed) type token.
    pub fn from_token(token: &str) -> DocBlockType {
        let token = token.trim();

        if let Some(inner) = token.strip_prefix('?') {
            return DocBlockType::Nullable(Box::new(DocBlockType::from_token(inner)));
        }

        if let Some(element) = token.strip_suffix("[]") {
            return DocBlockType::ArrayOf(Box::new(DocBlockType::from_token(element)));
        }

        let lower = token.to_ascii_lowercase();
        if SCALAR_KEYWORDS.contains(&lower.as_str()) {
            DocBlockType::Scalar(lower)
        } else {
            DocBlockType::ClassReference(token.to_string())
        }
    }

    /// Number of `ArrayOf` layers wrapped around the innermost type.
    pub fn array_depth(&self) -> usize {
        match self {
            DocBlockType::ArrayOf(inner) => 1 + inner.array_depth(),
            _ => 0,
        }
    }
}

impl fmt::Display for DocBlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocBlockType::Scalar(name) | DocBlockType::ClassReference(name) => write!(f, "{}", name),
            DocBlockType::ArrayOf(inner) => write!(f, "{}[]", inner),
            DocBlockType::Nullable(inner) => write!(f, "?{}", inner),
        }
    }
}

/// Split a raw type-tag value on `|` at nesting depth 0, trimming every
/// token and dropping empty ones.
///
/// - `"int|float"`                  → `["int", "float"]`
/// - `"array<int|string, Foo>|null"` → `["array<int|string, Foo>", "null"]`
pub fn split_union(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, c) in raw.char_indices() {
        match c {
            '<' | '(' | '{' => depth += 1,
            '>' | ')' | '}' => depth -= 1,
            '|' if depth == 0 => {
                parts.push(raw[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(raw[start..].trim());

    parts.retain(|p| !p.is_empty());
    parts
}

/// Resolve a raw type-tag value into an ordered list of types.
pub fn resolve_doc_block_types(raw: &str) -> Vec<DocBlockType> {
    split_union(raw)
        .into_iter()
        .map(DocBlockType::from_token)
        .collect()
}

/// Split off the first type token from `s`, respecting `<…>`, `(…)` and
/// `{…}` nesting.
///
/// Returns `(type_token, remainder)` where `type_token` is the full type
/// (e.g. `Collection<int, User>`) and `remainder` is whatever follows.
/// Whitespace next to a top-level `|` belongs to the type, so
/// `int | float $x` yields `int | float`.
pub(crate) fn split_type_token(s: &str) -> (&str, &str) {
    let mut depth = 0i32;
    for (i, c) in s.char_indices() {
        match c {
            '<' | '(' | '{' => depth += 1,
            '>' | ')' | '}' => depth -= 1,
            c if c.is_whitespace() && depth <= 0 => {
                let joins_union =
                    s[..i].trim_end().ends_with('|') || s[i..].trim_start().starts_with('|');
                if !joins_union {
                    return (&s[..i], &s[i..]);
                }
            }
            _ => {}
        }
    }
    (s, "")
}

// ─── Tests ──────────────────────────────────────────────────────────────────

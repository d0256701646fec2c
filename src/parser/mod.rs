/// PHP parsing and AST extraction.
///
/// This module contains the logic for parsing PHP source text using the
/// mago_syntax parser and lowering the resulting AST into the owned
/// declaration model in [`crate::types`].  Nothing returned from here
/// borrows from the parser's arena.
///
/// Sub-modules:
/// - [`classes`]: Class, interface, trait, and enum extraction
/// - [`expressions`]: Initializer expressions lowered for constant folding
/// - [`use_statements`]: Namespace tracking and `use` import resolution
mod classes;
mod expressions;
mod use_statements;

use mago_span::HasSpan;
use mago_syntax::ast::*;

use crate::error::{ReflectionError, Result};
use crate::types::{ClassLikeDeclaration, Visibility};
use crate::util::LineIndex;

pub use use_statements::NameContext;

/// Everything declared in one parsed source file.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub classes: Vec<ClassLikeDeclaration>,
}

impl ParsedFile {
    /// Find a class-like by (possibly `\`-prefixed) fully-qualified name,
    /// ignoring ASCII case.
    pub fn find_class(&self, name: &str) -> Option<&ClassLikeDeclaration> {
        self.classes.iter().find(|c| c.is_named(name))
    }
}

/// Source context shared by the extraction functions.
///
/// Bundles the program's trivia (comments/whitespace), the raw source text
/// and a line index so that extraction can look up the `/** ... */`
/// comment preceding any AST node, slice the source of unsupported
/// expressions, and turn spans into line numbers.
pub(crate) struct SourceCtx<'a> {
    pub trivias: &'a [Trivia<'a>],
    pub content: &'a str,
    pub lines: LineIndex,
}

impl SourceCtx<'_> {
    /// First and last line covered by a node.
    pub fn line_span(&self, node: &impl HasSpan) -> (u32, u32) {
        let span = node.span();
        (
            self.lines.line_at(span.start.offset),
            self.lines.line_at_end(span.start.offset, span.end.offset),
        )
    }

    /// The source text of a node.
    pub fn source_of(&self, node: &impl HasSpan) -> String {
        let span = node.span();
        self.content
            .get(span.start.offset as usize..span.end.offset as usize)
            .unwrap_or_default()
            .to_string()
    }

    /// The docblock attached to a node, owned.
    pub fn docblock_for(&self, node: &impl HasSpan) -> Option<String> {
        crate::docblock::get_docblock_text_for_node(self.trivias, self.content, node)
            .map(str::to_string)
    }
}

/// Parse PHP source text and extract every class-like declaration.
///
/// The mago parser recovers from syntax errors on its own; a panic inside
/// the parser is caught and reported as [`ReflectionError::Parse`].
pub fn parse_php(content: &str) -> Result<ParsedFile> {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let arena = bumpalo::Bump::new();
        let file_id = mago_database::file::FileId::new("input.php");
        let program = mago_syntax::parser::parse_file_content(&arena, file_id, content);

        let ctx = SourceCtx {
            trivias: program.trivia.as_slice(),
            content,
            lines: LineIndex::new(content),
        };

        let mut classes = Vec::new();
        let mut names = NameContext::default();
        classes::extract_classes_from_statements(
            program.statements.iter(),
            &ctx,
            &mut names,
            &mut classes,
        );
        classes
    }));

    match result {
        Ok(classes) => {
            tracing::debug!(classes = classes.len(), "parsed PHP source");
            Ok(ParsedFile { classes })
        }
        Err(_) => {
            tracing::warn!("parser panicked while parsing PHP source");
            Err(ReflectionError::Parse(
                "the parser aborted on malformed input".to_string(),
            ))
        }
    }
}

/// Extract a string representation of a type hint from the AST.
pub(crate) fn extract_hint_string(hint: &Hint) -> String {
    match hint {
        Hint::Identifier(ident) => ident.value().to_string(),
        Hint::Nullable(nullable) => {
            format!("?{}", extract_hint_string(nullable.hint))
        }
        Hint::Union(union) => {
            let left = extract_hint_string(union.left);
            let right = extract_hint_string(union.right);
            format!("{}|{}", left, right)
        }
        Hint::Intersection(intersection) => {
            let left = extract_hint_string(intersection.left);
            let right = extract_hint_string(intersection.right);
            format!("{}&{}", left, right)
        }
        Hint::Void(ident)
        | Hint::Never(ident)
        | Hint::Float(ident)
        | Hint::Bool(ident)
        | Hint::Integer(ident)
        | Hint::String(ident)
        | Hint::Object(ident)
        | Hint::Mixed(ident)
        | Hint::Iterable(ident) => ident.value.to_string(),
        Hint::Null(keyword)
        | Hint::True(keyword)
        | Hint::False(keyword)
        | Hint::Array(keyword)
        | Hint::Callable(keyword)
        | Hint::Static(keyword)
        | Hint::Self_(keyword)
        | Hint::Parent(keyword) => keyword.value.to_string(),
        Hint::Parenthesized(paren) => {
            format!("({})", extract_hint_string(paren.hint))
        }
    }
}

/// Extract visibility from a set of modifiers.
/// Defaults to `Public` if no visibility modifier is present.
pub(crate) fn extract_visibility<'a>(
    modifiers: impl Iterator<Item = &'a Modifier<'a>>,
) -> Visibility {
    for m in modifiers {
        if m.is_private() {
            return Visibility::Private;
        }
        if m.is_protected() {
            return Visibility::Protected;
        }
        if m.is_public() {
            return Visibility::Public;
        }
    }
    Visibility::Public
}

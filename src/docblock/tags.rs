//! PHPDoc tag extraction.
//!
//! This submodule finds the docblock that belongs to an AST node and pulls
//! the raw value out of its `@var` tag.

use mago_span::HasSpan;
use mago_syntax::ast::*;

use super::types::split_type_token;

/// Look up the docblock comment (if any) for a declaration and return its
/// raw text.
///
/// Walks the program's trivia backwards from the node.  Whitespace and
/// ordinary comments (`//`, `#`, `/* */`) between the node and the
/// docblock are skipped, so the nearest preceding `/** ... */` wins even
/// when ordinary comments sit around it.  The `content` parameter is the
/// full source text and is used to verify there is no code between the
/// docblock and the node.
pub fn get_docblock_text_for_node<'a>(
    trivia: &'a [Trivia<'a>],
    content: &str,
    node: &impl HasSpan,
) -> Option<&'a str> {
    let node_start = node.span().start.offset;
    let candidate_idx = trivia.partition_point(|t| t.span.start.offset < node_start);
    if candidate_idx == 0 {
        return None;
    }

    let content_bytes = content.as_bytes();
    let mut covered_from = node_start;

    for i in (0..candidate_idx).rev() {
        let t = &trivia[i];
        let t_end = t.span.end.offset;

        // Check for non-whitespace content in the gap between this trivia
        // and the region we've already covered.
        let gap = content_bytes
            .get(t_end as usize..covered_from as usize)
            .unwrap_or(&[]);
        if !gap.iter().all(u8::is_ascii_whitespace) {
            return None;
        }

        match t.kind {
            TriviaKind::DocBlockComment => return Some(t.value),
            TriviaKind::WhiteSpace
            | TriviaKind::SingleLineComment
            | TriviaKind::MultiLineComment
            | TriviaKind::HashComment => {
                covered_from = t.span.start.offset;
            }
        }
    }

    None
}

/// Extract the raw type from the first `@var` tag of a docblock.
///
/// The type is returned exactly as written (a leading `\` is kept), with
/// `<…>`, `(…)` and `{…}` nesting respected so that
/// `@var array<int, string> $map` yields `array<int, string>`.
///
/// Returns `None` when there is no `@var` tag or the tag has no type.
pub fn extract_var_raw_type(docblock: &str) -> Option<&str> {
    // Strip the `/**` opening and `*/` closing delimiters so that we only
    // deal with the inner content.
    let trimmed = docblock.trim();
    let inner = trimmed.strip_prefix("/**").unwrap_or(trimmed);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    for line in inner.lines() {
        // Strip leading whitespace and the `*` gutter common in docblocks.
        let line = line.trim().trim_start_matches('*').trim();

        let Some(rest) = line.strip_prefix("@var") else {
            continue;
        };
        // `@variable` is not `@var`.
        if rest.chars().next().is_some_and(|c| !c.is_whitespace()) {
            continue;
        }
        let rest = rest.trim_start();
        if rest.is_empty() || rest.starts_with('$') {
            continue;
        }

        let (type_str, _remainder) = split_type_token(rest);
        if !type_str.is_empty() {
            return Some(type_str);
        }
    }
    None
}

// ─── Tests ──────────────────────────────────────────────────────────────────

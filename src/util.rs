/// Small helpers shared by the parser, the locators and the reflector.
///
/// This module contains byte offset to line conversion and class name
/// normalisation.

/// Return the last segment of a namespace-qualified name.
///
/// `"App\\Models\\User"` → `"User"`, `"User"` → `"User"`.
pub fn short_name(name: &str) -> &str {
    name.rsplit('\\').next().unwrap_or(name)
}

/// Strip a leading `\` (PHP fully-qualified name syntax).
pub fn strip_fqn_prefix(name: &str) -> &str {
    name.strip_prefix('\\').unwrap_or(name)
}

/// Maps byte offsets to 1-indexed line numbers.
///
/// Built once per parsed file; lookups are a binary search over the
/// offsets at which each line starts.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(memchr::memchr_iter(b'\n', content.as_bytes()).map(|i| i as u32 + 1));
        Self { line_starts }
    }

    /// The line containing the byte at `offset`.
    pub fn line_at(&self, offset: u32) -> u32 {
        self.line_starts.partition_point(|&start| start <= offset) as u32
    }

    /// The line of the last byte of a span ending (exclusively) at `end`.
    pub fn line_at_end(&self, start: u32, end: u32) -> u32 {
        self.line_at(end.saturating_sub(1).max(start))
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

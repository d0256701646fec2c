//! PHPDoc block parsing.
//!
//! This module selects the `/** ... */` comment that documents a
//! declaration and extracts type information from its `@var` tag.
//!
//! # Submodules
//!
//! - [`tags`]: docblock text retrieval from the parser's trivia and
//!   `@var` tag extraction.
//! - [`types`]: the [`DocBlockType`] model and the resolver that turns a
//!   raw tag value into an ordered list of types.

mod tags;
pub mod types;

pub use tags::{extract_var_raw_type, get_docblock_text_for_node};
pub use types::{DocBlockType, resolve_doc_block_types, split_union};

use phpantom_reflection::DocBlockType;
use phpantom_reflection::docblock::{extract_var_raw_type, resolve_doc_block_types, split_union};

fn scalar(name: &str) -> DocBlockType {
    DocBlockType::Scalar(name.to_string())
}

fn class(name: &str) -> DocBlockType {
    DocBlockType::ClassReference(name.to_string())
}

fn array_of(inner: DocBlockType) -> DocBlockType {
    DocBlockType::ArrayOf(Box::new(inner))
}

// ─── @var Tag Extraction ────────────────────────────────────────────────────

#[test]
fn test_var_tag_in_multiline_docblock() {
    let doc = "/**\n * Description first.\n *\n * @var Foo|null\n */";
    assert_eq!(extract_var_raw_type(doc), Some("Foo|null"));
}

#[test]
fn test_first_var_tag_wins() {
    let doc = "/**\n * @var int\n * @var string\n */";
    assert_eq!(extract_var_raw_type(doc), Some("int"));
}

#[test]
fn test_generic_types_are_not_split_on_spaces() {
    let doc = "/** @var array<string, list<int>> $map */";
    assert_eq!(extract_var_raw_type(doc), Some("array<string, list<int>>"));
    assert_eq!(
        split_union("array<string, int|float>|Collection<int, \\Foo>"),
        vec!["array<string, int|float>", "Collection<int, \\Foo>"]
    );
}

// ─── Type Resolution ────────────────────────────────────────────────────────

#[test]
fn test_union_order_is_preserved() {
    assert_eq!(
        resolve_doc_block_types("string|int|\\App\\User|null"),
        vec![scalar("string"), scalar("int"), class("\\App\\User"), scalar("null")]
    );
}

#[test]
fn test_array_suffix_depth() {
    let types = resolve_doc_block_types("Foo[][][]");
    assert_eq!(types, vec![array_of(array_of(array_of(class("Foo"))))]);
    assert_eq!(types[0].array_depth(), 3);
}

#[test]
fn test_whitespace_and_empty_members() {
    assert_eq!(
        resolve_doc_block_types(" int |  | float "),
        vec![scalar("int"), scalar("float")]
    );
    assert!(resolve_doc_block_types("").is_empty());
}

#[test]
fn test_scalar_aliases_and_case() {
    assert_eq!(
        resolve_doc_block_types("Integer|BOOLEAN|Mixed"),
        vec![scalar("integer"), scalar("boolean"), scalar("mixed")]
    );
}

#[test]
fn test_nullable_and_display() {
    let types = resolve_doc_block_types("?int[]|\\Foo");
    assert_eq!(
        types,
        vec![
            DocBlockType::Nullable(Box::new(array_of(scalar("int")))),
            class("\\Foo"),
        ]
    );
    let rendered: Vec<String> = types.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["?int[]", "\\Foo"]);
}

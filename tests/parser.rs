use phpantom_reflection::parser::parse_php;
use phpantom_reflection::types::{ClassLikeKind, MemberDeclaration};
use phpantom_reflection::value::ConstantExpression;
use phpantom_reflection::Visibility;

// ─── PHP Parsing / Declaration Extraction Tests ─────────────────────────────

#[test]
fn test_parse_php_extracts_class_and_members_in_order() {
    let php = concat!(
        "<?php\n",
        "class User {\n",
        "    const ROLE = 'user';\n",
        "    public $name;\n",
        "    function login() {}\n",
        "    protected static $count = 0;\n",
        "}\n",
    );

    let parsed = parse_php(php).unwrap();
    assert_eq!(parsed.classes.len(), 1);
    let class = &parsed.classes[0];
    assert_eq!(class.name, "User");
    assert_eq!(class.kind, ClassLikeKind::Class);

    let kinds: Vec<&str> = class.members.iter().map(|m| m.kind_name()).collect();
    assert_eq!(kinds, vec!["constant", "property", "method", "property"]);

    let count = class.find_property("count").unwrap();
    assert_eq!(count.visibility, Visibility::Protected);
    assert!(count.is_static);
    assert_eq!(count.declaring_class, "User");
    assert_eq!(
        count.default_value,
        Some(ConstantExpression::Integer("0".to_string()))
    );
}

#[test]
fn test_parse_php_ignores_standalone_functions() {
    let php = "<?php\nfunction standalone() {}\nclass Service {\n    function handle() {}\n}\n";
    let parsed = parse_php(php).unwrap();
    assert_eq!(parsed.classes.len(), 1, "Only class-likes should be extracted");
    assert_eq!(parsed.classes[0].name, "Service");
}

#[test]
fn test_parse_php_no_classes_returns_empty() {
    let parsed = parse_php("<?php\nfunction foo() {}\n$x = 1;\n").unwrap();
    assert!(parsed.classes.is_empty());
}

#[test]
fn test_multiple_property_items_share_statement_data() {
    let php = concat!(
        "<?php\n",
        "class Pair {\n",
        "    /** @var int */\n",
        "    private $a = 1, $b;\n",
        "}\n",
    );
    let parsed = parse_php(php).unwrap();
    let class = parsed.find_class("pair").unwrap();

    let a = class.find_property("a").unwrap();
    let b = class.find_property("b").unwrap();
    assert_eq!(a.visibility, Visibility::Private);
    assert_eq!(b.visibility, Visibility::Private);
    assert_eq!(a.doc_comment, b.doc_comment);
    assert_eq!(a.doc_comment.as_deref(), Some("/** @var int */"));
    assert_eq!((a.start_line, a.end_line), (4, 4));
    assert!(a.default_value.is_some());
    assert!(b.default_value.is_none());
}

#[test]
fn test_var_without_modifier_is_public() {
    let parsed = parse_php("<?php\nclass Old { var $legacy; }\n").unwrap();
    let legacy = parsed.classes[0].find_property("legacy").unwrap();
    assert_eq!(legacy.visibility, Visibility::Public);
    assert!(!legacy.is_static);
}

#[test]
fn test_braced_namespaces_and_imports() {
    let php = concat!(
        "<?php\n",
        "namespace One {\n",
        "    use Two\\Base as Parent_;\n",
        "    class Child extends Parent_ implements \\Countable, Contracts\\Shape {}\n",
        "}\n",
        "namespace Two {\n",
        "    class Base {}\n",
        "}\n",
    );
    let parsed = parse_php(php).unwrap();

    let child = parsed.find_class("\\One\\Child").unwrap();
    assert_eq!(child.parent_class.as_deref(), Some("Two\\Base"));
    assert_eq!(child.interfaces, vec!["Countable", "One\\Contracts\\Shape"]);
    assert_eq!(child.short_name(), "Child");
    assert_eq!(child.namespace_name(), "One");

    assert!(parsed.find_class("Two\\Base").is_some());
    assert!(parsed.find_class("Base").is_none());
}

#[test]
fn test_trait_use_and_enum_cases() {
    let php = concat!(
        "<?php\n",
        "namespace App;\n",
        "trait Stamps { public $at; }\n",
        "enum Suit: string {\n",
        "    use Stamps;\n",
        "    case Hearts = 'H';\n",
        "    case Spades = 'S';\n",
        "    const Wild = self::Spades;\n",
        "}\n",
    );
    let parsed = parse_php(php).unwrap();
    let suit = parsed.find_class("App\\Suit").unwrap();
    assert_eq!(suit.kind, ClassLikeKind::Enum);

    let traits: Vec<&Vec<String>> = suit
        .members
        .iter()
        .filter_map(|m| match m {
            MemberDeclaration::TraitUse(t) => Some(t),
            _ => None,
        })
        .collect();
    assert_eq!(traits, vec![&vec!["App\\Stamps".to_string()]]);

    let cases: Vec<&str> = suit
        .members
        .iter()
        .filter_map(|m| match m {
            MemberDeclaration::EnumCase(c) => Some(c.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(cases, vec!["Hearts", "Spades"]);
    assert!(suit.find_constant("Wild").is_some());
}

#[test]
fn test_promoted_parameters_become_properties() {
    let php = concat!(
        "<?php\n",
        "class Point {\n",
        "    public function __construct(\n",
        "        /** @var float */\n",
        "        protected float $x = 0.0,\n",
        "        float $unpromoted = 1.0,\n",
        "    ) {}\n",
        "}\n",
    );
    let parsed = parse_php(php).unwrap();
    let point = &parsed.classes[0];

    let x = point.find_property("x").unwrap();
    assert!(x.is_promoted);
    assert_eq!(x.visibility, Visibility::Protected);
    assert_eq!(x.type_hint.as_deref(), Some("float"));
    assert_eq!(x.doc_comment.as_deref(), Some("/** @var float */"));
    assert!(x.default_value.is_none());
    assert_eq!(x.start_line, 5);

    assert!(point.find_property("unpromoted").is_none());
}

#[test]
fn test_unsupported_initializer_keeps_source_text() {
    let parsed = parse_php("<?php\nclass K { public $p = 1 + 2; }\n").unwrap();
    let p = parsed.classes[0].find_property("p").unwrap();
    assert_eq!(
        p.default_value,
        Some(ConstantExpression::Unsupported("1 + 2".to_string()))
    );
}

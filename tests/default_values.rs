mod common;

use common::reflector_for;
use phpantom_reflection::{ArrayKey, ErrorKind, PropertyEntity, Value};

/// Reflect `$p` of a class whose body is `members`.
fn default_of(members: &str) -> phpantom_reflection::Result<Option<Value>> {
    let source = format!("<?php\nclass C {{\n    const ONE = 1;\n    {}\n}}\n", members);
    let reflector = reflector_for(&source);
    let property = PropertyEntity::from_name_on_class(&reflector, "C", "p")?;
    property.get_default_value()
}

#[test]
fn test_scalar_literals() {
    assert_eq!(default_of("public $p = 123;").unwrap(), Some(Value::Int(123)));
    assert_eq!(default_of("public $p = -5;").unwrap(), Some(Value::Int(-5)));
    assert_eq!(default_of("public $p = 0x1F;").unwrap(), Some(Value::Int(31)));
    assert_eq!(default_of("public $p = 1_000;").unwrap(), Some(Value::Int(1000)));
    assert_eq!(default_of("public $p = 1.5;").unwrap(), Some(Value::Float(1.5)));
    assert_eq!(
        default_of("public $p = 'text';").unwrap(),
        Some(Value::String("text".to_string()))
    );
    assert_eq!(default_of("public $p = TRUE;").unwrap(), Some(Value::Bool(true)));
    assert_eq!(default_of("public $p = null;").unwrap(), Some(Value::Null));
}

#[test]
fn test_no_initializer_is_none() {
    assert_eq!(default_of("public $p;").unwrap(), None);
    assert_eq!(default_of("public ?int $p;").unwrap(), None);
}

#[test]
fn test_arrays() {
    assert_eq!(
        default_of("public $p = [1, 'k' => 2, 3];").unwrap(),
        Some(Value::Array(vec![
            (ArrayKey::Int(0), Value::Int(1)),
            (ArrayKey::String("k".to_string()), Value::Int(2)),
            (ArrayKey::Int(1), Value::Int(3)),
        ]))
    );
    assert_eq!(
        default_of("public $p = array();").unwrap(),
        Some(Value::Array(vec![]))
    );
}

#[test]
fn test_constants() {
    assert_eq!(default_of("public $p = self::ONE;").unwrap(), Some(Value::Int(1)));
    assert_eq!(default_of("public $p = C::ONE;").unwrap(), Some(Value::Int(1)));
    assert_eq!(
        default_of("public $p = PHP_EOL;").unwrap(),
        Some(Value::String("\n".to_string()))
    );
    assert_eq!(
        default_of("public $p = SOME_USER_CONSTANT;").unwrap(),
        Some(Value::Constant("SOME_USER_CONSTANT".to_string()))
    );
    assert_eq!(
        default_of("public $p = self::class;").unwrap(),
        Some(Value::String("C".to_string()))
    );
}

#[test]
fn test_unfoldable_expressions_are_errors() {
    for members in [
        "public $p = 1 + 2;",
        "public $p = 'a' . 'b';",
        "public $p = self::MISSING;",
        "public $p = [1, 2 * 3];",
    ] {
        let err = default_of(members).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnfoldableExpression, "{}", members);
    }
}

#[test]
fn test_unfoldable_result_is_stable() {
    let reflector = reflector_for("<?php\nclass C { public $p = 1 + 2; }\n");
    let property = PropertyEntity::from_name_on_class(&reflector, "C", "p").unwrap();
    let first = property.get_default_value().unwrap_err().to_string();
    let second = property.get_default_value().unwrap_err().to_string();
    assert_eq!(first, second);
    assert!(first.contains("1 + 2"));
}

//! Default value expressions and their constant folding.
//!
//! The parser lowers initializer expressions into [`ConstantExpression`],
//! an owned tree that only distinguishes the forms the folder understands.
//! Anything else is kept as [`ConstantExpression::Unsupported`] together
//! with its source text so that folding can report exactly what it refused
//! to evaluate.
//!
//! Folding never executes code: literals, array literals, well-known
//! built-in constants and constants of the declaring class are the only
//! things that produce a [`Value`].

use std::fmt;

use crate::error::{ReflectionError, Result};
use crate::types::ClassLikeDeclaration;

/// Maximum nesting of `self::A` → `self::B` → … lookups before folding
/// gives up (guards `const A = self::A;`).
const MAX_CONSTANT_DEPTH: u32 = 32;

/// An initializer expression, as far as constant folding is concerned.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantExpression {
    Null,
    Bool(bool),
    /// An integer literal as written (`42`, `0x1F`, `1_000`, `0b11`).
    Integer(String),
    /// A float literal as written (`1.5`, `1e3`).
    Float(String),
    /// A string literal, already unquoted and unescaped.
    String(String),
    /// `[...]` or `array(...)`.
    Array(Vec<ArrayItem>),
    /// Unary `-expr`.
    Negate(Box<ConstantExpression>),
    /// Unary `+expr`.
    Plus(Box<ConstantExpression>),
    /// A plain named constant such as `PHP_EOL` or `FOO`.
    ConstantFetch(String),
    /// `Class::NAME`.  `class` is fully qualified, or one of `self`,
    /// `static`, `parent`.
    ClassConstantFetch { class: String, constant: String },
    /// Any other expression, with its source text.
    Unsupported(String),
}

/// One element of an array literal.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayItem {
    pub key: Option<ConstantExpression>,
    pub value: ConstantExpression,
}

/// A folded PHP value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Ordered key/value pairs with PHP key semantics.
    Array(Vec<(ArrayKey, Value)>),
    /// A named constant whose value is not known statically.
    Constant(String),
}

/// A PHP array key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArrayKey {
    Int(i64),
    String(String),
}

// ─── Folding ────────────────────────────────────────────────────────────────

/// Folds [`ConstantExpression`]s in the context of their declaring class.
pub struct ConstantFolder<'a> {
    class: Option<&'a ClassLikeDeclaration>,
}

impl<'a> ConstantFolder<'a> {
    /// A folder that resolves `self::`/`static::` against `class`.
    pub fn new(class: Option<&'a ClassLikeDeclaration>) -> Self {
        Self { class }
    }

    pub fn fold(&self, expr: &ConstantExpression) -> Result<Value> {
        self.fold_at_depth(expr, 0)
    }

    fn fold_at_depth(&self, expr: &ConstantExpression, depth: u32) -> Result<Value> {
        match expr {
            ConstantExpression::Null => Ok(Value::Null),
            ConstantExpression::Bool(b) => Ok(Value::Bool(*b)),
            ConstantExpression::Integer(raw) => {
                parse_integer_literal(raw).ok_or_else(|| unfoldable(expr))
            }
            ConstantExpression::Float(raw) => raw
                .replace('_', "")
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| unfoldable(expr)),
            ConstantExpression::String(s) => Ok(Value::String(s.clone())),
            ConstantExpression::Array(items) => self.fold_array(items, depth),
            ConstantExpression::Negate(inner) => match self.fold_at_depth(inner, depth)? {
                Value::Int(i) => Ok(i
                    .checked_neg()
                    .map(Value::Int)
                    .unwrap_or(Value::Float(-(i as f64)))),
                Value::Float(f) => Ok(Value::Float(-f)),
                _ => Err(unfoldable(expr)),
            },
            ConstantExpression::Plus(inner) => match self.fold_at_depth(inner, depth)? {
                v @ (Value::Int(_) | Value::Float(_)) => Ok(v),
                _ => Err(unfoldable(expr)),
            },
            ConstantExpression::ConstantFetch(name) => Ok(fold_named_constant(name)),
            ConstantExpression::ClassConstantFetch { class, constant } => {
                self.fold_class_constant(expr, class, constant, depth)
            }
            ConstantExpression::Unsupported(_) => Err(unfoldable(expr)),
        }
    }

    fn fold_array(&self, items: &[ArrayItem], depth: u32) -> Result<Value> {
        let mut entries: Vec<(ArrayKey, Value)> = Vec::with_capacity(items.len());
        let mut next_index: i64 = 0;

        for item in items {
            let value = self.fold_at_depth(&item.value, depth)?;
            let key = match &item.key {
                Some(key_expr) => match self.fold_at_depth(key_expr, depth)? {
                    Value::Int(i) => ArrayKey::Int(i),
                    Value::String(s) => normalise_string_key(s),
                    Value::Bool(b) => ArrayKey::Int(b as i64),
                    Value::Float(f) => ArrayKey::Int(f.trunc() as i64),
                    Value::Null => ArrayKey::String(String::new()),
                    Value::Array(_) | Value::Constant(_) => return Err(unfoldable(key_expr)),
                },
                None => ArrayKey::Int(next_index),
            };

            if let ArrayKey::Int(i) = key
                && i >= next_index
            {
                next_index = i.saturating_add(1);
            }

            // A repeated key overwrites the value but keeps its position.
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(existing) => existing.1 = value,
                None => entries.push((key, value)),
            }
        }

        Ok(Value::Array(entries))
    }

    fn fold_class_constant(
        &self,
        expr: &ConstantExpression,
        class: &str,
        constant: &str,
        depth: u32,
    ) -> Result<Value> {
        let is_own_class = matches!(class.to_ascii_lowercase().as_str(), "self" | "static")
            || self.class.is_some_and(|c| c.is_named(class));

        if constant.eq_ignore_ascii_case("class") {
            return match (is_own_class, self.class) {
                (true, Some(c)) => Ok(Value::String(c.name.clone())),
                (false, _) if !class.eq_ignore_ascii_case("parent") => {
                    Ok(Value::String(crate::util::strip_fqn_prefix(class).to_string()))
                }
                _ => Err(unfoldable(expr)),
            };
        }

        if !is_own_class || depth >= MAX_CONSTANT_DEPTH {
            return Err(unfoldable(expr));
        }

        let declaration = self
            .class
            .and_then(|c| c.find_constant(constant))
            .ok_or_else(|| unfoldable(expr))?;
        self.fold_at_depth(&declaration.value, depth + 1)
    }
}

fn unfoldable(expr: &ConstantExpression) -> ReflectionError {
    ReflectionError::UnfoldableExpression {
        expression: expr.to_string(),
    }
}

/// Parse a PHP integer literal.  Values that overflow `i64` become floats,
/// as they do in PHP.
fn parse_integer_literal(raw: &str) -> Option<Value> {
    let digits = raw.replace('_', "");
    let lower = digits.to_ascii_lowercase();

    let (body, radix) = if let Some(hex) = lower.strip_prefix("0x") {
        (hex.to_string(), 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (bin.to_string(), 2)
    } else if let Some(oct) = lower.strip_prefix("0o") {
        (oct.to_string(), 8)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (lower[1..].to_string(), 8)
    } else {
        (lower, 10)
    };

    match i64::from_str_radix(&body, radix) {
        Ok(i) => Some(Value::Int(i)),
        Err(_) if !body.is_empty() => body
            .chars()
            .try_fold(0f64, |acc, c| {
                c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
            })
            .map(Value::Float),
        Err(_) => None,
    }
}

/// String keys that look like canonical decimal integers are stored as
/// integer keys (`"1"` → `1`, but `"01"` stays a string).
fn normalise_string_key(s: String) -> ArrayKey {
    let canonical = s
        .parse::<i64>()
        .ok()
        .filter(|i| i.to_string() == s);
    match canonical {
        Some(i) => ArrayKey::Int(i),
        None => ArrayKey::String(s),
    }
}

/// Fold a plain named constant.
///
/// `true`, `false` and `null` are case-insensitive.  A handful of engine
/// constants with platform-independent values are folded to those values;
/// any other name is kept symbolic as [`Value::Constant`].
fn fold_named_constant(name: &str) -> Value {
    let name = crate::util::strip_fqn_prefix(name);
    match name.to_ascii_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }

    match name {
        "PHP_EOL" => Value::String("\n".to_string()),
        "PHP_INT_MAX" => Value::Int(i64::MAX),
        "PHP_INT_MIN" => Value::Int(i64::MIN),
        "PHP_INT_SIZE" => Value::Int(8),
        "PHP_FLOAT_EPSILON" => Value::Float(f64::EPSILON),
        "PHP_FLOAT_MAX" => Value::Float(f64::MAX),
        "PHP_FLOAT_MIN" => Value::Float(f64::MIN_POSITIVE),
        "PHP_FLOAT_DIG" => Value::Int(15),
        "NAN" => Value::Float(f64::NAN),
        "INF" => Value::Float(f64::INFINITY),
        "M_PI" => Value::Float(std::f64::consts::PI),
        "M_E" => Value::Float(std::f64::consts::E),
        "E_ERROR" => Value::Int(1),
        "E_WARNING" => Value::Int(2),
        "E_NOTICE" => Value::Int(8),
        "E_DEPRECATED" => Value::Int(8192),
        "E_STRICT" => Value::Int(2048),
        "E_ALL" => Value::Int(32767),
        _ => Value::Constant(name.to_string()),
    }
}

// ─── Display ────────────────────────────────────────────────────────────────

impl fmt::Display for ConstantExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantExpression::Null => write!(f, "null"),
            ConstantExpression::Bool(b) => write!(f, "{}", b),
            ConstantExpression::Integer(raw) | ConstantExpression::Float(raw) => {
                write!(f, "{}", raw)
            }
            ConstantExpression::String(s) => write_quoted(f, s),
            ConstantExpression::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if let Some(key) = &item.key {
                        write!(f, "{} => ", key)?;
                    }
                    write!(f, "{}", item.value)?;
                }
                write!(f, "]")
            }
            ConstantExpression::Negate(inner) => write!(f, "-{}", inner),
            ConstantExpression::Plus(inner) => write!(f, "+{}", inner),
            ConstantExpression::ConstantFetch(name) => write!(f, "{}", name),
            ConstantExpression::ClassConstantFetch { class, constant } => {
                write!(f, "{}::{}", class, constant)
            }
            ConstantExpression::Unsupported(source) => write!(f, "{}", source),
        }
    }
}

impl fmt::Display for Value {
    /// Renders the value roughly the way `var_export` would.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::String(s) => write_quoted(f, s),
            Value::Array(entries) => {
                write!(f, "[")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match key {
                        ArrayKey::Int(k) => write!(f, "{} => {}", k, value)?,
                        ArrayKey::String(k) => {
                            write_quoted(f, k)?;
                            write!(f, " => {}", value)?;
                        }
                    }
                }
                write!(f, "]")
            }
            Value::Constant(name) => write!(f, "{}", name),
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(expr: ConstantExpression) -> Result<Value> {
        ConstantFolder::new(None).fold(&expr)
    }

    fn int(raw: &str) -> ConstantExpression {
        ConstantExpression::Integer(raw.to_string())
    }

    #[test]
    fn test_integer_literal_forms() {
        assert_eq!(fold(int("123")).unwrap(), Value::Int(123));
        assert_eq!(fold(int("0x1F")).unwrap(), Value::Int(31));
        assert_eq!(fold(int("0b101")).unwrap(), Value::Int(5));
        assert_eq!(fold(int("017")).unwrap(), Value::Int(15));
        assert_eq!(fold(int("0o17")).unwrap(), Value::Int(15));
        assert_eq!(fold(int("1_000_000")).unwrap(), Value::Int(1_000_000));
        assert_eq!(fold(int("0")).unwrap(), Value::Int(0));
    }

    #[test]
    fn test_integer_overflow_becomes_float() {
        assert_eq!(
            fold(int("9223372036854775808")).unwrap(),
            Value::Float(9223372036854775808.0)
        );
    }

    #[test]
    fn test_integer_beyond_u128_becomes_float() {
        let literal = format!("0x1{}", "0".repeat(32));
        assert_eq!(fold(int(&literal)).unwrap(), Value::Float(2f64.powi(128)));

        let binary = format!("0b1{}", "0".repeat(70));
        assert_eq!(fold(int(&binary)).unwrap(), Value::Float(2f64.powi(70)));
    }

    #[test]
    fn test_negated_literals() {
        let expr = ConstantExpression::Negate(Box::new(int("5")));
        assert_eq!(fold(expr).unwrap(), Value::Int(-5));

        let expr = ConstantExpression::Negate(Box::new(ConstantExpression::Float("1.5".into())));
        assert_eq!(fold(expr).unwrap(), Value::Float(-1.5));
    }

    #[test]
    fn test_negating_a_string_is_unfoldable() {
        let expr = ConstantExpression::Negate(Box::new(ConstantExpression::String("a".into())));
        let err = fold(expr).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::UnfoldableExpression);
        assert!(err.to_string().contains("-'a'"));
    }

    #[test]
    fn test_array_auto_indexing_and_key_normalisation() {
        let expr = ConstantExpression::Array(vec![
            ArrayItem {
                key: None,
                value: int("1"),
            },
            ArrayItem {
                key: Some(ConstantExpression::String("5".into())),
                value: int("2"),
            },
            ArrayItem {
                key: None,
                value: int("3"),
            },
            ArrayItem {
                key: Some(ConstantExpression::String("name".into())),
                value: ConstantExpression::Null,
            },
            ArrayItem {
                key: Some(int("0")),
                value: int("4"),
            },
        ]);

        assert_eq!(
            fold(expr).unwrap(),
            Value::Array(vec![
                (ArrayKey::Int(0), Value::Int(4)),
                (ArrayKey::Int(5), Value::Int(2)),
                (ArrayKey::Int(6), Value::Int(3)),
                (ArrayKey::String("name".into()), Value::Null),
            ])
        );
    }

    #[test]
    fn test_named_constants() {
        assert_eq!(
            fold(ConstantExpression::ConstantFetch("NULL".into())).unwrap(),
            Value::Null
        );
        assert_eq!(
            fold(ConstantExpression::ConstantFetch("\\PHP_EOL".into())).unwrap(),
            Value::String("\n".into())
        );
        assert_eq!(
            fold(ConstantExpression::ConstantFetch("MY_APP_FLAG".into())).unwrap(),
            Value::Constant("MY_APP_FLAG".into())
        );
    }

    #[test]
    fn test_unsupported_carries_source_text() {
        let err = fold(ConstantExpression::Unsupported("foo()".into())).unwrap_err();
        match err {
            ReflectionError::UnfoldableExpression { expression } => {
                assert_eq!(expression, "foo()")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_value_display() {
        let value = Value::Array(vec![
            (ArrayKey::Int(0), Value::String("it's".into())),
            (ArrayKey::String("k".into()), Value::Bool(true)),
        ]);
        assert_eq!(value.to_string(), "[0 => 'it\\'s', 'k' => true]");
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
    }
}

/// Initializer expression lowering.
///
/// Converts arena-allocated AST expressions into the owned
/// [`ConstantExpression`] tree used by constant folding.  Only literal
/// forms are kept structurally; everything else becomes
/// [`ConstantExpression::Unsupported`] carrying its source text.
use mago_syntax::ast::*;

use crate::value::{ArrayItem, ConstantExpression};

use super::{NameContext, SourceCtx};

pub(crate) fn lower_expression(
    expr: &Expression<'_>,
    ctx: &SourceCtx<'_>,
    names: &NameContext,
) -> ConstantExpression {
    match expr {
        Expression::Literal(literal) => lower_literal(literal),
        Expression::Parenthesized(p) => lower_expression(p.expression, ctx, names),
        Expression::UnaryPrefix(u) => match u.operator {
            UnaryPrefixOperator::Negation(_) => {
                ConstantExpression::Negate(Box::new(lower_expression(u.operand, ctx, names)))
            }
            UnaryPrefixOperator::Plus(_) => {
                ConstantExpression::Plus(Box::new(lower_expression(u.operand, ctx, names)))
            }
            _ => unsupported(expr, ctx),
        },
        Expression::Array(arr) => lower_array_elements(arr.elements.iter(), expr, ctx, names),
        Expression::LegacyArray(arr) => {
            lower_array_elements(arr.elements.iter(), expr, ctx, names)
        }
        Expression::ConstantAccess(access) => {
            ConstantExpression::ConstantFetch(access.name.value().to_string())
        }
        Expression::Access(Access::ClassConstant(cca)) => {
            let class = match cca.class {
                Expression::Identifier(ident) => names.resolve_class_name(ident.value()),
                Expression::Self_(_) => "self".to_string(),
                Expression::Static(_) => "static".to_string(),
                Expression::Parent(_) => "parent".to_string(),
                _ => return unsupported(expr, ctx),
            };
            let constant = match &cca.constant {
                ClassLikeConstantSelector::Identifier(ident) => ident.value.to_string(),
                _ => return unsupported(expr, ctx),
            };
            ConstantExpression::ClassConstantFetch { class, constant }
        }
        _ => unsupported(expr, ctx),
    }
}

fn lower_literal(literal: &Literal<'_>) -> ConstantExpression {
    #[allow(unreachable_patterns)]
    match literal {
        Literal::String(lit_str) => {
            // `value` strips the quotes and escapes; fall back to `raw`.
            let value = lit_str.value.map(|v| v.to_string()).unwrap_or_else(|| {
                let raw = lit_str.raw;
                raw.strip_prefix('\'')
                    .and_then(|s| s.strip_suffix('\''))
                    .or_else(|| raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
                    .unwrap_or(raw)
                    .to_string()
            });
            ConstantExpression::String(value)
        }
        Literal::Integer(lit_int) => ConstantExpression::Integer(lit_int.raw.to_string()),
        Literal::Float(lit_float) => ConstantExpression::Float(lit_float.raw.to_string()),
        Literal::True(_) => ConstantExpression::Bool(true),
        Literal::False(_) => ConstantExpression::Bool(false),
        Literal::Null(_) => ConstantExpression::Null,
        _ => ConstantExpression::Unsupported(String::from("<literal>")),
    }
}

fn lower_array_elements<'a>(
    elements: impl Iterator<Item = &'a ArrayElement<'a>>,
    expr: &Expression<'_>,
    ctx: &SourceCtx<'_>,
    names: &NameContext,
) -> ConstantExpression {
    let mut items = Vec::new();
    for element in elements {
        match element {
            ArrayElement::KeyValue(kv) => items.push(ArrayItem {
                key: Some(lower_expression(kv.key, ctx, names)),
                value: lower_expression(kv.value, ctx, names),
            }),
            ArrayElement::Value(v) => items.push(ArrayItem {
                key: None,
                value: lower_expression(v.value, ctx, names),
            }),
            // Spreads and list() holes have no constant meaning here.
            ArrayElement::Variadic(_) | ArrayElement::Missing(_) => {
                return unsupported(expr, ctx);
            }
        }
    }
    ConstantExpression::Array(items)
}

fn unsupported(expr: &Expression<'_>, ctx: &SourceCtx<'_>) -> ConstantExpression {
    ConstantExpression::Unsupported(ctx.source_of(expr))
}

/// Class, interface, trait, and enum extraction.
///
/// This module handles lowering every class-like declaration of the PHP AST
/// into a [`ClassLikeDeclaration`], together with its members in
/// declaration order.  Names are qualified against the [`NameContext`]
/// that is current when the declaration is reached, so `extends` and trait
/// names come out fully qualified.
use std::sync::Arc;

use mago_syntax::ast::*;

use crate::types::*;

use super::expressions::lower_expression;
use super::{NameContext, SourceCtx, extract_hint_string, extract_visibility};

/// Recursively walk statements and extract class-like declarations.
///
/// This handles class-likes at the top level as well as inside namespace
/// declarations, and keeps the naming context up to date with `use`
/// statements along the way.
pub(super) fn extract_classes_from_statements<'a>(
    statements: impl Iterator<Item = &'a Statement<'a>>,
    ctx: &SourceCtx<'a>,
    names: &mut NameContext,
    classes: &mut Vec<ClassLikeDeclaration>,
) {
    for statement in statements {
        match statement {
            Statement::Use(use_stmt) => {
                names.extract_use_items(&use_stmt.items);
            }
            Statement::Namespace(namespace) => {
                let mut inner =
                    NameContext::for_namespace(namespace.name.as_ref().map(|ident| ident.value()));
                extract_classes_from_statements(
                    namespace.statements().iter(),
                    ctx,
                    &mut inner,
                    classes,
                );
            }
            Statement::Class(class) => {
                let name = names.qualify_declaration(class.name.value);

                let parent_class = class
                    .extends
                    .as_ref()
                    .and_then(|ext| ext.types.first())
                    .map(|ident| names.resolve_class_name(ident.value()));

                let interfaces: Vec<String> = class
                    .implements
                    .as_ref()
                    .map(|imp| {
                        imp.types
                            .iter()
                            .map(|ident| names.resolve_class_name(ident.value()))
                            .collect()
                    })
                    .unwrap_or_default();

                let members = extract_class_like_members(class.members.iter(), &name, ctx, names);
                let (start_line, end_line) = ctx.line_span(class);

                classes.push(ClassLikeDeclaration {
                    kind: ClassLikeKind::Class,
                    name,
                    parent_class,
                    interfaces,
                    members,
                    is_abstract: class.modifiers.contains_abstract(),
                    is_final: class.modifiers.contains_final(),
                    doc_comment: ctx.docblock_for(class),
                    start_line,
                    end_line,
                });
            }
            Statement::Interface(iface) => {
                let name = names.qualify_declaration(iface.name.value);

                // Interfaces use `extends` for parent interfaces; the first
                // one doubles as the parent for single-inheritance lookups.
                let extended: Vec<String> = iface
                    .extends
                    .as_ref()
                    .map(|ext| {
                        ext.types
                            .iter()
                            .map(|ident| names.resolve_class_name(ident.value()))
                            .collect()
                    })
                    .unwrap_or_default();

                let members = extract_class_like_members(iface.members.iter(), &name, ctx, names);
                let (start_line, end_line) = ctx.line_span(iface);

                classes.push(ClassLikeDeclaration {
                    kind: ClassLikeKind::Interface,
                    name,
                    parent_class: extended.first().cloned(),
                    interfaces: extended,
                    members,
                    is_abstract: true,
                    is_final: false,
                    doc_comment: ctx.docblock_for(iface),
                    start_line,
                    end_line,
                });
            }
            Statement::Trait(trait_def) => {
                let name = names.qualify_declaration(trait_def.name.value);
                let members =
                    extract_class_like_members(trait_def.members.iter(), &name, ctx, names);
                let (start_line, end_line) = ctx.line_span(trait_def);

                classes.push(ClassLikeDeclaration {
                    kind: ClassLikeKind::Trait,
                    name,
                    parent_class: None,
                    interfaces: vec![],
                    members,
                    is_abstract: false,
                    is_final: false,
                    doc_comment: ctx.docblock_for(trait_def),
                    start_line,
                    end_line,
                });
            }
            Statement::Enum(enum_def) => {
                let name = names.qualify_declaration(enum_def.name.value);

                let interfaces: Vec<String> = enum_def
                    .implements
                    .as_ref()
                    .map(|imp| {
                        imp.types
                            .iter()
                            .map(|ident| names.resolve_class_name(ident.value()))
                            .collect()
                    })
                    .unwrap_or_default();

                let members =
                    extract_class_like_members(enum_def.members.iter(), &name, ctx, names);
                let (start_line, end_line) = ctx.line_span(enum_def);

                // Enums are implicitly final and cannot be extended.
                classes.push(ClassLikeDeclaration {
                    kind: ClassLikeKind::Enum,
                    name,
                    parent_class: None,
                    interfaces,
                    members,
                    is_abstract: false,
                    is_final: true,
                    doc_comment: ctx.docblock_for(enum_def),
                    start_line,
                    end_line,
                });
            }
            _ => {}
        }
    }
}

/// Extract every member of a class-like body, in declaration order.
///
/// Shared between classes, interfaces, traits and enums since all use the
/// same `ClassLikeMember` representation.  Promoted constructor parameters
/// are emitted as properties right after the constructor.
fn extract_class_like_members<'a>(
    members: impl Iterator<Item = &'a ClassLikeMember<'a>>,
    class_name: &str,
    ctx: &SourceCtx<'a>,
    names: &NameContext,
) -> Vec<MemberDeclaration> {
    let mut declarations = Vec::new();

    for member in members {
        match member {
            ClassLikeMember::Property(property) => {
                extract_property_declarations(
                    property,
                    member,
                    class_name,
                    ctx,
                    names,
                    &mut declarations,
                );
            }
            ClassLikeMember::Method(method) => {
                let name = method.name.value.to_string();
                let (start_line, end_line) = ctx.line_span(method);
                let is_constructor = name.eq_ignore_ascii_case("__construct");

                declarations.push(MemberDeclaration::Method(MethodDeclaration {
                    name,
                    visibility: extract_visibility(method.modifiers.iter()),
                    is_static: method.modifiers.iter().any(|m| m.is_static()),
                    is_abstract: method.modifiers.contains_abstract(),
                    start_line,
                    end_line,
                }));

                // A promoted property is a constructor parameter with a
                // visibility (or readonly) modifier.
                if is_constructor {
                    for param in method.parameter_list.parameters.iter() {
                        if !param.is_promoted_property() {
                            continue;
                        }
                        let raw_name = param.variable.name;
                        let (start_line, end_line) = ctx.line_span(param);

                        declarations.push(MemberDeclaration::Property(Arc::new(
                            PropertyDeclaration {
                                name: raw_name.strip_prefix('$').unwrap_or(raw_name).to_string(),
                                declaring_class: class_name.to_string(),
                                visibility: extract_visibility(param.modifiers.iter()),
                                is_static: false,
                                is_readonly: param.modifiers.iter().any(|m| m.is_readonly()),
                                is_promoted: true,
                                type_hint: param.hint.as_ref().map(|h| extract_hint_string(h)),
                                default_value: None,
                                doc_comment: ctx.docblock_for(param),
                                start_line,
                                end_line,
                            },
                        )));
                    }
                }
            }
            ClassLikeMember::Constant(constant) => {
                let visibility = extract_visibility(constant.modifiers.iter());
                let (start_line, end_line) = ctx.line_span(constant);
                for item in constant.items.iter() {
                    declarations.push(MemberDeclaration::Constant(ConstantDeclaration {
                        name: item.name.value.to_string(),
                        visibility,
                        value: lower_expression(&item.value, ctx, names),
                        start_line,
                        end_line,
                    }));
                }
            }
            ClassLikeMember::EnumCase(enum_case) => {
                declarations.push(MemberDeclaration::EnumCase(EnumCaseDeclaration {
                    name: enum_case.item.name().value.to_string(),
                }));
            }
            ClassLikeMember::TraitUse(trait_use) => {
                let traits = trait_use
                    .trait_names
                    .iter()
                    .map(|ident| names.resolve_class_name(ident.value()))
                    .collect();
                declarations.push(MemberDeclaration::TraitUse(traits));
            }
        }
    }

    declarations
}

/// Extract one [`PropertyDeclaration`] per variable of a property
/// statement.
///
/// `public $a = 1, $b;` shares modifiers, type hint, doc comment and line
/// span between `$a` and `$b`; only the default value differs.  The doc
/// comment is looked up for the whole member so that attributes in front of
/// the modifiers do not hide it.
fn extract_property_declarations<'a>(
    property: &'a Property<'a>,
    member: &'a ClassLikeMember<'a>,
    class_name: &str,
    ctx: &SourceCtx<'a>,
    names: &NameContext,
    declarations: &mut Vec<MemberDeclaration>,
) {
    let modifiers = property.modifiers();
    let visibility = extract_visibility(modifiers.iter());
    let is_static = modifiers.iter().any(|m| m.is_static());
    let is_readonly = modifiers.iter().any(|m| m.is_readonly());
    let type_hint = property.hint().map(|h| extract_hint_string(h));
    let doc_comment = ctx.docblock_for(member);
    let (start_line, end_line) = ctx.line_span(member);

    let items: Vec<&PropertyItem> = match property {
        Property::Plain(plain) => plain.items.iter().collect(),
        Property::Hooked(hooked) => vec![&hooked.item],
    };

    for item in items {
        let raw_name = item.variable().name;
        let default_value = match item {
            PropertyItem::Concrete(concrete) => Some(lower_expression(&concrete.value, ctx, names)),
            PropertyItem::Abstract(_) => None,
        };

        declarations.push(MemberDeclaration::Property(Arc::new(PropertyDeclaration {
            // Strip the leading `$`: PHP access syntax is `$this->name`.
            name: raw_name.strip_prefix('$').unwrap_or(raw_name).to_string(),
            declaring_class: class_name.to_string(),
            visibility,
            is_static,
            is_readonly,
            is_promoted: false,
            type_hint: type_hint.clone(),
            default_value,
            doc_comment: doc_comment.clone(),
            start_line,
            end_line,
        })));
    }
}

/// Namespace and `use` statement tracking.
///
/// This module keeps the naming context while statements are walked in
/// source order: the current namespace and the class imports seen so far.
/// It resolves names written in source (`Foo`, `Sub\Foo`, `\Foo`,
/// `namespace\Foo`) to fully-qualified names.
use std::collections::HashMap;

use mago_syntax::ast::*;

use crate::util::short_name;

/// The naming context at a point in a PHP file.
#[derive(Debug, Clone, Default)]
pub struct NameContext {
    /// The current namespace, `None` for the global namespace.
    pub namespace: Option<String>,
    /// Lowercased alias → fully-qualified name.
    imports: HashMap<String, String>,
}

impl NameContext {
    /// A fresh context for the body of `namespace <name>`.
    pub fn for_namespace(name: Option<&str>) -> Self {
        Self {
            namespace: name.filter(|n| !n.is_empty()).map(str::to_string),
            imports: HashMap::new(),
        }
    }

    /// Register an import: `use Foo\Bar;` or `use Foo\Bar as Baz;`.
    pub fn add_import(&mut self, fqn: &str, alias: Option<&str>) {
        let fqn = fqn.strip_prefix('\\').unwrap_or(fqn);
        let alias = alias.unwrap_or_else(|| short_name(fqn));
        self.imports.insert(alias.to_ascii_lowercase(), fqn.to_string());
    }

    /// Qualify a name declared in this context (a class being declared).
    pub fn qualify_declaration(&self, name: &str) -> String {
        match &self.namespace {
            Some(ns) => format!("{}\\{}", ns, name),
            None => name.to_string(),
        }
    }

    /// Resolve a class name as written in source to a fully-qualified name
    /// without a leading `\`.
    ///
    /// `self`, `static` and `parent` are returned unchanged; they can only
    /// be resolved with knowledge of the enclosing class.
    pub fn resolve_class_name(&self, name: &str) -> String {
        if let Some(fqn) = name.strip_prefix('\\') {
            return fqn.to_string();
        }

        let lower = name.to_ascii_lowercase();
        if matches!(lower.as_str(), "self" | "static" | "parent") {
            return name.to_string();
        }

        if let Some(relative) = lower
            .strip_prefix("namespace\\")
            .map(|_| &name["namespace\\".len()..])
        {
            return self.qualify_declaration(relative);
        }

        let (first, rest) = match name.split_once('\\') {
            Some((first, rest)) => (first, Some(rest)),
            None => (name, None),
        };

        if let Some(imported) = self.imports.get(&first.to_ascii_lowercase()) {
            return match rest {
                Some(rest) => format!("{}\\{}", imported, rest),
                None => imported.clone(),
            };
        }

        self.qualify_declaration(name)
    }

    /// Record the class imports of a `use` statement.
    pub(crate) fn extract_use_items(&mut self, items: &UseItems) {
        match items {
            UseItems::Sequence(seq) => {
                // `use Foo\Bar;` or `use Foo\Bar, Baz\Qux;`
                for item in seq.items.iter() {
                    self.register_use_item(item, None);
                }
            }
            UseItems::TypedSequence(seq) => {
                // `use function Foo\bar;` or `use const Foo\BAR;`
                // Only class imports matter here.
                if seq.r#type.is_function() || seq.r#type.is_const() {
                    return;
                }
                for item in seq.items.iter() {
                    self.register_use_item(item, None);
                }
            }
            UseItems::TypedList(list) => {
                if list.r#type.is_function() || list.r#type.is_const() {
                    return;
                }
                let prefix = list.namespace.value();
                for item in list.items.iter() {
                    self.register_use_item(item, Some(prefix));
                }
            }
            UseItems::MixedList(list) => {
                // `use Foo\{Bar, function baz, const QUX};`
                let prefix = list.namespace.value();
                for maybe_typed in list.items.iter() {
                    if let Some(ref t) = maybe_typed.r#type
                        && (t.is_function() || t.is_const())
                    {
                        continue;
                    }
                    self.register_use_item(&maybe_typed.item, Some(prefix));
                }
            }
        }
    }

    fn register_use_item(&mut self, item: &UseItem, group_prefix: Option<&str>) {
        let item_name = item.name.value();
        let fqn = match group_prefix {
            Some(prefix) => format!("{}\\{}", prefix.trim_end_matches('\\'), item_name),
            None => item_name.to_string(),
        };
        let alias = item.alias.as_ref().map(|a| a.identifier.value);
        self.add_import(&fqn, alias);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_namespace_names_are_unchanged() {
        let ctx = NameContext::default();
        assert_eq!(ctx.resolve_class_name("Foo"), "Foo");
        assert_eq!(ctx.resolve_class_name("\\Foo\\Bar"), "Foo\\Bar");
    }

    #[test]
    fn test_namespace_is_prepended() {
        let ctx = NameContext::for_namespace(Some("App\\Models"));
        assert_eq!(ctx.resolve_class_name("User"), "App\\Models\\User");
        assert_eq!(ctx.resolve_class_name("Sub\\User"), "App\\Models\\Sub\\User");
        assert_eq!(
            ctx.resolve_class_name("namespace\\User"),
            "App\\Models\\User"
        );
    }

    #[test]
    fn test_imports_win_over_namespace() {
        let mut ctx = NameContext::for_namespace(Some("App"));
        ctx.add_import("Vendor\\Lib\\Base", None);
        ctx.add_import("Vendor\\Other", Some("Alias"));
        assert_eq!(ctx.resolve_class_name("Base"), "Vendor\\Lib\\Base");
        assert_eq!(ctx.resolve_class_name("base"), "Vendor\\Lib\\Base");
        assert_eq!(ctx.resolve_class_name("Alias\\Thing"), "Vendor\\Other\\Thing");
    }

    #[test]
    fn test_relative_keywords_are_kept() {
        let ctx = NameContext::for_namespace(Some("App"));
        assert_eq!(ctx.resolve_class_name("self"), "self");
        assert_eq!(ctx.resolve_class_name("parent"), "parent");
    }
}

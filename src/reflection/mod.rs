//! Reflection entities.
//!
//! [`ClassEntity`] and [`PropertyEntity`] are handles over cached
//! declarations.  Both borrow the [`Reflector`](crate::Reflector) that
//! produced them so they can reach ancestors and declaring classes on
//! demand.

mod class;
mod property;

pub use class::ClassEntity;
pub use property::{InstanceDescriptor, PropertyEntity, ReflectedInstance};

/// Modifier bit for public members.
pub const IS_PUBLIC: u32 = 1;
/// Modifier bit for protected members.
pub const IS_PROTECTED: u32 = 2;
/// Modifier bit for private members.
pub const IS_PRIVATE: u32 = 4;
/// Modifier bit for static members.
pub const IS_STATIC: u32 = 16;

/// The capabilities every reflection entity exposes.
pub trait NamedReflectable {
    fn get_name(&self) -> String;

    /// The doc comment attached to the declaration, or `""`.
    fn get_doc_comment(&self) -> String;

    fn get_start_line(&self) -> u32;

    fn get_end_line(&self) -> u32;
}

/// Keyword names for a modifier bit set, in declaration order.
///
/// `modifier_names(IS_PUBLIC | IS_STATIC)` → `["public", "static"]`.
pub fn modifier_names(modifiers: u32) -> Vec<&'static str> {
    let mut names = Vec::new();
    if modifiers & IS_PUBLIC != 0 {
        names.push("public");
    }
    if modifiers & IS_PROTECTED != 0 {
        names.push("protected");
    }
    if modifiers & IS_PRIVATE != 0 {
        names.push("private");
    }
    if modifiers & IS_STATIC != 0 {
        names.push("static");
    }
    names
}

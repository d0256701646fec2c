//! Static reflection for PHP source.
//!
//! `phpantom_reflection` inspects the declared structure of PHP classes
//! without loading or running them.  Source is found through a
//! [`SourceLocator`](locator::SourceLocator), parsed with `mago-syntax`,
//! lowered into owned declarations and exposed through reflection handles
//! that follow PHP's native reflection semantics (visibility, staticness,
//! default values, doc-block types, source lines).
//!
//! ```no_run
//! use phpantom_reflection::{NamedReflectable, Reflector, StringSourceLocator};
//!
//! let reflector = Reflector::new(StringSourceLocator::new(
//!     "<?php class Foo { /** @var int|null */ public static $bar = 42; }",
//! ));
//! let class = reflector.reflect("Foo")?;
//! let property = class.get_property("bar")?;
//! assert_eq!(property.to_string(), "Property [ public static $bar ]");
//! assert_eq!(property.get_doc_block_type_strings(), vec!["int", "null"]);
//! # Ok::<(), phpantom_reflection::ReflectionError>(())
//! ```

pub mod composer;
pub mod config;
pub mod docblock;
pub mod error;
pub mod locator;
pub mod parser;
pub mod reflection;
pub mod reflector;
pub mod types;
pub mod util;
pub mod value;

pub use config::Config;
pub use docblock::DocBlockType;
pub use error::{ErrorKind, ReflectionError, Result};
pub use locator::{
    AggregateSourceLocator, AutoloadContext, AutoloadSourceLocator, DirectoriesSourceLocator,
    Identifier, LocatedSource, SingleFileSourceLocator, SourceLocator, SourceOrigin,
    StringSourceLocator,
};
pub use reflection::{
    ClassEntity, IS_PRIVATE, IS_PROTECTED, IS_PUBLIC, IS_STATIC, InstanceDescriptor,
    NamedReflectable, PropertyEntity, ReflectedInstance, modifier_names,
};
pub use reflector::Reflector;
pub use types::{ClassLikeKind, Visibility};
pub use value::{ArrayKey, Value};

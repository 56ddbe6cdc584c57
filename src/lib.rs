//! genus: generic-type resolution and assignability.
//!
//! Models parameterized types (raw classes, type arguments, arrays,
//! wildcards and type variables), resolves the type variables of a member
//! against a concrete context type, and decides whether one type is
//! assignable to another under generic variance rules.
//!
//! The work is split across the workspace crates and re-exported here:
//!
//! - `genus-core`: [`TypeNode`], [`TypeDescriptor`], names, hashes, errors
//! - `genus-registry`: [`TypeRegistry`], the nominal class table
//! - `genus-parser`: the textual notation ([`parse`], [`format`])
//! - `genus-resolver`: [`TypeResolver`], [`AssignabilityChecker`],
//!   [`SubstitutionMap`] and [`SubstitutionCache`]
//!
//! [`TypeEngine`] bundles a registry, a cache and an [`EngineConfig`].
//!
//! # Example
//!
//! ```
//! use genus::{FormatMode, TypeEngine};
//!
//! let engine = TypeEngine::with_java_prelude();
//! let list = engine.parse("java.util.ArrayList<java.lang.String>").unwrap();
//!
//! let component = engine.component_type(&list).unwrap();
//! assert_eq!(engine.format(&component, FormatMode::Simple), "String");
//!
//! let target = "java.util.Collection<? extends CharSequence>";
//! assert!(engine
//!     .is_assignable_from_text(target, "java.util.ArrayList<String>")
//!     .unwrap());
//! assert!(!engine
//!     .is_assignable_from_text("java.util.List<Number>", "java.util.List<Integer>")
//!     .unwrap());
//! ```

mod config;
mod engine;

pub use config::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_PARSE_DEPTH, EngineConfig};
pub use engine::TypeEngine;

pub use genus_core::{
    ClassName, GenusError, ParseErrorKind, RegistrationError, Span, TypeDescriptor, TypeHash,
    TypeKind, TypeNode, TypeParseError, TypeResolutionError, TypeVariable, Wildcard,
};
pub use genus_parser::{
    FormatMode, Formatted, MAX_ARRAY_DIMENSIONS, TypeParser, format, parse, parse_with_depth,
};
pub use genus_registry::{
    Capability, ClassEntry, ClassFlags, InheritanceEdge, TypeParamEntry, TypeRegistry,
    java_prelude,
};
pub use genus_resolver::{
    AssignabilityChecker, ResolverConfig, SubstitutionCache, SubstitutionMap, TypeResolver,
};

/// Commonly used items.
pub mod prelude {
    pub use crate::{
        ClassEntry, EngineConfig, FormatMode, GenusError, TypeDescriptor, TypeEngine, TypeNode,
        TypeRegistry,
    };
}

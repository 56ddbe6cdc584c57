//! Host metadata registry for the genus type engine.
//!
//! The registry is the engine's only view of the host's class universe:
//! declared type parameters and their bounds, direct supertypes as
//! [`TypeDescriptor`](genus_core::TypeDescriptor)s, and capability tags.
//!
//! - [`ClassEntry`] / [`TypeParamEntry`]: one registered class
//! - [`TypeRegistry`]: storage, name lookup and the nominal subtype graph
//! - [`java_prelude`]: a ready-made `java.lang` / `java.util` table

mod entries;
mod prelude;
mod registry;

pub use entries::{Capability, ClassEntry, ClassFlags, TypeParamEntry};
pub use prelude::java_prelude;
pub use registry::{InheritanceEdge, TypeRegistry};

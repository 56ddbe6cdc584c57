//! Type resolution and assignability for the genus type engine.
//!
//! - [`TypeResolver`]: descriptors to [`TypeNode`](genus_core::TypeNode)s,
//!   with type variables resolved through a context's inheritance chain
//! - [`SubstitutionMap`] / [`SubstitutionCache`]: per-context variable
//!   bindings, computed once and shared
//! - [`AssignabilityChecker`]: variance-aware compatibility between nodes
//! - `component_type` / `key_type`: capability-driven element queries

mod assignability;
mod cache;
mod query;
mod resolver;
mod substitution;

pub use assignability::AssignabilityChecker;
pub use cache::SubstitutionCache;
pub use resolver::{DEFAULT_MAX_DEPTH, ResolverConfig, TypeResolver};
pub use substitution::SubstitutionMap;

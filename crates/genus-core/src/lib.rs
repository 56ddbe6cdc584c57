//! Core types for the genus type engine.
//!
//! This crate holds the pieces every other crate depends on:
//!
//! - [`TypeHash`] and [`ClassName`]: deterministic nominal identity
//! - [`TypeNode`]: the immutable type model (raw, parameterized, array,
//!   wildcard, variable) with cached assignment/retrieval classes
//! - [`TypeDescriptor`]: the structural descriptors a host registry supplies
//! - [`Span`] and the error taxonomy ([`TypeParseError`],
//!   [`TypeResolutionError`], [`RegistrationError`], [`GenusError`])

mod class_name;
mod descriptor;
mod error;
mod span;
mod type_hash;
mod type_node;

pub use class_name::{ClassName, well_known};
pub use descriptor::TypeDescriptor;
pub use error::{
    GenusError, ParseErrorKind, RegistrationError, TypeParseError, TypeResolutionError,
};
pub use span::Span;
pub use type_hash::{TypeHash, hash_constants};
pub use type_node::{TypeKind, TypeNode, TypeVariable, Wildcard};

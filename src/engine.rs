//! The type engine facade.
//!
//! A `TypeEngine` owns a sealed class registry, the substitution map cache
//! and the configuration, and exposes every operation of the crate through
//! one value.
//!
//! # Example
//!
//! ```
//! use genus::TypeEngine;
//!
//! let engine = TypeEngine::with_java_prelude();
//! let target = engine
//!     .parse("java.util.Map<? extends Number, ? extends CharSequence>")
//!     .unwrap();
//! let candidate = engine
//!     .parse("java.util.HashMap<Integer, String>")
//!     .unwrap();
//! assert!(engine.is_assignable_from(&target, &candidate));
//! ```

use std::sync::Arc;

use tracing::{debug, warn};

use genus_core::{GenusError, TypeDescriptor, TypeNode, TypeResolutionError};
use genus_parser::FormatMode;
use genus_registry::TypeRegistry;
use genus_resolver::{AssignabilityChecker, SubstitutionCache, SubstitutionMap, TypeResolver};

use crate::config::EngineConfig;

/// Registry, cache and configuration bundled together.
///
/// The engine:
/// - Owns the `TypeRegistry` (read-only once the engine is built)
/// - Owns the `SubstitutionCache` shared by every resolution it performs
/// - Parses and formats the textual notation
/// - Answers assignability and element/key queries
///
/// All query methods take `&self`; an engine can be shared across threads
/// behind an `Arc`.
///
/// The substitution cache is unbounded. It keeps one entry per distinct
/// context type resolved through the engine, and only
/// [`clear_cache`](Self::clear_cache) empties it. Long-running hosts that
/// resolve arbitrary user-supplied types should clear it periodically, or
/// turn caching off with [`EngineConfig::with_cache_substitutions`].
#[derive(Debug)]
pub struct TypeEngine {
    registry: TypeRegistry,
    cache: SubstitutionCache,
    config: EngineConfig,
}

impl TypeEngine {
    /// Create an engine over `registry`.
    ///
    /// The configured implicit packages replace the registry's own list.
    pub fn new(mut registry: TypeRegistry, config: EngineConfig) -> Self {
        registry.set_implicit_packages(config.implicit_packages.iter().cloned());
        debug!(
            classes = registry.len(),
            max_depth = config.max_depth,
            cache = config.cache_substitutions,
            "type engine created"
        );
        Self {
            registry,
            cache: SubstitutionCache::new(),
            config,
        }
    }

    /// Create an engine over the standard Java class prelude with the
    /// default configuration.
    pub fn with_java_prelude() -> Self {
        Self::new(TypeRegistry::with_java_prelude(), EngineConfig::default())
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Substitution maps currently cached; grows with each new context.
    pub fn cached_contexts(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached substitution map.
    ///
    /// The only way entries leave the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn resolver(&self) -> TypeResolver<'_> {
        TypeResolver::new(&self.registry)
            .with_cache(&self.cache)
            .with_config(self.config.resolver_config())
    }

    fn checker(&self) -> AssignabilityChecker<'_> {
        AssignabilityChecker::new(self.resolver())
    }

    // ==========================================================================
    // Resolution
    // ==========================================================================

    /// Build the node for `descriptor`, binding type variables through
    /// `context` when given.
    pub fn create_type(
        &self,
        descriptor: &TypeDescriptor,
        context: Option<&TypeNode>,
    ) -> Result<TypeNode, TypeResolutionError> {
        self.resolver().create_type(descriptor, context)
    }

    /// Variable bindings seen from `context`.
    pub fn substitution_map(
        &self,
        context: &TypeNode,
    ) -> Result<Arc<SubstitutionMap>, TypeResolutionError> {
        self.resolver().substitution_map(context)
    }

    // ==========================================================================
    // Text
    // ==========================================================================

    /// Parse a type expression.
    ///
    /// With [`EngineConfig::validate_parsed`] set, the result is also checked
    /// against registry arities.
    pub fn parse(&self, text: &str) -> Result<TypeNode, GenusError> {
        if self.config.validate_parsed {
            self.parse_validated(text)
        } else {
            Ok(genus_parser::parse_with_depth(
                text,
                self.config.max_parse_depth,
            )?)
        }
    }

    /// Parse a type expression and check it against registry arities.
    pub fn parse_validated(&self, text: &str) -> Result<TypeNode, GenusError> {
        let node = genus_parser::parse_with_depth(text, self.config.max_parse_depth)?;
        self.resolver().validate(&node)?;
        Ok(node)
    }

    /// Render `node` in the textual notation.
    pub fn format(&self, node: &TypeNode, mode: FormatMode) -> String {
        genus_parser::format(node, mode)
    }

    // ==========================================================================
    // Queries
    // ==========================================================================

    /// Can a value of type `candidate` be used where `target` is expected?
    pub fn is_assignable_from(&self, target: &TypeNode, candidate: &TypeNode) -> bool {
        self.checker().is_assignable_from(target, candidate)
    }

    /// [`is_assignable_from`](Self::is_assignable_from) over type expressions.
    pub fn is_assignable_from_text(
        &self,
        target: &str,
        candidate: &str,
    ) -> Result<bool, GenusError> {
        let target = self.parse(target)?;
        let candidate = self.parse(candidate)?;
        Ok(self.is_assignable_from(&target, &candidate))
    }

    /// Structural equality with class names compared in canonical form.
    pub fn same_type(&self, a: &TypeNode, b: &TypeNode) -> bool {
        self.checker().same_type(a, b)
    }

    /// Element type of an array, container or associative structure.
    ///
    /// A resolution failure while walking the hierarchy is logged and
    /// reported as no element.
    pub fn component_type(&self, node: &TypeNode) -> Option<TypeNode> {
        self.resolver().component_type(node).unwrap_or_else(|err| {
            warn!(node = ?node, error = %err, "component type lookup failed");
            None
        })
    }

    /// Key type of an associative structure.
    pub fn key_type(&self, node: &TypeNode) -> Option<TypeNode> {
        self.resolver().key_type(node).unwrap_or_else(|err| {
            warn!(node = ?node, error = %err, "key type lookup failed");
            None
        })
    }
}

impl Default for TypeEngine {
    fn default() -> Self {
        Self::with_java_prelude()
    }
}

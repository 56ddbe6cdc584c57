//! Type resolution from host descriptors to [`TypeNode`]s.
//!
//! This module provides [`TypeResolver`], which turns a [`TypeDescriptor`]
//! into a [`TypeNode`], optionally relative to a context type whose
//! inheritance chain supplies bindings for type variables.
//!
//! ## Example
//!
//! ```
//! use genus_core::{TypeDescriptor, TypeNode};
//! use genus_registry::TypeRegistry;
//! use genus_resolver::TypeResolver;
//!
//! let registry = TypeRegistry::with_java_prelude();
//! let resolver = TypeResolver::new(&registry);
//!
//! // `E` of Collection, seen from ArrayList<String>
//! let string = TypeNode::raw("java.lang.String");
//! let context = TypeNode::parameterized("java.util.ArrayList", vec![string]);
//! let element = TypeDescriptor::variable("java.util.Collection", "E");
//! let node = resolver.create_type(&element, Some(&context)).unwrap();
//! assert_eq!(node, TypeNode::raw("java.lang.String"));
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use genus_core::{ClassName, TypeDescriptor, TypeHash, TypeKind, TypeNode, TypeResolutionError};
use genus_registry::{ClassEntry, TypeRegistry};

use crate::cache::SubstitutionCache;
use crate::substitution::SubstitutionMap;

/// Default bound on descriptor nesting and inheritance-walk depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Resolver limits and switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Maximum descriptor nesting / inheritance depth before
    /// [`TypeResolutionError::RecursionLimit`].
    pub max_depth: usize,
    /// Whether substitution maps go through the cache when one is attached.
    pub cache_substitutions: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            cache_substitutions: true,
        }
    }
}

/// Resolves descriptors against a registry.
///
/// Cheap to copy: it only borrows the registry and the optional cache.
#[derive(Clone, Copy)]
pub struct TypeResolver<'a> {
    registry: &'a TypeRegistry,
    cache: Option<&'a SubstitutionCache>,
    config: ResolverConfig,
}

impl<'a> TypeResolver<'a> {
    /// Create a resolver without a cache.
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            cache: None,
            config: ResolverConfig::default(),
        }
    }

    /// Attach a substitution map cache.
    pub fn with_cache(mut self, cache: &'a SubstitutionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    pub fn config(&self) -> ResolverConfig {
        self.config
    }

    // ==========================================================================
    // Descriptor resolution
    // ==========================================================================

    /// Build the node for `descriptor`, resolving type variables through
    /// `context` when given.
    ///
    /// Unresolvable variables are not errors: they come back as
    /// [`TypeKind::Variable`] nodes carrying their declared bounds.
    ///
    /// # Errors
    ///
    /// - [`TypeResolutionError::ArityMismatch`] for a parameterized descriptor
    ///   whose registered raw type declares a different parameter count
    /// - [`TypeResolutionError::InvalidWildcard`] for a wildcard with both bounds
    /// - [`TypeResolutionError::RecursionLimit`] past `max_depth`
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn create_type(
        &self,
        descriptor: &TypeDescriptor,
        context: Option<&TypeNode>,
    ) -> Result<TypeNode, TypeResolutionError> {
        match context {
            None => Resolution::new(self, None).resolve(descriptor, 0),
            Some(context) => {
                let map = self.substitution_map(context)?;
                Resolution::new(self, Some(map.as_ref())).resolve(descriptor, 0)
            }
        }
    }

    /// Check a node (typically parsed text) against registry arities.
    pub fn validate(&self, node: &TypeNode) -> Result<(), TypeResolutionError> {
        match node.kind() {
            TypeKind::Raw(_) => Ok(()),
            TypeKind::Parameterized { raw, args } => {
                if let Some(expected) = self.registry.arity(raw) {
                    if expected != args.len() {
                        return Err(arity_mismatch(raw, expected, args.len()));
                    }
                }
                args.iter().try_for_each(|arg| self.validate(arg))
            }
            TypeKind::Array(component) => self.validate(component),
            TypeKind::Wildcard(wildcard) => wildcard
                .upper()
                .into_iter()
                .chain(wildcard.lower())
                .try_for_each(|bound| self.validate(bound)),
            TypeKind::Variable(var) => var.bounds.iter().try_for_each(|b| self.validate(b)),
        }
    }

    // ==========================================================================
    // Substitution maps
    // ==========================================================================

    /// The substitution map of `context`, from the cache when enabled.
    pub fn substitution_map(
        &self,
        context: &TypeNode,
    ) -> Result<Arc<SubstitutionMap>, TypeResolutionError> {
        match self.cache {
            Some(cache) if self.config.cache_substitutions => {
                cache.get_or_compute(context, || self.build_substitution_map(context))
            }
            _ => self.build_substitution_map(context).map(Arc::new),
        }
    }

    /// Walk the supertype chain of `context` breadth-first, recording at
    /// each step the arguments the subtype supplies for the supertype's
    /// parameters. Arguments are resolved against the bindings collected so
    /// far, so bindings compose transitively. Each supertype is visited
    /// once; in a diamond the first path reached wins.
    ///
    /// A generic class used raw erases its whole ancestry: every supertype
    /// reached through it is recorded raw and its parameters stay unbound.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn build_substitution_map(
        &self,
        context: &TypeNode,
    ) -> Result<SubstitutionMap, TypeResolutionError> {
        let mut map = SubstitutionMap::new();
        let Some(root) = class_view(context) else {
            return Ok(map);
        };
        let Some(raw) = root.raw_class() else {
            return Ok(map);
        };
        let Some(entry) = self.registry.lookup(raw) else {
            map.record_supertype(&self.registry.canonical(raw), root.clone());
            return Ok(map);
        };

        self.bind_params(&mut map, entry, &root)?;
        map.record_supertype(&entry.name, root.clone());

        let mut visited = FxHashSet::default();
        visited.insert(entry.name.hash());
        let erased = root.is_raw() && entry.is_generic();
        let mut worklist = VecDeque::from([(entry.name.clone(), 0usize, erased)]);

        while let Some((class, level, erased)) = worklist.pop_front() {
            if level >= self.config.max_depth {
                return Err(TypeResolutionError::RecursionLimit {
                    limit: self.config.max_depth,
                    class: class.to_string(),
                });
            }
            let Some(entry) = self.registry.get(&class) else {
                continue;
            };
            for supertype in entry.supertypes() {
                let Some(super_raw) = supertype.raw_class() else {
                    continue;
                };
                let super_raw = self.registry.canonical(super_raw);
                if !visited.insert(super_raw.hash()) {
                    continue;
                }

                let node = if erased {
                    TypeNode::raw(super_raw.clone())
                } else {
                    Resolution::new(self, Some(&map)).resolve(supertype, level + 1)?
                };
                trace!(class = %class, supertype = ?node, erased, "supertype step");
                if let Some(super_entry) = self.registry.get(&super_raw) {
                    self.bind_params(&mut map, super_entry, &node)?;
                    let erases = erased || (node.is_raw() && super_entry.is_generic());
                    worklist.push_back((super_raw.clone(), level + 1, erases));
                }
                map.record_supertype(&super_raw, node);
            }
        }

        debug!(
            context = ?context,
            bindings = map.len(),
            supertypes = map.supertype_count(),
            "built substitution map"
        );
        Ok(map)
    }

    /// Bind the parameters of `entry` to the arguments of `node`. A raw
    /// use binds each parameter to itself with its declared bounds.
    fn bind_params(
        &self,
        map: &mut SubstitutionMap,
        entry: &ClassEntry,
        node: &TypeNode,
    ) -> Result<(), TypeResolutionError> {
        match node.kind() {
            TypeKind::Parameterized { args, .. } => {
                if args.len() != entry.arity() {
                    return Err(arity_mismatch(&entry.name, entry.arity(), args.len()));
                }
                for (param, arg) in entry.type_params.iter().zip(args) {
                    map.bind(&entry.name, &param.name, arg.clone());
                }
            }
            _ => {
                let mut declared = Resolution::new(self, None);
                for param in &entry.type_params {
                    let var = declared.declared_variable(&entry.name, &param.name, 0)?;
                    map.bind(&entry.name, &param.name, var);
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for TypeResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeResolver")
            .field("registry", self.registry)
            .field("cached", &self.cache.is_some())
            .field("config", &self.config)
            .finish()
    }
}

/// The class-typed node through which `node` is seen: itself for raw and
/// parameterized nodes, the upper bound for wildcards, the first bound for
/// variables.
pub(crate) fn class_view(node: &TypeNode) -> Option<TypeNode> {
    match node.kind() {
        TypeKind::Raw(_) | TypeKind::Parameterized { .. } => Some(node.clone()),
        TypeKind::Wildcard(wildcard) => wildcard.upper().and_then(class_view),
        TypeKind::Variable(var) => var.bounds.first().and_then(class_view),
        TypeKind::Array(_) => None,
    }
}

fn arity_mismatch(class: &ClassName, expected: usize, got: usize) -> TypeResolutionError {
    TypeResolutionError::ArityMismatch {
        class: class.to_string(),
        expected,
        got,
    }
}

fn describe(descriptor: &TypeDescriptor) -> String {
    match descriptor {
        TypeDescriptor::Class(name) | TypeDescriptor::Parameterized { raw: name, .. } => {
            name.to_string()
        }
        TypeDescriptor::Array(c) | TypeDescriptor::GenericArray(c) => format!("{}[]", describe(c)),
        TypeDescriptor::Wildcard { .. } => "?".to_string(),
        TypeDescriptor::Variable { owner, name } => format!("{owner}.{name}"),
    }
}

/// One resolution pass: optional bindings plus the variables whose bounds
/// are currently being expanded.
struct Resolution<'r, 'a> {
    resolver: &'r TypeResolver<'a>,
    bindings: Option<&'r SubstitutionMap>,
    expanding: Vec<TypeHash>,
}

impl<'r, 'a> Resolution<'r, 'a> {
    fn new(resolver: &'r TypeResolver<'a>, bindings: Option<&'r SubstitutionMap>) -> Self {
        Self {
            resolver,
            bindings,
            expanding: Vec::new(),
        }
    }

    fn resolve(
        &mut self,
        descriptor: &TypeDescriptor,
        depth: usize,
    ) -> Result<TypeNode, TypeResolutionError> {
        let limit = self.resolver.config.max_depth;
        if depth > limit {
            return Err(TypeResolutionError::RecursionLimit {
                limit,
                class: describe(descriptor),
            });
        }

        match descriptor {
            TypeDescriptor::Class(name) => Ok(TypeNode::raw(name.clone())),
            TypeDescriptor::Parameterized { raw, args } => {
                if let Some(expected) = self.resolver.registry.arity(raw) {
                    if expected != args.len() {
                        return Err(arity_mismatch(raw, expected, args.len()));
                    }
                }
                let args = args
                    .iter()
                    .map(|arg| self.resolve(arg, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TypeNode::parameterized(raw.clone(), args))
            }
            TypeDescriptor::Array(component) | TypeDescriptor::GenericArray(component) => {
                Ok(TypeNode::array(self.resolve(component, depth + 1)?))
            }
            TypeDescriptor::Wildcard { upper, lower } => {
                let upper = upper
                    .as_deref()
                    .map(|u| self.resolve(u, depth + 1))
                    .transpose()?;
                let lower = lower
                    .as_deref()
                    .map(|l| self.resolve(l, depth + 1))
                    .transpose()?;
                TypeNode::wildcard(upper, lower)
            }
            TypeDescriptor::Variable { owner, name } => {
                let owner = self.resolver.registry.canonical(owner);
                if let Some(bound) = self.bindings.and_then(|map| map.get(&owner, name)) {
                    return Ok(bound.clone());
                }
                self.declared_variable(&owner, name, depth)
            }
        }
    }

    /// `owner.name` as an unresolved variable with its declared bounds.
    ///
    /// A bound that mentions a variable already being expanded
    /// (`T extends Comparable<T>`) sees that variable without bounds.
    fn declared_variable(
        &mut self,
        owner: &ClassName,
        name: &str,
        depth: usize,
    ) -> Result<TypeNode, TypeResolutionError> {
        let param = self
            .resolver
            .registry
            .get(owner)
            .and_then(|entry| entry.type_param(name));
        let Some(param) = param else {
            return Ok(TypeNode::variable(name, owner.clone(), Vec::new()));
        };

        let key = SubstitutionMap::key(owner, name);
        if self.expanding.contains(&key) {
            trace!(owner = %owner, name, "cyclic bound");
            return Ok(TypeNode::variable(name, owner.clone(), Vec::new()));
        }

        self.expanding.push(key);
        let bounds = param
            .bounds
            .iter()
            .map(|bound| self.resolve(bound, depth + 1))
            .collect::<Result<Vec<_>, _>>();
        self.expanding.pop();

        Ok(TypeNode::variable(name, owner.clone(), bounds?))
    }
}

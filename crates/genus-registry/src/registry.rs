//! TypeRegistry - the host metadata table queried by the engine.
//!
//! This module provides [`TypeRegistry`], which stores one [`ClassEntry`] per
//! nominal type and maintains the inheritance graph used for nominal subtype
//! checks.
//!
//! # Storage Model
//!
//! - **Classes**: stored by `TypeHash` of their canonical name (O(1) lookup).
//! - **Inheritance**: a `petgraph::DiGraph` with one node per class name and an
//!   edge from each class to each direct supertype. Supertypes may be named
//!   before they are registered (forward references); they get a node
//!   immediately and an entry once registered.
//! - **Implicit packages**: unqualified names (`Number`) are looked up in each
//!   implicit package (`java.lang` by default) when no exact entry exists.
//!
//! # Thread Safety
//!
//! The registry is populated single-threaded, then only read. Reads take
//! `&self` and the type is `Send + Sync`, so a populated registry can be
//! shared behind an `Arc`.
//!
//! # Example
//!
//! ```
//! use genus_core::{ClassName, TypeDescriptor};
//! use genus_registry::{ClassEntry, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(ClassEntry::class("java.lang.Object")).unwrap();
//! registry
//!     .register(
//!         ClassEntry::class("demo.Base")
//!             .with_superclass(TypeDescriptor::class("java.lang.Object")),
//!     )
//!     .unwrap();
//!
//! assert!(registry.is_subclass(&ClassName::new("demo.Base"), &ClassName::object()));
//! ```

use petgraph::Direction;
use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, EdgeRef};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use genus_core::{ClassName, RegistrationError, TypeDescriptor, TypeHash, well_known};

use crate::entries::{Capability, ClassEntry, TypeParamEntry};

/// Nominal supertypes every array type has besides the top type.
const ARRAY_SUPERTYPES: [&str; 2] = ["java.lang.Cloneable", "java.io.Serializable"];

/// Whether every array is a subtype of `class` (a non-array name).
fn is_array_supertype(class: &ClassName) -> bool {
    class.is_object() || ARRAY_SUPERTYPES.iter().any(|name| class == name)
}

/// Kind of an inheritance edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InheritanceEdge {
    /// `class A extends B`
    Extends,
    /// `class A implements I` / `interface I extends J`
    Implements,
}

/// Host registry of classes, their generic signatures and capabilities.
pub struct TypeRegistry {
    /// Entries by hash of the canonical name.
    classes: FxHashMap<TypeHash, ClassEntry>,

    /// Inheritance graph: class -> direct supertype.
    graph: DiGraph<ClassName, InheritanceEdge>,

    /// Graph node per class hash (registered or forward-referenced).
    nodes: FxHashMap<TypeHash, NodeIndex>,

    /// Packages searched for unqualified names, in order.
    implicit_packages: Vec<String>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self {
            classes: FxHashMap::default(),
            graph: DiGraph::new(),
            nodes: FxHashMap::default(),
            implicit_packages: vec![well_known::JAVA_LANG.to_string()],
        }
    }
}

impl TypeRegistry {
    /// Create a new empty registry searching `java.lang` for unqualified names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the implicit package list.
    pub fn with_implicit_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_implicit_packages(packages);
        self
    }

    /// Replace the implicit package list in place.
    pub fn set_implicit_packages<I, S>(&mut self, packages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.implicit_packages = packages.into_iter().map(Into::into).collect();
    }

    /// Packages searched for unqualified names.
    pub fn implicit_packages(&self) -> &[String] {
        &self.implicit_packages
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a class.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::DuplicateClass`] if the name is taken
    /// - [`RegistrationError::DuplicateTypeParam`] for repeated parameter names
    /// - [`RegistrationError::CapabilityArity`] if a capability needs more parameters
    /// - [`RegistrationError::InvalidSupertype`] if a supertype is not a class
    /// - [`RegistrationError::CircularInheritance`] if the class would become
    ///   its own ancestor
    pub fn register(&mut self, entry: ClassEntry) -> Result<(), RegistrationError> {
        let class = entry.name.to_string();
        if self.classes.contains_key(&entry.name.hash()) {
            return Err(RegistrationError::DuplicateClass(class));
        }

        let mut seen = FxHashSet::default();
        for param in &entry.type_params {
            if !seen.insert(param.name.as_str()) {
                return Err(RegistrationError::DuplicateTypeParam {
                    class,
                    name: param.name.clone(),
                });
            }
        }

        if let Some(capability) = entry.capability {
            if entry.arity() < capability.min_arity() {
                return Err(RegistrationError::CapabilityArity {
                    class,
                    capability: format!("{capability:?}"),
                    arity: entry.arity(),
                });
            }
        }

        let mut supers = Vec::new();
        for supertype in entry.supertypes() {
            let Some(raw) = supertype.raw_class() else {
                return Err(RegistrationError::InvalidSupertype {
                    class,
                    supertype: format!("{supertype:?}"),
                });
            };
            let raw = self.canonical(raw);
            if raw == entry.name || self.reaches(&raw, &entry.name) {
                return Err(RegistrationError::CircularInheritance {
                    class,
                    supertype: raw.to_string(),
                });
            }
            supers.push(raw);
        }

        debug!(
            class = %entry.name,
            arity = entry.arity(),
            supertypes = supers.len(),
            "registering class"
        );
        self.insert_entry(entry);
        Ok(())
    }

    /// Insert an already validated entry and its inheritance edges.
    pub(crate) fn insert_entry(&mut self, entry: ClassEntry) {
        let node = self.ensure_node(&entry.name);
        for superclass in &entry.superclass {
            self.add_edge(node, superclass, InheritanceEdge::Extends);
        }
        for interface in &entry.interfaces {
            self.add_edge(node, interface, InheritanceEdge::Implements);
        }
        self.classes.insert(entry.name.hash(), entry);
    }

    fn add_edge(&mut self, from: NodeIndex, supertype: &TypeDescriptor, kind: InheritanceEdge) {
        if let Some(raw) = supertype.raw_class() {
            let raw = self.canonical(raw);
            let target = self.ensure_node(&raw);
            self.graph.add_edge(from, target, kind);
        }
    }

    fn ensure_node(&mut self, name: &ClassName) -> NodeIndex {
        if let Some(&node) = self.nodes.get(&name.hash()) {
            return node;
        }
        let node = self.graph.add_node(name.clone());
        self.nodes.insert(name.hash(), node);
        node
    }

    /// Whether `to` is reachable from `from` through inheritance edges.
    fn reaches(&self, from: &ClassName, to: &ClassName) -> bool {
        match (self.nodes.get(&from.hash()), self.nodes.get(&to.hash())) {
            (Some(&a), Some(&b)) => has_path_connecting(&self.graph, a, b, None),
            _ => false,
        }
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Get an entry by its exact canonical name.
    pub fn get(&self, name: &ClassName) -> Option<&ClassEntry> {
        self.classes.get(&name.hash())
    }

    /// Get an entry by hash of its canonical name.
    pub fn get_by_hash(&self, hash: TypeHash) -> Option<&ClassEntry> {
        self.classes.get(&hash)
    }

    /// Find an entry by exact name, then by each implicit package for
    /// unqualified names.
    pub fn lookup(&self, name: &ClassName) -> Option<&ClassEntry> {
        if let Some(entry) = self.get(name) {
            return Some(entry);
        }
        if name.is_qualified() || name.is_array() {
            return None;
        }
        self.implicit_packages
            .iter()
            .find_map(|package| self.get(&name.in_package(package)))
    }

    /// Check if a class is known (exact or through an implicit package).
    pub fn contains(&self, name: &ClassName) -> bool {
        self.lookup(name).is_some()
    }

    /// Canonical form of a name: the registered name when known (arrays
    /// by their base class), the name itself otherwise.
    pub fn canonical(&self, name: &ClassName) -> ClassName {
        if name.is_array() {
            let base = self.canonical(&name.base_class());
            return base.with_dimensions(name.dimensions());
        }
        match self.lookup(name) {
            Some(entry) => entry.name.clone(),
            None => name.clone(),
        }
    }

    /// Declared type parameter count of a class.
    pub fn arity(&self, name: &ClassName) -> Option<usize> {
        self.lookup(name).map(ClassEntry::arity)
    }

    /// Whether a class is registered as primitive.
    pub fn is_primitive(&self, name: &ClassName) -> bool {
        self.lookup(name).is_some_and(ClassEntry::is_primitive)
    }

    /// Capability declared directly on a class.
    pub fn capability(&self, name: &ClassName) -> Option<Capability> {
        self.lookup(name).and_then(|e| e.capability)
    }

    /// Nearest class (itself first, then ancestors breadth-first) that
    /// declares a capability.
    pub fn capability_owner(&self, name: &ClassName) -> Option<&ClassEntry> {
        let entry = self.lookup(name)?;
        if entry.capability.is_some() {
            return Some(entry);
        }
        self.ancestors(&entry.name)
            .into_iter()
            .filter_map(|ancestor| self.get(&ancestor))
            .find(|e| e.capability.is_some())
    }

    /// All transitive supertypes of a class, breadth-first, excluding itself.
    pub fn ancestors(&self, name: &ClassName) -> Vec<ClassName> {
        let name = self.canonical(name);
        let Some(&start) = self.nodes.get(&name.hash()) else {
            return Vec::new();
        };
        let mut result = Vec::new();
        let mut bfs = Bfs::new(&self.graph, start);
        while let Some(node) = bfs.next(&self.graph) {
            if node != start {
                result.push(self.graph[node].clone());
            }
        }
        result
    }

    /// Direct supertypes recorded in the graph, with their edge kind.
    pub fn direct_supertypes(&self, name: &ClassName) -> Vec<(ClassName, InheritanceEdge)> {
        let name = self.canonical(name);
        let Some(&node) = self.nodes.get(&name.hash()) else {
            return Vec::new();
        };
        let mut supers: Vec<_> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|edge| (self.graph[edge.target()].clone(), *edge.weight()))
            .collect();
        // petgraph yields edges newest first
        supers.reverse();
        supers
    }

    /// Supertype descriptors declared by a class, superclass first (empty
    /// when unknown).
    pub fn supertypes(&self, name: &ClassName) -> impl Iterator<Item = &TypeDescriptor> {
        self.lookup(name)
            .into_iter()
            .flat_map(ClassEntry::supertypes)
    }

    /// Declared type parameters of a class.
    pub fn type_params(&self, name: &ClassName) -> Option<&[TypeParamEntry]> {
        self.lookup(name).map(|entry| entry.type_params.as_slice())
    }

    // ==========================================================================
    // Nominal subtyping
    // ==========================================================================

    /// Nominal subtype check on erasures: can a value of class `sub` be used
    /// where class `sup` is expected?
    ///
    /// - identical canonical names match;
    /// - every non-primitive class and every array is a subtype of the top type;
    /// - arrays are also subtypes of `Cloneable` and `Serializable`;
    /// - reference arrays are covariant, primitive arrays only match themselves;
    /// - otherwise `sup` must be reachable from `sub` in the inheritance graph.
    pub fn is_subclass(&self, sub: &ClassName, sup: &ClassName) -> bool {
        let sub = self.canonical(sub);
        let sup = self.canonical(sup);
        if sub == sup {
            return true;
        }

        let (sub_dims, sup_dims) = (sub.dimensions(), sup.dimensions());
        let result = if sub_dims == 0 && sup_dims == 0 {
            if sup.is_object() {
                !self.is_primitive(&sub)
            } else {
                self.reaches(&sub, &sup)
            }
        } else if sub_dims == sup_dims {
            // Same depth: compare base classes once; primitive bases only
            // match themselves, which the equality check above covered.
            let (sub_base, sup_base) = (sub.base_class(), sup.base_class());
            !self.is_primitive(&sub_base)
                && !self.is_primitive(&sup_base)
                && self.is_subclass(&sub_base, &sup_base)
        } else if sub_dims > sup_dims {
            // What is left of `sub` after `sup_dims` levels is still an array.
            is_array_supertype(&sup.base_class())
        } else {
            false
        };
        trace!(sub = %sub, sup = %sup, result, "nominal subtype check");
        result
    }

    // ==========================================================================
    // Iteration
    // ==========================================================================

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no class is registered.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterate over all registered entries (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &ClassEntry> {
        self.classes.values()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("classes", &self.classes.len())
            .field("edges", &self.graph.edge_count())
            .field("implicit_packages", &self.implicit_packages)
            .finish()
    }
}

//! Substitution maps: type-variable bindings seen from a context type.
//!
//! A [`SubstitutionMap`] answers "what is `E` of `java.util.Collection`
//! when looking at an `ArrayList<String>`?". Keys are the hash of
//! `(owner class, variable name)`; values are the bound [`TypeNode`]s. The
//! map also remembers how the context instantiates each of its supertypes,
//! which the assignability checker uses to view a candidate as the
//! target's raw type.

use rustc_hash::FxHashMap;

use genus_core::{ClassName, TypeHash, TypeKind, TypeNode};

/// Variable bindings and supertype instantiations for one context type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubstitutionMap {
    /// `from_variable(owner, name)` -> bound type
    bindings: FxHashMap<TypeHash, TypeNode>,
    /// canonical supertype class -> its instantiation as seen from the context
    supertypes: FxHashMap<TypeHash, TypeNode>,
}

impl SubstitutionMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of a variable binding.
    #[inline]
    pub fn key(owner: &ClassName, name: &str) -> TypeHash {
        TypeHash::from_variable(owner.hash(), name)
    }

    /// Bind `owner.name` to `node`, returning any previous binding.
    pub fn bind(&mut self, owner: &ClassName, name: &str, node: TypeNode) -> Option<TypeNode> {
        self.bindings.insert(Self::key(owner, name), node)
    }

    /// Binding of `owner.name`.
    pub fn get(&self, owner: &ClassName, name: &str) -> Option<&TypeNode> {
        self.bindings.get(&Self::key(owner, name))
    }

    /// Binding by precomputed key.
    pub fn get_by_hash(&self, key: TypeHash) -> Option<&TypeNode> {
        self.bindings.get(&key)
    }

    /// Record how the context instantiates `class`.
    pub fn record_supertype(&mut self, class: &ClassName, node: TypeNode) {
        self.supertypes.insert(class.hash(), node);
    }

    /// Instantiation of `class` (canonical name) as seen from the context,
    /// including the context's own class.
    pub fn supertype(&self, class: &ClassName) -> Option<&TypeNode> {
        self.supertypes.get(&class.hash())
    }

    /// Number of variable bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Number of recorded supertype instantiations.
    pub fn supertype_count(&self) -> usize {
        self.supertypes.len()
    }

    /// Replace every bound variable occurring in `node`.
    ///
    /// Unbound variables are left as they are.
    pub fn substitute(&self, node: &TypeNode) -> TypeNode {
        match node.kind() {
            TypeKind::Raw(_) => node.clone(),
            TypeKind::Parameterized { raw, args } => TypeNode::parameterized(
                raw.clone(),
                args.iter().map(|arg| self.substitute(arg)).collect(),
            ),
            TypeKind::Array(component) => TypeNode::array(self.substitute(component)),
            TypeKind::Wildcard(wildcard) => {
                if let Some(upper) = wildcard.upper() {
                    TypeNode::wildcard_extends(self.substitute(upper))
                } else if let Some(lower) = wildcard.lower() {
                    TypeNode::wildcard_super(self.substitute(lower))
                } else {
                    node.clone()
                }
            }
            TypeKind::Variable(var) => self
                .get(&var.owner, &var.name)
                .cloned()
                .unwrap_or_else(|| node.clone()),
        }
    }
}

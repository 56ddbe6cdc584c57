//! Registry entries describing classes and their generic signatures.

use bitflags::bitflags;
use genus_core::{ClassName, TypeDescriptor};

bitflags! {
    /// Modifiers of a registered class.
    ///
    /// ```
    /// use genus_registry::ClassFlags;
    ///
    /// let abstract_base = ClassFlags::ABSTRACT;
    /// assert!(!abstract_base.contains(ClassFlags::INTERFACE));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClassFlags: u8 {
        /// Declared as an interface.
        const INTERFACE = 1 << 0;
        /// Declared abstract.
        const ABSTRACT = 1 << 1;
        /// Declared final.
        const FINAL = 1 << 2;
        /// A primitive value type (`int`, `boolean`, ...). Not a subtype of the top type.
        const PRIMITIVE = 1 << 3;
    }
}

/// Structural role a generic class plays, driving `component_type` / `key_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Single-element container (`Collection<E>`): the element is argument 0.
    Container,
    /// Two-argument associative structure (`Map<K, V>`): key is argument 0,
    /// value is argument 1.
    Associative,
}

impl Capability {
    /// Position of the element (value) argument.
    pub fn element_index(self) -> usize {
        match self {
            Capability::Container => 0,
            Capability::Associative => 1,
        }
    }

    /// Position of the key argument, for associative structures.
    pub fn key_index(self) -> Option<usize> {
        match self {
            Capability::Container => None,
            Capability::Associative => Some(0),
        }
    }

    /// Number of type parameters a class must declare to carry this capability.
    pub fn min_arity(self) -> usize {
        match self {
            Capability::Container => 1,
            Capability::Associative => 2,
        }
    }
}

/// A declared type parameter with its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParamEntry {
    /// Parameter name (`T`, `E`, `K`, ...).
    pub name: String,
    /// Declared bounds (`T extends Number & Comparable<T>`), in order.
    pub bounds: Vec<TypeDescriptor>,
}

impl TypeParamEntry {
    /// An unbounded parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    /// A parameter with bounds.
    pub fn bounded(name: impl Into<String>, bounds: Vec<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            bounds,
        }
    }
}

/// Registry entry for a class or interface.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassEntry {
    /// Canonical dotted name.
    pub name: ClassName,
    /// Modifiers.
    pub flags: ClassFlags,

    // === Generics ===
    /// Declared type parameters, in order.
    pub type_params: Vec<TypeParamEntry>,

    // === Inheritance ===
    /// Direct superclass as instantiated by this class (`AbstractList<E>`).
    pub superclass: Option<TypeDescriptor>,
    /// Directly implemented / extended interfaces.
    pub interfaces: Vec<TypeDescriptor>,

    /// Container/associative role, if any.
    pub capability: Option<Capability>,
}

impl ClassEntry {
    /// Create a new entry with the given flags.
    pub fn new(name: impl Into<ClassName>, flags: ClassFlags) -> Self {
        Self {
            name: name.into(),
            flags,
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            capability: None,
        }
    }

    /// A concrete class.
    pub fn class(name: impl Into<ClassName>) -> Self {
        Self::new(name, ClassFlags::empty())
    }

    /// An interface.
    pub fn interface(name: impl Into<ClassName>) -> Self {
        Self::new(name, ClassFlags::INTERFACE | ClassFlags::ABSTRACT)
    }

    /// A primitive value type.
    pub fn primitive(name: impl Into<ClassName>) -> Self {
        Self::new(name, ClassFlags::PRIMITIVE | ClassFlags::FINAL)
    }

    // === Builder Methods ===

    /// Add flags.
    pub fn with_flags(mut self, flags: ClassFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Declare an unbounded type parameter.
    pub fn with_type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(TypeParamEntry::new(name));
        self
    }

    /// Declare a bounded type parameter.
    pub fn with_bounded_param(
        mut self,
        name: impl Into<String>,
        bounds: Vec<TypeDescriptor>,
    ) -> Self {
        self.type_params.push(TypeParamEntry::bounded(name, bounds));
        self
    }

    /// Set the superclass.
    pub fn with_superclass(mut self, superclass: TypeDescriptor) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Add an implemented interface.
    pub fn with_interface(mut self, interface: TypeDescriptor) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Tag the class with a capability.
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capability = Some(capability);
        self
    }

    // === Queries ===

    /// Number of declared type parameters.
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }

    /// Whether the class declares type parameters.
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    pub fn is_interface(&self) -> bool {
        self.flags.contains(ClassFlags::INTERFACE)
    }

    pub fn is_primitive(&self) -> bool {
        self.flags.contains(ClassFlags::PRIMITIVE)
    }

    /// Look up a declared type parameter by name.
    pub fn type_param(&self, name: &str) -> Option<&TypeParamEntry> {
        self.type_params.iter().find(|p| p.name == name)
    }

    /// Position of a declared type parameter.
    pub fn type_param_index(&self, name: &str) -> Option<usize> {
        self.type_params.iter().position(|p| p.name == name)
    }

    /// Direct supertypes: superclass first, then interfaces in declaration order.
    pub fn supertypes(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.superclass.iter().chain(self.interfaces.iter())
    }

    /// Variable descriptor for the parameter at `index`, as seen from inside this class.
    pub fn param_descriptor(&self, index: usize) -> Option<TypeDescriptor> {
        self.type_params
            .get(index)
            .map(|p| TypeDescriptor::variable(self.name.clone(), p.name.clone()))
    }
}

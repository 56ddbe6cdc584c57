//! Structural type descriptors supplied by the host.
//!
//! A [`TypeDescriptor`] captures a declared type exactly as the host's
//! metadata spells it: type variables are still references to the class that
//! declares them. The resolver turns descriptors into [`TypeNode`]s.
//!
//! [`TypeNode`]: crate::TypeNode

use crate::ClassName;

/// A declared type as written in host metadata.
///
/// # Examples
///
/// For `Map<K, List<? extends V>>` declared on `demo.Index<K, V>`:
/// ```
/// use genus_core::TypeDescriptor;
///
/// let desc = TypeDescriptor::parameterized(
///     "java.util.Map",
///     vec![
///         TypeDescriptor::variable("demo.Index", "K"),
///         TypeDescriptor::parameterized(
///             "java.util.List",
///             vec![TypeDescriptor::wildcard_extends(TypeDescriptor::variable("demo.Index", "V"))],
///         ),
///     ],
/// );
/// assert!(desc.mentions_variables());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// A bare nominal reference.
    Class(ClassName),
    /// A generic class applied to arguments.
    Parameterized {
        raw: ClassName,
        args: Vec<TypeDescriptor>,
    },
    /// A declared array with a non-generic component (`String[]`).
    Array(Box<TypeDescriptor>),
    /// An array whose component is generic (`T[]`, `List<String>[]`).
    GenericArray(Box<TypeDescriptor>),
    /// A wildcard with optional bounds.
    Wildcard {
        upper: Option<Box<TypeDescriptor>>,
        lower: Option<Box<TypeDescriptor>>,
    },
    /// Reference to the type parameter `name` declared on `owner`.
    Variable { owner: ClassName, name: String },
}

impl TypeDescriptor {
    /// A bare class reference.
    pub fn class(name: impl Into<ClassName>) -> Self {
        TypeDescriptor::Class(name.into())
    }

    /// A parameterized reference.
    pub fn parameterized(raw: impl Into<ClassName>, args: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Parameterized {
            raw: raw.into(),
            args,
        }
    }

    /// An array of `component`; picks the generic form when needed.
    pub fn array(component: TypeDescriptor) -> Self {
        if component.is_generic() {
            TypeDescriptor::GenericArray(Box::new(component))
        } else {
            TypeDescriptor::Array(Box::new(component))
        }
    }

    /// A reference to a type variable.
    pub fn variable(owner: impl Into<ClassName>, name: impl Into<String>) -> Self {
        TypeDescriptor::Variable {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// `?`
    pub fn unbounded() -> Self {
        TypeDescriptor::Wildcard {
            upper: None,
            lower: None,
        }
    }

    /// `? extends upper`
    pub fn wildcard_extends(upper: TypeDescriptor) -> Self {
        TypeDescriptor::Wildcard {
            upper: Some(Box::new(upper)),
            lower: None,
        }
    }

    /// `? super lower`
    pub fn wildcard_super(lower: TypeDescriptor) -> Self {
        TypeDescriptor::Wildcard {
            upper: None,
            lower: Some(Box::new(lower)),
        }
    }

    /// The class named at the root of this descriptor, if any.
    pub fn raw_class(&self) -> Option<&ClassName> {
        match self {
            TypeDescriptor::Class(name) => Some(name),
            TypeDescriptor::Parameterized { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Whether the descriptor carries generic structure at its root.
    pub fn is_generic(&self) -> bool {
        !matches!(self, TypeDescriptor::Class(_) | TypeDescriptor::Array(_))
    }

    /// Whether any type variable occurs anywhere in the descriptor.
    pub fn mentions_variables(&self) -> bool {
        match self {
            TypeDescriptor::Class(_) => false,
            TypeDescriptor::Parameterized { args, .. } => args.iter().any(Self::mentions_variables),
            TypeDescriptor::Array(c) | TypeDescriptor::GenericArray(c) => c.mentions_variables(),
            TypeDescriptor::Wildcard { upper, lower } => upper
                .iter()
                .chain(lower.iter())
                .any(|b| b.mentions_variables()),
            TypeDescriptor::Variable { .. } => true,
        }
    }
}

impl From<ClassName> for TypeDescriptor {
    fn from(name: ClassName) -> Self {
        TypeDescriptor::Class(name)
    }
}

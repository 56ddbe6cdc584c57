//! TypeNode - the immutable representation of a (possibly generic) type.
//!
//! A [`TypeNode`] is a cheaply clonable handle to a [`TypeKind`] plus two
//! derived classes computed once at construction:
//!
//! - the **assignment class**: the most specific nominal type a value of this
//!   type can be declared as;
//! - the **retrieval class**: the most specific concrete nominal type a value
//!   read at this type is guaranteed to be an instance of.
//!
//! ```text
//! java.util.List<java.lang.String>  assignment: java.util.List   retrieval: java.util.List
//! ? extends java.lang.Number        assignment: Number           retrieval: Number
//! ? super java.lang.Integer         assignment: Integer          retrieval: java.lang.Object
//! T extends java.lang.Number        assignment: Number           retrieval: Number
//! java.lang.String[]                assignment: String[]         retrieval: String[]
//! ```
//!
//! Nodes are immutable and `Send + Sync`; equality and hashing are
//! structural over the kind.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{ClassName, TypeResolutionError};

/// Variant payload of a [`TypeNode`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A nominal type with no type arguments.
    Raw(ClassName),
    /// A generic class applied to arguments.
    Parameterized { raw: ClassName, args: Vec<TypeNode> },
    /// An array of `component`.
    Array(TypeNode),
    /// `?`, `? extends U` or `? super L`.
    Wildcard(Wildcard),
    /// A type variable that could not be (or was not asked to be) resolved.
    Variable(TypeVariable),
}

/// Bounds of a wildcard. At most one bound is present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Wildcard {
    upper: Option<TypeNode>,
    lower: Option<TypeNode>,
}

impl Wildcard {
    /// Explicit upper bound (`? extends U`).
    pub fn upper(&self) -> Option<&TypeNode> {
        self.upper.as_ref()
    }

    /// Lower bound (`? super L`).
    pub fn lower(&self) -> Option<&TypeNode> {
        self.lower.as_ref()
    }

    /// Whether neither bound is present.
    pub fn is_unbounded(&self) -> bool {
        self.upper.is_none() && self.lower.is_none()
    }
}

/// An unresolved type variable together with its declared bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVariable {
    /// Declared name (`T`, `E`, ...).
    pub name: Arc<str>,
    /// Class declaring the variable.
    pub owner: ClassName,
    /// Declared bounds, most specific first.
    pub bounds: Vec<TypeNode>,
}

struct NodeData {
    kind: TypeKind,
    assignment: ClassName,
    retrieval: ClassName,
}

/// Immutable, shareable type representation.
#[derive(Clone)]
pub struct TypeNode(Arc<NodeData>);

impl TypeNode {
    fn build(kind: TypeKind) -> Self {
        let (assignment, retrieval) = match &kind {
            TypeKind::Raw(class) => (class.clone(), class.clone()),
            TypeKind::Parameterized { raw, .. } => (raw.clone(), raw.clone()),
            TypeKind::Array(component) => (
                ClassName::array_of(component.assignment_class()),
                ClassName::array_of(component.retrieval_class()),
            ),
            TypeKind::Wildcard(wildcard) => {
                let retrieval = wildcard
                    .upper
                    .as_ref()
                    .map(|u| u.retrieval_class().clone())
                    .unwrap_or_else(ClassName::object);
                let assignment = wildcard
                    .lower
                    .as_ref()
                    .or(wildcard.upper.as_ref())
                    .map(|b| b.assignment_class().clone())
                    .unwrap_or_else(ClassName::object);
                (assignment, retrieval)
            }
            TypeKind::Variable(var) => match var.bounds.first() {
                Some(bound) => (
                    bound.assignment_class().clone(),
                    bound.retrieval_class().clone(),
                ),
                None => (ClassName::object(), ClassName::object()),
            },
        };
        TypeNode(Arc::new(NodeData {
            kind,
            assignment,
            retrieval,
        }))
    }

    // ==========================================================================
    // Constructors
    // ==========================================================================

    /// A raw nominal type.
    pub fn raw(class: impl Into<ClassName>) -> Self {
        Self::build(TypeKind::Raw(class.into()))
    }

    /// A parameterized type. Arity is checked by the resolver, not here.
    pub fn parameterized(raw: impl Into<ClassName>, args: Vec<TypeNode>) -> Self {
        Self::build(TypeKind::Parameterized {
            raw: raw.into(),
            args,
        })
    }

    /// An array of `component`.
    ///
    /// A wildcard component is accepted here but has no textual form: the
    /// parser attaches `[]` to a wildcard's bound instead.
    pub fn array(component: TypeNode) -> Self {
        Self::build(TypeKind::Array(component))
    }

    /// The unbounded wildcard `?`.
    pub fn unbounded() -> Self {
        Self::build(TypeKind::Wildcard(Wildcard {
            upper: None,
            lower: None,
        }))
    }

    /// `? extends upper`.
    pub fn wildcard_extends(upper: TypeNode) -> Self {
        Self::build(TypeKind::Wildcard(Wildcard {
            upper: Some(upper),
            lower: None,
        }))
    }

    /// `? super lower`.
    pub fn wildcard_super(lower: TypeNode) -> Self {
        Self::build(TypeKind::Wildcard(Wildcard {
            upper: None,
            lower: Some(lower),
        }))
    }

    /// A wildcard from optional bounds; both bounds at once is an error.
    pub fn wildcard(
        upper: Option<TypeNode>,
        lower: Option<TypeNode>,
    ) -> Result<Self, TypeResolutionError> {
        match (upper, lower) {
            (Some(upper), Some(lower)) => Err(TypeResolutionError::InvalidWildcard {
                detail: format!(
                    "extends {} super {}",
                    upper.assignment_class(),
                    lower.assignment_class()
                ),
            }),
            (upper, lower) => Ok(Self::build(TypeKind::Wildcard(Wildcard { upper, lower }))),
        }
    }

    /// An unresolved type variable declared on `owner`.
    pub fn variable(name: &str, owner: ClassName, bounds: Vec<TypeNode>) -> Self {
        Self::build(TypeKind::Variable(TypeVariable {
            name: Arc::from(name),
            owner,
            bounds,
        }))
    }

    // ==========================================================================
    // Queries
    // ==========================================================================

    /// The variant payload.
    #[inline]
    pub fn kind(&self) -> &TypeKind {
        &self.0.kind
    }

    /// Most specific nominal type a value of this type can be declared as.
    #[inline]
    pub fn assignment_class(&self) -> &ClassName {
        &self.0.assignment
    }

    /// Most specific concrete nominal type a value of this type is guaranteed to be.
    #[inline]
    pub fn retrieval_class(&self) -> &ClassName {
        &self.0.retrieval
    }

    /// The nominal type left after discarding all type arguments.
    ///
    /// Arrays erase to a synthetic array name, wildcards to their upper bound,
    /// variables to their first bound; both fall back to the top type. This
    /// coincides with the retrieval class.
    pub fn erasure(&self) -> ClassName {
        self.0.retrieval.clone()
    }

    /// Raw class of a `Raw` or `Parameterized` node.
    pub fn raw_class(&self) -> Option<&ClassName> {
        match &self.0.kind {
            TypeKind::Raw(class) => Some(class),
            TypeKind::Parameterized { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Type arguments of a `Parameterized` node (empty otherwise).
    pub fn type_args(&self) -> &[TypeNode] {
        match &self.0.kind {
            TypeKind::Parameterized { args, .. } => args,
            _ => &[],
        }
    }

    /// Number of type arguments.
    pub fn type_arg_count(&self) -> usize {
        self.type_args().len()
    }

    /// Type argument at `index`.
    pub fn type_arg(&self, index: usize) -> Option<&TypeNode> {
        self.type_args().get(index)
    }

    /// Element node of an `Array`.
    pub fn array_component(&self) -> Option<&TypeNode> {
        match &self.0.kind {
            TypeKind::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Wildcard payload, if this is a wildcard.
    pub fn as_wildcard(&self) -> Option<&Wildcard> {
        match &self.0.kind {
            TypeKind::Wildcard(w) => Some(w),
            _ => None,
        }
    }

    /// Variable payload, if this is a type variable.
    pub fn as_variable(&self) -> Option<&TypeVariable> {
        match &self.0.kind {
            TypeKind::Variable(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn is_raw(&self) -> bool {
        matches!(self.0.kind, TypeKind::Raw(_))
    }

    #[inline]
    pub fn is_parameterized(&self) -> bool {
        matches!(self.0.kind, TypeKind::Parameterized { .. })
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self.0.kind, TypeKind::Array(_))
    }

    #[inline]
    pub fn is_wildcard(&self) -> bool {
        matches!(self.0.kind, TypeKind::Wildcard(_))
    }

    #[inline]
    pub fn is_variable(&self) -> bool {
        matches!(self.0.kind, TypeKind::Variable(_))
    }

    /// Whether any part of this type carries generic information
    /// (arguments, wildcards or variables).
    pub fn is_generic(&self) -> bool {
        match &self.0.kind {
            TypeKind::Raw(_) => false,
            TypeKind::Array(component) => component.is_generic(),
            TypeKind::Parameterized { .. } | TypeKind::Wildcard(_) | TypeKind::Variable(_) => true,
        }
    }

    /// Innermost non-array component (the node itself for non-arrays).
    pub fn leaf_component(&self) -> &TypeNode {
        let mut current = self;
        while let Some(component) = current.array_component() {
            current = component;
        }
        current
    }
}

impl PartialEq for TypeNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.kind == other.0.kind
    }
}

impl Eq for TypeNode {}

impl Hash for TypeNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.kind.hash(state);
    }
}

impl fmt::Debug for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            TypeKind::Raw(class) => write!(f, "Raw({class})"),
            TypeKind::Parameterized { raw, args } => {
                write!(f, "Parameterized({raw}, ")?;
                f.debug_list().entries(args).finish()?;
                f.write_str(")")
            }
            TypeKind::Array(component) => write!(f, "Array({component:?})"),
            TypeKind::Wildcard(w) => match (&w.upper, &w.lower) {
                (Some(u), _) => write!(f, "Wildcard(extends {u:?})"),
                (_, Some(l)) => write!(f, "Wildcard(super {l:?})"),
                _ => f.write_str("Wildcard"),
            },
            TypeKind::Variable(v) => write!(f, "Variable({}::{})", v.owner, v.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string() -> TypeNode {
        TypeNode::raw("java.lang.String")
    }

    fn number() -> TypeNode {
        TypeNode::raw("java.lang.Number")
    }

    #[test]
    fn raw_and_parameterized_classes() {
        let list = TypeNode::parameterized("java.util.List", vec![string()]);
        assert_eq!(list.assignment_class(), "java.util.List");
        assert_eq!(list.retrieval_class(), "java.util.List");
        assert_eq!(list.erasure(), "java.util.List");
        assert_eq!(list.type_arg_count(), 1);
        assert_eq!(list.type_arg(0), Some(&string()));
        assert_eq!(list.type_arg(1), None);
        assert!(list.is_generic());
        assert!(!string().is_generic());
    }

    #[test]
    fn array_classes() {
        let array = TypeNode::array(string());
        assert_eq!(array.erasure(), "java.lang.String[]");
        assert_eq!(array.array_component(), Some(&string()));
        assert_eq!(array.type_arg_count(), 0);

        let generic = TypeNode::array(TypeNode::parameterized("java.util.List", vec![string()]));
        assert_eq!(generic.erasure(), "java.util.List[]");
        assert!(generic.is_generic());

        let nested = TypeNode::array(array.clone());
        assert_eq!(nested.leaf_component(), &string());
    }

    #[test]
    fn wildcard_classes() {
        let extends = TypeNode::wildcard_extends(number());
        assert_eq!(extends.retrieval_class(), "java.lang.Number");
        assert_eq!(extends.assignment_class(), "java.lang.Number");

        let sup = TypeNode::wildcard_super(TypeNode::raw("java.lang.Integer"));
        assert_eq!(sup.retrieval_class(), "java.lang.Object");
        assert_eq!(sup.assignment_class(), "java.lang.Integer");
        assert_eq!(sup.erasure(), "java.lang.Object");

        let any = TypeNode::unbounded();
        assert!(any.as_wildcard().is_some_and(Wildcard::is_unbounded));
        assert!(any.erasure().is_object());
    }

    #[test]
    fn wildcard_rejects_both_bounds() {
        let err = TypeNode::wildcard(Some(number()), Some(string())).unwrap_err();
        assert!(matches!(err, TypeResolutionError::InvalidWildcard { .. }));
        assert!(TypeNode::wildcard(None, Some(string())).is_ok());
    }

    #[test]
    fn variable_falls_back_to_bound() {
        let owner = ClassName::new("demo.Box");
        let bounded = TypeNode::variable("T", owner.clone(), vec![number()]);
        assert_eq!(bounded.retrieval_class(), "java.lang.Number");
        assert_eq!(bounded.erasure(), "java.lang.Number");

        let free = TypeNode::variable("T", owner, vec![]);
        assert!(free.retrieval_class().is_object());
    }

    #[test]
    fn structural_equality() {
        let a = TypeNode::parameterized("java.util.List", vec![string()]);
        let b = TypeNode::parameterized("java.util.List", vec![string()]);
        let c = TypeNode::parameterized("java.util.List", vec![number()]);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn nodes_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypeNode>();
    }
}

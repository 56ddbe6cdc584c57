//! Registry-backed structural queries: element and key types.
//!
//! Which argument holds the element (or key) is decided by the
//! [`Capability`] tag of the nearest tagged class in the node's ancestry,
//! so `class Names extends ArrayList<String>` still reports `String`.

use genus_core::{TypeKind, TypeNode, TypeResolutionError};
use genus_registry::Capability;

use crate::resolver::TypeResolver;

impl<'a> TypeResolver<'a> {
    /// Element type of an array, container or associative structure (the
    /// value type for the latter).
    ///
    /// Returns `Ok(None)` for types with no element.
    pub fn component_type(&self, node: &TypeNode) -> Result<Option<TypeNode>, TypeResolutionError> {
        match node.kind() {
            TypeKind::Array(component) => Ok(Some(component.clone())),
            TypeKind::Raw(_) | TypeKind::Parameterized { .. } => {
                self.capability_argument(node, |capability| Some(capability.element_index()))
            }
            TypeKind::Wildcard(_) | TypeKind::Variable(_) => match upper_bound(node) {
                Some(upper) => self.component_type(upper),
                None => Ok(None),
            },
        }
    }

    /// Key type of an associative structure.
    pub fn key_type(&self, node: &TypeNode) -> Result<Option<TypeNode>, TypeResolutionError> {
        match node.kind() {
            TypeKind::Raw(_) | TypeKind::Parameterized { .. } => {
                self.capability_argument(node, Capability::key_index)
            }
            TypeKind::Wildcard(_) | TypeKind::Variable(_) => match upper_bound(node) {
                Some(upper) => self.key_type(upper),
                None => Ok(None),
            },
            TypeKind::Array(_) => Ok(None),
        }
    }

    fn capability_argument(
        &self,
        node: &TypeNode,
        position: impl Fn(Capability) -> Option<usize>,
    ) -> Result<Option<TypeNode>, TypeResolutionError> {
        let Some(raw) = node.raw_class() else {
            return Ok(None);
        };
        let Some(owner) = self.registry().capability_owner(raw) else {
            return Ok(None);
        };
        let Some(param) = owner
            .capability
            .and_then(position)
            .and_then(|index| owner.type_params.get(index))
        else {
            return Ok(None);
        };

        let map = self.substitution_map(node)?;
        Ok(map.get(&owner.name, &param.name).cloned())
    }
}

fn upper_bound(node: &TypeNode) -> Option<&TypeNode> {
    match node.kind() {
        TypeKind::Wildcard(wildcard) => wildcard.upper(),
        TypeKind::Variable(var) => var.bounds.first(),
        _ => None,
    }
}

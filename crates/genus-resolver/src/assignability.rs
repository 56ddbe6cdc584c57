//! Assignability between type nodes.
//!
//! [`AssignabilityChecker::is_assignable_from`] answers whether a value of
//! the candidate type can be used where the target type is expected:
//!
//! 1. the candidate's erasure must be a nominal subtype of the target's;
//! 2. a target without type arguments accepts any such candidate;
//! 3. a parameterized target views the candidate as an instantiation of the
//!    target's raw type (through the candidate's substitution map) and
//!    compares arguments: exact arguments are invariant, `? extends U` is
//!    covariant, `? super L` is contravariant, `?` matches anything;
//! 4. arrays match arrays with assignable components.
//!
//! The predicate is total: failures inside (such as a resolution error
//! while building a substitution map) answer `false`.

use tracing::trace;

use genus_core::{ClassName, TypeKind, TypeNode, Wildcard};

use crate::resolver::TypeResolver;

/// Structural/variant compatibility checks.
#[derive(Debug, Clone, Copy)]
pub struct AssignabilityChecker<'a> {
    resolver: TypeResolver<'a>,
}

impl<'a> AssignabilityChecker<'a> {
    pub fn new(resolver: TypeResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Can a value of type `candidate` be used where `target` is expected?
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn is_assignable_from(&self, target: &TypeNode, candidate: &TypeNode) -> bool {
        let result = self.check(target, candidate, 0);
        trace!(target = ?target, candidate = ?candidate, result, "assignability");
        result
    }

    /// Structural equality with class names compared in canonical form.
    pub fn same_type(&self, a: &TypeNode, b: &TypeNode) -> bool {
        if a == b {
            return true;
        }
        match (a.kind(), b.kind()) {
            (TypeKind::Raw(x), TypeKind::Raw(y)) => self.same_class(x, y),
            (
                TypeKind::Parameterized { raw: x, args: xs },
                TypeKind::Parameterized { raw: y, args: ys },
            ) => {
                self.same_class(x, y)
                    && xs.len() == ys.len()
                    && xs.iter().zip(ys).all(|(x, y)| self.same_type(x, y))
            }
            (TypeKind::Array(x), TypeKind::Array(y)) => self.same_type(x, y),
            (TypeKind::Wildcard(x), TypeKind::Wildcard(y)) => {
                self.same_bound(x.upper(), y.upper()) && self.same_bound(x.lower(), y.lower())
            }
            (TypeKind::Variable(x), TypeKind::Variable(y)) => {
                x.name == y.name && self.same_class(&x.owner, &y.owner)
            }
            _ => false,
        }
    }

    fn same_bound(&self, a: Option<&TypeNode>, b: Option<&TypeNode>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => self.same_type(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn same_class(&self, a: &ClassName, b: &ClassName) -> bool {
        let registry = self.resolver.registry();
        a == b || registry.canonical(a) == registry.canonical(b)
    }

    fn check(&self, target: &TypeNode, candidate: &TypeNode, depth: usize) -> bool {
        if depth > self.resolver.config().max_depth {
            return false;
        }
        if self.same_type(target, candidate) {
            return true;
        }
        let depth = depth + 1;

        // Wildcard and variable targets
        match target.kind() {
            TypeKind::Wildcard(wildcard) => {
                return match (wildcard.upper(), wildcard.lower()) {
                    (Some(upper), _) => self.check(upper, candidate, depth),
                    (_, Some(lower)) => self.check(candidate, lower, depth),
                    (None, None) => true,
                };
            }
            TypeKind::Variable(var) => {
                return if var.bounds.is_empty() {
                    self.check(&object(), candidate, depth)
                } else {
                    var.bounds.iter().all(|b| self.check(b, candidate, depth))
                };
            }
            _ => {}
        }

        // Wildcard and variable candidates are seen through their upper bound
        match candidate.kind() {
            TypeKind::Wildcard(wildcard) => {
                let upper = wildcard.upper().cloned().unwrap_or_else(object);
                return self.check(target, &upper, depth);
            }
            TypeKind::Variable(var) => {
                let upper = var.bounds.first().cloned().unwrap_or_else(object);
                return self.check(target, &upper, depth);
            }
            _ => {}
        }

        // Nominal fast path on erasures
        let registry = self.resolver.registry();
        if !registry.is_subclass(&candidate.erasure(), &target.erasure()) {
            return false;
        }

        match target.kind() {
            TypeKind::Raw(_) => true,
            TypeKind::Array(target_component) => {
                if !target.is_generic() {
                    return true;
                }
                let Some(candidate_component) = candidate.array_component() else {
                    return false;
                };
                if candidate_component
                    .raw_class()
                    .is_some_and(|class| registry.is_primitive(class))
                {
                    return false;
                }
                self.check(target_component, candidate_component, depth)
            }
            TypeKind::Parameterized { raw, args } => {
                self.check_parameterized(raw, args, candidate, depth)
            }
            TypeKind::Wildcard(_) | TypeKind::Variable(_) => false,
        }
    }

    fn check_parameterized(
        &self,
        raw: &ClassName,
        target_args: &[TypeNode],
        candidate: &TypeNode,
        depth: usize,
    ) -> bool {
        let registry = self.resolver.registry();
        match candidate.kind() {
            // unchecked conversion from a raw generic class
            TypeKind::Raw(class) if registry.arity(class).is_some_and(|arity| arity > 0) => {
                return true;
            }
            TypeKind::Raw(_) | TypeKind::Parameterized { .. } => {}
            _ => return false,
        }

        let canonical = registry.canonical(raw);
        let view = match self.resolver.substitution_map(candidate) {
            Ok(map) => map.supertype(&canonical).cloned(),
            Err(err) => {
                trace!(%err, "candidate substitution map failed");
                None
            }
        };
        let Some(view) = view else {
            return false;
        };
        if view.is_raw() {
            // reached through a raw supertype
            return true;
        }

        let candidate_args = view.type_args();
        candidate_args.len() == target_args.len()
            && target_args
                .iter()
                .zip(candidate_args)
                .all(|(t, c)| self.argument_matches(t, c, depth))
    }

    /// Does type argument `candidate` satisfy target argument `target`?
    fn argument_matches(&self, target: &TypeNode, candidate: &TypeNode, depth: usize) -> bool {
        let Some(wildcard) = target.as_wildcard() else {
            return self.same_type(target, candidate);
        };
        match (wildcard.upper(), wildcard.lower()) {
            (None, None) => true,
            (Some(upper), _) => match candidate.as_wildcard() {
                Some(cw) => {
                    let candidate_upper = cw.upper().cloned().unwrap_or_else(object);
                    self.check(upper, &candidate_upper, depth)
                }
                None => self.check(upper, candidate, depth),
            },
            (_, Some(lower)) => match candidate.as_wildcard().map(Wildcard::lower) {
                Some(Some(candidate_lower)) => self.check(candidate_lower, lower, depth),
                Some(None) => false,
                None => self.check(candidate, lower, depth),
            },
        }
    }
}

fn object() -> TypeNode {
    TypeNode::raw(ClassName::object())
}

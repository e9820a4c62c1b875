//! The nominal-type graph as seen by the solver.
//!
//! The binder owns classes, interfaces and enums; the solver only needs to
//! walk their supertypes and read their declared property types.

use crate::instantiate::{instantiate_ref, substitution_for};
use crate::intern::TypeInterner;
use crate::types::{EnumId, NominalId, NominalRef, TypeId};
use gti_common::limits::MAX_SUBTYPE_DEPTH;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

pub trait NominalHierarchy {
    /// Super class first, then interfaces. Type arguments are expressed in
    /// terms of `id`'s own type parameters.
    fn direct_supertypes(&self, id: NominalId) -> Vec<NominalRef>;

    fn type_parameters(&self, id: NominalId) -> Vec<String>;

    fn is_interface(&self, id: NominalId) -> bool;

    fn nominal_name(&self, id: NominalId) -> String;

    /// Declared type of an instance property, own or inherited, in terms of
    /// `id`'s own type parameters.
    fn instance_property(&self, id: NominalId, name: &str) -> Option<TypeId>;

    fn enum_name(&self, id: EnumId) -> String;

    fn enum_element_type(&self, id: EnumId) -> Option<TypeId>;
}

/// Find `target` among the (reflexive, transitive) supertypes of `start`,
/// substituting type arguments along the path.
pub fn find_ancestor(
    interner: &TypeInterner,
    hierarchy: &dyn NominalHierarchy,
    start: &NominalRef,
    target: NominalId,
) -> Option<NominalRef> {
    let mut queue = VecDeque::from([(start.clone(), 0u32)]);
    let mut seen = FxHashSet::default();
    while let Some((current, depth)) = queue.pop_front() {
        if current.id == target {
            return Some(current);
        }
        if depth >= MAX_SUBTYPE_DEPTH || !seen.insert(current.id) {
            continue;
        }
        let subst = substitution_for(
            &hierarchy.type_parameters(current.id),
            &current.type_args,
        );
        for sup in hierarchy.direct_supertypes(current.id) {
            queue.push_back((instantiate_ref(interner, &sup, &subst), depth + 1));
        }
    }
    None
}

/// Whether `sub` is `sup` or (transitively) extends or implements it.
pub fn is_nominal_descendant(
    interner: &TypeInterner,
    hierarchy: &dyn NominalHierarchy,
    sub: NominalId,
    sup: NominalId,
) -> bool {
    find_ancestor(interner, hierarchy, &NominalRef::new(sub), sup).is_some()
}

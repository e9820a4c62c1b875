//! Meets and joins over candidate sets.
//!
//! A meet of a set is its unique minimum: the candidate that is a subtype of
//! every other candidate. Candidates are canonicalized (sorted, deduplicated)
//! first, so the result never depends on the order they were collected in.
//! When no minimum exists the set is incompatible.

use crate::subtype::SubtypeChecker;
use crate::types::TypeId;

/// Unique minimum of `candidates`, `Some(TOP)` for an empty set, `None`
/// when the candidates are incompatible.
pub fn meet_all(checker: &SubtypeChecker<'_>, candidates: &[TypeId]) -> Option<TypeId> {
    let mut set = candidates.to_vec();
    set.sort_unstable();
    set.dedup();
    match set.as_slice() {
        [] => Some(TypeId::TOP),
        [only] => Some(*only),
        _ => set
            .iter()
            .copied()
            .find(|&c| set.iter().all(|&other| checker.is_subtype(c, other))),
    }
}

/// Least upper bound as a normalized union.
pub fn join_all(checker: &SubtypeChecker<'_>, candidates: &[TypeId]) -> TypeId {
    checker.interner().union(candidates.iter().copied())
}

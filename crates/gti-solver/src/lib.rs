//! Declared types for the global type info builder.
//!
//! Types are interned: a [`TypeId`] is a small copyable handle and equal
//! structures get equal ids, so structural equality is id equality.
//!
//! - `types`: ids and the interned `TypeData`
//! - `intern`: the `TypeInterner` and normalizing constructors
//! - `hierarchy`: the nominal-type graph as seen by the solver
//! - `subtype`: the subtype relation
//! - `meet`: order-independent meets over candidate sets
//! - `function`: declared function signatures
//! - `instantiate`: type-variable substitution
//! - `format`: display for diagnostics

pub mod format;
pub mod function;
pub mod hierarchy;
mod instantiate;
mod intern;
pub mod meet;
pub mod subtype;
pub mod types;

pub use format::TypeFormatter;
pub use function::DeclaredFunctionType;
pub use hierarchy::{NominalHierarchy, find_ancestor};
pub use instantiate::{TypeSubstitution, instantiate_ref, instantiate_type, substitution_for};
pub use intern::TypeInterner;
pub use meet::{join_all, meet_all};
pub use subtype::SubtypeChecker;
pub use types::{EnumId, FunctionShape, IntrinsicKind, NominalId, NominalRef, TypeData, TypeId};

#[cfg(test)]
#[path = "tests/test_hierarchy.rs"]
mod test_hierarchy;

#[cfg(test)]
#[path = "tests/intern_tests.rs"]
mod intern_tests;

#[cfg(test)]
#[path = "tests/subtype_tests.rs"]
mod subtype_tests;

#[cfg(test)]
#[path = "tests/function_tests.rs"]
mod function_tests;

//! Global type info: the declared-type environment of a program.
//!
//! Given a lowered [`gti_ast::Program`], the builder
//! 1. creates a scope per function and collects the named types each scope
//!    declares (namespaces, typedefs, enums, classes, interfaces),
//! 2. declares locals, function signatures and the properties of
//!    namespaces and nominal types,
//! 3. finalizes classes and interfaces supertypes-first, merging and
//!    checking inherited properties.
//!
//! Problems in the analyzed code become [`gti_common::Diagnostic`]s; a
//! [`GtiError`] means a broken precondition and stops the run.

pub mod context;
pub mod error;
pub mod namespace;
pub mod nominal;
pub mod options;
pub mod property_def;
pub mod registry;
pub mod resolver;
pub mod scope;
pub mod state;
mod state_collect;
mod state_const_infer;
mod state_declare;
mod state_finalize;
mod state_function_type;
pub mod type_table;

pub use context::CompilationContext;
pub use error::{GtiError, GtiResult};
pub use namespace::{EnumType, Namespace, NamespaceId, NamespaceKind, NamespaceProperty, Typedef, TypedefId};
pub use nominal::{NominalHeader, NominalKind, NominalProperty, NominalState, NominalType, ObjectShape, RawNominalType};
pub use options::{CodingConvention, EnumKeyStyle, GlobalTypeInfoOptions};
pub use property_def::{PropertyDef, PropertyDefs};
pub use registry::{DeclaredTypeRegistry, ScopeView};
pub use resolver::{DeclaredTypeResolver, JsDocTypeResolver, ResolveContext};
pub use scope::{Binding, Scope, ScopeId, ScopeTree};
pub use state::{FinalizeStats, GlobalTypeInfo, GlobalTypeInfoBuilder, process};
pub use type_table::TypeTable;

#[cfg(test)]
#[path = "tests/finalize_ceiling_tests.rs"]
mod finalize_ceiling_tests;

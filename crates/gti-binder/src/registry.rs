//! Name lookups available to a declared-type resolver.

use crate::namespace::{Typedef, TypedefId};
use crate::scope::{ScopeId, ScopeTree};
use crate::type_table::TypeTable;
use gti_common::QualifiedName;
use gti_solver::{EnumId, NominalId, TypeInterner};

/// What a resolver may ask about the names visible at a resolution site.
pub trait DeclaredTypeRegistry {
    fn interner(&self) -> &TypeInterner;

    fn lookup_nominal(&self, name: &QualifiedName) -> Option<NominalId>;

    fn lookup_typedef(&self, name: &QualifiedName) -> Option<TypedefId>;

    fn lookup_enum(&self, name: &QualifiedName) -> Option<EnumId>;

    fn typedef(&self, id: TypedefId) -> &Typedef;

    fn nominal_type_parameters(&self, id: NominalId) -> &[String];

    /// Template names of the enclosing functions.
    fn is_type_variable(&self, name: &str) -> bool;
}

/// Lookups from one scope.
pub struct ScopeView<'a> {
    scopes: &'a ScopeTree,
    table: &'a TypeTable,
    interner: &'a TypeInterner,
    scope: ScopeId,
    type_variables: Vec<String>,
}

impl<'a> ScopeView<'a> {
    pub fn new(scopes: &'a ScopeTree, table: &'a TypeTable, interner: &'a TypeInterner, scope: ScopeId) -> Self {
        Self {
            scopes,
            table,
            interner,
            scope,
            type_variables: scopes.type_variables(scope),
        }
    }
}

impl DeclaredTypeRegistry for ScopeView<'_> {
    fn interner(&self) -> &TypeInterner {
        self.interner
    }

    fn lookup_nominal(&self, name: &QualifiedName) -> Option<NominalId> {
        self.scopes.get_nominal_type(self.scope, name, self.table)
    }

    fn lookup_typedef(&self, name: &QualifiedName) -> Option<TypedefId> {
        self.scopes.get_typedef(self.scope, name, self.table)
    }

    fn lookup_enum(&self, name: &QualifiedName) -> Option<EnumId> {
        self.scopes.get_enum(self.scope, name, self.table)
    }

    fn typedef(&self, id: TypedefId) -> &Typedef {
        self.table.typedef(id)
    }

    fn nominal_type_parameters(&self, id: NominalId) -> &[String] {
        &self.table.nominal(id).header().type_parameters
    }

    fn is_type_variable(&self, name: &str) -> bool {
        self.type_variables.iter().any(|v| v == name)
    }
}

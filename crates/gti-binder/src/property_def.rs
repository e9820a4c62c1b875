//! Where each class or interface property was defined.

use crate::scope::ScopeId;
use gti_ast::NodeIndex;
use gti_solver::{DeclaredFunctionType, NominalId};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

#[derive(Clone, Debug)]
pub struct PropertyDef {
    pub def_site: NodeIndex,
    /// Set when the property is a method.
    pub method_type: Option<DeclaredFunctionType>,
    pub method_scope: Option<ScopeId>,
}

impl PropertyDef {
    pub fn new(def_site: NodeIndex) -> Self {
        Self {
            def_site,
            method_type: None,
            method_scope: None,
        }
    }

    pub fn method(def_site: NodeIndex, method_type: DeclaredFunctionType, method_scope: ScopeId) -> Self {
        Self {
            def_site,
            method_type: Some(method_type),
            method_scope: Some(method_scope),
        }
    }

    pub fn is_method(&self) -> bool {
        self.method_type.is_some()
    }
}

/// One definition per (nominal type, property name).
#[derive(Clone, Debug, Default)]
pub struct PropertyDefs {
    defs: FxHashMap<NominalId, IndexMap<String, PropertyDef>>,
}

impl PropertyDefs {
    pub fn get(&self, owner: NominalId, name: &str) -> Option<&PropertyDef> {
        self.defs.get(&owner)?.get(name)
    }

    pub fn get_mut(&mut self, owner: NominalId, name: &str) -> Option<&mut PropertyDef> {
        self.defs.get_mut(&owner)?.get_mut(name)
    }

    pub fn contains(&self, owner: NominalId, name: &str) -> bool {
        self.get(owner, name).is_some()
    }

    pub fn insert(&mut self, owner: NominalId, name: &str, def: PropertyDef) {
        self.defs.entry(owner).or_default().insert(name.to_string(), def);
    }

    /// Property names defined on `owner`, in definition order.
    pub fn names(&self, owner: NominalId) -> Vec<String> {
        self.defs
            .get(&owner)
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.defs.clear();
    }
}

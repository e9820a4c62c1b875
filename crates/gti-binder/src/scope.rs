//! Lexical scopes.
//!
//! Scopes live in a [`ScopeTree`] arena and point at their parent by id.
//! Each scope binds a name to exactly one [`Binding`] kind; binding the same
//! name again with another kind is a fatal error.

use crate::error::{GtiError, GtiResult};
use crate::namespace::{NamespaceId, TypedefId};
use crate::type_table::TypeTable;
use gti_ast::NodeIndex;
use gti_common::QualifiedName;
use gti_solver::{DeclaredFunctionType, EnumId, NominalId, TypeId, TypeInterner};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashSet;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScopeId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    /// `None`: a known local whose type is not determined yet.
    Local(Option<TypeId>),
    /// A function declared in this scope; `nominal` is set for
    /// constructors and interfaces.
    Function {
        scope: ScopeId,
        nominal: Option<NominalId>,
    },
    Namespace(NamespaceId),
    Typedef(TypedefId),
    Enum(EnumId),
}

impl Binding {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Local(_) => "local",
            Self::Function { .. } => "function",
            Self::Namespace(_) => "namespace",
            Self::Typedef(_) => "typedef",
            Self::Enum(_) => "enum",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    /// The script or function literal this scope belongs to.
    pub root: NodeIndex,
    /// Name on the function literal, if any.
    pub name: Option<String>,
    pub formals: Vec<String>,
    pub is_constructor: bool,
    pub is_interface: bool,
    pub is_prototype_method: bool,
    /// Set for every function scope by the declaration pass.
    pub declared_type: Option<DeclaredFunctionType>,
    bindings: IndexMap<String, Binding>,
    /// Functions registered under a generated name.
    synthesized: IndexMap<String, ScopeId>,
    const_vars: FxHashSet<String>,
    outer_vars: IndexSet<String>,
    /// Enums declared under a namespace path in this scope.
    pub(crate) qualified_enums: Vec<EnumId>,
    pub(crate) typedefs: Vec<TypedefId>,
    pub(crate) enums: Vec<EnumId>,
}

impl Scope {
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_function(&self) -> bool {
        self.parent.is_some()
    }

    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_formal(&self, name: &str) -> bool {
        self.formals.iter().any(|f| f == name)
    }

    pub fn is_defined_locally(&self, name: &str) -> bool {
        name == "this"
            || self.bindings.contains_key(name)
            || self.is_formal(name)
            || self.synthesized.contains_key(name)
    }

    pub fn is_local_function(&self, name: &str) -> bool {
        matches!(self.bindings.get(name), Some(Binding::Function { .. }))
    }

    /// Scope of a function declared here, under its source name or a
    /// generated one.
    pub fn local_function_scope(&self, name: &str) -> Option<ScopeId> {
        match self.bindings.get(name) {
            Some(Binding::Function { scope, .. }) => Some(*scope),
            _ => self.synthesized.get(name).copied(),
        }
    }

    pub fn is_const_var(&self, name: &str) -> bool {
        self.const_vars.contains(name)
    }

    pub fn outer_vars(&self) -> impl Iterator<Item = &str> {
        self.outer_vars.iter().map(String::as_str)
    }

    pub fn is_outer_var(&self, name: &str) -> bool {
        self.outer_vars.contains(name)
    }

    pub(crate) fn add_outer_var(&mut self, name: &str) {
        if !self.outer_vars.contains(name) {
            self.outer_vars.insert(name.to_string());
        }
    }

    fn bind(&mut self, name: &str, binding: Binding) -> GtiResult<()> {
        if let Some(existing) = self.bindings.get(name) {
            return Err(GtiError::DuplicateBinding {
                name: name.to_string(),
                existing: existing.kind_name(),
                added: binding.kind_name(),
            });
        }
        self.bindings.insert(name.to_string(), binding);
        Ok(())
    }

    pub(crate) fn add_local(&mut self, name: &str, ty: Option<TypeId>, is_const: bool) -> GtiResult<()> {
        self.bind(name, Binding::Local(ty))?;
        if is_const {
            self.const_vars.insert(name.to_string());
        }
        Ok(())
    }

    pub(crate) fn add_function(&mut self, name: &str, scope: ScopeId) -> GtiResult<()> {
        self.bind(name, Binding::Function { scope, nominal: None })
    }

    pub(crate) fn add_synthesized_function(&mut self, name: &str, scope: ScopeId) {
        self.synthesized.insert(name.to_string(), scope);
    }

    pub(crate) fn set_function_nominal(&mut self, name: &str, id: NominalId) {
        if let Some(Binding::Function { nominal, .. }) = self.bindings.get_mut(name) {
            *nominal = Some(id);
        }
    }

    pub(crate) fn add_namespace(&mut self, name: &str, id: NamespaceId) -> GtiResult<()> {
        self.bind(name, Binding::Namespace(id))
    }

    pub(crate) fn add_typedef(&mut self, name: &str, id: TypedefId) -> GtiResult<()> {
        self.bind(name, Binding::Typedef(id))?;
        self.typedefs.push(id);
        Ok(())
    }

    pub(crate) fn add_enum(&mut self, name: &str, id: EnumId) -> GtiResult<()> {
        self.bind(name, Binding::Enum(id))?;
        self.enums.push(id);
        Ok(())
    }
}

/// Arena of scopes. The top-level scope is created first.
#[derive(Clone, Debug, Default)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn create(
        &mut self,
        parent: Option<ScopeId>,
        root: NodeIndex,
        name: Option<String>,
        formals: Vec<String>,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            id,
            parent,
            root,
            name,
            formals,
            is_constructor: false,
            is_interface: false,
            is_prototype_method: false,
            declared_type: None,
            bindings: IndexMap::new(),
            synthesized: IndexMap::new(),
            const_vars: FxHashSet::default(),
            outer_vars: IndexSet::new(),
            qualified_enums: Vec::new(),
            typedefs: Vec::new(),
            enums: Vec::new(),
        });
        id
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    pub(crate) fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.0 as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    /// `id` and its ancestors, innermost first.
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = &Scope> {
        std::iter::successors(Some(self.get(id)), |s| s.parent.map(|p| self.get(p)))
    }

    /// Whether `name` resolves in `id` or an enclosing scope.
    pub fn is_visible(&self, id: ScopeId, name: &str) -> bool {
        self.ancestors(id)
            .any(|s| s.is_defined_locally(name) || s.name.as_deref() == Some(name))
    }

    /// A free name of `id` that an enclosing scope defines.
    pub fn is_outer_var_early(&self, id: ScopeId, name: &str) -> bool {
        let scope = self.get(id);
        !scope.is_defined_locally(name)
            && scope.name.as_deref() != Some(name)
            && scope.parent.is_some_and(|p| self.is_visible(p, name))
    }

    /// The binding `name` resolves to, with the scope holding it.
    pub fn lookup(&self, id: ScopeId, name: &str) -> Option<(ScopeId, &Binding)> {
        self.ancestors(id)
            .find_map(|s| s.binding(name).map(|b| (s.id, b)))
    }

    /// Namespace named by a simple name: a namespace literal, a class or
    /// interface, or an enum. Shadowing by any other kind hides outer ones.
    pub fn get_namespace(&self, id: ScopeId, name: &str, table: &TypeTable) -> Option<NamespaceId> {
        for scope in self.ancestors(id) {
            match scope.binding(name) {
                Some(Binding::Namespace(ns)) => return Some(*ns),
                Some(Binding::Function {
                    nominal: Some(nominal),
                    ..
                }) => return Some(table.nominal_namespace(*nominal)),
                Some(Binding::Enum(e)) => return Some(table.enum_namespace(*e)),
                Some(_) => return None,
                None if scope.is_formal(name) => return None,
                None => {}
            }
        }
        None
    }

    pub fn namespace_of(&self, id: ScopeId, name: &QualifiedName, table: &TypeTable) -> Option<NamespaceId> {
        let root = self.get_namespace(id, name.leftmost(), table)?;
        table.descend(root, name.segments().skip(1))
    }

    /// Whether `name` is defined: locally for a simple name, as a namespace
    /// member for a dotted one.
    pub fn is_defined(&self, id: ScopeId, name: &QualifiedName, table: &TypeTable) -> bool {
        match name.all_but_leftmost() {
            None => self.get(id).is_defined_locally(name.leftmost()),
            Some(rest) => self
                .get_namespace(id, name.leftmost(), table)
                .is_some_and(|ns| table.is_defined_at(ns, &rest)),
        }
    }

    pub fn get_nominal_type(&self, id: ScopeId, name: &QualifiedName, table: &TypeTable) -> Option<NominalId> {
        self.namespace_of(id, name, table)
            .and_then(|ns| table.nominal_of_namespace(ns))
    }

    pub fn get_enum(&self, id: ScopeId, name: &QualifiedName, table: &TypeTable) -> Option<EnumId> {
        self.namespace_of(id, name, table)
            .and_then(|ns| table.enum_of_namespace(ns))
    }

    pub fn get_typedef(&self, id: ScopeId, name: &QualifiedName, table: &TypeTable) -> Option<TypedefId> {
        match name.all_but_leftmost() {
            None => match self.lookup(id, name.leftmost()) {
                Some((_, Binding::Typedef(td))) => Some(*td),
                _ => None,
            },
            Some(rest) => {
                let root = self.get_namespace(id, name.leftmost(), table)?;
                table.typedef_at(root, &rest)
            }
        }
    }

    /// Template names visible in `id`: its own and those of enclosing
    /// function scopes.
    pub fn type_variables(&self, id: ScopeId) -> Vec<String> {
        self.ancestors(id)
            .filter_map(|s| s.declared_type.as_ref())
            .flat_map(|d| d.type_parameters.iter().cloned())
            .collect()
    }

    /// Declared type of `name` as seen from `id`: `this`, formals, locals,
    /// functions and namespaces of each scope from the inside out.
    pub fn declared_type_of(
        &self,
        id: ScopeId,
        name: &str,
        table: &TypeTable,
        interner: &TypeInterner,
    ) -> Option<TypeId> {
        for scope in self.ancestors(id) {
            if name == "this" {
                return scope
                    .declared_type
                    .as_ref()
                    .and_then(|d| d.this_type.clone())
                    .map(|this| interner.nominal(this));
            }
            if let Some(index) = scope.formals.iter().position(|f| f == name) {
                return scope
                    .declared_type
                    .as_ref()
                    .and_then(|d| d.formal_type(index));
            }
            match scope.binding(name) {
                Some(Binding::Local(ty)) => return *ty,
                Some(Binding::Function { scope: fun, .. }) => {
                    return self
                        .get(*fun)
                        .declared_type
                        .as_ref()
                        .map(|d| d.to_function_type(interner));
                }
                Some(Binding::Namespace(ns)) => return Some(table.namespace_type(interner, *ns)),
                Some(Binding::Enum(e)) => {
                    return Some(table.namespace_type(interner, table.enum_namespace(*e)));
                }
                Some(Binding::Typedef(_)) => return None,
                None => {}
            }
            if scope.name.as_deref() == Some(name) {
                return scope
                    .declared_type
                    .as_ref()
                    .map(|d| d.to_function_type(interner));
            }
        }
        None
    }

    /// Flatten namespace and enum bindings into locals typed with their
    /// object type, drop typedefs and class registrations.
    pub(crate) fn compact(&mut self, id: ScopeId, table: &TypeTable, interner: &TypeInterner) {
        let scope = self.get_mut(id);
        scope.bindings.retain(|_, b| !matches!(b, Binding::Typedef(_)));
        for binding in scope.bindings.values_mut() {
            match binding {
                Binding::Namespace(ns) => *binding = Binding::Local(Some(table.namespace_type(interner, *ns))),
                Binding::Enum(e) => {
                    let ns = table.enum_namespace(*e);
                    *binding = Binding::Local(Some(table.namespace_type(interner, ns)));
                }
                Binding::Function { nominal, .. } => *nominal = None,
                Binding::Local(_) | Binding::Typedef(_) => {}
            }
        }
        scope.qualified_enums.clear();
        scope.typedefs.clear();
        scope.enums.clear();
    }
}

#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod tests;

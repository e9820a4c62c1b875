//! Namespaces: containers of sub-namespaces, typedefs and properties.
//!
//! A namespace is a `/** @const */ var ns = {};` literal, the constructor
//! namespace of a class, or an enum. All three live in the [`TypeTable`] and
//! are addressed by [`NamespaceId`].
//!
//! [`TypeTable`]: crate::type_table::TypeTable

use gti_ast::{NodeIndex, TypeExpr};
use gti_common::QualifiedName;
use gti_solver::{EnumId, NominalId, TypeId};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NamespaceId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypedefId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamespaceKind {
    Literal,
    /// The constructor namespace of a class or interface.
    Nominal(NominalId),
    Enum(EnumId),
}

/// A declared property of a namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NamespaceProperty {
    pub declared_type: TypeId,
    pub is_const: bool,
}

#[derive(Clone, Debug)]
pub struct Namespace {
    pub kind: NamespaceKind,
    pub name: QualifiedName,
    pub def_site: NodeIndex,
    sub_namespaces: IndexMap<String, NamespaceId>,
    typedefs: IndexMap<String, TypedefId>,
    properties: IndexMap<String, NamespaceProperty>,
    undeclared_properties: IndexMap<String, TypeId>,
}

impl Namespace {
    pub fn new(kind: NamespaceKind, name: QualifiedName, def_site: NodeIndex) -> Self {
        Self {
            kind,
            name,
            def_site,
            sub_namespaces: IndexMap::new(),
            typedefs: IndexMap::new(),
            properties: IndexMap::new(),
            undeclared_properties: IndexMap::new(),
        }
    }

    pub fn sub_namespace(&self, name: &str) -> Option<NamespaceId> {
        self.sub_namespaces.get(name).copied()
    }

    pub fn sub_namespaces(&self) -> impl Iterator<Item = (&str, NamespaceId)> {
        self.sub_namespaces.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn typedef(&self, name: &str) -> Option<TypedefId> {
        self.typedefs.get(name).copied()
    }

    pub fn property(&self, name: &str) -> Option<&NamespaceProperty> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &NamespaceProperty)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn undeclared_property(&self, name: &str) -> Option<TypeId> {
        self.undeclared_properties.get(name).copied()
    }

    pub fn undeclared_properties(&self) -> impl Iterator<Item = (&str, TypeId)> {
        self.undeclared_properties
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
    }

    /// Whether `name` is a member of any kind.
    pub fn is_defined(&self, name: &str) -> bool {
        self.sub_namespaces.contains_key(name)
            || self.typedefs.contains_key(name)
            || self.properties.contains_key(name)
            || self.undeclared_properties.contains_key(name)
    }

    pub(crate) fn add_sub_namespace(&mut self, name: &str, id: NamespaceId) {
        self.sub_namespaces.insert(name.to_string(), id);
    }

    pub(crate) fn add_typedef(&mut self, name: &str, id: TypedefId) {
        self.typedefs.insert(name.to_string(), id);
    }

    pub(crate) fn add_property(&mut self, name: &str, declared_type: TypeId, is_const: bool) {
        self.undeclared_properties.shift_remove(name);
        self.properties.insert(
            name.to_string(),
            NamespaceProperty {
                declared_type,
                is_const,
            },
        );
    }

    /// Record a property whose type was guessed. A declared property of the
    /// same name wins.
    pub(crate) fn add_undeclared_property(&mut self, name: &str, guessed: TypeId) {
        if !self.properties.contains_key(name) {
            self.undeclared_properties.insert(name.to_string(), guessed);
        }
    }
}

#[derive(Clone, Debug)]
pub struct Typedef {
    pub name: QualifiedName,
    pub annotation: TypeExpr,
    pub def_site: NodeIndex,
    /// Set once the typedef has been resolved.
    pub resolved: Option<TypeId>,
}

#[derive(Clone, Debug)]
pub struct EnumType {
    pub name: QualifiedName,
    /// `@enum {T}`; `None` means `number`.
    pub declared_annotation: Option<TypeExpr>,
    pub members: Vec<String>,
    /// Resolved `T`.
    pub element_type: Option<TypeId>,
    pub namespace: NamespaceId,
    pub def_site: NodeIndex,
}

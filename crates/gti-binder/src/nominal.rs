//! Classes and interfaces.
//!
//! A nominal type starts as a [`RawNominalType`] that collects its own
//! properties and inheritance edges while the declaration pass runs. The
//! inheritance finalizer then merges inherited properties and moves it to
//! the [`NominalType`] stage, after which it is read-only.

use crate::error::{GtiError, GtiResult};
use crate::namespace::NamespaceId;
use gti_ast::NodeIndex;
use gti_common::QualifiedName;
use gti_solver::{NominalId, NominalRef, TypeId};
use indexmap::{IndexMap, IndexSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NominalKind {
    Class,
    Interface,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectShape {
    Unrestricted,
    Struct,
    Dict,
}

/// One property slot of a nominal type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NominalProperty {
    /// `None`: known to exist, type not declared.
    pub declared_type: Option<TypeId>,
    pub is_const: bool,
    pub on_prototype: bool,
    pub inherited: bool,
}

#[derive(Clone, Debug)]
pub struct NominalHeader {
    pub id: NominalId,
    pub name: QualifiedName,
    pub kind: NominalKind,
    pub shape: ObjectShape,
    pub type_parameters: Vec<String>,
    pub super_class: Option<NominalRef>,
    pub interfaces: IndexSet<NominalRef>,
    pub namespace: NamespaceId,
    /// Value type of the constructor function, once its signature is known.
    pub ctor_fn: Option<TypeId>,
    pub def_site: NodeIndex,
}

impl NominalHeader {
    pub fn is_interface(&self) -> bool {
        self.kind == NominalKind::Interface
    }

    pub fn is_struct(&self) -> bool {
        self.shape == ObjectShape::Struct
    }

    pub fn is_dict(&self) -> bool {
        self.shape == ObjectShape::Dict
    }

    /// Super class first, then interfaces.
    pub fn direct_supertypes(&self) -> Vec<NominalRef> {
        self.super_class
            .iter()
            .chain(self.interfaces.iter())
            .cloned()
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct RawNominalType {
    pub header: NominalHeader,
    own_properties: IndexMap<String, NominalProperty>,
}

impl RawNominalType {
    pub fn new(header: NominalHeader) -> Self {
        Self {
            header,
            own_properties: IndexMap::new(),
        }
    }

    pub fn own_property(&self, name: &str) -> Option<&NominalProperty> {
        self.own_properties.get(name)
    }

    pub fn own_properties(&self) -> impl Iterator<Item = (&str, &NominalProperty)> {
        self.own_properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// `this.p` declared in the constructor or a method.
    pub fn add_class_property(&mut self, name: &str, declared_type: Option<TypeId>, is_const: bool) {
        self.own_properties.insert(
            name.to_string(),
            NominalProperty {
                declared_type,
                is_const,
                on_prototype: false,
                inherited: false,
            },
        );
    }

    /// `C.prototype.p` or an interface member.
    pub fn add_proto_property(&mut self, name: &str, declared_type: Option<TypeId>, is_const: bool) {
        self.own_properties.insert(
            name.to_string(),
            NominalProperty {
                declared_type,
                is_const,
                on_prototype: true,
                inherited: false,
            },
        );
    }

    /// Move to the finalized stage. Properties in `resolved` that the type
    /// declares itself only take the resolved type; the others are appended
    /// as inherited.
    pub(crate) fn into_finalized(self, resolved: IndexMap<String, NominalProperty>) -> NominalType {
        let mut properties = self.own_properties;
        for (name, prop) in resolved {
            match properties.get_mut(&name) {
                Some(own) => own.declared_type = prop.declared_type,
                None => {
                    properties.insert(
                        name,
                        NominalProperty {
                            inherited: true,
                            ..prop
                        },
                    );
                }
            }
        }
        NominalType {
            header: self.header,
            properties,
        }
    }
}

/// A finalized class or interface: own and inherited properties, with
/// inherited types instantiated through the supertype arguments.
#[derive(Clone, Debug)]
pub struct NominalType {
    pub header: NominalHeader,
    properties: IndexMap<String, NominalProperty>,
}

impl NominalType {
    pub fn property(&self, name: &str) -> Option<&NominalProperty> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &NominalProperty)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[derive(Clone, Debug)]
pub enum NominalState {
    Raw(RawNominalType),
    Finalized(NominalType),
}

impl NominalState {
    pub fn header(&self) -> &NominalHeader {
        match self {
            Self::Raw(raw) => &raw.header,
            Self::Finalized(fin) => &fin.header,
        }
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self, Self::Finalized(_))
    }

    /// Own properties of a raw type; all properties of a finalized one.
    pub fn property(&self, name: &str) -> Option<&NominalProperty> {
        match self {
            Self::Raw(raw) => raw.own_property(name),
            Self::Finalized(fin) => fin.property(name),
        }
    }

    pub fn properties(&self) -> Box<dyn Iterator<Item = (&str, &NominalProperty)> + '_> {
        match self {
            Self::Raw(raw) => Box::new(raw.own_properties()),
            Self::Finalized(fin) => Box::new(fin.properties()),
        }
    }

    pub fn as_raw(&self) -> Option<&RawNominalType> {
        match self {
            Self::Raw(raw) => Some(raw),
            Self::Finalized(_) => None,
        }
    }

    /// Mutable access to the builder stage. `property` names the mutation
    /// for the error raised on a finalized type.
    pub fn raw_mut(&mut self, property: &str) -> GtiResult<&mut RawNominalType> {
        match self {
            Self::Raw(raw) => Ok(raw),
            Self::Finalized(fin) => Err(GtiError::FinalizedMutation {
                type_name: fin.header.name.to_string(),
                property: property.to_string(),
            }),
        }
    }

    /// The one-way transition. Finalizing a finalized type is a no-op.
    pub(crate) fn finalize(&mut self, resolved: IndexMap<String, NominalProperty>) {
        if let Self::Raw(raw) = self {
            let header = raw.header.clone();
            let placeholder = RawNominalType::new(header);
            let raw = std::mem::replace(raw, placeholder);
            *self = Self::Finalized(raw.into_finalized(resolved));
        }
    }
}

#[cfg(test)]
#[path = "tests/nominal_tests.rs"]
mod tests;

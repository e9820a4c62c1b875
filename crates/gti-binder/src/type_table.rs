//! Owner of every namespace, nominal type, enum and typedef.
//!
//! Scopes refer into the table by id, so qualified-name lookups from any
//! scope reach the same namespace without shared ownership.

use crate::error::GtiResult;
use crate::namespace::{
    EnumType, Namespace, NamespaceId, NamespaceKind, Typedef, TypedefId,
};
use crate::nominal::{NominalHeader, NominalKind, NominalState, ObjectShape, RawNominalType};
use gti_ast::{NodeIndex, TypeExpr};
use gti_common::QualifiedName;
use gti_common::limits::MAX_SUBTYPE_DEPTH;
use gti_solver::hierarchy::is_nominal_descendant;
use gti_solver::{EnumId, NominalHierarchy, NominalId, NominalRef, TypeId, TypeInterner};
use indexmap::IndexSet;
use tracing::trace;

#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    namespaces: Vec<Namespace>,
    nominals: Vec<NominalState>,
    enums: Vec<EnumType>,
    typedefs: Vec<Typedef>,
}

impl TypeTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Creation
    // =========================================================================

    pub fn new_namespace_literal(&mut self, name: QualifiedName, def_site: NodeIndex) -> NamespaceId {
        self.push_namespace(Namespace::new(NamespaceKind::Literal, name, def_site))
    }

    pub fn new_nominal(
        &mut self,
        name: QualifiedName,
        kind: NominalKind,
        shape: ObjectShape,
        type_parameters: Vec<String>,
        def_site: NodeIndex,
    ) -> NominalId {
        let id = NominalId(self.nominals.len() as u32);
        let namespace =
            self.push_namespace(Namespace::new(NamespaceKind::Nominal(id), name.clone(), def_site));
        self.nominals.push(NominalState::Raw(RawNominalType::new(NominalHeader {
            id,
            name,
            kind,
            shape,
            type_parameters,
            super_class: None,
            interfaces: IndexSet::new(),
            namespace,
            ctor_fn: None,
            def_site,
        })));
        id
    }

    /// Create an enum and its namespace; each member becomes a constant
    /// property typed as the enum's element.
    pub fn new_enum(
        &mut self,
        interner: &TypeInterner,
        name: QualifiedName,
        declared_annotation: Option<TypeExpr>,
        members: Vec<String>,
        def_site: NodeIndex,
    ) -> EnumId {
        let id = EnumId(self.enums.len() as u32);
        let namespace =
            self.push_namespace(Namespace::new(NamespaceKind::Enum(id), name.clone(), def_site));
        let element = interner.enum_element(id);
        for member in &members {
            self.namespace_mut(namespace).add_property(member, element, true);
        }
        self.enums.push(EnumType {
            name,
            declared_annotation,
            members,
            element_type: None,
            namespace,
            def_site,
        });
        id
    }

    pub fn new_typedef(&mut self, name: QualifiedName, annotation: TypeExpr, def_site: NodeIndex) -> TypedefId {
        let id = TypedefId(self.typedefs.len() as u32);
        self.typedefs.push(Typedef {
            name,
            annotation,
            def_site,
            resolved: None,
        });
        id
    }

    fn push_namespace(&mut self, namespace: Namespace) -> NamespaceId {
        let id = NamespaceId(self.namespaces.len() as u32);
        self.namespaces.push(namespace);
        id
    }

    // =========================================================================
    // Access
    // =========================================================================

    pub fn namespace(&self, id: NamespaceId) -> &Namespace {
        &self.namespaces[id.0 as usize]
    }

    pub(crate) fn namespace_mut(&mut self, id: NamespaceId) -> &mut Namespace {
        &mut self.namespaces[id.0 as usize]
    }

    pub fn nominal(&self, id: NominalId) -> &NominalState {
        &self.nominals[id.0 as usize]
    }

    pub(crate) fn nominal_mut(&mut self, id: NominalId) -> &mut NominalState {
        &mut self.nominals[id.0 as usize]
    }

    /// Builder-stage access; mutating a finalized type is fatal.
    pub(crate) fn raw_nominal_mut(&mut self, id: NominalId, property: &str) -> GtiResult<&mut RawNominalType> {
        self.nominal_mut(id).raw_mut(property)
    }

    pub fn nominal_count(&self) -> usize {
        self.nominals.len()
    }

    /// All nominal ids, in discovery order.
    pub fn nominal_ids(&self) -> impl Iterator<Item = NominalId> + use<> {
        (0..self.nominals.len() as u32).map(NominalId)
    }

    pub fn enum_type(&self, id: EnumId) -> &EnumType {
        &self.enums[id.0 as usize]
    }

    pub(crate) fn enum_mut(&mut self, id: EnumId) -> &mut EnumType {
        &mut self.enums[id.0 as usize]
    }

    pub fn typedef(&self, id: TypedefId) -> &Typedef {
        &self.typedefs[id.0 as usize]
    }

    pub(crate) fn typedef_mut(&mut self, id: TypedefId) -> &mut Typedef {
        &mut self.typedefs[id.0 as usize]
    }

    /// Find a nominal type by its display name.
    pub fn nominal_by_name(&self, name: &str) -> Option<NominalId> {
        self.nominals
            .iter()
            .find(|n| n.header().name.to_string() == name)
            .map(|n| n.header().id)
    }

    // =========================================================================
    // Qualified paths
    // =========================================================================

    /// Follow sub-namespaces from `root` along `path`.
    pub fn descend<'p>(
        &self,
        root: NamespaceId,
        path: impl IntoIterator<Item = &'p str>,
    ) -> Option<NamespaceId> {
        path.into_iter()
            .try_fold(root, |ns, segment| self.namespace(ns).sub_namespace(segment))
    }

    /// Whether `name` (relative to `root`, at least one segment) names a
    /// member of any kind.
    pub fn is_defined_at(&self, root: NamespaceId, name: &QualifiedName) -> bool {
        let Some(parent) = self.descend(root, name.segments().take(name.len() - 1)) else {
            return false;
        };
        self.namespace(parent).is_defined(name.rightmost())
    }

    pub fn typedef_at(&self, root: NamespaceId, name: &QualifiedName) -> Option<TypedefId> {
        let parent = self.descend(root, name.segments().take(name.len() - 1))?;
        self.namespace(parent).typedef(name.rightmost())
    }

    pub fn nominal_of_namespace(&self, id: NamespaceId) -> Option<NominalId> {
        match self.namespace(id).kind {
            NamespaceKind::Nominal(nominal) => Some(nominal),
            _ => None,
        }
    }

    pub fn enum_of_namespace(&self, id: NamespaceId) -> Option<EnumId> {
        match self.namespace(id).kind {
            NamespaceKind::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// The namespace that holds a nominal type's static members.
    pub fn nominal_namespace(&self, id: NominalId) -> NamespaceId {
        self.nominal(id).header().namespace
    }

    pub fn enum_namespace(&self, id: EnumId) -> NamespaceId {
        self.enum_type(id).namespace
    }

    /// Value type of a namespace: the constructor type for a class, a record
    /// of the members otherwise.
    pub fn namespace_type(&self, interner: &TypeInterner, id: NamespaceId) -> TypeId {
        let ns = self.namespace(id);
        if let NamespaceKind::Nominal(nominal) = ns.kind {
            return self
                .nominal(nominal)
                .header()
                .ctor_fn
                .unwrap_or(TypeId::TOP_OBJECT);
        }
        let mut props: Vec<(String, TypeId)> = ns
            .properties()
            .map(|(name, p)| (name.to_string(), p.declared_type))
            .collect();
        props.extend(ns.undeclared_properties().map(|(n, t)| (n.to_string(), t)));
        for (name, sub) in ns.sub_namespaces() {
            props.push((name.to_string(), self.namespace_type(interner, sub)));
        }
        interner.object(props)
    }

    // =========================================================================
    // Inheritance edges
    // =========================================================================

    /// Set `child`'s super class. Refused (returns `false`) when one is
    /// already set or when the edge would close a cycle.
    pub fn add_super_class(
        &mut self,
        interner: &TypeInterner,
        child: NominalId,
        sup: NominalRef,
    ) -> GtiResult<bool> {
        if self.nominal(child).header().super_class.is_some() || self.would_cycle(interner, child, &sup) {
            return Ok(false);
        }
        let name = sup_label(self, &sup);
        self.raw_nominal_mut(child, &name)?.header.super_class = Some(sup);
        Ok(true)
    }

    /// Add an implemented or extended interface; refused on a cycle.
    pub fn add_interface(
        &mut self,
        interner: &TypeInterner,
        child: NominalId,
        iface: NominalRef,
    ) -> GtiResult<bool> {
        if self.would_cycle(interner, child, &iface) {
            return Ok(false);
        }
        let name = sup_label(self, &iface);
        self.raw_nominal_mut(child, &name)?.header.interfaces.insert(iface);
        Ok(true)
    }

    fn would_cycle(&self, interner: &TypeInterner, child: NominalId, sup: &NominalRef) -> bool {
        let cycle = sup.id == child || is_nominal_descendant(interner, self, sup.id, child);
        if cycle {
            trace!(child = child.0, sup = sup.id.0, "rejecting inheritance edge");
        }
        cycle
    }

    /// Install an edge without the cycle check.
    #[cfg(test)]
    pub(crate) fn force_super_class(&mut self, child: NominalId, sup: NominalId) {
        if let NominalState::Raw(raw) = self.nominal_mut(child) {
            raw.header.super_class = Some(NominalRef::new(sup));
        }
    }

    fn lookup_instance_property(&self, id: NominalId, name: &str, depth: u32) -> Option<TypeId> {
        let state = self.nominals.get(id.0 as usize)?;
        if let Some(prop) = state.property(name) {
            return Some(prop.declared_type.unwrap_or(TypeId::UNKNOWN));
        }
        if state.is_finalized() || depth >= MAX_SUBTYPE_DEPTH {
            return None;
        }
        state
            .header()
            .direct_supertypes()
            .iter()
            .find_map(|sup| self.lookup_instance_property(sup.id, name, depth + 1))
    }
}

fn sup_label(table: &TypeTable, sup: &NominalRef) -> String {
    format!("<supertype {}>", table.nominal(sup.id).header().name)
}

impl NominalHierarchy for TypeTable {
    fn direct_supertypes(&self, id: NominalId) -> Vec<NominalRef> {
        self.nominals
            .get(id.0 as usize)
            .map(|n| n.header().direct_supertypes())
            .unwrap_or_default()
    }

    fn type_parameters(&self, id: NominalId) -> Vec<String> {
        self.nominals
            .get(id.0 as usize)
            .map(|n| n.header().type_parameters.clone())
            .unwrap_or_default()
    }

    fn is_interface(&self, id: NominalId) -> bool {
        self.nominals
            .get(id.0 as usize)
            .is_some_and(|n| n.header().is_interface())
    }

    fn nominal_name(&self, id: NominalId) -> String {
        self.nominals
            .get(id.0 as usize)
            .map_or_else(|| format!("<nominal {}>", id.0), |n| n.header().name.to_string())
    }

    /// Raw types answer from their own properties and then their (raw or
    /// finalized) supertypes, without instantiating through type arguments.
    fn instance_property(&self, id: NominalId, name: &str) -> Option<TypeId> {
        self.lookup_instance_property(id, name, 0)
    }

    fn enum_name(&self, id: EnumId) -> String {
        self.enums
            .get(id.0 as usize)
            .map_or_else(|| format!("<enum {}>", id.0), |e| e.name.to_string())
    }

    fn enum_element_type(&self, id: EnumId) -> Option<TypeId> {
        self.enums.get(id.0 as usize).and_then(|e| e.element_type)
    }
}

#[cfg(test)]
#[path = "tests/type_table_tests.rs"]
mod tests;

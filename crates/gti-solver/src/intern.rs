//! Type interning.
//!
//! The interner owns every `TypeData` and hands out `TypeId`s. Constructors
//! normalize before interning so that structurally equal types share an id:
//! unions are flattened, sorted and deduplicated, record properties are
//! sorted by name.

use crate::types::{EnumId, FunctionShape, IntrinsicKind, NominalRef, TypeData, TypeId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::cell::RefCell;

#[derive(Debug, Default)]
struct InternerInner {
    types: Vec<TypeData>,
    map: FxHashMap<TypeData, TypeId>,
}

/// Single-threaded type interner. Interior mutability lets read-mostly views
/// create types through `&self`.
#[derive(Debug)]
pub struct TypeInterner {
    inner: RefCell<InternerInner>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    #[must_use]
    pub fn new() -> Self {
        let mut inner = InternerInner::default();
        for kind in IntrinsicKind::ALL {
            let id = TypeId(inner.types.len() as u32);
            let data = TypeData::Intrinsic(kind);
            inner.map.insert(data.clone(), id);
            inner.types.push(data);
        }
        Self {
            inner: RefCell::new(inner),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().types.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn intern(&self, data: TypeData) -> TypeId {
        if let Some(&id) = self.inner.borrow().map.get(&data) {
            return id;
        }
        let mut inner = self.inner.borrow_mut();
        let id = TypeId(inner.types.len() as u32);
        inner.map.insert(data.clone(), id);
        inner.types.push(data);
        id
    }

    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        self.inner.borrow().types.get(id.0 as usize).cloned()
    }

    /// Union of `members`. Nested unions are flattened; `*` and `?` absorb
    /// everything; bottom is dropped; `true|false` collapses to `boolean`.
    pub fn union(&self, members: impl IntoIterator<Item = TypeId>) -> TypeId {
        let mut flat: SmallVec<[TypeId; 8]> = SmallVec::new();
        for member in members {
            match self.lookup(member) {
                Some(TypeData::Union(inner)) => flat.extend(inner),
                _ => flat.push(member),
            }
        }
        if flat.contains(&TypeId::TOP) {
            return TypeId::TOP;
        }
        if flat.contains(&TypeId::UNKNOWN) {
            return TypeId::UNKNOWN;
        }
        flat.retain(|t| *t != TypeId::BOTTOM);
        flat.sort_unstable();
        flat.dedup();
        if flat.contains(&TypeId::TRUE) && flat.contains(&TypeId::FALSE) {
            flat.push(TypeId::BOOLEAN);
        }
        if flat.contains(&TypeId::BOOLEAN) {
            flat.retain(|t| *t != TypeId::TRUE && *t != TypeId::FALSE);
            flat.sort_unstable();
            flat.dedup();
        }
        match flat.len() {
            0 => TypeId::BOTTOM,
            1 => flat[0],
            _ => self.intern(TypeData::Union(flat.into_vec())),
        }
    }

    /// Structural record. A repeated name keeps its last type.
    pub fn object(&self, props: impl IntoIterator<Item = (String, TypeId)>) -> TypeId {
        let mut by_name: FxHashMap<String, TypeId> = FxHashMap::default();
        for (name, ty) in props {
            by_name.insert(name, ty);
        }
        let mut sorted: Vec<(String, TypeId)> = by_name.into_iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        self.intern(TypeData::Object(sorted))
    }

    pub fn nominal(&self, nominal: NominalRef) -> TypeId {
        self.intern(TypeData::Nominal(nominal))
    }

    pub fn function(&self, shape: FunctionShape) -> TypeId {
        self.intern(TypeData::Function(shape))
    }

    pub fn type_var(&self, name: impl Into<String>) -> TypeId {
        self.intern(TypeData::TypeVar(name.into()))
    }

    pub fn enum_element(&self, id: EnumId) -> TypeId {
        self.intern(TypeData::EnumElement(id))
    }

    // Queries

    pub fn union_members(&self, id: TypeId) -> Option<Vec<TypeId>> {
        match self.lookup(id)? {
            TypeData::Union(members) => Some(members),
            _ => None,
        }
    }

    pub fn object_properties(&self, id: TypeId) -> Option<Vec<(String, TypeId)>> {
        match self.lookup(id)? {
            TypeData::Object(props) => Some(props),
            _ => None,
        }
    }

    pub fn object_property(&self, id: TypeId, name: &str) -> Option<TypeId> {
        self.object_properties(id)?
            .into_iter()
            .find_map(|(n, t)| (n == name).then_some(t))
    }

    pub fn function_shape(&self, id: TypeId) -> Option<FunctionShape> {
        match self.lookup(id)? {
            TypeData::Function(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn nominal_ref(&self, id: TypeId) -> Option<NominalRef> {
        match self.lookup(id)? {
            TypeData::Nominal(nominal) => Some(nominal),
            _ => None,
        }
    }
}

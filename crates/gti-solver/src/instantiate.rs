//! Type-variable substitution.

use crate::intern::TypeInterner;
use crate::types::{FunctionShape, NominalRef, TypeData, TypeId};
use gti_common::limits::MAX_SUBTYPE_DEPTH;
use rustc_hash::FxHashMap;

pub type TypeSubstitution = FxHashMap<String, TypeId>;

/// Map `params[i]` to `args[i]`. Missing arguments are left unmapped.
pub fn substitution_for(params: &[String], args: &[TypeId]) -> TypeSubstitution {
    params
        .iter()
        .zip(args.iter())
        .map(|(p, a)| (p.clone(), *a))
        .collect()
}

pub fn instantiate_type(interner: &TypeInterner, ty: TypeId, subst: &TypeSubstitution) -> TypeId {
    if subst.is_empty() || ty.is_intrinsic() {
        return ty;
    }
    instantiate_at(interner, ty, subst, 0)
}

pub fn instantiate_ref(
    interner: &TypeInterner,
    nominal: &NominalRef,
    subst: &TypeSubstitution,
) -> NominalRef {
    if subst.is_empty() {
        return nominal.clone();
    }
    NominalRef {
        id: nominal.id,
        type_args: nominal
            .type_args
            .iter()
            .map(|&t| instantiate_at(interner, t, subst, 0))
            .collect(),
    }
}

fn instantiate_at(
    interner: &TypeInterner,
    ty: TypeId,
    subst: &TypeSubstitution,
    depth: u32,
) -> TypeId {
    if ty.is_intrinsic() {
        return ty;
    }
    if depth >= MAX_SUBTYPE_DEPTH {
        return TypeId::UNKNOWN;
    }
    let Some(data) = interner.lookup(ty) else {
        return ty;
    };
    let go = |t: TypeId| instantiate_at(interner, t, subst, depth + 1);
    match data {
        TypeData::TypeVar(name) => subst.get(&name).copied().unwrap_or(ty),
        TypeData::Union(members) => interner.union(members.into_iter().map(go)),
        TypeData::Object(props) => interner.object(props.into_iter().map(|(n, t)| (n, go(t)))),
        TypeData::Nominal(nominal) => interner.nominal(NominalRef {
            id: nominal.id,
            type_args: nominal.type_args.into_iter().map(go).collect(),
        }),
        TypeData::Function(shape) => interner.function(FunctionShape {
            params: shape.params.into_iter().map(go).collect(),
            rest: shape.rest.map(go),
            returns: go(shape.returns),
            constructs: shape.constructs,
        }),
        TypeData::Intrinsic(_) | TypeData::EnumElement(_) => ty,
    }
}

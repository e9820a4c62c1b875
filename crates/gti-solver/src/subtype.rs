//! The subtype relation over declared types.
//!
//! `?` is compatible in both directions; `*` is the top type; records use
//! width and depth subtyping; instances are related nominally through the
//! hierarchy and structurally to records; functions are contravariant in
//! parameters and covariant in return.

use crate::hierarchy::{NominalHierarchy, find_ancestor};
use crate::instantiate::{instantiate_type, substitution_for};
use crate::intern::TypeInterner;
use crate::types::{FunctionShape, NominalRef, TypeData, TypeId};
use gti_common::limits::MAX_SUBTYPE_DEPTH;
use rustc_hash::FxHashSet;
use std::cell::RefCell;
use tracing::trace;

pub struct SubtypeChecker<'a> {
    interner: &'a TypeInterner,
    hierarchy: &'a dyn NominalHierarchy,
    /// Pairs currently being compared; re-entering one assumes success.
    in_progress: RefCell<FxHashSet<(TypeId, TypeId)>>,
}

impl<'a> SubtypeChecker<'a> {
    pub fn new(interner: &'a TypeInterner, hierarchy: &'a dyn NominalHierarchy) -> Self {
        Self {
            interner,
            hierarchy,
            in_progress: RefCell::new(FxHashSet::default()),
        }
    }

    pub fn interner(&self) -> &'a TypeInterner {
        self.interner
    }

    pub fn hierarchy(&self) -> &'a dyn NominalHierarchy {
        self.hierarchy
    }

    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        self.check(sub, sup, 0)
    }

    fn check(&self, sub: TypeId, sup: TypeId, depth: u32) -> bool {
        if sub == sup || sub == TypeId::UNKNOWN || sup == TypeId::UNKNOWN {
            return true;
        }
        if sup == TypeId::TOP || sub == TypeId::BOTTOM {
            return true;
        }
        if sub == TypeId::TOP {
            return false;
        }
        if depth >= MAX_SUBTYPE_DEPTH {
            trace!(?sub, ?sup, "subtype depth limit reached");
            return false;
        }
        if !self.in_progress.borrow_mut().insert((sub, sup)) {
            return true;
        }
        let result = self.check_structure(sub, sup, depth + 1);
        self.in_progress.borrow_mut().remove(&(sub, sup));
        result
    }

    fn check_structure(&self, sub: TypeId, sup: TypeId, depth: u32) -> bool {
        let (Some(sub_data), Some(sup_data)) = (self.interner.lookup(sub), self.interner.lookup(sup))
        else {
            return false;
        };

        if let TypeData::Union(members) = &sub_data {
            return members.iter().all(|&m| self.check(m, sup, depth));
        }
        if let TypeData::Union(members) = &sup_data {
            return members.iter().any(|&m| self.check(sub, m, depth));
        }

        match (&sub_data, &sup_data) {
            (TypeData::EnumElement(e), _) => self
                .hierarchy
                .enum_element_type(*e)
                .is_some_and(|element| self.check(element, sup, depth)),
            (_, TypeData::Intrinsic(_)) if sup == TypeId::BOOLEAN => {
                sub == TypeId::TRUE || sub == TypeId::FALSE
            }
            (
                TypeData::Object(_) | TypeData::Nominal(_) | TypeData::Function(_),
                TypeData::Intrinsic(_),
            ) => sup == TypeId::TOP_OBJECT,
            (TypeData::Nominal(a), TypeData::Nominal(b)) => self.nominal_subtype(a, b, depth),
            (TypeData::Nominal(a), TypeData::Object(props)) => props.iter().all(|(name, ty)| {
                self.nominal_property(a, name)
                    .is_some_and(|p| self.check(p, *ty, depth))
            }),
            (TypeData::Object(a), TypeData::Object(b)) => b.iter().all(|(name, ty)| {
                a.iter()
                    .find(|(n, _)| n == name)
                    .is_some_and(|(_, t)| self.check(*t, *ty, depth))
            }),
            (TypeData::Function(a), TypeData::Function(b)) => self.function_subtype(a, b, depth),
            _ => false,
        }
    }

    fn nominal_subtype(&self, sub: &NominalRef, sup: &NominalRef, depth: u32) -> bool {
        let Some(ancestor) = find_ancestor(self.interner, self.hierarchy, sub, sup.id) else {
            return false;
        };
        if sup.type_args.is_empty() || ancestor.type_args.is_empty() {
            return true;
        }
        // Type arguments are invariant.
        ancestor.type_args.len() == sup.type_args.len()
            && ancestor
                .type_args
                .iter()
                .zip(&sup.type_args)
                .all(|(&a, &b)| self.check(a, b, depth) && self.check(b, a, depth))
    }

    fn nominal_property(&self, nominal: &NominalRef, name: &str) -> Option<TypeId> {
        let declared = self.hierarchy.instance_property(nominal.id, name)?;
        let subst = substitution_for(
            &self.hierarchy.type_parameters(nominal.id),
            &nominal.type_args,
        );
        Some(instantiate_type(self.interner, declared, &subst))
    }

    fn function_subtype(&self, sub: &FunctionShape, sup: &FunctionShape, depth: u32) -> bool {
        let arity = sub.params.len().max(sup.params.len());
        for i in 0..arity {
            let sub_param = sub.params.get(i).copied().or(sub.rest);
            let sup_param = sup.params.get(i).copied().or(sup.rest);
            // Callers may pass fewer arguments than declared.
            if let (Some(sub_param), Some(sup_param)) = (sub_param, sup_param) {
                if !self.check(sup_param, sub_param, depth) {
                    return false;
                }
            }
        }
        self.check(sub.returns, sup.returns, depth)
    }
}

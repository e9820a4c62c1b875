//! Declared function signatures.
//!
//! A `DeclaredFunctionType` records what a function's documentation says:
//! any component may be absent ("not annotated"), which is different from
//! being annotated `?`.

use crate::instantiate::{TypeSubstitution, instantiate_ref, instantiate_type};
use crate::intern::TypeInterner;
use crate::meet::{join_all, meet_all};
use crate::subtype::SubtypeChecker;
use crate::types::{FunctionShape, NominalRef, TypeId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclaredFunctionType {
    pub formals: Vec<Option<TypeId>>,
    /// Element type of a trailing variadic formal.
    pub rest: Option<TypeId>,
    pub return_type: Option<TypeId>,
    /// Class a method is attached to through its prototype.
    pub receiver_type: Option<NominalRef>,
    /// Type of `this` inside the body.
    pub this_type: Option<NominalRef>,
    /// Class or interface a constructor/interface function defines.
    pub constructed_type: Option<NominalRef>,
    pub type_parameters: Vec<String>,
}

impl DeclaredFunctionType {
    /// A signature with `arity` unannotated formals.
    #[must_use]
    pub fn untyped(arity: usize) -> Self {
        Self {
            formals: vec![None; arity],
            ..Self::default()
        }
    }

    pub fn formal_type(&self, index: usize) -> Option<TypeId> {
        match self.formals.get(index) {
            Some(formal) => *formal,
            None => self.rest,
        }
    }

    pub fn is_constructor_or_interface(&self) -> bool {
        self.constructed_type.is_some()
    }

    /// The value type of the function; absent components become `?`.
    pub fn to_function_type(&self, interner: &TypeInterner) -> TypeId {
        interner.function(FunctionShape {
            params: self
                .formals
                .iter()
                .map(|f| f.unwrap_or(TypeId::UNKNOWN))
                .collect(),
            rest: self.rest,
            returns: self.return_type.unwrap_or(TypeId::UNKNOWN),
            constructs: self.constructed_type.as_ref().map(|n| n.id),
        })
    }

    /// Apply `subst` to every component.
    #[must_use]
    pub fn substitute(&self, interner: &TypeInterner, subst: &TypeSubstitution) -> Self {
        if subst.is_empty() {
            return self.clone();
        }
        let ty = |t: TypeId| instantiate_type(interner, t, subst);
        let nominal = |n: &NominalRef| instantiate_ref(interner, n, subst);
        Self {
            formals: self.formals.iter().map(|f| f.map(ty)).collect(),
            rest: self.rest.map(ty),
            return_type: self.return_type.map(ty),
            receiver_type: self.receiver_type.as_ref().map(nominal),
            this_type: self.this_type.as_ref().map(nominal),
            constructed_type: self.constructed_type.as_ref().map(nominal),
            type_parameters: self.type_parameters.clone(),
        }
    }

    /// Fill components this signature leaves unannotated from `sup`, the
    /// signature it overrides.
    #[must_use]
    pub fn with_type_info_from_super(&self, sup: &DeclaredFunctionType) -> Self {
        let arity = self.formals.len().max(sup.formals.len());
        let formals = (0..arity)
            .map(|i| {
                self.formals
                    .get(i)
                    .copied()
                    .flatten()
                    .or_else(|| sup.formal_type(i))
            })
            .collect();
        Self {
            formals,
            rest: self.rest.or(sup.rest),
            return_type: self.return_type.or(sup.return_type),
            receiver_type: self.receiver_type.clone(),
            this_type: self.this_type.clone(),
            constructed_type: self.constructed_type.clone(),
            type_parameters: if self.type_parameters.is_empty() {
                sup.type_parameters.clone()
            } else {
                self.type_parameters.clone()
            },
        }
    }

    /// Combine several inherited signatures of one method into a single one
    /// that is a subtype of each: formals are joined, return types met.
    /// `None` when the return types are incompatible. The result does not
    /// depend on the order of `signatures`.
    pub fn meet(checker: &SubtypeChecker<'_>, signatures: &[DeclaredFunctionType]) -> Option<Self> {
        let (first, rest) = signatures.split_first()?;
        if rest.is_empty() {
            return Some(first.clone());
        }
        let arity = signatures.iter().map(|s| s.formals.len()).max().unwrap_or(0);
        let formals = (0..arity)
            .map(|i| {
                let found: Vec<TypeId> = signatures.iter().filter_map(|s| s.formal_type(i)).collect();
                (!found.is_empty()).then(|| join_all(checker, &found))
            })
            .collect();
        let rests: Vec<TypeId> = signatures.iter().filter_map(|s| s.rest).collect();
        let returns: Vec<TypeId> = signatures.iter().filter_map(|s| s.return_type).collect();
        let return_type = if returns.is_empty() {
            None
        } else {
            Some(meet_all(checker, &returns)?)
        };

        let mut type_parameters: Vec<String> = first
            .type_parameters
            .iter()
            .filter(|p| rest.iter().all(|s| s.type_parameters.contains(p)))
            .cloned()
            .collect();
        type_parameters.sort();

        let shared = |get: fn(&DeclaredFunctionType) -> &Option<NominalRef>| {
            let value = get(first);
            rest.iter()
                .all(|s| get(s) == value)
                .then(|| value.clone())
                .flatten()
        };

        Some(Self {
            formals,
            rest: (!rests.is_empty()).then(|| join_all(checker, &rests)),
            return_type,
            receiver_type: shared(|s| &s.receiver_type),
            this_type: shared(|s| &s.this_type),
            constructed_type: None,
            type_parameters,
        })
    }
}

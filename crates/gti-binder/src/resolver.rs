//! Turning `TypeExpr` annotations into declared types.
//!
//! The builder talks to the resolver only through [`DeclaredTypeResolver`];
//! [`JsDocTypeResolver`] is the default implementation.

use crate::namespace::TypedefId;
use crate::registry::DeclaredTypeRegistry;
use gti_ast::{JsDoc, NodeIndex, TypeExpr};
use gti_common::QualifiedName;
use gti_common::limits::MAX_TYPEDEF_RESOLUTION_DEPTH;
use gti_solver::{DeclaredFunctionType, FunctionShape, NominalId, NominalRef, TypeData, TypeId};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

/// Where an annotation is being resolved.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub registry: &'a dyn DeclaredTypeRegistry,
    /// Node the annotation is attached to; used to locate reports.
    pub site: NodeIndex,
    /// Class or interface whose member is being declared; its template
    /// names are in scope.
    pub owner: Option<NominalId>,
    /// Extra template names (e.g. those of the function being declared).
    pub type_parameters: &'a [String],
}

pub trait DeclaredTypeResolver {
    fn declared_type(&mut self, annotation: &TypeExpr, cx: &ResolveContext<'_>) -> TypeId;

    /// Whether every name in `annotation` resolves.
    fn has_known_type(&self, annotation: &TypeExpr, cx: &ResolveContext<'_>) -> bool;

    /// The class or interface `annotation` names, if it names one.
    fn nominal_type(&mut self, annotation: &TypeExpr, cx: &ResolveContext<'_>) -> Option<NominalRef>;

    fn implemented_interfaces(&mut self, doc: &JsDoc, cx: &ResolveContext<'_>) -> Vec<NominalRef>;

    fn extended_interfaces(&mut self, doc: &JsDoc, cx: &ResolveContext<'_>) -> Vec<NominalRef>;

    /// Signature of a function literal with the given formals. Receiver and
    /// constructed types are left for the caller.
    fn function_type(
        &mut self,
        doc: Option<&JsDoc>,
        formals: &[String],
        cx: &ResolveContext<'_>,
    ) -> DeclaredFunctionType;

    fn resolve_typedef(&mut self, id: TypedefId, cx: &ResolveContext<'_>) -> TypeId;

    /// Element type of an enum; `None` declares `number`.
    fn resolve_enum(&mut self, annotation: Option<&TypeExpr>, cx: &ResolveContext<'_>) -> TypeId;

    /// Names that resolved to nothing, with the site that used them.
    fn take_unknown_type_names(&mut self) -> Vec<(NodeIndex, String)>;

    fn take_warnings(&mut self) -> Vec<(NodeIndex, String)>;
}

fn builtin_type(name: &str) -> Option<TypeId> {
    Some(match name {
        "number" => TypeId::NUMBER,
        "string" => TypeId::STRING,
        "boolean" => TypeId::BOOLEAN,
        "null" => TypeId::NULL,
        "undefined" | "void" => TypeId::UNDEFINED,
        "Object" => TypeId::TOP_OBJECT,
        _ => return None,
    })
}

#[derive(Debug, Default)]
pub struct JsDocTypeResolver {
    unknown_names: Vec<(NodeIndex, String)>,
    warnings: Vec<(NodeIndex, String)>,
    typedef_cache: FxHashMap<TypedefId, TypeId>,
    resolving: FxHashSet<TypedefId>,
}

impl JsDocTypeResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn is_type_variable(name: &str, cx: &ResolveContext<'_>) -> bool {
        cx.type_parameters.iter().any(|p| p == name)
            || cx
                .owner
                .is_some_and(|o| cx.registry.nominal_type_parameters(o).iter().any(|p| p == name))
            || cx.registry.is_type_variable(name)
    }

    fn resolve(&mut self, expr: &TypeExpr, cx: &ResolveContext<'_>, depth: u32) -> TypeId {
        let interner = cx.registry.interner();
        match expr {
            TypeExpr::Any => TypeId::TOP,
            TypeExpr::Unknown => TypeId::UNKNOWN,
            TypeExpr::Name { name } => self.resolve_name(name, Vec::new(), cx, depth),
            TypeExpr::Apply { base, args } => {
                let args = args.iter().map(|a| self.resolve(a, cx, depth)).collect();
                self.resolve_name(base, args, cx, depth)
            }
            TypeExpr::Union { members } => {
                let members: Vec<TypeId> =
                    members.iter().map(|m| self.resolve(m, cx, depth)).collect();
                interner.union(members)
            }
            TypeExpr::Record { fields } => {
                let fields: Vec<(String, TypeId)> = fields
                    .iter()
                    .map(|(name, ty)| (name.clone(), self.resolve(ty, cx, depth)))
                    .collect();
                interner.object(fields)
            }
            TypeExpr::Function { params, returns } => {
                let params = params.iter().map(|p| self.resolve(p, cx, depth)).collect();
                let returns = returns
                    .as_deref()
                    .map_or(TypeId::UNKNOWN, |r| self.resolve(r, cx, depth));
                interner.function(FunctionShape {
                    params,
                    rest: None,
                    returns,
                    constructs: None,
                })
            }
        }
    }

    fn resolve_name(&mut self, name: &str, args: Vec<TypeId>, cx: &ResolveContext<'_>, depth: u32) -> TypeId {
        let interner = cx.registry.interner();
        if Self::is_type_variable(name, cx) {
            return interner.type_var(name);
        }
        if let Some(builtin) = builtin_type(name) {
            return builtin;
        }
        let Some(qname) = QualifiedName::from_dotted(name) else {
            self.unknown_names.push((cx.site, name.to_string()));
            return TypeId::UNKNOWN;
        };
        if let Some(td) = cx.registry.lookup_typedef(&qname) {
            return self.typedef_at_depth(td, cx, depth + 1);
        }
        if let Some(e) = cx.registry.lookup_enum(&qname) {
            return interner.enum_element(e);
        }
        if let Some(nominal) = cx.registry.lookup_nominal(&qname) {
            return interner.nominal(NominalRef::with_args(nominal, args));
        }
        trace!(name, "unknown type name");
        self.unknown_names.push((cx.site, name.to_string()));
        TypeId::UNKNOWN
    }

    fn typedef_at_depth(&mut self, id: TypedefId, cx: &ResolveContext<'_>, depth: u32) -> TypeId {
        let typedef = cx.registry.typedef(id);
        if let Some(resolved) = typedef.resolved {
            return resolved;
        }
        if let Some(&cached) = self.typedef_cache.get(&id) {
            return cached;
        }
        if depth > MAX_TYPEDEF_RESOLUTION_DEPTH || !self.resolving.insert(id) {
            self.warnings
                .push((typedef.def_site, format!("circular definition of typedef {}", typedef.name)));
            return TypeId::UNKNOWN;
        }
        let resolved = self.resolve(&typedef.annotation, cx, depth);
        self.resolving.remove(&id);
        self.typedef_cache.insert(id, resolved);
        resolved
    }

    fn name_known(name: &str, cx: &ResolveContext<'_>) -> bool {
        if Self::is_type_variable(name, cx) || builtin_type(name).is_some() {
            return true;
        }
        QualifiedName::from_dotted(name).is_some_and(|q| {
            cx.registry.lookup_typedef(&q).is_some()
                || cx.registry.lookup_enum(&q).is_some()
                || cx.registry.lookup_nominal(&q).is_some()
        })
    }
}

impl DeclaredTypeResolver for JsDocTypeResolver {
    fn declared_type(&mut self, annotation: &TypeExpr, cx: &ResolveContext<'_>) -> TypeId {
        self.resolve(annotation, cx, 0)
    }

    fn has_known_type(&self, annotation: &TypeExpr, cx: &ResolveContext<'_>) -> bool {
        match annotation {
            TypeExpr::Any | TypeExpr::Unknown => true,
            TypeExpr::Name { name } => Self::name_known(name, cx),
            TypeExpr::Apply { base, args } => {
                Self::name_known(base, cx) && args.iter().all(|a| self.has_known_type(a, cx))
            }
            TypeExpr::Union { members } => members.iter().all(|m| self.has_known_type(m, cx)),
            TypeExpr::Record { fields } => fields.iter().all(|(_, t)| self.has_known_type(t, cx)),
            TypeExpr::Function { params, returns } => {
                params.iter().all(|p| self.has_known_type(p, cx))
                    && returns.as_deref().is_none_or(|r| self.has_known_type(r, cx))
            }
        }
    }

    fn nominal_type(&mut self, annotation: &TypeExpr, cx: &ResolveContext<'_>) -> Option<NominalRef> {
        if !matches!(annotation, TypeExpr::Name { .. } | TypeExpr::Apply { .. }) {
            return None;
        }
        let ty = self.resolve(annotation, cx, 0);
        match cx.registry.interner().lookup(ty)? {
            TypeData::Nominal(nominal) => Some(nominal),
            _ => None,
        }
    }

    fn implemented_interfaces(&mut self, doc: &JsDoc, cx: &ResolveContext<'_>) -> Vec<NominalRef> {
        doc.implements
            .iter()
            .filter_map(|t| self.nominal_type(t, cx))
            .collect()
    }

    fn extended_interfaces(&mut self, doc: &JsDoc, cx: &ResolveContext<'_>) -> Vec<NominalRef> {
        doc.extends
            .iter()
            .filter_map(|t| self.nominal_type(t, cx))
            .collect()
    }

    fn function_type(
        &mut self,
        doc: Option<&JsDoc>,
        formals: &[String],
        cx: &ResolveContext<'_>,
    ) -> DeclaredFunctionType {
        let Some(doc) = doc else {
            return DeclaredFunctionType::untyped(formals.len());
        };
        let mut type_parameters = cx.type_parameters.to_vec();
        type_parameters.extend(doc.template.iter().cloned());
        let inner = ResolveContext {
            type_parameters: &type_parameters,
            ..*cx
        };
        let formal_types = formals
            .iter()
            .map(|f| doc.param_type(f).map(|t| self.resolve(t, &inner, 0)))
            .collect();
        let rest = doc
            .params
            .iter()
            .find(|p| p.rest && !formals.contains(&p.name))
            .and_then(|p| p.ty.as_ref())
            .map(|t| self.resolve(t, &inner, 0));
        let return_type = doc.returns.as_ref().map(|t| self.resolve(t, &inner, 0));
        let this_type = doc
            .this_type
            .as_ref()
            .and_then(|t| self.nominal_type(t, &inner));
        DeclaredFunctionType {
            formals: formal_types,
            rest,
            return_type,
            receiver_type: None,
            this_type,
            constructed_type: None,
            type_parameters: doc.template.clone(),
        }
    }

    fn resolve_typedef(&mut self, id: TypedefId, cx: &ResolveContext<'_>) -> TypeId {
        self.typedef_at_depth(id, cx, 0)
    }

    fn resolve_enum(&mut self, annotation: Option<&TypeExpr>, cx: &ResolveContext<'_>) -> TypeId {
        annotation.map_or(TypeId::NUMBER, |t| self.resolve(t, cx, 0))
    }

    fn take_unknown_type_names(&mut self) -> Vec<(NodeIndex, String)> {
        std::mem::take(&mut self.unknown_names)
    }

    fn take_warnings(&mut self) -> Vec<(NodeIndex, String)> {
        std::mem::take(&mut self.warnings)
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;

//! Function signatures and the inheritance edges they declare.

use crate::error::GtiResult;
use crate::nominal::ObjectShape;
use crate::scope::ScopeId;
use crate::state::GlobalTypeInfoBuilder;
use gti_ast::{JsDoc, NodeIndex};
use gti_common::diagnostics::diagnostic_codes;
use gti_solver::{DeclaredFunctionType, NominalHierarchy, NominalId, NominalRef};
use tracing::trace;

impl GlobalTypeInfoBuilder<'_> {
    /// Compute the signature of a function literal declared in `scope` and
    /// store it on the function's own scope. `owner` is the class whose
    /// prototype the function is assigned to.
    pub(crate) fn visit_function_late(
        &mut self,
        scope: ScopeId,
        function: NodeIndex,
        owner: Option<NominalId>,
    ) -> GtiResult<ScopeId> {
        let arena = self.arena;
        let fn_scope = self.function_scope(function)?;
        if let Some(name) = arena.function(function).and_then(|v| v.name) {
            self.undeclared_uses.remove(name);
        }
        let name = self.internal_name(function).to_string();
        let formals = self.scope(fn_scope).formals.clone();
        let declared = self.compute_fn_declared_type(
            scope,
            arena.best_jsdoc(function),
            &name,
            function,
            owner,
            &formals,
        )?;
        trace!(name = %name, scope = fn_scope.0, "function signature");
        self.scopes.get_mut(fn_scope).declared_type = Some(declared);
        Ok(fn_scope)
    }

    /// Signature described by `doc` for the function declared at
    /// `decl_node` (a function literal, or a property with a signature-only
    /// comment). Installs the super class and interfaces of constructors
    /// and interfaces.
    pub(crate) fn compute_fn_declared_type(
        &mut self,
        scope: ScopeId,
        doc: Option<&JsDoc>,
        fn_name: &str,
        decl_node: NodeIndex,
        owner: Option<NominalId>,
        formals: &[String],
    ) -> GtiResult<DeclaredFunctionType> {
        let mut declared = self.resolve_in(scope, decl_node, owner, |r, cx| {
            r.function_type(doc, formals, cx)
        });

        if let Some(doc) = doc {
            let ctor_type = self.nominals_by_fn.get(&decl_node).copied();
            if doc.is_constructor_or_interface() && ctor_type.is_none() {
                return Ok(declared);
            }
            if let Some(id) = ctor_type.filter(|_| doc.is_constructor()) {
                let parent = self.declared_super_class(scope, doc, fn_name, decl_node, owner);
                self.install_class_edges(scope, doc, id, parent, decl_node, owner)?;
                declared.constructed_type = Some(self.self_ref(id));
            } else if let Some(id) = ctor_type.filter(|_| doc.is_interface()) {
                self.install_interface_edges(scope, doc, fn_name, id, decl_node, owner)?;
                declared.constructed_type = Some(self.self_ref(id));
            } else {
                if doc.has_base_type() {
                    self.report(
                        decl_node,
                        diagnostic_codes::EXTENDS_NOT_ON_CTOR_OR_INTERF,
                        &[fn_name],
                    );
                }
                if !doc.implements.is_empty() {
                    self.report(
                        decl_node,
                        diagnostic_codes::IMPLEMENTS_WITHOUT_CONSTRUCTOR,
                        &[fn_name],
                    );
                }
            }
        }

        if let Some(owner) = owner {
            declared.receiver_type = Some(self.self_ref(owner));
        }
        if declared.this_type.is_none() {
            declared.this_type = declared
                .receiver_type
                .clone()
                .or_else(|| declared.constructed_type.clone());
        }
        if let Some(id) = self.nominals_by_fn.get(&decl_node).copied() {
            let ctor_fn = declared.to_function_type(&self.interner);
            self.table.raw_nominal_mut(id, "<constructor>")?.header.ctor_fn = Some(ctor_fn);
        }
        Ok(declared)
    }

    /// The class named by a constructor's `@extends`, if it is one.
    fn declared_super_class(
        &mut self,
        scope: ScopeId,
        doc: &JsDoc,
        fn_name: &str,
        decl_node: NodeIndex,
        owner: Option<NominalId>,
    ) -> Option<NominalRef> {
        let base = doc.extends.first()?;
        let known = self.resolve_in(scope, decl_node, owner, |r, cx| r.has_known_type(base, cx));
        if !known {
            // Resolve anyway so the unknown name is recorded.
            self.resolve_in(scope, decl_node, owner, |r, cx| r.declared_type(base, cx));
            return None;
        }
        match self.resolve_in(scope, decl_node, owner, |r, cx| r.nominal_type(base, cx)) {
            None => {
                let ty = self.resolve_in(scope, decl_node, owner, |r, cx| r.declared_type(base, cx));
                let text = self.type_string(ty);
                self.report(
                    decl_node,
                    diagnostic_codes::EXTENDS_NON_OBJECT,
                    &[fn_name, &text],
                );
                None
            }
            Some(parent) if self.table.is_interface(parent.id) => {
                self.report(
                    decl_node,
                    diagnostic_codes::CONFLICTING_EXTENDED_TYPE,
                    &["constructor", fn_name],
                );
                None
            }
            Some(parent) => Some(parent),
        }
    }

    fn install_class_edges(
        &mut self,
        scope: ScopeId,
        doc: &JsDoc,
        id: NominalId,
        parent: Option<NominalRef>,
        decl_node: NodeIndex,
        owner: Option<NominalId>,
    ) -> GtiResult<()> {
        let class_name = self.table.nominal_name(id);
        if let Some(parent) = parent {
            let parent_id = parent.id;
            if !self.table.add_super_class(&self.interner, id, parent)? {
                self.report(decl_node, diagnostic_codes::INHERITANCE_CYCLE, &[&class_name]);
            } else {
                let shape = self.table.nominal(id).header().shape;
                let parent_shape = self.table.nominal(parent_id).header().shape;
                if shape == ObjectShape::Struct && parent_shape != ObjectShape::Struct {
                    self.report(
                        decl_node,
                        diagnostic_codes::CONFLICTING_SHAPE_TYPE,
                        &["struct", &class_name],
                    );
                } else if shape == ObjectShape::Dict && parent_shape != ObjectShape::Dict {
                    self.report(
                        decl_node,
                        diagnostic_codes::CONFLICTING_SHAPE_TYPE,
                        &["dict", &class_name],
                    );
                }
            }
        }
        let implemented =
            self.resolve_in(scope, decl_node, owner, |r, cx| r.implemented_interfaces(doc, cx));
        if self.table.nominal(id).header().is_dict() && !implemented.is_empty() {
            self.report(
                decl_node,
                diagnostic_codes::DICT_IMPLEMENTS_INTERF,
                &[&class_name],
            );
        }
        for iface in implemented {
            if !self.table.add_interface(&self.interner, id, iface)? {
                self.report(decl_node, diagnostic_codes::INHERITANCE_CYCLE, &[&class_name]);
            }
        }
        Ok(())
    }

    fn install_interface_edges(
        &mut self,
        scope: ScopeId,
        doc: &JsDoc,
        fn_name: &str,
        id: NominalId,
        decl_node: NodeIndex,
        owner: Option<NominalId>,
    ) -> GtiResult<()> {
        let arena = self.arena;
        let has_body = arena
            .function(decl_node)
            .is_some_and(|v| !arena.block_statements(v.body).is_empty());
        if has_body {
            self.report(decl_node, diagnostic_codes::INTERFACE_WITH_A_BODY, &[]);
        }
        if !doc.implements.is_empty() {
            self.report(
                decl_node,
                diagnostic_codes::CONFLICTING_IMPLEMENTED_TYPE,
                &[fn_name],
            );
        }
        let name = self.table.nominal_name(id);
        let extended =
            self.resolve_in(scope, decl_node, owner, |r, cx| r.extended_interfaces(doc, cx));
        let mut cycle = false;
        for iface in extended {
            if !self.table.is_interface(iface.id) {
                self.report(
                    decl_node,
                    diagnostic_codes::CONFLICTING_EXTENDED_TYPE,
                    &["interface", fn_name],
                );
                continue;
            }
            cycle |= !self.table.add_interface(&self.interner, id, iface)?;
        }
        if cycle {
            self.report(decl_node, diagnostic_codes::INHERITANCE_CYCLE, &[&name]);
        }
        Ok(())
    }

    /// A nominal type instantiated with its own type variables.
    pub(crate) fn self_ref(&self, id: NominalId) -> NominalRef {
        let args = self
            .table
            .nominal(id)
            .header()
            .type_parameters
            .iter()
            .map(|p| self.interner.type_var(p.clone()))
            .collect();
        NominalRef::with_args(id, args)
    }
}

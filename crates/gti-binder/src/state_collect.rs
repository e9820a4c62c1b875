//! Collection of named types.
//!
//! Walks one scope's statements (without entering nested functions) and
//! registers what type annotations may refer to: namespaces, typedefs,
//! enums, and the classes and interfaces defined by constructor/interface
//! functions. Every function literal gets its own child scope here.

use crate::error::GtiResult;
use crate::nominal::{NominalKind, ObjectShape};
use crate::scope::ScopeId;
use crate::state::GlobalTypeInfoBuilder;
use gti_ast::{FunctionName, JsDoc, NodeData, NodeIndex};
use gti_common::QualifiedName;
use gti_common::diagnostics::diagnostic_codes;
use indexmap::IndexSet;
use tracing::{debug, trace};

impl GlobalTypeInfoBuilder<'_> {
    pub(crate) fn collect_named_types(&mut self, scope: ScopeId) -> GtiResult<()> {
        for body in self.scope_bodies(scope)? {
            for node in self.shallow_post_order(body) {
                self.collect_node(scope, node)?;
            }
        }
        self.resolve_collected_types(scope);
        Ok(())
    }

    fn collect_node(&mut self, scope: ScopeId, node: NodeIndex) -> GtiResult<()> {
        let arena = self.arena;
        match arena.data(node) {
            Some(NodeData::Function { .. }) if node != self.scope(scope).root => {
                self.visit_function_early(scope, node)
            }
            Some(NodeData::Var { declarations, .. }) => {
                for &decl in declarations {
                    self.collect_declaration(scope, decl)?;
                }
                Ok(())
            }
            Some(NodeData::ExprStatement { expression }) => {
                let target = match arena.data(*expression) {
                    Some(NodeData::Assign { target, .. }) => *target,
                    _ => *expression,
                };
                let Some((object, _)) = arena.get_prop(target) else {
                    return Ok(());
                };
                if !arena.is_qualified_name(target) || arena.is_prototype_property(target) {
                    return Ok(());
                }
                let receiver_is_namespace = arena
                    .qualified_name(object)
                    .and_then(|q| self.scopes.namespace_of(scope, &q, &self.table))
                    .is_some();
                if receiver_is_namespace {
                    self.collect_declaration(scope, target)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// A declarator or a namespace-member target.
    fn collect_declaration(&mut self, scope: ScopeId, decl: NodeIndex) -> GtiResult<()> {
        let arena = self.arena;
        if arena.is_namespace_decl(decl) {
            self.visit_namespace(scope, decl)
        } else if arena.is_typedef_decl(decl) {
            self.visit_typedef(scope, decl)
        } else if arena.is_enum_decl(decl) {
            self.visit_enum(scope, decl)
        } else {
            Ok(())
        }
    }

    fn visit_namespace(&mut self, scope: ScopeId, decl: NodeIndex) -> GtiResult<()> {
        let Some(qname) = self.arena.declared_name(decl) else {
            return Ok(());
        };
        if self.scopes.is_defined(scope, &qname, &self.table) {
            return Ok(());
        }
        trace!(name = %qname, "namespace");
        let ns = self.table.new_namespace_literal(qname.clone(), decl);
        match qname.all_but_rightmost() {
            None => self.scopes.get_mut(scope).add_namespace(qname.leftmost(), ns)?,
            Some(parent) => {
                if let Some(parent) = self.scopes.namespace_of(scope, &parent, &self.table) {
                    self.table
                        .namespace_mut(parent)
                        .add_sub_namespace(qname.rightmost(), ns);
                }
            }
        }
        Ok(())
    }

    fn visit_typedef(&mut self, scope: ScopeId, decl: NodeIndex) -> GtiResult<()> {
        let arena = self.arena;
        if arena.declaration_initializer(decl).is_some() {
            self.report(decl, diagnostic_codes::CANNOT_INIT_TYPEDEF, &[]);
        }
        let Some(qname) = arena.declared_name(decl) else {
            return Ok(());
        };
        if self.scopes.is_defined(scope, &qname, &self.table) {
            return Ok(());
        }
        let Some(annotation) = arena.best_jsdoc(decl).and_then(|d| d.typedef.clone()) else {
            return Ok(());
        };
        trace!(name = %qname, "typedef");
        let td = self.table.new_typedef(qname.clone(), annotation, decl);
        match qname.all_but_rightmost() {
            None => self.scopes.get_mut(scope).add_typedef(qname.leftmost(), td)?,
            Some(parent) => {
                if let Some(parent) = self.scopes.namespace_of(scope, &parent, &self.table) {
                    self.table.namespace_mut(parent).add_typedef(qname.rightmost(), td);
                    self.scopes.get_mut(scope).typedefs.push(td);
                }
            }
        }
        Ok(())
    }

    fn visit_enum(&mut self, scope: ScopeId, decl: NodeIndex) -> GtiResult<()> {
        let arena = self.arena;
        let Some(qname) = arena.declared_name(decl) else {
            return Ok(());
        };
        if self.scopes.is_defined(scope, &qname, &self.table) {
            return Ok(());
        }
        let init = arena.declaration_initializer(decl);
        let keys = arena.object_lit_keys(init);
        if keys.is_empty() {
            self.report(decl, diagnostic_codes::MALFORMED_ENUM, &[]);
            return Ok(());
        }
        let mut members = IndexSet::new();
        for (prop, key) in keys {
            if !members.insert(key.to_string()) {
                self.report(prop, diagnostic_codes::DUPLICATE_PROP_IN_ENUM, &[key]);
            }
            if !self.convention.is_valid_enum_key(key) {
                self.report(prop, diagnostic_codes::ENUM_NOT_CONSTANT, &[key]);
            }
        }
        let annotation = arena.best_jsdoc(decl).and_then(|d| d.enum_type.clone());
        trace!(name = %qname, members = members.len(), "enum");
        let id = self.table.new_enum(
            &self.interner,
            qname.clone(),
            annotation,
            members.into_iter().collect(),
            decl,
        );
        match qname.all_but_rightmost() {
            None => self.scopes.get_mut(scope).add_enum(qname.leftmost(), id)?,
            Some(parent) => {
                if let Some(parent) = self.scopes.namespace_of(scope, &parent, &self.table) {
                    let ns = self.table.enum_namespace(id);
                    self.table
                        .namespace_mut(parent)
                        .add_sub_namespace(qname.rightmost(), ns);
                    self.scopes.get_mut(scope).qualified_enums.push(id);
                }
            }
        }
        Ok(())
    }

    /// Create the function's scope, bind it in `scope`, and register the
    /// class or interface it defines.
    fn visit_function_early(&mut self, scope: ScopeId, function: NodeIndex) -> GtiResult<()> {
        let arena = self.arena;
        let Some(view) = arena.function(function) else {
            return Ok(());
        };
        let doc = arena.best_jsdoc(function);
        let mut formals: Vec<String> = view.params.to_vec();
        if let (Some(doc), Some(last)) = (doc, view.params.last()) {
            if doc.is_rest_param(last) {
                formals.pop();
            }
        }

        let function_name = arena.function_name(function);
        let internal_name = match &function_name {
            FunctionName::Simple(name) if !self.scope(scope).is_defined_locally(name) => name.clone(),
            _ => self.ctx.next_anonymous_function_name(),
        };

        let fn_scope = self.scopes.create(
            Some(scope),
            function,
            view.name.map(str::to_string),
            formals.clone(),
        );
        {
            let s = self.scopes.get_mut(fn_scope);
            s.is_constructor = doc.is_some_and(JsDoc::is_constructor);
            s.is_interface = doc.is_some_and(JsDoc::is_interface);
            s.is_prototype_method = arena.is_prototype_method(function);
        }
        self.function_scopes.insert(function, fn_scope);
        self.function_internal_names
            .insert(function, internal_name.clone());
        let is_synthesized = internal_name.starts_with('%');
        if is_synthesized {
            self.scopes
                .get_mut(scope)
                .add_synthesized_function(&internal_name, fn_scope);
        } else {
            self.scopes.get_mut(scope).add_function(&internal_name, fn_scope)?;
        }
        debug!(name = %internal_name, scope = fn_scope.0, "function scope");

        if let Some(doc) = doc {
            for param in doc.param_names() {
                let declared = formals.iter().any(|f| f == param)
                    || (doc.is_rest_param(param) && view.params.last().is_some_and(|l| l == param));
                if !declared {
                    self.report(
                        function,
                        diagnostic_codes::INEXISTENT_PARAM,
                        &[param, &internal_name],
                    );
                }
            }
        }

        let Some(doc) = doc else {
            return Ok(());
        };
        if !doc.is_constructor_or_interface() {
            if doc.makes_struct() {
                self.report(function, diagnostic_codes::CONSTRUCTOR_REQUIRED, &["@struct"]);
            } else if doc.makes_dict() {
                self.report(function, diagnostic_codes::CONSTRUCTOR_REQUIRED, &["@dict"]);
            }
            return Ok(());
        }

        let qname = match &function_name {
            FunctionName::Anonymous => None,
            FunctionName::Simple(name) => Some(QualifiedName::new(name.clone())),
            FunctionName::Qualified { name, .. } => Some(name.clone()),
        };
        let Some(qname) = qname else {
            self.report(function, diagnostic_codes::ANONYMOUS_NOMINAL_TYPE, &[]);
            return Ok(());
        };
        let kind = if doc.is_interface() {
            NominalKind::Interface
        } else {
            NominalKind::Class
        };
        let shape = if doc.makes_struct() {
            ObjectShape::Struct
        } else if doc.makes_dict() {
            ObjectShape::Dict
        } else {
            ObjectShape::Unrestricted
        };
        let id = self
            .table
            .new_nominal(qname.clone(), kind, shape, doc.template.clone(), function);
        self.nominals_by_fn.insert(function, id);
        debug!(name = %qname, id = id.0, ?kind, "nominal type");

        match qname.all_but_rightmost() {
            None => {
                if !is_synthesized {
                    self.scopes
                        .get_mut(scope)
                        .set_function_nominal(&internal_name, id);
                }
            }
            Some(receiver) => {
                let Some(parent) = self.scopes.namespace_of(scope, &receiver, &self.table) else {
                    trace!(name = %qname, "receiver is not a namespace");
                    return Ok(());
                };
                if !self.table.namespace(parent).is_defined(qname.rightmost()) {
                    let ns = self.table.nominal_namespace(id);
                    self.table
                        .namespace_mut(parent)
                        .add_sub_namespace(qname.rightmost(), ns);
                }
            }
        }
        Ok(())
    }

    /// Resolve the typedefs and enum element types declared in `scope`.
    fn resolve_collected_types(&mut self, scope: ScopeId) {
        let typedefs = self.scope(scope).typedefs.clone();
        for td in typedefs {
            if self.table.typedef(td).resolved.is_some() {
                continue;
            }
            let site = self.table.typedef(td).def_site;
            let resolved = self.resolve_in(scope, site, None, |r, cx| r.resolve_typedef(td, cx));
            self.table.typedef_mut(td).resolved = Some(resolved);
        }
        let scope_ref = self.scope(scope);
        let enums: Vec<_> = scope_ref
            .enums
            .iter()
            .chain(&scope_ref.qualified_enums)
            .copied()
            .collect();
        for id in enums {
            if self.table.enum_type(id).element_type.is_some() {
                continue;
            }
            let site = self.table.enum_type(id).def_site;
            let annotation = self.table.enum_type(id).declared_annotation.clone();
            let element = self.resolve_in(scope, site, None, |r, cx| {
                r.resolve_enum(annotation.as_ref(), cx)
            });
            self.table.enum_mut(id).element_type = Some(element);
        }
    }
}

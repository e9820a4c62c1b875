//! Declarations of locals and properties.
//!
//! Runs after every scope's named types are collected, so annotations can
//! refer to any type visible from the declaring scope.

use crate::error::GtiResult;
use crate::namespace::NamespaceId;
use crate::property_def::PropertyDef;
use crate::scope::ScopeId;
use crate::state::GlobalTypeInfoBuilder;
use gti_ast::{JsDoc, NodeData, NodeIndex};
use gti_common::QualifiedName;
use gti_common::diagnostics::diagnostic_codes;
use gti_solver::{NominalHierarchy, NominalId, SubtypeChecker, TypeId};
use tracing::{debug, trace};

/// Which container a `x.p = ...` statement declares `p` on.
enum PropertyTarget {
    /// `this.p` inside a constructor or prototype method.
    Class,
    /// `C.prototype.p`
    Prototype,
    /// `C.p` for a constructor `C` declared in the same scope.
    Constructor(NominalId),
    /// `ns.p`
    Namespace(NamespaceId),
}

impl GlobalTypeInfoBuilder<'_> {
    pub(crate) fn process_scope(&mut self, scope: ScopeId) -> GtiResult<()> {
        self.lends_queue.clear();
        self.undeclared_uses.clear();
        for body in self.scope_bodies(scope)? {
            for node in self.shallow_post_order(body) {
                self.declare_node(scope, node)?;
            }
        }
        for obj in std::mem::take(&mut self.lends_queue) {
            self.visit_lends(scope, obj)?;
        }
        if !self.undeclared_uses.is_empty() {
            trace!(
                scope = scope.0,
                names = self.undeclared_uses.len(),
                "names used without a declaration"
            );
        }
        Ok(())
    }

    fn declare_node(&mut self, scope: ScopeId, node: NodeIndex) -> GtiResult<()> {
        let arena = self.arena;
        match arena.data(node) {
            Some(NodeData::Function { .. }) => {
                let parent = arena.parent(node);
                let is_proto_method = matches!(
                    arena.data(parent),
                    Some(NodeData::Assign { value, .. }) if *value == node
                ) && arena
                    .prototype_property_declaration(arena.parent(parent))
                    .is_some();
                // Prototype methods are declared with their property.
                if !is_proto_method {
                    self.visit_function_late(scope, node, None)?;
                }
            }
            Some(NodeData::VarDecl { name, initializer }) => {
                self.visit_var(scope, node, name, *initializer)?;
            }
            Some(NodeData::CatchClause { name, .. }) => {
                if !self.scope(scope).is_defined_locally(name) {
                    self.scopes
                        .get_mut(scope)
                        .add_local(name, Some(TypeId::UNKNOWN), false)?;
                }
            }
            Some(NodeData::Name { name }) => self.visit_name_use(scope, node, name),
            Some(NodeData::ExprStatement { expression }) => {
                let target = match arena.data(*expression) {
                    Some(NodeData::Assign { target, .. }) => *target,
                    _ => *expression,
                };
                if arena.get_prop(target).is_some() {
                    self.visit_property_declaration(scope, target)?;
                }
            }
            Some(NodeData::Cast { .. }) => {
                if let Some(annotation) = arena.jsdoc(node).and_then(|d| d.ty.as_ref()) {
                    let ty = self.resolve_in(scope, node, None, |r, cx| r.declared_type(annotation, cx));
                    self.cast_types.insert(node, ty);
                }
            }
            Some(NodeData::ObjectLit { properties }) => {
                if arena.jsdoc(node).is_some_and(|d| d.lends.is_some()) {
                    self.lends_queue.push(node);
                }
                for &prop in properties {
                    let Some(doc) = arena.jsdoc(prop) else {
                        continue;
                    };
                    if let Some(annotation) = doc.ty.as_ref() {
                        let ty = self.resolve_in(scope, prop, None, |r, cx| r.declared_type(annotation, cx));
                        self.obj_lit_prop_types.insert(prop, ty);
                    }
                    if doc.is_constant() {
                        self.report(prop, diagnostic_codes::MISPLACED_CONST_ANNOTATION, &[]);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn visit_name_use(&mut self, scope: ScopeId, node: NodeIndex, name: &str) {
        if name == "undefined" {
            return;
        }
        if self.scopes.is_outer_var_early(scope, name) {
            self.scopes.get_mut(scope).add_outer_var(name);
            return;
        }
        let s = self.scope(scope);
        let is_typedef = self
            .scopes
            .get_typedef(scope, &QualifiedName::new(name), &self.table)
            .is_some();
        if !is_typedef && s.name.as_deref() != Some(name) && !s.is_defined_locally(name) {
            self.undeclared_uses
                .entry(name.to_string())
                .or_default()
                .push(node);
        }
    }

    // =========================================================================
    // Variables
    // =========================================================================

    fn visit_var(
        &mut self,
        scope: ScopeId,
        decl: NodeIndex,
        name: &str,
        initializer: NodeIndex,
    ) -> GtiResult<()> {
        let arena = self.arena;
        if arena.is_namespace_decl(decl) || arena.is_typedef_decl(decl) || arena.is_enum_decl(decl) {
            // Collected already; only reached when a kind check failed there.
            if !self.scope(scope).is_defined_locally(name) {
                self.scopes
                    .get_mut(scope)
                    .add_local(name, Some(TypeId::UNKNOWN), false)?;
            }
            return Ok(());
        }
        if arena.function(initializer).is_some() || self.scope(scope).is_defined_locally(name) {
            return Ok(());
        }
        self.undeclared_uses.remove(name);
        let is_const = arena.has_const_annotation(decl);
        let mut declared = self.var_type_from_annotation(scope, decl, name);
        if is_const && declared.is_none() && !self.may_warn_about_no_init(decl) {
            declared = self.infer_const_type(scope, decl);
        }
        trace!(name, ?declared, is_const, "local");
        self.scopes.get_mut(scope).add_local(name, declared, is_const)
    }

    /// `@type` of a declarator, from its own comment or the statement's.
    fn var_type_from_annotation(&mut self, scope: ScopeId, decl: NodeIndex, name: &str) -> Option<TypeId> {
        let arena = self.arena;
        let var = arena.parent(decl);
        let var_annotation = arena.jsdoc(var).and_then(|d| d.ty.as_ref());
        let decl_annotation = arena.jsdoc(decl).and_then(|d| d.ty.as_ref());
        if let (Some(_), Some(NodeData::Var { declarations, .. })) = (var_annotation, arena.data(var)) {
            if declarations.len() > 1 && declarations.first() == Some(&decl) {
                self.report(var, diagnostic_codes::MULTIPLE_VAR_DEF, &[]);
            }
        }
        if var_annotation.is_some() && decl_annotation.is_some() {
            self.report(decl, diagnostic_codes::DUPLICATE_JSDOC, &[name]);
        }
        let annotation = decl_annotation.or(var_annotation)?;
        Some(self.resolve_in(scope, decl, None, |r, cx| r.declared_type(annotation, cx)))
    }

    // =========================================================================
    // Properties
    // =========================================================================

    fn classify_property(&mut self, scope: ScopeId, getprop: NodeIndex) -> Option<PropertyTarget> {
        let arena = self.arena;
        let (object, _) = arena.get_prop(getprop)?;
        let s = self.scope(scope);
        if arena.is_this(object) && (s.is_constructor || s.is_prototype_method) {
            if s.is_prototype_method && arena.has_const_annotation(getprop) {
                self.report(getprop, diagnostic_codes::MISPLACED_CONST_ANNOTATION, &[]);
            }
            return Some(PropertyTarget::Class);
        }
        if arena.is_prototype_property(getprop) {
            return Some(PropertyTarget::Prototype);
        }
        if let Some(id) = self.static_property_owner(scope, object) {
            return Some(PropertyTarget::Constructor(id));
        }
        if let Some(ns) = arena
            .qualified_name(object)
            .and_then(|q| self.scopes.namespace_of(scope, &q, &self.table))
        {
            return Some(PropertyTarget::Namespace(ns));
        }
        if arena.has_const_annotation(getprop) {
            self.report(getprop, diagnostic_codes::MISPLACED_CONST_ANNOTATION, &[]);
        }
        None
    }

    /// The class of a constructor bound by a simple name in this very
    /// scope.
    fn static_property_owner(&self, scope: ScopeId, object: NodeIndex) -> Option<NominalId> {
        let name = self.arena.qualified_name(object)?;
        if !name.is_identifier() {
            return None;
        }
        let s = self.scope(scope);
        if !s.is_local_function(name.leftmost()) {
            return None;
        }
        let fn_scope = s.local_function_scope(name.leftmost())?;
        self.scope(fn_scope)
            .declared_type
            .as_ref()?
            .constructed_type
            .as_ref()
            .map(|c| c.id)
    }

    fn visit_property_declaration(&mut self, scope: ScopeId, getprop: NodeIndex) -> GtiResult<()> {
        match self.classify_property(scope, getprop) {
            Some(PropertyTarget::Class) => self.visit_class_property(scope, getprop),
            Some(PropertyTarget::Prototype) => self.visit_prototype_property(scope, getprop),
            Some(PropertyTarget::Constructor(id)) => {
                let ns = self.table.nominal_namespace(id);
                self.visit_namespace_property(scope, getprop, ns, false)
            }
            Some(PropertyTarget::Namespace(ns)) => {
                let arena = self.arena;
                let declares_named_type = arena
                    .qualified_name(getprop)
                    .is_some_and(|q| self.scopes.namespace_of(scope, &q, &self.table).is_some())
                    || arena.is_typedef_decl(getprop);
                if declares_named_type {
                    return Ok(());
                }
                self.visit_namespace_property(scope, getprop, ns, true)
            }
            None => Ok(()),
        }
    }

    /// A namespace member or a static member of a constructor.
    /// `guess_undeclared` guesses the type of an unannotated member from its
    /// value.
    fn visit_namespace_property(
        &mut self,
        scope: ScopeId,
        getprop: NodeIndex,
        ns: NamespaceId,
        guess_undeclared: bool,
    ) -> GtiResult<()> {
        let arena = self.arena;
        let Some((_, pname)) = arena.get_prop(getprop) else {
            return Ok(());
        };
        let doc = arena.best_jsdoc(getprop);
        let init = arena.declaration_initializer(getprop);
        let mut declared = self.property_type_from_annotation(scope, getprop, None);
        if declared.is_none() && doc.is_some_and(JsDoc::contains_function_declaration) {
            // The value's own signature becomes the member's declared type.
            declared = self.simple_infer_expr_type(scope, init).filter(|_| arena.function(init).is_some());
        }
        let is_const = arena.has_const_annotation(getprop);

        if declared.is_none() && !is_const {
            let guessed = if guess_undeclared {
                self.simple_infer_expr_type(scope, init)
            } else {
                None
            };
            self.table
                .namespace_mut(ns)
                .add_undeclared_property(pname, guessed.unwrap_or(TypeId::UNKNOWN));
            return Ok(());
        }

        if let Some(previous) = self.table.namespace(ns).property(pname).map(|p| p.declared_type) {
            if !suppresses_duplicate(doc, declared, Some(previous)) {
                let owner = self.table.namespace(ns).name.to_string();
                self.report(
                    getprop,
                    diagnostic_codes::REDECLARED_PROPERTY,
                    &[pname, &owner],
                );
                return Ok(());
            }
        }
        if is_const && declared.is_none() && !self.may_warn_about_no_init(getprop) {
            declared = self.infer_const_type(scope, getprop);
        }
        trace!(property = pname, ?declared, is_const, "namespace property");
        self.table
            .namespace_mut(ns)
            .add_property(pname, declared.unwrap_or(TypeId::UNKNOWN), is_const);
        Ok(())
    }

    fn visit_prototype_property(&mut self, scope: ScopeId, getprop: NodeIndex) -> GtiResult<()> {
        let arena = self.arena;
        let Some((_, pname)) = arena.get_prop(getprop) else {
            return Ok(());
        };
        let init = arena.declaration_initializer(getprop);
        let init_is_function = arena.function(init).is_some();
        let ctor_name = arena
            .prototype_owner(getprop)
            .and_then(|owner| arena.qualified_name(owner));
        let Some((ctor_name, id)) = ctor_name.and_then(|q| {
            let id = self.scopes.get_nominal_type(scope, &q, &self.table)?;
            Some((q, id))
        }) else {
            if init_is_function {
                self.visit_function_late(scope, init, None)?;
            }
            return Ok(());
        };
        if !self.scopes.is_defined(scope, &ctor_name, &self.table) {
            self.report(getprop, diagnostic_codes::CTOR_IN_DIFFERENT_SCOPE, &[]);
        }

        let doc = arena.best_jsdoc(getprop);
        let (def, declared) = if init_is_function {
            let method_scope = self.visit_function_late(scope, init, Some(id))?;
            let method_type = self.scope(method_scope).declared_type.clone().unwrap_or_default();
            let fn_type = method_type.to_function_type(&self.interner);
            (PropertyDef::method(getprop, method_type, method_scope), Some(fn_type))
        } else if let Some(doc) = doc.filter(|d| d.contains_function_declaration()) {
            let formals: Vec<String> = doc
                .params
                .iter()
                .filter(|p| !p.rest)
                .map(|p| p.name.clone())
                .collect();
            let method_type =
                self.compute_fn_declared_type(scope, Some(doc), pname, getprop, Some(id), &formals)?;
            let fn_type = method_type.to_function_type(&self.interner);
            let def = PropertyDef {
                def_site: getprop,
                method_type: Some(method_type),
                method_scope: None,
            };
            (def, Some(fn_type))
        } else {
            (
                PropertyDef::new(getprop),
                self.property_type_from_annotation(scope, getprop, Some(id)),
            )
        };
        self.property_defs.insert(id, pname, def);

        let is_const = arena.has_const_annotation(getprop);
        if declared.is_none() && !is_const {
            let raw = self.table.raw_nominal_mut(id, pname)?;
            if raw.own_property(pname).is_none() {
                raw.add_proto_property(pname, None, false);
            }
            return Ok(());
        }
        if self.may_warn_about_existing_prop(id, pname, getprop, declared) {
            return Ok(());
        }
        let mut declared = declared;
        if is_const && declared.is_none() && !self.may_warn_about_no_init(getprop) {
            declared = self.infer_const_type(scope, getprop);
        }
        debug!(class = %ctor_name, property = pname, ?declared, "prototype property");
        self.table
            .raw_nominal_mut(id, pname)?
            .add_proto_property(pname, declared, is_const);
        Ok(())
    }

    fn visit_class_property(&mut self, scope: ScopeId, getprop: NodeIndex) -> GtiResult<()> {
        let arena = self.arena;
        let Some((_, pname)) = arena.get_prop(getprop) else {
            return Ok(());
        };
        let Some(this_type) = self
            .scope(scope)
            .declared_type
            .as_ref()
            .and_then(|d| d.this_type.clone())
        else {
            return Ok(());
        };
        let id = this_type.id;
        let mut declared = self.property_type_from_annotation(scope, getprop, Some(id));
        let is_const = arena.has_const_annotation(getprop);
        let may_add = self.may_add_prop_to_type(scope, getprop, id);

        if declared.is_some() || is_const {
            self.may_warn_about_existing_prop(id, pname, getprop, declared);
            if is_const && declared.is_none() && !self.may_warn_about_no_init(getprop) {
                declared = self.infer_const_type(scope, getprop);
            }
            if may_add {
                self.table
                    .raw_nominal_mut(id, pname)?
                    .add_class_property(pname, declared, is_const);
            }
        } else if may_add {
            let raw = self.table.raw_nominal_mut(id, pname)?;
            if raw.own_property(pname).is_none() {
                raw.add_class_property(pname, None, false);
            }
        }
        self.property_defs.insert(id, pname, PropertyDef::new(getprop));
        Ok(())
    }

    /// Struct instances only get properties assigned in their constructor.
    fn may_add_prop_to_type(&self, scope: ScopeId, getprop: NodeIndex, id: NominalId) -> bool {
        if !self.table.nominal(id).header().is_struct() {
            return true;
        }
        let is_assign_target = matches!(
            self.arena.data(self.arena.parent(getprop)),
            Some(NodeData::Assign { target, .. }) if *target == getprop
        );
        is_assign_target && self.scope(scope).is_constructor
    }

    /// Report a second declaration of an already-typed property. Returns
    /// whether it was reported.
    fn may_warn_about_existing_prop(
        &mut self,
        id: NominalId,
        pname: &str,
        site: NodeIndex,
        declared: Option<TypeId>,
    ) -> bool {
        let previous = self
            .table
            .nominal(id)
            .property(pname)
            .and_then(|p| p.declared_type);
        let Some(previous) = previous else {
            return false;
        };
        if suppresses_duplicate(self.arena.best_jsdoc(site), declared, Some(previous)) {
            return false;
        }
        let class_name = self.table.nominal_name(id);
        self.report(
            site,
            diagnostic_codes::REDECLARED_PROPERTY,
            &[pname, &class_name],
        );
        true
    }

    fn property_type_from_annotation(
        &mut self,
        scope: ScopeId,
        getprop: NodeIndex,
        owner: Option<NominalId>,
    ) -> Option<TypeId> {
        let annotation = self.arena.best_jsdoc(getprop)?.ty.as_ref()?;
        Some(self.resolve_in(scope, getprop, owner, |r, cx| r.declared_type(annotation, cx)))
    }

    // =========================================================================
    // @lends
    // =========================================================================

    fn visit_lends(&mut self, scope: ScopeId, obj: NodeIndex) -> GtiResult<()> {
        let arena = self.arena;
        let Some(target) = arena.jsdoc(obj).and_then(|d| d.lends.as_deref()) else {
            return Ok(());
        };
        if let Some(class) = target.strip_suffix(".prototype") {
            return self.lend_to_prototype(scope, obj, target, class);
        }
        let Some(qname) = QualifiedName::from_dotted(target) else {
            self.report(obj, diagnostic_codes::LENDS_ON_NON_OBJECT, &[target, "unknown"]);
            return Ok(());
        };
        let namespace = self.scopes.namespace_of(scope, &qname, &self.table);
        let borrower = match namespace {
            Some(ns) => Some(self.table.namespace_type(&self.interner, ns)),
            None if qname.is_identifier() => {
                self.scopes
                    .declared_type_of(scope, qname.leftmost(), &self.table, &self.interner)
            }
            None => None,
        };
        let Some(borrower) = borrower.filter(|t| !t.is_unknown()) else {
            self.report(obj, diagnostic_codes::LENDS_ON_NON_OBJECT, &[target, "unknown"]);
            return Ok(());
        };
        let is_object = SubtypeChecker::new(&self.interner, &self.table).is_subtype(borrower, TypeId::TOP_OBJECT);
        if !is_object {
            let text = self.type_string(borrower);
            self.report(obj, diagnostic_codes::LENDS_ON_NON_OBJECT, &[target, &text]);
            return Ok(());
        }
        let Some(ns) = namespace else {
            return Ok(());
        };
        for (prop, key) in arena.object_lit_keys(obj) {
            let ty = self.lent_property_type(scope, prop);
            self.table.namespace_mut(ns).add_undeclared_property(key, ty);
        }
        Ok(())
    }

    /// `@lends {C.prototype}`: the literal's keys become prototype
    /// properties of `C`.
    fn lend_to_prototype(&mut self, scope: ScopeId, obj: NodeIndex, target: &str, class: &str) -> GtiResult<()> {
        let arena = self.arena;
        let id = QualifiedName::from_dotted(class)
            .and_then(|q| self.scopes.get_nominal_type(scope, &q, &self.table));
        let Some(id) = id else {
            self.report(obj, diagnostic_codes::LENDS_ON_NON_OBJECT, &[target, "unknown"]);
            return Ok(());
        };
        for (prop, key) in arena.object_lit_keys(obj) {
            let ty = self.lent_property_type(scope, prop);
            let raw = self.table.raw_nominal_mut(id, key)?;
            if raw.own_property(key).is_none() {
                raw.add_proto_property(key, Some(ty), false);
            }
            self.property_defs.insert(id, key, PropertyDef::new(prop));
        }
        Ok(())
    }

    fn lent_property_type(&self, scope: ScopeId, prop: NodeIndex) -> TypeId {
        if let Some(&ty) = self.obj_lit_prop_types.get(&prop) {
            return ty;
        }
        let value = match self.arena.data(prop) {
            Some(NodeData::PropertyAssignment { value, .. }) => *value,
            _ => NodeIndex::NONE,
        };
        self.simple_infer_expr_type(scope, value)
            .unwrap_or(TypeId::UNKNOWN)
    }
}

/// `@suppress {duplicate}` on a redeclaration with the same type.
fn suppresses_duplicate(doc: Option<&JsDoc>, declared: Option<TypeId>, previous: Option<TypeId>) -> bool {
    doc.is_some_and(|d| d.is_suppressed("duplicate"))
        && declared.is_some()
        && declared == previous
}

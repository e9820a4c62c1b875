//! Builder state and the pipeline driver.
//!
//! The passes are split across `state_*.rs` files as `impl` blocks on
//! [`GlobalTypeInfoBuilder`]:
//! - `state_collect`: named-type collection and child scopes
//! - `state_declare`: declarations of locals and properties, `@lends`
//! - `state_function_type`: function signatures and inheritance edges
//! - `state_const_infer`: initializer inference for constants
//! - `state_finalize`: the inheritance finalizer

use crate::context::CompilationContext;
use crate::error::{GtiError, GtiResult};
use crate::options::{CodingConvention, GlobalTypeInfoOptions};
use crate::property_def::PropertyDefs;
use crate::registry::ScopeView;
use crate::resolver::{DeclaredTypeResolver, JsDocTypeResolver, ResolveContext};
use crate::scope::{Scope, ScopeId, ScopeTree};
use crate::type_table::TypeTable;
use gti_ast::{NodeArena, NodeIndex, Program};
use gti_common::Diagnostic;
use gti_common::diagnostics::diagnostic_codes;
use gti_solver::{NominalId, TypeFormatter, TypeId, TypeInterner};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Counters reported by the inheritance finalizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FinalizeStats {
    pub finalized: usize,
    /// Times a type was pushed back because a supertype was not ready.
    pub requeues: usize,
}

pub struct GlobalTypeInfoBuilder<'a> {
    pub(crate) arena: &'a NodeArena,
    pub(crate) file_name: String,
    pub(crate) root: NodeIndex,
    pub(crate) externs_root: NodeIndex,
    pub(crate) options: GlobalTypeInfoOptions,
    pub(crate) convention: Box<dyn CodingConvention>,
    pub(crate) resolver: Box<dyn DeclaredTypeResolver>,
    pub(crate) ctx: CompilationContext,
    pub(crate) interner: TypeInterner,
    pub(crate) table: TypeTable,
    pub(crate) scopes: ScopeTree,
    pub(crate) global_scope: ScopeId,
    /// Scope created for each function literal.
    pub(crate) function_scopes: FxHashMap<NodeIndex, ScopeId>,
    /// Name each function literal is bound under in its parent scope.
    pub(crate) function_internal_names: FxHashMap<NodeIndex, String>,
    /// Class or interface defined by a constructor/interface literal.
    pub(crate) nominals_by_fn: FxHashMap<NodeIndex, NominalId>,
    pub(crate) property_defs: PropertyDefs,
    pub(crate) cast_types: FxHashMap<NodeIndex, TypeId>,
    pub(crate) obj_lit_prop_types: FxHashMap<NodeIndex, TypeId>,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// `@lends` literals of the scope being declared.
    pub(crate) lends_queue: Vec<NodeIndex>,
    /// Reads of names with no visible declaration in the scope being
    /// declared. Kept for a use-before-declaration check; never reported.
    pub(crate) undeclared_uses: FxHashMap<String, Vec<NodeIndex>>,
    pub(crate) finalize_stats: FinalizeStats,
}

impl<'a> GlobalTypeInfoBuilder<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self::with_options(program, GlobalTypeInfoOptions::default())
    }

    pub fn with_options(program: &'a Program, options: GlobalTypeInfoOptions) -> Self {
        let mut scopes = ScopeTree::new();
        let global_scope = scopes.create(None, program.root, None, Vec::new());
        Self {
            arena: &program.arena,
            file_name: program.file_name.clone(),
            root: program.root,
            externs_root: program.externs_root,
            convention: Box::new(options.enum_key_style),
            options,
            resolver: Box::new(JsDocTypeResolver::new()),
            ctx: CompilationContext::new(),
            interner: TypeInterner::new(),
            table: TypeTable::new(),
            scopes,
            global_scope,
            function_scopes: FxHashMap::default(),
            function_internal_names: FxHashMap::default(),
            nominals_by_fn: FxHashMap::default(),
            property_defs: PropertyDefs::default(),
            cast_types: FxHashMap::default(),
            obj_lit_prop_types: FxHashMap::default(),
            diagnostics: Vec::new(),
            lends_queue: Vec::new(),
            undeclared_uses: FxHashMap::default(),
            finalize_stats: FinalizeStats::default(),
        }
    }

    /// Replace the annotation resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Box<dyn DeclaredTypeResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    pub fn table(&self) -> &TypeTable {
        &self.table
    }

    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }

    /// Collect and declare every scope, outer to inner.
    ///
    /// Named types of all scopes are collected before anything is declared,
    /// so annotations may refer to types declared later in the file or in
    /// an enclosing function.
    pub fn build_scopes(&mut self) -> GtiResult<()> {
        let mut index = 0;
        while index < self.scopes.len() {
            let scope = ScopeId(index as u32);
            debug!(scope = index, "collecting named types");
            self.collect_named_types(scope)?;
            index += 1;
        }
        debug!(scopes = self.scopes.len(), "scope tree built");
        for index in 0..self.scopes.len() {
            let scope = ScopeId(index as u32);
            debug!(scope = index, "processing declarations");
            self.process_scope(scope)?;
        }
        Ok(())
    }

    /// Report what the resolver deferred and flatten every scope into the
    /// result.
    pub fn finish(mut self) -> GlobalTypeInfo {
        if self.options.report_unknown_type_names {
            let mut seen = FxHashSet::default();
            for (site, name) in self.resolver.take_unknown_type_names() {
                if seen.insert((site, name.clone())) {
                    self.report(site, diagnostic_codes::UNRECOGNIZED_TYPE_NAME, &[&name]);
                }
            }
        } else {
            self.resolver.take_unknown_type_names();
        }
        for (site, text) in self.resolver.take_warnings() {
            self.report(site, diagnostic_codes::BAD_JSDOC_ANNOTATION, &[&text]);
        }
        self.property_defs.clear();

        let ids: Vec<ScopeId> = self.scopes.iter().map(|s| s.id).collect();
        for &id in &ids {
            self.scopes.compact(id, &self.table, &self.interner);
        }
        // Inner scopes before the scopes that contain them.
        let order = ids.into_iter().rev().collect();
        debug!(
            diagnostics = self.diagnostics.len(),
            nominals = self.table.nominal_count(),
            "global type info complete"
        );
        GlobalTypeInfo {
            scopes: self.scopes,
            order,
            global_scope: self.global_scope,
            table: self.table,
            interner: self.interner,
            function_scopes: self.function_scopes,
            cast_types: self.cast_types,
            obj_lit_prop_types: self.obj_lit_prop_types,
            diagnostics: self.diagnostics,
            finalize_stats: self.finalize_stats,
        }
    }

    // =========================================================================
    // Helpers shared by the passes
    // =========================================================================

    pub(crate) fn report(&mut self, node: NodeIndex, code: u32, args: &[&str]) {
        let span = self.arena.span(node);
        debug!(code, node = node.0, ?args, "diagnostic");
        self.diagnostics.push(Diagnostic::from_code(
            &self.file_name,
            span.start,
            span.len(),
            code,
            args,
        ));
    }

    /// Run `f` with the resolver and a context for resolving annotations
    /// attached to `site` in `scope`.
    pub(crate) fn resolve_in<R>(
        &mut self,
        scope: ScopeId,
        site: NodeIndex,
        owner: Option<NominalId>,
        f: impl FnOnce(&mut dyn DeclaredTypeResolver, &ResolveContext<'_>) -> R,
    ) -> R {
        let view = ScopeView::new(&self.scopes, &self.table, &self.interner, scope);
        let cx = ResolveContext {
            registry: &view,
            site,
            owner,
            type_parameters: &[],
        };
        f(self.resolver.as_mut(), &cx)
    }

    pub(crate) fn type_string(&self, ty: TypeId) -> String {
        TypeFormatter::new(&self.interner, &self.table).format(ty)
    }

    pub(crate) fn scope(&self, id: ScopeId) -> &Scope {
        self.scopes.get(id)
    }

    /// Nodes of `root` in post-order, without entering nested function
    /// bodies. Function literals themselves are included.
    pub(crate) fn shallow_post_order(&self, root: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![(root, false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                out.push(node);
                continue;
            }
            stack.push((node, true));
            if node != root && self.arena.function(node).is_some() {
                continue;
            }
            for child in self.arena.children(node).into_iter().rev() {
                stack.push((child, false));
            }
        }
        out
    }

    /// Statement lists walked for `scope`: externs then the main script
    /// for the top level, the body for a function.
    pub(crate) fn scope_bodies(&self, scope: ScopeId) -> GtiResult<Vec<NodeIndex>> {
        if scope == self.global_scope {
            return Ok([self.externs_root, self.root]
                .into_iter()
                .filter(|r| r.is_some())
                .collect());
        }
        let root = self.scope(scope).root;
        let view = self.arena.function(root).ok_or_else(|| GtiError::WrongNodeKind {
            node: root,
            expected: "Function",
            found: self.arena.get(root).map_or("<none>", |n| n.kind_name()),
        })?;
        Ok(vec![view.body])
    }

    pub(crate) fn function_scope(&self, function: NodeIndex) -> GtiResult<ScopeId> {
        self.function_scopes
            .get(&function)
            .copied()
            .ok_or_else(|| GtiError::UnknownFunctionScope {
                name: self.internal_name(function).to_string(),
            })
    }

    pub(crate) fn internal_name(&self, function: NodeIndex) -> &str {
        self.function_internal_names
            .get(&function)
            .map_or("<anonymous>", String::as_str)
    }
}

/// Result of the pipeline.
#[derive(Debug)]
pub struct GlobalTypeInfo {
    scopes: ScopeTree,
    /// Inner scopes first.
    order: Vec<ScopeId>,
    global_scope: ScopeId,
    table: TypeTable,
    interner: TypeInterner,
    function_scopes: FxHashMap<NodeIndex, ScopeId>,
    cast_types: FxHashMap<NodeIndex, TypeId>,
    obj_lit_prop_types: FxHashMap<NodeIndex, TypeId>,
    diagnostics: Vec<Diagnostic>,
    finalize_stats: FinalizeStats,
}

impl GlobalTypeInfo {
    /// Every scope; a scope always precedes the scopes enclosing it.
    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.order.iter().map(|&id| self.scopes.get(id))
    }

    pub fn scope_ids(&self) -> &[ScopeId] {
        &self.order
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        self.scopes.get(id)
    }

    pub fn scope_tree(&self) -> &ScopeTree {
        &self.scopes
    }

    pub fn global_scope(&self) -> ScopeId {
        self.global_scope
    }

    /// Scope of a function literal.
    pub fn function_scope(&self, function: NodeIndex) -> Option<ScopeId> {
        self.function_scopes.get(&function).copied()
    }

    pub fn declared_type_of(&self, scope: ScopeId, name: &str) -> Option<TypeId> {
        self.scopes
            .declared_type_of(scope, name, &self.table, &self.interner)
    }

    pub fn cast_type(&self, cast: NodeIndex) -> Option<TypeId> {
        self.cast_types.get(&cast).copied()
    }

    /// Declared type of an annotated object-literal property.
    pub fn object_lit_prop_type(&self, prop: NodeIndex) -> Option<TypeId> {
        self.obj_lit_prop_types.get(&prop).copied()
    }

    pub fn table(&self) -> &TypeTable {
        &self.table
    }

    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn finalize_stats(&self) -> FinalizeStats {
        self.finalize_stats
    }

    pub fn format_type(&self, ty: TypeId) -> String {
        TypeFormatter::new(&self.interner, &self.table).format(ty)
    }
}

/// Run the whole pipeline over `program`.
pub fn process(program: &Program, options: &GlobalTypeInfoOptions) -> GtiResult<GlobalTypeInfo> {
    let mut builder = GlobalTypeInfoBuilder::with_options(program, options.clone());
    builder.build_scopes()?;
    builder.finalize_nominal_types()?;
    Ok(builder.finish())
}

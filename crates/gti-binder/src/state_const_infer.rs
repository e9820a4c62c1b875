//! Types of unannotated constants, guessed from their initializers.

use crate::scope::{Binding, ScopeId};
use crate::state::GlobalTypeInfoBuilder;
use gti_ast::{BinaryOp, NodeData, NodeIndex, UnaryOp};
use gti_common::diagnostics::diagnostic_codes;
use gti_common::limits::MAX_CONST_INFER_DEPTH;
use gti_solver::{NominalHierarchy, NominalRef, TypeData, TypeId};

impl GlobalTypeInfoBuilder<'_> {
    /// Report a constant declared without a value. Returns whether it was
    /// reported. Declarations in externs may omit the value.
    pub(crate) fn may_warn_about_no_init(&mut self, decl: NodeIndex) -> bool {
        let arena = self.arena;
        if arena.is_from_externs(decl) || arena.declaration_initializer(decl).is_some() {
            return false;
        }
        self.report(decl, diagnostic_codes::CONST_WITHOUT_INITIALIZER, &[]);
        true
    }

    /// Type of a constant with no annotation, from its initializer.
    pub(crate) fn infer_const_type(&mut self, scope: ScopeId, decl: NodeIndex) -> Option<TypeId> {
        let arena = self.arena;
        if arena.is_from_externs(decl) {
            self.report(decl, diagnostic_codes::COULD_NOT_INFER_CONST_TYPE, &[]);
            return None;
        }
        let init = arena.declaration_initializer(decl);
        let inferred = self.simple_infer_expr_type(scope, init);
        if inferred.is_none() {
            self.report(decl, diagnostic_codes::COULD_NOT_INFER_CONST_TYPE, &[]);
        }
        inferred
    }

    /// A cheap syntactic guess at the type of `expr`. `None` when no rule
    /// applies.
    pub(crate) fn simple_infer_expr_type(&self, scope: ScopeId, expr: NodeIndex) -> Option<TypeId> {
        self.infer_at_depth(scope, expr, 0)
    }

    fn infer_at_depth(&self, scope: ScopeId, expr: NodeIndex, depth: u32) -> Option<TypeId> {
        if depth > MAX_CONST_INFER_DEPTH {
            return None;
        }
        let infer = |e: NodeIndex| self.infer_at_depth(scope, e, depth + 1);
        match self.arena.data(expr)? {
            NodeData::Number { .. } => Some(TypeId::NUMBER),
            NodeData::Str { .. } => Some(TypeId::STRING),
            NodeData::True => Some(TypeId::TRUE),
            NodeData::False => Some(TypeId::FALSE),
            NodeData::Null => Some(TypeId::NULL),
            NodeData::Unary { op, .. } => match op {
                UnaryOp::Neg | UnaryOp::Pos | UnaryOp::BitNot | UnaryOp::Inc | UnaryOp::Dec => {
                    Some(TypeId::NUMBER)
                }
                UnaryOp::TypeOf => Some(TypeId::STRING),
                UnaryOp::Not => Some(TypeId::BOOLEAN),
                UnaryOp::Void => Some(TypeId::UNDEFINED),
                UnaryOp::Delete => None,
            },
            NodeData::Binary { op, left, right } => match op {
                BinaryOp::Add => {
                    let (l, r) = (infer(*left), infer(*right));
                    if l == Some(TypeId::STRING) || r == Some(TypeId::STRING) {
                        Some(TypeId::STRING)
                    } else if l == Some(TypeId::NUMBER) && r == Some(TypeId::NUMBER) {
                        Some(TypeId::NUMBER)
                    } else {
                        None
                    }
                }
                BinaryOp::Comma => infer(*right),
                op if op.is_arithmetic_or_bitwise() => Some(TypeId::NUMBER),
                op if op.is_comparison() => Some(TypeId::BOOLEAN),
                _ => None,
            },
            NodeData::Name { name } => {
                if name == "undefined" {
                    return Some(TypeId::UNDEFINED);
                }
                if let Some((_, Binding::Namespace(_))) = self.scopes.lookup(scope, name) {
                    return None;
                }
                self.scopes
                    .declared_type_of(scope, name, &self.table, &self.interner)
            }
            NodeData::This => self
                .scopes
                .declared_type_of(scope, "this", &self.table, &self.interner),
            NodeData::ObjectLit { properties } => {
                let mut props = Vec::with_capacity(properties.len());
                for &prop in properties {
                    let Some(NodeData::PropertyAssignment { key, value }) = self.arena.data(prop) else {
                        return None;
                    };
                    let ty = self
                        .obj_lit_prop_types
                        .get(&prop)
                        .copied()
                        .or_else(|| infer(*value))?;
                    props.push((key.clone(), ty));
                }
                Some(self.interner.object(props))
            }
            NodeData::GetProp { object, property } => {
                let namespace = self
                    .arena
                    .qualified_name(*object)
                    .and_then(|q| self.scopes.namespace_of(scope, &q, &self.table));
                if let Some(ns) = namespace {
                    let ns = self.table.namespace(ns);
                    return ns
                        .property(property)
                        .map(|p| p.declared_type)
                        .or_else(|| ns.undeclared_property(property));
                }
                let receiver = infer(*object)?;
                self.property_type(receiver, property)
            }
            NodeData::Call { callee, .. } => {
                let callee = infer(*callee)?;
                self.interner.function_shape(callee).map(|f| f.returns)
            }
            NodeData::New { callee, .. } => {
                let callee = infer(*callee)?;
                let shape = self.interner.function_shape(callee)?;
                match shape.constructs {
                    Some(id) => Some(self.interner.nominal(self.self_ref(id))),
                    None => Some(shape.returns),
                }
            }
            NodeData::Function { .. } => {
                let fn_scope = self.function_scopes.get(&expr)?;
                self.scope(*fn_scope)
                    .declared_type
                    .as_ref()
                    .map(|d| d.to_function_type(&self.interner))
            }
            NodeData::Cast { .. } => self.cast_types.get(&expr).copied(),
            _ => None,
        }
    }

    fn property_type(&self, receiver: TypeId, name: &str) -> Option<TypeId> {
        match self.interner.lookup(receiver)? {
            TypeData::Object(_) => self.interner.object_property(receiver, name),
            TypeData::Nominal(NominalRef { id, .. }) => self.table.instance_property(id, name),
            _ => None,
        }
    }
}

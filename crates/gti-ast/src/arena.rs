//! The node arena and structural queries over it.

use crate::doc::JsDoc;
use crate::node::{BinaryOp, Node, NodeData, NodeFlags, NodeIndex, VarKind};
use gti_common::{QualifiedName, Span};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// The name a function literal is known by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FunctionName {
    /// No name on the literal, its declarator, or its assignment target.
    Anonymous,
    /// `function f() {}`, `var f = function() {}`, `f = function() {}`.
    Simple(String),
    /// `ns.Foo = function() {}`; `target` is the assignment's left side.
    Qualified {
        name: QualifiedName,
        target: NodeIndex,
    },
}

/// View of a function literal's parts.
#[derive(Clone, Copy, Debug)]
pub struct FunctionView<'a> {
    pub name: Option<&'a str>,
    pub params: &'a [String],
    pub body: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    docs: FxHashMap<NodeIndex, JsDoc>,
}

impl NodeArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, data: NodeData, span: Span) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            data,
            span,
            parent: NodeIndex::NONE,
            flags: NodeFlags::empty(),
        });
        index
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn data(&self, index: NodeIndex) -> Option<&NodeData> {
        self.get(index).map(|n| &n.data)
    }

    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |n| n.parent)
    }

    pub fn span(&self, index: NodeIndex) -> Span {
        self.get(index).map_or_else(Span::default, |n| n.span)
    }

    pub fn is_from_externs(&self, index: NodeIndex) -> bool {
        self.get(index).is_some_and(Node::is_from_externs)
    }

    pub fn set_doc(&mut self, index: NodeIndex, doc: JsDoc) {
        self.docs.insert(index, doc);
    }

    /// The documentation comment attached directly to `index`.
    pub fn jsdoc(&self, index: NodeIndex) -> Option<&JsDoc> {
        self.docs.get(&index)
    }

    /// The comment that documents `index`, looking through the assignment,
    /// declarator or statement that carries it.
    pub fn best_jsdoc(&self, index: NodeIndex) -> Option<&JsDoc> {
        if let Some(doc) = self.jsdoc(index) {
            return Some(doc);
        }
        let parent = self.parent(index);
        match self.data(parent)? {
            NodeData::Assign { .. } | NodeData::VarDecl { .. } => self.best_jsdoc(parent),
            NodeData::Var { declarations, .. } if declarations.len() == 1 => self.jsdoc(parent),
            NodeData::ExprStatement { .. } | NodeData::PropertyAssignment { .. } => {
                self.jsdoc(parent)
            }
            _ => None,
        }
    }

    /// Direct children in evaluation order.
    pub fn children(&self, index: NodeIndex) -> SmallVec<[NodeIndex; 4]> {
        let mut out = SmallVec::new();
        let Some(data) = self.data(index) else {
            return out;
        };
        match data {
            NodeData::Script { statements }
            | NodeData::Block { statements } => out.extend(statements.iter().copied()),
            NodeData::Var { declarations, .. } => out.extend(declarations.iter().copied()),
            NodeData::VarDecl { initializer, .. } => out.push(*initializer),
            NodeData::ExprStatement { expression }
            | NodeData::Return { expression }
            | NodeData::Cast { expression } => out.push(*expression),
            NodeData::If {
                condition,
                then_branch,
                else_branch,
            } => out.extend([*condition, *then_branch, *else_branch]),
            NodeData::Try {
                block,
                catch_clause,
                finally_block,
            } => out.extend([*block, *catch_clause, *finally_block]),
            NodeData::CatchClause { body, .. } => out.push(*body),
            NodeData::Function { body, .. } => out.push(*body),
            NodeData::GetProp { object, .. } => out.push(*object),
            NodeData::GetElem { object, index } => out.extend([*object, *index]),
            NodeData::Assign { target, value } => out.extend([*target, *value]),
            NodeData::Call { callee, arguments } | NodeData::New { callee, arguments } => {
                out.push(*callee);
                out.extend(arguments.iter().copied());
            }
            NodeData::ObjectLit { properties } => out.extend(properties.iter().copied()),
            NodeData::PropertyAssignment { value, .. } => out.push(*value),
            NodeData::ArrayLit { elements } => out.extend(elements.iter().copied()),
            NodeData::Unary { operand, .. } => out.push(*operand),
            NodeData::Binary { left, right, .. } => out.extend([*left, *right]),
            NodeData::Conditional {
                condition,
                when_true,
                when_false,
            } => out.extend([*condition, *when_true, *when_false]),
            NodeData::Name { .. }
            | NodeData::This
            | NodeData::Number { .. }
            | NodeData::Str { .. }
            | NodeData::True
            | NodeData::False
            | NodeData::Null => {}
        }
        out.retain(|c| c.is_some());
        out
    }

    /// Set parent links (and `flags`) for every node reachable from `root`.
    pub fn link_subtree(&mut self, root: NodeIndex, flags: NodeFlags) {
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            let children = self.children(index);
            if let Some(node) = self.get_mut(index) {
                node.flags |= flags;
            }
            for child in children {
                if let Some(node) = self.get_mut(child) {
                    node.parent = index;
                }
                stack.push(child);
            }
        }
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// `a`, `a.b.c`; `None` for anything else (including `this.x`).
    pub fn qualified_name(&self, index: NodeIndex) -> Option<QualifiedName> {
        match self.data(index)? {
            NodeData::Name { name } => Some(QualifiedName::new(name.clone())),
            NodeData::GetProp { object, property } => {
                Some(self.qualified_name(*object)?.join(property.clone()))
            }
            _ => None,
        }
    }

    pub fn is_qualified_name(&self, index: NodeIndex) -> bool {
        match self.data(index) {
            Some(NodeData::Name { .. }) => true,
            Some(NodeData::GetProp { object, .. }) => self.is_qualified_name(*object),
            _ => false,
        }
    }

    pub fn name_of(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index)? {
            NodeData::Name { name } | NodeData::VarDecl { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The qualified name declared by a declarator or a property target.
    pub fn declared_name(&self, index: NodeIndex) -> Option<QualifiedName> {
        match self.data(index)? {
            NodeData::VarDecl { name, .. } => Some(QualifiedName::new(name.clone())),
            _ => self.qualified_name(index),
        }
    }

    /// `(object, property)` of a property access.
    pub fn get_prop(&self, index: NodeIndex) -> Option<(NodeIndex, &str)> {
        match self.data(index)? {
            NodeData::GetProp { object, property } => Some((*object, property)),
            _ => None,
        }
    }

    pub fn is_this(&self, index: NodeIndex) -> bool {
        matches!(self.data(index), Some(NodeData::This))
    }

    /// `X.prototype.p`
    pub fn is_prototype_property(&self, index: NodeIndex) -> bool {
        self.get_prop(index)
            .and_then(|(object, _)| self.get_prop(object))
            .is_some_and(|(_, prop)| prop == "prototype")
    }

    /// For `X.prototype.p`, the node for `X`.
    pub fn prototype_owner(&self, index: NodeIndex) -> Option<NodeIndex> {
        let (object, _) = self.get_prop(index)?;
        let (owner, prop) = self.get_prop(object)?;
        (prop == "prototype").then_some(owner)
    }

    /// The left side of `X.prototype.p = ...;` for an expression statement.
    pub fn prototype_property_declaration(&self, stmt: NodeIndex) -> Option<NodeIndex> {
        let NodeData::ExprStatement { expression } = self.data(stmt)? else {
            return None;
        };
        let NodeData::Assign { target, .. } = self.data(*expression)? else {
            return None;
        };
        self.is_prototype_property(*target).then_some(*target)
    }

    // =========================================================================
    // Functions
    // =========================================================================

    pub fn function(&self, index: NodeIndex) -> Option<FunctionView<'_>> {
        match self.data(index)? {
            NodeData::Function { name, params, body } => Some(FunctionView {
                name: name.as_deref(),
                params,
                body: *body,
            }),
            _ => None,
        }
    }

    pub fn function_name(&self, index: NodeIndex) -> FunctionName {
        let Some(view) = self.function(index) else {
            return FunctionName::Anonymous;
        };
        if let Some(name) = view.name.filter(|n| !n.is_empty()) {
            return FunctionName::Simple(name.to_string());
        }
        let parent = self.parent(index);
        match self.data(parent) {
            Some(NodeData::VarDecl { name, .. }) => FunctionName::Simple(name.clone()),
            Some(NodeData::Assign { target, value }) if *value == index => {
                match self.qualified_name(*target) {
                    Some(name) if name.is_identifier() => {
                        FunctionName::Simple(name.leftmost().to_string())
                    }
                    Some(name) => FunctionName::Qualified {
                        name,
                        target: *target,
                    },
                    None => FunctionName::Anonymous,
                }
            }
            _ => FunctionName::Anonymous,
        }
    }

    /// `X.prototype.m = function() {}`
    pub fn is_prototype_method(&self, function: NodeIndex) -> bool {
        let parent = self.parent(function);
        match self.data(parent) {
            Some(NodeData::Assign { target, value }) if *value == function => {
                self.is_prototype_property(*target)
            }
            _ => false,
        }
    }

    pub fn block_statements(&self, index: NodeIndex) -> &[NodeIndex] {
        match self.data(index) {
            Some(NodeData::Block { statements } | NodeData::Script { statements }) => {
                statements.as_slice()
            }
            _ => &[],
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// The value assigned by a declarator or by an assignment to `index`.
    pub fn declaration_initializer(&self, index: NodeIndex) -> NodeIndex {
        match self.data(index) {
            Some(NodeData::VarDecl { initializer, .. }) => return *initializer,
            Some(NodeData::GetProp { .. }) => {}
            _ => return NodeIndex::NONE,
        }
        match self.data(self.parent(index)) {
            Some(NodeData::Assign { target, value }) if *target == index => *value,
            _ => NodeIndex::NONE,
        }
    }

    /// `var`, `let` or `const` of the statement holding a declarator.
    pub fn var_kind(&self, decl: NodeIndex) -> Option<VarKind> {
        match self.data(self.parent(decl))? {
            NodeData::Var { var_kind, .. } => Some(*var_kind),
            _ => None,
        }
    }

    /// Whether the declaration at `index` is constant, through `@const` or
    /// the `const` keyword.
    pub fn has_const_annotation(&self, index: NodeIndex) -> bool {
        self.var_kind(index) == Some(VarKind::Const)
            || self.best_jsdoc(index).is_some_and(JsDoc::is_constant)
    }

    /// `/** @const */ var ns = {};`, `ns.sub = ns.sub || {};`. Externs may
    /// omit `@const`.
    pub fn is_namespace_decl(&self, index: NodeIndex) -> bool {
        let doc = self.best_jsdoc(index);
        if doc.is_some_and(JsDoc::has_type) {
            return false;
        }
        if !self.is_from_externs(index) && !self.has_const_annotation(index) {
            return false;
        }
        let initializer = self.declaration_initializer(index);
        match self.data(initializer) {
            Some(NodeData::ObjectLit { properties }) => properties.is_empty(),
            Some(NodeData::Binary {
                op: BinaryOp::Or,
                left,
                right,
            }) => {
                let same_name = self.declared_name(index).is_some()
                    && self.declared_name(index) == self.qualified_name(*left);
                same_name
                    && matches!(
                        self.data(*right),
                        Some(NodeData::ObjectLit { properties }) if properties.is_empty()
                    )
            }
            _ => false,
        }
    }

    pub fn is_typedef_decl(&self, index: NodeIndex) -> bool {
        self.best_jsdoc(index).is_some_and(JsDoc::has_typedef)
    }

    pub fn is_enum_decl(&self, index: NodeIndex) -> bool {
        self.best_jsdoc(index).is_some_and(JsDoc::has_enum)
    }

    /// Keys of an object literal, in source order.
    pub fn object_lit_keys(&self, index: NodeIndex) -> Vec<(NodeIndex, &str)> {
        let Some(NodeData::ObjectLit { properties }) = self.data(index) else {
            return Vec::new();
        };
        properties
            .iter()
            .filter_map(|&prop| match self.data(prop) {
                Some(NodeData::PropertyAssignment { key, .. }) => Some((prop, key.as_str())),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/arena_tests.rs"]
mod tests;

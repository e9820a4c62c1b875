//! Arena node kinds.

use bitflags::bitflags;
use gti_common::Span;
use serde::{Deserialize, Serialize};

/// Index of a node in a [`crate::NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    #[must_use]
    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct NodeFlags: u8 {
        /// Node belongs to the declarations-only (externs) tree.
        const FROM_EXTERNS = 1 << 0;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarKind {
    Var,
    Let,
    Const,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Neg,
    Pos,
    BitNot,
    Not,
    TypeOf,
    Void,
    Inc,
    Dec,
    Delete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Lsh,
    Rsh,
    Ursh,
    Eq,
    Ne,
    StrictEq,
    StrictNe,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    InstanceOf,
    And,
    Or,
    Comma,
}

impl BinaryOp {
    pub const fn is_arithmetic_or_bitwise(self) -> bool {
        matches!(
            self,
            Self::Sub
                | Self::Mul
                | Self::Div
                | Self::Mod
                | Self::BitAnd
                | Self::BitOr
                | Self::BitXor
                | Self::Lsh
                | Self::Rsh
                | Self::Ursh
        )
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::Ne
                | Self::StrictEq
                | Self::StrictNe
                | Self::Lt
                | Self::Le
                | Self::Gt
                | Self::Ge
                | Self::In
                | Self::InstanceOf
        )
    }
}

/// Node payload. Child links are indices into the same arena.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeData {
    Script {
        statements: Vec<NodeIndex>,
    },
    Block {
        statements: Vec<NodeIndex>,
    },
    Var {
        var_kind: VarKind,
        declarations: Vec<NodeIndex>,
    },
    /// One declarator of a `Var`; `initializer` may be `NONE`.
    VarDecl {
        name: String,
        initializer: NodeIndex,
    },
    ExprStatement {
        expression: NodeIndex,
    },
    Return {
        expression: NodeIndex,
    },
    If {
        condition: NodeIndex,
        then_branch: NodeIndex,
        else_branch: NodeIndex,
    },
    Try {
        block: NodeIndex,
        catch_clause: NodeIndex,
        finally_block: NodeIndex,
    },
    CatchClause {
        name: String,
        body: NodeIndex,
    },
    Function {
        name: Option<String>,
        params: Vec<String>,
        body: NodeIndex,
    },
    Name {
        name: String,
    },
    This,
    GetProp {
        object: NodeIndex,
        property: String,
    },
    GetElem {
        object: NodeIndex,
        index: NodeIndex,
    },
    Assign {
        target: NodeIndex,
        value: NodeIndex,
    },
    Call {
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
    },
    New {
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
    },
    ObjectLit {
        properties: Vec<NodeIndex>,
    },
    /// `key: value` inside an object literal.
    PropertyAssignment {
        key: String,
        value: NodeIndex,
    },
    ArrayLit {
        elements: Vec<NodeIndex>,
    },
    Number {
        value: f64,
    },
    Str {
        value: String,
    },
    True,
    False,
    Null,
    Unary {
        op: UnaryOp,
        operand: NodeIndex,
    },
    Binary {
        op: BinaryOp,
        left: NodeIndex,
        right: NodeIndex,
    },
    Conditional {
        condition: NodeIndex,
        when_true: NodeIndex,
        when_false: NodeIndex,
    },
    /// `/** @type {T} */ (expr)`; the cast type is the node's doc.
    Cast {
        expression: NodeIndex,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub data: NodeData,
    pub span: Span,
    pub parent: NodeIndex,
    #[serde(default)]
    pub flags: NodeFlags,
}

impl Node {
    pub fn is_function(&self) -> bool {
        matches!(self.data, NodeData::Function { .. })
    }

    pub fn is_object_lit(&self) -> bool {
        matches!(self.data, NodeData::ObjectLit { .. })
    }

    pub fn is_from_externs(&self) -> bool {
        self.flags.contains(NodeFlags::FROM_EXTERNS)
    }

    pub fn kind_name(&self) -> &'static str {
        match self.data {
            NodeData::Script { .. } => "Script",
            NodeData::Block { .. } => "Block",
            NodeData::Var { .. } => "Var",
            NodeData::VarDecl { .. } => "VarDecl",
            NodeData::ExprStatement { .. } => "ExprStatement",
            NodeData::Return { .. } => "Return",
            NodeData::If { .. } => "If",
            NodeData::Try { .. } => "Try",
            NodeData::CatchClause { .. } => "CatchClause",
            NodeData::Function { .. } => "Function",
            NodeData::Name { .. } => "Name",
            NodeData::This => "This",
            NodeData::GetProp { .. } => "GetProp",
            NodeData::GetElem { .. } => "GetElem",
            NodeData::Assign { .. } => "Assign",
            NodeData::Call { .. } => "Call",
            NodeData::New { .. } => "New",
            NodeData::ObjectLit { .. } => "ObjectLit",
            NodeData::PropertyAssignment { .. } => "PropertyAssignment",
            NodeData::ArrayLit { .. } => "ArrayLit",
            NodeData::Number { .. } => "Number",
            NodeData::Str { .. } => "Str",
            NodeData::True => "True",
            NodeData::False => "False",
            NodeData::Null => "Null",
            NodeData::Unary { .. } => "Unary",
            NodeData::Binary { .. } => "Binary",
            NodeData::Conditional { .. } => "Conditional",
            NodeData::Cast { .. } => "Cast",
        }
    }
}

//! Syntax consumed by the global type info builder.
//!
//! Callers build (or deserialize) an owned [`SourceFile`] and lower it into a
//! [`Program`]: an index-addressed [`NodeArena`] with parent links and
//! attached documentation annotations. The builder passes only ever read the
//! arena.
//!
//! - `doc`: already-parsed documentation annotations (`JsDoc`, `TypeExpr`)
//! - `tree`: owned statements/expressions with ergonomic constructors
//! - `node`: arena node kinds and flags
//! - `arena`: the arena and its structural queries
//! - `lower`: owned tree -> arena

pub mod arena;
pub mod doc;
pub mod lower;
pub mod node;
pub mod tree;

pub use arena::{FunctionName, NodeArena};
pub use doc::{DocFlags, DocParam, JsDoc, TypeExpr};
pub use lower::{Program, lower};
pub use node::{BinaryOp, Node, NodeData, NodeFlags, NodeIndex, UnaryOp, VarKind};
pub use tree::{Expr, FunctionLit, ObjectProp, SourceFile, Stmt, VarDeclarator};

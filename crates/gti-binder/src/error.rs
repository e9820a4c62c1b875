//! Fatal errors.
//!
//! These signal a broken precondition rather than a problem in the analyzed
//! code; user-facing problems are reported as diagnostics instead.

use gti_ast::NodeIndex;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GtiError {
    /// A name was bound twice in one scope with different kinds.
    DuplicateBinding {
        name: String,
        existing: &'static str,
        added: &'static str,
    },
    /// A node accessor was called on a node of another kind.
    WrongNodeKind {
        node: NodeIndex,
        expected: &'static str,
        found: &'static str,
    },
    /// A property was added to a nominal type after it was finalized.
    FinalizedMutation { type_name: String, property: String },
    /// A function literal has no scope registered under its internal name.
    UnknownFunctionScope { name: String },
    /// The inheritance worklist did not drain within the ceiling.
    WorklistCeilingExceeded { ceiling: usize, pending: Vec<String> },
}

impl fmt::Display for GtiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateBinding {
                name,
                existing,
                added,
            } => write!(
                f,
                "cannot bind '{name}' as {added}: already bound as {existing}"
            ),
            Self::WrongNodeKind {
                node,
                expected,
                found,
            } => write!(f, "node {} is a {found}, expected {expected}", node.0),
            Self::FinalizedMutation {
                type_name,
                property,
            } => write!(
                f,
                "cannot add property '{property}' to finalized type {type_name}"
            ),
            Self::UnknownFunctionScope { name } => {
                write!(f, "no scope registered for function '{name}'")
            }
            Self::WorklistCeilingExceeded { ceiling, pending } => write!(
                f,
                "inheritance worklist exceeded {ceiling} iterations; pending: {}",
                pending.join(", ")
            ),
        }
    }
}

impl std::error::Error for GtiError {}

pub type GtiResult<T> = Result<T, GtiError>;

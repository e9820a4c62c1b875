//! Global type information for annotated JavaScript.
//!
//! The pipeline lives in the workspace crates; this crate re-exports them
//! and carries the `gti` command-line front end.
//!
//! ```ignore
//! let program = gti::ast::lower(&source_file);
//! let info = gti::binder::process(&program, &gti::binder::GlobalTypeInfoOptions::default())?;
//! for diagnostic in info.diagnostics() { ... }
//! ```

pub use gti_ast as ast;
pub use gti_binder as binder;
pub use gti_common as common;
pub use gti_solver as solver;

pub use gti_binder::{GlobalTypeInfo, GlobalTypeInfoOptions, GtiError, process};

pub mod tracing_config;

#[cfg(feature = "cli")]
pub mod cli;

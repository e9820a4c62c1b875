//! Common types and utilities shared by the gti crates.
//!
//! This crate provides foundational types used across all gti crates:
//! - Qualified (dotted) names (`QualifiedName`)
//! - Source spans (`Span`)
//! - Diagnostics: categories, codes and message templates
//! - Centralized limits and thresholds

// Dotted-path names used to address namespace members
pub mod qualified_name;
pub use qualified_name::QualifiedName;

// Span - Source location tracking
pub mod span;
pub use span::Span;

// Diagnostic data model and message table
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Centralized limits and thresholds
pub mod limits;

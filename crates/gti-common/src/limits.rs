//! Centralized limits and thresholds for the global type info builder.
//!
//! # Categories
//!
//! - **Operation Counts**: Limits to prevent infinite loops in iterative algorithms
//! - **Recursion Depths**: Limits to prevent stack overflow in recursive algorithms

// =============================================================================
// Operation Count Limits
// =============================================================================

/// Maximum number of times the inheritance finalizer may re-queue a nominal
/// type whose super class or interfaces are not finalized yet.
///
/// Cycles are rejected when an `@extends`/`@implements` edge is inserted, so
/// a well-formed graph drains in at most `n * (n + 1) / 2` pops. Exceeding
/// this ceiling means a cycle escaped insertion-time rejection and the run
/// is aborted with a fatal error.
pub const MAX_WORKLIST_ITERATIONS: usize = 50_000;

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth for `@const` initializer inference.
///
/// ```javascript
/// /** @const */ var X = {a: {b: {c: {/* ... hundreds of levels ... */}}}};
/// ```
pub const MAX_CONST_INFER_DEPTH: u32 = 200;

/// Maximum depth for structural subtype checks and type instantiation.
///
/// Declared types are finite trees, but nominal property lookups through
/// generic super classes can revisit the same pair; at this depth the check
/// conservatively answers "not a subtype".
pub const MAX_SUBTYPE_DEPTH: u32 = 100;

/// Maximum depth when resolving typedefs that refer to other typedefs.
pub const MAX_TYPEDEF_RESOLUTION_DEPTH: u32 = 64;

/// Binary operator evaluation logic.
///
/// Handles arithmetic, string concatenation and comparisons.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the pass entry point, the runtime context, statement execution,
/// expression dispatch and the resource budgets.
pub mod core;

/// Utility functions for evaluation.
///
/// Provides AST path construction, arity checks and lineage helpers shared by
/// the evaluator and the standard library.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and standard library calls, argument checking, and
/// the modeling functions that talk to the engine.
pub mod function;

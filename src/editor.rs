/// Sign normalization of value expressions.
///
/// Rewrites an expression after it has been multiplied by a sign, removing
/// the double negations that naive wrapping produces.
pub mod normalize;
/// Read-only queries over a program and its memory.
///
/// # Responsibilities
/// - Lists the numeric bindings visible at a cursor position.
/// - Suggests names that do not collide with anything in the program.
pub mod query;
/// Scratch calculations.
///
/// Evaluates a standalone expression in an isolated pass, so the result of a
/// what-if computation can never leak into the authoritative memory.
pub mod scratch;

pub use normalize::{NormalizeOptions, Sign, normalize_sign};
pub use query::{PreviousVariable, PreviousVariables, find_all_previous_variables,
                find_unique_name, is_unique_name};
pub use scratch::{Calculation, calculate};

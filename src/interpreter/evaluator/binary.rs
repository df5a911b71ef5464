/// Dispatch of binary operators by operand type.
pub mod core;
/// Arithmetic on numbers.
pub mod scalar;
/// Equality and ordering.
pub mod comparison;

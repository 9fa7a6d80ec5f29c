/// Binary operator evaluation logic.
///
/// Holds the fixed table of supported arithmetic operators and their numeric
/// semantics: checked integer arithmetic, float promotion and floor division.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements unary plus and negation through a fixed operator table.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the [`core::Evaluator`], the allow-list of tree nodes it accepts
/// and the nesting depth guard.
pub mod core;

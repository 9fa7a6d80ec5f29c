/// Parser entry points and shared state.
///
/// Holds the token cursor, the nesting and size limits, and the top-level
/// rules: whole-input parsing, conditional expressions and lambdas.
pub mod core;

/// Unary, power and primary expressions.
///
/// Handles prefix operators, exponentiation, atoms (literals, names,
/// bracketed displays) and postfix trailers such as calls and subscripts.
pub mod unary;

/// Binary operator precedence levels.
///
/// Implements every infix level from `or` down to multiplication. Boolean
/// chains and comparisons have their own rules; the arithmetic and bitwise
/// levels share one precedence-climbing loop.
pub mod binary;

/// Utility functions for the parser.
///
/// Provides the comma-separated list helper and bracket matching used by
/// calls, subscripts and collection displays.
pub mod utils;

pub use self::core::{MAX_NESTING, MAX_OPERATORS, ParseResult, Parser, parse};

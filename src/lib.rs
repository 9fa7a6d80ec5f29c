//! # reckon
//!
//! reckon is a safe arithmetic expression evaluator written in Rust.
//! It parses a line of text as a single expression and evaluates it over a
//! strict allow-list: numeric literals, unary `+`/`-` and the operators
//! `+ - * / // % **`. Names, calls, attribute access and every other
//! construct are refused, so arbitrary user input can be evaluated without
//! side effects.
//!
//! The crate also ships an interactive calculator shell built on the same
//! evaluator.
//!
//! ```
//! use reckon::{ErrorKind, Number, evaluate};
//!
//! assert_eq!(evaluate("2 + 3 * 4").unwrap(), Number::Integer(14));
//! assert_eq!(evaluate("2 ** 0.5").unwrap().to_string(), "1.4142135623730951");
//! assert_eq!(evaluate("open('x')").unwrap_err().kind(),
//!            ErrorKind::UnsupportedExpression);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and related operator types that
/// represent an expression as a tree. The tree is deliberately richer than
/// what the evaluator accepts: it mirrors the full expression grammar so the
/// evaluator can tell "unsupported" apart from "malformed".
///
/// # Responsibilities
/// - Defines node kinds for literals, operators, names, calls, containers
///   and the other expression forms.
/// - Attaches the source column to every node.
pub mod ast;
/// Provides the error types for parsing and evaluation.
///
/// Parse failures carry the column where they were detected. Evaluation
/// failures form a flat taxonomy that callers can match on through
/// [`ErrorKind`].
pub mod error;
/// Lexing, parsing and evaluation.
///
/// This module ties the phases together. Most callers only need
/// [`evaluate`] or [`Evaluator`].
pub mod interpreter;
/// The interactive calculator shell.
///
/// A read-evaluate-print loop over any line source, with a line-editor
/// backed reader for terminals and a plain reader for pipes and tests.
pub mod shell;
/// Numeric helpers shared by the evaluator and value rendering.
///
/// Floor division and modulo with the divisor's sign, the int/float
/// promotion and float formatting.
pub mod util;

pub use crate::{
    error::{ErrorKind, EvalError, ParseError},
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        parser::parse,
        value::core::Number,
    },
};

/// Evaluates one arithmetic expression with the default [`Evaluator`].
///
/// Leading and trailing whitespace is ignored. The text must contain exactly
/// one expression built from numeric literals, parentheses, unary `+`/`-` and
/// the binary operators `+ - * / // % **`.
///
/// # Errors
/// Returns an [`EvalError`] if the text does not parse, uses anything outside
/// the arithmetic subset, or fails arithmetically (for example division by
/// zero).
///
/// # Examples
/// ```
/// use reckon::{ErrorKind, Number, evaluate};
///
/// assert_eq!(evaluate("(2 + 3) * 4").unwrap(), Number::Integer(20));
/// assert_eq!(evaluate("-7 // 2").unwrap(), Number::Integer(-4));
/// assert_eq!(evaluate("1 / 4").unwrap(), Number::Float(0.25));
///
/// let error = evaluate("1 % 0").unwrap_err();
/// assert_eq!(error.kind(), ErrorKind::DivisionByZero);
/// assert_eq!(error.to_string(), "division by zero");
///
/// assert_eq!(evaluate("2 +").unwrap_err().kind(), ErrorKind::Syntax);
/// ```
pub fn evaluate(source: &str) -> EvalResult<Number> {
    Evaluator::new().evaluate(source)
}

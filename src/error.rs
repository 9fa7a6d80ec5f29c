/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include syntax mistakes, unexpected tokens, invalid
/// literals and nesting that exceeds the parser's limits.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains the flat error taxonomy reported by the evaluator: syntax errors,
/// rejected node kinds, rejected operators and arithmetic failures such as
/// division by zero or overflow.
pub mod eval_error;

pub use eval_error::{ErrorKind, EvalError};
pub use parse_error::ParseError;

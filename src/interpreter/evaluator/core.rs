use tracing::{debug, trace};

use crate::{
    ast::{Expr, LiteralValue},
    error::EvalError,
    interpreter::{parser::parse, value::core::Number},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Default limit on how deeply the evaluator will recurse into a tree.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Evaluates arithmetic expressions over a restricted syntax tree.
///
/// The evaluator holds no state besides its depth limit, so one instance can
/// be shared freely and reused for any number of inputs.
///
/// Only three node kinds are accepted: integer and float literals, unary
/// `+`/`-`, and the binary operators `+ - * / // % **`. Every other node the
/// parser can produce (names, calls, attribute access, comparisons, strings,
/// containers and so on) is refused before anything is computed for it.
///
/// ## Usage
///
/// ```
/// use reckon::{Evaluator, Number};
///
/// let evaluator = Evaluator::new();
/// assert_eq!(evaluator.evaluate("2 + 3 * 4").unwrap(), Number::Integer(14));
/// assert!(evaluator.evaluate("__import__('os')").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    max_depth: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator with [`DEFAULT_MAX_DEPTH`].
    #[must_use]
    pub const fn new() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }

    /// Creates an evaluator that refuses trees nested deeper than
    /// `max_depth` levels.
    ///
    /// # Example
    /// ```
    /// use reckon::{ErrorKind, Evaluator};
    ///
    /// let shallow = Evaluator::with_max_depth(3);
    /// assert!(shallow.evaluate("1 + 2").is_ok());
    /// assert_eq!(shallow.evaluate("1 + 2 + 3 + 4").unwrap_err().kind(),
    ///            ErrorKind::NestingTooDeep);
    /// ```
    #[must_use]
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// The configured depth limit.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parses `source` as a single expression and evaluates it.
    ///
    /// Leading and trailing whitespace is ignored. The whole input must be
    /// exactly one expression.
    ///
    /// # Errors
    /// - `Syntax` if the text is not a single well-formed expression.
    /// - `UnsupportedExpression` / `UnsupportedOperator` for anything outside
    ///   the arithmetic subset.
    /// - `DivisionByZero`, `Overflow` or `Domain` for arithmetic failures.
    /// - `NestingTooDeep` if the tree exceeds the depth limit.
    ///
    /// # Example
    /// ```
    /// use reckon::{ErrorKind, Evaluator, Number};
    ///
    /// let evaluator = Evaluator::new();
    /// assert_eq!(evaluator.evaluate("  7 // 2 ").unwrap(), Number::Integer(3));
    /// assert_eq!(evaluator.evaluate("10 / 4").unwrap(), Number::Float(2.5));
    /// assert_eq!(evaluator.evaluate("x + 1").unwrap_err().kind(),
    ///            ErrorKind::UnsupportedExpression);
    /// ```
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn evaluate(&self, source: &str) -> EvalResult<Number> {
        let result = parse(source.trim()).map_err(EvalError::from)
                                         .and_then(|tree| self.eval(&tree));
        match &result {
            Ok(value) => debug!(%value, "evaluated"),
            Err(error) => debug!(kind = ?error.kind(), %error, "rejected"),
        }
        result
    }

    /// Evaluates an already parsed tree.
    ///
    /// # Errors
    /// The same non-syntax errors as [`Evaluator::evaluate`].
    ///
    /// # Example
    /// ```
    /// use reckon::{Evaluator, Number, ast::Expr};
    ///
    /// let expr = Expr::Literal { value:  2.5.into(),
    ///                            column: 1, };
    /// assert_eq!(Evaluator::new().eval(&expr).unwrap(), Number::Float(2.5));
    /// ```
    pub fn eval(&self, expr: &Expr) -> EvalResult<Number> {
        self.eval_at(expr, 0)
    }

    /// Evaluates `expr`, which sits `depth` levels below the root.
    pub(crate) fn eval_at(&self, expr: &Expr, depth: usize) -> EvalResult<Number> {
        if depth >= self.max_depth {
            trace!(depth, max_depth = self.max_depth, "depth limit reached");
            return Err(EvalError::NestingTooDeep);
        }

        match expr {
            Expr::Literal { value, .. } => Self::eval_literal(value),
            Expr::UnaryOp { op, operand, .. } => self.eval_unary_op(*op, operand, depth),
            Expr::BinaryOp { left, op, right, .. } => {
                self.eval_binary_op(left, *op, right, depth)
            },
            other => {
                debug!(node = other.kind_name(), column = other.column(), "refused node");
                Err(EvalError::UNSUPPORTED_EXPRESSION)
            },
        }
    }

    /// Converts a literal into a number.
    ///
    /// Only integer and float literals are numbers. Booleans, strings,
    /// imaginary literals, `None` and `...` are refused.
    fn eval_literal(value: &LiteralValue) -> EvalResult<Number> {
        match value {
            LiteralValue::Integer(n) => Ok(Number::Integer(*n)),
            LiteralValue::Float(f) => Ok(Number::Float(*f)),
            _ => Err(EvalError::ONLY_NUMBERS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kind_of(source: &str) -> ErrorKind {
        Evaluator::new().evaluate(source).unwrap_err().kind()
    }

    #[test]
    fn literals_evaluate_to_themselves() {
        let evaluator = Evaluator::new();
        assert_eq!(evaluator.evaluate("42").unwrap(), Number::Integer(42));
        assert_eq!(evaluator.evaluate("0x1f").unwrap(), Number::Integer(31));
        assert_eq!(evaluator.evaluate("1_000").unwrap(), Number::Integer(1000));
        assert_eq!(evaluator.evaluate("2.5e3").unwrap(), Number::Float(2500.0));
    }

    #[test]
    fn non_numeric_literals_are_refused() {
        for source in ["True", "None", "'1'", "2j", "..."] {
            assert_eq!(Evaluator::new().evaluate(source),
                       Err(EvalError::ONLY_NUMBERS),
                       "{source}");
        }
    }

    #[test]
    fn other_nodes_are_refused() {
        for source in ["x",
                       "abs(1)",
                       "(1).real",
                       "[1][0]",
                       "(1, 2)",
                       "1 < 2",
                       "1 and 2",
                       "1 if 1 else 2",
                       "lambda: 1",
                       "{1: 2}"]
        {
            assert_eq!(Evaluator::new().evaluate(source),
                       Err(EvalError::UNSUPPORTED_EXPRESSION),
                       "{source}");
        }
    }

    #[test]
    fn depth_limit_applies_to_the_tree() {
        let evaluator = Evaluator::with_max_depth(2);
        assert_eq!(evaluator.evaluate("-1").unwrap(), Number::Integer(-1));
        assert_eq!(evaluator.evaluate("--1"), Err(EvalError::NestingTooDeep));
        assert_eq!(Evaluator::with_max_depth(0).evaluate("1"),
                   Err(EvalError::NestingTooDeep));
    }

    #[test]
    fn default_depth_allows_long_flat_chains() {
        let chain = vec!["1"; 500].join(" + ");
        assert_eq!(Evaluator::default().evaluate(&chain).unwrap(), Number::Integer(500));
        assert_eq!(Evaluator::default().max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn syntax_errors_surface_as_syntax() {
        assert_eq!(kind_of(""), ErrorKind::Syntax);
        assert_eq!(kind_of("1 +"), ErrorKind::Syntax);
        assert_eq!(kind_of("x = 1"), ErrorKind::Syntax);
        assert_eq!(kind_of("import os"), ErrorKind::Syntax);
    }
}

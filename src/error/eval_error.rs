use crate::error::ParseError;

/// Represents every way an evaluation can fail.
///
/// The taxonomy is flat: the parse phase and the restricted tree walk both
/// report through this type, and every failure aborts the whole evaluation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The input is not a single well-formed expression.
    #[error(transparent)]
    Syntax(ParseError),
    /// The tree contains a node kind outside the arithmetic subset, or a
    /// literal that is not an integer or a float.
    #[error("{0}")]
    UnsupportedExpression(&'static str),
    /// A unary or binary operator outside the supported set.
    #[error("{0}")]
    UnsupportedOperator(&'static str),
    /// True division, modulo or floor division by zero, or zero raised to a
    /// negative power.
    #[error("division by zero")]
    DivisionByZero,
    /// An integer result or literal does not fit in 64 bits, or a float power
    /// overflowed.
    #[error("{0}")]
    Overflow(&'static str),
    /// The operation has no real-valued result.
    #[error("{0}")]
    Domain(&'static str),
    /// The expression is nested beyond the configured limit.
    #[error("expression nests too deeply")]
    NestingTooDeep,
}

/// The flat classification of an [`EvalError`].
///
/// Callers use this to special-case particular failures, most commonly
/// [`ErrorKind::DivisionByZero`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`EvalError::Syntax`].
    Syntax,
    /// See [`EvalError::UnsupportedExpression`].
    UnsupportedExpression,
    /// See [`EvalError::UnsupportedOperator`].
    UnsupportedOperator,
    /// See [`EvalError::DivisionByZero`].
    DivisionByZero,
    /// See [`EvalError::Overflow`].
    Overflow,
    /// See [`EvalError::Domain`].
    Domain,
    /// See [`EvalError::NestingTooDeep`].
    NestingTooDeep,
}

impl EvalError {
    pub(crate) const ONLY_NUMBERS: Self = Self::UnsupportedExpression("only numbers allowed");
    pub(crate) const UNSUPPORTED_EXPRESSION: Self =
        Self::UnsupportedExpression("unsupported expression");
    pub(crate) const UNSUPPORTED_OPERATOR: Self = Self::UnsupportedOperator("unsupported operator");
    pub(crate) const UNSUPPORTED_UNARY_OPERATOR: Self =
        Self::UnsupportedOperator("unsupported unary operator");
    pub(crate) const INTEGER_OVERFLOW: Self = Self::Overflow("integer overflow");
    pub(crate) const FLOAT_OVERFLOW: Self = Self::Overflow("numerical result out of range");

    /// Classifies `self`.
    ///
    /// # Example
    /// ```
    /// use reckon::{ErrorKind, evaluate};
    ///
    /// let error = evaluate("1 / 0").unwrap_err();
    /// assert_eq!(error.kind(), ErrorKind::DivisionByZero);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::UnsupportedExpression(_) => ErrorKind::UnsupportedExpression,
            Self::UnsupportedOperator(_) => ErrorKind::UnsupportedOperator,
            Self::DivisionByZero => ErrorKind::DivisionByZero,
            Self::Overflow(_) => ErrorKind::Overflow,
            Self::Domain(_) => ErrorKind::Domain,
            Self::NestingTooDeep => ErrorKind::NestingTooDeep,
        }
    }
}

impl From<ParseError> for EvalError {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::LiteralTooLarge { .. } => Self::Overflow("integer literal too large"),
            ParseError::TooDeep { .. } => Self::NestingTooDeep,
            other => Self::Syntax(other),
        }
    }
}

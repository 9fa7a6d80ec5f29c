use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{
    ast::{Expr, UnaryOperator},
    error::EvalError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Number,
    },
};

type UnaryFn = fn(Number) -> EvalResult<Number>;

/// The supported unary operators. `not` and `~` are deliberately absent.
static UNARY_OPERATORS: Lazy<HashMap<UnaryOperator, UnaryFn>> =
    Lazy::new(|| {
        HashMap::from([(UnaryOperator::Plus, identity as UnaryFn),
                       (UnaryOperator::Minus, negate as UnaryFn)])
    });

impl Evaluator {
    /// Evaluates a unary node.
    ///
    /// The operator is checked before the operand is touched, so `~x` is
    /// refused as an unsupported operator even though `x` alone would also
    /// be refused.
    pub(crate) fn eval_unary_op(&self,
                                op: UnaryOperator,
                                operand: &Expr,
                                depth: usize)
                                -> EvalResult<Number> {
        let apply = lookup(op)?;
        let value = self.eval_at(operand, depth + 1)?;
        apply(value)
    }

    /// Applies a unary operator to a number.
    ///
    /// # Errors
    /// - `UnsupportedOperator` for `not` and `~`.
    /// - `Overflow` when negating the smallest integer.
    ///
    /// # Example
    /// ```
    /// use reckon::{Evaluator, Number, ast::UnaryOperator};
    ///
    /// let v = Evaluator::eval_unary(UnaryOperator::Minus, Number::Integer(5)).unwrap();
    /// assert_eq!(v, Number::Integer(-5));
    ///
    /// let v = Evaluator::eval_unary(UnaryOperator::Plus, Number::Float(-0.5)).unwrap();
    /// assert_eq!(v, Number::Float(-0.5));
    ///
    /// assert!(Evaluator::eval_unary(UnaryOperator::Invert, Number::Integer(1)).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: Number) -> EvalResult<Number> {
        lookup(op)?(value)
    }
}

fn lookup(op: UnaryOperator) -> EvalResult<UnaryFn> {
    UNARY_OPERATORS.get(&op)
                   .copied()
                   .ok_or(EvalError::UNSUPPORTED_UNARY_OPERATOR)
}

#[allow(clippy::unnecessary_wraps)]
const fn identity(value: Number) -> EvalResult<Number> {
    Ok(value)
}

fn negate(value: Number) -> EvalResult<Number> {
    match value {
        Number::Integer(n) => n.checked_neg()
                               .map(Number::Integer)
                               .ok_or(EvalError::INTEGER_OVERFLOW),
        Number::Float(f) => Ok(Number::Float(-f)),
    }
}

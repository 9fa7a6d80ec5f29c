use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{
    ast::{BinaryOperator, Expr},
    error::EvalError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Number,
    },
    util::num::{floor_div_i64, floor_divmod_f64, floor_mod_i64, i64_to_f64},
};

type BinaryFn = fn(Number, Number) -> EvalResult<Number>;

/// The supported binary operators. Bitwise, shift and `@` are absent.
static BINARY_OPERATORS: Lazy<HashMap<BinaryOperator, BinaryFn>> = Lazy::new(|| {
    HashMap::from([(BinaryOperator::Add, add as BinaryFn),
                   (BinaryOperator::Sub, subtract as BinaryFn),
                   (BinaryOperator::Mul, multiply as BinaryFn),
                   (BinaryOperator::Div, true_divide as BinaryFn),
                   (BinaryOperator::FloorDiv, floor_divide as BinaryFn),
                   (BinaryOperator::Mod, modulo as BinaryFn),
                   (BinaryOperator::Pow, power as BinaryFn)])
});

const COMPLEX_RESULT: EvalError = EvalError::Domain("complex results are not supported");

impl Evaluator {
    /// Evaluates a binary node.
    ///
    /// Both operands are evaluated left to right before the operator is
    /// looked up, so an error in the left operand wins over one in the right
    /// operand or the operator.
    pub(crate) fn eval_binary_op(&self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 depth: usize)
                                 -> EvalResult<Number> {
        let left = self.eval_at(left, depth + 1)?;
        let right = self.eval_at(right, depth + 1)?;
        Self::eval_binary(op, left, right)
    }

    /// Applies a binary operator to two numbers.
    ///
    /// Two integers produce an integer, except for `/` (always a float) and
    /// `**` with a negative exponent. If either side is a float, both are
    /// promoted and the result is a float. `//` and `%` round toward negative
    /// infinity, so the remainder takes the sign of the divisor.
    ///
    /// # Errors
    /// - `UnsupportedOperator` for bitwise, shift and matrix operators.
    /// - `DivisionByZero` for a zero divisor, or zero raised to a negative
    ///   power.
    /// - `Overflow` when an integer result leaves the 64-bit range or a float
    ///   power overflows.
    /// - `Domain` when a negative base is raised to a fractional power.
    ///
    /// # Example
    /// ```
    /// use reckon::{Evaluator, Number, ast::BinaryOperator};
    ///
    /// let v = Evaluator::eval_binary(BinaryOperator::Add, Number::Integer(3), Number::Integer(4));
    /// assert_eq!(v.unwrap(), Number::Integer(7));
    ///
    /// let v = Evaluator::eval_binary(BinaryOperator::Div, Number::Integer(7), Number::Integer(2));
    /// assert_eq!(v.unwrap(), Number::Float(3.5));
    ///
    /// let v = Evaluator::eval_binary(BinaryOperator::Mod, Number::Integer(-7), Number::Integer(3));
    /// assert_eq!(v.unwrap(), Number::Integer(2));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: Number, right: Number) -> EvalResult<Number> {
        let apply = BINARY_OPERATORS.get(&op)
                                    .ok_or(EvalError::UNSUPPORTED_OPERATOR)?;
        apply(left, right)
    }
}

/// Applies the integer form when both sides are integers and the float form
/// otherwise.
fn arithmetic(left: Number,
              right: Number,
              integer: fn(i64, i64) -> Option<i64>,
              float: fn(f64, f64) -> f64)
              -> EvalResult<Number> {
    match (left, right) {
        (Number::Integer(a), Number::Integer(b)) => {
            integer(a, b).map(Number::Integer)
                         .ok_or(EvalError::INTEGER_OVERFLOW)
        },
        _ => Ok(Number::Float(float(left.as_f64(), right.as_f64()))),
    }
}

fn add(left: Number, right: Number) -> EvalResult<Number> {
    arithmetic(left, right, i64::checked_add, |a, b| a + b)
}

fn subtract(left: Number, right: Number) -> EvalResult<Number> {
    arithmetic(left, right, i64::checked_sub, |a, b| a - b)
}

fn multiply(left: Number, right: Number) -> EvalResult<Number> {
    arithmetic(left, right, i64::checked_mul, |a, b| a * b)
}

fn true_divide(left: Number, right: Number) -> EvalResult<Number> {
    if right.is_zero() {
        return Err(EvalError::DivisionByZero);
    }
    Ok(Number::Float(left.as_f64() / right.as_f64()))
}

fn floor_divide(left: Number, right: Number) -> EvalResult<Number> {
    match (left, right) {
        (Number::Integer(a), Number::Integer(b)) => floor_div_i64(a, b).map(Number::Integer),
        _ => {
            let (quotient, _) = floor_divmod_f64(left.as_f64(), right.as_f64())?;
            Ok(Number::Float(quotient))
        },
    }
}

fn modulo(left: Number, right: Number) -> EvalResult<Number> {
    match (left, right) {
        (Number::Integer(a), Number::Integer(b)) => floor_mod_i64(a, b).map(Number::Integer),
        _ => {
            let (_, remainder) = floor_divmod_f64(left.as_f64(), right.as_f64())?;
            Ok(Number::Float(remainder))
        },
    }
}

fn power(base: Number, exponent: Number) -> EvalResult<Number> {
    match (base, exponent) {
        (Number::Integer(b), Number::Integer(e)) if e >= 0 => integer_power(b, e),
        (Number::Integer(0), Number::Integer(_)) => Err(EvalError::DivisionByZero),
        (Number::Integer(b), Number::Integer(e)) => {
            float_power(i64_to_f64(b), i64_to_f64(e)).map(Number::Float)
        },
        _ => float_power(base.as_f64(), exponent.as_f64()).map(Number::Float),
    }
}

/// Raises an integer to a non-negative integer power.
///
/// Exponents beyond `u32` only fit for the bases `0`, `1` and `-1`.
fn integer_power(base: i64, exponent: i64) -> EvalResult<Number> {
    if let Ok(small) = u32::try_from(exponent) {
        return base.checked_pow(small)
                   .map(Number::Integer)
                   .ok_or(EvalError::INTEGER_OVERFLOW);
    }
    match base {
        0 | 1 => Ok(Number::Integer(base)),
        -1 if exponent % 2 == 0 => Ok(Number::Integer(1)),
        -1 => Ok(Number::Integer(-1)),
        _ => Err(EvalError::INTEGER_OVERFLOW),
    }
}

fn float_power(base: f64, exponent: f64) -> EvalResult<f64> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    if base < 0.0 && base.is_finite() && exponent.is_finite() && exponent.fract() != 0.0 {
        return Err(COMPLEX_RESULT);
    }

    let result = base.powf(exponent);
    if result.is_infinite() && base.is_finite() && exponent.is_finite() {
        return Err(EvalError::FLOAT_OVERFLOW);
    }
    Ok(result)
}

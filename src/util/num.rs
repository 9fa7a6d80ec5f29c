use crate::error::EvalError;

/// Converts an `i64` to the nearest `f64`.
///
/// Integers above `2^53` in magnitude round to the closest representable
/// float, the usual promotion for mixed integer/float arithmetic.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Integer floor division, rounding the quotient toward negative infinity.
///
/// ## Errors
/// - `DivisionByZero` if `divisor` is zero.
/// - `Overflow` for `i64::MIN // -1`.
///
/// ## Example
/// ```
/// use reckon::util::num::floor_div_i64;
///
/// assert_eq!(floor_div_i64(7, 2).unwrap(), 3);
/// assert_eq!(floor_div_i64(-7, 2).unwrap(), -4);
/// assert_eq!(floor_div_i64(7, -2).unwrap(), -4);
/// assert!(floor_div_i64(1, 0).is_err());
/// ```
pub fn floor_div_i64(dividend: i64, divisor: i64) -> Result<i64, EvalError> {
    if divisor == 0 {
        return Err(EvalError::DivisionByZero);
    }
    let quotient = dividend.checked_div(divisor)
                           .ok_or(EvalError::INTEGER_OVERFLOW)?;
    if (dividend % divisor != 0) && ((dividend < 0) != (divisor < 0)) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

/// Integer modulo whose result takes the sign of the divisor.
///
/// Complements [`floor_div_i64`]: `a == b * floor_div(a, b) + floor_mod(a, b)`.
///
/// ## Errors
/// `DivisionByZero` if `divisor` is zero.
///
/// ## Example
/// ```
/// use reckon::util::num::floor_mod_i64;
///
/// assert_eq!(floor_mod_i64(-7, 2).unwrap(), 1);
/// assert_eq!(floor_mod_i64(7, -2).unwrap(), -1);
/// ```
pub fn floor_mod_i64(dividend: i64, divisor: i64) -> Result<i64, EvalError> {
    if divisor == 0 {
        return Err(EvalError::DivisionByZero);
    }
    // `rem_euclid` is non-negative; shift it into the divisor's sign.
    let remainder = dividend.checked_rem_euclid(divisor).unwrap_or(0);
    if remainder != 0 && divisor < 0 {
        Ok(remainder + divisor)
    } else {
        Ok(remainder)
    }
}

/// Floating-point floor division and modulo in one step.
///
/// Returns `(floor_quotient, remainder)` where the remainder has the sign of
/// the divisor (or is a zero carrying the divisor's sign) and the quotient is
/// rounded to an integral value.
///
/// ## Errors
/// `DivisionByZero` if `divisor` is `0.0` or `-0.0`.
///
/// ## Example
/// ```
/// use reckon::util::num::floor_divmod_f64;
///
/// assert_eq!(floor_divmod_f64(7.5, 2.0).unwrap(), (3.0, 1.5));
/// assert_eq!(floor_divmod_f64(-7.5, 2.0).unwrap(), (-4.0, 0.5));
/// assert_eq!(floor_divmod_f64(7.5, -2.0).unwrap(), (-4.0, -0.5));
/// ```
pub fn floor_divmod_f64(dividend: f64, divisor: f64) -> Result<(f64, f64), EvalError> {
    if divisor == 0.0 {
        return Err(EvalError::DivisionByZero);
    }

    let mut remainder = dividend % divisor;
    let mut quotient = (dividend - remainder) / divisor;
    if remainder == 0.0 {
        remainder = 0.0_f64.copysign(divisor);
    } else if (divisor < 0.0) != (remainder < 0.0) {
        remainder += divisor;
        quotient -= 1.0;
    }

    let floor_quotient = if quotient == 0.0 {
        0.0_f64.copysign(dividend / divisor)
    } else {
        let floored = quotient.floor();
        if quotient - floored > 0.5 { floored + 1.0 } else { floored }
    };

    Ok((floor_quotient, remainder))
}

/// Renders a float the way an interactive calculator user expects.
///
/// - Integral values keep a trailing `.0` (`2.0`).
/// - The shortest text that round-trips is used for the digits.
/// - Values whose decimal exponent is below `-4` or at least `16` switch to
///   exponent notation with a sign and at least two exponent digits
///   (`1e+16`, `1.5e-05`).
/// - Infinities and NaN render as `inf`, `-inf` and `nan`.
///
/// ## Example
/// ```
/// use reckon::util::num::format_f64;
///
/// assert_eq!(format_f64(3.5), "3.5");
/// assert_eq!(format_f64(2.0), "2.0");
/// assert_eq!(format_f64(1e16), "1e+16");
/// assert_eq!(format_f64(0.00001), "1e-05");
/// assert_eq!(format_f64(f64::NEG_INFINITY), "-inf");
/// ```
#[must_use]
pub fn format_f64(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` gives the shortest round-trip digits as `d.ddde[-]x`.
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e')
                                         .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        let plain = value.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_division_matches_the_floor_convention() {
        for (a, b, q, r) in [(7, 2, 3, 1),
                             (-7, 2, -4, 1),
                             (7, -2, -4, -1),
                             (-7, -2, 3, -1),
                             (6, 3, 2, 0),
                             (-6, 3, -2, 0),
                             (0, -5, 0, 0)]
        {
            assert_eq!(floor_div_i64(a, b).unwrap(), q, "{a} // {b}");
            assert_eq!(floor_mod_i64(a, b).unwrap(), r, "{a} % {b}");
        }
    }

    #[test]
    fn floor_division_overflow_and_zero() {
        assert_eq!(floor_div_i64(i64::MIN, -1), Err(EvalError::INTEGER_OVERFLOW));
        assert_eq!(floor_mod_i64(i64::MIN, -1), Ok(0));
        assert_eq!(floor_div_i64(1, 0), Err(EvalError::DivisionByZero));
        assert_eq!(floor_mod_i64(1, 0), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn float_divmod_signs() {
        let (q, r) = floor_divmod_f64(-0.0, 5.0).unwrap();
        assert!(q == 0.0 && q.is_sign_negative());
        assert!(r == 0.0 && r.is_sign_positive());

        let (_, r) = floor_divmod_f64(4.0, -2.0).unwrap();
        assert!(r == 0.0 && r.is_sign_negative());

        assert_eq!(floor_divmod_f64(1.0, -0.0), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn float_rendering() {
        assert_eq!(format_f64(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_f64(-0.0), "-0.0");
        assert_eq!(format_f64(1e15), "1000000000000000.0");
        assert_eq!(format_f64(1.5e-7), "1.5e-07");
        assert_eq!(format_f64(0.0001), "0.0001");
        assert_eq!(format_f64(1.2345e100), "1.2345e+100");
        assert_eq!(format_f64(f64::NAN), "nan");
    }
}

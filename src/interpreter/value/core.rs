use crate::util::num::{format_f64, i64_to_f64};

/// The result of evaluating an expression.
///
/// Integer operations stay integral except true division; anything involving
/// a float yields a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit floating-point number.
    Float(f64),
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl Number {
    /// Converts the number to an `f64`, rounding large integers to the
    /// nearest representable float.
    ///
    /// # Example
    /// ```
    /// use reckon::Number;
    ///
    /// assert_eq!(Number::Integer(10).as_f64(), 10.0);
    /// assert_eq!(Number::Float(2.5).as_f64(), 2.5);
    /// ```
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Integer(n) => i64_to_f64(n),
            Self::Float(f) => f,
        }
    }

    /// Whether this number equals zero (including `-0.0`).
    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Integer(n) => n == 0,
            Self::Float(f) => f == 0.0,
        }
    }
}

/// Integers render without a decimal point; floats use
/// [`format_f64`](crate::util::num::format_f64).
///
/// # Example
/// ```
/// use reckon::Number;
///
/// assert_eq!(Number::Integer(-9).to_string(), "-9");
/// assert_eq!(Number::Float(3.5).to_string(), "3.5");
/// assert_eq!(Number::Float(4.0).to_string(), "4.0");
/// ```
impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => f.write_str(&format_f64(*x)),
        }
    }
}

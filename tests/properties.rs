use proptest::prelude::*;
use reckon::{ErrorKind, Evaluator, Number, evaluate, parse, util::num::format_f64};

fn integer(src: &str) -> i64 {
    match evaluate(src) {
        Ok(Number::Integer(n)) => n,
        other => panic!("{src:?} gave {other:?}"),
    }
}

fn float(src: &str) -> f64 {
    match evaluate(src) {
        Ok(Number::Float(f)) => f,
        other => panic!("{src:?} gave {other:?}"),
    }
}

fn operand() -> impl Strategy<Value = String> {
    prop_oneof![(i64::MIN + 1..=i64::MAX).prop_map(|n| format!("({n})")),
                (-1e12_f64..1e12).prop_map(|f| format!("({})", format_f64(f)))]
}

proptest! {
    /// Floor division and modulo agree with the mathematical floor for
    /// operands small enough that `f64` division is exact enough to compare.
    #[test]
    fn floor_division_matches_floor(a in -1_000_000_i64..1_000_000, b in -1_000_000_i64..1_000_000) {
        prop_assume!(b != 0);
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let floor = (a as f64 / b as f64).floor() as i64;
        prop_assert_eq!(integer(&format!("({a}) // ({b})")), floor);
        prop_assert_eq!(integer(&format!("({a}) % ({b})")), a - b * floor);
    }

    /// `a == b * (a // b) + a % b` whenever the quotient is representable.
    #[test]
    fn division_identity_holds(a in i64::MIN + 1..=i64::MAX, b in i64::MIN + 1..=i64::MAX) {
        prop_assume!(b != 0);
        let q = integer(&format!("({a}) // ({b})"));
        let r = integer(&format!("({a}) % ({b})"));
        prop_assert_eq!(i128::from(b) * i128::from(q) + i128::from(r), i128::from(a));
        prop_assert!(r == 0 || (r < 0) == (b < 0));
        prop_assert!(r.unsigned_abs() < b.unsigned_abs());
    }

    /// True division always yields a float close to the real quotient.
    #[test]
    fn true_division_is_a_float(a in -1e9_f64..1e9, b in -1e9_f64..1e9) {
        prop_assume!(b != 0.0);
        let src = format!("({}) / ({})", format_f64(a), format_f64(b));
        let expected = a / b;
        let got = float(&src);
        prop_assert!((got - expected).abs() <= expected.abs() * 1e-12, "{src} = {got}");
    }

    /// Unary signs negate and preserve.
    #[test]
    fn unary_signs(a in i64::MIN + 1..=i64::MAX) {
        prop_assert_eq!(integer(&format!("-({a})")), -a);
        prop_assert_eq!(integer(&format!("+({a})")), a);
        prop_assert_eq!(integer(&format!("--({a})")), a);
    }

    /// Every zero divisor fails the same way, whatever the dividend.
    #[test]
    fn zero_divisors_always_fail(lhs in operand(), op in prop::sample::select(vec!["/", "//", "%"]),
                                 zero in prop::sample::select(vec!["0", "0.0", "-0.0", "(1 - 1)"])) {
        let src = format!("{lhs} {op} {zero}");
        prop_assert_eq!(evaluate(&src).map_err(|e| e.kind()), Err(ErrorKind::DivisionByZero), "{}", src);
    }

    /// Rendering a float and reading it back gives the same float.
    #[test]
    fn float_rendering_round_trips(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let rendered = format_f64(f);
        let back = float(&rendered);
        prop_assert_eq!(back.to_bits(), f.to_bits(), "{}", rendered);
    }

    /// The same text always produces the same outcome.
    #[test]
    fn evaluation_is_deterministic(lhs in operand(), rhs in operand(),
                                   op in prop::sample::select(vec!["+", "-", "*", "/", "//", "%", "**"])) {
        let src = format!("{lhs} {op} {rhs}");
        let evaluator = Evaluator::new();
        prop_assert_eq!(evaluator.evaluate(&src), evaluator.evaluate(&src));
    }

    /// Names never evaluate, whatever surrounds them.
    #[test]
    fn names_are_always_refused(name in "[a-z_][a-z0-9_]{0,8}", lhs in operand()) {
        prop_assume!(!["and", "or", "not", "in", "is", "if", "else", "lambda"].contains(&name.as_str()));
        let kind = evaluate(&format!("{lhs} + {name}")).map_err(|e| e.kind());
        prop_assert_eq!(kind, Err(ErrorKind::UnsupportedExpression));
    }

    /// Ensure the parser and evaluator never panic on arbitrary input; they
    /// return Ok or Err.
    #[test]
    fn never_panics(s in "\\PC*") {
        let _ = parse(&s);
        let _ = evaluate(&s);
    }

    /// Inputs built only from arithmetic characters never panic either, and
    /// their failures are always classified.
    #[test]
    fn arithmetic_noise_never_panics(s in "[0-9()+*/%. -]{0,64}") {
        if let Err(e) = evaluate(&s) {
            prop_assert!(!e.to_string().is_empty());
        }
    }
}

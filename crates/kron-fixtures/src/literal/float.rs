//! Shortest round-trip decimal text for `f64`.
//!
//! Layout follows the `repr` convention of scientific Python so that
//! regenerated fixtures stay byte-identical to older ones: positional
//! for decimal exponents in `[-4, 16)`, otherwise `d.ddde±XX`.

/// Decimal exponents outside `[MIN_POSITIONAL_EXP, MAX_POSITIONAL_EXP)`
/// switch to scientific notation.
const MIN_POSITIONAL_EXP: i32 = -4;
const MAX_POSITIONAL_EXP: i32 = 16;

/// Render `x` as the shortest decimal that parses back to the same bits.
///
/// Callers pass finite values only; [`crate::matrix::Matrix`] rejects the
/// rest.
pub fn format_f64(x: f64) -> String {
    debug_assert!(x.is_finite(), "cannot format non-finite {x}");

    // `{:e}` yields the shortest round-trip digits, e.g. "-1.25e-7".
    let sci = format!("{x:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    if (MIN_POSITIONAL_EXP..MAX_POSITIONAL_EXP).contains(&exp) {
        positional(sign, &digits, exp)
    } else {
        scientific(sign, &digits, exp)
    }
}

fn positional(sign: &str, digits: &str, exp: i32) -> String {
    if exp < 0 {
        let zeros = "0".repeat(exp.unsigned_abs() as usize - 1);
        return format!("{sign}0.{zeros}{digits}");
    }

    let int_len = exp as usize + 1;
    if digits.len() <= int_len {
        let pad = "0".repeat(int_len - digits.len());
        format!("{sign}{digits}{pad}.0")
    } else {
        let (int_part, frac_part) = digits.split_at(int_len);
        format!("{sign}{int_part}.{frac_part}")
    }
}

fn scientific(sign: &str, digits: &str, exp: i32) -> String {
    let (lead, rest) = digits.split_at(1);
    let exp_sign = if exp < 0 { '-' } else { '+' };
    let exp_abs = exp.unsigned_abs();
    if rest.is_empty() {
        format!("{sign}{lead}e{exp_sign}{exp_abs:02}")
    } else {
        format!("{sign}{lead}.{rest}e{exp_sign}{exp_abs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_keep_fraction() {
        assert_eq!(format_f64(1.0), "1.0");
        assert_eq!(format_f64(24.0), "24.0");
        assert_eq!(format_f64(1000.0), "1000.0");
        assert_eq!(format_f64(-3.0), "-3.0");
    }

    #[test]
    fn zeros() {
        assert_eq!(format_f64(0.0), "0.0");
        assert_eq!(format_f64(-0.0), "-0.0");
    }

    #[test]
    fn plain_fractions() {
        assert_eq!(format_f64(0.5), "0.5");
        assert_eq!(format_f64(0.1), "0.1");
        assert_eq!(format_f64(123.456), "123.456");
        assert_eq!(format_f64(0.0001), "0.0001");
        assert_eq!(format_f64(0.000_123_4), "0.0001234");
    }

    #[test]
    fn small_values_go_scientific() {
        assert_eq!(format_f64(0.00001), "1e-05");
        assert_eq!(format_f64(1.5e-7), "1.5e-07");
        assert_eq!(format_f64(-2.5e-300), "-2.5e-300");
        assert_eq!(format_f64(5e-324), "5e-324");
    }

    #[test]
    fn large_values_go_scientific() {
        assert_eq!(format_f64(1e15), "1000000000000000.0");
        assert_eq!(format_f64(1e16), "1e+16");
        assert_eq!(format_f64(2.5e20), "2.5e+20");
        assert_eq!(format_f64(1e100), "1e+100");
    }

    #[test]
    fn full_precision_is_kept() {
        assert_eq!(format_f64(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_f64(1.0 / 3.0), "0.3333333333333333");
    }
}

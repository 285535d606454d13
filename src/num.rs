//! Utilities related to numbers.

/// Number of mantissa digits after the decimal point in rendered float literals.
pub const FLOAT_LITERAL_PRECISION: usize = 15;

/// Formats a float as a literal of the form `[-]d.ddddddddddddddde[+-]XX`.
///
/// The exponent always carries a sign and at least two digits, which is the
/// notation the generated C++ and shell files are written against.
/// Returns `None` for non-finite values, which have no literal representation.
pub fn format_float_literal(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let formatted = format!("{:.*e}", FLOAT_LITERAL_PRECISION, value);
    let (mantissa, exponent) = formatted.split_once('e')?;
    let exponent: i32 = exponent.parse().ok()?;
    Some(format!(
        "{}e{}{:02}",
        mantissa,
        if exponent < 0 { '-' } else { '+' },
        exponent.abs()
    ))
}

/// Formats an integer as plain decimal digits.
pub fn format_int_literal<I: Into<i128>>(value: I) -> String {
    value.into().to_string()
}

/// Rounds the given count up to the nearest multiple of the given block size.
pub fn round_up_to_multiple(count: usize, block: usize) -> usize {
    if block == 0 {
        return count;
    }
    ((count + block - 1) / block) * block
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use regex::Regex;

    #[test]
    fn float_literals_have_fixed_mantissa_and_signed_exponent() {
        assert_eq!(
            format_float_literal(1.0).unwrap(),
            "1.000000000000000e+00"
        );
        assert_eq!(
            format_float_literal(-2.5e-6).unwrap(),
            "-2.500000000000000e-06"
        );
        assert_eq!(
            format_float_literal(8e24).unwrap(),
            "8.000000000000000e+24"
        );
        assert_eq!(
            format_float_literal(1.5e-123).unwrap(),
            "1.500000000000000e-123"
        );
        assert_eq!(
            format_float_literal(0.0).unwrap(),
            "0.000000000000000e+00"
        );
    }

    #[test]
    fn float_literals_parse_back_to_original_value() {
        let pattern = Regex::new(r"^-?\d\.\d{15}e[+-]\d{2,3}$").unwrap();
        for &value in &[
            1.0,
            -0.995,
            3.3356409519815204e-15,
            2.997_924_58e8,
            1e-29,
            -123456.789,
            6.02214076e23,
        ] {
            let literal = format_float_literal(value).unwrap();
            assert!(pattern.is_match(&literal), "Bad literal {}", literal);
            let parsed: f64 = literal.parse().unwrap();
            assert_relative_eq!(parsed, value, max_relative = 1e-15);
        }
    }

    #[test]
    fn non_finite_floats_have_no_literal() {
        assert!(format_float_literal(f64::NAN).is_none());
        assert!(format_float_literal(f64::INFINITY).is_none());
    }

    #[test]
    fn rounding_up_to_multiple_works() {
        assert_eq!(round_up_to_multiple(100, 16), 112);
        assert_eq!(round_up_to_multiple(112, 16), 112);
        assert_eq!(round_up_to_multiple(1, 4), 4);
        assert_eq!(round_up_to_multiple(0, 8), 0);
    }
}

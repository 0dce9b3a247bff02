const SIGNIFICANT_DIGITS: usize = 12;
const MIN_FIXED_EXPONENT: i32 = -4;

/// Renders a float the way deck names and deck attributes spell numbers.
///
/// The value is rounded to twelve significant digits and trailing zeros are trimmed.
/// Decimal exponents in `[-4, 12)` are written in positional notation and keep at least
/// one fractional digit (`1.0`, `0.0001`); everything else uses a signed, two-digit
/// minimum exponent (`1e-05`, `2.5e+16`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let negative = mantissa.starts_with('-');
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }

    if exponent < MIN_FIXED_EXPONENT || exponent >= SIGNIFICANT_DIGITS as i32 {
        let trimmed = digits.trim_end_matches('0');
        let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
        out.push_str(&trimmed[..1]);
        if trimmed.len() > 1 {
            out.push('.');
            out.push_str(&trimmed[1..]);
        }
        let sign = if exponent < 0 { '-' } else { '+' };
        out.push_str(&format!("e{}{:02}", sign, exponent.abs()));
        return out;
    }

    let (int_part, frac_part) = if exponent >= 0 {
        let split = exponent as usize + 1;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        let leading_zeros = "0".repeat((-exponent - 1) as usize);
        ("0".to_string(), format!("{}{}", leading_zeros, digits))
    };
    let frac_part = frac_part.trim_end_matches('0');

    out.push_str(&int_part);
    out.push('.');
    out.push_str(if frac_part.is_empty() { "0" } else { frac_part });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_keep_a_trailing_zero() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(-2.0), "-2.0");
        assert_eq!(format_float(100000000000.0), "100000000000.0");
    }

    #[test]
    fn short_decimals_render_exactly() {
        assert_eq!(format_float(0.1), "0.1");
        assert_eq!(format_float(-0.1), "-0.1");
        assert_eq!(format_float(0.05), "0.05");
        assert_eq!(format_float(123456.789), "123456.789");
        assert_eq!(format_float(0.0001), "0.0001");
    }

    #[test]
    fn values_are_rounded_to_twelve_significant_digits() {
        assert_eq!(format_float(1.0 / 3.0), "0.333333333333");
        assert_eq!(format_float(0.1 + 0.2), "0.3");
        assert_eq!(format_float(2.0 / 3.0), "0.666666666667");
    }

    #[test]
    fn small_and_large_magnitudes_use_exponent_notation() {
        assert_eq!(format_float(1e-5), "1e-05");
        assert_eq!(format_float(2.5e-5), "2.5e-05");
        assert_eq!(format_float(1e12), "1e+12");
        assert_eq!(format_float(-3.25e100), "-3.25e+100");
    }

    #[test]
    fn rounding_carry_moves_the_exponent() {
        assert_eq!(format_float(999999999999.9), "1e+12");
        assert_eq!(format_float(0.99999999999999), "1.0");
    }

    #[test]
    fn non_finite_values_have_fixed_spellings() {
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
    }
}

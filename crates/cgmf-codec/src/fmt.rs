//! Numeric rendering helpers matching the external reader's expectations.
//!
//! The reader was written against files produced with C-style `%e`
//! formatting: a fixed number of mantissa decimals and a signed two-digit
//! exponent (`1.23450e+00`). Rust's `{:e}` renders the exponent bare
//! (`1.2345e0`), so the scientific forms are rebuilt here.

/// Render `value` as `d.dddde+dd` with `precision` mantissa decimals.
pub fn sci_lower(value: f64, precision: usize) -> String {
    render_sci(value, precision, false)
}

/// Render `value` as `d.ddddE+dd` with `precision` mantissa decimals.
pub fn sci_upper(value: f64, precision: usize) -> String {
    render_sci(value, precision, true)
}

fn render_sci(value: f64, precision: usize, upper: bool) -> String {
    let base = format!("{value:.precision$e}");
    let (mantissa, exponent) = match base.split_once('e') {
        Some(parts) => parts,
        None => (base.as_str(), "0"),
    };
    let exp: i32 = exponent.parse().unwrap_or(0);
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}{marker}{sign}{:02}", exp.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_digit_signed_exponent() {
        assert_eq!(sci_lower(1.2345, 5), "1.23450e+00");
        assert_eq!(sci_lower(-0.5678, 5), "-5.67800e-01");
        assert_eq!(sci_lower(0.0, 5), "0.00000e+00");
        assert_eq!(sci_lower(12345.6, 5), "1.23456e+04");
    }

    #[test]
    fn upper_case_marker() {
        assert_eq!(sci_upper(170.93, 6), "1.709300E+02");
        assert_eq!(sci_upper(-0.001234, 6), "-1.234000E-03");
    }

    #[test]
    fn large_exponents_keep_full_digits() {
        assert_eq!(sci_lower(1e120, 2), "1.00e+120");
        assert_eq!(sci_lower(1e-120, 2), "1.00e-120");
    }

    #[test]
    fn padded_field_width_matches_table_layout() {
        // 13-wide level-density field and 15-wide TKE field.
        assert_eq!(format!("{:>13}", sci_lower(1.2345, 5)), "  1.23450e+00");
        assert_eq!(format!("{:>15}", sci_upper(170.93, 6)), "   1.709300E+02");
    }
}

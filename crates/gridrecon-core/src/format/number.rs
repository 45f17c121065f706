//! Smart-decimal number formatting.

/// Separator characters used when rendering numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub decimal_sep: char,
    pub thousands_sep: char,
}

impl Locale {
    pub const fn en_us() -> Self {
        Self {
            decimal_sep: '.',
            thousands_sep: ',',
        }
    }

    pub const fn de_de() -> Self {
        Self {
            decimal_sep: ',',
            thousands_sep: '.',
        }
    }

    pub const fn fr_fr() -> Self {
        Self {
            decimal_sep: ',',
            thousands_sep: '\u{00A0}',
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}

/// Format with `en-US` separators. See [`format_smart_decimal_with_locale`].
pub fn format_smart_decimal(value: f64, max_decimals: usize) -> String {
    format_smart_decimal_with_locale(value, max_decimals, &Locale::en_us())
}

/// Render a number with at most `max_decimals` fraction digits.
///
/// - rounds half-to-even at `max_decimals`
/// - trailing zero decimals are trimmed (`1.50` → `1.5`, `2.00` → `2`)
/// - the integer part is grouped by thousands
/// - `-0` (and negatives that round to zero) render as `0`
/// - NaN and the infinities render as `NaN`, `∞`, `-∞`
pub fn format_smart_decimal_with_locale(value: f64, max_decimals: usize, locale: &Locale) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    // Float formatting rounds exact ties to even.
    let fixed = format!("{:.*}", max_decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, locale.thousands_sep));
    if !frac_part.is_empty() {
        out.push(locale.decimal_sep);
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(int_part: &str, sep: char) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        out.push(ch);
        let remaining = len - i - 1;
        if remaining > 0 && remaining % 3 == 0 {
            out.push(sep);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_to_even() {
        assert_eq!(format_smart_decimal(123.445, 2), "123.44");
        assert_eq!(format_smart_decimal(0.125, 2), "0.12");
        assert_eq!(format_smart_decimal(0.375, 2), "0.38");
        assert_eq!(format_smart_decimal(2.5, 0), "2");
        assert_eq!(format_smart_decimal(3.5, 0), "4");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_smart_decimal(-0.0, 2), "0");
        assert_eq!(format_smart_decimal(-0.001, 2), "0");
        assert_eq!(format_smart_decimal(0.0, 2), "0");
    }

    #[test]
    fn test_trims_trailing_zeros() {
        assert_eq!(format_smart_decimal(1.5, 2), "1.5");
        assert_eq!(format_smart_decimal(2.0, 2), "2");
        assert_eq!(format_smart_decimal(-7.1, 3), "-7.1");
    }

    #[test]
    fn test_groups_thousands() {
        assert_eq!(format_smart_decimal(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_smart_decimal(-1000.0, 2), "-1,000");
        assert_eq!(format_smart_decimal(999.0, 2), "999");
        assert_eq!(format_smart_decimal(100000.0, 0), "100,000");
    }

    #[test]
    fn test_special_values() {
        assert_eq!(format_smart_decimal(f64::NAN, 2), "NaN");
        assert_eq!(format_smart_decimal(f64::INFINITY, 2), "∞");
        assert_eq!(format_smart_decimal(f64::NEG_INFINITY, 2), "-∞");
    }

    #[test]
    fn test_locales() {
        assert_eq!(
            format_smart_decimal_with_locale(1234.5, 2, &Locale::de_de()),
            "1.234,5"
        );
        assert_eq!(
            format_smart_decimal_with_locale(1234.5, 2, &Locale::fr_fr()),
            "1\u{00A0}234,5"
        );
        assert_eq!(Locale::default(), Locale::en_us());
    }
}

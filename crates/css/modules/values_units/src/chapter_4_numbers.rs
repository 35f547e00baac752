//! CSS Values & Units Level 3 — §4 Numbers
//! Spec: <https://www.w3.org/TR/css-values-3/#numeric-types>

use cssparser::{Parser, ParserInput, Token};

/// Read the number a piece of style text starts with, ignoring whatever unit follows.
///
/// `"12px"` is 12, `"1.5em"` is 1.5, `"50%"` is 50 and `" -3px"` is -3. Text that does not
/// start with a number (`""`, `"auto"`, `"px"`) yields NaN; callers doing arithmetic on the
/// result get NaN back rather than an error.
///
/// The digits are re-read from the source as `f64` so values keep double precision.
pub fn parse_leading_number(text: &str) -> f64 {
    let mut source = ParserInput::new(text);
    let mut parser = Parser::new(&mut source);
    parser.skip_whitespace();
    let start = parser.position();
    let (suffix_len, token_value) = match parser.next_including_whitespace_and_comments() {
        Ok(&Token::Number { value, .. }) => (0, value),
        Ok(&Token::Percentage { unit_value, .. }) => (1, unit_value * 100.0),
        Ok(Token::Dimension { value, unit, .. }) => (unit.len(), *value),
        _ => return f64::NAN,
    };
    let slice = parser.slice_from(start);
    slice
        .get(..slice.len().saturating_sub(suffix_len))
        .and_then(|digits| digits.parse::<f64>().ok())
        .unwrap_or_else(|| f64::from(token_value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_number_ignores_units() {
        assert_eq!(parse_leading_number("12px").to_bits(), 12.0_f64.to_bits());
        assert_eq!(parse_leading_number("  0.1px").to_bits(), 0.1_f64.to_bits());
        assert_eq!(parse_leading_number("-3.25em").to_bits(), (-3.25_f64).to_bits());
        assert_eq!(parse_leading_number("50%").to_bits(), 50.0_f64.to_bits());
        assert_eq!(parse_leading_number("1e3px").to_bits(), 1000.0_f64.to_bits());
        assert_eq!(parse_leading_number("7").to_bits(), 7.0_f64.to_bits());
    }

    #[test]
    fn leading_number_is_nan_without_digits() {
        assert!(parse_leading_number("").is_nan());
        assert!(parse_leading_number("   ").is_nan());
        assert!(parse_leading_number("auto").is_nan());
        assert!(parse_leading_number("px").is_nan());
    }
}

//! CSS Values & Units Level 3 — §6 Dimensions (Lengths subset)
//! Spec: <https://www.w3.org/TR/css-values-3/#lengths>

use crate::ParseError;
use cssparser::{Parser, ParserInput, Token};

/// Supported subset of CSS <length>: px, em, rem, vw, vh, plus unitless zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthUnit {
    Pixels,
    Ems,
    RootEms,
    ViewportWidth,
    ViewportHeight,
}

/// Compute the pixel value for a given `Length` using the current environment.
///
/// - Pixels: returns the raw value.
/// - Ems/RootEms: scales by the provided font sizes.
/// - Viewport-relative (vw/vh): requires viewport; returns a percentage of width/height.
pub fn compute_length_px(
    length: Length,
    font_size_px: f32,
    root_font_size_px: f32,
    viewport: Option<Viewport>,
) -> Option<f32> {
    match length.unit {
        LengthUnit::Pixels => Some(length.value),
        LengthUnit::Ems => Some(length.value * font_size_px),
        LengthUnit::RootEms => Some(length.value * root_font_size_px),
        LengthUnit::ViewportWidth => viewport
            .map(|viewport_metrics| length.value * (viewport_metrics.width_px as f32) / 100.0),
        LengthUnit::ViewportHeight => viewport
            .map(|viewport_metrics| length.value * (viewport_metrics.height_px as f32) / 100.0),
    }
}

/// A CSS <length> value with unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: LengthUnit,
}

/// Viewport metrics used to evaluate viewport-relative units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width_px: u32,
    pub height_px: u32,
}

/// Parse a CSS <length> (§6.2). Supports px/em/rem/vw/vh and unitless zero per spec.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not a supported `<length>`.
pub fn parse_length(input: &mut Parser) -> Result<Length, ParseError> {
    match input.next_including_whitespace_and_comments() {
        Ok(Token::Dimension { value, unit, .. }) => {
            let unit_kind = match unit.to_ascii_lowercase().as_str() {
                "px" => LengthUnit::Pixels,
                "em" => LengthUnit::Ems,
                "rem" => LengthUnit::RootEms,
                "vw" => LengthUnit::ViewportWidth,
                "vh" => LengthUnit::ViewportHeight,
                _ => return Err(ParseError::UnexpectedToken),
            };
            Ok(Length {
                value: *value,
                unit: unit_kind,
            })
        }
        Ok(&Token::Number { value, .. }) if value == 0.0 => Ok(Length {
            value: 0.0,
            unit: LengthUnit::Pixels,
        }),
        _ => Err(ParseError::UnexpectedToken),
    }
}

/// Parse a whole piece of text as a single <length>, allowing surrounding whitespace.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` if the text is not a length and
/// `ParseError::TrailingInput` if anything follows it.
pub fn parse_length_text(text: &str) -> Result<Length, ParseError> {
    let mut source = ParserInput::new(text);
    let mut parser = Parser::new(&mut source);
    parser.skip_whitespace();
    let length = parse_length(&mut parser)?;
    parser.skip_whitespace();
    if parser.is_exhausted() {
        Ok(length)
    } else {
        Err(ParseError::TrailingInput)
    }
}

/// Serialize a pixel value the way resolved styles report it (`12px`, `12.5px`).
pub fn format_px(value: f32) -> String {
    if value == 0.0 {
        return String::from("0px");
    }
    format!("{value}px")
}

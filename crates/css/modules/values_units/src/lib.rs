//! CSS Values and Units Module Level 3 — numbers and lengths as they appear in style text.
//! Spec: <https://www.w3.org/TR/css-values-3/>

#![forbid(unsafe_code)]

// Per-chapter modules mirroring the spec table of contents.
pub mod chapter_4_numbers;
pub mod chapter_6_dimensions;

// Re-exports for ergonomic access from other crates.
pub use chapter_4_numbers::parse_leading_number;
pub use chapter_6_dimensions::{
    Length, LengthUnit, Viewport, compute_length_px, format_px, parse_length, parse_length_text,
};

/// Parse error for Values & Units parsing utilities in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The next token did not match the expected grammar.
    UnexpectedToken,
    /// A value parsed but was followed by more input.
    TrailingInput,
}

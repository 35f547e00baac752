//! Selector parse errors.
//! Spec: Section 4. An invalid selector invalidates the whole group.

use core::fmt::{Display, Formatter, Result as FmtResult};

/// Reason a selector string was rejected by the parser.
///
/// Every variant except [`SelectorError::UnsupportedFeature`] is a syntax error: the
/// text is not a selector at all. `UnsupportedFeature` marks valid selector syntax that
/// this engine does not evaluate (dynamic pseudo-classes, pseudo-elements, namespaces).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorError {
    /// The selector (or one member of a selector list) was empty.
    Empty,
    /// A combinator was not followed, or not preceded, by a compound selector.
    DanglingCombinator,
    /// `.`, `#`, `[` or `:` was not followed by an identifier.
    MissingIdentifier { position: usize },
    /// An attribute selector, quoted value or functional pseudo-class was never closed.
    Unterminated { position: usize },
    /// A character that cannot appear at this point of a selector.
    UnexpectedCharacter { character: char, position: usize },
    /// Valid selector syntax outside the subset this engine evaluates.
    UnsupportedFeature { feature: String, position: usize },
}

impl SelectorError {
    /// Move reported offsets by `offset`, for errors found in a nested selector.
    pub(crate) fn shifted(self, offset: usize) -> Self {
        match self {
            Self::MissingIdentifier { position } => Self::MissingIdentifier {
                position: position.saturating_add(offset),
            },
            Self::Unterminated { position } => Self::Unterminated {
                position: position.saturating_add(offset),
            },
            Self::UnexpectedCharacter {
                character,
                position,
            } => Self::UnexpectedCharacter {
                character,
                position: position.saturating_add(offset),
            },
            Self::UnsupportedFeature { feature, position } => Self::UnsupportedFeature {
                feature,
                position: position.saturating_add(offset),
            },
            other @ (Self::Empty | Self::DanglingCombinator) => other,
        }
    }
}

impl Display for SelectorError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Empty => write!(formatter, "empty selector"),
            Self::DanglingCombinator => {
                write!(formatter, "combinator is missing a compound selector")
            }
            Self::MissingIdentifier { position } => {
                write!(formatter, "expected identifier at offset {position}")
            }
            Self::Unterminated { position } => {
                write!(formatter, "unterminated selector group starting at offset {position}")
            }
            Self::UnexpectedCharacter {
                character,
                position,
            } => write!(
                formatter,
                "unexpected '{character}' in selector at offset {position}"
            ),
            Self::UnsupportedFeature { feature, position } => write!(
                formatter,
                "selector feature '{feature}' at offset {position} is not supported"
            ),
        }
    }
}

impl core::error::Error for SelectorError {}

//! CSS selector parsing.
//! Spec: <https://www.w3.org/TR/selectors-3/>

use crate::{
    AttrOperator, Combinator, ComplexSelector, CompoundSelector, PseudoClass, SelectorError,
    SelectorList, SimpleSelector,
};
use core::mem::take;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Internal tokenizer token kinds.
pub enum Tok {
    /// A combinator token like child/adjacent/general sibling.
    Combinator(Combinator),
    /// Whitespace that implies a descendant combinator.
    DescendantWS,
    /// A simple selector token (type, class, id, attribute, universal, pseudo-class).
    Simple(SimpleSelector),
    /// Separator between members of a selector list.
    Comma,
}

/// Tokenizer over a selector string.
pub struct SelectorTokenizer<'input> {
    /// Selector source text.
    source: &'input str,
    /// Underlying bytes of `source`.
    input_bytes: &'input [u8],
    /// Current cursor index into `input_bytes`.
    index: usize,
}

impl<'input> SelectorTokenizer<'input> {
    /// Construct a tokenizer from input.
    #[inline]
    pub(crate) fn new(input: &'input str) -> Self {
        Self {
            source: input,
            input_bytes: input.as_bytes(),
            index: 0,
        }
    }

    /// Return the next selector token, if any.
    ///
    /// # Errors
    /// Returns a `SelectorError` when the input at the cursor is not valid selector syntax.
    #[inline]
    pub(crate) fn next_token(&mut self) -> Result<Option<Tok>, SelectorError> {
        let Some(&current) = self.input_bytes.get(self.index) else {
            return Ok(None);
        };
        let token = match current {
            byte if byte.is_ascii_whitespace() => {
                self.skip_spaces();
                Tok::DescendantWS
            }
            b'*' => {
                self.index = self.index.saturating_add(1);
                Tok::Simple(SimpleSelector::Universal)
            }
            b'.' => self.consume_class()?,
            b'#' => self.consume_id()?,
            b'[' => self.consume_attr()?,
            b'>' => self.consume_combinator(Combinator::Child),
            b'+' => self.consume_combinator(Combinator::AdjacentSibling),
            b'~' => self.consume_combinator(Combinator::GeneralSibling),
            b',' => {
                self.index = self.index.saturating_add(1);
                Tok::Comma
            }
            b':' => self.consume_pseudo()?,
            b'|' => return Err(self.feature_here("|")),
            byte if is_ident_start(byte) => self.consume_type()?,
            _ => return Err(self.unexpected_here()),
        };
        Ok(Some(token))
    }

    /// Build an `UnexpectedCharacter` error for the character under the cursor.
    fn unexpected_here(&self) -> SelectorError {
        let character = self
            .source
            .get(self.index..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or('\u{FFFD}');
        SelectorError::UnexpectedCharacter {
            character,
            position: self.index,
        }
    }

    /// Build an `UnsupportedFeature` error for valid syntax starting at the cursor.
    fn feature_here(&self, feature: &str) -> SelectorError {
        SelectorError::UnsupportedFeature {
            feature: feature.to_owned(),
            position: self.index,
        }
    }

    #[inline]
    fn consume_combinator(&mut self, combinator: Combinator) -> Tok {
        self.index = self.index.saturating_add(1);
        Tok::Combinator(combinator)
    }

    /// Consume an identifier consisting of ASCII alphanumerics, '-', '_' and non-ASCII code points.
    /// Returns `None` when no valid identifier starts at the cursor.
    /// Spec: Section 4 — identifiers follow CSS 2.1 `ident`
    #[inline]
    fn consume_ident(&mut self) -> Option<String> {
        let start = self.index;
        while let Some(&byte) = self.input_bytes.get(self.index) {
            if is_ident_char(byte) {
                self.index = self.index.saturating_add(1);
            } else {
                break;
            }
        }
        let slice = self.source.get(start..self.index)?;
        let mut bytes = slice.bytes();
        match (bytes.next(), bytes.next()) {
            (None, _) => None,
            (Some(first), _) if first.is_ascii_digit() => None,
            (Some(b'-'), Some(second)) if second.is_ascii_digit() => None,
            (Some(b'-'), None) => None,
            _ => Some(slice.to_owned()),
        }
    }

    /// Consume an identifier or report it as missing at `position`.
    #[inline]
    fn require_ident(&mut self, position: usize) -> Result<String, SelectorError> {
        self.consume_ident()
            .ok_or(SelectorError::MissingIdentifier { position })
    }

    /// Parse a type selector identifier into a `SimpleSelector::Type`.
    /// Spec: Section 5 — type selectors are ASCII case-insensitive in HTML documents
    #[inline]
    fn consume_type(&mut self) -> Result<Tok, SelectorError> {
        let start = self.index;
        let ident = self.require_ident(start)?;
        Ok(Tok::Simple(SimpleSelector::Type(ident.to_ascii_lowercase())))
    }

    /// Parse a class selector following '.' into `SimpleSelector::Class`.
    #[inline]
    fn consume_class(&mut self) -> Result<Tok, SelectorError> {
        // skip '.'
        self.index = self.index.saturating_add(1);
        let start = self.index;
        let ident = self.require_ident(start)?;
        Ok(Tok::Simple(SimpleSelector::Class(ident)))
    }

    /// Parse an id selector following '#' into `SimpleSelector::IdSelector`.
    #[inline]
    fn consume_id(&mut self) -> Result<Tok, SelectorError> {
        // skip '#'
        self.index = self.index.saturating_add(1);
        let start = self.index;
        let ident = self.require_ident(start)?;
        Ok(Tok::Simple(SimpleSelector::IdSelector(ident)))
    }

    /// Parse an attribute selector: `[name]`, or `[name<op>value]` with a quoted or
    /// unquoted value where `<op>` is one of `=`, `~=`, `|=`, `^=`, `$=`, `*=`.
    /// Spec: Section 8 — Attribute selectors
    #[inline]
    fn consume_attr(&mut self) -> Result<Tok, SelectorError> {
        let open = self.index;
        // skip '['
        self.index = self.index.saturating_add(1);
        self.skip_spaces();
        let name_start = self.index;
        let name = self.require_ident(name_start)?.to_ascii_lowercase();
        self.skip_spaces();
        let simple = match self.input_bytes.get(self.index) {
            Some(b']') => SimpleSelector::AttrExists(name),
            Some(_) => {
                let operator = self.consume_attr_operator()?;
                self.skip_spaces();
                let value = match self.input_bytes.get(self.index) {
                    Some(&quote) if quote == b'"' || quote == b'\'' => {
                        self.index = self.index.saturating_add(1);
                        self.consume_quoted_attr_value(quote, open)?
                    }
                    Some(_) => {
                        let value_start = self.index;
                        self.require_ident(value_start)?
                    }
                    None => return Err(SelectorError::Unterminated { position: open }),
                };
                self.skip_spaces();
                SimpleSelector::AttrMatch {
                    name,
                    operator,
                    value,
                }
            }
            None => return Err(SelectorError::Unterminated { position: open }),
        };
        match self.input_bytes.get(self.index) {
            Some(b']') => {
                self.index = self.index.saturating_add(1);
                Ok(Tok::Simple(simple))
            }
            Some(&byte) if is_ident_start(byte) => Err(self.feature_here("attribute flag")),
            Some(_) => Err(self.unexpected_here()),
            None => Err(SelectorError::Unterminated { position: open }),
        }
    }

    /// Consume the comparison operator of an attribute selector.
    fn consume_attr_operator(&mut self) -> Result<AttrOperator, SelectorError> {
        let first = self.input_bytes.get(self.index).copied();
        let second = self.input_bytes.get(self.index.saturating_add(1)).copied();
        let (operator, width) = match (first, second) {
            (Some(b'='), _) => (AttrOperator::Equals, 1),
            (Some(b'~'), Some(b'=')) => (AttrOperator::Includes, 2),
            (Some(b'|'), Some(b'=')) => (AttrOperator::DashMatch, 2),
            (Some(b'^'), Some(b'=')) => (AttrOperator::Prefix, 2),
            (Some(b'$'), Some(b'=')) => (AttrOperator::Suffix, 2),
            (Some(b'*'), Some(b'=')) => (AttrOperator::Substring, 2),
            (Some(b'|'), _) => return Err(self.feature_here("|")),
            _ => return Err(self.unexpected_here()),
        };
        self.index = self.index.saturating_add(width);
        Ok(operator)
    }

    /// Parse a pseudo-class after ':'.
    ///
    /// Structural pseudo-classes and `:not(<selector-list>)` are understood. Other
    /// pseudo-classes and all pseudo-elements are reported as unsupported features.
    /// Spec: Section 6.6 — Pseudo-classes
    fn consume_pseudo(&mut self) -> Result<Tok, SelectorError> {
        let start = self.index;
        // skip ':'
        self.index = self.index.saturating_add(1);
        let is_element = self.input_bytes.get(self.index) == Some(&b':');
        if is_element {
            self.index = self.index.saturating_add(1);
        }
        let name_start = self.index;
        let name = self.require_ident(name_start)?.to_ascii_lowercase();
        let unsupported = |feature: String| SelectorError::UnsupportedFeature {
            feature,
            position: start,
        };
        if is_element {
            return Err(unsupported(format!("::{name}")));
        }
        if self.input_bytes.get(self.index) != Some(&b'(') {
            return PseudoClass::from_name(&name)
                .map(|pseudo| Tok::Simple(SimpleSelector::PseudoClass(pseudo)))
                .ok_or_else(|| unsupported(format!(":{name}")));
        }
        let argument_start = self.index.saturating_add(1);
        let close = self
            .closing_paren(argument_start)
            .ok_or(SelectorError::Unterminated { position: start })?;
        if name != "not" {
            return Err(unsupported(format!(":{name}()")));
        }
        let argument = self.source.get(argument_start..close).unwrap_or_default();
        let inner =
            parse_selector_list(argument).map_err(|error| error.shifted(argument_start))?;
        self.index = close.saturating_add(1);
        Ok(Tok::Simple(SimpleSelector::Not(inner)))
    }

    /// Index of the ')' closing a group whose contents begin at `from`, skipping nested
    /// parentheses and quoted strings.
    fn closing_paren(&self, from: usize) -> Option<usize> {
        let mut depth = 0_usize;
        let mut quote = None;
        for (offset, &byte) in self.input_bytes.get(from..)?.iter().enumerate() {
            match (quote, byte) {
                (Some(open), _) if byte == open => quote = None,
                (None, b'"' | b'\'') => quote = Some(byte),
                (None, b'(') => depth = depth.saturating_add(1),
                (None, b')') if depth == 0 => return Some(from.saturating_add(offset)),
                (None, b')') => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        None
    }

    /// Consume a quoted attribute value until the matching quote byte.
    #[inline]
    fn consume_quoted_attr_value(
        &mut self,
        quote: u8,
        open: usize,
    ) -> Result<String, SelectorError> {
        let start = self.index;
        while matches!(self.input_bytes.get(self.index), Some(&byte) if byte != quote) {
            self.index = self.index.saturating_add(1);
        }
        if self.input_bytes.get(self.index).is_none() {
            return Err(SelectorError::Unterminated { position: open });
        }
        let out = self.source.get(start..self.index).unwrap_or_default().to_owned();
        // skip closing quote
        self.index = self.index.saturating_add(1);
        Ok(out)
    }

    /// Skip ASCII whitespace.
    #[inline]
    fn skip_spaces(&mut self) {
        while matches!(self.input_bytes.get(self.index), Some(byte) if byte.is_ascii_whitespace()) {
            self.index = self.index.saturating_add(1);
        }
    }
}

/// Bytes that may begin a type selector.
const fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte == b'-' || byte >= 0x80
}

/// Bytes that may continue an identifier.
const fn is_ident_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' || byte >= 0x80
}

/// Accumulates compounds and combinators for one complex selector.
#[derive(Default)]
struct ComplexBuilder {
    /// Compound currently being extended with simple selectors.
    current: CompoundSelector,
    /// Finished compounds, left to right.
    done: Vec<CompoundSelector>,
    /// Combinators joining `done` (and `current`), left to right.
    combinators: Vec<Combinator>,
    /// Explicit combinator waiting for its right-hand compound.
    pending: Option<Combinator>,
    /// Whitespace seen since the last simple selector.
    saw_whitespace: bool,
}

impl ComplexBuilder {
    /// Append a simple selector, closing the current compound on a descendant boundary.
    fn push_simple(
        &mut self,
        simple: SimpleSelector,
        source: &str,
        position: usize,
    ) -> Result<(), SelectorError> {
        if self.current.simples.is_empty() {
            if let Some(combinator) = self.pending.take() {
                self.combinators.push(combinator);
            }
        } else if self.saw_whitespace {
            self.done.push(take(&mut self.current));
            self.combinators.push(Combinator::Descendant);
        } else if matches!(simple, SimpleSelector::Type(_) | SimpleSelector::Universal) {
            // Spec: Section 5 — a type or universal selector must come first in a sequence.
            let character = source
                .get(position..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or('*');
            return Err(SelectorError::UnexpectedCharacter {
                character,
                position,
            });
        }
        self.current.simples.push(simple);
        self.saw_whitespace = false;
        Ok(())
    }

    /// Record an explicit combinator after the current compound.
    fn push_combinator(&mut self, combinator: Combinator) -> Result<(), SelectorError> {
        if self.current.simples.is_empty() {
            return Err(SelectorError::DanglingCombinator);
        }
        self.done.push(take(&mut self.current));
        self.pending = Some(combinator);
        self.saw_whitespace = false;
        Ok(())
    }

    /// Finish the selector.
    fn finish(mut self) -> Result<ComplexSelector, SelectorError> {
        if self.current.simples.is_empty() {
            return Err(if self.pending.is_some() {
                SelectorError::DanglingCombinator
            } else {
                SelectorError::Empty
            });
        }
        self.done.push(self.current);
        let mut compounds = self.done.into_iter();
        let first = compounds.next().unwrap_or_default();
        let rest = self.combinators.into_iter().zip(compounds).collect();
        Ok(ComplexSelector { first, rest })
    }
}

/// Parse a selector list from CSS text.
/// Spec: Section 3, 4, 5–8, 11
///
/// # Errors
/// Returns a `SelectorError` if any member of the list is invalid; per Section 4 an
/// invalid member invalidates the whole group.
pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    let mut tokens = SelectorTokenizer::new(input);
    let mut list = SelectorList::default();
    let mut builder = ComplexBuilder::default();

    loop {
        let position = tokens.index;
        let Some(token) = tokens.next_token()? else {
            break;
        };
        match token {
            Tok::Combinator(comb) => builder.push_combinator(comb)?,
            Tok::DescendantWS => builder.saw_whitespace = true,
            Tok::Simple(simple) => builder.push_simple(simple, input, position)?,
            Tok::Comma => list.selectors.push(take(&mut builder).finish()?),
        }
    }
    list.selectors.push(builder.finish()?);
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(simples: &[SimpleSelector]) -> CompoundSelector {
        CompoundSelector {
            simples: simples.to_vec(),
        }
    }

    fn single(input: &str) -> Result<ComplexSelector, SelectorError> {
        let mut list = parse_selector_list(input)?;
        assert_eq!(list.selectors.len(), 1, "{input}");
        list.selectors.pop().ok_or(SelectorError::Empty)
    }

    #[test]
    fn parses_compound_with_descendant_and_child() {
        assert_eq!(
            single("DIV.card > span#Title [data-x]"),
            Ok(ComplexSelector {
                first: compound(&[
                    SimpleSelector::Type("div".to_owned()),
                    SimpleSelector::Class("card".to_owned()),
                ]),
                rest: vec![
                    (
                        Combinator::Child,
                        compound(&[
                            SimpleSelector::Type("span".to_owned()),
                            SimpleSelector::IdSelector("Title".to_owned()),
                        ]),
                    ),
                    (
                        Combinator::Descendant,
                        compound(&[SimpleSelector::AttrExists("data-x".to_owned())]),
                    ),
                ],
            })
        );
    }

    #[test]
    fn surrounding_whitespace_is_not_a_combinator() {
        let parsed = parse_selector_list("  a ,b  ");
        assert_eq!(parsed.map(|list| list.selectors.len()), Ok(2));
    }

    #[test]
    fn quoted_attribute_value_may_contain_commas() {
        assert_eq!(
            single("[title='a, b']").map(|sel| sel.first.simples),
            Ok(vec![SimpleSelector::AttrMatch {
                name: "title".to_owned(),
                operator: AttrOperator::Equals,
                value: "a, b".to_owned(),
            }])
        );
    }

    #[test]
    fn attribute_operators() {
        let cases = [
            ("[a~=b]", AttrOperator::Includes),
            ("[a|=b]", AttrOperator::DashMatch),
            ("[a^=b]", AttrOperator::Prefix),
            ("[a $= b]", AttrOperator::Suffix),
            ("[a*=\"b\"]", AttrOperator::Substring),
        ];
        for (input, operator) in cases {
            assert_eq!(
                single(input).map(|sel| sel.first.simples),
                Ok(vec![SimpleSelector::AttrMatch {
                    name: "a".to_owned(),
                    operator,
                    value: "b".to_owned(),
                }]),
                "{input}"
            );
        }
    }

    #[test]
    fn structural_pseudo_classes() {
        assert_eq!(
            single("p:First-Child:last-of-type").map(|sel| sel.first.simples),
            Ok(vec![
                SimpleSelector::Type("p".to_owned()),
                SimpleSelector::PseudoClass(PseudoClass::FirstChild),
                SimpleSelector::PseudoClass(PseudoClass::LastOfType),
            ])
        );
    }

    #[test]
    fn negation_takes_a_selector_list() {
        let parsed = single("li:not(.a, [title='x)'])").map(|sel| sel.first.simples);
        let negated = match parsed.as_deref() {
            Ok([_, SimpleSelector::Not(inner)]) => inner.selectors.len(),
            _ => 0,
        };
        assert_eq!(negated, 2, "{parsed:?}");
        assert_eq!(
            parse_selector_list(":not(:not(a))").map(|list| list.selectors.len()),
            Ok(1)
        );
    }

    #[test]
    fn valid_but_unimplemented_selectors_are_unsupported_features() {
        let unsupported = |input: &str| match parse_selector_list(input) {
            Err(SelectorError::UnsupportedFeature { feature, position }) => Some((feature, position)),
            _ => None,
        };
        assert_eq!(unsupported("a:hover"), Some((":hover".to_owned(), 1)));
        assert_eq!(unsupported("p::before"), Some(("::before".to_owned(), 1)));
        assert_eq!(unsupported("li:nth-child(2n+1)"), Some((":nth-child()".to_owned(), 2)));
        assert_eq!(unsupported("svg|rect"), Some(("|".to_owned(), 3)));
        assert_eq!(unsupported("[a=b i]"), Some(("attribute flag".to_owned(), 5)));
        assert_eq!(unsupported(":not(a:hover)"), Some((":hover".to_owned(), 6)));
    }

    #[test]
    fn rejects_malformed_selectors() {
        assert_eq!(parse_selector_list(""), Err(SelectorError::Empty));
        assert_eq!(parse_selector_list("a,"), Err(SelectorError::Empty));
        assert_eq!(
            parse_selector_list("> a"),
            Err(SelectorError::DanglingCombinator)
        );
        assert_eq!(
            parse_selector_list("a >"),
            Err(SelectorError::DanglingCombinator)
        );
        assert_eq!(
            parse_selector_list("."),
            Err(SelectorError::MissingIdentifier { position: 1 })
        );
        assert_eq!(
            parse_selector_list("[x"),
            Err(SelectorError::Unterminated { position: 0 })
        );
        assert_eq!(
            parse_selector_list("a:not(b"),
            Err(SelectorError::Unterminated { position: 1 })
        );
        assert_eq!(parse_selector_list(":not()"), Err(SelectorError::Empty));
        assert_eq!(
            parse_selector_list("a!"),
            Err(SelectorError::UnexpectedCharacter {
                character: '!',
                position: 1
            })
        );
        assert_eq!(
            parse_selector_list(".a*"),
            Err(SelectorError::UnexpectedCharacter {
                character: '*',
                position: 2
            })
        );
    }
}

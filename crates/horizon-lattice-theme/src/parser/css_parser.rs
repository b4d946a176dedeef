//! Theme stylesheet parser using the `cssparser` crate.
//!
//! The dialect is a small CSS subset: comma-separated selector lists made of
//! identifiers, `#id`, `.class`, `*` and `:` (so `Button::Label` addresses a
//! sub-element), followed by a `{ name: value; ... }` block. Values are not
//! interpreted; they are handed to the compiler as raw text.
//!
//! Unlike a browser parser there is no error recovery. The first syntax error
//! aborts the parse so the caller can reject the whole theme.

use cssparser::{
    BasicParseErrorKind, Delimiter, ParseError as CssParseError, ParseErrorKind, Parser,
    ParserInput, SourcePosition, ToCss, Token,
};

use super::{ParseError, RawProperty, StylesheetRule};
use crate::logging::targets;

type CssResult<'i, T> = std::result::Result<T, CssParseError<'i, SyntaxError>>;

/// Syntax errors specific to the theme dialect.
#[derive(Debug, Clone, thiserror::Error)]
enum SyntaxError {
    #[error("Expected '{{' after selector")]
    ExpectedBlock,
    #[error("Unterminated block, expected '}}'")]
    UnterminatedBlock,
    #[error("Empty selector")]
    EmptySelector,
    #[error("Unexpected '{0}' in selector")]
    UnexpectedSelectorToken(String),
    #[error("Invalid property name '{0}'")]
    InvalidPropertyName(String),
    #[error("Expected ':' after property '{0}'")]
    ExpectedColon(String),
    #[error("Missing value for property '{0}'")]
    MissingValue(String),
    #[error("Unexpected '{token}' in value of property '{property}'")]
    UnexpectedValueToken { property: String, token: String },
    #[error("Missing '{closer}' in value of property '{property}'")]
    UnclosedValueBlock { property: String, closer: &'static str },
}

/// Parse a theme stylesheet into its selector groups.
///
/// Rules are returned in source order. Each rule keeps its selectors and
/// declarations in the order they were written, including duplicates.
///
/// # Errors
///
/// Returns a [`ParseError`] with a 1-indexed location for unterminated
/// blocks, malformed declarations and stray tokens outside of any rule.
///
/// # Example
///
/// ```
/// use horizon_lattice_theme::parser::parse_stylesheet;
///
/// let rules = parse_stylesheet("Button, Label { Color: red; }").unwrap();
/// assert_eq!(rules[0].selectors, vec!["Button", "Label"]);
/// assert_eq!(rules[0].properties[0].value, "red");
/// ```
pub fn parse_stylesheet(css: &str) -> Result<Vec<StylesheetRule>, ParseError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut rules = vec![];

    loop {
        // Skip whitespace and comments
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        let rule = parse_rule(&mut parser).map_err(convert_error)?;
        rules.push(rule);
    }

    tracing::trace!(target: targets::PARSER, rules = rules.len(), "parsed stylesheet");
    Ok(rules)
}

/// Parse a single rule: selectors { declarations }
fn parse_rule<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, StylesheetRule> {
    let selectors =
        parser.parse_until_before(Delimiter::CurlyBracketBlock, |p| parse_selector_list(p))?;

    let block_location = parser.current_source_location();
    if !matches!(parser.next(), Ok(Token::CurlyBracketBlock)) {
        return Err(block_location.new_custom_error(SyntaxError::ExpectedBlock));
    }

    let (properties, content_end) = parser.parse_nested_block(|p| {
        let properties = parse_declarations(p)?;
        p.skip_whitespace();
        Ok::<_, CssParseError<'i, SyntaxError>>((properties, p.position()))
    })?;

    // cssparser closes blocks implicitly at end of input, so the only thing
    // consumed after the block content must be the closing brace itself.
    if !closed_by(parser, content_end, "}") {
        return Err(block_location.new_custom_error(SyntaxError::UnterminatedBlock));
    }

    Ok(StylesheetRule::new(selectors, properties))
}

/// Parse a comma-separated selector list into normalized selector strings.
fn parse_selector_list<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, Vec<String>> {
    let mut selectors = vec![];
    let mut current = String::new();

    loop {
        let location = parser.current_source_location();
        let token = match parser.next_including_whitespace() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        match token {
            Token::WhiteSpace(_) => {
                if !current.is_empty() && !current.ends_with(' ') {
                    current.push(' ');
                }
            }
            Token::Ident(name) => current.push_str(&name),
            Token::IDHash(id) | Token::Hash(id) => {
                current.push('#');
                current.push_str(&id);
            }
            Token::Delim(c @ ('.' | '*')) => current.push(c),
            Token::Colon => current.push(':'),
            Token::Comma => {
                selectors.push(finish_selector(&mut current, location)?);
            }
            other => {
                return Err(location.new_custom_error(SyntaxError::UnexpectedSelectorToken(
                    other.to_css_string(),
                )));
            }
        }
    }

    let location = parser.current_source_location();
    selectors.push(finish_selector(&mut current, location)?);
    Ok(selectors)
}

fn finish_selector<'i>(
    current: &mut String,
    location: cssparser::SourceLocation,
) -> CssResult<'i, String> {
    let selector = current.trim().to_string();
    current.clear();
    if selector.is_empty() {
        return Err(location.new_custom_error(SyntaxError::EmptySelector));
    }
    Ok(selector)
}

/// Parse the declarations of one block.
fn parse_declarations<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, Vec<RawProperty>> {
    let mut properties = vec![];

    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        let location = parser.current_source_location();
        let name = match parser.next()?.clone() {
            Token::Ident(name) => name.to_string(),
            // Empty declaration, e.g. `a: 1;;`
            Token::Semicolon => continue,
            other => {
                return Err(location.new_custom_error(SyntaxError::InvalidPropertyName(
                    other.to_css_string(),
                )));
            }
        };

        let colon_location = parser.current_source_location();
        if parser.expect_colon().is_err() {
            return Err(colon_location.new_custom_error(SyntaxError::ExpectedColon(name)));
        }

        let value = parser.parse_until_after(Delimiter::Semicolon, |p| parse_raw_value(p, &name))?;
        if value.is_empty() {
            return Err(location.new_custom_error(SyntaxError::MissingValue(name)));
        }

        properties.push(RawProperty::new(name, value));
    }

    Ok(properties)
}

/// Collect the source text of a value up to the next `;` or the block end.
///
/// Whitespace runs collapse to one space and comments are dropped. A value
/// that is a single quoted string is returned unquoted.
fn parse_raw_value<'i>(parser: &mut Parser<'i, '_>, property: &str) -> CssResult<'i, String> {
    let mut value = String::new();
    let mut pending_space = false;
    let mut token_count = 0usize;
    let mut single_string = None;

    loop {
        let location = parser.current_source_location();
        let start = parser.position();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        match &token {
            Token::WhiteSpace(_) => {
                pending_space = !value.is_empty();
                continue;
            }
            Token::Comment(_) => continue,
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                let closer = if matches!(token, Token::SquareBracketBlock) { "]" } else { ")" };
                let content_end = parser.parse_nested_block(|nested| {
                    while nested.next_including_whitespace_and_comments().is_ok() {}
                    Ok::<_, CssParseError<'i, SyntaxError>>(nested.position())
                })?;
                if !closed_by(parser, content_end, closer) {
                    return Err(location.new_custom_error(SyntaxError::UnclosedValueBlock {
                        property: property.to_string(),
                        closer,
                    }));
                }
            }
            Token::CurlyBracketBlock
            | Token::BadString(_)
            | Token::BadUrl(_)
            | Token::CloseParenthesis
            | Token::CloseSquareBracket
            | Token::CloseCurlyBracket => {
                return Err(location.new_custom_error(SyntaxError::UnexpectedValueToken {
                    property: property.to_string(),
                    token: token.to_css_string(),
                }));
            }
            _ => {}
        }

        token_count += 1;
        single_string = match token {
            Token::QuotedString(s) if token_count == 1 => Some(s.to_string()),
            _ => None,
        };

        if pending_space {
            value.push(' ');
            pending_space = false;
        }
        value.push_str(parser.slice_from(start));
    }

    Ok(single_string.unwrap_or(value))
}

/// Whether the text consumed since `content_end` is exactly `closer`.
fn closed_by(parser: &Parser<'_, '_>, content_end: SourcePosition, closer: &str) -> bool {
    parser.slice_from(content_end) == closer
}

/// Convert a cssparser error into a located [`ParseError`].
fn convert_error(err: CssParseError<'_, SyntaxError>) -> ParseError {
    let message = match err.kind {
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            format!("Unexpected '{}'", token.to_css_string())
        }
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            "Unexpected end of input".to_string()
        }
        ParseErrorKind::Basic(other) => format!("{:?}", other),
        ParseErrorKind::Custom(kind) => kind.to_string(),
    };
    // cssparser lines are 0-indexed, columns are already 1-indexed.
    ParseError::new(message, err.location.line + 1, err.location.column)
}

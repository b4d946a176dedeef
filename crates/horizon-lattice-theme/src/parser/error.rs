//! Stylesheet syntax errors.

/// A syntax error in a theme stylesheet.
///
/// Locations are 1-indexed and point at the token that could not be accepted,
/// or at the opening `{` of a block that never closed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error parsing theme CSS at line {line}, column {column}. {message}")]
pub struct ParseError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

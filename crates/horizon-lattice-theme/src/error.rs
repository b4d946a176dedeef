//! Error types for theme loading.

use std::path::PathBuf;

use crate::parser::ParseError;

/// Result type alias for theme operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a theme.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Stylesheet syntax error.
    #[error("{message} (line {line}, column {column})")]
    Parse {
        message: String,
        line: u32,
        column: u32,
    },

    /// The stylesheet has no `Theme` block (or the block is empty).
    #[error("Missing Theme selector.")]
    MissingThemeSelector,

    /// The `Theme` block has no `Name` entry.
    #[error("Missing Theme Name.")]
    MissingThemeName,

    /// The `UnitSize` entry could not be converted to a vector.
    ///
    /// This one is recoverable: the loader reports it and falls back to the
    /// configured default unit size.
    #[error("Unable to parse UnitSize attribute value \"{value}\".")]
    InvalidUnitSize { value: String },

    /// File I/O error.
    #[error("Failed to read theme '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a parse error.
    pub fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid unit size error.
    pub fn invalid_unit_size(value: impl Into<String>) -> Self {
        Self::InvalidUnitSize {
            value: value.into(),
        }
    }

    /// Whether the loader can keep going after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidUnitSize { .. })
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse {
            message: err.message,
            line: err.line,
            column: err.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_converts_with_location() {
        let err: Error = ParseError::new("Expected ':'", 3, 7).into();
        match err {
            Error::Parse {
                ref message,
                line,
                column,
            } => {
                assert_eq!(message, "Expected ':'");
                assert_eq!(line, 3);
                assert_eq!(column, 7);
            }
            ref other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Expected ':' (line 3, column 7)");
    }

    #[test]
    fn only_unit_size_is_recoverable() {
        assert!(Error::invalid_unit_size("bogus").is_recoverable());
        assert!(!Error::MissingThemeName.is_recoverable());
        assert!(!Error::MissingThemeSelector.is_recoverable());
        assert!(!Error::parse("x", 1, 1).is_recoverable());
    }
}

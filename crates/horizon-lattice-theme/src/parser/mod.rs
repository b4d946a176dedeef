//! Stylesheet parsing module.

mod css_parser;
mod error;
mod rule;

pub use css_parser::parse_stylesheet;
pub use error::ParseError;
pub use rule::{RawProperty, StylesheetRule};

//! Raw selector groups produced by the parser.

/// A `name: value` declaration exactly as written in the stylesheet.
///
/// Values are kept as text; nothing here knows what a property means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProperty {
    /// Property name.
    pub name: String,
    /// Raw property value.
    pub value: String,
}

impl RawProperty {
    /// Create a new raw property.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One `{ ... }` block: the selectors in front of it and its declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylesheetRule {
    /// Comma-separated selectors, in source order.
    pub selectors: Vec<String>,
    /// Declarations, in source order. Duplicates are kept.
    pub properties: Vec<RawProperty>,
}

impl StylesheetRule {
    /// Create a rule from its selectors and declarations.
    pub fn new(selectors: Vec<String>, properties: Vec<RawProperty>) -> Self {
        Self {
            selectors,
            properties,
        }
    }

    /// Whether this is the reserved `Theme` metadata block.
    ///
    /// Only a selector list made of the single entry `Theme` counts; `Theme`
    /// mixed into a longer list is styled like any other element.
    pub fn is_theme(&self) -> bool {
        self.selectors.len() == 1 && self.selectors[0] == crate::THEME_SELECTOR
    }
}

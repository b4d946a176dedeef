//! Style properties and property name rewriting.

use crate::selector::PATH_SEPARATOR;

/// A compiled `name: value` pair stored on a style node.
///
/// Two properties are equal when their names are equal. The style table
/// relies on this to replace re-declared properties.
#[derive(Debug, Clone)]
pub struct StyleProperty {
    name: String,
    value: String,
}

impl StyleProperty {
    /// Create a new property.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Property name, already rewritten for sub-element paths.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw property value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl PartialEq for StyleProperty {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for StyleProperty {}

impl std::hash::Hash for StyleProperty {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Build the property a declaration contributes under `selector`.
///
/// Without a `::` path in the selector the declaration is kept as is.
/// Otherwise the name becomes `state-path.field`:
///
/// - `Button::Label` + `FontColor` gives `Label.FontColor`
/// - `Button::Label` + `hover-FontColor` gives `hover-Label.FontColor`
/// - `Button::Label` + `hover--FontColor` gives `hover--Label.FontColor`
///
/// A name without `-`, or starting with one, carries no state.
pub fn rewrite_property(selector: &str, name: &str, value: &str) -> StyleProperty {
    let Some(path_index) = selector.find(PATH_SEPARATOR) else {
        return StyleProperty::new(name, value);
    };

    let path = &selector[path_index + PATH_SEPARATOR.len()..];
    let mut field = name;
    let mut state = String::new();

    if let Some(state_index) = name.find('-').filter(|&i| i > 0) {
        state.push_str(&name[..state_index]);
        state.push('-');
        field = &name[state_index + 1..];

        // Sub-state: `state--field`
        if let Some(sub_field) = field.strip_prefix('-') {
            field = sub_field;
            state.push('-');
        }
    }

    StyleProperty::new(format!("{state}{path}.{field}"), value)
}

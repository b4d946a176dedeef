//! Selector decomposition.
//!
//! A theme selector such as `Window Group#Toolbar Button.primary::Label` is
//! read as a chain of ancestors separated by whitespace. Each segment names an
//! element type, an optional `#id` and an optional `.class`. Anything after a
//! `::` path separator addresses a sub-element and is handled by the property
//! rewriter, not by the selector key.

use std::fmt;

/// Separator between a selector and the sub-element path it addresses.
pub const PATH_SEPARATOR: &str = "::";

/// Split a selector into its hierarchy segments, outermost ancestor first.
///
/// Whitespace runs are discarded, so `"  A   B "` yields `["A", "B"]`.
pub fn decompose(selector: &str) -> Vec<&str> {
    selector.split_whitespace().collect()
}

/// One hierarchy segment split into element name, id and class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StyleSelector {
    /// Element type name. Empty for `#id` or `.class` only segments.
    pub element_name: String,
    /// Id without the leading `#`.
    pub id: Option<String>,
    /// Class name without the leading `.`.
    pub class_name: Option<String>,
}

impl StyleSelector {
    /// Decompose a single hierarchy segment.
    ///
    /// The element name runs up to the first `#` or `.`; the id and class run
    /// up to the next marker of the other kind. A `::` path suffix is ignored.
    pub fn parse(segment: &str) -> Self {
        let segment = match segment.find(PATH_SEPARATOR) {
            Some(index) => &segment[..index],
            None => segment,
        };

        let id_start = segment.find('#');
        let class_start = segment.find('.');

        let element_end = match (id_start, class_start) {
            (Some(i), Some(c)) => i.min(c),
            (Some(i), None) => i,
            (None, Some(c)) => c,
            (None, None) => segment.len(),
        };

        Self {
            element_name: segment[..element_end].to_string(),
            id: id_start.map(|start| component(segment, start, '.')),
            class_name: class_start.map(|start| component(segment, start, '#')),
        }
    }

    /// Key identifying this segment independently of its ancestors.
    ///
    /// This is the canonical `element#id.class` form, so `Button.primary#Ok`
    /// and `Button#Ok.primary` share a key.
    pub fn local_selector(&self) -> String {
        self.to_string()
    }
}

/// Read the component starting at the marker at `start` up to `stop` or the end.
fn component(segment: &str, start: usize, stop: char) -> String {
    let rest = &segment[start + 1..];
    match rest.find(stop) {
        Some(end) => rest[..end].to_string(),
        None => rest.to_string(),
    }
}

impl fmt::Display for StyleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element_name)?;

        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }

        if let Some(class) = &self.class_name {
            write!(f, ".{}", class)?;
        }

        Ok(())
    }
}

//! Compiled themes.

use glam::Vec3;

use crate::property::StyleProperty;
use crate::selector::StyleSelector;

/// A node of the compiled style table.
///
/// Nodes are identified by their index, which is also their position in
/// [`Theme::styles`]. A node's parent always has a smaller index.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleData {
    index: usize,
    parent: Option<usize>,
    selector: StyleSelector,
    properties: Vec<StyleProperty>,
}

impl StyleData {
    pub(crate) fn new(index: usize, parent: Option<usize>, selector: StyleSelector) -> Self {
        debug_assert!(parent.is_none_or(|p| p < index));
        Self {
            index,
            parent,
            selector,
            properties: vec![],
        }
    }

    /// Replace re-declared properties and append the new ones in order.
    ///
    /// Properties whose names are not among `properties` keep their place.
    pub(crate) fn apply(&mut self, properties: &[StyleProperty]) {
        self.properties.retain(|existing| !properties.contains(existing));
        self.properties.extend_from_slice(properties);
    }

    /// Position of this node in the style table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Index of the parent node, `None` for roots.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Parent index with `-1` standing for "no parent".
    pub fn parent_index(&self) -> i32 {
        self.parent.map_or(-1, |p| p as i32)
    }

    /// Whether this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Selector components of this node.
    pub fn selector(&self) -> &StyleSelector {
        &self.selector
    }

    /// Element type name, empty when the selector has none.
    pub fn element_name(&self) -> &str {
        &self.selector.element_name
    }

    /// Id selector.
    pub fn id(&self) -> Option<&str> {
        self.selector.id.as_deref()
    }

    /// Class selector.
    pub fn class_name(&self) -> Option<&str> {
        self.selector.class_name.as_deref()
    }

    /// Properties in declaration order.
    pub fn properties(&self) -> &[StyleProperty] {
        &self.properties
    }

    /// Look up a property by its (rewritten) name.
    pub fn property(&self, name: &str) -> Option<&StyleProperty> {
        self.properties.iter().find(|p| p.name() == name)
    }
}

/// A compiled theme: metadata from the `Theme` block plus the style table.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub(crate) name: String,
    pub(crate) source: String,
    pub(crate) base_directory: Option<String>,
    pub(crate) unit_size: Vec3,
    pub(crate) is_unit_size_set: bool,
    pub(crate) styles: Vec<StyleData>,
}

impl Theme {
    /// Theme name from the `Name` entry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Label of the stylesheet this theme was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Base directory override from the `BaseDirectory` entry.
    pub fn base_directory(&self) -> Option<&str> {
        self.base_directory.as_deref()
    }

    /// Whether the stylesheet set `BaseDirectory`.
    pub fn is_base_directory_set(&self) -> bool {
        self.base_directory.is_some()
    }

    /// Resolved unit size.
    ///
    /// This is the configured default when `UnitSize` is missing or could not
    /// be parsed.
    pub fn unit_size(&self) -> Vec3 {
        self.unit_size
    }

    /// Whether the stylesheet contained a `UnitSize` entry.
    ///
    /// Stays `true` when the entry was present but unparsable and the default
    /// was used instead.
    pub fn is_unit_size_set(&self) -> bool {
        self.is_unit_size_set
    }

    /// All style nodes, ordered by index. Parents come before children.
    pub fn styles(&self) -> &[StyleData] {
        &self.styles
    }

    /// Get a style node by index.
    pub fn style(&self, index: usize) -> Option<&StyleData> {
        self.styles.get(index)
    }

    /// Get the parent of a style node.
    pub fn parent(&self, style: &StyleData) -> Option<&StyleData> {
        style.parent.and_then(|p| self.styles.get(p))
    }

    /// Iterate over the ancestors of a style node, nearest first.
    pub fn ancestors<'a>(
        &'a self,
        style: &'a StyleData,
    ) -> impl Iterator<Item = &'a StyleData> + 'a {
        std::iter::successors(self.parent(style), move |s| self.parent(s))
    }

    /// Iterate over nodes without a parent.
    pub fn roots(&self) -> impl Iterator<Item = &StyleData> {
        self.styles.iter().filter(|s| s.is_root())
    }

    /// Iterate over the direct children of the node at `index`.
    pub fn children(&self, index: usize) -> impl Iterator<Item = &StyleData> {
        self.styles.iter().filter(move |s| s.parent == Some(index))
    }

    /// Find a node by its selector components, wherever it sits in the
    /// hierarchy. Returns the first match in index order.
    pub fn find(
        &self,
        element: &str,
        id: Option<&str>,
        class_name: Option<&str>,
    ) -> Option<&StyleData> {
        self.styles.iter().find(|s| {
            s.element_name() == element && s.id() == id && s.class_name() == class_name
        })
    }

    /// Number of style nodes.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the theme has no style nodes.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

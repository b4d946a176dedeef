//! Compilation of parsed stylesheets into themes.
//!
//! The style table is an append-only arena of [`StyleData`] nodes. Every
//! selector is walked from its outermost ancestor to its target, creating one
//! node per hierarchy segment unless a node for the same ancestor path and
//! segment already exists. Declarations only land on the target node, where
//! they replace earlier declarations of the same name.

use std::collections::HashMap;

use glam::Vec3;

use crate::convert::parse_vector3;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::logging::targets;
use crate::parser::StylesheetRule;
use crate::property::{StyleProperty, rewrite_property};
use crate::selector::{StyleSelector, decompose};
use crate::theme::{StyleData, Theme};
use crate::{Error, Result, ThemeLoaderConfig};

/// Theme entry holding the theme name.
pub const THEME_NAME: &str = "Name";
/// Theme entry holding the unit size vector.
pub const THEME_UNIT_SIZE: &str = "UnitSize";
/// Theme entry holding the base directory override.
pub const THEME_BASE_DIRECTORY: &str = "BaseDirectory";

/// Builds the style table for one compilation.
#[derive(Debug, Default)]
struct StyleTable {
    styles: Vec<StyleData>,
    /// (ancestor path, local selector) -> node index
    lookup: HashMap<(String, String), usize>,
}

impl StyleTable {
    /// Add one selector and its already rewritten properties.
    fn insert(&mut self, selector: &str, properties: &[StyleProperty]) {
        let hierarchy = decompose(selector);
        let mut path = String::new();
        let mut parent = None;

        for (depth, segment) in hierarchy.iter().enumerate() {
            let style = StyleSelector::parse(segment);
            let local = style.local_selector();
            let key = (path.clone(), local);

            let index = match self.lookup.get(&key) {
                Some(&index) => index,
                None => {
                    let index = self.styles.len();
                    self.styles.push(StyleData::new(index, parent, style));
                    self.lookup.insert(key.clone(), index);
                    index
                }
            };

            if depth == hierarchy.len() - 1 {
                self.styles[index].apply(properties);
            }

            if !path.is_empty() {
                path.push(' ');
            }
            path.push_str(&key.1);
            parent = Some(index);
        }
    }
}

/// Compile parsed rules into a [`Theme`].
///
/// `source` labels diagnostics and ends up in [`Theme::source`]. Recoverable
/// problems (an unparsable `UnitSize`) are reported to `diagnostics` and
/// compilation carries on with the configured default.
///
/// # Errors
///
/// - [`Error::MissingThemeSelector`] when there is no non-empty `Theme` block
/// - [`Error::MissingThemeName`] when the `Theme` block has no `Name`
pub fn compile(
    rules: &[StylesheetRule],
    source: &str,
    config: &ThemeLoaderConfig,
    diagnostics: &dyn DiagnosticSink,
) -> Result<Theme> {
    let mut table = StyleTable::default();
    let mut theme_properties: HashMap<&str, &str> = HashMap::new();

    for rule in rules {
        if rule.is_theme() {
            // Later entries win, also across several Theme blocks.
            for prop in &rule.properties {
                theme_properties.insert(&prop.name, &prop.value);
            }
            continue;
        }

        for selector in &rule.selectors {
            let properties: Vec<StyleProperty> = rule
                .properties
                .iter()
                .map(|prop| rewrite_property(selector, &prop.name, &prop.value))
                .collect();

            table.insert(selector, &properties);
        }
    }

    if theme_properties.is_empty() {
        return Err(Error::MissingThemeSelector);
    }

    let name = theme_properties
        .get(THEME_NAME)
        .ok_or(Error::MissingThemeName)?
        .to_string();

    let unit_size = theme_properties.get(THEME_UNIT_SIZE).copied();
    let base_directory = theme_properties
        .get(THEME_BASE_DIRECTORY)
        .map(|dir| dir.to_string());

    let theme = Theme {
        name,
        source: source.to_string(),
        base_directory,
        unit_size: resolve_unit_size(unit_size, source, config, diagnostics),
        is_unit_size_set: unit_size.is_some(),
        styles: table.styles,
    };

    tracing::debug!(
        target: targets::COMPILER,
        theme = %theme.name,
        source,
        rules = rules.len(),
        styles = theme.styles.len(),
        "compiled theme"
    );

    Ok(theme)
}

/// Resolve the `UnitSize` entry, falling back to the configured default.
fn resolve_unit_size(
    value: Option<&str>,
    source: &str,
    config: &ThemeLoaderConfig,
    diagnostics: &dyn DiagnosticSink,
) -> Vec3 {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return config.default_unit_size;
    };

    match parse_vector3(value) {
        Ok(unit_size) => unit_size,
        Err(err) => {
            tracing::trace!(target: targets::COMPILER, %err, "unit size conversion failed");
            let diagnostic = Diagnostic::from_error(source, &Error::invalid_unit_size(value));
            diagnostics.report(&config.log_tag, &diagnostic);
            config.default_unit_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingDiagnostics, DiagnosticKind};
    use crate::parser::{RawProperty, parse_stylesheet};

    fn compile_css(css: &str) -> (Result<Theme>, CollectingDiagnostics) {
        let sink = CollectingDiagnostics::new();
        let rules = parse_stylesheet(css).unwrap();
        let result = compile(&rules, "test.css", &ThemeLoaderConfig::default(), &sink);
        (result, sink)
    }

    fn theme(css: &str) -> Theme {
        compile_css(css).0.unwrap()
    }

    fn props(style: &StyleData) -> Vec<(&str, &str)> {
        style.properties().iter().map(|p| (p.name(), p.value())).collect()
    }

    #[test]
    fn shared_ancestor_is_not_duplicated() {
        let theme = theme("Theme { Name: T } A B { x: 1 } A C { y: 2 }");

        assert_eq!(theme.len(), 3);
        let a = theme.find("A", None, None).unwrap();
        let b = theme.find("B", None, None).unwrap();
        let c = theme.find("C", None, None).unwrap();
        assert!(a.is_root());
        assert_eq!(b.parent(), Some(a.index()));
        assert_eq!(c.parent(), Some(a.index()));
        assert!(props(a).is_empty());
        assert_eq!(props(b), vec![("x", "1")]);
        assert_eq!(props(c), vec![("y", "2")]);
    }

    #[test]
    fn same_segment_under_different_ancestors() {
        let theme = theme("Theme { Name: T } A C { x: 1 } B C { y: 2 } C { z: 3 }");

        let nodes: Vec<_> = theme
            .styles()
            .iter()
            .map(|s| (s.element_name(), s.parent_index()))
            .collect();
        assert_eq!(nodes, vec![("A", -1), ("C", 0), ("B", -1), ("C", 2), ("C", -1)]);
    }

    #[test]
    fn later_rule_overrides_redeclared_properties() {
        let theme = theme(
            "Theme { Name: T }
             Button { Color: red; Width: 10 }
             Button { Color: blue }",
        );

        assert_eq!(theme.len(), 1);
        assert_eq!(props(&theme.styles()[0]), vec![("Width", "10"), ("Color", "blue")]);
    }

    #[test]
    fn override_uses_full_path() {
        let theme = theme(
            "Theme { Name: T }
             Group Button { Color: red }
             Button { Color: blue }",
        );

        let nested = theme.style(1).unwrap();
        assert_eq!(nested.parent(), Some(0));
        assert_eq!(props(nested), vec![("Color", "red")]);
        assert_eq!(props(theme.style(2).unwrap()), vec![("Color", "blue")]);
    }

    #[test]
    fn properties_only_apply_to_target_node() {
        let theme = theme("Theme { Name: T } A { a: 1 } A B { b: 2 }");

        assert_eq!(props(theme.style(0).unwrap()), vec![("a", "1")]);
        assert_eq!(props(theme.style(1).unwrap()), vec![("b", "2")]);
    }

    #[test]
    fn selector_list_styles_each_selector() {
        let theme = theme("Theme { Name: T } Button, Label.title { Color: red }");

        assert_eq!(theme.len(), 2);
        assert_eq!(props(theme.find("Button", None, None).unwrap()), vec![("Color", "red")]);
        assert_eq!(
            props(theme.find("Label", None, Some("title")).unwrap()),
            vec![("Color", "red")]
        );
    }

    #[test]
    fn path_properties_share_the_element_node() {
        let theme = theme(
            "Theme { Name: T }
             Button { Color: red }
             Button::Label { Color: white; hover-Color: gray; pressed--Offset: 1 }",
        );

        assert_eq!(theme.len(), 1);
        assert_eq!(
            props(&theme.styles()[0]),
            vec![
                ("Color", "red"),
                ("Label.Color", "white"),
                ("hover-Label.Color", "gray"),
                ("pressed--Label.Offset", "1"),
            ]
        );
    }

    #[test]
    fn id_and_class_are_part_of_the_key() {
        let theme =
            theme("Theme { Name: T } Button { a: 1 } Button.primary { b: 2 } Button#Ok { c: 3 }");

        assert_eq!(theme.len(), 3);
        let primary = theme.find("Button", None, Some("primary")).unwrap();
        assert_eq!(primary.class_name(), Some("primary"));
        assert_eq!(theme.find("Button", Some("Ok"), None).unwrap().id(), Some("Ok"));
    }

    #[test]
    fn indices_increase_and_parents_precede_children() {
        let theme = theme(
            "Theme { Name: T }
             Window Group Button { a: 1 }
             Window Label { b: 2 }
             Panel Group Button { c: 3 }
             Window Group { d: 4 }",
        );

        for (position, style) in theme.styles().iter().enumerate() {
            assert_eq!(style.index(), position);
            if let Some(parent) = style.parent() {
                assert!(parent < style.index());
            }
        }
        assert_eq!(theme.len(), 7);
    }

    #[test]
    fn duplicate_declarations_in_one_rule_are_kept() {
        let theme = theme("Theme { Name: T } A { x: 1; x: 2 } ");
        assert_eq!(props(&theme.styles()[0]), vec![("x", "1"), ("x", "2")]);

        let theme = self::theme("Theme { Name: T } A { x: 1; x: 2 } A { x: 3 }");
        assert_eq!(props(&theme.styles()[0]), vec![("x", "3")]);
    }

    #[test]
    fn theme_metadata() {
        let theme = theme(
            "Theme { Name: Dark; UnitSize: 32, 32, 0; BaseDirectory: Assets/Dark/ }
             Button { Color: red }",
        );

        assert_eq!(theme.name(), "Dark");
        assert_eq!(theme.source(), "test.css");
        assert_eq!(theme.unit_size(), Vec3::new(32.0, 32.0, 0.0));
        assert!(theme.is_unit_size_set());
        assert_eq!(theme.base_directory(), Some("Assets/Dark/"));
        assert!(theme.is_base_directory_set());
    }

    #[test]
    fn theme_block_is_not_a_style() {
        let theme = theme("Theme { Name: T }");

        assert!(theme.is_empty());
        assert!(!theme.is_unit_size_set());
        assert!(!theme.is_base_directory_set());
        assert_eq!(theme.unit_size(), ThemeLoaderConfig::DEFAULT_UNIT_SIZE);
    }

    #[test]
    fn theme_in_selector_list_is_not_metadata() {
        let (result, _) = compile_css("Theme, Button { Color: red }");

        assert!(matches!(result, Err(Error::MissingThemeSelector)));
    }

    #[test]
    fn later_theme_entries_overwrite_earlier_ones() {
        let theme = theme("Theme { Name: First; Name: Second } Theme { UnitSize: 8 }");

        assert_eq!(theme.name(), "Second");
        assert_eq!(theme.unit_size(), Vec3::splat(8.0));

        let theme = self::theme("Theme { Name: First } Theme { Name: Last }");
        assert_eq!(theme.name(), "Last");
    }

    #[test]
    fn missing_theme_selector() {
        let (result, sink) = compile_css(".foo { x: 1 }");

        assert!(matches!(result, Err(Error::MissingThemeSelector)));
        assert!(sink.is_empty());
    }

    #[test]
    fn empty_theme_block_counts_as_missing() {
        let (result, _) = compile_css("Theme { }");

        assert!(matches!(result, Err(Error::MissingThemeSelector)));
    }

    #[test]
    fn missing_theme_name() {
        let (result, _) = compile_css("Theme { UnitSize: 1, 1, 1 }");

        assert!(matches!(result, Err(Error::MissingThemeName)));
    }

    #[test]
    fn invalid_unit_size_falls_back_to_default() {
        let (result, sink) = compile_css("Theme { Name: Foo; UnitSize: bogus }");
        let theme = result.unwrap();

        assert_eq!(theme.unit_size(), ThemeLoaderConfig::DEFAULT_UNIT_SIZE);
        assert!(theme.is_unit_size_set());
        assert_eq!(sink.kinds(), vec![DiagnosticKind::InvalidUnitSize]);
        assert!(sink.diagnostics()[0].message.contains("bogus"));
    }

    #[test]
    fn configured_default_unit_size() {
        let sink = CollectingDiagnostics::new();
        let rules = parse_stylesheet("Theme { Name: Foo }").unwrap();
        let config = ThemeLoaderConfig::default().with_default_unit_size(Vec3::new(1.0, 2.0, 3.0));

        let theme = compile(&rules, "x", &config, &sink).unwrap();

        assert_eq!(theme.unit_size(), Vec3::new(1.0, 2.0, 3.0));
        assert!(!theme.is_unit_size_set());
    }

    #[test]
    fn empty_unit_size_uses_default_without_diagnostic() {
        let sink = CollectingDiagnostics::new();
        let rules = vec![StylesheetRule::new(
            vec!["Theme".into()],
            vec![RawProperty::new("Name", "Foo"), RawProperty::new("UnitSize", "")],
        )];
        let theme = compile(&rules, "x", &ThemeLoaderConfig::default(), &sink).unwrap();

        assert_eq!(theme.unit_size(), ThemeLoaderConfig::DEFAULT_UNIT_SIZE);
        assert!(theme.is_unit_size_set());
        assert!(sink.is_empty());
    }
}

//! CSS theme compiler for Horizon Lattice.
//!
//! Themes are written in a small CSS dialect and compiled into a style table
//! that the layout system can walk:
//!
//! - **Theme block**: a `Theme { Name: ...; UnitSize: ...; BaseDirectory: ... }`
//!   block carries metadata instead of styles
//! - **Hierarchy**: `Window Group Button` styles a `Button` inside a `Group`
//!   inside a `Window`; shared ancestors share one style node
//! - **Sub-element paths**: `Button::Label { hover-FontColor: red }` stores
//!   `hover-Label.FontColor` on the `Button` node
//! - **Overrides**: re-declaring a property on the same selector path replaces
//!   it, other properties of the node are left alone
//! - **Hot Reload**: recompile theme files when they change on disk
//!
//! # Example
//!
//! ```
//! use horizon_lattice_theme::prelude::*;
//!
//! let css = r#"
//!     Theme { Name: Flat; UnitSize: 32, 32, 0 }
//!     Window Button { BackgroundColor: blue }
//!     Window Button::Label { hover-FontColor: white }
//! "#;
//!
//! let theme = ThemeLoader::new().load_css(css, "flat.css").expect("valid theme");
//!
//! assert_eq!(theme.name(), "Flat");
//! let button = theme.find("Button", None, None).unwrap();
//! assert_eq!(theme.parent(button).unwrap().element_name(), "Window");
//! assert!(button.property("hover-Label.FontColor").is_some());
//! ```

pub mod compiler;
pub mod convert;
pub mod diagnostics;
pub mod logging;
pub mod parser;
pub mod property;
pub mod selector;
pub mod theme;

mod config;
mod error;
mod loader;

pub use config::ThemeLoaderConfig;
pub use error::{Error, Result};
pub use loader::ThemeLoader;

/// Reserved selector of the theme metadata block.
pub const THEME_SELECTOR: &str = "Theme";

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::diagnostics::{
        CollectingDiagnostics, Diagnostic, DiagnosticKind, DiagnosticSink, Severity,
        TracingDiagnostics,
    };
    pub use crate::property::StyleProperty;
    pub use crate::selector::StyleSelector;
    pub use crate::theme::{StyleData, Theme};
    pub use crate::{Error, Result, ThemeLoader, ThemeLoaderConfig};
}

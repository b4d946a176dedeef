//! Theme loading entry point.

use std::path::Path;

use crate::compiler::compile;
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingDiagnostics};
use crate::parser::parse_stylesheet;
use crate::theme::Theme;
use crate::{Error, Result, ThemeLoaderConfig};

/// Loads theme stylesheets.
///
/// The loader holds only read-only state, so one instance can serve many
/// loads, including from several threads when its sink is `Sync`.
///
/// # Example
///
/// ```
/// use horizon_lattice_theme::ThemeLoader;
///
/// let loader = ThemeLoader::new();
/// let theme = loader
///     .load_css("Theme { Name: Flat } Button::Label { hover-FontColor: red }", "flat.css")
///     .expect("valid theme");
///
/// assert_eq!(theme.name(), "Flat");
/// assert_eq!(theme.styles()[0].properties()[0].name(), "hover-Label.FontColor");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThemeLoader<D = TracingDiagnostics> {
    config: ThemeLoaderConfig,
    diagnostics: D,
}

impl ThemeLoader {
    /// Create a loader with default configuration that logs through `tracing`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with custom configuration that logs through `tracing`.
    pub fn with_config(config: ThemeLoaderConfig) -> Self {
        Self {
            config,
            diagnostics: TracingDiagnostics,
        }
    }
}

impl<D: DiagnosticSink> ThemeLoader<D> {
    /// Create a loader that reports to a custom diagnostic sink.
    pub fn with_diagnostics(config: ThemeLoaderConfig, diagnostics: D) -> Self {
        Self {
            config,
            diagnostics,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ThemeLoaderConfig {
        &self.config
    }

    /// Get the diagnostic sink.
    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Load a theme from stylesheet text.
    ///
    /// Returns `None` when the theme cannot be built; the reason has been
    /// reported to the diagnostic sink. `source` is only used to label
    /// diagnostics.
    pub fn load_css(&self, css: &str, source: &str) -> Option<Theme> {
        self.try_load_css(css, source)
            .map_err(|err| self.report(source, &err))
            .ok()
    }

    /// Load a theme from stylesheet text, returning the failure.
    ///
    /// Recoverable problems are still reported to the diagnostic sink.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`], [`Error::MissingThemeSelector`] or
    /// [`Error::MissingThemeName`].
    pub fn try_load_css(&self, css: &str, source: &str) -> Result<Theme> {
        let rules = parse_stylesheet(css)?;
        compile(&rules, source, &self.config, &self.diagnostics)
    }

    /// Load a theme file.
    ///
    /// The file name labels diagnostics. Returns `None` on failure after
    /// reporting it.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Option<Theme> {
        let path = path.as_ref();
        self.try_load_file(path)
            .map_err(|err| self.report(&source_label(path), &err))
            .ok()
    }

    /// Load a theme file, returning the failure.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, otherwise the same errors as
    /// [`try_load_css`](Self::try_load_css).
    pub fn try_load_file(&self, path: impl AsRef<Path>) -> Result<Theme> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        self.try_load_css(&content, &source_label(path))
    }

    fn report(&self, source: &str, error: &Error) {
        let diagnostic = Diagnostic::from_error(source, error);
        self.diagnostics.report(&self.config.log_tag, &diagnostic);
    }
}

/// Label a theme file by its file name, falling back to the full path.
fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

//! Loader configuration.

use glam::Vec3;

/// Configuration shared by every load performed through a
/// [`ThemeLoader`](crate::ThemeLoader).
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use horizon_lattice_theme::ThemeLoaderConfig;
///
/// let config = ThemeLoaderConfig::default()
///     .with_default_unit_size(Vec3::new(32.0, 32.0, 0.0))
///     .with_log_tag("Editor");
/// assert_eq!(config.log_tag, "Editor");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeLoaderConfig {
    /// Unit size used when a theme has no usable `UnitSize` entry.
    pub default_unit_size: Vec3,
    /// Tag prefixed to diagnostic messages, e.g. `[Lattice]`.
    pub log_tag: String,
}

impl ThemeLoaderConfig {
    /// Default unit size: 40 x 40 with no depth.
    pub const DEFAULT_UNIT_SIZE: Vec3 = Vec3::new(40.0, 40.0, 0.0);

    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback unit size.
    pub fn with_default_unit_size(mut self, unit_size: Vec3) -> Self {
        self.default_unit_size = unit_size;
        self
    }

    /// Set the diagnostic tag.
    pub fn with_log_tag(mut self, tag: impl Into<String>) -> Self {
        self.log_tag = tag.into();
        self
    }
}

impl Default for ThemeLoaderConfig {
    fn default() -> Self {
        Self {
            default_unit_size: Self::DEFAULT_UNIT_SIZE,
            log_tag: "Lattice".to_string(),
        }
    }
}

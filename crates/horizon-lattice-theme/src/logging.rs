//! Logging targets for the theme compiler.
//!
//! Horizon Lattice uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; applications decide where events go:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_lattice_theme=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Stylesheet parser target.
    pub const PARSER: &str = "horizon_lattice_theme::parser";
    /// Style table compiler target.
    pub const COMPILER: &str = "horizon_lattice_theme::compiler";
    /// Loader diagnostics target.
    pub const LOADER: &str = "horizon_lattice_theme::loader";
}

//! Conversion of raw theme values.

use glam::Vec3;

/// A raw value that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid vector value \"{value}\": {reason}")]
pub struct ConvertError {
    /// The offending value.
    pub value: String,
    /// Why the conversion failed.
    pub reason: &'static str,
}

impl ConvertError {
    fn new(value: &str, reason: &'static str) -> Self {
        Self {
            value: value.to_string(),
            reason,
        }
    }
}

/// Parse a vector written as one to three comma-separated numbers.
///
/// - `"40"` gives `(40, 40, 40)`
/// - `"40, 20"` gives `(40, 20, 0)`
/// - `"40, 20, 1"` gives `(40, 20, 1)`
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use horizon_lattice_theme::convert::parse_vector3;
///
/// assert_eq!(parse_vector3("40, 40, 0"), Ok(Vec3::new(40.0, 40.0, 0.0)));
/// assert!(parse_vector3("bogus").is_err());
/// ```
pub fn parse_vector3(value: &str) -> Result<Vec3, ConvertError> {
    let components = value
        .split(',')
        .map(|part| {
            let part = part.trim();
            if part.is_empty() {
                return Err(ConvertError::new(value, "empty component"));
            }
            part.parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ConvertError::new(value, "component is not a number"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match components.as_slice() {
        [x] => Ok(Vec3::splat(*x)),
        [x, y] => Ok(Vec3::new(*x, *y, 0.0)),
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(ConvertError::new(value, "expected 1 to 3 components")),
    }
}

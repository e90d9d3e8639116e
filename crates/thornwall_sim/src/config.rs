//! # Simulation Configuration
//!
//! Parsed once at startup from TOML the host provides; every value is
//! validated before the world is built, so a bad config never reaches the
//! frame loop. File discovery and loading stay with the host.

use serde::Deserialize;

use crate::error::{SimError, SimResult};

/// Tunables for one simulation instance.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Spatial hash cell edge length; tune near the median entity extent.
    pub cell_size: f32,
    /// Fixed time step per tick, in seconds.
    pub fixed_dt: f32,
    /// Entity capacity reserved up front (the world grows past it).
    pub entity_capacity: usize,
    /// Playfield width in world units.
    pub field_width: f32,
    /// Playfield height in world units.
    pub field_height: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cell_size: 100.0,
            fixed_dt: 1.0 / 60.0,
            entity_capacity: 1024,
            field_width: 900.0,
            field_height: 500.0,
        }
    }
}

impl SimConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`SimError::Parse`] for malformed TOML, [`SimError::InvalidConfig`]
    /// for out-of-range values.
    pub fn from_toml(text: &str) -> SimResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value is in range.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "fixed_dt must be positive, got {}",
                self.fixed_dt
            )));
        }
        if self.entity_capacity == 0 {
            return Err(SimError::InvalidConfig(
                "entity_capacity must be non-zero".to_string(),
            ));
        }
        if !(self.field_width.is_finite() && self.field_width > 0.0)
            || !(self.field_height.is_finite() && self.field_height > 0.0)
        {
            return Err(SimError::InvalidConfig(
                "field dimensions must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = SimConfig::from_toml("cell_size = 80.0\nentity_capacity = 256\n").unwrap();
        assert!((config.cell_size - 80.0).abs() < f32::EPSILON);
        assert_eq!(config.entity_capacity, 256);
        // Unspecified fields keep their defaults.
        assert!((config.fixed_dt - 1.0 / 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn non_positive_cell_size_is_rejected() {
        let err = SimConfig::from_toml("cell_size = 0.0\n").unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = SimConfig::from_toml("cell_size = \"wide\"\n").unwrap_err();
        assert!(matches!(err, SimError::Parse(_)));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(SimConfig::from_toml("gravity = 9.8\n").is_err());
    }
}

// Configuration of the action layer
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ActionError, ActionResult};

/// Conservation tolerance (GeV) used when no configuration is at hand.
pub const DEFAULT_CONSERVATION_TOLERANCE: f64 = 1e-9;

/// Settings that shape which channels actions enumerate and how results are
/// checked.
///
/// Configurations are plain values: the scheduler owns one and passes a
/// reference into every action it builds, so actions evaluated in parallel
/// never share mutable state. Missing keys in a JSON document take their
/// default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Constant elastic cross section in mb. When set it replaces every
    /// pair-specific elastic parametrization and allows pairs that have none.
    pub elastic_cross_section: Option<f64>,
    /// Enable resonance formation (2 -> 1).
    pub two_to_one: bool,
    /// Enable inelastic two-body channels (2 -> 2).
    pub two_to_two: bool,
    /// Use the forward-peaked Cugnon distribution for nucleon-nucleon elastic
    /// scattering instead of isotropic emission.
    pub anisotropic_nn: bool,
    /// Collision channels with a cross section at or below this value (mb)
    /// are dropped during enumeration. Decays keep every open channel.
    pub low_weight_cutoff: f64,
    /// Absolute tolerance on four-momentum components in conservation checks.
    pub conservation_tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            elastic_cross_section: None,
            two_to_one: true,
            two_to_two: true,
            anisotropic_nn: false,
            low_weight_cutoff: 1e-6,
            conservation_tolerance: DEFAULT_CONSERVATION_TOLERANCE,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> ActionResult<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ActionResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loaded action configuration from {:?}", path.as_ref());
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> ActionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ActionResult<()> {
        if let Some(sigma) = self.elastic_cross_section {
            if !(sigma.is_finite() && sigma >= 0.0) {
                return Err(ActionError::InvalidConfig(format!(
                    "elastic_cross_section must be a non-negative number, got {}",
                    sigma
                )));
            }
        }
        if !(self.low_weight_cutoff >= 0.0) {
            return Err(ActionError::InvalidConfig(format!(
                "low_weight_cutoff must be non-negative, got {}",
                self.low_weight_cutoff
            )));
        }
        if !(self.conservation_tolerance > 0.0) {
            return Err(ActionError::InvalidConfig(format!(
                "conservation_tolerance must be positive, got {}",
                self.conservation_tolerance
            )));
        }
        Ok(())
    }

    /// Sets the constant elastic cross section override.
    pub fn with_elastic_cross_section(mut self, sigma: f64) -> Self {
        self.elastic_cross_section = Some(sigma);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.elastic_cross_section, None);
        assert!(config.two_to_one);
        assert!(config.two_to_two);
        assert!(!config.anisotropic_nn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json_str(r#"{ "elastic_cross_section": 20.0, "two_to_two": false }"#)
            .unwrap();
        assert_eq!(config.elastic_cross_section, Some(20.0));
        assert!(!config.two_to_two);
        assert!(config.two_to_one);
        assert_eq!(config.low_weight_cutoff, 1e-6);
    }

    #[test]
    fn test_json_round_trip() {
        let config = Config::new().with_elastic_cross_section(12.5);
        let json = config.to_json_string().unwrap();
        assert_eq!(Config::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_negative_cross_section() {
        let err = Config::from_json_str(r#"{ "elastic_cross_section": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ActionError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = Config::from_json_str(r#"{ "elastic": 1.0 }"#).unwrap_err();
        assert!(matches!(err, ActionError::ConfigParse(_)));
    }
}

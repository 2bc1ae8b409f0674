use serde::{Deserialize, Serialize};

use crate::error::PlaygroundError;

/// Runtime configuration, usually read from `playground.toml`.
///
/// Every section and key is optional in the file; missing values take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Seed for the box layout. `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub window: WindowConfig,
    pub boxes: BoxConfig,
    pub physics: PhysicsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// sRGB clear color, channels in `[0, 1]`.
    pub background: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxConfig {
    pub count: usize,
    /// Half the side length of each square box, in world units.
    pub half_extent: f64,
    pub mass: f64,
    pub friction: f64,
    /// Velocity decay rate per second (rapier's linear and angular damping).
    pub damping: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: [f64; 2],
    /// Fixed simulation step in seconds.
    pub timestep: f64,
    /// Pick radius around the cursor, in world units.
    pub query_radius: f64,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            seed: None,
            window: WindowConfig::default(),
            boxes: BoxConfig::default(),
            physics: PhysicsConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            title: "Physics Playground".to_string(),
            // amazon green
            background: [0.231, 0.478, 0.341],
        }
    }
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            count: 64,
            half_extent: 16.0,
            mass: 2.0,
            friction: 0.75,
            // keeps 10% of velocity after one second: -ln(0.1)
            damping: 2.302_585,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 0.0],
            timestep: 1.0 / 60.0,
            query_radius: 1.0,
        }
    }
}

impl PlaygroundConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, PlaygroundError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), PlaygroundError> {
        let invalid = |msg: &str| Err(PlaygroundError::InvalidConfig(msg.to_string()));

        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window.width and window.height must be non-zero");
        }
        if !(self.boxes.half_extent > 0.0) {
            return invalid("boxes.half_extent must be positive");
        }
        if !(self.boxes.mass > 0.0) {
            return invalid("boxes.mass must be positive");
        }
        if self.boxes.friction < 0.0 || self.boxes.damping < 0.0 {
            return invalid("boxes.friction and boxes.damping must not be negative");
        }
        if !(self.physics.timestep > 0.0) || !self.physics.timestep.is_finite() {
            return invalid("physics.timestep must be finite and positive");
        }
        if !(self.physics.query_radius >= 0.0) {
            return invalid("physics.query_radius must not be negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo() {
        let config = PlaygroundConfig::default();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 1024);
        assert_eq!(config.boxes.count, 64);
        assert_eq!(config.physics.gravity, [0.0, 0.0]);
        assert_eq!(config.physics.query_radius, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = PlaygroundConfig::from_toml_str("").unwrap();
        assert_eq!(config, PlaygroundConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = PlaygroundConfig::from_toml_str(
            "seed = 7\n\n[boxes]\ncount = 10\n",
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.boxes.count, 10);
        assert_eq!(config.boxes.mass, 2.0);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = PlaygroundConfig::default();
        config.seed = Some(42);
        config.window.title = "Crates".to_string();
        let text = config.to_toml_string().unwrap();
        assert_eq!(PlaygroundConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_window() {
        let err = PlaygroundConfig::from_toml_str("[window]\nwidth = 0\n").unwrap_err();
        assert!(matches!(err, PlaygroundError::InvalidConfig(_)), "got {err:?}");
    }

    #[test]
    fn test_rejects_non_positive_timestep() {
        let err = PlaygroundConfig::from_toml_str("[physics]\ntimestep = 0.0\n").unwrap_err();
        assert!(matches!(err, PlaygroundError::InvalidConfig(_)), "got {err:?}");
    }

    #[test]
    fn test_reports_parse_errors() {
        let err = PlaygroundConfig::from_toml_str("[boxes]\ncount = \"many\"\n").unwrap_err();
        assert!(matches!(err, PlaygroundError::ConfigParse(_)), "got {err:?}");
    }
}

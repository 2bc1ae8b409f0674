use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaygroundError {
    /// Frame updates divide cursor deltas by the timestep, so it must be a
    /// finite positive number.
    #[error("timestep must be finite and positive, got {0}")]
    InvalidTimestep(f64),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

use thiserror::Error;

/// Rejection reasons for a body table or exhibit configuration.
/// Nothing is applied when one of these is returned.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("body table is empty")]
    EmptyTable,
    #[error("body with empty id")]
    EmptyId,
    #[error("duplicate body id '{0}'")]
    DuplicateId(String),
    #[error("expected exactly one stationary root body, found {0}")]
    AnchorCount(usize),
    #[error("body '{id}': {field} must be finite")]
    NonFinite { id: String, field: &'static str },
    #[error("body '{id}': size must be positive, got {size}")]
    InvalidSize { id: String, size: f32 },
    #[error("body '{id}': orbit radius must not be negative, got {radius}")]
    NegativeOrbitRadius { id: String, radius: f32 },
    #[error("body '{id}': eccentricity must be in [0, 1), got {eccentricity}")]
    InvalidEccentricity { id: String, eccentricity: f32 },
    #[error("body '{id}': ring inner radius {inner} must be below outer radius {outer}")]
    InvalidRing { id: String, inner: f32, outer: f32 },
    #[error("invalid setting {field}: {value}")]
    InvalidSetting { field: &'static str, value: f32 },
}

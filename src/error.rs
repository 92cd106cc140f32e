use thiserror::Error;

/// Failures surfaced by the autopilot and its collaborators.
///
/// Insufficient funds or hangar space are not errors; they come back as report values from
/// the operation that noticed them.
#[derive(Debug, Error)]
pub enum AutopilotError {
    /// Network failure or non-success status from the game or the demand feed.
    #[error("transport error: {0}")]
    Transport(String),
    /// A response was missing a field or carried a value the engine cannot use.
    #[error("data error: {0}")]
    Data(String),
    /// The game client could not establish a session. Fatal to the whole pass.
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AutopilotError {
    pub fn is_authentication(&self) -> bool {
        matches!(self, AutopilotError::Authentication(_))
    }
}

pub type Result<T> = std::result::Result<T, AutopilotError>;

//! Error types
//!
//! Scene errors are fatal configuration problems caught at construction.
//! Store errors are best-effort: callers log them and carry on.

use std::fmt;

/// Fatal scene configuration error
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Named obstacle template is not in the library
    MissingTemplate(String),
    /// A scroll layer has no tiles
    EmptyLayer(&'static str),
    /// Tile with a non-positive width
    InvalidTile { layer: &'static str, index: usize },
    /// Obstacle template with no goal region
    TemplateWithoutGoal(String),
    /// Tuning value outside its valid range
    InvalidTuning(&'static str),
    /// Layout or template JSON failed to parse
    Parse(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::MissingTemplate(name) => write!(f, "Missing obstacle template: {name}"),
            SceneError::EmptyLayer(layer) => write!(f, "Scroll layer '{layer}' has no tiles"),
            SceneError::InvalidTile { layer, index } => {
                write!(f, "Tile {index} in layer '{layer}' has a non-positive width")
            }
            SceneError::TemplateWithoutGoal(name) => {
                write!(f, "Obstacle template '{name}' has no goal region")
            }
            SceneError::InvalidTuning(field) => write!(f, "Invalid tuning value: {field}"),
            SceneError::Parse(msg) => write!(f, "Failed to parse scene data: {msg}"),
        }
    }
}

impl std::error::Error for SceneError {}

/// Key-value store failure
#[derive(Debug)]
pub enum StoreError {
    /// Backing storage not reachable (no window, storage disabled, ...)
    Unavailable,
    /// Underlying I/O failure
    Io(std::io::Error),
    /// Stored data could not be decoded
    Corrupt(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "Store unavailable"),
            StoreError::Io(e) => write!(f, "Store I/O error: {e}"),
            StoreError::Corrupt(msg) => write!(f, "Store data corrupt: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Corrupt(e.to_string())
    }
}

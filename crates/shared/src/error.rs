use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced to the render boundary. Routing failures never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    PermissionDenied,
    SensorUnavailable,
}

impl ErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::PermissionDenied => "permission denied",
            ErrorKind::SensorUnavailable => "sensor unavailable",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    #[error("location provider unavailable: {0}")]
    Unavailable(String),
    #[error("no position fix: {0}")]
    NoFix(String),
    #[error("sensor reported invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

//! Crate-level error types.

use std::fmt;

use crate::framing::FramingState;

/// Errors produced by the autoframe crate.
#[derive(Debug)]
pub enum FramingError {
    /// A framing move was requested without a camera.
    MissingCamera,
    /// No target with a usable bounding volume was supplied.
    NoTargets,
    /// A framing move is already moving or paused.
    AlreadyActive(FramingState),
    /// The named target has no world-space extent.
    NoExtent(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for FramingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCamera => write!(f, "framing needs a camera to work"),
            Self::NoTargets => write!(f, "framing needs targets to focus"),
            Self::AlreadyActive(state) => {
                write!(f, "camera already framing (state: {state:?})")
            }
            Self::NoExtent(label) => {
                write!(f, "target '{label}' has no world-space extent")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for FramingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FramingError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

//! Crate-level error types.
//!
//! Every failure is a load-time or startup-time failure; nothing in the
//! per-frame path returns an error.

use std::fmt;

use crate::renderer::FontRole;

/// Config or roster could not be loaded. The host must not enter its render loop.
#[derive(Debug)]
pub enum LoadError {
    /// Config file could not be read.
    Io(std::io::Error),
    /// Config is not valid JSON or a field is missing / has the wrong type.
    Parse(serde_json::Error),
    /// Config parsed but holds a value the scoreboard cannot lay out.
    Invalid(String),
    /// An athlete disappeared between the before and after snapshots.
    MissingAthlete(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(e) => write!(f, "config parse error: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
            Self::MissingAthlete(name) => {
                write!(f, "athlete '{name}' missing from projected standings")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Text resources could not be prepared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The host could not resolve the font for a role.
    FontUnavailable { role: FontRole, font: String },
    /// A label the layout depends on has no measurable extent.
    Unmeasurable { role: FontRole, text: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontUnavailable { role, font } => {
                write!(f, "failed to load {role:?} font '{font}'")
            }
            Self::Unmeasurable { role, text } => {
                write!(f, "could not measure '{text}' with the {role:?} font")
            }
        }
    }
}

impl std::error::Error for AssetError {}

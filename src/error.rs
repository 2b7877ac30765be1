//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::model::{MAX_LENGTH, MIN_LENGTH, TWIST_MAX, TWIST_MIN};

/// Errors produced by the helixlab crate.
#[derive(Debug)]
pub enum HelixError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Sequence length outside the supported `[6, 60]` range.
    LengthOutOfRange(usize),
    /// Twist angle outside the supported `[30, 36]` degree range.
    TwistOutOfRange(f32),
}

impl fmt::Display for HelixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::LengthOutOfRange(n) => write!(
                f,
                "sequence length {n} outside [{MIN_LENGTH}, {MAX_LENGTH}]"
            ),
            Self::TwistOutOfRange(t) => write!(
                f,
                "twist angle {t} outside [{TWIST_MIN}, {TWIST_MAX}] degrees"
            ),
        }
    }
}

impl std::error::Error for HelixError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for HelixError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for HelixError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

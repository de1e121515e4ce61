use std::path::PathBuf;

use thiserror::Error;

use crate::theme::Role;

/// Everything that can go wrong between an image on disk and a finished palette.
#[derive(Debug, Error)]
pub enum PaletteError {
    /// The image could not be read or decoded. Never retried.
    #[error("{reason}: {}", .path.display())]
    ImageLoad { path: PathBuf, reason: String },

    /// The sampler produced fewer colors than the deriver needs.
    #[error("insufficient samples: need at least 3 colors, got {found}")]
    InsufficientSamples { found: usize },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("unknown palette role: {0:?}")]
    UnknownRole(String),

    /// Malformed key/value palette text.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Key/value palette text that never assigns one of the roles.
    #[error("missing role `{0}`")]
    MissingRole(Role),
}

pub type Result<T, E = PaletteError> = std::result::Result<T, E>;

//! Error type shared by the grid engine, its services and the file layer.

use thiserror::Error;

/// Failures raised while describing or enumerating a grid.
///
/// `MissingInput` and `DegenerateGrid` mean "nothing to draw" and are absorbed
/// by the engine into an empty point set. `Projection` is fatal to the current
/// render pass and is always propagated to the caller.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("missing grid input: {0}")]
    MissingInput(&'static str),

    #[error("degenerate grid: {0}")]
    DegenerateGrid(&'static str),

    #[error("projection error: {0}")]
    Projection(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid grid options: {0}")]
    Json(#[from] serde_json::Error),
}

impl GridError {
    /// Returns `true` when the error must abort the current render pass.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, GridError::MissingInput(_) | GridError::DegenerateGrid(_))
    }
}

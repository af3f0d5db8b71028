// error.rs - Error taxonomy for maze construction, solving and replay

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MazeError {
    #[error("Invalid maze dimensions: {width}x{height} (both must be at least 1)")]
    InvalidDimension { width: i64, height: i64 },

    #[error("Coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("Maze has already been solved; reset the solution first")]
    AlreadySolved,

    #[error("Maze has not been solved yet")]
    NotYetSolved,

    #[error("Path sequence for this solve was already consumed")]
    ReplayConsumed,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MazeError>;

impl MazeError {
    /// Sequencing misuse that a caller can recover from by resetting state.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MazeError::AlreadySolved | MazeError::NotYetSolved | MazeError::ReplayConsumed
        )
    }
}

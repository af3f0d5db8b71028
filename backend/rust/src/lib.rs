// lib.rs - Perfect-maze generation and depth-first solving on a square grid
//
// Typical flow: `new_maze` carves a grid, `MazeState::solve` searches it,
// and `MazeState::path_sequence` hands the route to a renderer one cell at
// a time.

pub mod direction;
pub mod error;
pub mod generator;
pub mod grid;
pub mod maze;
pub mod replay;
pub mod snapshot;
pub mod solver;

// Re-export commonly used types
pub use direction::{Coord, Direction, Passages, DIRECTIONS};
pub use error::{MazeError, Result};
pub use generator::{generate, GenerationStats};
pub use grid::{Dimensions, Grid};
pub use maze::{new_maze, MazeState};
pub use replay::{CancelToken, PathRecord, PathSequence, Trail};
pub use snapshot::MazeSnapshot;
pub use solver::{solve, SolveResult, VisitRecord};

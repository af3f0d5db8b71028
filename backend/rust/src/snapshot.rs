// snapshot.rs - Serializable view of a maze for external renderers

use crate::direction::Coord;
use crate::error::Result;
use crate::maze::MazeState;
use crate::replay::Trail;
use serde::{Deserialize, Serialize};

/// Everything a renderer needs to draw one frame of a maze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeSnapshot {
    pub width: i32,
    pub height: i32,
    pub start: Coord,
    pub goal: Coord,
    /// Passage bits per cell, one inner vector per row.
    pub cells: Vec<Vec<u8>>,
    /// `None` until the maze has been solved.
    pub solved: Option<bool>,
    /// Solved route from start to goal; empty before solving.
    pub path: Vec<Coord>,
    /// Cells the replay has produced so far.
    pub revealed: Vec<Coord>,
}

impl MazeSnapshot {
    pub(crate) fn capture(maze: &MazeState) -> Self {
        let dims = maze.dimensions();
        let bits = maze.grid().to_bits();
        let cells = bits
            .chunks(dims.width as usize)
            .map(<[u8]>::to_vec)
            .collect();
        let path = match maze.is_solved() {
            Some(_) => Trail::new(maze.visits(), maze.start(), maze.goal()).collect(),
            None => Vec::new(),
        };
        let revealed = dims.coords().filter(|&c| maze.marked(c)).collect();

        Self {
            width: dims.width,
            height: dims.height,
            start: maze.start(),
            goal: maze.goal(),
            cells,
            solved: maze.is_solved(),
            path,
            revealed,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

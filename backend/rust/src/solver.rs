// solver.rs - Depth-first path search over carved passages
//
// Directions are tried in the fixed order N, E, S, W. Whenever the search
// leaves a cell it records the direction of travel in that cell's visit
// mask; the search stops as soon as the goal is entered. On a perfect maze
// the first route found is the only one.

use crate::direction::{Coord, Direction, Passages, DIRECTIONS};
use crate::error::{MazeError, Result};
use crate::grid::{Dimensions, Grid};
use log::debug;
use serde::{Deserialize, Serialize};

/// Per-cell record of the outgoing moves the solver made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitRecord {
    dims: Dimensions,
    moves: Vec<Passages>,
}

impl VisitRecord {
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            moves: vec![Passages::NONE; dims.cell_count()],
        }
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn get(&self, x: i32, y: i32) -> Result<Passages> {
        let idx = self.dims.checked_index(Coord::new(x, y))?;
        Ok(self.moves[idx])
    }

    #[inline]
    pub(crate) fn at(&self, c: Coord) -> Passages {
        self.dims.index(c).map_or(Passages::NONE, |i| self.moves[i])
    }

    /// Marks that the solver left `c` heading `direction`.
    pub fn record(&mut self, c: Coord, direction: Direction) -> Result<()> {
        let idx = self.dims.checked_index(c)?;
        self.moves[idx].insert(direction);
        Ok(())
    }

    /// The move replay follows out of `c`: the last one the solver made there.
    #[inline]
    pub fn outgoing(&self, c: Coord) -> Option<Direction> {
        self.at(c).latest()
    }

    pub fn is_blank(&self) -> bool {
        self.moves.iter().all(|m| m.is_empty())
    }

    pub fn clear(&mut self) {
        self.moves.fill(Passages::NONE);
    }

    /// Total outgoing moves recorded across all cells.
    pub fn move_count(&self) -> usize {
        self.moves.iter().map(|m| m.count() as usize).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    pub solved: bool,
    /// Outgoing moves recorded, dead-end branches included.
    pub moves: usize,
}

struct SolveFrame {
    cell: Coord,
    next: usize,
}

/// Searches `grid` from `start` to `goal`, filling `visits`.
///
/// `visits` must be blank; a record left over from an earlier search yields
/// [`MazeError::AlreadySolved`]. When `start == goal` the search succeeds
/// without moving.
pub fn solve(
    grid: &Grid,
    visits: &mut VisitRecord,
    start: Coord,
    goal: Coord,
) -> Result<SolveResult> {
    let dims = grid.dimensions();
    debug_assert_eq!(dims, visits.dimensions(), "visit record must match the grid");
    dims.checked_index(start)?;
    dims.checked_index(goal)?;
    if !visits.is_blank() {
        return Err(MazeError::AlreadySolved);
    }

    if start == goal {
        debug!("Start {start} is the goal; nothing to search");
        return Ok(SolveResult {
            solved: true,
            moves: 0,
        });
    }

    let mut stack = vec![SolveFrame {
        cell: start,
        next: 0,
    }];
    let mut solved = false;

    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = DIRECTIONS.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let cell = frame.cell;

        let Some(next) = grid.neighbor(cell, direction) else {
            continue;
        };
        if !visits.at(next).is_empty() || !grid.at(cell).contains(direction) {
            continue;
        }

        visits.record(cell, direction)?;
        if next == goal {
            solved = true;
            break;
        }
        stack.push(SolveFrame {
            cell: next,
            next: 0,
        });
    }

    let result = SolveResult {
        solved,
        moves: visits.move_count(),
    };
    debug!(
        "Search {} -> {} finished: solved={}, {} moves recorded",
        start, goal, result.solved, result.moves
    );
    Ok(result)
}

// generator.rs - Randomized recursive-backtracker maze carving
//
// The recursion is unrolled onto an explicit stack so that grids whose
// carving depth approaches width * height cannot overflow the call stack.
// Each frame keeps its own shuffled direction order and a cursor into it,
// which reproduces the visiting order of the recursive formulation exactly.

use crate::direction::{Coord, Direction, DIRECTIONS};
use crate::error::{MazeError, Result};
use crate::grid::Grid;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Summary of one carving run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    pub cells: usize,
    pub passages: usize,
    /// Deepest stack reached; equals the longest carved corridor in cells.
    pub max_depth: usize,
}

struct Frame {
    cell: Coord,
    order: [Direction; 4],
    next: usize,
}

impl Frame {
    fn new<R: Rng + ?Sized>(cell: Coord, rng: &mut R) -> Self {
        let mut order = DIRECTIONS;
        order.shuffle(rng);
        Self { cell, order, next: 0 }
    }
}

/// Carves a perfect maze into a blank `grid`, starting at `start`.
///
/// On return every cell is reachable from `start` and the grid holds exactly
/// `width * height - 1` passages. The only source of variation is `rng`; a
/// seeded generator yields the same maze every time.
pub fn generate<R: Rng + ?Sized>(
    grid: &mut Grid,
    start: Coord,
    rng: &mut R,
) -> Result<GenerationStats> {
    if !grid.dimensions().contains(start) {
        return Err(MazeError::OutOfBounds {
            x: start.x,
            y: start.y,
            width: grid.width(),
            height: grid.height(),
        });
    }
    debug_assert!(grid.is_blank(), "generate expects a grid with no passages");

    let mut stack = vec![Frame::new(start, rng)];
    let mut max_depth = 1;

    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = frame.order.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let cell = frame.cell;

        let Some(next) = grid.neighbor(cell, direction) else {
            continue;
        };
        if !grid.at(next).is_empty() {
            continue;
        }

        grid.carve(cell.x, cell.y, direction)?;
        stack.push(Frame::new(next, rng));
        max_depth = max_depth.max(stack.len());
    }

    let stats = GenerationStats {
        cells: grid.dimensions().cell_count(),
        passages: grid.passage_count(),
        max_depth,
    };
    debug!(
        "Carved {}x{} maze: {} passages, max depth {}",
        grid.width(),
        grid.height(),
        stats.passages,
        stats.max_depth
    );
    Ok(stats)
}

// grid.rs - Rectangular cell grid with per-cell passage bitmasks

use crate::direction::{Coord, Direction, Passages, DIRECTIONS};
use crate::error::{MazeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width and height of a grid, shared by every per-cell layer of a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: i32,
    pub height: i32,
}

impl Dimensions {
    /// Validates that both sides are at least 1 and the cell count fits in memory indices.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let invalid = || MazeError::InvalidDimension {
            width: width as i64,
            height: height as i64,
        };
        if width < 1 || height < 1 {
            return Err(invalid());
        }
        (width as usize)
            .checked_mul(height as usize)
            .filter(|&n| n <= isize::MAX as usize)
            .ok_or_else(invalid)?;
        Ok(Self { width, height })
    }

    #[inline]
    pub fn cell_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn in_bounds(self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        self.in_bounds(c.x, c.y)
    }

    /// Row-major index of an in-bounds coordinate.
    #[inline]
    pub fn index(self, c: Coord) -> Option<usize> {
        self.contains(c)
            .then(|| c.y as usize * self.width as usize + c.x as usize)
    }

    pub(crate) fn checked_index(self, c: Coord) -> Result<usize> {
        self.index(c).ok_or(MazeError::OutOfBounds {
            x: c.x,
            y: c.y,
            width: self.width,
            height: self.height,
        })
    }

    /// Top-left cell, where generation and solving begin.
    #[inline]
    pub const fn start(self) -> Coord {
        Coord::new(0, 0)
    }

    /// Bottom-right cell, the solver's target.
    #[inline]
    pub const fn goal(self) -> Coord {
        Coord::new(self.width - 1, self.height - 1)
    }

    /// All coordinates in row-major order.
    pub fn coords(self) -> impl Iterator<Item = Coord> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coord::new(x, y)))
    }
}

/// The maze itself: one passage mask per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<Passages>,
}

impl Grid {
    /// A grid of `width` x `height` cells with every wall standing.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let dims = Dimensions::new(width, height)?;
        Ok(Self {
            dims,
            cells: vec![Passages::NONE; dims.cell_count()],
        })
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.dims.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.dims.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.dims.in_bounds(x, y)
    }

    pub fn get(&self, x: i32, y: i32) -> Result<Passages> {
        let idx = self.dims.checked_index(Coord::new(x, y))?;
        Ok(self.cells[idx])
    }

    /// Reads a cell the caller has already bounds-checked.
    #[inline]
    pub(crate) fn at(&self, c: Coord) -> Passages {
        self.dims.index(c).map_or(Passages::NONE, |i| self.cells[i])
    }

    /// Opens one side of a single cell. The neighbor is left untouched, so
    /// callers that want a consistent maze should use [`Grid::carve`].
    pub fn set_passage(&mut self, x: i32, y: i32, direction: Direction) -> Result<()> {
        let idx = self.dims.checked_index(Coord::new(x, y))?;
        self.cells[idx].insert(direction);
        Ok(())
    }

    /// Opens the passage between `(x, y)` and its neighbor in `direction`,
    /// setting the matching bit on both cells.
    pub fn carve(&mut self, x: i32, y: i32, direction: Direction) -> Result<Coord> {
        let from = Coord::new(x, y);
        let to = from.step(direction);
        let a = self.dims.checked_index(from)?;
        let b = self.dims.checked_index(to)?;
        self.cells[a].insert(direction);
        self.cells[b].insert(direction.opposite());
        Ok(to)
    }

    /// In-bounds neighbor of `c` in `direction`, if any.
    #[inline]
    pub fn neighbor(&self, c: Coord, direction: Direction) -> Option<Coord> {
        let n = c.step(direction);
        self.dims.contains(n).then_some(n)
    }

    /// Number of undirected passages (each carve opens one).
    pub fn passage_count(&self) -> usize {
        let half_edges: usize = self.cells.iter().map(|p| p.count() as usize).sum();
        half_edges / 2
    }

    /// True when every cell still has all four walls.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|p| p.is_empty())
    }

    /// True when every open side is matched by the neighbor's opposite side
    /// and no passage leads off the grid.
    pub fn is_consistent(&self) -> bool {
        self.dims.coords().all(|c| {
            let here = self.at(c);
            DIRECTIONS.iter().all(|&d| {
                if !here.contains(d) {
                    return true;
                }
                match self.neighbor(c, d) {
                    Some(n) => self.at(n).contains(d.opposite()),
                    None => false,
                }
            })
        })
    }

    /// Raw passage bits in row-major order.
    pub fn to_bits(&self) -> Vec<u8> {
        self.cells.iter().map(|p| p.bits()).collect()
    }
}

/// ASCII dump: underscores for south walls, pipes for east walls.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " {}", "_".repeat(self.width() as usize * 2))?;
        for y in 0..self.height() {
            f.write_str("|")?;
            for x in 0..self.width() {
                let c = Coord::new(x, y);
                let cell = self.at(c);
                f.write_str(if cell.contains(Direction::South) { " " } else { "_" })?;
                if cell.contains(Direction::East) {
                    let east = self.at(c.step(Direction::East));
                    let open_below =
                        cell.contains(Direction::South) || east.contains(Direction::South);
                    f.write_str(if open_below { " " } else { "_" })?;
                } else {
                    f.write_str("|")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

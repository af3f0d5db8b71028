// direction.rs - Compass directions, passage bitmasks and grid coordinates
//
// y grows downward, so North is (0, -1).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four orthogonal directions a passage can open toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

/// Fixed exploration order shared by the generator (before shuffling) and the solver.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Direction::North => 0b0001,
            Direction::South => 0b0010,
            Direction::East => 0b0100,
            Direction::West => 0b1000,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Unit step `(dx, dy)` for this direction.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Arrow glyph for path rendering.
    pub const fn arrow(self) -> char {
        match self {
            Direction::North => '^',
            Direction::South => 'v',
            Direction::East => '>',
            Direction::West => '<',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// 4-bit set of open passages (or, in a visit record, outgoing moves) for one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Passages(u8);

impl Passages {
    pub const NONE: Passages = Passages(0);
    pub const ALL: Passages = Passages(0b1111);

    /// Builds a set from raw bits; anything above the low nibble is dropped.
    #[inline]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Passages(bits & 0b1111)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    #[inline]
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Directions present in the set, in N, E, S, W order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        DIRECTIONS.into_iter().filter(move |d| self.contains(*d))
    }

    /// The last direction present in N, E, S, W order.
    ///
    /// The solver tries directions in that order and stops once the goal is
    /// reached, so for a cell on the solved path this is the move that led on.
    pub fn latest(self) -> Option<Direction> {
        DIRECTIONS.into_iter().rev().find(|d| self.contains(*d))
    }
}

impl From<Direction> for Passages {
    fn from(direction: Direction) -> Self {
        Passages(direction.bit())
    }
}

impl std::ops::BitOr<Direction> for Passages {
    type Output = Passages;
    fn bitor(self, direction: Direction) -> Passages {
        Passages(self.0 | direction.bit())
    }
}

/// Integer cell coordinate; x grows east, y grows south.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate one step away; may be out of any grid's bounds.
    #[inline]
    pub const fn step(self, direction: Direction) -> Coord {
        let (dx, dy) = direction.delta();
        Coord::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Coord::new(x, y)
    }
}

impl From<Coord> for (i32, i32) {
    fn from(c: Coord) -> (i32, i32) {
        (c.x, c.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

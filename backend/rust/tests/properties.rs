//! Property-based tests for generated mazes and their solutions.
//!
//! Every maze the generator produces must be a spanning tree over the grid,
//! and the solver must always find the unique route from corner to corner.

use backtrack_maze::{Coord, Direction, MazeState, DIRECTIONS};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded(width: i32, height: i32, seed: u64) -> MazeState {
    MazeState::with_rng(width, height, &mut StdRng::seed_from_u64(seed)).unwrap()
}

/// Minimal union-find over row-major cell indices.
struct Components {
    parent: Vec<usize>,
}

impl Components {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    /// Returns false when `a` and `b` were already joined (the edge closes a cycle).
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        self.parent[ra] = rb;
        true
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Exactly cells - 1 passages, no cycles, one connected component.
    #[test]
    fn prop_generated_maze_is_spanning_tree(w in 1i32..24, h in 1i32..24, seed in any::<u64>()) {
        let maze = seeded(w, h, seed);
        let dims = maze.dimensions();
        let cells = dims.cell_count();
        prop_assert_eq!(maze.grid().passage_count(), cells - 1);

        let mut components = Components::new(cells);
        for c in dims.coords() {
            // Only East and South so each passage is counted once.
            for d in [Direction::East, Direction::South] {
                if maze.cell_passages(c.x, c.y).unwrap().contains(d) {
                    let n = c.step(d);
                    let joined = components.union(dims.index(c).unwrap(), dims.index(n).unwrap());
                    prop_assert!(joined, "passage {} -> {} closes a cycle", c, n);
                }
            }
        }
        let root = components.find(0);
        for i in 0..cells {
            prop_assert_eq!(components.find(i), root);
        }
    }

    /// Every open side is mirrored by the neighbor and never leads off the grid.
    #[test]
    fn prop_passages_are_symmetric(w in 1i32..24, h in 1i32..24, seed in any::<u64>()) {
        let maze = seeded(w, h, seed);
        for c in maze.dimensions().coords() {
            let here = maze.cell_passages(c.x, c.y).unwrap();
            for d in DIRECTIONS {
                if here.contains(d) {
                    let n = c.step(d);
                    let there = maze.cell_passages(n.x, n.y);
                    prop_assert!(there.is_ok(), "passage {} from {} leaves the grid", d, c);
                    prop_assert!(there.unwrap().contains(d.opposite()));
                }
            }
        }
    }

    /// The solver succeeds and replay walks open passages from start to goal.
    #[test]
    fn prop_replayed_path_is_walkable(w in 1i32..24, h in 1i32..24, seed in any::<u64>()) {
        let mut maze = seeded(w, h, seed);
        prop_assert!(maze.solve().unwrap().solved);

        let start = maze.start();
        let goal = maze.goal();
        let mut seq = maze.path_sequence().unwrap();
        let path: Vec<Coord> = seq.by_ref().collect();
        prop_assert!(seq.reached_goal());
        drop(seq);

        prop_assert_eq!(path.first().copied(), Some(start));
        prop_assert_eq!(path.last().copied(), Some(goal));
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let d = DIRECTIONS.into_iter().find(|&d| a.step(d) == b);
            prop_assert!(d.is_some(), "{} and {} are not adjacent", a, b);
            prop_assert!(maze.cell_passages(a.x, a.y).unwrap().contains(d.unwrap()));
        }
        for c in &path {
            prop_assert!(maze.on_path(c.x, c.y).unwrap());
        }
        prop_assert_eq!(maze.path_record().marked_count(), path.len());
    }

    /// Same seed, same maze.
    #[test]
    fn prop_seeded_generation_is_deterministic(w in 1i32..16, h in 1i32..16, seed in any::<u64>()) {
        prop_assert_eq!(seeded(w, h, seed).grid().to_bits(), seeded(w, h, seed).grid().to_bits());
    }
}

#[test]
fn test_five_by_five_same_seed_byte_identical() {
    let a = seeded(5, 5, 2024);
    let b = seeded(5, 5, 2024);
    assert_eq!(a.grid().to_bits(), b.grid().to_bits());
    assert_eq!(a.grid().to_string(), b.grid().to_string());
}

#[test]
fn test_spiral_sized_grid_solves() {
    let mut maze = seeded(300, 300, 1);
    assert_eq!(maze.grid().passage_count(), 300 * 300 - 1);
    assert!(maze.solve().unwrap().solved);
    let path = maze.solution().unwrap();
    assert_eq!(path.last(), Some(&Coord::new(299, 299)));
}

// maze.rs - One maze instance: grid, visit record and path record as a unit

use crate::direction::{Coord, Direction, Passages};
use crate::error::{MazeError, Result};
use crate::generator::{self, GenerationStats};
use crate::grid::{Dimensions, Grid};
use crate::replay::{PathRecord, PathSequence, Trail};
use crate::snapshot::MazeSnapshot;
use crate::solver::{self, SolveResult, VisitRecord};
use log::info;
use rand::Rng;

/// A generated maze together with its solve and replay state.
///
/// Start is always the top-left cell and Goal the bottom-right one. The
/// three per-cell layers are created together and replaced together; no
/// method swaps one without the others.
#[derive(Debug, Clone)]
pub struct MazeState {
    grid: Grid,
    visits: VisitRecord,
    path: PathRecord,
    start: Coord,
    goal: Coord,
    stats: GenerationStats,
    solve: Option<SolveResult>,
    replay_started: bool,
}

/// Allocates and carves a fresh maze using OS entropy.
pub fn new_maze(width: i32, height: i32) -> Result<MazeState> {
    MazeState::new(width, height)
}

impl MazeState {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::with_rng(width, height, &mut rand::thread_rng())
    }

    /// Carves a maze drawing every random choice from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(width: i32, height: i32, rng: &mut R) -> Result<Self> {
        let mut grid = Grid::new(width, height)?;
        let dims = grid.dimensions();
        let start = dims.start();
        let stats = generator::generate(&mut grid, start, rng)?;
        info!(
            "Generated {}x{} maze with {} passages",
            width, height, stats.passages
        );
        Ok(Self {
            grid,
            visits: VisitRecord::new(dims),
            path: PathRecord::new(dims),
            start,
            goal: dims.goal(),
            stats,
            solve: None,
            replay_started: false,
        })
    }

    /// Discards this maze and carves a new one of the same size.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.resize(self.width(), self.height(), rng)
    }

    /// Discards this maze and carves a new one of the given size.
    ///
    /// On error the current maze is left untouched.
    pub fn resize<R: Rng + ?Sized>(&mut self, width: i32, height: i32, rng: &mut R) -> Result<()> {
        *self = Self::with_rng(width, height, rng)?;
        Ok(())
    }

    /// Runs the solver once. A second call without [`MazeState::reset_solution`]
    /// fails with [`MazeError::AlreadySolved`].
    pub fn solve(&mut self) -> Result<SolveResult> {
        if self.solve.is_some() {
            return Err(MazeError::AlreadySolved);
        }
        let result = solver::solve(&self.grid, &mut self.visits, self.start, self.goal)?;
        self.solve = Some(result);
        Ok(result)
    }

    /// Clears the visit and path records so the maze can be solved again.
    pub fn reset_solution(&mut self) {
        self.visits.clear();
        self.path.clear();
        self.solve = None;
        self.replay_started = false;
    }

    /// The start-to-goal coordinate sequence for the current solve.
    ///
    /// Available once per solve; each produced coordinate is marked in the
    /// path record as it is produced.
    pub fn path_sequence(&mut self) -> Result<PathSequence<'_>> {
        self.path_sequence_with_grid().map(|(_, sequence)| sequence)
    }

    /// Same as [`MazeState::path_sequence`], also lending the grid so walls
    /// can be drawn between steps while the sequence is alive.
    pub fn path_sequence_with_grid(&mut self) -> Result<(&Grid, PathSequence<'_>)> {
        if self.solve.is_none() {
            return Err(MazeError::NotYetSolved);
        }
        if self.replay_started {
            return Err(MazeError::ReplayConsumed);
        }
        self.replay_started = true;
        let sequence = PathSequence::new(&self.visits, &mut self.path, self.start, self.goal);
        Ok((&self.grid, sequence))
    }

    /// Full solved route without touching the path record.
    pub fn solution(&self) -> Result<Vec<Coord>> {
        match self.solve {
            None => Err(MazeError::NotYetSolved),
            Some(_) => Ok(Trail::new(&self.visits, self.start, self.goal).collect()),
        }
    }

    /// Open sides of one cell, for wall drawing.
    pub fn cell_passages(&self, x: i32, y: i32) -> Result<Passages> {
        self.grid.get(x, y)
    }

    /// Whether replay has reached this cell yet.
    pub fn on_path(&self, x: i32, y: i32) -> Result<bool> {
        self.path.is_marked(x, y)
    }

    /// Direction the path leaves this cell in, for arrow rendering.
    pub fn path_direction(&self, x: i32, y: i32) -> Result<Option<Direction>> {
        self.visits.get(x, y).map(Passages::latest)
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn visits(&self) -> &VisitRecord {
        &self.visits
    }

    pub fn path_record(&self) -> &PathRecord {
        &self.path
    }

    pub fn generation_stats(&self) -> GenerationStats {
        self.stats
    }

    /// `None` before solving, otherwise whether the goal was found.
    pub fn is_solved(&self) -> Option<bool> {
        self.solve.map(|r| r.solved)
    }

    pub(crate) fn marked(&self, c: Coord) -> bool {
        self.path.contains(c)
    }

    pub fn snapshot(&self) -> MazeSnapshot {
        MazeSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(w: i32, h: i32, seed: u64) -> MazeState {
        MazeState::with_rng(w, h, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_new_maze_rejects_bad_dimensions() {
        assert!(matches!(new_maze(0, 3), Err(MazeError::InvalidDimension { .. })));
        assert!(matches!(new_maze(3, -1), Err(MazeError::InvalidDimension { .. })));
    }

    #[test]
    fn test_single_cell_maze() {
        let mut maze = new_maze(1, 1).unwrap();
        assert_eq!(maze.start(), maze.goal());
        assert_eq!(maze.cell_passages(0, 0).unwrap(), Passages::NONE);

        let result = maze.solve().unwrap();
        assert!(result.solved);
        let path: Vec<_> = maze.path_sequence().unwrap().collect();
        assert_eq!(path, vec![Coord::new(0, 0)]);
        assert!(maze.on_path(0, 0).unwrap());
    }

    #[test]
    fn test_two_cell_maze() {
        let mut maze = new_maze(2, 1).unwrap();
        assert_eq!(maze.grid().passage_count(), 1);
        assert!(maze.cell_passages(0, 0).unwrap().contains(Direction::East));
        assert!(maze.cell_passages(1, 0).unwrap().contains(Direction::West));

        assert!(maze.solve().unwrap().solved);
        let path: Vec<_> = maze.path_sequence().unwrap().collect();
        assert_eq!(path, vec![Coord::new(0, 0), Coord::new(1, 0)]);
    }

    #[test]
    fn test_sequencing_errors() {
        let mut maze = seeded(4, 4, 11);
        assert!(matches!(maze.path_sequence(), Err(MazeError::NotYetSolved)));
        assert!(matches!(maze.solution(), Err(MazeError::NotYetSolved)));

        maze.solve().unwrap();
        assert!(matches!(maze.solve(), Err(MazeError::AlreadySolved)));

        let _ = maze.path_sequence().unwrap().count();
        assert!(matches!(maze.path_sequence(), Err(MazeError::ReplayConsumed)));

        maze.reset_solution();
        assert_eq!(maze.is_solved(), None);
        assert_eq!(maze.path_record().marked_count(), 0);
        assert!(maze.solve().unwrap().solved);
        assert!(maze.path_sequence().is_ok());
    }

    #[test]
    fn test_path_sequence_matches_solution() {
        let mut maze = seeded(8, 6, 21);
        maze.solve().unwrap();
        let expected = maze.solution().unwrap();
        let mut seq = maze.path_sequence().unwrap();
        let produced: Vec<_> = seq.by_ref().collect();
        assert!(seq.reached_goal());
        assert_eq!(produced, expected);
        assert_eq!(produced.first(), Some(&Coord::new(0, 0)));
        assert_eq!(produced.last(), Some(&Coord::new(7, 5)));
        assert_eq!(maze.path_record().marked_count(), produced.len());
    }

    #[test]
    fn test_grid_lent_alongside_sequence() {
        let mut maze = seeded(4, 4, 3);
        maze.solve().unwrap();
        let (grid, mut seq) = maze.path_sequence_with_grid().unwrap();
        let first = seq.next().unwrap();
        let second = seq.next().unwrap();
        let dir = seq.path_direction(first).unwrap();
        assert_eq!(first.step(dir), second);
        assert!(grid.get(first.x, first.y).unwrap().contains(dir));
        assert!(seq.is_revealed(second));
    }

    #[test]
    fn test_cell_passages_out_of_bounds() {
        let maze = seeded(3, 3, 1);
        assert!(matches!(maze.cell_passages(3, 1), Err(MazeError::OutOfBounds { .. })));
        assert!(matches!(maze.cell_passages(0, -1), Err(MazeError::OutOfBounds { .. })));
    }

    #[test]
    fn test_cell_passages_idempotent() {
        let maze = seeded(5, 5, 8);
        for c in maze.dimensions().coords() {
            let first = maze.cell_passages(c.x, c.y).unwrap();
            assert_eq!(maze.cell_passages(c.x, c.y).unwrap(), first);
        }
    }

    #[test]
    fn test_regenerate_replaces_everything() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut maze = MazeState::with_rng(6, 6, &mut rng).unwrap();
        maze.solve().unwrap();
        let _ = maze.path_sequence().unwrap().count();

        maze.regenerate(&mut rng).unwrap();
        assert_eq!(maze.is_solved(), None);
        assert!(maze.visits().is_blank());
        assert_eq!(maze.path_record().marked_count(), 0);
        assert_eq!(maze.grid().passage_count(), 35);
    }

    #[test]
    fn test_resize_rederives_goal() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut maze = MazeState::with_rng(3, 3, &mut rng).unwrap();
        maze.resize(7, 4, &mut rng).unwrap();
        assert_eq!(maze.goal(), Coord::new(6, 3));

        assert!(maze.resize(0, 4, &mut rng).is_err());
        assert_eq!((maze.width(), maze.height()), (7, 4));
    }

    #[test]
    fn test_path_direction_on_route() {
        let mut maze = seeded(5, 5, 13);
        maze.solve().unwrap();
        let route = maze.solution().unwrap();
        for pair in route.windows(2) {
            let dir = maze.path_direction(pair[0].x, pair[0].y).unwrap().unwrap();
            assert_eq!(pair[0].step(dir), pair[1]);
        }
    }

    #[test]
    fn test_seeded_mazes_identical() {
        assert_eq!(seeded(5, 5, 77).grid().to_bits(), seeded(5, 5, 77).grid().to_bits());
    }
}

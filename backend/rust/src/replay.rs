// replay.rs - Step-by-step reconstruction of the solved path
//
// Replay reads the visit record from the start cell, follows the recorded
// outgoing move of each cell, and stops at the goal. Pacing is left to the
// consumer: nothing here sleeps or schedules.

use crate::direction::{Coord, Direction};
use crate::error::Result;
use crate::grid::Dimensions;
use crate::solver::VisitRecord;
use log::{debug, trace, warn};
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Per-cell flag for cells the replay has already produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecord {
    dims: Dimensions,
    marks: Vec<bool>,
}

impl PathRecord {
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            marks: vec![false; dims.cell_count()],
        }
    }

    pub fn is_marked(&self, x: i32, y: i32) -> Result<bool> {
        let idx = self.dims.checked_index(Coord::new(x, y))?;
        Ok(self.marks[idx])
    }

    #[inline]
    pub(crate) fn contains(&self, c: Coord) -> bool {
        self.dims.index(c).is_some_and(|i| self.marks[i])
    }

    fn mark(&mut self, c: Coord) {
        if let Some(i) = self.dims.index(c) {
            self.marks[i] = true;
        }
    }

    pub fn marked_count(&self) -> usize {
        self.marks.iter().filter(|&&m| m).count()
    }

    pub fn clear(&mut self) {
        self.marks.fill(false);
    }
}

/// Shared flag that stops a replay between two steps.
///
/// Clones observe the same flag, so another task can hold one and cancel a
/// replay it does not own.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Read-only walk over a visit record from `start` toward `goal`.
///
/// Ends at the goal, at a cell with no recorded move, when a move would
/// leave the grid, or after one step per cell (a record with a loop in it).
#[derive(Debug, Clone)]
pub struct Trail<'a> {
    visits: &'a VisitRecord,
    cursor: Option<Coord>,
    goal: Coord,
    remaining: usize,
    reached_goal: bool,
}

impl<'a> Trail<'a> {
    pub fn new(visits: &'a VisitRecord, start: Coord, goal: Coord) -> Self {
        let dims = visits.dimensions();
        Self {
            visits,
            cursor: dims.contains(start).then_some(start),
            goal,
            remaining: dims.cell_count(),
            reached_goal: false,
        }
    }

    /// Whether the goal has been produced.
    pub fn reached_goal(&self) -> bool {
        self.reached_goal
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// Whether `next` has nothing left to produce.
    pub fn is_finished(&self) -> bool {
        self.cursor.is_none() || self.remaining == 0
    }

    pub fn visits(&self) -> &'a VisitRecord {
        self.visits
    }
}

impl Iterator for Trail<'_> {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        let current = self.cursor.take()?;
        if self.remaining == 0 {
            warn!("Replay exceeded one step per cell at {current}; visit record loops");
            return None;
        }
        self.remaining -= 1;

        if current == self.goal {
            self.reached_goal = true;
            return Some(current);
        }

        match self.visits.outgoing(current) {
            Some(direction) => {
                let next = current.step(direction);
                if self.visits.dimensions().contains(next) {
                    self.cursor = Some(next);
                } else {
                    warn!("Replay move {direction} from {current} leaves the grid");
                }
            }
            None => warn!("Replay stopped at {current}: no recorded move"),
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor {
            Some(_) => (1, Some(self.remaining)),
            None => (0, Some(0)),
        }
    }
}

impl FusedIterator for Trail<'_> {}

/// Lazy start-to-goal coordinate sequence that marks each produced cell in
/// the path record.
///
/// The sequence borrows the maze it replays, so the maze cannot be reset or
/// regenerated while a replay is still alive.
pub struct PathSequence<'a> {
    trail: Trail<'a>,
    path: &'a mut PathRecord,
    cancel: CancelToken,
    produced: usize,
}

impl<'a> PathSequence<'a> {
    pub fn new(
        visits: &'a VisitRecord,
        path: &'a mut PathRecord,
        start: Coord,
        goal: Coord,
    ) -> Self {
        Self {
            trail: Trail::new(visits, start, goal),
            path,
            cancel: CancelToken::new(),
            produced: 0,
        }
    }

    /// Token that cancels this sequence from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Stops production; later calls to `next` return `None`.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn reached_goal(&self) -> bool {
        self.trail.reached_goal()
    }

    /// True once the last coordinate has been produced or the replay was
    /// cancelled, so a paced consumer knows not to wait for another step.
    pub fn is_finished(&self) -> bool {
        self.is_cancelled() || self.trail.is_finished()
    }

    /// Coordinates produced so far.
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Whether `c` has been produced by this sequence or an earlier one.
    pub fn is_revealed(&self, c: Coord) -> bool {
        self.path.contains(c)
    }

    /// Direction the route leaves `c` in, if the solver moved out of it.
    pub fn path_direction(&self, c: Coord) -> Option<Direction> {
        self.trail.visits().outgoing(c)
    }

    pub fn goal(&self) -> Coord {
        self.trail.goal()
    }
}

impl Iterator for PathSequence<'_> {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.cancel.is_cancelled() {
            return None;
        }
        let current = self.trail.next()?;
        self.path.mark(current);
        self.produced += 1;
        trace!("Replay step {}: {}", self.produced, current);
        if self.trail.reached_goal() {
            debug!("Path completed in {} steps", self.produced);
        }
        Some(current)
    }
}

impl FusedIterator for PathSequence<'_> {}

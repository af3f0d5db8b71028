// render.rs - Text drawing of walls, endpoints and the revealed path

use backtrack_maze::{Coord, Direction, Grid, MazeState, PathSequence};

/// What a frame needs to know about a maze, whether or not a replay is running.
pub trait MazeView {
    fn grid(&self) -> &Grid;

    /// Whether the replay has reached `c`.
    fn revealed(&self, c: Coord) -> bool;

    /// Direction the route leaves `c` in.
    fn direction(&self, c: Coord) -> Option<Direction>;
}

impl MazeView for MazeState {
    fn grid(&self) -> &Grid {
        MazeState::grid(self)
    }

    fn revealed(&self, c: Coord) -> bool {
        self.on_path(c.x, c.y).unwrap_or(false)
    }

    fn direction(&self, c: Coord) -> Option<Direction> {
        self.path_direction(c.x, c.y).ok().flatten()
    }
}

/// A maze seen through a replay that is still in progress.
pub struct ReplayFrame<'s, 'a> {
    pub grid: &'a Grid,
    pub sequence: &'s PathSequence<'a>,
}

impl MazeView for ReplayFrame<'_, '_> {
    fn grid(&self) -> &Grid {
        self.grid
    }

    fn revealed(&self, c: Coord) -> bool {
        self.sequence.is_revealed(c)
    }

    fn direction(&self, c: Coord) -> Option<Direction> {
        self.sequence.path_direction(c)
    }
}

fn cell_glyph(view: &impl MazeView, c: Coord, arrows: bool) -> char {
    let dims = view.grid().dimensions();
    if c == dims.start() {
        'S'
    } else if c == dims.goal() {
        'G'
    } else if view.revealed(c) {
        match view.direction(c) {
            Some(d) if arrows => d.arrow(),
            _ => '*',
        }
    } else {
        ' '
    }
}

/// Third column of a cell; the start keeps its `S` and shows its arrow here.
fn trailing_glyph(view: &impl MazeView, c: Coord, arrows: bool) -> char {
    if !arrows || c != view.grid().dimensions().start() || !view.revealed(c) {
        return ' ';
    }
    view.direction(c).map_or(' ', Direction::arrow)
}

/// Draws the maze with `+`, `-` and `|` walls, three columns per cell.
pub fn render(view: &impl MazeView, arrows: bool) -> String {
    let grid = view.grid();
    let (width, height) = (grid.width(), grid.height());
    let mut out = String::with_capacity((width as usize * 4 + 2) * (height as usize * 2 + 1));

    out.push('+');
    for _ in 0..width {
        out.push_str("---+");
    }
    out.push('\n');

    for y in 0..height {
        out.push('|');
        for x in 0..width {
            let passages = grid.get(x, y).unwrap_or_default();
            out.push(' ');
            let c = Coord::new(x, y);
            out.push(cell_glyph(view, c, arrows));
            out.push(trailing_glyph(view, c, arrows));
            out.push(if passages.contains(Direction::East) { ' ' } else { '|' });
        }
        out.push('\n');

        out.push('+');
        for x in 0..width {
            let passages = grid.get(x, y).unwrap_or_default();
            out.push_str(if passages.contains(Direction::South) { "   " } else { "---" });
            out.push('+');
        }
        out.push('\n');
    }
    out
}

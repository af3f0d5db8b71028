// animate.rs - Paced replay of the solved path, one frame per step

use crate::config::RunConfig;
use crate::render::{render, ReplayFrame};
use anyhow::{Context, Result};
use backtrack_maze::{Grid, MazeState, PathSequence};
use crossterm::{cursor, execute, queue, terminal};
use log::{debug, info};
use std::io::Write;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayOutcome {
    pub steps: usize,
    pub reached_goal: bool,
    pub cancelled: bool,
}

/// Replays the solved route of `maze` to stdout.
///
/// With animation on, the screen is redrawn after every step and consecutive
/// steps are one configured delay apart. Ctrl-C cancels the replay between
/// two steps; the cells already produced stay marked.
pub async fn play<W: Write>(
    maze: &mut MazeState,
    config: &RunConfig,
    out: &mut W,
) -> Result<ReplayOutcome> {
    let (grid, mut sequence) = maze
        .path_sequence_with_grid()
        .context("Replay is not available for this maze")?;

    let token = sequence.cancel_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted; cancelling replay");
            token.cancel();
        }
    });

    let drawn = if config.animate {
        let animated = animate_frames(grid, &mut sequence, config, out).await;
        // the cursor comes back even when a frame failed to draw
        let restored = execute!(out, cursor::Show).context("Failed to restore cursor");
        animated.and(restored)
    } else {
        sequence.by_ref().for_each(drop);
        draw_frame(grid, &sequence, config, out)
    };
    interrupt.abort();
    drawn?;

    Ok(ReplayOutcome {
        steps: sequence.produced(),
        reached_goal: sequence.reached_goal(),
        cancelled: sequence.is_cancelled(),
    })
}

async fn animate_frames<'a, W: Write>(
    grid: &'a Grid,
    sequence: &mut PathSequence<'a>,
    config: &RunConfig,
    out: &mut W,
) -> Result<()> {
    execute!(out, terminal::Clear(terminal::ClearType::All), cursor::Hide)
        .context("Failed to prepare terminal")?;

    let mut ticker = step_ticker(config.delay);
    while let Some(step) = sequence.next() {
        queue!(out, cursor::MoveTo(0, 0)).context("Failed to move cursor")?;
        draw_frame(grid, sequence, config, out)?;
        debug!("Drew step {} at {}", sequence.produced(), step);
        if !sequence.is_finished() {
            ticker.tick().await;
        }
    }
    Ok(())
}

/// Ticker whose first tick lands one period from now.
fn step_ticker(delay: Duration) -> Interval {
    // interval() rejects a zero period
    let period = delay.max(Duration::from_millis(1));
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

fn draw_frame<'a, W: Write>(
    grid: &'a Grid,
    sequence: &PathSequence<'a>,
    config: &RunConfig,
    out: &mut W,
) -> Result<()> {
    let frame = render(&ReplayFrame { grid, sequence }, config.arrows);
    out.write_all(frame.as_bytes()).context("Failed writing frame")?;
    out.flush().context("Failed flushing frame")?;
    Ok(())
}

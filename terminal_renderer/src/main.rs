// main.rs - Terminal front end: carve a maze, solve it, and replay the route

use anyhow::{Context, Result};
use backtrack_maze::MazeState;
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::time::Instant;

mod animate;
mod config;
mod render;

use crate::config::{Args, RunConfig};

fn build_maze(config: &RunConfig) -> Result<MazeState> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let start = Instant::now();
    let maze = MazeState::with_rng(config.width, config.height, &mut rng)
        .with_context(|| format!("Failed to generate {}x{} maze", config.width, config.height))?;
    info!(
        "Carved in {:?} (longest corridor {} cells)",
        start.elapsed(),
        maze.generation_stats().max_depth
    );
    Ok(maze)
}

/// Prints a JSON snapshot, with the whole route revealed when solving.
fn emit_json(maze: &mut MazeState, config: &RunConfig) -> Result<()> {
    if config.solve {
        let steps = maze.path_sequence()?.count();
        info!("Revealed {steps} path cells for export");
    }
    let json = maze
        .snapshot()
        .to_json_pretty()
        .context("Failed to serialize maze snapshot")?;
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{json}").context("Failed writing snapshot to stdout")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    info!("Starting with {args:?}");
    let config = RunConfig::from_args(&args)?;

    let mut maze = build_maze(&config)?;

    if config.solve {
        let result = maze.solve().context("Failed to solve maze")?;
        info!("Solved: {} ({} moves explored)", result.solved, result.moves);
    }

    if config.json {
        return emit_json(&mut maze, &config);
    }

    if !config.solve {
        print!("{}", render::render(&maze, config.arrows));
        return Ok(());
    }

    let start = Instant::now();
    let mut stdout = std::io::stdout();
    let outcome = animate::play(&mut maze, &config, &mut stdout).await?;
    info!(
        "Replay done in {:?}: {} steps, reached goal: {}, cancelled: {}",
        start.elapsed(),
        outcome.steps,
        outcome.reached_goal,
        outcome.cancelled
    );
    Ok(())
}

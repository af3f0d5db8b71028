// config.rs - Command line arguments and the resolved run configuration

use anyhow::{ensure, Result};
use clap::Parser;
use std::time::Duration;

/// Replay pacing used by the browser version of this maze.
pub const DEFAULT_DELAY_MS: u64 = 20;

/// Environment override for the replay delay when `--delay-ms` is absent.
pub const DELAY_ENV: &str = "MAZE_REPLAY_DELAY_MS";

/// CLI
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Carve a perfect maze and animate its solution",
    long_about = None
)]
pub struct Args {
    /// Maze width in cells
    #[arg(short = 'W', long, default_value = "20")]
    pub width: i32,

    /// Maze height in cells
    #[arg(short = 'H', long, default_value = "20")]
    pub height: i32,

    /// Square maze of this size; overrides width and height
    #[arg(short, long)]
    pub size: Option<i32>,

    /// Seed for a reproducible maze; OS entropy when absent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds between replay steps (falls back to $MAZE_REPLAY_DELAY_MS, then 20)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Draw the direction of travel on path cells instead of a dot
    #[arg(long)]
    pub arrows: bool,

    /// Print only the final frame
    #[arg(long)]
    pub no_animate: bool,

    /// Draw the maze without solving it
    #[arg(long)]
    pub no_solve: bool,

    /// Print a JSON snapshot instead of drawing
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub width: i32,
    pub height: i32,
    pub seed: Option<u64>,
    pub delay: Duration,
    pub arrows: bool,
    pub animate: bool,
    pub solve: bool,
    pub json: bool,
}

impl RunConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        Self::resolve(args, std::env::var(DELAY_ENV).ok())
    }

    fn resolve(args: &Args, env_delay: Option<String>) -> Result<Self> {
        let (width, height) = match args.size {
            Some(size) => (size, size),
            None => (args.width, args.height),
        };
        ensure!(
            width >= 1 && height >= 1,
            "Invalid dimensions: {width}x{height}"
        );

        let delay_ms = args.delay_ms.unwrap_or_else(|| {
            env_delay
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_DELAY_MS)
        });

        Ok(Self {
            width,
            height,
            seed: args.seed,
            delay: Duration::from_millis(delay_ms),
            arrows: args.arrows,
            animate: !args.no_animate && !args.json,
            solve: !args.no_solve,
            json: args.json,
        })
    }
}

//! Counts the leaf nodes of the legal move tree for validating the move
//! generator against other implementations.

use std::io;

use anyhow::Context;
use clap::Parser;
use rookery::chess::perft::{divide, perft};
use rookery::chess::position::Position;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Runs perft on a position.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Position to start from. Accepts EPD and an optional `fen`/`epd`
    /// prefix.
    #[arg(long)]
    fen: Option<String>,
    /// Number of plies to explore.
    #[arg(long)]
    depth: u8,
    /// Print the number of nodes under each root move.
    #[arg(long)]
    divide: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = Config::parse();
    debug!(?config, "running perft");
    let position = match &config.fen {
        Some(fen) => Position::try_from(fen.as_str())
            .with_context(|| format!("failed to parse position {fen:?}"))?,
        None => Position::starting(),
    };

    let start = std::time::Instant::now();
    let nodes = if config.divide {
        let mut total = 0;
        for (root_move, nodes) in divide(&position, config.depth) {
            println!("{root_move}: {nodes}");
            total += nodes;
        }
        println!();
        total
    } else {
        perft(&position, config.depth)
    };
    debug!(elapsed = ?start.elapsed(), "perft finished");
    println!("Nodes searched: {nodes}");
    Ok(())
}

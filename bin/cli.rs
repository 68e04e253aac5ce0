use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::Position;
use lib::perft::{divide, perft};
use std::{cmp::min, io::stderr, time::Instant};
use tracing::{info, instrument, Level};
use tracing_subscriber::fmt::{format::FmtSpan, layer};
use tracing_subscriber::{filter::Targets, prelude::*, registry, util::SubscriberInitExt};

/// Counts the leaf nodes of the tree of legal moves from a position.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// Verbosity level.
    #[clap(short, long)]
    #[cfg_attr(not(debug_assertions), clap(default_value_t = Level::INFO))]
    #[cfg_attr(debug_assertions, clap(default_value_t = Level::DEBUG))]
    verbosity: Level,

    /// The number of plies to expand.
    #[clap(short, long, default_value_t = 4)]
    depth: u8,

    /// Also print the number of nodes under each legal move.
    #[clap(long)]
    divide: bool,

    /// The position to expand in FEN notation, the starting position by default.
    pos: Option<Position>,
}

impl Cli {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let filter = Targets::new()
            .with_target("perft", self.verbosity)
            .with_target("lib", self.verbosity)
            .with_default(min(Level::WARN, self.verbosity));

        let writer = layer()
            .pretty()
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(stderr);

        registry().with(filter).with(writer).init();

        let pos = self.pos.unwrap_or_default();
        let timer = Instant::now();

        let nodes = if self.divide {
            let mut total = 0;
            for (m, n) in divide(&pos, self.depth) {
                println!("{}: {}", pos.notation(&m), n);
                total += n;
            }

            total
        } else {
            perft(&pos, self.depth)
        };

        info!(%pos, depth = self.depth, nodes, elapsed = ?timer.elapsed());
        println!("{nodes}");

        Ok(())
    }
}

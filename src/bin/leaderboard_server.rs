//! Leaderboard HTTP service.
//!
//! Example:
//!   cargo run --bin leaderboard_server -- \
//!     --listen 127.0.0.1:8787 \
//!     --store leaderboard.ron

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use leaderboard::http::serve;
use leaderboard::{Leaderboard, MemoryStore, RonFileStore};

#[derive(Parser, Debug)]
#[command(author, version, about = "Serve the merge game leaderboard over HTTP", long_about=None)]
struct Args {
    #[arg(long, default_value = "127.0.0.1:8787")] listen: String,
    #[arg(long, default_value = "leaderboard.ron")] store: PathBuf,
    /// Keep scores in memory only; nothing is written to disk.
    #[arg(long)] memory: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.memory {
        log::info!("using in-memory store");
        serve(&args.listen, Leaderboard::new(MemoryStore::default()))
            .with_context(|| format!("serving on {}", args.listen))?;
    } else {
        let store = RonFileStore::open(&args.store)
            .with_context(|| format!("opening store {}", args.store.display()))?;
        log::info!("using file store {}", store.path().display());
        serve(&args.listen, Leaderboard::new(store))
            .with_context(|| format!("serving on {}", args.listen))?;
    }
    Ok(())
}

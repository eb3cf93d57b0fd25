use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::LevelFilter;

use enderchest::config::{Config, WORLDS_DIR_ENV};
use enderchest::prompt::TerminalPrompt;
use enderchest::session::Session;

/// Show what players keep in their ender chests in Minecraft: Bedrock Edition
/// worlds.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory holding the worlds. Defaults to the game's own location.
    #[arg(long, value_name = "DIR", env = WORLDS_DIR_ENV)]
    worlds_dir: Option<PathBuf>,

    /// Log more detail to stderr. Repeat for even more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // RUST_LOG still wins when set.
    env_logger::Builder::from_env(Env::default().default_filter_or(level.as_str())).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = Config::resolve(args.worlds_dir).with_context(|| {
        format!(
            "could not work out where worlds are kept, use --worlds-dir or {}",
            WORLDS_DIR_ENV
        )
    })?;
    log::info!("looking for worlds in {}", config.worlds_dir.display());

    let mut session = Session::new(config, TerminalPrompt, io::stdout());
    let outcome = session.run().context("ender chest session failed")?;
    log::debug!("session ended: {:?}", outcome);

    Ok(())
}

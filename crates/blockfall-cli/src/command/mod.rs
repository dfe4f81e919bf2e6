use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::{EngineConfig, GameEngine, PieceSeed, Randomizer};
use clap::{Parser, Subcommand};
use rand::Rng as _;

use crate::util;

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Play pieces with a random policy and print the final board as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum RandomizerArg {
    /// Draw each piece independently
    Uniform,
    /// Deal shuffled bags of all seven pieces
    SevenBag,
}

impl From<RandomizerArg> for Randomizer {
    fn from(value: RandomizerArg) -> Self {
        match value {
            RandomizerArg::Uniform => Randomizer::Uniform,
            RandomizerArg::SevenBag => Randomizer::SevenBag,
        }
    }
}

/// Options shared by every mode that starts a game session.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SessionArg {
    /// Engine configuration file (JSON); the flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Board width in columns
    #[arg(long)]
    width: Option<usize>,
    /// Board height in rows
    #[arg(long)]
    height: Option<usize>,
    /// Number of upcoming pieces shown
    #[arg(long)]
    next: Option<usize>,
    /// How upcoming pieces are drawn
    #[arg(long, value_enum)]
    randomizer: Option<RandomizerArg>,
    /// Milliseconds between gravity ticks
    #[arg(long)]
    gravity_ms: Option<u64>,
    /// Piece sequence seed (32 hex characters); random when omitted
    #[arg(long)]
    seed: Option<PieceSeed>,
}

impl SessionArg {
    fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_engine_config_file(path)?,
            None => EngineConfig::default(),
        };
        if let Some(width) = self.width {
            config.board_width = width;
        }
        if let Some(height) = self.height {
            config.board_height = height;
        }
        if let Some(next) = self.next {
            config.next_queue_len = next;
        }
        if let Some(randomizer) = self.randomizer {
            config.randomizer = randomizer.into();
        }
        if let Some(gravity_ms) = self.gravity_ms {
            config.gravity_interval_ms = gravity_ms;
        }
        Ok(config)
    }

    fn seed(&self) -> PieceSeed {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }

    /// Builds a session from the flags, returning it with the seed it uses.
    pub(crate) fn start(&self) -> anyhow::Result<(GameEngine, PieceSeed)> {
        let config = self.engine_config()?;
        let seed = self.seed();
        let engine = GameEngine::with_seed(config, seed).context("Invalid engine configuration")?;
        Ok((engine, seed))
    }
}

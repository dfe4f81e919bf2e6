use std::{cmp::Ordering, path::PathBuf};

use blockfall_engine::{Command, GameEngine, PieceSeed};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{command::SessionArg, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    pub(super) session: SessionArg,
    /// Number of pieces to play
    #[arg(long, default_value_t = 100)]
    pieces: usize,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        session,
        pieces,
        output,
    } = arg;

    let (mut engine, seed) = session.start()?;
    eprintln!("Simulating {pieces} pieces with seed {seed}...");

    let played = simulate(&mut engine, seed, *pieces);
    let stats = engine.stats();
    eprintln!(
        "Played {played} pieces: score {}, {} lines cleared{}",
        stats.score(),
        stats.total_cleared_lines(),
        if engine.is_game_over() {
            " (game over)"
        } else {
            ""
        },
    );

    util::write_json(&engine.snapshot(), output.as_deref())
}

/// Plays up to `pieces` pieces and returns how many were locked.
///
/// Each piece gets a random number of rotations and a random column shift
/// before being hard dropped. The policy is seeded from the piece seed, so a
/// seed always reproduces the same game.
fn simulate(engine: &mut GameEngine, seed: PieceSeed, pieces: usize) -> usize {
    let mut rng = Pcg32::from_seed(seed.to_bytes());
    let mut played = 0;
    while played < pieces && !engine.is_game_over() {
        play_random_piece(engine, &mut rng);
        played += 1;
    }
    played
}

fn play_random_piece<R>(engine: &mut GameEngine, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let half_width = i32::try_from(engine.board().width() / 2).unwrap_or(i32::MAX);
    let rotations = rng.random_range(0..4);
    let shift = rng.random_range(-half_width..=half_width);

    for _ in 0..rotations {
        engine.apply(Command::Rotate);
    }
    let step = match shift.cmp(&0) {
        Ordering::Less => Command::MoveLeft,
        Ordering::Equal | Ordering::Greater => Command::MoveRight,
    };
    for _ in 0..shift.unsigned_abs() {
        engine.apply(step);
    }
    engine.apply(Command::HardDrop);
}

#[cfg(test)]
mod tests {
    use blockfall_engine::EngineConfig;

    use super::*;

    fn run_seed(seed: PieceSeed, pieces: usize) -> (usize, GameEngine) {
        let mut engine = GameEngine::with_seed(EngineConfig::default(), seed).unwrap();
        let played = simulate(&mut engine, seed, pieces);
        (played, engine)
    }

    #[test]
    fn test_same_seed_same_game() {
        let seed = PieceSeed::from(0x5eed);
        let (played_a, a) = run_seed(seed, 40);
        let (played_b, b) = run_seed(seed, 40);
        assert_eq!(played_a, played_b);
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_stops_at_piece_limit_or_game_over() {
        let (played, engine) = run_seed(PieceSeed::from(1), 10);
        if engine.is_game_over() {
            assert!(played <= 10);
        } else {
            assert_eq!(played, 10);
            assert_eq!(engine.stats().completed_pieces(), 10);
        }

        let (played, engine) = run_seed(PieceSeed::from(2), 10_000);
        assert!(engine.is_game_over());
        assert!(played < 10_000);
    }
}

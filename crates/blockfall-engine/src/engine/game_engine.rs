use rand::Rng as _;
use serde::Serialize;

use crate::{
    config::{ConfigError, EngineConfig},
    core::{board::Board, piece::Piece, shape::PieceKind},
};

use super::{
    game_stats::GameStats,
    piece_queue::{PieceQueue, PieceSeed},
    snapshot::Snapshot,
};

/// Player and timer inputs, one per engine transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Hold,
    Tick,
    Reset,
}

/// Result of locking the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockOutcome {
    /// Rows removed by the lock.
    pub cleared_lines: usize,
    /// Points added to the score.
    pub points: usize,
    /// Whether the piece spawned after the lock topped out.
    pub game_over: bool,
}

/// Result of a hard drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HardDropOutcome {
    /// Rows the piece fell before locking.
    pub rows_dropped: usize,
    pub lock: LockOutcome,
}

/// Result of a gravity tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The active piece moved down one row.
    Fell,
    /// The active piece could not move and was locked.
    Locked(LockOutcome),
    /// The game is over; nothing happened.
    Ignored,
}

/// Result of [`GameEngine::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CommandOutcome {
    /// The command changed the session.
    Applied,
    /// The command was illegal right now and left the session unchanged.
    Rejected,
    /// The command locked a piece.
    Locked(LockOutcome),
    /// The session was restarted.
    Reset,
}

/// Falling-block game session.
///
/// Owns the board, the single live piece, the hold slot and the next queue.
/// Every transition runs to completion synchronously. Illegal moves are
/// reported through return values, never as errors, and once the game is over
/// every transition except [`Self::reset`] is a no-op.
///
/// # Example
///
/// ```
/// use blockfall_engine::{EngineConfig, GameEngine, PieceSeed};
///
/// let seed = PieceSeed::from(42);
/// let mut engine = GameEngine::with_seed(EngineConfig::default(), seed).unwrap();
///
/// engine.move_left();
/// engine.rotate();
/// let outcome = engine.hard_drop().unwrap();
/// assert_eq!(outcome.lock.cleared_lines, 0);
/// assert_eq!(engine.stats().completed_pieces(), 1);
/// assert!(!engine.is_game_over());
/// ```
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: EngineConfig,
    board: Board,
    active: Piece,
    held: Option<Piece>,
    queue: PieceQueue,
    stats: GameStats,
    game_over: bool,
    hold_used: bool,
}

impl GameEngine {
    /// Starts a session with a random seed.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::rng().random())
    }

    /// Starts a session whose piece sequence is determined by `seed`.
    pub fn with_seed(config: EngineConfig, seed: PieceSeed) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.board_width, config.board_height);
        let queue = PieceQueue::with_seed(seed, config.randomizer, config.next_queue_len);
        let mut this = Self {
            active: Piece::spawn(PieceKind::I, board.width()),
            board,
            held: None,
            queue,
            stats: GameStats::new(),
            game_over: false,
            hold_used: false,
            config,
        };
        this.spawn();
        Ok(this)
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        &self.active
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<&Piece> {
        self.held.as_ref()
    }

    /// Upcoming kinds, front first.
    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.next_pieces()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Whether hold was already used by the current piece.
    #[must_use]
    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    /// Returns a copy of the active piece dropped as far as it can go.
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        let mut ghost = self.active;
        loop {
            let below = ghost.with_offset(0, 1);
            if self.board.is_blocked(below.occupied_cells()) {
                return ghost;
            }
            ghost = below;
        }
    }

    /// Captures everything a presentation layer draws.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// Runs the transition matching `command`.
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        let applied = |ok: bool| {
            if ok {
                CommandOutcome::Applied
            } else {
                CommandOutcome::Rejected
            }
        };
        match command {
            Command::MoveLeft => applied(self.move_left()),
            Command::MoveRight => applied(self.move_right()),
            Command::SoftDrop => applied(self.soft_drop()),
            Command::Rotate => applied(self.rotate()),
            Command::Hold => applied(self.hold()),
            Command::HardDrop => self
                .hard_drop()
                .map_or(CommandOutcome::Rejected, |o| CommandOutcome::Locked(o.lock)),
            Command::Tick => match self.tick() {
                TickOutcome::Fell => CommandOutcome::Applied,
                TickOutcome::Locked(lock) => CommandOutcome::Locked(lock),
                TickOutcome::Ignored => CommandOutcome::Rejected,
            },
            Command::Reset => {
                self.reset();
                CommandOutcome::Reset
            }
        }
    }

    /// Moves the active piece by `(dx, dy)` if the destination is free.
    pub fn move_by(&mut self, dx: i32, dy: i32) -> bool {
        if self.game_over {
            return false;
        }
        if self.board.is_blocked(self.active.occupied_cells_offset(dx, dy)) {
            return false;
        }
        self.active = self.active.with_offset(dx, dy);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.move_by(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_by(1, 0)
    }

    pub fn soft_drop(&mut self) -> bool {
        self.move_by(0, 1)
    }

    /// Rotates the active piece clockwise in place if the result is free.
    ///
    /// There are no wall kicks: a blocked rotation is simply rejected.
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let pattern = self.active.rotated_pattern();
        if self
            .board
            .is_blocked(self.active.occupied_cells_with(0, 0, &pattern))
        {
            return false;
        }
        self.active = self.active.with_pattern(pattern);
        true
    }

    /// Drops the active piece to the floor and locks it.
    ///
    /// Returns `None` once the game is over.
    pub fn hard_drop(&mut self) -> Option<HardDropOutcome> {
        if self.game_over {
            return None;
        }
        let mut rows_dropped = 0;
        while self.move_by(0, 1) {
            rows_dropped += 1;
        }
        let lock = self.lock()?;
        Some(HardDropOutcome { rows_dropped, lock })
    }

    /// Applies gravity: moves the piece down one row or locks it.
    pub fn tick(&mut self) -> TickOutcome {
        if self.game_over {
            return TickOutcome::Ignored;
        }
        if self.move_by(0, 1) {
            return TickOutcome::Fell;
        }
        self.lock().map_or(TickOutcome::Ignored, TickOutcome::Locked)
    }

    /// Locks the active piece where it is, clears full rows, scores and
    /// spawns the next piece.
    ///
    /// Returns `None` once the game is over.
    pub fn lock(&mut self) -> Option<LockOutcome> {
        if self.game_over {
            return None;
        }
        self.board
            .lock(self.active.occupied_cells(), self.active.color());
        let cleared_lines = self.board.clear_full_rows();
        let points = self.stats.complete_piece_drop(cleared_lines);
        self.spawn();
        Some(LockOutcome {
            cleared_lines,
            points,
            game_over: self.game_over,
        })
    }

    /// Swaps the active piece with the hold slot, once per piece.
    ///
    /// The held piece always comes back in base orientation at the spawn
    /// anchor. Returns `false` when hold was already used for this piece or
    /// the game is over.
    pub fn hold(&mut self) -> bool {
        if self.game_over || self.hold_used {
            return false;
        }
        let width = self.board.width();
        match self.held.replace(self.active.respawned(width)) {
            None => self.spawn(),
            Some(held) => {
                self.active = held.respawned(width);
                self.check_top_out();
            }
        }
        self.hold_used = true;
        true
    }

    /// Starts a new game with the same configuration.
    ///
    /// The piece generator keeps running, so the new game deals a fresh
    /// sequence.
    pub fn reset(&mut self) {
        self.board.reset();
        self.stats = GameStats::new();
        self.held = None;
        self.game_over = false;
        self.hold_used = false;
        self.queue.refill();
        self.spawn();
    }

    fn spawn(&mut self) {
        let kind = self.queue.pop_next();
        self.active = Piece::spawn(kind, self.board.width());
        self.hold_used = false;
        self.check_top_out();
    }

    fn check_top_out(&mut self) {
        if self.board.is_blocked(self.active.occupied_cells()) {
            self.game_over = true;
        }
    }
}

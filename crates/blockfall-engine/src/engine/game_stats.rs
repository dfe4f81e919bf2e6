use serde::Serialize;

/// Points awarded per cleared row.
///
/// Scoring is flat: clearing `n` rows in one lock is worth `n * 100`, with no
/// multi-line, combo or level bonuses.
pub const POINTS_PER_LINE: usize = 100;

/// Game statistics tracking score, lines cleared, and piece count.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// assert_eq!(stats.complete_piece_drop(4), 400);
///
/// assert_eq!(stats.score(), 400);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by rows cleared.
    ///
    /// Index `n` counts locks that cleared exactly `n` rows (0-4).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Records a locked piece that cleared `cleared_lines` rows and returns
    /// the points it earned.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        let points = cleared_lines * POINTS_PER_LINE;
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
        self.score += points;
        points
    }
}

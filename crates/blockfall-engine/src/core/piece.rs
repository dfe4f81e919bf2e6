use arrayvec::ArrayVec;
use serde::Serialize;

use super::shape::{Color, Pattern, PieceKind};

/// Number of cells every piece kind covers.
pub const PIECE_CELL_COUNT: usize = 4;

/// Absolute cells covered by a piece.
pub type PieceCells = ArrayVec<(i32, i32), PIECE_CELL_COUNT>;

/// A piece (tetromino) instance with position and orientation.
///
/// `x` and `y` locate the top-left corner of the pattern's bounding box in
/// board coordinates (column, row). Rows grow downward and may be negative
/// while a piece is above the visible grid.
///
/// Pieces are plain values: `clone` (or a copy) is fully independent of the
/// original, so previews and the hold slot never alias the live piece.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::spawn(PieceKind::T, 10);
/// assert_eq!(piece.position(), (4, 0));
///
/// let cells = piece.occupied_cells();
/// assert_eq!(cells.as_slice(), &[(5, 0), (4, 1), (5, 1), (6, 1)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    kind: PieceKind,
    pattern: Pattern,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece in base orientation at the given anchor.
    #[must_use]
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            pattern: kind.base_shape(),
            x,
            y,
        }
    }

    /// Creates a piece in base orientation at the spawn anchor of a board
    /// `board_width` columns wide: horizontally centered on the top row.
    #[must_use]
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let pattern = kind.base_shape();
        let x = (board_width / 2).saturating_sub(pattern.width() / 2);
        Self::new(kind, to_coord(x), 0)
    }

    /// Returns this piece's kind back in base orientation at the spawn anchor.
    #[must_use]
    pub fn respawned(&self, board_width: usize) -> Self {
        Self::spawn(self.kind, board_width)
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.kind.color()
    }

    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[must_use]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Computes the pattern rotated 90° clockwise without changing the piece.
    ///
    /// Legality is not checked here.
    #[must_use]
    pub fn rotated_pattern(&self) -> Pattern {
        self.pattern.rotated_clockwise()
    }

    #[must_use]
    pub fn with_offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    #[must_use]
    pub fn with_pattern(&self, pattern: Pattern) -> Self {
        Self { pattern, ..*self }
    }

    #[must_use]
    pub fn occupied_cells(&self) -> PieceCells {
        self.occupied_cells_with(0, 0, &self.pattern)
    }

    #[must_use]
    pub fn occupied_cells_offset(&self, dx: i32, dy: i32) -> PieceCells {
        self.occupied_cells_with(dx, dy, &self.pattern)
    }

    /// Absolute cells this piece would cover if moved by `(dx, dy)` and given
    /// `pattern` instead of its own.
    #[must_use]
    pub fn occupied_cells_with(&self, dx: i32, dy: i32, pattern: &Pattern) -> PieceCells {
        pattern
            .occupied_offsets()
            .map(|(px, py)| (self.x + dx + to_coord(px), self.y + dy + to_coord(py)))
            .collect()
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn to_coord(n: usize) -> i32 {
    n as i32
}

use serde::Serialize;

use crate::core::{
    board::Cell,
    piece::Piece,
    shape::{Color, Pattern, PieceKind},
};

use super::{game_engine::GameEngine, game_stats::GameStats};

/// A shape shown outside the board: the hold slot or a next-queue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShapeView {
    pub kind: PieceKind,
    pub color: Color,
    /// Base-orientation pattern.
    pub pattern: Pattern,
}

impl ShapeView {
    fn of_kind(kind: PieceKind) -> Self {
        Self {
            kind,
            color: kind.color(),
            pattern: kind.base_shape(),
        }
    }

    fn of_piece(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            color: piece.color(),
            pattern: *piece.pattern(),
        }
    }
}

/// A piece placed on the board, as absolute cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub kind: PieceKind,
    pub color: Color,
    pub cells: Vec<(i32, i32)>,
}

/// What a presentation layer draws at one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RenderCell {
    Empty,
    /// Landing preview of the active piece.
    Ghost(Color),
    /// Locked block or active piece.
    Block(Color),
}

/// Read-only copy of a session's visible state.
///
/// Owns all its data, so it stays valid while the engine keeps running.
///
/// # Example
///
/// ```
/// use blockfall_engine::{EngineConfig, GameEngine, PieceSeed};
///
/// let engine = GameEngine::with_seed(EngineConfig::default(), PieceSeed::from(3)).unwrap();
/// let snapshot = engine.snapshot();
/// assert_eq!((snapshot.width, snapshot.height), (10, 20));
/// assert_eq!(snapshot.next.len(), 5);
/// assert_eq!(snapshot.active.cells.len(), 4);
///
/// let json = serde_json::to_value(&snapshot).unwrap();
/// assert_eq!(json["score"], 0);
/// assert_eq!(json["held"], serde_json::Value::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    /// Locked cells only, top row first.
    pub cells: Vec<Vec<Cell>>,
    pub active: PieceView,
    /// Cells where the active piece would land on a hard drop.
    pub ghost: Vec<(i32, i32)>,
    pub held: Option<ShapeView>,
    pub next: Vec<ShapeView>,
    pub score: usize,
    pub game_over: bool,
    pub hold_used: bool,
    pub stats: GameStats,
}

impl Snapshot {
    pub(crate) fn capture(engine: &GameEngine) -> Self {
        let board = engine.board();
        let active = engine.active_piece();
        Self {
            width: board.width(),
            height: board.height(),
            cells: board.to_grid(),
            active: PieceView {
                kind: active.kind(),
                color: active.color(),
                cells: active.occupied_cells().to_vec(),
            },
            ghost: engine.ghost_piece().occupied_cells().to_vec(),
            held: engine.held_piece().map(ShapeView::of_piece),
            next: engine.next_pieces().map(ShapeView::of_kind).collect(),
            score: engine.score(),
            game_over: engine.is_game_over(),
            hold_used: engine.hold_used(),
            stats: engine.stats().clone(),
        }
    }

    /// Composes locked cells, ghost and active piece into one grid.
    ///
    /// The active piece is drawn over the ghost; the ghost only shows on
    /// empty cells. Piece cells above the grid are left out.
    #[must_use]
    pub fn render_grid(&self) -> Vec<Vec<RenderCell>> {
        let mut grid: Vec<Vec<RenderCell>> = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Empty => RenderCell::Empty,
                        Cell::Occupied(color) => RenderCell::Block(*color),
                    })
                    .collect()
            })
            .collect();

        let mut paint = |cells: &[(i32, i32)], render: RenderCell| {
            for &(x, y) in cells {
                let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                    continue;
                };
                let Some(slot) = grid.get_mut(y).and_then(|row| row.get_mut(x)) else {
                    continue;
                };
                if render.is_block() || slot.is_empty() {
                    *slot = render;
                }
            }
        };
        if !self.game_over {
            paint(&self.ghost, RenderCell::Ghost(self.active.color));
        }
        paint(&self.active.cells, RenderCell::Block(self.active.color));
        grid
    }
}

#[cfg(test)]
mod tests {
    use crate::{EngineConfig, PieceSeed};

    use super::*;

    fn engine() -> GameEngine {
        GameEngine::with_seed(EngineConfig::default(), PieceSeed::from(99)).unwrap()
    }

    #[test]
    fn test_capture_matches_engine() {
        let mut engine = engine();
        engine.hold();
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.cells.len(), 20);
        assert!(snapshot.cells.iter().all(|row| row.len() == 10));
        assert_eq!(
            snapshot.active.cells,
            engine.active_piece().occupied_cells().to_vec()
        );
        assert_eq!(
            snapshot.ghost,
            engine.ghost_piece().occupied_cells().to_vec()
        );
        let held = engine.held_piece().unwrap();
        assert_eq!(snapshot.held, Some(ShapeView::of_piece(held)));
        assert!(snapshot.hold_used);
        let next: Vec<_> = snapshot.next.iter().map(|v| v.kind).collect();
        assert_eq!(next, engine.next_pieces().collect::<Vec<_>>());
        assert!(
            snapshot
                .next
                .iter()
                .all(|v| v.pattern == v.kind.base_shape() && v.color == v.kind.color())
        );
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut engine = engine();
        let snapshot = engine.snapshot();
        engine.hard_drop();
        assert_eq!(snapshot.stats.completed_pieces(), 0);
        assert_ne!(snapshot, engine.snapshot());
    }

    #[test]
    fn test_render_grid_overlays() {
        let engine = engine();
        let snapshot = engine.snapshot();
        let grid = snapshot.render_grid();
        let color = snapshot.active.color;

        for &(x, y) in &snapshot.active.cells {
            assert_eq!(grid[y as usize][x as usize], RenderCell::Block(color));
        }
        for &(x, y) in &snapshot.ghost {
            assert_eq!(grid[y as usize][x as usize], RenderCell::Ghost(color));
        }
        let painted = grid.iter().flatten().filter(|c| !c.is_empty()).count();
        assert_eq!(painted, 8);
    }

    #[test]
    fn test_json_shape() {
        let snapshot = engine().snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["width"], 10);
        assert_eq!(json["cells"][19][0], serde_json::Value::Null);
        assert_eq!(json["next"].as_array().unwrap().len(), 5);
        assert!(json["next"][0]["pattern"][0].is_string());
        assert_eq!(json["stats"]["score"], 0);
        assert_eq!(json["game_over"], false);
    }
}

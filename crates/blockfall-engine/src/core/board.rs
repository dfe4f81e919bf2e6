use std::iter;

use serde::{Serialize, Serializer};

use super::shape::Color;

/// A single cell of the board.
///
/// Serializes as `null` when empty and as the color name when occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    /// No block.
    #[default]
    Empty,
    /// Block left behind by a locked piece.
    Occupied(Color),
}

impl Cell {
    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(color) => Some(color),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.color().serialize(serializer)
    }
}

/// One row of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BoardRow {
    cells: Vec<Cell>,
}

impl BoardRow {
    fn empty(width: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; width],
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_occupied())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }
}

/// Fixed-size grid of locked blocks.
///
/// Coordinates are `(column, row)` with row 0 at the top. The board knows
/// nothing about pieces; it works on lists of coordinates so collision tests
/// and locking can be driven directly.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Color};
///
/// let mut board = Board::new(10, 20);
/// assert!(!board.is_blocked([(0, 19), (9, -3)]));
/// assert!(board.is_blocked([(10, 0)]));
///
/// board.lock([(0, 19)], Color::Red);
/// assert!(board.is_blocked([(0, 19)]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<BoardRow>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0, "board width must be positive");
        assert!(height > 0, "board height must be positive");
        Self {
            width,
            height,
            rows: iter::repeat_with(|| BoardRow::empty(width))
                .take(height)
                .collect(),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Iterates rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &BoardRow> + '_ {
        self.rows.iter()
    }

    /// Returns the cell at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        let (x, y) = self.index(x, y)?;
        Some(self.rows[y].cells[x])
    }

    /// Number of occupied cells on the whole board.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|c| c.is_occupied())
            .count()
    }

    fn index(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some((x, y))
    }

    /// Returns whether any of `cells` is outside the side walls, at or below the
    /// floor, or on an occupied cell.
    ///
    /// Cells above the top edge (negative row) inside the side walls never
    /// block; pieces may stick out above the grid.
    pub fn is_blocked<I>(&self, cells: I) -> bool
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        cells.into_iter().any(|(x, y)| {
            let Ok(col) = usize::try_from(x) else {
                return true;
            };
            if col >= self.width {
                return true;
            }
            let Ok(row) = usize::try_from(y) else {
                return false;
            };
            row >= self.height || self.rows[row].cells[col].is_occupied()
        })
    }

    /// Marks `cells` as occupied with `color`.
    ///
    /// No legality check is made; the caller tests with [`Self::is_blocked`]
    /// first. Cells outside the grid are ignored.
    pub fn lock<I>(&mut self, cells: I, color: Color)
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        for (x, y) in cells {
            if let Some((x, y)) = self.index(x, y) {
                self.rows[y].cells[x] = Cell::Occupied(color);
            }
        }
    }

    /// Removes every full row and inserts as many empty rows at the top.
    ///
    /// Remaining rows keep their relative order. Returns the number of rows
    /// removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width;
        self.rows.retain(|row| !row.is_full());
        let cleared = self.height - self.rows.len();
        self.rows.splice(
            0..0,
            iter::repeat_with(|| BoardRow::empty(width)).take(cleared),
        );
        cleared
    }

    /// Empties every cell.
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.cells.fill(Cell::Empty);
        }
    }

    /// Copies the cells into a plain grid, top row first.
    #[must_use]
    pub fn to_grid(&self) -> Vec<Vec<Cell>> {
        self.rows.iter().map(|row| row.cells.clone()).collect()
    }
}

use blockfall_engine::{MAX_PATTERN_SIZE, ShapeView};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{CellDisplay, cells_to_u16};

/// A single shape in base orientation, centered in its area.
#[derive(Debug)]
pub struct ShapeDisplay<'a> {
    shape: Option<ShapeView>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> ShapeDisplay<'a> {
    pub fn new() -> Self {
        Self {
            shape: None,
            block: None,
        }
    }

    pub fn shape(self, shape: ShapeView) -> Self {
        Self {
            shape: Some(shape),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    /// Rows reserved for any base shape.
    pub const fn shape_rows() -> u16 {
        2
    }

    pub fn width(&self) -> u16 {
        cells_to_u16(MAX_PATTERN_SIZE) * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        Self::shape_rows() * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for ShapeDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &ShapeDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(shape) = self.shape else {
            CellDisplay::empty(false).render(area, buf);
            return;
        };

        let pattern = &shape.pattern;
        let (columns, rows) = (cells_to_u16(pattern.width()), cells_to_u16(pattern.height()));
        let shape_area = area.centered(
            Constraint::Length(columns * CellDisplay::width()),
            Constraint::Length(rows * CellDisplay::height()),
        );

        let horizontal = Layout::horizontal(
            (0..columns).map(|_| Constraint::Length(CellDisplay::width())),
        )
        .flex(Flex::Center);
        let vertical =
            Layout::vertical((0..rows).map(|_| Constraint::Length(CellDisplay::height())));

        let occupied = CellDisplay::block(shape.color);
        let empty = CellDisplay::empty(false);
        for (y, grid_row) in shape_area.layout_vec(&vertical).into_iter().enumerate() {
            for (x, grid_cell) in grid_row.layout_vec(&horizontal).into_iter().enumerate() {
                if pattern.is_occupied(x, y) {
                    Widget::render(&occupied, grid_cell, buf);
                } else {
                    Widget::render(&empty, grid_cell, buf);
                }
            }
        }
    }
}

use std::iter;

use blockfall_engine::{RenderCell, Snapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::{CellDisplay, cells_to_u16};

/// The playfield with the active piece and its ghost drawn in.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: Vec<Vec<RenderCell>>,
    columns: u16,
    rows: u16,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(snapshot: &Snapshot) -> Self {
        Self {
            grid: snapshot.render_grid(),
            columns: cells_to_u16(snapshot.width),
            rows: cells_to_u16(snapshot.height),
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        self.columns * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        self.rows * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..self.columns).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..self.rows).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, &self.grid) {
            for (grid_cell, cell) in iter::zip(grid_row, row) {
                CellDisplay::from_render_cell(*cell, true).render(grid_cell, buf);
            }
        }
    }
}

use std::iter;

use blockfall_engine::ShapeView;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{CellDisplay, ShapeDisplay, cells_to_u16};

/// Upcoming shapes stacked top to bottom, front of the queue first.
#[derive(Debug)]
pub struct NextQueueDisplay<'a> {
    shapes: &'a [ShapeView],
    block: Option<BlockWidget<'a>>,
}

impl<'a> NextQueueDisplay<'a> {
    pub fn new(shapes: &'a [ShapeView]) -> Self {
        Self {
            shapes,
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
        ShapeDisplay::new().width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        let num_shapes = cells_to_u16(self.shapes.len());
        let padding = num_shapes.saturating_sub(1);
        ShapeDisplay::shape_rows() * CellDisplay::height() * num_shapes
            + padding
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for NextQueueDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &NextQueueDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        let layout = Layout::vertical(self.shapes.iter().map(|_| {
            Constraint::Length(ShapeDisplay::shape_rows() * CellDisplay::height())
        }))
        .flex(Flex::SpaceBetween);

        for (cell, shape) in iter::zip(area.layout_vec(&layout), self.shapes) {
            ShapeDisplay::new().shape(*shape).render(cell, buf);
        }
    }
}

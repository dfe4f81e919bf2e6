use blockfall_engine::{Color as PieceColor, RenderCell};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// One board cell, two terminal columns wide.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    pub const fn empty(show_dots: bool) -> Self {
        if show_dots {
            Self::new(style::EMPTY_DOT, ".")
        } else {
            Self::new(style::EMPTY, "")
        }
    }

    pub const fn block(color: PieceColor) -> Self {
        Self::new(style::block(color), "")
    }

    pub const fn from_render_cell(cell: RenderCell, show_dots: bool) -> Self {
        match cell {
            RenderCell::Empty => Self::empty(show_dots),
            RenderCell::Ghost(color) => Self::new(style::ghost(color), "[]"),
            RenderCell::Block(color) => Self::block(color),
        }
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Fill the whole area, not only the cells holding the symbol.
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

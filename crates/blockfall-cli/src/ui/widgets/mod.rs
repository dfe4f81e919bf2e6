use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, cell_display::*, game_display::*, next_queue_display::*, shape_display::*,
    stats_display::*,
};

mod board_display;
mod cell_display;
mod game_display;
mod next_queue_display;
mod shape_display;
mod stats_display;

mod color {
    use blockfall_engine::Color as PieceColor;
    use ratatui::style::Color;

    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    pub const fn piece(color: PieceColor) -> Color {
        let (r, g, b) = color.rgb();
        Color::Rgb(r, g, b)
    }
}

pub mod style {
    use blockfall_engine::Color as PieceColor;
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);

    pub const fn block(piece_color: PieceColor) -> Style {
        bg_only(color::piece(piece_color))
    }

    pub const fn ghost(piece_color: PieceColor) -> Style {
        fg_bg(color::piece(piece_color), color::BLACK)
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

/// Converts a cell count to terminal units, saturating on absurd sizes.
fn cells_to_u16(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

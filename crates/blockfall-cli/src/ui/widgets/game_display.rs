use blockfall_engine::Snapshot;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{
    BoardDisplay, NextQueueDisplay, ShapeDisplay, StatsDisplay, color, style,
};

/// Full game screen: hold and stats on the left, the board in the middle and
/// the next queue on the right, with a banner once the game is over.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    snapshot: &'a Snapshot,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> GameDisplay<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    fn panel(&self, title: &'a str, border_color: ratatui::style::Color) -> Block<'a> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::symmetric(
                self.horizontal_padding,
                self.vertical_padding,
            ))
            .border_style(border_color)
            .style(style::DEFAULT)
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let snapshot = self.snapshot;
        let border_color = if snapshot.game_over {
            color::RED
        } else if snapshot.hold_used {
            color::GRAY
        } else {
            color::WHITE
        };

        let game_board = BoardDisplay::new(snapshot).block(
            Block::bordered()
                .border_style(border_color)
                .style(style::DEFAULT),
        );
        let hold_panel = {
            let panel = ShapeDisplay::new().block(self.panel("HOLD", border_color));
            match snapshot.held {
                Some(shape) => panel.shape(shape),
                None => panel,
            }
        };
        let next_queue =
            NextQueueDisplay::new(&snapshot.next).block(self.panel("NEXT", border_color));
        let stats = StatsDisplay::new(snapshot).block(self.panel("STATS", border_color));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(u16::max(hold_panel.width(), stats.width())),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_queue.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [hold_area, stats_area] = Layout::vertical([
            Constraint::Length(hold_panel.height()),
            Constraint::Length(stats.height()),
        ])
        .spacing(1)
        .areas(left_column);
        let hold_area = hold_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(hold_panel.width())]).flex(Flex::End),
        )[0];
        let stats_area = stats_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(stats.width())]).flex(Flex::End),
        )[0];

        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_queue.height())]).areas(right_column);

        let board_width = game_board.width();
        hold_panel.render(hold_area, buf);
        stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_queue.render(next_area, buf);

        if snapshot.game_over {
            let style = Style::new().fg(color::WHITE).bg(color::RED);
            let block = Block::new().style(style);
            let text = Text::styled("GAME OVER", style).centered();
            let area = board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{EngineConfig, GameEngine, PieceSeed};

    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_panels() {
        let engine = GameEngine::with_seed(EngineConfig::default(), PieceSeed::from(5)).unwrap();
        let snapshot = engine.snapshot();
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        GameDisplay::new(&snapshot).render(area, &mut buf);

        let text = buffer_text(&buf);
        for title in ["HOLD", "NEXT", "STATS", "SCORE:"] {
            assert!(text.contains(title), "missing {title}");
        }
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_renders_game_over_banner() {
        let mut engine =
            GameEngine::with_seed(EngineConfig::default(), PieceSeed::from(5)).unwrap();
        while engine.hard_drop().is_some() {}
        let snapshot = engine.snapshot();
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        GameDisplay::new(&snapshot).render(area, &mut buf);

        assert!(buffer_text(&buf).contains("GAME OVER"));
    }
}

use blockfall_engine::Snapshot;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block as BlockWidget, Paragraph, Widget},
};

use crate::ui::widgets::{cells_to_u16, style};

const LABEL_WIDTH: usize = 10;
const VALUE_WIDTH: usize = 8;

/// Score, piece count and the line-clear histogram of a snapshot.
pub struct StatsDisplay<'a> {
    lines: Vec<Line<'static>>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(snapshot: &Snapshot) -> Self {
        let stats = &snapshot.stats;
        let [_, singles, doubles, triples, quads] = *stats.line_cleared_counter();

        let mut lines = vec![
            Line::raw("SCORE:"),
            Line::raw(format!("{:>1$}", snapshot.score, LABEL_WIDTH + VALUE_WIDTH)),
            Line::default(),
            counter("LINES:", stats.total_cleared_lines()),
            counter("PIECES:", stats.completed_pieces()),
            Line::default(),
        ];
        lines.extend(
            [
                ("SINGLES:", singles),
                ("DOUBLES:", doubles),
                ("TRIPLES:", triples),
                ("QUADS:", quads),
            ]
            .into_iter()
            .map(|(label, count)| counter(label, count)),
        );

        Self { lines, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        cells_to_u16(LABEL_WIDTH + VALUE_WIDTH)
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        cells_to_u16(self.lines.len()) + super::block_vertical_margin(self.block.as_ref())
    }
}

fn counter(label: &str, count: usize) -> Line<'static> {
    Line::raw(format!("{label:<LABEL_WIDTH$}{count:>VALUE_WIDTH$}"))
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut paragraph = Paragraph::new(self.lines).style(style::DEFAULT);
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{EngineConfig, GameEngine, PieceSeed};

    use super::*;

    fn rendered_rows(display: StatsDisplay<'_>) -> Vec<String> {
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn test_counts_follow_snapshot() {
        let mut engine =
            GameEngine::with_seed(EngineConfig::default(), PieceSeed::from(7)).unwrap();
        engine.hard_drop().unwrap();
        engine.hard_drop().unwrap();
        let snapshot = engine.snapshot();

        let rows = rendered_rows(StatsDisplay::new(&snapshot));
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].trim_end(), "SCORE:");
        assert_eq!(rows[1].trim_start(), "0");
        assert_eq!(rows[4], format!("{:<10}{:>8}", "PIECES:", 2));
        assert_eq!(rows[9], format!("{:<10}{:>8}", "QUADS:", 0));
    }
}

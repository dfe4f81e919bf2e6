use std::time::Instant;

use blockfall_engine::{Command, CommandOutcome, GameEngine, GravityTimer};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{
    tui::{App, Runtime},
    ui::widgets::GameDisplay,
};

const FPS: f64 = 60.0;

/// Maps a key to the engine command it triggers.
fn command_for_key(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Down => Command::SoftDrop,
        KeyCode::Up => Command::Rotate,
        KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Char('c') => Command::Hold,
        KeyCode::Char('r') => Command::Reset,
        _ => return None,
    };
    Some(command)
}

#[derive(Debug)]
pub struct PlayApp {
    engine: GameEngine,
    gravity: GravityTimer,
    last_update: Instant,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            gravity: engine.config().gravity_timer(),
            engine,
            last_update: Instant::now(),
            is_exiting: false,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    fn apply(&mut self, command: Command) {
        match self.engine.apply(command) {
            // A fresh piece gets a full gravity interval.
            CommandOutcome::Locked(_) | CommandOutcome::Reset => self.gravity.reset(),
            CommandOutcome::Applied | CommandOutcome::Rejected => {}
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(FPS);
        runtime.set_frame_rate(FPS);
        self.last_update = Instant::now();
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            code => {
                if let Some(command) = command_for_key(code) {
                    self.apply(command);
                }
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.engine.snapshot();
        let help_text = if snapshot.game_over {
            "Controls: R (Restart) | Q (Quit)"
        } else {
            "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | Space (Hard Drop) | C (Hold) | R (Restart) | Q (Quit)"
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(GameDisplay::new(&snapshot), main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update);
        self.last_update = now;
        if !self.engine.is_game_over() && self.gravity.advance(elapsed) {
            self.apply(Command::Tick);
        }
    }
}

use std::{io, time::Duration};

use crate::tui::{
    App,
    event_loop::{EventLoop, TuiEvent},
};

/// Runs an [`App`] in the terminal's alternate screen.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick rate (Hz, ticks per second).
    pub fn set_tick_rate(&mut self, rate: f64) {
        self.events
            .set_tick_interval(Duration::from_secs_f64(1.0 / rate));
    }

    /// Sets the maximum redraw rate (Hz).
    pub fn set_frame_rate(&mut self, rate: f64) {
        self.events
            .set_render_interval(Duration::from_secs_f64(1.0 / rate));
    }

    /// Runs `app` until [`App::should_exit`] returns true.
    ///
    /// Ticks call [`App::update`], redraws call [`App::draw`] and terminal
    /// events go to [`App::handle_event`]. The terminal is restored on return,
    /// including on error.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}

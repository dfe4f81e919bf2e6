use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event as CrosstermEvent};

const DEFAULT_RATE: Duration = Duration::from_millis(16);

/// Events emitted by [`EventLoop::next`].
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Game logic update is due.
    Tick,
    /// Redraw is due.
    Render,
    /// Key input, resize and other terminal events.
    Crossterm(CrosstermEvent),
}

/// Schedules ticks and throttled redraws around terminal input.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Duration,
    render_interval: Duration,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(DEFAULT_RATE, DEFAULT_RATE)
    }
}

impl EventLoop {
    pub(super) fn new(tick_interval: Duration, render_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            tick_interval,
            render_interval,
            last_tick: now,
            last_render: now.checked_sub(render_interval).unwrap_or(now),
            // The first frame must be drawn before any input arrives.
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
    }

    pub(super) fn set_render_interval(&mut self, interval: Duration) {
        self.render_interval = interval;
    }

    /// Blocks until a tick or redraw is due or a terminal event arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if now.duration_since(self.last_tick) >= self.tick_interval {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty && now.duration_since(self.last_render) >= self.render_interval {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if !event::poll(self.timeout(now))? {
                continue;
            }
            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn timeout(&self, now: Instant) -> Duration {
        let next_tick_at = self.last_tick + self.tick_interval;
        let next_at = if self.dirty {
            next_tick_at.min(self.last_render + self.render_interval)
        } else {
            next_tick_at
        };
        next_at.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::new(Duration::from_secs(60), Duration::from_millis(1));
        assert!(events.next().unwrap().is_render());
    }

    #[test]
    fn test_tick_marks_dirty() {
        let mut events = EventLoop::new(Duration::ZERO, Duration::ZERO);
        events.dirty = false;
        assert!(events.next().unwrap().is_tick());
        assert!(events.dirty);
    }
}

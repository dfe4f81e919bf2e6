use std::time::Duration;

/// Default time between gravity ticks, in milliseconds.
pub const DEFAULT_GRAVITY_INTERVAL_MS: u64 = 500;
/// Default time between gravity ticks.
pub const DEFAULT_GRAVITY_INTERVAL: Duration = Duration::from_millis(DEFAULT_GRAVITY_INTERVAL_MS);

/// Elapsed-time accumulator for gravity, owned by the frame loop.
///
/// The engine holds no timers. The caller feeds the time of each frame into
/// [`Self::advance`] and calls [`GameEngine::tick`](crate::GameEngine::tick)
/// whenever it reports that a tick is due.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::GravityTimer;
///
/// let mut timer = GravityTimer::new(Duration::from_millis(500));
/// assert!(!timer.advance(Duration::from_millis(300)));
/// assert!(timer.advance(Duration::from_millis(300)));
/// // The accumulator starts over after a tick.
/// assert!(!timer.advance(Duration::from_millis(300)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityTimer {
    interval: Duration,
    elapsed: Duration,
}

impl Default for GravityTimer {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY_INTERVAL)
    }
}

impl GravityTimer {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Adds `dt` to the accumulator and returns whether a gravity tick is due.
    ///
    /// A tick is due once strictly more than the interval has accumulated; the
    /// accumulator is then reset to zero (any excess is dropped).
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed > self.interval {
            self.elapsed = Duration::ZERO;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_interval_is_not_enough() {
        let mut timer = GravityTimer::new(Duration::from_millis(100));
        assert!(!timer.advance(Duration::from_millis(100)));
        assert!(timer.advance(Duration::from_millis(1)));
    }

    #[test]
    fn test_excess_time_is_dropped() {
        let mut timer = GravityTimer::new(Duration::from_millis(100));
        assert!(timer.advance(Duration::from_millis(350)));
        assert!(!timer.advance(Duration::from_millis(50)));
    }

    #[test]
    fn test_sixty_fps_frames() {
        let mut timer = GravityTimer::default();
        let frame = Duration::from_micros(16_667);
        let ticks = (0..600).filter(|_| timer.advance(frame)).count();
        // 10 seconds at a tick every 30 frames.
        assert_eq!(ticks, 20);
    }

    #[test]
    fn test_reset() {
        let mut timer = GravityTimer::new(Duration::from_millis(100));
        timer.advance(Duration::from_millis(90));
        timer.reset();
        assert!(!timer.advance(Duration::from_millis(90)));
    }
}

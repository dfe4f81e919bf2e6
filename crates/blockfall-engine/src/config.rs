//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{GravityTimer, Randomizer, engine::DEFAULT_GRAVITY_INTERVAL_MS};

/// Narrowest board every piece kind can spawn on (the I piece is 4 wide).
pub const MIN_BOARD_WIDTH: usize = 4;
/// Shortest board every piece kind can spawn on.
pub const MIN_BOARD_HEIGHT: usize = 2;
/// Largest accepted board side.
pub const MAX_BOARD_SIDE: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board width {_0} is out of range (4..=256)")]
    BoardWidth(#[error(not(source))] usize),
    #[display("board height {_0} is out of range (2..=256)")]
    BoardHeight(#[error(not(source))] usize),
    #[display("next queue must hold at least one piece")]
    EmptyNextQueue,
    #[display("gravity interval must be positive")]
    ZeroGravityInterval,
}

/// Session parameters.
///
/// Every field has a default, so a partial JSON object is accepted:
///
/// ```
/// use blockfall_engine::{EngineConfig, Randomizer};
///
/// let config: EngineConfig =
///     serde_json::from_str(r#"{ "board_width": 12, "randomizer": "seven-bag" }"#).unwrap();
/// assert_eq!(config.board_width, 12);
/// assert_eq!(config.board_height, 20);
/// assert_eq!(config.randomizer, Randomizer::SevenBag);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub board_width: usize,
    pub board_height: usize,
    /// Number of upcoming kinds kept in the next queue.
    pub next_queue_len: usize,
    pub randomizer: Randomizer,
    /// Gravity interval for the caller's frame loop, in milliseconds.
    pub gravity_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_width: 10,
            board_height: 20,
            next_queue_len: 5,
            randomizer: Randomizer::Uniform,
            gravity_interval_ms: DEFAULT_GRAVITY_INTERVAL_MS,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_WIDTH..=MAX_BOARD_SIDE).contains(&self.board_width) {
            return Err(ConfigError::BoardWidth(self.board_width));
        }
        if !(MIN_BOARD_HEIGHT..=MAX_BOARD_SIDE).contains(&self.board_height) {
            return Err(ConfigError::BoardHeight(self.board_height));
        }
        if self.next_queue_len == 0 {
            return Err(ConfigError::EmptyNextQueue);
        }
        if self.gravity_interval_ms == 0 {
            return Err(ConfigError::ZeroGravityInterval);
        }
        Ok(())
    }

    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        Duration::from_millis(self.gravity_interval_ms)
    }

    /// Builds the frame loop's gravity timer for this configuration.
    #[must_use]
    pub fn gravity_timer(&self) -> GravityTimer {
        GravityTimer::new(self.gravity_interval())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.gravity_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let narrow = EngineConfig {
            board_width: 3,
            ..EngineConfig::default()
        };
        assert_eq!(narrow.validate(), Err(ConfigError::BoardWidth(3)));

        let zero = EngineConfig {
            board_height: 0,
            ..EngineConfig::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::BoardHeight(0)));

        let huge = EngineConfig {
            board_width: 1000,
            ..EngineConfig::default()
        };
        assert_eq!(huge.validate(), Err(ConfigError::BoardWidth(1000)));
    }

    #[test]
    fn test_rejects_empty_queue_and_zero_gravity() {
        let config = EngineConfig {
            next_queue_len: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyNextQueue));

        let config = EngineConfig {
            gravity_interval_ms: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroGravityInterval));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::BoardWidth(2).to_string(),
            "board width 2 is out of range (4..=256)"
        );
        assert_eq!(
            ConfigError::EmptyNextQueue.to_string(),
            "next queue must hold at least one piece"
        );
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(serde_json::from_str::<EngineConfig>(r#"{ "width": 12 }"#).is_err());
    }
}

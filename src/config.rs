//! Runtime configuration structures and loaders.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::game::placement::PlacementConfig;
use crate::RESTART_DELAY_MS;

/// Configuration for one hosted game session.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Layout used on every start.
    pub placement: PlacementConfig,
    /// Pause between stop and start on restart.
    pub restart_delay: Duration,
    /// Command queue size.
    pub command_buffer: usize,
    /// Notice broadcast capacity per subscriber.
    pub notice_capacity: usize,
    /// Fixed seed; `None` seeds from system entropy.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            placement: PlacementConfig::default(),
            restart_delay: Duration::from_millis(RESTART_DELAY_MS),
            command_buffer: 64,
            notice_capacity: 256,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TREASURE_COUNT` - Treasures per session (default: 20)
    /// - `SPAWN_RADIUS` - Half side of the spawn square in meters (default: 10)
    /// - `SPAWN_FORWARD_BIAS` - Z offset of the spawn square (default: -3)
    /// - `RARE_PERCENT` - Chance of a rare treasure (default: 20)
    /// - `RESTART_DELAY_MS` - Pause between stop and start on restart (default: 100)
    /// - `COMMAND_BUFFER` - Command queue size (default: 64)
    /// - `NOTICE_CAPACITY` - Notice backlog per subscriber (default: 256)
    /// - `RNG_SEED` - Fixed seed for reproducible layouts (default: entropy)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(count) = read_env::<u32>("TREASURE_COUNT") {
            config.placement.count = count;
        }
        if let Some(radius) = read_env::<f32>("SPAWN_RADIUS") {
            config.placement.radius = radius;
        }
        if let Some(bias) = read_env::<f32>("SPAWN_FORWARD_BIAS") {
            config.placement.forward_bias = bias;
        }
        if let Some(percent) = read_env::<u32>("RARE_PERCENT") {
            config.placement.rare_percent = percent;
        }

        if let Some(millis) = read_env::<u64>("RESTART_DELAY_MS") {
            config.restart_delay = Duration::from_millis(millis);
        }

        if let Some(capacity) = read_env::<usize>("COMMAND_BUFFER") {
            config.command_buffer = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("NOTICE_CAPACITY") {
            config.notice_capacity = capacity.max(1);
        }

        config.rng_seed = read_env::<u64>("RNG_SEED");

        config
    }
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();

        assert_eq!(config.placement.count, 20);
        assert_eq!(config.placement.radius, 10.0);
        assert_eq!(config.restart_delay, Duration::from_millis(100));
        assert!(config.rng_seed.is_none());
    }

    #[test]
    fn test_read_env_parses_and_rejects() {
        // Keys unique to this test so parallel tests do not interfere
        env::set_var("TREASURE_HUNT_TEST_GOOD", " 42 ");
        env::set_var("TREASURE_HUNT_TEST_BAD", "forty-two");

        assert_eq!(read_env::<u32>("TREASURE_HUNT_TEST_GOOD"), Some(42));
        assert_eq!(read_env::<u32>("TREASURE_HUNT_TEST_BAD"), None);
        assert_eq!(read_env::<u32>("TREASURE_HUNT_TEST_MISSING"), None);

        env::remove_var("TREASURE_HUNT_TEST_GOOD");
        env::remove_var("TREASURE_HUNT_TEST_BAD");
    }
}

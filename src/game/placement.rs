//! Treasure Placement
//!
//! Generates the treasure layout for a fresh session from a random source.

use serde::{Serialize, Deserialize};
use tracing::warn;

use crate::core::rng::RandomSource;
use crate::core::vec3::Vec3;
use crate::game::treasure::{Treasure, TreasureId, TreasureKind};
use crate::{DEFAULT_SPAWN_RADIUS, DEFAULT_TREASURE_COUNT};

/// Radius used when the configured one is zero, negative or not finite (meters).
pub const MIN_SPAWN_RADIUS: f32 = 0.5;

/// Default offset along Z so the field sits in front of the player.
pub const DEFAULT_FORWARD_BIAS: f32 = -3.0;

/// Default lowest spawn height (meters).
pub const DEFAULT_MIN_HEIGHT: f32 = 0.5;

/// Default highest spawn height (meters).
pub const DEFAULT_MAX_HEIGHT: f32 = 2.0;

/// Default chance (in percent) of a rare treasure.
pub const DEFAULT_RARE_PERCENT: u32 = 20;

/// Configuration for treasure placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Number of treasures per session
    pub count: u32,
    /// Half side of the square spawn area (meters)
    pub radius: f32,
    /// Offset added to every Z coordinate
    pub forward_bias: f32,
    /// Lowest spawn height
    pub min_height: f32,
    /// Highest spawn height
    pub max_height: f32,
    /// Chance of a rare treasure, 0-100
    pub rare_percent: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_TREASURE_COUNT,
            radius: DEFAULT_SPAWN_RADIUS,
            forward_bias: DEFAULT_FORWARD_BIAS,
            min_height: DEFAULT_MIN_HEIGHT,
            max_height: DEFAULT_MAX_HEIGHT,
            rare_percent: DEFAULT_RARE_PERCENT,
        }
    }
}

impl PlacementConfig {
    /// Default layout with a different count and radius.
    pub fn with_area(count: u32, radius: f32) -> Self {
        Self {
            count,
            radius,
            ..Default::default()
        }
    }

    /// Clamp misconfigured values into a usable layout.
    ///
    /// Never fails; every repair is logged.
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();

        if !config.radius.is_finite() || config.radius <= 0.0 {
            warn!(
                radius = config.radius,
                "Spawn radius not positive, using {}", MIN_SPAWN_RADIUS
            );
            config.radius = MIN_SPAWN_RADIUS;
        }

        if !config.forward_bias.is_finite() {
            warn!("Forward bias not finite, using default");
            config.forward_bias = DEFAULT_FORWARD_BIAS;
        }

        if !config.min_height.is_finite() || !config.max_height.is_finite() {
            warn!("Spawn heights not finite, using defaults");
            config.min_height = DEFAULT_MIN_HEIGHT;
            config.max_height = DEFAULT_MAX_HEIGHT;
        } else if config.min_height > config.max_height {
            std::mem::swap(&mut config.min_height, &mut config.max_height);
        }

        if config.rare_percent > 100 {
            warn!(rare_percent = config.rare_percent, "Rare chance above 100%, clamping");
            config.rare_percent = 100;
        }

        config
    }
}

/// Generate a full treasure layout.
///
/// Ids are `0..count` in order. Pure apart from the random source.
pub fn generate<R: RandomSource>(config: &PlacementConfig, rng: &mut R) -> Vec<Treasure> {
    let config = config.sanitized();

    (0..config.count)
        .map(|index| {
            let kind = random_kind(rng, config.rare_percent);
            let position = random_position(rng, &config);
            Treasure::new(TreasureId::new(index), kind, position)
        })
        .collect()
}

/// Get a random treasure kind.
fn random_kind<R: RandomSource>(rng: &mut R, rare_percent: u32) -> TreasureKind {
    if rng.roll_percent(rare_percent) {
        TreasureKind::Rare
    } else {
        TreasureKind::Common
    }
}

/// Get a random position inside the spawn volume.
fn random_position<R: RandomSource>(rng: &mut R, config: &PlacementConfig) -> Vec3 {
    let x = rng.next_range(-config.radius, config.radius);
    let y = rng.next_range(config.min_height, config.max_height);
    let z = rng.next_range(-config.radius, config.radius) + config.forward_bias;
    Vec3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::DeterministicRng;
    use proptest::prelude::*;

    /// Tolerance for re-subtracting the forward bias in f32.
    const EPS: f32 = 1e-4;

    #[test]
    fn test_default_layout() {
        let mut rng = DeterministicRng::new(12345);
        let treasures = generate(&PlacementConfig::default(), &mut rng);

        assert_eq!(treasures.len(), 20);
        for (index, treasure) in treasures.iter().enumerate() {
            assert_eq!(treasure.id, TreasureId::new(index as u32));
        }
    }

    #[test]
    fn test_generation_determinism() {
        let config = PlacementConfig::default();
        let first = generate(&config, &mut DeterministicRng::new(777));
        let second = generate(&config, &mut DeterministicRng::new(777));

        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = DeterministicRng::new(1);
        let treasures = generate(&PlacementConfig::with_area(0, 10.0), &mut rng);
        assert!(treasures.is_empty());
    }

    #[test]
    fn test_bad_radius_is_clamped() {
        for radius in [0.0, -4.0, f32::NAN, f32::INFINITY] {
            let config = PlacementConfig::with_area(50, radius);
            let mut rng = DeterministicRng::new(3);

            for treasure in generate(&config, &mut rng) {
                assert!(treasure.position.is_finite());
                assert!(treasure.position.x.abs() <= MIN_SPAWN_RADIUS);
            }
        }
    }

    #[test]
    fn test_small_radius_is_respected() {
        let config = PlacementConfig::with_area(200, 0.25);
        assert_eq!(config.sanitized().radius, 0.25);

        for treasure in generate(&config, &mut DeterministicRng::new(1)) {
            let p = treasure.position;
            assert!(p.x.abs() <= 0.25, "x escaped the spawn square: {}", p.x);
            let unbiased = p.z - DEFAULT_FORWARD_BIAS;
            assert!(unbiased.abs() <= 0.25 + EPS, "z escaped the spawn square: {}", p.z);
        }
    }

    #[test]
    fn test_huge_radius_still_spreads() {
        let config = PlacementConfig::with_area(64, f32::MAX);
        let treasures = generate(&config, &mut DeterministicRng::new(5));

        assert!(treasures.iter().all(|t| t.position.x.is_finite()));
        let first = treasures[0].position.x;
        assert!(treasures.iter().any(|t| t.position.x != first));
    }

    #[test]
    fn test_sanitize_swaps_heights_and_clamps_rare() {
        let config = PlacementConfig {
            min_height: 3.0,
            max_height: 1.0,
            rare_percent: 250,
            ..Default::default()
        };
        let clean = config.sanitized();

        assert_eq!(clean.min_height, 1.0);
        assert_eq!(clean.max_height, 3.0);
        assert_eq!(clean.rare_percent, 100);
    }

    #[test]
    fn test_rare_fraction_converges() {
        let config = PlacementConfig::with_area(1000, 10.0);
        let mut rng = DeterministicRng::new(2024);

        let mut rare = 0usize;
        let mut total = 0usize;
        for _ in 0..20 {
            for treasure in generate(&config, &mut rng) {
                total += 1;
                if treasure.kind == TreasureKind::Rare {
                    rare += 1;
                }
            }
        }

        let fraction = rare as f64 / total as f64;
        assert!((fraction - 0.2).abs() < 0.02, "rare fraction {fraction}");
    }

    #[test]
    fn test_all_common_and_all_rare() {
        let mut rng = DeterministicRng::new(8);

        let none = PlacementConfig {
            rare_percent: 0,
            ..Default::default()
        };
        assert!(generate(&none, &mut rng)
            .iter()
            .all(|t| t.kind == TreasureKind::Common));

        let all = PlacementConfig {
            rare_percent: 100,
            ..Default::default()
        };
        assert!(generate(&all, &mut rng)
            .iter()
            .all(|t| t.kind == TreasureKind::Rare));
    }

    proptest! {
        #[test]
        fn prop_positions_within_volume(
            seed in any::<u64>(),
            count in 0u32..200,
            radius in 0.01f32..100.0,
        ) {
            let config = PlacementConfig::with_area(count, radius);
            let treasures = generate(&config, &mut DeterministicRng::new(seed));

            prop_assert_eq!(treasures.len(), count as usize);
            for treasure in &treasures {
                let p = treasure.position;
                prop_assert!(p.x >= -radius && p.x <= radius);
                prop_assert!(p.y >= 0.5 && p.y <= 2.0);
                let unbiased = p.z - DEFAULT_FORWARD_BIAS;
                prop_assert!(unbiased >= -radius - EPS && unbiased <= radius + EPS);
            }
        }

        #[test]
        fn prop_ids_are_sequential(seed in any::<u64>(), count in 0u32..200) {
            let config = PlacementConfig::with_area(count, 10.0);
            let treasures = generate(&config, &mut DeterministicRng::new(seed));

            let ids: Vec<u32> = treasures.iter().map(|t| t.id.get()).collect();
            let expected: Vec<u32> = (0..count).collect();
            prop_assert_eq!(ids, expected);
        }
    }
}

//! Data-driven game balance
//!
//! Every magic number the simulation uses for spawning, movement and timing.
//! Defaults reproduce the classic game; a JSON override can be loaded for
//! experiments.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Half-open range `[min, max)` used for spawn coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRange {
    pub min: f32,
    pub max: f32,
}

impl SpawnRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Fixed coordinate (min == max)
    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Uniform sample in `[min, max)`, or `min` for a fixed range
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.max <= self.min {
            return self.min;
        }
        let t: f32 = rng.random();
        // min + span * t can round up to max in f32
        (self.min + (self.max - self.min) * t).min(self.max.next_down())
    }
}

/// Spawn rule for one entity kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    /// A uniform roll must exceed this to spawn (spawn chance = 1 - threshold)
    pub threshold: f32,
    pub x: SpawnRange,
    pub y: SpawnRange,
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing (ms) ===
    /// Fuel/elapsed-time tick
    pub second_period_ms: f64,
    /// Spawn + bird/parachute/star movement tick
    pub spawn_period_ms: f64,
    /// Cloud drift tick
    pub cloud_period_ms: f64,
    /// Difficulty increase tick
    pub difficulty_period_ms: f64,

    // === Progression ===
    /// Fuel burned per second
    pub fuel_per_second: i32,
    /// Fuel restored by a parachute
    pub parachute_fuel: i32,
    /// Difficulty added per difficulty tick
    pub difficulty_step: f32,

    // === Movement (per spawn/cloud tick) ===
    /// Bird leftward speed = base + difficulty * factor
    pub bird_base_speed: f32,
    pub bird_difficulty_factor: f32,
    /// Parachute and star fall speed
    pub fall_speed: f32,
    /// Cloud leftward speed
    pub cloud_speed: f32,
    /// Cloud vertical jitter amplitude (uniform in [-amp, amp))
    pub cloud_jitter: f32,

    // === Spawning ===
    pub bird: SpawnRule,
    pub parachute: SpawnRule,
    pub falling_star: SpawnRule,
    pub cloud: SpawnRule,

    /// Drop entities that have left the playfield. Off by default to match
    /// the classic game, which keeps them forever.
    pub prune_offscreen: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            second_period_ms: 1000.0,
            spawn_period_ms: 500.0,
            cloud_period_ms: 500.0,
            difficulty_period_ms: 5000.0,

            fuel_per_second: 1,
            parachute_fuel: 10,
            difficulty_step: 50.0,

            bird_base_speed: 20.0,
            bird_difficulty_factor: 0.2,
            fall_speed: 5.0,
            cloud_speed: 20.0,
            cloud_jitter: 1.0,

            bird: SpawnRule {
                threshold: 0.2,
                x: SpawnRange::new(700.0, 900.0),
                y: SpawnRange::new(0.0, 700.0),
            },
            parachute: SpawnRule {
                threshold: 0.7,
                x: SpawnRange::new(0.0, 1024.0),
                y: SpawnRange::fixed(0.0),
            },
            falling_star: SpawnRule {
                threshold: 0.8,
                x: SpawnRange::new(0.0, 1024.0),
                y: SpawnRange::fixed(0.0),
            },
            cloud: SpawnRule {
                threshold: 0.5,
                x: SpawnRange::new(512.0, 712.0),
                y: SpawnRange::new(0.0, 700.0),
            },

            prune_offscreen: false,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Bird leftward speed at the given difficulty
    #[inline]
    pub fn bird_speed(&self, difficulty: f32) -> f32 {
        self.bird_base_speed + difficulty * self.bird_difficulty_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bird_speed_scales_with_difficulty() {
        let tuning = Tuning::default();
        assert!((tuning.bird_speed(1.0) - 20.2).abs() < 1e-4);
        assert!((tuning.bird_speed(51.0) - 30.2).abs() < 1e-4);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "difficulty_step": 10.0, "prune_offscreen": true }"#)
            .unwrap();
        assert_eq!(tuning.difficulty_step, 10.0);
        assert!(tuning.prune_offscreen);
        assert_eq!(tuning.spawn_period_ms, 500.0);
        assert_eq!(tuning.bird.threshold, 0.2);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    /// Always yields the largest value `next_u32` can produce
    struct MaxRng;

    impl rand::RngCore for MaxRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0xff);
        }
    }

    #[test]
    fn test_spawn_range_sample_is_half_open() {
        let tuning = Tuning::default();
        let mut rng = MaxRng;
        let x = tuning.bird.x.sample(&mut rng);
        assert!(x < 900.0 && x > 899.9, "bird x {x}");
        let x = tuning.cloud.x.sample(&mut rng);
        assert!(x < 712.0 && x > 711.9, "cloud x {x}");
        assert_eq!(SpawnRange::fixed(0.0).sample(&mut rng), 0.0);
    }
}

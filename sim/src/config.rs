use crate::agent::MAX_RADIUS;
use thiserror::Error;

/// Size of the plane agents live on; positions run from 0 to the bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("world bounds must be finite and at least {min} wide on each axis, got {width}x{height}")]
    InvalidBounds { width: f64, height: f64, min: f64 },

    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
}

/// Parameters a [`World`](crate::World) is created and reset with
#[derive(Debug, Clone)]
pub struct WorldConfig {
    pub bounds: Bounds,
    pub initial_prey: usize,
    pub initial_predators: usize,
    pub initial_food: usize,
    /// Prey count below which founders are spawned at the end of a tick
    pub min_prey: usize,
    /// Predator count below which founders are spawned at the end of a tick
    pub min_predators: usize,
    /// Food count below which a new item is always added
    pub min_food: usize,
    /// Chance per tick of adding a food item regardless of the count
    pub food_spawn_chance: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(800.0, 600.0),
            initial_prey: 20,
            initial_predators: 5,
            initial_food: 30,
            min_prey: 5,
            min_predators: 2,
            min_food: 10,
            food_spawn_chance: 0.05,
        }
    }
}

impl WorldConfig {
    /// Check that the clamping range `[radius, bound - radius]` is non-empty for
    /// every possible agent and that chances are real probabilities
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Bounds { width, height } = self.bounds;
        let min = 2.0 * MAX_RADIUS as f64;
        if !width.is_finite() || !height.is_finite() || width < min || height < min {
            return Err(ConfigError::InvalidBounds { width, height, min });
        }

        if !(0.0..=1.0).contains(&self.food_spawn_chance) {
            return Err(ConfigError::InvalidProbability {
                name: "food_spawn_chance",
                value: self.food_spawn_chance,
            });
        }

        Ok(())
    }
}

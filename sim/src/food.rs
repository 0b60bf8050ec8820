use crate::Bounds;
use rand::Rng;
use shared::Color;

/// Energy a prey gains from eating one item
pub const FOOD_ENERGY: f64 = 20.0;

pub const FOOD_RADIUS: u32 = 3;

/// A static consumable resource
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pub x: f64,
    pub y: f64,
}

impl Food {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Place an item uniformly at random within the bounds
    pub fn random<R: Rng>(rng: &mut R, bounds: Bounds) -> Self {
        Self {
            x: rng.gen_range(0.0..=bounds.width),
            y: rng.gen_range(0.0..=bounds.height),
        }
    }

    pub fn energy(&self) -> f64 {
        FOOD_ENERGY
    }

    pub fn radius(&self) -> u32 {
        FOOD_RADIUS
    }

    pub fn color(&self) -> Color {
        Color::FOOD
    }
}

use crate::{Gene, Traits};
use serde::{Deserialize, Serialize};

/// Which side of the food chain an agent is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Prey,
    Predator,
}

impl Role {
    pub fn is_predator(self) -> bool {
        matches!(self, Role::Predator)
    }
}

/// An RGB display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const FOOD: Color = Color::new(0, 200, 0);
    pub const PREDATOR_OUTLINE: Color = Color::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from unbounded channel values, truncating toward zero and
    /// saturating at the channel limits
    pub fn saturating(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }
}

fn channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Mean value of each gene across a population
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitAverages {
    pub speed: f64,
    pub size: f64,
    pub camouflage: f64,
}

impl TraitAverages {
    /// Average the given trait vectors, or `None` for an empty population
    pub fn from_traits<'a, I>(population: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Traits>,
    {
        let mut sums = [0.0f64; 3];
        let mut count = 0usize;

        for traits in population {
            for (slot, (_, value)) in sums.iter_mut().zip(traits.iter()) {
                *slot += value;
            }
            count += 1;
        }

        if count == 0 {
            return None;
        }

        let n = count as f64;
        Some(Self {
            speed: sums[0] / n,
            size: sums[1] / n,
            camouflage: sums[2] / n,
        })
    }

    pub fn get(&self, gene: Gene) -> f64 {
        match gene {
            Gene::Speed => self.speed,
            Gene::Size => self.size,
            Gene::Camouflage => self.camouflage,
        }
    }
}

/// Counters describing the world after the most recent tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldStats {
    /// Number of ticks completed since the last reset
    pub generation: u64,

    /// Current population sizes
    pub prey: usize,
    pub predators: usize,
    pub food: usize,

    /// Largest population sizes observed since the last reset
    pub max_prey: usize,
    pub max_predators: usize,

    /// Per-gene means over living prey, absent when no prey are alive
    pub prey_traits: Option<TraitAverages>,
}

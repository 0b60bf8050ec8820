use crate::Bounds;
use rand::Rng;
use shared::{Color, Role, Traits, TRAIT_MAX};
use std::ops::RangeInclusive;

/// Energy every agent is born with
pub const STARTING_ENERGY: f64 = 100.0;

/// Energy lost every tick just for being alive
pub const UPKEEP: f64 = 0.1;

/// Movement cost per unit of speed and size
pub const MOVE_COST: f64 = 0.05;

/// Reproduction only happens above this much energy
pub const REPRODUCTION_THRESHOLD: f64 = 150.0;
pub const REPRODUCTION_COST: f64 = 50.0;
pub const REPRODUCTION_CHANCE: f64 = 0.01;

/// Offspring appear up to this far from the parent on each axis
pub const BIRTH_JITTER: f64 = 20.0;

/// Base perception range before size and camouflage modifiers
pub const DETECTION_RANGE: f64 = 150.0;

/// Lower bound on the distance used to normalize a heading
pub const MIN_STEP_DISTANCE: f64 = 0.1;

pub const LIFESPAN: RangeInclusive<u32> = 500..=1000;

const RADIUS_PER_SIZE: f64 = 5.0;
const SPEED_PER_TRAIT: f64 = 2.0;

/// Largest body radius any agent can have
pub const MAX_RADIUS: u32 = (RADIUS_PER_SIZE * TRAIT_MAX) as u32;

/// A living prey or predator.
///
/// Physical parameters (radius, speed, color) are fixed at birth from the
/// trait vector and role. Position, energy and age change every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) energy: f64,
    pub(crate) age: u32,
    max_age: u32,
    role: Role,
    traits: Traits,
    radius: u32,
    speed: f64,
    color: Color,
}

impl Agent {
    /// Create an agent at a position.
    ///
    /// Without a trait vector the agent is a founder and samples its own.
    pub fn new<R: Rng>(x: f64, y: f64, traits: Option<Traits>, role: Role, rng: &mut R) -> Self {
        let traits = traits.unwrap_or_else(|| Traits::sample_founder(rng));
        let max_age = rng.gen_range(LIFESPAN);

        Self {
            x,
            y,
            energy: STARTING_ENERGY,
            age: 0,
            max_age,
            role,
            traits,
            radius: (RADIUS_PER_SIZE * traits.size) as u32,
            speed: SPEED_PER_TRAIT * traits.speed,
            color: body_color(&traits, role),
        }
    }

    /// Create a founder at a uniformly random position
    pub fn founder<R: Rng>(role: Role, bounds: Bounds, rng: &mut R) -> Self {
        let x = rng.gen_range(0.0..=bounds.width);
        let y = rng.gen_range(0.0..=bounds.height);
        Self::new(x, y, None, role, rng)
    }

    /// Take one step of length `speed` toward a target, staying inside the bounds.
    ///
    /// Clamping happens after the step, so any distance measured afterwards
    /// sees the clamped position.
    pub fn move_towards(&mut self, target_x: f64, target_y: f64, bounds: Bounds) {
        let dx = target_x - self.x;
        let dy = target_y - self.y;
        let dist = dx.hypot(dy).max(MIN_STEP_DISTANCE);

        self.x += dx / dist * self.speed;
        self.y += dy / dist * self.speed;

        let r = self.radius as f64;
        self.x = self.x.clamp(r, bounds.width - r);
        self.y = self.y.clamp(r, bounds.height - r);

        self.energy -= MOVE_COST * self.speed * self.traits.size;
    }

    /// Whether `other` is inside this agent's detection range.
    ///
    /// A predator's-eye view uses the flat base range; otherwise the range
    /// scales with this agent's size. Prey camouflage shrinks the range
    /// either way; predators are never camouflaged.
    pub fn perceives(&self, other: &Agent, predator_view: bool) -> bool {
        let mut range = DETECTION_RANGE;
        if !predator_view {
            range *= self.traits.size;
        }
        if !other.role.is_predator() {
            range *= 1.0 - other.camouflage();
        }

        self.distance_to(other.x, other.y) < range
    }

    /// Maybe produce one offspring.
    ///
    /// Call at most once per tick. Only fires above the energy threshold and
    /// then only with [`REPRODUCTION_CHANCE`]. The offspring's position is not
    /// clamped, so it may lie up to [`BIRTH_JITTER`] outside the plane until
    /// its first move.
    pub fn reproduce<R: Rng>(&mut self, rng: &mut R) -> Option<Agent> {
        if self.energy <= REPRODUCTION_THRESHOLD || rng.gen::<f64>() >= REPRODUCTION_CHANCE {
            return None;
        }

        self.energy -= REPRODUCTION_COST;

        let x = self.x + rng.gen_range(-BIRTH_JITTER..=BIRTH_JITTER);
        let y = self.y + rng.gen_range(-BIRTH_JITTER..=BIRTH_JITTER);
        let traits = self.traits.inherit(rng);

        Some(Agent::new(x, y, Some(traits), self.role, rng))
    }

    /// Age by one tick and pay the upkeep
    pub fn upkeep(&mut self) {
        self.age += 1;
        self.energy -= UPKEEP;
    }

    pub fn feed(&mut self, amount: f64) {
        self.energy += amount;
    }

    /// Starved or past its lifespan
    pub fn is_dead(&self) -> bool {
        self.energy <= 0.0 || self.age >= self.max_age
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (x - self.x).hypot(y - self.y)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Ticks lived so far
    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn traits(&self) -> &Traits {
        &self.traits
    }

    pub fn max_age(&self) -> u32 {
        self.max_age
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn camouflage(&self) -> f64 {
        self.traits.camouflage
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Predators are drawn with a red ring
    pub fn outline(&self) -> Option<Color> {
        self.role.is_predator().then_some(Color::PREDATOR_OUTLINE)
    }
}

fn body_color(traits: &Traits, role: Role) -> Color {
    let red = match role {
        Role::Predator => 255.0 * (1.0 - traits.camouflage),
        Role::Prey => 150.0 * traits.camouflage,
    };
    Color::saturating(red, 100.0 * traits.speed, 150.0 * traits.size)
}

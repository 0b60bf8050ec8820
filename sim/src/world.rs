use crate::{Agent, Bounds, ConfigError, Food, WorldConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::{Role, TraitAverages, WorldStats};

/// Prey flee from a perceiving predator closer than this
pub const FLEE_DISTANCE: f64 = 100.0;

/// Energy a predator gains from a capture
pub const CAPTURE_ENERGY: f64 = 30.0;

/// Wandering agents aim up to this far away on each axis
pub const WANDER_OFFSET: f64 = 50.0;

/// Owns every agent and food item and advances them one tick at a time.
///
/// The caller alternates [`World::tick`] with reads of the accessors; nothing
/// here is shared across threads.
pub struct World {
    config: WorldConfig,
    rng: StdRng,
    prey: Vec<Agent>,
    predators: Vec<Agent>,
    food: Vec<Food>,
    generation: u64,
    max_prey: usize,
    max_predators: usize,
}

impl World {
    /// Create a world populated with founders, seeded from system entropy
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Create a world whose random stream is fixed by `seed`
    pub fn with_seed(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: WorldConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = Self {
            config,
            rng,
            prey: Vec::new(),
            predators: Vec::new(),
            food: Vec::new(),
            generation: 0,
            max_prey: 0,
            max_predators: 0,
        };
        world.populate();

        Ok(world)
    }

    /// Throw away the current population and start over with fresh founders
    pub fn reset(&mut self) {
        self.generation = 0;
        self.max_prey = 0;
        self.max_predators = 0;
        self.populate();

        tracing::debug!(
            prey = self.prey.len(),
            predators = self.predators.len(),
            food = self.food.len(),
            "world reset"
        );
    }

    fn populate(&mut self) {
        let bounds = self.config.bounds;
        let rng = &mut self.rng;

        self.prey = (0..self.config.initial_prey)
            .map(|_| Agent::founder(Role::Prey, bounds, rng))
            .collect();
        self.predators = (0..self.config.initial_predators)
            .map(|_| Agent::founder(Role::Predator, bounds, rng))
            .collect();
        self.food = (0..self.config.initial_food)
            .map(|_| Food::random(rng, bounds))
            .collect();
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self) {
        // 1. Everyone ages and pays upkeep
        for agent in self.prey.iter_mut().chain(self.predators.iter_mut()) {
            agent.upkeep();
        }

        // 2. Remove the starved and the old
        self.prey.retain(|a| !a.is_dead());
        self.predators.retain(|a| !a.is_dead());

        // 3. Top up food
        self.replenish_food();

        // 4. Prey flee, forage or wander
        self.prey_phase();

        // 5. Predators hunt or wander
        self.predator_phase();

        // 6. Track population peaks
        self.max_prey = self.max_prey.max(self.prey.len());
        self.max_predators = self.max_predators.max(self.predators.len());

        // 7. Keep both populations from going extinct
        self.enforce_population_floor();

        self.generation += 1;

        tracing::trace!(
            generation = self.generation,
            prey = self.prey.len(),
            predators = self.predators.len(),
            food = self.food.len(),
            "tick complete"
        );
    }

    fn replenish_food(&mut self) {
        if self.food.len() < self.config.min_food
            || self.rng.gen::<f64>() < self.config.food_spawn_chance
        {
            let item = Food::random(&mut self.rng, self.config.bounds);
            self.food.push(item);
        }
    }

    fn prey_phase(&mut self) {
        let bounds = self.config.bounds;
        let Self {
            rng,
            prey,
            predators,
            food,
            ..
        } = self;

        // Offspring land past this index and wait for the next tick
        let living = prey.len();

        for idx in 0..living {
            let me = &prey[idx];
            let meal = nearest(
                me.x,
                me.y,
                food.iter().enumerate().map(|(i, f)| (i, f.x, f.y)),
            );
            let threat = nearest(
                me.x,
                me.y,
                predators
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.perceives(me, true))
                    .map(|(i, p)| (i, p.x, p.y)),
            );

            let agent = &mut prey[idx];
            match (threat, meal) {
                (Some((p, dist)), _) if dist < FLEE_DISTANCE => {
                    // Run directly away from the threat
                    let hunter = &predators[p];
                    let target_x = 2.0 * agent.x - hunter.x;
                    let target_y = 2.0 * agent.y - hunter.y;
                    agent.move_towards(target_x, target_y, bounds);
                }
                (_, Some((f, _))) => {
                    let item = &food[f];
                    agent.move_towards(item.x, item.y, bounds);

                    let reach = (agent.radius() + item.radius()) as f64;
                    if agent.distance_to(item.x, item.y) < reach {
                        agent.feed(item.energy());
                        food.remove(f);
                    }
                }
                _ => wander(agent, rng, bounds),
            }

            let offspring = prey[idx].reproduce(rng);
            if let Some(child) = offspring {
                prey.push(child);
            }
        }
    }

    fn predator_phase(&mut self) {
        let bounds = self.config.bounds;
        let Self {
            rng,
            prey,
            predators,
            ..
        } = self;

        let living = predators.len();

        for idx in 0..living {
            let hunter = &predators[idx];
            // Scanning the live prey list means a prey caught earlier this
            // phase can never be targeted or removed twice
            let quarry = nearest(
                hunter.x,
                hunter.y,
                prey.iter()
                    .enumerate()
                    .filter(|(_, p)| hunter.perceives(p, true))
                    .map(|(i, p)| (i, p.x, p.y)),
            );

            let hunter = &mut predators[idx];
            match quarry {
                Some((t, _)) => {
                    let (target_x, target_y) = (prey[t].x, prey[t].y);
                    hunter.move_towards(target_x, target_y, bounds);

                    let reach = (hunter.radius() + prey[t].radius()) as f64;
                    if hunter.distance_to(target_x, target_y) < reach {
                        hunter.feed(CAPTURE_ENERGY);
                        prey.remove(t);
                    }
                }
                None => wander(hunter, rng, bounds),
            }

            let offspring = predators[idx].reproduce(rng);
            if let Some(child) = offspring {
                predators.push(child);
            }
        }
    }

    /// Spawn founders until both floors are met. A single spawn per tick could
    /// leave a population below its floor after a tick with several deaths.
    fn enforce_population_floor(&mut self) {
        let bounds = self.config.bounds;
        let mut spawned_prey = 0;
        let mut spawned_predators = 0;

        while self.prey.len() < self.config.min_prey {
            self.prey
                .push(Agent::founder(Role::Prey, bounds, &mut self.rng));
            spawned_prey += 1;
        }
        while self.predators.len() < self.config.min_predators {
            self.predators
                .push(Agent::founder(Role::Predator, bounds, &mut self.rng));
            spawned_predators += 1;
        }

        if spawned_prey + spawned_predators > 0 {
            tracing::debug!(
                generation = self.generation,
                spawned_prey,
                spawned_predators,
                "population floor spawned founders"
            );
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.config.bounds
    }

    pub fn prey(&self) -> &[Agent] {
        &self.prey
    }

    pub fn predators(&self) -> &[Agent] {
        &self.predators
    }

    pub fn food(&self) -> &[Food] {
        &self.food
    }

    /// Number of ticks since creation or the last reset
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn max_prey(&self) -> usize {
        self.max_prey
    }

    pub fn max_predators(&self) -> usize {
        self.max_predators
    }

    /// Mean of each gene across living prey, `None` when there are none
    pub fn prey_trait_averages(&self) -> Option<TraitAverages> {
        TraitAverages::from_traits(self.prey.iter().map(Agent::traits))
    }

    pub fn stats(&self) -> WorldStats {
        WorldStats {
            generation: self.generation,
            prey: self.prey.len(),
            predators: self.predators.len(),
            food: self.food.len(),
            max_prey: self.max_prey,
            max_predators: self.max_predators,
            prey_traits: self.prey_trait_averages(),
        }
    }
}

/// Index and distance of the closest candidate; ties go to the earliest
fn nearest<I>(x: f64, y: f64, candidates: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = (usize, f64, f64)>,
{
    let mut best = None;
    let mut best_dist = f64::INFINITY;

    for (idx, cx, cy) in candidates {
        let dist = (cx - x).hypot(cy - y);
        if dist < best_dist {
            best_dist = dist;
            best = Some((idx, dist));
        }
    }

    best
}

/// Step toward a random point near the agent
fn wander<R: Rng>(agent: &mut Agent, rng: &mut R, bounds: Bounds) {
    let target_x = agent.x + rng.gen_range(-WANDER_OFFSET..=WANDER_OFFSET);
    let target_y = agent.y + rng.gen_range(-WANDER_OFFSET..=WANDER_OFFSET);
    agent.move_towards(target_x, target_y, bounds);
}

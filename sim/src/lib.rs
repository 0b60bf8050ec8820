pub mod agent;
pub mod config;
pub mod food;
pub mod world;

pub use agent::Agent;
pub use config::{Bounds, ConfigError, WorldConfig};
pub use food::Food;
pub use world::World;

use shared::WorldStats;

/// Run a world for a fixed number of ticks without rendering and report
/// where it ended up
pub fn run_headless(
    config: WorldConfig,
    ticks: u64,
    seed: Option<u64>,
) -> Result<WorldStats, ConfigError> {
    let mut world = match seed {
        Some(seed) => World::with_seed(config, seed)?,
        None => World::new(config)?,
    };

    for _ in 0..ticks {
        world.tick();
    }

    tracing::debug!(ticks, generation = world.generation(), "headless run finished");

    Ok(world.stats())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_run() {
        let stats = run_headless(WorldConfig::default(), 100, Some(8)).unwrap();

        assert_eq!(stats.generation, 100);
        assert!(stats.prey >= 5);
        assert!(stats.predators >= 2);
        assert!(stats.prey_traits.is_some());
    }

    #[test]
    fn test_headless_run_is_repeatable_with_seed() {
        let a = run_headless(WorldConfig::default(), 50, Some(99)).unwrap();
        let b = run_headless(WorldConfig::default(), 50, Some(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_headless_rejects_bad_config() {
        let config = WorldConfig {
            food_spawn_chance: -0.1,
            ..Default::default()
        };
        assert!(run_headless(config, 10, None).is_err());
    }
}

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Lower bound every gene is clamped to after creation or mutation
pub const TRAIT_MIN: f64 = 0.1;

/// Upper bound every gene is clamped to after creation or mutation
pub const TRAIT_MAX: f64 = 2.0;

/// Chance that a founder gene receives an extra perturbation
pub const FOUNDER_MUTATION_CHANCE: f64 = 0.2;

/// Magnitude of the founder perturbation
pub const FOUNDER_MUTATION_STEP: f64 = 0.2;

/// Magnitude of the perturbation applied when copying a parent's genes
pub const INHERIT_STEP: f64 = 0.1;

/// The named genes carried by every agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gene {
    Speed,
    Size,
    Camouflage,
}

impl Gene {
    pub const ALL: [Gene; 3] = [Gene::Speed, Gene::Size, Gene::Camouflage];

    pub fn name(self) -> &'static str {
        match self {
            Gene::Speed => "Speed",
            Gene::Size => "Size",
            Gene::Camouflage => "Camouflage",
        }
    }

    /// Range a founder's gene is drawn from before mutation
    fn founder_range(self) -> RangeInclusive<f64> {
        match self {
            Gene::Speed | Gene::Size => 0.5..=2.0,
            Gene::Camouflage => 0.0..=1.0,
        }
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The heritable trait vector of an agent.
///
/// Design Philosophy:
/// - Speed moves an agent further per tick but every step costs more energy
/// - Size widens an agent's own perception and its body, but makes movement dearer
/// - Camouflage shrinks the range at which predators notice a prey
///
/// Every value stays within [`TRAIT_MIN`, `TRAIT_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    pub speed: f64,
    pub size: f64,
    pub camouflage: f64,
}

impl Traits {
    /// Create a trait vector with specific values (clamped to the gene bounds)
    pub fn new(speed: f64, size: f64, camouflage: f64) -> Self {
        Self {
            speed: clamp_gene(speed),
            size: clamp_gene(size),
            camouflage: clamp_gene(camouflage),
        }
    }

    /// Draw a fresh trait vector for a founder.
    ///
    /// Each gene is drawn from its founder range, then independently nudged by
    /// up to [`FOUNDER_MUTATION_STEP`] with [`FOUNDER_MUTATION_CHANCE`].
    pub fn sample_founder<R: Rng>(rng: &mut R) -> Self {
        let mut traits = Self {
            speed: rng.gen_range(Gene::Speed.founder_range()),
            size: rng.gen_range(Gene::Size.founder_range()),
            camouflage: rng.gen_range(Gene::Camouflage.founder_range()),
        };

        for gene in Gene::ALL {
            let value = traits.get_mut(gene);
            if rng.gen::<f64>() < FOUNDER_MUTATION_CHANCE {
                *value += rng.gen_range(-FOUNDER_MUTATION_STEP..=FOUNDER_MUTATION_STEP);
            }
            // Camouflage can be drawn below TRAIT_MIN, so clamp even unmutated genes
            *value = clamp_gene(*value);
        }

        traits
    }

    /// Copy these genes for an offspring, perturbing each by up to [`INHERIT_STEP`]
    pub fn inherit<R: Rng>(&self, rng: &mut R) -> Self {
        let mut child = *self;
        for gene in Gene::ALL {
            let value = child.get_mut(gene);
            *value = clamp_gene(*value + rng.gen_range(-INHERIT_STEP..=INHERIT_STEP));
        }
        child
    }

    pub fn get(&self, gene: Gene) -> f64 {
        match gene {
            Gene::Speed => self.speed,
            Gene::Size => self.size,
            Gene::Camouflage => self.camouflage,
        }
    }

    fn get_mut(&mut self, gene: Gene) -> &mut f64 {
        match gene {
            Gene::Speed => &mut self.speed,
            Gene::Size => &mut self.size,
            Gene::Camouflage => &mut self.camouflage,
        }
    }

    /// Iterate genes in a fixed order
    pub fn iter(&self) -> impl Iterator<Item = (Gene, f64)> + '_ {
        Gene::ALL.into_iter().map(move |gene| (gene, self.get(gene)))
    }
}

impl Default for Traits {
    fn default() -> Self {
        Self {
            speed: 1.0,
            size: 1.0,
            camouflage: 0.5,
        }
    }
}

fn clamp_gene(value: f64) -> f64 {
    value.clamp(TRAIT_MIN, TRAIT_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn in_bounds(traits: &Traits) -> bool {
        traits
            .iter()
            .all(|(_, value)| (TRAIT_MIN..=TRAIT_MAX).contains(&value))
    }

    #[test]
    fn test_traits_clamping() {
        let traits = Traits::new(3.0, -1.0, 0.05);
        assert_eq!(traits.speed, TRAIT_MAX);
        assert_eq!(traits.size, TRAIT_MIN);
        assert_eq!(traits.camouflage, TRAIT_MIN);
    }

    #[test]
    fn test_iter_order_matches_gene_list() {
        let traits = Traits::new(1.5, 0.7, 0.3);
        let genes: Vec<_> = traits.iter().collect();
        assert_eq!(
            genes,
            vec![(Gene::Speed, 1.5), (Gene::Size, 0.7), (Gene::Camouflage, 0.3)]
        );
    }

    #[test]
    fn test_inherit_stays_close_to_parent() {
        let mut rng = StdRng::seed_from_u64(7);
        let parent = Traits::new(1.0, 1.0, 1.0);

        for _ in 0..200 {
            let child = parent.inherit(&mut rng);
            for (gene, value) in child.iter() {
                assert!(
                    (value - parent.get(gene)).abs() <= INHERIT_STEP + 1e-12,
                    "{gene} drifted too far: {value}"
                );
            }
        }
    }

    #[test]
    fn test_founders_vary() {
        let mut rng = StdRng::seed_from_u64(42);
        let a = Traits::sample_founder(&mut rng);
        let b = Traits::sample_founder(&mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_gene_names() {
        let names: Vec<_> = Gene::ALL.iter().map(|g| g.to_string()).collect();
        assert_eq!(names, vec!["Speed", "Size", "Camouflage"]);
    }

    proptest! {
        #[test]
        fn founder_traits_stay_in_bounds(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let traits = Traits::sample_founder(&mut rng);
            prop_assert!(in_bounds(&traits), "{traits:?}");
        }

        #[test]
        fn inherited_traits_stay_in_bounds(
            seed in any::<u64>(),
            speed in TRAIT_MIN..=TRAIT_MAX,
            size in TRAIT_MIN..=TRAIT_MAX,
            camouflage in TRAIT_MIN..=TRAIT_MAX,
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut traits = Traits::new(speed, size, camouflage);
            for _ in 0..20 {
                traits = traits.inherit(&mut rng);
                prop_assert!(in_bounds(&traits), "{traits:?}");
            }
        }
    }
}

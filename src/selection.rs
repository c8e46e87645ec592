//! Parent selection strategies.
//!
//! Each strategy picks one subject index from a scored population, optionally
//! excluding an index (so the second parent of a pair always differs from the
//! first). Precondition for every strategy: when `exclude` is set the
//! population must hold at least two subjects, otherwise the resampling in
//! [`random`] cannot terminate. The caller guards this; it is not checked at
//! runtime.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::subject::Subject;

/// The closed set of selection strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SelectionMethod {
    /// Highest fitness wins (seeded by a random pick; ties keep the pick
    /// scanned earliest).
    #[default]
    Best,
    /// Fitness-proportionate roulette wheel.
    Roulette,
    /// Uniform pick regardless of fitness.
    Random,
}

impl SelectionMethod {
    /// Apply this strategy, returning the selected subject's index.
    ///
    /// `total_fitness` is the population's fitness sum (only the roulette
    /// wheel consumes it).
    pub fn apply<R: Rng>(
        self,
        subjects: &[Subject],
        total_fitness: f32,
        exclude: Option<usize>,
        rng: &mut R,
    ) -> usize {
        match self {
            Self::Best => best(subjects, exclude, rng),
            Self::Roulette => roulette(subjects, total_fitness, exclude, rng),
            Self::Random => random(subjects, exclude, rng),
        }
    }
}

/// Uniform selection: draw indices until one differs from `exclude`.
pub fn random<R: Rng>(subjects: &[Subject], exclude: Option<usize>, rng: &mut R) -> usize {
    loop {
        let index = rng.random_range(0..subjects.len());
        if Some(index) != exclude {
            return index;
        }
    }
}

/// Best selection: start from a random pick, then keep the highest-fitness
/// subject that differs from `exclude`.
///
/// Only strictly greater fitness replaces the held pick, so among equal-best
/// subjects the one encountered first in scan order wins.
pub fn best<R: Rng>(subjects: &[Subject], exclude: Option<usize>, rng: &mut R) -> usize {
    let mut result = random(subjects, exclude, rng);
    for (index, subject) in subjects.iter().enumerate() {
        if Some(index) != exclude && subject.fitness() > subjects[result].fitness() {
            result = index;
        }
    }
    result
}

/// Roulette-wheel selection: a slice of the total fitness is drawn and the
/// population is scanned in order, accumulating fitness; the result is the
/// last subject whose running sum has reached the slice and that differs
/// from `exclude`.
///
/// Excluded subjects still contribute their fitness to the running sum; they
/// are only skipped as result candidates. The random starting pick makes the
/// strategy total even when the fitness sum is zero or negative (the scan
/// then never updates and the fallback pick is returned).
pub fn roulette<R: Rng>(
    subjects: &[Subject],
    total_fitness: f32,
    exclude: Option<usize>,
    rng: &mut R,
) -> usize {
    let mut result = random(subjects, exclude, rng);
    let slice = rng.random::<f32>() * total_fitness;
    let mut partial_sum = 0.0;
    for (index, subject) in subjects.iter().enumerate() {
        partial_sum += subject.fitness();
        if partial_sum >= slice && Some(index) != exclude {
            result = index;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::topology::LayerTopology;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    /// A population whose subject at index `i` has fitness `fitnesses[i]`.
    fn scored_population(fitnesses: &[f32]) -> Vec<Subject> {
        let topology = LayerTopology::parse("11", "s").unwrap();
        let mut rng = test_rng();
        fitnesses
            .iter()
            .map(|&f| {
                let mut subject = Subject::random(topology.clone(), &mut rng);
                subject.reward(f);
                subject
            })
            .collect()
    }

    #[test]
    fn test_random_never_returns_excluded() {
        let population = scored_population(&[1.0, 2.0]);
        let mut rng = test_rng();
        for _ in 0..100 {
            assert_eq!(random(&population, Some(0), &mut rng), 1);
        }
    }

    #[test]
    fn test_best_returns_max() {
        let population = scored_population(&[1.0, 5.0, 3.0, 2.0]);
        let mut rng = test_rng();
        for _ in 0..20 {
            assert_eq!(best(&population, None, &mut rng), 1);
        }
    }

    #[test]
    fn test_best_respects_exclusion() {
        let population = scored_population(&[1.0, 5.0, 3.0, 2.0]);
        let mut rng = test_rng();
        for _ in 0..20 {
            // With the best excluded, the runner-up must win.
            assert_eq!(best(&population, Some(1), &mut rng), 2);
        }
    }

    #[test]
    fn test_roulette_favors_dominant_fitness() {
        let population = scored_population(&[1000.0, 1.0, 1.0, 1.0]);
        let total: f32 = population.iter().map(Subject::fitness).sum();
        let mut rng = test_rng();

        let trials = 500;
        let dominant_hits = (0..trials)
            .filter(|_| roulette(&population, total, None, &mut rng) == 0)
            .count();
        // Statistical: the dominant subject holds ~99.7% of the wheel.
        assert!(dominant_hits as f32 / trials as f32 > 0.9);
    }

    #[test]
    fn test_roulette_zero_total_still_selects() {
        let population = scored_population(&[0.0, 0.0, 0.0]);
        let mut rng = test_rng();
        for _ in 0..50 {
            let index = roulette(&population, 0.0, Some(1), &mut rng);
            assert!(index < population.len());
            assert_ne!(index, 1);
        }
    }

    #[test]
    fn test_roulette_never_returns_excluded() {
        let population = scored_population(&[1.0, 100.0, 1.0]);
        let total: f32 = population.iter().map(Subject::fitness).sum();
        let mut rng = test_rng();
        for _ in 0..200 {
            assert_ne!(roulette(&population, total, Some(1), &mut rng), 1);
        }
    }

    #[test]
    fn test_method_dispatch() {
        let population = scored_population(&[1.0, 5.0, 3.0]);
        let total: f32 = population.iter().map(Subject::fitness).sum();
        let mut rng = test_rng();
        assert_eq!(
            SelectionMethod::Best.apply(&population, total, None, &mut rng),
            1
        );
        let index = SelectionMethod::Random.apply(&population, total, Some(2), &mut rng);
        assert_ne!(index, 2);
    }
}

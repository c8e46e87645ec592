//! Population and generation management.
//!
//! [`Population`] owns the subjects of the current generation and drives the
//! generational loop: an external simulation host ticks every subject until
//! all of them are inactive, then [`Population::epoch`] breeds the next
//! generation via selection, crossover and mutation and replaces the old one
//! wholesale. There is no terminal state; evolution runs until the driver
//! stops calling, and the population is fully consistent at the boundary
//! between "all inactive" and "epoch complete".
//!
//! All randomness flows through one seedable [`ChaCha8Rng`] owned by the
//! population, so a fixed seed reproduces an experiment exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::crossover::CrossoverMethod;
use crate::genome::Genome;
use crate::mutation::MutationMethod;
use crate::selection::SelectionMethod;
use crate::subject::Subject;
use crate::topology::{LayerTopology, TopologyError};

/// Configuration for an evolution experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Number of subjects per generation. Must be positive; an odd size
    /// breeds up to the next even count, since reproduction yields pairs.
    pub population_size: usize,
    /// Probability in `[0, 1]` that a parent pair is recombined (one draw
    /// per pair; otherwise both genomes are cloned unchanged).
    pub crossover_rate: f32,
    /// Probability in `[0, 1]` that an offspring genome is mutated (one
    /// draw per genome).
    pub mutation_rate: f32,
    /// Parameter handed to the mutation operator: shift magnitude for
    /// `Perturb`, per-element probability for `Invert` and `Randomize`.
    pub mutation_magnitude: f32,
    /// Recombination operator.
    pub crossover_method: CrossoverMethod,
    /// Mutation operator.
    pub mutation_method: MutationMethod,
    /// Parent selection strategy.
    pub selection_method: SelectionMethod,
    /// Neuron-count topology string (one digit per layer).
    pub neuron_topology: String,
    /// Activation-code topology string (one code per non-input layer).
    pub activation_topology: String,
    /// Seed for the population's RNG.
    pub seed: u64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            mutation_magnitude: 0.1,
            crossover_method: CrossoverMethod::SinglePoint,
            mutation_method: MutationMethod::Perturb,
            selection_method: SelectionMethod::Roulette,
            neuron_topology: "452".to_string(),
            activation_topology: "tt".to_string(),
            seed: 0,
        }
    }
}

/// Per-epoch observability snapshot, describing the generation that just
/// finished evaluating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// The generation counter AFTER the epoch (the generation now running).
    pub generation: u32,
    /// Average fitness of the completed generation.
    pub average_fitness: f32,
    /// Best fitness of the completed generation.
    pub best_fitness: f32,
}

/// The environment seam: advances simulated time for a generation.
///
/// An implementation reads each active subject's sensors, feeds them through
/// [`Subject::actuate`], applies the outputs to its simulated body, rewards
/// the subject, and deactivates it once it fails the task. The host must
/// eventually deactivate every subject or [`Population::run_generation`]
/// will not return.
pub trait SimulationHost {
    /// Advance the simulation by one tick for all subjects.
    fn advance(&mut self, subjects: &mut [Subject]);
}

/// A generation of subjects plus everything needed to breed the next one.
pub struct Population {
    config: EvolutionConfig,
    topology: LayerTopology,
    subjects: Vec<Subject>,
    total_fitness: f32,
    best_fitness: f32,
    best_genome: Option<Genome>,
    generation: u32,
    rng: ChaCha8Rng,
}

impl Population {
    /// Create generation 0: `population_size` subjects with independent
    /// random genomes sharing one parsed topology.
    ///
    /// # Errors
    ///
    /// Returns a [`TopologyError`] when the configured topology strings do
    /// not parse.
    pub fn new(config: EvolutionConfig) -> Result<Self, TopologyError> {
        let topology =
            LayerTopology::parse(&config.neuron_topology, &config.activation_topology)?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let subjects = (0..config.population_size)
            .map(|_| Subject::random(topology.clone(), &mut rng))
            .collect();

        Ok(Self {
            config,
            topology,
            subjects,
            total_fitness: 0.0,
            best_fitness: 0.0,
            best_genome: None,
            generation: 0,
            rng,
        })
    }

    /// Whether every subject has finished evaluating. The epoch may only run
    /// once this returns `true`.
    #[must_use]
    pub fn evaluation_done(&self) -> bool {
        self.subjects.iter().all(|subject| !subject.is_active())
    }

    /// Recompute the completed generation's statistics: total fitness, and
    /// best fitness/genome (the first subject seeds the best, strictly
    /// greater fitness replaces it). The best genome is snapshotted by value
    /// so it survives the population replacement in [`epoch`](Self::epoch).
    pub fn record_fitness(&mut self) {
        let Some(first) = self.subjects.first() else {
            return;
        };

        self.total_fitness = 0.0;
        self.best_fitness = first.fitness();
        self.best_genome = Some(first.genome().clone());
        for subject in &self.subjects {
            self.total_fitness += subject.fitness();
            if subject.fitness() > self.best_fitness {
                self.best_fitness = subject.fitness();
                self.best_genome = Some(subject.genome().clone());
            }
        }
    }

    /// Breed the next generation and replace the current one.
    ///
    /// Precondition: all subjects are inactive (see
    /// [`evaluation_done`](Self::evaluation_done)); fitness totals are
    /// recorded here before any breeding draw. Parent pairs are selected with
    /// the configured strategy (the second parent always excludes the first),
    /// recombined with probability `crossover_rate` (one draw per pair,
    /// otherwise cloned), and each offspring genome is mutated with
    /// probability `mutation_rate` (one draw per genome). Offspring are built
    /// from each parent's topology. The old subjects and their networks are
    /// dropped wholesale.
    ///
    /// Returns the stats of the completed generation, stamped with the new
    /// generation number.
    pub fn epoch(&mut self) -> GenerationStats {
        debug_assert!(self.evaluation_done());
        self.record_fitness();

        let completed_average = if self.subjects.is_empty() {
            0.0
        } else {
            self.total_fitness / self.subjects.len() as f32
        };
        let completed_best = self.best_fitness;

        // Breeding two at a time rounds an odd population size up to even.
        let mut next = Vec::with_capacity(self.subjects.len() + 1);
        while next.len() < self.subjects.len() {
            let parent0 = self.config.selection_method.apply(
                &self.subjects,
                self.total_fitness,
                None,
                &mut self.rng,
            );
            let parent1 = self.config.selection_method.apply(
                &self.subjects,
                self.total_fitness,
                Some(parent0),
                &mut self.rng,
            );
            let parent0 = &self.subjects[parent0];
            let parent1 = &self.subjects[parent1];

            let (mut genome0, mut genome1) =
                if self.rng.random::<f32>() <= self.config.crossover_rate {
                    self.config
                        .crossover_method
                        .apply(parent0.genome(), parent1.genome(), &mut self.rng)
                } else {
                    (parent0.genome().clone(), parent1.genome().clone())
                };

            if self.rng.random::<f32>() <= self.config.mutation_rate {
                genome0 = self.config.mutation_method.apply(
                    &genome0,
                    self.config.mutation_magnitude,
                    &mut self.rng,
                );
            }
            if self.rng.random::<f32>() <= self.config.mutation_rate {
                genome1 = self.config.mutation_method.apply(
                    &genome1,
                    self.config.mutation_magnitude,
                    &mut self.rng,
                );
            }

            next.push(
                Subject::from_genome(parent0.topology().clone(), genome0)
                    .expect("offspring genome length matches parent topology"),
            );
            next.push(
                Subject::from_genome(parent1.topology().clone(), genome1)
                    .expect("offspring genome length matches parent topology"),
            );
        }

        self.subjects = next;
        self.generation += 1;

        GenerationStats {
            generation: self.generation,
            average_fitness: completed_average,
            best_fitness: completed_best,
        }
    }

    /// Tick the host until every subject is inactive, then run the epoch.
    pub fn run_generation<H: SimulationHost>(&mut self, host: &mut H) -> GenerationStats {
        while !self.evaluation_done() {
            host.advance(&mut self.subjects);
        }
        self.epoch()
    }

    /// Build a fresh subject from the best genome of the last recorded
    /// generation, for replaying the champion outside the evolving
    /// population.
    #[must_use]
    pub fn champion(&self) -> Option<Subject> {
        self.best_genome.as_ref().map(|genome| {
            Subject::from_genome(self.topology.clone(), genome.clone())
                .expect("champion genome length matches population topology")
        })
    }

    /// The generation counter (0 for the initial population).
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Best fitness recorded by the last [`record_fitness`](Self::record_fitness).
    #[must_use]
    pub fn best_fitness(&self) -> f32 {
        self.best_fitness
    }

    /// Snapshot of the best genome from the last recorded generation.
    #[must_use]
    pub fn best_genome(&self) -> Option<&Genome> {
        self.best_genome.as_ref()
    }

    /// Fitness sum recorded by the last [`record_fitness`](Self::record_fitness).
    #[must_use]
    pub fn total_fitness(&self) -> f32 {
        self.total_fitness
    }

    /// The current generation's subjects.
    #[must_use]
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Mutable access for the simulation host driving evaluation.
    pub fn subjects_mut(&mut self) -> &mut [Subject] {
        &mut self.subjects
    }

    /// The shared parsed topology.
    #[must_use]
    pub fn topology(&self) -> &LayerTopology {
        &self.topology
    }

    /// The experiment configuration.
    #[must_use]
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EvolutionConfig {
        EvolutionConfig {
            population_size: 4,
            neuron_topology: "221".to_string(),
            activation_topology: "ss".to_string(),
            seed: 42,
            ..EvolutionConfig::default()
        }
    }

    /// Score the subjects with the given fitnesses and end evaluation.
    fn finish_generation(population: &mut Population, fitnesses: &[f32]) {
        for (subject, &fitness) in population.subjects_mut().iter_mut().zip(fitnesses) {
            subject.reward(fitness);
            subject.deactivate();
        }
    }

    #[test]
    fn test_new_population() {
        let population = Population::new(config()).unwrap();
        assert_eq!(population.subjects().len(), 4);
        assert_eq!(population.generation(), 0);
        assert!(!population.evaluation_done());
        assert!(population.champion().is_none());
        for subject in population.subjects() {
            assert_eq!(subject.genome().len(), 9);
        }
    }

    #[test]
    fn test_invalid_topology_rejected() {
        let bad = EvolutionConfig {
            neuron_topology: "2x1".to_string(),
            ..config()
        };
        assert!(Population::new(bad).is_err());
    }

    #[test]
    fn test_record_fitness_tracks_best() {
        let mut population = Population::new(config()).unwrap();
        finish_generation(&mut population, &[1.0, 4.0, 2.0, 3.0]);
        population.record_fitness();

        assert!((population.total_fitness() - 10.0).abs() < 1e-6);
        assert!((population.best_fitness() - 4.0).abs() < 1e-6);
        assert_eq!(
            population.best_genome().unwrap(),
            population.subjects()[1].genome()
        );
    }

    #[test]
    fn test_epoch_replaces_population() {
        let mut population = Population::new(config()).unwrap();
        finish_generation(&mut population, &[1.0, 4.0, 2.0, 3.0]);
        let stats = population.epoch();

        assert_eq!(stats.generation, 1);
        assert!((stats.average_fitness - 2.5).abs() < 1e-6);
        assert!((stats.best_fitness - 4.0).abs() < 1e-6);
        assert_eq!(population.generation(), 1);
        assert_eq!(population.subjects().len(), 4);
        // The new generation starts unevaluated.
        for subject in population.subjects() {
            assert!(subject.is_active());
            assert_eq!(subject.fitness(), 0.0);
        }
    }

    #[test]
    fn test_odd_population_breeds_up_to_even() {
        let odd = EvolutionConfig {
            population_size: 5,
            ..config()
        };
        let mut population = Population::new(odd).unwrap();
        assert_eq!(population.subjects().len(), 5);
        finish_generation(&mut population, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        population.epoch();
        assert_eq!(population.subjects().len(), 6);
    }

    #[test]
    fn test_best_selection_breeds_top_two_unmutated() {
        let elitist = EvolutionConfig {
            crossover_rate: 1.0,
            mutation_rate: 0.0,
            selection_method: SelectionMethod::Best,
            ..config()
        };
        let mut population = Population::new(elitist).unwrap();
        finish_generation(&mut population, &[1.0, 4.0, 2.0, 3.0]);

        // Best selection always pairs the two fittest subjects.
        let top = population.subjects()[1].genome().clone();
        let runner_up = population.subjects()[3].genome().clone();
        population.epoch();

        for subject in population.subjects() {
            for (i, &weight) in subject.genome().iter().enumerate() {
                assert!(
                    weight == top[i] || weight == runner_up[i],
                    "offspring weight {i} is not inherited from the top two parents"
                );
            }
        }
    }

    #[test]
    fn test_no_crossover_no_mutation_clones_parents() {
        let cloning = EvolutionConfig {
            crossover_rate: 0.0,
            mutation_rate: 0.0,
            ..config()
        };
        let mut population = Population::new(cloning).unwrap();
        finish_generation(&mut population, &[1.0, 4.0, 2.0, 3.0]);

        let old_genomes: Vec<Genome> =
            population.subjects().iter().map(|s| s.genome().clone()).collect();
        population.epoch();

        for subject in population.subjects() {
            assert!(old_genomes.contains(subject.genome()));
        }
    }

    #[test]
    fn test_champion_survives_replacement() {
        let mut population = Population::new(config()).unwrap();
        finish_generation(&mut population, &[1.0, 4.0, 2.0, 3.0]);
        population.record_fitness();
        let best = population.best_genome().unwrap().clone();

        population.epoch();
        // The snapshot is a value copy, untouched by the replacement.
        assert_eq!(population.best_genome().unwrap(), &best);

        let champion = population.champion().unwrap();
        assert_eq!(champion.genome(), &best);
        assert!(champion.is_active());
    }

    #[test]
    fn test_seeded_runs_reproduce_exactly() {
        let mut a = Population::new(config()).unwrap();
        let mut b = Population::new(config()).unwrap();
        for round in 0..3 {
            let fitnesses: Vec<f32> = (0..4).map(|i| (i + round) as f32).collect();
            finish_generation(&mut a, &fitnesses);
            finish_generation(&mut b, &fitnesses);
            a.epoch();
            b.epoch();
        }
        for (left, right) in a.subjects().iter().zip(b.subjects()) {
            assert_eq!(left.genome(), right.genome());
        }
    }

    #[test]
    fn test_run_generation_drives_host() {
        struct CountdownHost {
            ticks_left: u32,
        }
        impl SimulationHost for CountdownHost {
            fn advance(&mut self, subjects: &mut [Subject]) {
                for subject in subjects.iter_mut() {
                    subject.reward(1.0);
                }
                self.ticks_left -= 1;
                if self.ticks_left == 0 {
                    for subject in subjects.iter_mut() {
                        subject.deactivate();
                    }
                }
            }
        }

        let mut population = Population::new(config()).unwrap();
        let mut host = CountdownHost { ticks_left: 7 };
        let stats = population.run_generation(&mut host);

        assert_eq!(stats.generation, 1);
        assert!((stats.average_fitness - 7.0).abs() < 1e-6);
        assert!((stats.best_fitness - 7.0).abs() < 1e-6);
    }
}

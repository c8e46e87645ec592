//! Cart-pole balancing via neuroevolution.
//!
//! Each subject controls a cart on a finite track with a pole hinged on top.
//! The controller reads four sensors (cart position, cart velocity, pole
//! angle, pole angular velocity) and pushes the cart left or right. A subject
//! fails when the pole tips past the angular limit or the cart runs off the
//! track; fitness rewards both survival time and keeping the pole upright.
//!
//! Run with: `cargo run --example cartpole`

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use evonet::{
    CrossoverMethod, EvolutionConfig, MutationMethod, Population, SelectionMethod, SimulationHost,
    Subject,
};

const GRAVITY: f32 = 9.8;
const CART_MASS: f32 = 1.0;
const POLE_MASS: f32 = 0.1;
const POLE_HALF_LENGTH: f32 = 0.5;
const MOTOR_FORCE: f32 = 10.0;
const TRACK_LIMIT: f32 = 6.0;
const ANGLE_LIMIT_RAD: f32 = 45.0 * std::f32::consts::PI / 180.0;
const TIME_STEP: f32 = 0.02;
const MAX_TICKS: u32 = 1000;

const TIME_EMPHASIS: f32 = 1.0;
const BALANCE_EMPHASIS: f32 = 1.0;

/// One cart-pole rig.
#[derive(Clone, Copy)]
struct Cart {
    position: f32,
    velocity: f32,
    angle: f32,
    angular_velocity: f32,
}

impl Cart {
    /// A fresh cart with a small random pole tilt so that doing nothing is
    /// never a winning strategy.
    fn reset<R: Rng>(rng: &mut R) -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            angle: (rng.random::<f32>() * 2.0 - 1.0) * 0.1,
            angular_velocity: 0.0,
        }
    }

    fn failed(&self) -> bool {
        self.angle.abs() > ANGLE_LIMIT_RAD || self.position.abs() >= TRACK_LIMIT
    }

    /// Semi-implicit Euler step of the standard cart-pole dynamics.
    fn step(&mut self, force: f32) {
        let total_mass = CART_MASS + POLE_MASS;
        let (sin, cos) = self.angle.sin_cos();

        let temp = (force
            + POLE_MASS * POLE_HALF_LENGTH * self.angular_velocity.powi(2) * sin)
            / total_mass;
        let angular_accel = (GRAVITY * sin - cos * temp)
            / (POLE_HALF_LENGTH * (4.0 / 3.0 - POLE_MASS * cos.powi(2) / total_mass));
        let linear_accel =
            temp - POLE_MASS * POLE_HALF_LENGTH * angular_accel * cos / total_mass;

        self.velocity += linear_accel * TIME_STEP;
        self.position += self.velocity * TIME_STEP;
        self.angular_velocity += angular_accel * TIME_STEP;
        self.angle += self.angular_velocity * TIME_STEP;
    }

    fn sensors(&self) -> [f32; 4] {
        [
            self.position,
            self.velocity * 0.1,
            self.angle.sin() * 2.0,
            self.angular_velocity * 0.1,
        ]
    }
}

/// Simulation host: one cart per subject, reset every generation.
struct CartPoleHost {
    carts: Vec<Cart>,
    ticks: u32,
    rng: ChaCha8Rng,
}

impl CartPoleHost {
    fn new(population_size: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let carts = (0..population_size).map(|_| Cart::reset(&mut rng)).collect();
        Self { carts, ticks: 0, rng }
    }

    fn reset(&mut self, population_size: usize) {
        self.carts = (0..population_size)
            .map(|_| Cart::reset(&mut self.rng))
            .collect();
        self.ticks = 0;
    }
}

impl SimulationHost for CartPoleHost {
    fn advance(&mut self, subjects: &mut [Subject]) {
        self.ticks += 1;
        let out_of_time = self.ticks >= MAX_TICKS;

        for (subject, cart) in subjects.iter_mut().zip(&mut self.carts) {
            if !subject.is_active() {
                continue;
            }
            if cart.failed() || out_of_time {
                subject.deactivate();
                continue;
            }

            let outputs = subject
                .actuate(&cart.sensors())
                .expect("sensor width matches the configured topology");
            // Two motor outputs push against each other.
            let force = (outputs[1] - outputs[0]) * MOTOR_FORCE;
            cart.step(force);

            subject.reward(TIME_STEP * TIME_EMPHASIS);
            subject.reward(cart.angle.cos() * BALANCE_EMPHASIS);
        }
    }
}

/// Replay a single subject on a fresh cart and report how long it balances.
fn replay(subject: &Subject, rng: &mut ChaCha8Rng) -> u32 {
    let mut cart = Cart::reset(rng);
    let mut ticks = 0;
    while !cart.failed() && ticks < MAX_TICKS {
        let outputs = subject
            .actuate(&cart.sensors())
            .expect("sensor width matches the configured topology");
        let force = (outputs[1] - outputs[0]) * MOTOR_FORCE;
        cart.step(force);
        ticks += 1;
    }
    ticks
}

fn main() {
    println!("Cart-Pole Neuroevolution");
    println!("========================\n");

    let config = EvolutionConfig {
        population_size: 30,
        crossover_rate: 0.8,
        mutation_rate: 0.2,
        mutation_magnitude: 0.25,
        crossover_method: CrossoverMethod::SinglePoint,
        mutation_method: MutationMethod::Perturb,
        selection_method: SelectionMethod::Roulette,
        neuron_topology: "452".to_string(),
        activation_topology: "tt".to_string(),
        seed: 42,
    };
    let generations = 50;

    println!("Population: {}", config.population_size);
    println!(
        "Topology: {} / {}",
        config.neuron_topology, config.activation_topology
    );
    println!("Generations: {}\n", generations);

    let mut population = Population::new(config.clone()).expect("topology strings parse");
    let mut host = CartPoleHost::new(config.population_size, config.seed);

    for _ in 0..generations {
        let stats = population.run_generation(&mut host);
        println!(
            "Gen {:3}: best={:8.3}, avg={:8.3}",
            stats.generation, stats.best_fitness, stats.average_fitness
        );
        host.reset(population.subjects().len());
    }

    println!("\nEvolution Complete!");
    println!("===================");
    println!("Best fitness: {:.3}", population.best_fitness());

    if let Some(champion) = population.champion() {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed ^ 0xC0FFEE);
        println!("\nChampion replays (fresh random tilts):");
        for run in 1..=3 {
            let ticks = replay(&champion, &mut rng);
            let seconds = ticks as f32 * TIME_STEP;
            let status = if ticks >= MAX_TICKS { "survived" } else { "fell" };
            println!("  run {run}: {seconds:6.2}s balanced ({status})");
        }
    }
}

//! Generational genetic algorithm over policy tables.
//!
//! Each generation runs the same cycle:
//!
//! 1. **Selection + reproduction**: sample distinct parent pairs with
//!    probability proportional to the previous fitness, cross them over and
//!    mutate the child, until the new population is full.
//! 2. **Evaluation**: every child plays one episode in its own freshly
//!    generated world; the normalized reward becomes its fitness.
//! 3. **Replacement**: children and scores replace the old population as a
//!    whole.
//! 4. **Reporting**: a [`GenerationReport`] carries the best fitness out.
//!
//! # Module Structure
//!
//! - [`selection`] - Roulette-wheel parent sampling
//! - [`report`] - Progress reports and the [`ProgressSink`] trait

pub mod report;
pub mod selection;

#[cfg(test)]
mod tests;

pub use report::{GenerationReport, ProgressSink};
pub use selection::RouletteWheel;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::EvolutionConfig;
use crate::error::ContractError;
use crate::genome::Genome;
use crate::simulator::Simulator;
use crate::world::GridWorld;

/// Genomes paired index-by-index with their fitness scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    genomes: Vec<Genome>,
    scores: Vec<f64>,
}

impl Population {
    /// Pairs genomes with scores. Both must have the same length.
    pub fn new(genomes: Vec<Genome>, scores: Vec<f64>) -> Result<Self, ContractError> {
        if genomes.len() != scores.len() {
            return Err(ContractError::LengthMismatch {
                genomes: genomes.len(),
                scores: scores.len(),
            });
        }
        Ok(Self { genomes, scores })
    }

    /// Creates `size` random genomes, each weighted `1 / size`.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let genomes = (0..size).map(|_| Genome::create_random(&mut *rng)).collect();
        let weight = 1.0 / size as f64;
        Self {
            genomes,
            scores: vec![weight; size],
        }
    }

    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Index, genome and score of the fittest member (first one on ties).
    pub fn best(&self) -> Option<(usize, &Genome, f64)> {
        self.scores
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &score)| match best {
                Some((_, top)) if top >= score => best,
                _ => Some((i, score)),
            })
            .map(|(i, score)| (i, &self.genomes[i], score))
    }

    /// Mean score, or 0 for an empty population.
    pub fn mean_score(&self) -> f64 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.scores.iter().sum::<f64>() / self.scores.len() as f64
        }
    }
}

/// Drives the generational loop.
///
/// # Lifecycle
///
/// 1. Build with [`Evolver::new`] (validates the configuration and seeds the
///    random stream).
/// 2. Call [`Evolver::step`] once per generation, or [`Evolver::run`] to run
///    the configured number of generations.
/// 3. Inspect [`Evolver::population`] for the final genomes.
#[derive(Debug)]
pub struct Evolver {
    config: EvolutionConfig,
    simulator: Simulator,
    population: Population,
    generation: u64,
    /// Single random stream shared by every draw of the run.
    rng: StdRng,
}

impl Evolver {
    /// Creates an evolver with a random initial population.
    pub fn new(config: EvolutionConfig) -> Result<Self, ContractError> {
        config.validate()?;
        let mut rng = seeded_rng(config.seed);
        let population = Population::random(config.population_size, &mut rng);
        Ok(Self::from_parts(config, population, rng))
    }

    /// Creates an evolver starting from an existing population.
    ///
    /// The population's size overrides `config.population_size`.
    pub fn with_population(
        mut config: EvolutionConfig,
        population: Population,
    ) -> Result<Self, ContractError> {
        config.population_size = population.len();
        config.validate()?;
        let rng = seeded_rng(config.seed);
        Ok(Self::from_parts(config, population, rng))
    }

    fn from_parts(config: EvolutionConfig, population: Population, rng: StdRng) -> Self {
        info!(
            population = config.population_size,
            mutations = config.mutation_count,
            fill_rate = config.fill_rate,
            "initialized population"
        );
        Self {
            simulator: Simulator::new(config.rewards),
            config,
            population,
            generation: 0,
            rng,
        }
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Number of generations completed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Produces a full generation of mutated children from the current one.
    pub fn breed(&mut self) -> Result<Vec<Genome>, ContractError> {
        let wheel = RouletteWheel::new(self.population.scores())?;
        let size = self.population.len();
        let mut children = Vec::with_capacity(size);
        while children.len() < size {
            let (a, b) = wheel.sample_pair(&mut self.rng);
            let genomes = self.population.genomes();
            let mut child = Genome::crossover(&genomes[a], &genomes[b], &mut self.rng);
            child.mutate(self.config.mutation_count, &mut self.rng)?;
            children.push(child);
        }
        Ok(children)
    }

    /// Plays one episode in a fresh world and returns the normalized fitness.
    pub fn evaluate(&mut self, genome: &Genome) -> Result<f64, ContractError> {
        let mut world = GridWorld::create_random(self.config.fill_rate, &mut self.rng)?;
        let items = world.remaining_item_count();
        let reward =
            self.simulator
                .simulate(genome, &mut world, self.config.max_steps, &mut self.rng)?;
        Ok(self.simulator.rewards().fitness(reward, items))
    }

    /// Breeds, evaluates and replaces one generation.
    pub fn step(&mut self) -> Result<GenerationReport, ContractError> {
        let children = self.breed()?;
        let scores = children
            .iter()
            .map(|child| self.evaluate(child))
            .collect::<Result<Vec<_>, _>>()?;
        self.population = Population::new(children, scores)?;

        let (best_index, _, best_fitness) = self
            .population
            .best()
            .ok_or(ContractError::PopulationTooSmall(0))?;
        let report = GenerationReport {
            generation: self.generation,
            best_fitness,
            mean_fitness: self.population.mean_score(),
            best_index,
        };
        debug!(
            generation = report.generation,
            best = report.best_fitness,
            mean = report.mean_fitness,
            "generation evaluated"
        );
        self.generation += 1;
        Ok(report)
    }

    /// Runs the configured number of generations, feeding every report to
    /// `sink`. Returns the last report, if any generation ran.
    pub fn run(
        &mut self,
        sink: &mut dyn ProgressSink,
    ) -> Result<Option<GenerationReport>, ContractError> {
        self.run_for(self.config.generations, sink)
    }

    /// Runs `generations` more generations.
    pub fn run_for(
        &mut self,
        generations: u64,
        sink: &mut dyn ProgressSink,
    ) -> Result<Option<GenerationReport>, ContractError> {
        let mut last = None;
        for _ in 0..generations {
            let report = self.step()?;
            sink.record(&report);
            last = Some(report);
        }
        Ok(last)
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

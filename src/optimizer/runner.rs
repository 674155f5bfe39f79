use super::{
    compute_affinity, evaluate_clones, evaluate_fitness, fittest, generate_population,
    select_best, StrategySet,
};
use crate::antibody::Antibody;
use crate::config::Config;
use crate::error::{AisError, AisResult};
use crate::families::Families;
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct OptimizationOptions {
    pub population_size: usize,
    pub n_generations: usize,
    /// 0 lets rayon pick the thread count.
    pub num_threads: usize,
    pub seed: Option<u64>,
}

impl From<&Config> for OptimizationOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            population_size: cfg.search.population_size,
            n_generations: cfg.search.n_generations,
            num_threads: cfg.search.num_threads,
            seed: cfg.search.seed,
        }
    }
}

/// Values reported after each generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    /// Best and mean fitness of the population entering the generation.
    pub best_fitness: f64,
    pub avg_fitness: f64,
    /// Best fitness right after parents and clones were merged.
    pub merged_best_fitness: f64,
    pub avg_affinity: f64,
    pub accepted_moves: usize,
    pub survivors: usize,
    pub replenished: usize,
}

/// Receives per-generation progress. Called on the engine's thread.
pub trait ProgressCallback: Send + Sync {
    fn on_generation(&self, stats: &GenerationStats);
}

pub struct NoopProgress;
impl ProgressCallback for NoopProgress {
    fn on_generation(&self, _stats: &GenerationStats) {}
}

/// Forwards progress to the `tracing` subscriber.
pub struct TracingProgress;
impl ProgressCallback for TracingProgress {
    fn on_generation(&self, s: &GenerationStats) {
        info!(
            "Gen {:5} | Best: {:.2} | Avg: {:.2} | Merged: {:.2} | Affinity: {:.1} | Kept: {}",
            s.generation + 1,
            s.best_fitness,
            s.avg_fitness,
            s.merged_best_fitness,
            s.avg_affinity,
            s.survivors
        );
    }
}

pub struct OptimizationResult {
    /// Final population, every member scored and with fresh affinity.
    pub population: Vec<Antibody>,
    /// Lowest-fitness antibody seen during the run.
    pub best: Antibody,
    pub history: Vec<GenerationStats>,
}

pub struct Optimizer {
    families: Arc<Families>,
    strategies: StrategySet,
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(
        families: Arc<Families>,
        strategies: StrategySet,
        options: OptimizationOptions,
    ) -> Self {
        Self {
            families,
            strategies,
            options,
        }
    }

    pub fn from_config(families: Arc<Families>, cfg: &Config) -> AisResult<Self> {
        let strategies = StrategySet::from_config(cfg)?;
        Ok(Self::new(families, strategies, OptimizationOptions::from(cfg)))
    }

    /// Runs exactly `n_generations` generations inside a dedicated pool.
    pub fn optimize<CB: ProgressCallback>(&self, callback: CB) -> AisResult<OptimizationResult> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if self.options.num_threads > 0 {
            builder = builder.num_threads(self.options.num_threads);
        }
        let pool = builder.build()?;

        let mut rng = if let Some(s) = self.options.seed {
            Rng::with_seed(s)
        } else {
            Rng::new()
        };

        pool.install(|| self.run(&callback, &mut rng))
    }

    fn run<CB: ProgressCallback>(&self, callback: &CB, rng: &mut Rng) -> AisResult<OptimizationResult> {
        let families = self.families.as_ref();
        let target = self.options.population_size;
        let StrategySet {
            clonator,
            mutator,
            selector,
        } = &self.strategies;

        // 1. Initializing
        info!("Generating initial population of {}", target);
        let mut population = generate_population(families, target, rng)?;
        evaluate_fitness(&mut population, families)?;
        debug!("Computing affinity");
        compute_affinity(&mut population)?;

        let mut best = fittest(&population)
            .cloned()
            .ok_or(AisError::EmptyPopulation)?;
        let mut history = Vec::with_capacity(self.options.n_generations);

        // 2. Evolving
        for generation in 0..self.options.n_generations {
            debug!("Generation {}: computing fitness", generation + 1);
            let entering = evaluate_fitness(&mut population, families)?;

            debug!("Cloning");
            let mut clones = clonator.clone_population(&population)?;

            debug!("Mutating {} clones", clones.iter().map(Vec::len).sum::<usize>());
            let accepted_moves = mutator.mutate(&mut clones, families, rng);

            debug!("Computing clone fitness");
            evaluate_clones(&mut clones, families)?;

            debug!("Merging parents and clones");
            population = select_best(population, clones);
            let merged = fittest(&population).ok_or(AisError::EmptyPopulation)?;
            let merged_best_fitness = merged.fitness;
            if merged.fitness < best.fitness {
                best = merged.clone();
            }

            debug!("Computing affinity");
            let avg_affinity = compute_affinity(&mut population)?;

            debug!("Selection");
            population = selector.select(population)?;
            let survivors = population.len();

            let replenished = target.saturating_sub(survivors);
            if replenished > 0 {
                debug!("Replenishing {} antibodies", replenished);
                population.extend(generate_population(families, replenished, rng)?);
            }

            let stats = GenerationStats {
                generation,
                best_fitness: entering.min,
                avg_fitness: entering.avg,
                merged_best_fitness,
                avg_affinity,
                accepted_moves,
                survivors,
                replenished,
            };
            callback.on_generation(&stats);
            history.push(stats);
        }

        // 3. Done
        if self.options.n_generations > 0 {
            evaluate_fitness(&mut population, families)?;
            compute_affinity(&mut population)?;
            if let Some(candidate) = fittest(&population) {
                if candidate.fitness < best.fitness {
                    best = candidate.clone();
                }
            }
        }

        Ok(OptimizationResult {
            population,
            best,
            history,
        })
    }
}

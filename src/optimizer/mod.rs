pub mod affinity;
pub mod cloning;
pub mod initialization;
pub mod mutation;
pub mod runner;
pub mod selection;

pub use self::affinity::compute_affinity;
pub use self::cloning::{BasicClonator, Clonator};
pub use self::initialization::{generate_antibody, generate_population};
pub use self::mutation::{
    move_budget, BestPreferenceMutator, Mutator, PreferenceMutator, UniformMutator,
};
pub use self::runner::{
    GenerationStats, NoopProgress, OptimizationOptions, OptimizationResult, Optimizer,
    ProgressCallback, TracingProgress,
};
pub use self::selection::{PercentileSelector, Selector, ThresholdSelector};

use crate::antibody::Antibody;
use crate::config::{CloneStrategy, Config, MutationStrategy, SelectionStrategy};
use crate::error::{AisError, AisResult};
use crate::families::Families;
use rayon::prelude::*;

/// The three strategy objects a run is composed of, chosen before it starts.
pub struct StrategySet {
    pub clonator: Box<dyn Clonator>,
    pub mutator: Box<dyn Mutator>,
    pub selector: Box<dyn Selector>,
}

impl StrategySet {
    /// Resolves strategy names into objects. Fails on an out-of-range
    /// percentile before any generation runs.
    pub fn from_config(cfg: &Config) -> AisResult<Self> {
        cfg.validate()?;
        let s = &cfg.strategies;
        let max_attempts = cfg.search.max_attempts;

        let clonator: Box<dyn Clonator> = match s.clone_strategy {
            CloneStrategy::Basic => Box::new(BasicClonator),
        };

        let mutator: Box<dyn Mutator> = match s.mutation_strategy {
            MutationStrategy::Uniform => Box::new(UniformMutator { max_attempts }),
            MutationStrategy::Preference => Box::new(PreferenceMutator { max_attempts }),
            MutationStrategy::BestPreference => Box::new(BestPreferenceMutator { max_attempts }),
        };

        let selector: Box<dyn Selector> = match s.selection_strategy {
            SelectionStrategy::Threshold => Box::new(ThresholdSelector {
                threshold: s.affinity_threshold,
                select_type: s.select_type,
            }),
            SelectionStrategy::Percentile => Box::new(PercentileSelector::new(
                s.affinity_threshold,
                s.select_type,
            )?),
        };

        Ok(Self {
            clonator,
            mutator,
            selector,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessStats {
    pub min: f64,
    pub avg: f64,
}

/// Scores every member in parallel and returns the minimum and mean.
pub fn evaluate_fitness(population: &mut [Antibody], families: &Families) -> AisResult<FitnessStats> {
    if population.is_empty() {
        return Err(AisError::EmptyPopulation);
    }

    let scores = population
        .par_iter_mut()
        .map(|antibody| antibody.evaluate(families))
        .collect::<AisResult<Vec<f64>>>()?;

    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let avg = scores.iter().sum::<f64>() / scores.len() as f64;
    Ok(FitnessStats { min, avg })
}

/// Scores every clone of every batch in parallel.
pub fn evaluate_clones(clones: &mut [Vec<Antibody>], families: &Families) -> AisResult<()> {
    clones
        .par_iter_mut()
        .flat_map(|batch| batch.par_iter_mut())
        .try_for_each(|antibody| antibody.evaluate(families).map(|_| ()))
}

/// Replaces each member by the best clone of its own batch when that clone
/// scores strictly lower; otherwise the member is kept.
pub fn select_best(population: Vec<Antibody>, clones: Vec<Vec<Antibody>>) -> Vec<Antibody> {
    population
        .into_iter()
        .zip(clones)
        .map(|(member, batch)| {
            match batch.into_iter().min_by(|a, b| a.cmp_fitness(b)) {
                Some(best) if best.fitness < member.fitness => best,
                _ => member,
            }
        })
        .collect()
}

/// Lowest-fitness member, if any.
pub fn fittest(population: &[Antibody]) -> Option<&Antibody> {
    population.iter().min_by(|a, b| a.cmp_fitness(b))
}

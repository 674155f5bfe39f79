use crate::antibody::Antibody;
use crate::error::{AisError, AisResult};

/// Expands a scored population into one batch of copies per member.
pub trait Clonator: Send + Sync {
    fn clone_population(&self, population: &[Antibody]) -> AisResult<Vec<Vec<Antibody>>>;
}

/// Clones every member `round(log2(worst - fitness))` times, at least once.
///
/// Members far below the worst score proliferate more, the worst ones are
/// copied once. Copies carry the parent's fitness until they are rescored.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicClonator;

impl BasicClonator {
    pub fn clone_count(fitness: f64, max_fitness: f64) -> usize {
        let diff = max_fitness - fitness;
        if diff > 2.0 {
            (diff.log2().round() as usize).max(1)
        } else {
            1
        }
    }
}

impl Clonator for BasicClonator {
    fn clone_population(&self, population: &[Antibody]) -> AisResult<Vec<Vec<Antibody>>> {
        let max_fitness = population
            .iter()
            .map(|a| a.fitness)
            .max_by(f64::total_cmp)
            .ok_or(AisError::EmptyPopulation)?;

        Ok(population
            .iter()
            .map(|antibody| {
                let n = Self::clone_count(antibody.fitness, max_fitness);
                vec![antibody.clone(); n]
            })
            .collect())
    }
}

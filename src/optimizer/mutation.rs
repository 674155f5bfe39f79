use crate::antibody::Antibody;
use crate::consts::{N_CHOICES, N_DAYS};
use crate::families::{Day, Families};
use fastrand::Rng;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Number of accepted moves a mutation call aims for: `round(fitness^(1/3))`.
///
/// Uses the fitness the antibody carries when the call starts, which for a
/// fresh clone is its parent's score.
pub fn move_budget(fitness: f64) -> usize {
    fitness.max(0.0).powf(1.0 / 3.0).round() as usize
}

/// Perturbs antibodies in place while keeping every touched day inside
/// the capacity window.
pub trait Mutator: Send + Sync {
    /// Mutates one antibody and returns the number of accepted moves.
    fn mutate_antibody(&self, antibody: &mut Antibody, families: &Families, rng: &mut Rng)
        -> usize;

    /// Mutates every clone of every batch in parallel.
    ///
    /// Child seeds are drawn from `rng` in batch order before any work is
    /// spawned, so results do not depend on worker scheduling.
    fn mutate(&self, clones: &mut [Vec<Antibody>], families: &Families, rng: &mut Rng) -> usize {
        let jobs: Vec<(u64, &mut Antibody)> = clones
            .iter_mut()
            .flatten()
            .map(|antibody| (rng.u64(..), antibody))
            .collect();

        jobs.into_par_iter()
            .map(|(seed, antibody)| {
                self.mutate_antibody(antibody, families, &mut Rng::with_seed(seed))
            })
            .sum()
    }
}

fn budget_exhausted(kind: &str, accepted: usize, target: usize) {
    debug!(
        "{} mutation gave up after {}/{} moves: retry budget exhausted",
        kind, accepted, target
    );
}

/// Moves a random family to a uniformly random day.
///
/// Within one call a family that already moved may not be sent straight back
/// to the day it started on.
#[derive(Debug, Clone, Copy)]
pub struct UniformMutator {
    pub max_attempts: usize,
}

impl Mutator for UniformMutator {
    fn mutate_antibody(
        &self,
        antibody: &mut Antibody,
        families: &Families,
        rng: &mut Rng,
    ) -> usize {
        let target = move_budget(antibody.fitness);
        if families.is_empty() {
            return 0;
        }

        let mut origins: HashMap<usize, Day> = HashMap::new();
        let mut accepted = 0;
        let mut failures = 0;

        while accepted < target {
            if failures >= self.max_attempts {
                budget_exhausted("Uniform", accepted, target);
                break;
            }

            let family = rng.usize(0..families.count());
            let to = rng.u16(1..=N_DAYS as Day);
            let from = antibody.day_of(family);
            let size = families.size(family);

            if origins.get(&family) == Some(&to) || !antibody.can_move(from, to, size) {
                failures += 1;
                continue;
            }

            origins.entry(family).or_insert(from);
            antibody.move_family(family, to, families);
            accepted += 1;
            failures = 0;
        }
        accepted
    }
}

/// Moves a random family to a random day from its own choice list.
/// Each family moves at most once per call.
#[derive(Debug, Clone, Copy)]
pub struct PreferenceMutator {
    pub max_attempts: usize,
}

impl Mutator for PreferenceMutator {
    fn mutate_antibody(
        &self,
        antibody: &mut Antibody,
        families: &Families,
        rng: &mut Rng,
    ) -> usize {
        let target = move_budget(antibody.fitness);
        let count = families.count();

        let mut mutated: HashSet<usize> = HashSet::new();
        let mut accepted = 0;
        let mut failures = 0;

        while accepted < target && mutated.len() < count {
            if failures >= self.max_attempts {
                budget_exhausted("Preference", accepted, target);
                break;
            }

            let family = rng.usize(0..count);
            if mutated.contains(&family) {
                failures += 1;
                continue;
            }

            let to = families.choice(family, rng.usize(0..N_CHOICES));
            let from = antibody.day_of(family);
            let size = families.size(family);

            if !antibody.can_move(from, to, size) {
                failures += 1;
                continue;
            }

            antibody.move_family(family, to, families);
            mutated.insert(family);
            accepted += 1;
            failures = 0;
        }
        accepted
    }
}

/// Moves a random family to the best-ranked choice that differs from its
/// current day and fits the capacity window. Families with no such choice
/// are skipped and another family is drawn.
#[derive(Debug, Clone, Copy)]
pub struct BestPreferenceMutator {
    pub max_attempts: usize,
}

impl Mutator for BestPreferenceMutator {
    fn mutate_antibody(
        &self,
        antibody: &mut Antibody,
        families: &Families,
        rng: &mut Rng,
    ) -> usize {
        let target = move_budget(antibody.fitness);
        let count = families.count();

        // Families already moved or found immovable during this call.
        let mut visited: HashSet<usize> = HashSet::new();
        let mut accepted = 0;
        let mut failures = 0;

        while accepted < target && visited.len() < count {
            if failures >= self.max_attempts {
                budget_exhausted("Best-preference", accepted, target);
                break;
            }

            let family = rng.usize(0..count);
            if !visited.insert(family) {
                failures += 1;
                continue;
            }

            let from = antibody.day_of(family);
            let size = families.size(family);
            let best = families
                .choices(family)
                .iter()
                .copied()
                .find(|&to| antibody.can_move(from, to, size));

            match best {
                Some(to) => {
                    antibody.move_family(family, to, families);
                    accepted += 1;
                    failures = 0;
                }
                None => failures += 1,
            }
        }
        accepted
    }
}

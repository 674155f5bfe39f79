use crate::antibody::Antibody;
use crate::error::{AisError, AisResult};
use rayon::prelude::*;

/// Recomputes every member's affinity from scratch.
///
/// For each unordered pair, the number of families sharing a day is added to
/// both members. Rows of the pair triangle are processed in parallel, each
/// worker folding into its own score vector; the vectors are summed at the
/// end, so no member is written concurrently.
///
/// Returns the population-average affinity.
pub fn compute_affinity(population: &mut [Antibody]) -> AisResult<f64> {
    let n = population.len();
    if n == 0 {
        return Err(AisError::EmptyPopulation);
    }

    let members: &[Antibody] = population;
    let scores = (0..n)
        .into_par_iter()
        .fold(
            || vec![0u64; n],
            |mut acc, i| {
                for j in (i + 1)..n {
                    let shared = members[i].affinity(&members[j]);
                    acc[i] += shared;
                    acc[j] += shared;
                }
                acc
            },
        )
        .reduce(
            || vec![0u64; n],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b) {
                    *x += y;
                }
                a
            },
        );

    for (antibody, score) in population.iter_mut().zip(scores.iter()) {
        antibody.affinity = *score;
    }

    Ok(scores.iter().sum::<u64>() as f64 / n as f64)
}

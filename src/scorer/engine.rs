use super::costs::{choice_histogram, preference_cost};
use super::ScoreDetails;
use crate::antibody::Antibody;
use crate::consts::{MAX_OCCUPANCY, MIN_OCCUPANCY, N_DAYS};
use crate::error::{AisError, AisResult};
use crate::families::Families;
use tracing::warn;

/// Accounting penalty over the per-day head counts.
///
/// Days are walked from the last to the first. Each day `d` is paired with
/// the day visited just before it (`p`), and the walk starts with `p` set to
/// the last day itself. Every term is `(d - 125) / 400 * d^(0.5 + (d - p) / 50)`.
/// An unused day (`d == 0`) is skipped only when its exponent is negative,
/// since `0^negative` has no finite value. With a zero exponent it adds
/// `-125 / 400 * 0^0 = -0.3125`.
pub fn accounting_penalty(occupancy: &[u32; N_DAYS]) -> f64 {
    let mut penalty = 0.0;
    let mut previous = occupancy[N_DAYS - 1] as f64;

    for &count in occupancy.iter().rev() {
        let d = count as f64;
        let exponent = 1.0 / 2.0 + (d - previous) / 50.0;
        if count > 0 || exponent >= 0.0 {
            penalty += (d - 125.0) / 400.0 * d.powf(exponent);
        }
        previous = d;
    }
    penalty
}

/// Fast Path: Used by the Optimizer.
pub fn score(antibody: &Antibody, families: &Families) -> AisResult<f64> {
    let total = preference_cost(antibody, families) + accounting_penalty(antibody.occupancy());

    if !total.is_finite() {
        return Err(AisError::InvalidFitness { value: total });
    }
    if total < 0.0 {
        warn!(
            "Negative fitness {:.3}: some used days sit below {} people",
            total, MIN_OCCUPANCY
        );
    }
    Ok(total)
}

/// Detailed Path: Used by Evaluation reports.
pub fn score_details(antibody: &Antibody, families: &Families) -> AisResult<ScoreDetails> {
    let preference = preference_cost(antibody, families);
    let accounting = accounting_penalty(antibody.occupancy());
    let total = preference + accounting;
    if !total.is_finite() {
        return Err(AisError::InvalidFitness { value: total });
    }

    let occupancy = antibody.occupancy();
    let used = occupancy.iter().filter(|&&o| o > 0);

    Ok(ScoreDetails {
        total,
        preference_cost: preference,
        accounting_penalty: accounting,
        choice_counts: choice_histogram(antibody, families),
        min_occupancy: used.clone().copied().min().unwrap_or(0),
        max_occupancy: occupancy.iter().copied().max().unwrap_or(0),
        empty_days: occupancy.iter().filter(|&&o| o == 0).count(),
        days_out_of_window: used
            .filter(|&&o| !(MIN_OCCUPANCY..=MAX_OCCUPANCY).contains(&o))
            .count(),
    })
}

use crate::antibody::Antibody;
use crate::config::SelectType;
use crate::error::{AisError, AisResult};

/// Filters a population on its affinity scores.
pub trait Selector: Send + Sync {
    fn select(&self, population: Vec<Antibody>) -> AisResult<Vec<Antibody>>;
}

#[inline(always)]
fn passes(affinity: u64, bound: f64, select_type: SelectType) -> bool {
    let a = affinity as f64;
    match select_type {
        SelectType::Negative => a <= bound,
        SelectType::Positive => a >= bound,
    }
}

fn filter_by(population: Vec<Antibody>, bound: f64, select_type: SelectType) -> Vec<Antibody> {
    population
        .into_iter()
        .filter(|a| passes(a.affinity, bound, select_type))
        .collect()
}

/// Keeps members on the chosen side of a fixed affinity bound.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdSelector {
    pub threshold: f64,
    pub select_type: SelectType,
}

impl Selector for ThresholdSelector {
    fn select(&self, population: Vec<Antibody>) -> AisResult<Vec<Antibody>> {
        if population.is_empty() {
            return Err(AisError::EmptyPopulation);
        }
        Ok(filter_by(population, self.threshold, self.select_type))
    }
}

/// Keeps members on the chosen side of the P-th percentile of the
/// population's affinities.
#[derive(Debug, Clone, Copy)]
pub struct PercentileSelector {
    percentile: f64,
    select_type: SelectType,
}

impl PercentileSelector {
    pub fn new(percentile: f64, select_type: SelectType) -> AisResult<Self> {
        if !(0.0..=100.0).contains(&percentile) {
            return Err(AisError::InvalidThreshold(percentile));
        }
        Ok(Self {
            percentile,
            select_type,
        })
    }
}

impl Selector for PercentileSelector {
    fn select(&self, population: Vec<Antibody>) -> AisResult<Vec<Antibody>> {
        let mut values: Vec<f64> = population.iter().map(|a| a.affinity as f64).collect();
        let bound = percentile(&mut values, self.percentile)?;
        Ok(filter_by(population, bound, self.select_type))
    }
}

/// P-th percentile with linear interpolation between the two closest ranks
/// (`p` in `[0, 100]`). Sorts `values` in place.
pub fn percentile(values: &mut [f64], p: f64) -> AisResult<f64> {
    if values.is_empty() {
        return Err(AisError::EmptyPopulation);
    }
    if !(0.0..=100.0).contains(&p) {
        return Err(AisError::InvalidThreshold(p));
    }

    values.sort_by(f64::total_cmp);
    let h = (values.len() - 1) as f64 * p / 100.0;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    Ok(values[lo] + (h - lo as f64) * (values[hi] - values[lo]))
}

use crate::antibody::Antibody;
use crate::consts::{MAX_OCCUPANCY, MIN_OCCUPANCY, N_DAYS};
use crate::error::{AisError, AisResult};
use crate::families::{Day, Families};
use fastrand::Rng;
use rayon::prelude::*;

/// Builds one random schedule that never pushes a day past the cap.
///
/// Families are placed in table order. While some day is still at or below
/// the floor, the day is drawn from those "under-limit" days only; once every
/// day has crossed the floor, any day may be drawn. A draw is accepted as soon
/// as the family fits under the cap. This is a greedy repair sampler, not a
/// uniform draw over feasible schedules.
pub fn generate_antibody(families: &Families, rng: &mut Rng) -> AisResult<Antibody> {
    let mut days: Vec<Day> = Vec::with_capacity(families.count());
    let mut occupancy = [0u32; N_DAYS];
    let mut under_limit: Vec<Day> = (1..=N_DAYS as Day).collect();

    for family in 0..families.count() {
        let size = families.size(family);
        let fits = |d: Day| occupancy[d as usize - 1] + size <= MAX_OCCUPANCY;

        if !(1..=N_DAYS as Day).any(fits) {
            return Err(AisError::ConstructionInfeasible { family, size });
        }
        // Every day is past the floor once `under_limit` is empty.
        let draw_under_limit = under_limit.iter().any(|&d| fits(d));

        let day = loop {
            let candidate = if draw_under_limit {
                under_limit[rng.usize(0..under_limit.len())]
            } else {
                rng.u16(1..=N_DAYS as Day)
            };
            if fits(candidate) {
                break candidate;
            }
        };

        occupancy[day as usize - 1] += size;
        days.push(day);

        if occupancy[day as usize - 1] > MIN_OCCUPANCY {
            if let Some(pos) = under_limit.iter().position(|&d| d == day) {
                under_limit.swap_remove(pos);
            }
        }
    }

    Ok(Antibody::from_parts(days, occupancy))
}

/// Builds `n` antibodies in parallel.
///
/// Each antibody gets its own child generator seeded from `rng` before the
/// parallel section starts, so the result depends only on `rng`'s state.
pub fn generate_population(
    families: &Families,
    n: usize,
    rng: &mut Rng,
) -> AisResult<Vec<Antibody>> {
    let seeds: Vec<u64> = (0..n).map(|_| rng.u64(..)).collect();
    seeds
        .into_par_iter()
        .map(|seed| generate_antibody(families, &mut Rng::with_seed(seed)))
        .collect()
}

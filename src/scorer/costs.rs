use crate::antibody::Antibody;
use crate::consts::{GIFT_BASE, GIFT_PER_PERSON, N_CHOICES};
use crate::families::Families;

/// Consolation gift owed to a family of `size` people placed on its
/// choice of rank `rank` (`None` when the day is not on its list).
///
/// | rank | gift                |
/// |------|---------------------|
/// | 0    | 0                   |
/// | 1    | 50                  |
/// | 2    | 50 + 9 * size       |
/// | 3    | 100 + 9 * size      |
/// | 4    | 200 + 9 * size      |
/// | 5    | 200 + 18 * size     |
/// | 6    | 300 + 18 * size     |
/// | 7    | 300 + 36 * size     |
/// | 8    | 400 + 36 * size     |
/// | 9    | 500 + 235 * size    |
/// | none | 500 + 434 * size    |
#[inline(always)]
pub fn gift_cost(rank: Option<usize>, size: u32) -> f64 {
    let bucket = rank.unwrap_or(N_CHOICES);
    GIFT_BASE[bucket] + GIFT_PER_PERSON[bucket] * size as f64
}

/// Sum of consolation gifts over all families.
pub fn preference_cost(antibody: &Antibody, families: &Families) -> f64 {
    families
        .iter()
        .zip(antibody.days().iter())
        .map(|(family, &day)| gift_cost(family.rank_of(day), family.size))
        .sum()
}

/// Number of families placed on each choice rank; the last bucket counts
/// families that got none of their choices.
pub fn choice_histogram(antibody: &Antibody, families: &Families) -> [usize; N_CHOICES + 1] {
    let mut counts = [0usize; N_CHOICES + 1];
    for (family, &day) in families.iter().zip(antibody.days().iter()) {
        counts[family.rank_of(day).unwrap_or(N_CHOICES)] += 1;
    }
    counts
}

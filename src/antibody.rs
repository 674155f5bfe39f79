use crate::consts::{MAX_OCCUPANCY, MIN_OCCUPANCY, N_DAYS};
use crate::error::{AisError, AisResult};
use crate::families::{Day, Families};
use crate::scorer;
use std::cmp::Ordering;

/// One candidate schedule: a day for every family plus the per-day
/// head count derived from it.
///
/// `days` and `occupancy` only change together (see [`Antibody::move_family`]),
/// so the occupancy of a day is always the summed size of the families
/// assigned to it. Cloning an antibody yields a fully independent copy.
#[derive(Debug, Clone)]
pub struct Antibody {
    days: Vec<Day>,
    occupancy: [u32; N_DAYS],
    pub affinity: u64,
    pub fitness: f64,
}

impl Default for Antibody {
    fn default() -> Self {
        Self {
            days: Vec::new(),
            occupancy: [0; N_DAYS],
            affinity: 0,
            fitness: 0.0,
        }
    }
}

impl Antibody {
    /// Builds an antibody from an explicit assignment, deriving occupancy.
    pub fn from_days(days: Vec<Day>, families: &Families) -> AisResult<Self> {
        if days.len() != families.count() {
            return Err(AisError::Validation(format!(
                "assignment covers {} families, table has {}",
                days.len(),
                families.count()
            )));
        }

        let mut occupancy = [0u32; N_DAYS];
        for (family, &day) in days.iter().enumerate() {
            if day == 0 || day as usize > N_DAYS {
                return Err(AisError::Validation(format!(
                    "family {} assigned to day {} outside 1..={}",
                    family, day, N_DAYS
                )));
            }
            occupancy[day as usize - 1] += families.size(family);
        }

        Ok(Self::from_parts(days, occupancy))
    }

    pub(crate) fn from_parts(days: Vec<Day>, occupancy: [u32; N_DAYS]) -> Self {
        Self {
            days,
            occupancy,
            affinity: 0,
            fitness: 0.0,
        }
    }

    #[inline(always)]
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    #[inline(always)]
    pub fn day_of(&self, family: usize) -> Day {
        self.days[family]
    }

    /// Head count per day, index `d - 1` for day `d`.
    #[inline(always)]
    pub fn occupancy(&self) -> &[u32; N_DAYS] {
        &self.occupancy
    }

    #[inline(always)]
    pub fn occupancy_of(&self, day: Day) -> u32 {
        self.occupancy[day as usize - 1]
    }

    pub fn total_occupancy(&self) -> u64 {
        self.occupancy.iter().map(|&o| o as u64).sum()
    }

    /// True when moving `size` people from `from` to `to` keeps both days
    /// inside the capacity window.
    #[inline(always)]
    pub fn can_move(&self, from: Day, to: Day, size: u32) -> bool {
        from != to
            && self.occupancy_of(to) + size <= MAX_OCCUPANCY
            && self.occupancy_of(from) > MIN_OCCUPANCY + size
    }

    /// Reassigns `family` to `to`, shifting its head count between days.
    ///
    /// The size comes from `families`, so the occupancy always matches the
    /// table the antibody was built from. Capacity is not checked here; see
    /// [`Antibody::can_move`].
    pub fn move_family(&mut self, family: usize, to: Day, families: &Families) {
        let size = families.size(family);
        let from = self.days[family];
        self.occupancy[from as usize - 1] -= size;
        self.occupancy[to as usize - 1] += size;
        self.days[family] = to;
    }

    /// Number of families placed on the same day in both antibodies.
    pub fn affinity(&self, other: &Antibody) -> u64 {
        self.days
            .iter()
            .zip(other.days.iter())
            .filter(|(a, b)| a == b)
            .count() as u64
    }

    /// Scores the antibody, caching the result in `self.fitness`.
    pub fn evaluate(&mut self, families: &Families) -> AisResult<f64> {
        self.fitness = scorer::score(self, families)?;
        Ok(self.fitness)
    }

    /// Orders by fitness, lower first. NaN never reaches a stored score.
    pub fn cmp_fitness(&self, other: &Antibody) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }
}

use crate::consts::{N_CHOICES, N_DAYS};
use crate::error::{AisError, AisResult};
use serde::{Deserialize, Serialize};

/// A day of the tour, `1..=N_DAYS`.
pub type Day = u16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub id: usize,
    pub size: u32,
    pub choices: [Day; N_CHOICES],
}

impl Family {
    /// Rank of `day` in this family's preference list, if listed.
    /// Duplicated entries resolve to their first rank.
    #[inline(always)]
    pub fn rank_of(&self, day: Day) -> Option<usize> {
        self.choices.iter().position(|&c| c == day)
    }
}

/// Read-only table of families. Row index is the family id.
#[derive(Debug, Clone, Default)]
pub struct Families {
    rows: Vec<Family>,
    total_people: u64,
}

impl Families {
    pub fn new(rows: Vec<Family>) -> AisResult<Self> {
        let mut total_people = 0u64;
        for (i, f) in rows.iter().enumerate() {
            if f.id != i {
                return Err(AisError::Validation(format!(
                    "family ids must be dense and ordered: row {} has id {}",
                    i, f.id
                )));
            }
            if f.size == 0 {
                return Err(AisError::Validation(format!(
                    "family {} has no people",
                    f.id
                )));
            }
            if let Some(bad) = f
                .choices
                .iter()
                .find(|&&d| d == 0 || d as usize > N_DAYS)
            {
                return Err(AisError::Validation(format!(
                    "family {} lists day {} outside 1..={}",
                    f.id, bad, N_DAYS
                )));
            }
            total_people += f.size as u64;
        }
        Ok(Self { rows, total_people })
    }

    /// Builds a table where every family shares one size and one
    /// preference list. Handy for tests and benchmarks.
    pub fn uniform(count: usize, size: u32, choices: [Day; N_CHOICES]) -> AisResult<Self> {
        let rows = (0..count)
            .map(|id| Family { id, size, choices })
            .collect();
        Self::new(rows)
    }

    #[inline(always)]
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    #[inline(always)]
    pub fn size(&self, family: usize) -> u32 {
        self.rows[family].size
    }

    #[inline(always)]
    pub fn choice(&self, family: usize, rank: usize) -> Day {
        self.rows[family].choices[rank]
    }

    #[inline(always)]
    pub fn choices(&self, family: usize) -> &[Day; N_CHOICES] {
        &self.rows[family].choices
    }

    pub fn rank_of(&self, family: usize, day: Day) -> Option<usize> {
        self.rows[family].rank_of(day)
    }

    pub fn total_people(&self) -> u64 {
        self.total_people
    }

    pub fn iter(&self) -> impl Iterator<Item = &Family> {
        self.rows.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

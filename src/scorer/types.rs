use crate::consts::N_CHOICES;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    // Top-line Scores
    pub total: f64,
    pub preference_cost: f64,
    pub accounting_penalty: f64,

    // Families per choice rank, last bucket = unlisted day
    pub choice_counts: [usize; N_CHOICES + 1],

    // Occupancy Stats (used days only, except max)
    pub min_occupancy: u32,
    pub max_occupancy: u32,
    pub empty_days: usize,
    pub days_out_of_window: usize,
}

use crate::consts::DEFAULT_MAX_ATTEMPTS;
use crate::error::{AisError, AisResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub strategies: StrategyParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, default_value_t = 50)]
    pub population_size: usize,
    #[arg(long, default_value_t = 100)]
    pub n_generations: usize,
    /// Worker threads for fitness, affinity and construction (0 = all cores).
    #[arg(long, default_value_t = 0)]
    pub num_threads: usize,
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
    /// Rejected draws tolerated per mutation move before the call gives up.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            n_generations: 100,
            num_threads: 0,
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    #[arg(long, default_value_t = CloneStrategy::Basic)]
    pub clone_strategy: CloneStrategy,
    #[arg(long, default_value_t = MutationStrategy::Preference)]
    pub mutation_strategy: MutationStrategy,
    #[arg(long, default_value_t = SelectionStrategy::Percentile)]
    pub selection_strategy: SelectionStrategy,
    #[arg(long, default_value_t = SelectType::Negative)]
    pub select_type: SelectType,
    /// Fixed affinity bound, or the percentile for `percentile` selection.
    #[arg(long, default_value_t = 75.0)]
    pub affinity_threshold: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            clone_strategy: CloneStrategy::Basic,
            mutation_strategy: MutationStrategy::Preference,
            selection_strategy: SelectionStrategy::Percentile,
            select_type: SelectType::Negative,
            affinity_threshold: 75.0,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CloneStrategy {
    Basic,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MutationStrategy {
    /// Any day, uniformly.
    Uniform,
    /// A random day from the family's own choice list.
    Preference,
    /// The highest-ranked feasible day from the family's choice list.
    BestPreference,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    Threshold,
    Percentile,
}

/// Which side of the affinity bound survives selection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SelectType {
    /// Keep affinity >= bound.
    Positive,
    /// Keep affinity <= bound (diversity preserving).
    Negative,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> AisResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn validate(&self) -> AisResult<()> {
        if self.search.max_attempts == 0 {
            return Err(AisError::Config(
                "max_attempts must allow at least one draw per move".to_string(),
            ));
        }
        if !self.strategies.affinity_threshold.is_finite() {
            return Err(AisError::Config(format!(
                "affinity_threshold must be finite, got {}",
                self.strategies.affinity_threshold
            )));
        }
        Ok(())
    }

    /// Copies every field the user typed on the command line over the
    /// values loaded from a config file.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(search.population_size);
        update_if_present!(search.n_generations);
        update_if_present!(search.num_threads);
        update_if_present!(search.seed);
        update_if_present!(search.max_attempts);

        update_if_present!(strategies.clone_strategy);
        update_if_present!(strategies.mutation_strategy);
        update_if_present!(strategies.selection_strategy);
        update_if_present!(strategies.select_type);
        update_if_present!(strategies.affinity_threshold);
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AisError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Thread Pool Error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Construction Infeasible: family {family} ({size} people) fits on no day")]
    ConstructionInfeasible { family: usize, size: u32 },

    #[error("Invalid Threshold: percentile {0} is outside [0, 100]")]
    InvalidThreshold(f64),

    #[error("Empty Population: operation needs at least one antibody")]
    EmptyPopulation,

    #[error("Invalid Fitness: evaluation produced {value}")]
    InvalidFitness { value: f64 },
}

pub type AisResult<T> = Result<T, AisError>;

pub mod costs;
pub mod engine;
pub mod loader;
pub mod types;

pub use self::engine::{accounting_penalty, score, score_details};
pub use self::types::ScoreDetails;

//! Search and evaluation for duel.

pub mod config;
pub mod error;
pub mod eval;
pub mod search;

pub use config::SearchConfig;
pub use error::ConfigError;
pub use eval::{CubeEvaluator, Evaluator, LineEvaluator, MaterialEvaluator};
pub use search::control::{Deadline, SearchControl};
pub use search::negamax::minimax;
pub use search::{SearchResult, Searcher};

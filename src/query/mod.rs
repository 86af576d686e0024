pub mod executor;
pub mod scorer;

pub use executor::{QueryExecutor, SearchRequest};
pub use scorer::{MatchKind, ScoreContext, Scorer, ScoringWeights};

use loadout_fuzzy::FuzzyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadoutError {
    #[error("fuzzy model error: {0}")]
    Fuzzy(#[from] FuzzyError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown candidate: {0}")]
    UnknownCandidate(String),
}

use adintel_core::{ConfigError, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid pattern {pattern:?} for {context}: {source}")]
    InvalidPattern {
        context: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    InvalidAd(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

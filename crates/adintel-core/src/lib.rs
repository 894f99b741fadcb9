//! Shared data model and configuration for the ad intelligence pipeline.
//!
//! Ads arrive here already normalized by an upstream extraction layer; this
//! crate only describes them, validates the handful of required fields, and
//! loads the configuration the analysis crate consumes.

pub mod ad;
pub mod app_config;
pub mod category;
pub mod config;
pub mod rules;

pub use ad::{Ad, SpendRange};
pub use app_config::{AppConfig, Environment};
pub use category::AdCategory;
pub use config::{load_app_config, load_app_config_from_env};
pub use rules::{load_rules, CategoryRuleConfig, CtaKind, CtaPatternConfig, RulesFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid ad {id:?}: {reason}")]
    InvalidAd { id: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read rules file {path}: {source}")]
    RulesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file: {0}")]
    RulesFileParse(#[from] serde_yaml::Error),

    #[error("rules validation failed: {0}")]
    Validation(String),
}

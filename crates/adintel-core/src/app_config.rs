use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for a pipeline run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// YAML rule table overriding the built-in categories and CTA patterns.
    pub rules_path: Option<PathBuf>,
    /// Default industry for CPM benchmark lookup.
    pub industry: Option<String>,
    /// Maximum audience labels inferred per campaign.
    pub max_audience_labels: usize,
}

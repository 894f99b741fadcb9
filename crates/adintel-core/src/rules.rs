//! YAML rule-table configuration for the classifier and CTA matcher.
//!
//! Patterns stay as strings here; compiling them is the analysis crate's job.
//! List order in the file is significant: it is the classifier's tie-break
//! order.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::AdCategory;
use crate::ConfigError;

/// One category definition: regex patterns (3 points per hit), keywords
/// (1 point per hit) and a multiplier applied to the raw score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRuleConfig {
    pub category: AdCategory,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub weight: f64,
}

/// Buckets the copy analyzer sorts in-text call-to-action phrases into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtaKind {
    Action,
    Information,
    Contact,
    FreeOffer,
    Urgency,
}

impl std::fmt::Display for CtaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CtaKind::Action => write!(f, "action"),
            CtaKind::Information => write!(f, "information"),
            CtaKind::Contact => write!(f, "contact"),
            CtaKind::FreeOffer => write!(f, "free_offer"),
            CtaKind::Urgency => write!(f, "urgency"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtaPatternConfig {
    pub kind: CtaKind,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RulesFile {
    pub categories: Vec<CategoryRuleConfig>,
    /// When empty, the built-in CTA table is used.
    #[serde(default)]
    pub cta_patterns: Vec<CtaPatternConfig>,
}

/// Load and validate a rule table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_rules(path: &Path) -> Result<RulesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let rules_file: RulesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::RulesFileParse)?;

    validate_rules(&rules_file)?;

    Ok(rules_file)
}

fn validate_rules(rules_file: &RulesFile) -> Result<(), ConfigError> {
    if rules_file.categories.is_empty() {
        return Err(ConfigError::Validation(
            "rules file must define at least one category".to_string(),
        ));
    }

    let mut seen_categories = HashSet::new();
    for rule in &rules_file.categories {
        if !seen_categories.insert(rule.category) {
            return Err(ConfigError::Validation(format!(
                "duplicate category: '{}'",
                rule.category
            )));
        }

        if !rule.weight.is_finite() || rule.weight <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "category '{}' has invalid weight {}; must be a positive number",
                rule.category, rule.weight
            )));
        }

        if rule.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "category '{}' has an empty keyword",
                rule.category
            )));
        }
    }

    let mut seen_kinds = HashSet::new();
    for group in &rules_file.cta_patterns {
        if !seen_kinds.insert(group.kind) {
            return Err(ConfigError::Validation(format!(
                "duplicate cta pattern group: '{}'",
                group.kind
            )));
        }
    }

    Ok(())
}

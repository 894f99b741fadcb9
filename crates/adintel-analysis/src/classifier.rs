//! Weighted multi-category rule classifier.

use adintel_core::{Ad, AdCategory};
use indexmap::IndexMap;
use serde::Serialize;

use crate::rules::{default_rules, CategoryRule};

/// Points per matching regex pattern.
const PATTERN_POINTS: f64 = 3.0;
/// Points per keyword found in the ad text.
const KEYWORD_POINTS: f64 = 1.0;
/// Weighted score treated as a fully confident match (5 pattern hits plus
/// 10 keyword hits at weight ~1.2). Fixed; it does not track the rule weights.
pub const CONFIDENCE_NORMALIZER: f64 = 30.0;

/// Outcome of classifying one ad.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizationResult {
    pub category: AdCategory,
    /// In `[0.0, 1.0]`.
    pub confidence: f64,
    /// What matched for the winning category, e.g. `pattern:"changed my life"`
    /// or `keyword:review`.
    pub signals: Vec<String>,
    /// Weighted score per rule, in rule-table order.
    pub scores: IndexMap<AdCategory, f64>,
}

#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<CategoryRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl Classifier {
    /// Build a classifier over an injected rule table. Table order is the
    /// tie-break order.
    #[must_use]
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Score every rule against the ad and pick the strictly highest
    /// weighted score. Ties keep the earlier rule; all-zero yields
    /// [`AdCategory::Other`].
    #[must_use]
    pub fn categorize(&self, ad: &Ad) -> CategorizationResult {
        let text = ad.searchable_text();

        let mut scores = IndexMap::with_capacity(self.rules.len());
        let mut best = AdCategory::Other;
        let mut best_score = 0.0_f64;
        let mut best_signals = Vec::new();

        for rule in &self.rules {
            let (raw, signals) = score_rule(rule, &text);
            let weighted = raw * rule.weight;
            scores.insert(rule.category, weighted);

            if weighted > best_score {
                best = rule.category;
                best_score = weighted;
                best_signals = signals;
            }
        }

        CategorizationResult {
            category: best,
            confidence: (best_score / CONFIDENCE_NORMALIZER).min(1.0),
            signals: best_signals,
            scores,
        }
    }

    /// Classify every ad, returning annotated copies. The input is untouched.
    #[must_use]
    pub fn categorize_and_update(&self, ads: &[Ad]) -> Vec<Ad> {
        let annotated: Vec<Ad> = ads
            .iter()
            .map(|ad| {
                let result = self.categorize(ad);
                ad.with_category(result.category, result.confidence)
            })
            .collect();

        tracing::debug!(ads = annotated.len(), "categorized ads");
        annotated
    }

    /// Histogram over all categories (zero-filled), in [`AdCategory::ALL`]
    /// order. Ads that already carry a category are counted as-is; the rest
    /// are classified on the fly.
    #[must_use]
    pub fn category_distribution(&self, ads: &[Ad]) -> IndexMap<AdCategory, usize> {
        let mut distribution: IndexMap<AdCategory, usize> =
            AdCategory::ALL.iter().map(|&c| (c, 0)).collect();

        for ad in ads {
            let category = ad
                .category
                .unwrap_or_else(|| self.categorize(ad).category);
            *distribution.entry(category).or_insert(0) += 1;
        }

        distribution
    }
}

fn score_rule(rule: &CategoryRule, text: &str) -> (f64, Vec<String>) {
    let mut raw = 0.0;
    let mut signals = Vec::new();

    for pattern in &rule.patterns {
        if let Some(m) = pattern.find(text) {
            raw += PATTERN_POINTS;
            signals.push(format!("pattern:{:?}", m.as_str()));
        }
    }

    for keyword in &rule.keywords {
        if text.contains(keyword.as_str()) {
            raw += KEYWORD_POINTS;
            signals.push(format!("keyword:{keyword}"));
        }
    }

    (raw, signals)
}

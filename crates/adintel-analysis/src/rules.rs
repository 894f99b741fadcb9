//! Category rule table consumed by the [`crate::classifier::Classifier`].
//!
//! The built-in table below is mirrored by `config/rules.yaml`; either can be
//! handed to the classifier. Order is the tie-break order.

use std::sync::LazyLock;

use adintel_core::{AdCategory, CategoryRuleConfig};
use regex::{Regex, RegexBuilder};

use crate::error::AnalysisError;

/// A compiled category rule.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub category: AdCategory,
    /// Each matching pattern adds 3 to the raw score.
    pub patterns: Vec<Regex>,
    /// Lowercase substrings; each one present adds 1 to the raw score.
    pub keywords: Vec<String>,
    pub weight: f64,
}

impl CategoryRule {
    /// Compile a rule from pattern and keyword strings.
    ///
    /// Patterns are compiled case-insensitively and keywords are lowercased,
    /// since the classifier matches against lowercased ad text.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidPattern`] if a pattern fails to compile.
    pub fn new<P, K>(
        category: AdCategory,
        patterns: &[P],
        keywords: &[K],
        weight: f64,
    ) -> Result<Self, AnalysisError>
    where
        P: AsRef<str>,
        K: AsRef<str>,
    {
        let patterns = patterns
            .iter()
            .map(|p| compile_pattern(p.as_ref(), &format!("category '{category}'")))
            .collect::<Result<Vec<_>, _>>()?;
        let keywords = keywords
            .iter()
            .map(|k| k.as_ref().to_lowercase())
            .collect();

        Ok(Self {
            category,
            patterns,
            keywords,
            weight,
        })
    }

    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidPattern`] if a pattern fails to compile.
    pub fn from_config(config: &CategoryRuleConfig) -> Result<Self, AnalysisError> {
        Self::new(
            config.category,
            &config.patterns,
            &config.keywords,
            config.weight,
        )
    }
}

/// Compile a whole rule table, preserving its order.
///
/// # Errors
///
/// Returns the first [`AnalysisError::InvalidPattern`] encountered.
pub fn compile_rules(configs: &[CategoryRuleConfig]) -> Result<Vec<CategoryRule>, AnalysisError> {
    configs.iter().map(CategoryRule::from_config).collect()
}

/// The built-in rule table, one rule per [`AdCategory`] in declaration order.
#[must_use]
pub fn default_rules() -> Vec<CategoryRule> {
    DEFAULT_RULES.clone()
}

pub(crate) fn compile_pattern(pattern: &str, context: &str) -> Result<Regex, AnalysisError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| AnalysisError::InvalidPattern {
            context: context.to_string(),
            pattern: pattern.to_string(),
            source,
        })
}

struct RuleDef {
    category: AdCategory,
    patterns: &'static [&'static str],
    keywords: &'static [&'static str],
    weight: f64,
}

const RULE_DEFS: &[RuleDef] = &[
    RuleDef {
        category: AdCategory::Testimonial,
        patterns: &[
            r#""[^"]+"\s*[-–—]\s*\w+"#,
            r"★{3,}|⭐{3,}|\b5[- ]stars?\b",
            r"\b(changed|saved) my (life|business|practice)\b",
            r"\b(i|we) (was|were|had been) (skeptical|struggling)\b",
            r"\b(my|our) (clients?|customers?|patients?) (love|say)\b",
        ],
        keywords: &[
            "testimonial",
            "review",
            "customer",
            "changed my life",
            "best purchase",
            "highly recommend",
            "success story",
            "happy clients",
            "results",
            "five stars",
        ],
        weight: 1.2,
    },
    RuleDef {
        category: AdCategory::OfferPromo,
        patterns: &[
            r"\b\d+%\s*off\b",
            r"\$\d+(\.\d{2})?\s*off\b",
            r"\b(buy one|bogo)\b",
            r"\bfree shipping\b",
            r"\b(promo|coupon|discount) code\b",
        ],
        keywords: &[
            "sale",
            "discount",
            "deal",
            "offer",
            "promo",
            "coupon",
            "save",
            "free trial",
            "special price",
            "bundle",
        ],
        weight: 1.1,
    },
    RuleDef {
        category: AdCategory::Educational,
        patterns: &[
            r"\b\d+\s+(tips|ways|steps|mistakes|secrets|strategies|lessons)\b",
            r"\bhow to\b",
            r"\blearn (how|the|about)\b",
            r"\b(guide|tutorial|masterclass)\b",
        ],
        keywords: &[
            "learn",
            "tips",
            "guide",
            "tutorial",
            "discover",
            "understand",
            "explained",
            "lesson",
            "course",
            "insights",
        ],
        weight: 1.0,
    },
    RuleDef {
        category: AdCategory::ProductFeature,
        patterns: &[
            r"\b(introducing|meet the|now with|new feature)\b",
            r"\b(built[- ]in|powered by|compatible with)\b",
            r"\b(features?|specs?)\s*:",
        ],
        keywords: &[
            "feature",
            "integrat",
            "dashboard",
            "automat",
            "technology",
            "design",
            "upgrade",
            "performance",
            "specs",
            "battery",
        ],
        weight: 1.0,
    },
    RuleDef {
        category: AdCategory::BrandAwareness,
        patterns: &[
            r"\b(our (mission|story|values)|who we are)\b",
            r"\b(since|established|founded in) (19|20)\d{2}\b",
            r"\b(proud(ly)? to|trusted by)\b",
        ],
        keywords: &[
            "brand",
            "mission",
            "community",
            "story",
            "values",
            "trusted",
            "family",
            "together",
            "proud",
        ],
        weight: 0.8,
    },
    RuleDef {
        category: AdCategory::Event,
        patterns: &[
            r"\b(join us|register now|save the date|rsvp)\b",
            r"\b(webinar|workshop|summit|conference|meetup|live event)\b",
            r"\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{1,2}(st|nd|rd|th)?\b",
        ],
        keywords: &[
            "event",
            "webinar",
            "register",
            "seats",
            "attend",
            "tickets",
            "workshop",
            "summit",
            "livestream",
        ],
        weight: 1.1,
    },
    RuleDef {
        category: AdCategory::Hiring,
        patterns: &[
            r"\bwe'?re hiring\b",
            r"\b(join our team|now hiring|open positions?)\b",
            r"\b(apply now|careers? at)\b",
        ],
        keywords: &[
            "hiring",
            "career",
            "job",
            "apply",
            "position",
            "salary",
            "benefits",
            "recruit",
            "resume",
        ],
        weight: 1.3,
    },
    RuleDef {
        category: AdCategory::UrgencyScarcity,
        patterns: &[
            r"\b(limited time|ends (today|tonight|soon)|last chance|while supplies last)\b",
            r"\bonly \d+ (left|spots|seats)\b",
            r"\b(hurry|don'?t miss( out)?|act now)\b",
            r"\b(today only|final hours)\b",
        ],
        keywords: &[
            "limited",
            "hurry",
            "last chance",
            "ending",
            "deadline",
            "expires",
            "countdown",
            "act fast",
            "selling out",
        ],
        weight: 1.1,
    },
    RuleDef {
        category: AdCategory::ProblemSolution,
        patterns: &[
            r"\b(tired of|struggling (with|to)|sick of|frustrated (with|by))\b",
            r"\b(the (solution|answer|fix)|solves?|finally)\b",
            r"\b(problems?|pain|challenges?)\b.*\b(solution|solve|fix)\b",
        ],
        keywords: &[
            "problem",
            "solution",
            "struggle",
            "frustrat",
            "tired of",
            "fix",
            "solve",
            "pain",
            "stop",
            "without",
        ],
        weight: 1.0,
    },
    RuleDef {
        category: AdCategory::Comparison,
        patterns: &[
            r"\b(vs\.?|versus)\b",
            r"\b(better|faster|cheaper) than\b",
            r"\bunlike (other|traditional)\b",
            r"\bcompared to\b",
        ],
        keywords: &[
            "compare",
            "comparison",
            "alternative",
            "switch",
            "better",
            "competitor",
            "unlike",
            "instead",
        ],
        weight: 1.0,
    },
    RuleDef {
        category: AdCategory::Other,
        patterns: &[],
        keywords: &[],
        weight: 0.1,
    },
];

static DEFAULT_RULES: LazyLock<Vec<CategoryRule>> = LazyLock::new(|| {
    RULE_DEFS
        .iter()
        .map(|def| {
            CategoryRule::new(def.category, def.patterns, def.keywords, def.weight)
                .expect("built-in category patterns are valid")
        })
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_every_category_in_order() {
        let rules = default_rules();
        let categories: Vec<AdCategory> = rules.iter().map(|r| r.category).collect();
        assert_eq!(categories, AdCategory::ALL.to_vec());
    }

    #[test]
    fn keywords_are_lowercased() {
        let rule = CategoryRule::new(AdCategory::Event, &["x"], &["WEBINAR"], 1.0)
            .expect("valid rule");
        assert_eq!(rule.keywords, vec!["webinar".to_string()]);
    }

    #[test]
    fn patterns_are_case_insensitive() {
        let rule = CategoryRule::new(AdCategory::Hiring, &[r"\bhiring\b"], &[] as &[&str], 1.0)
            .expect("valid rule");
        assert!(rule.patterns[0].is_match("NOW HIRING"));
    }

    #[test]
    fn invalid_pattern_is_reported_with_context() {
        let config = CategoryRuleConfig {
            category: AdCategory::Comparison,
            patterns: vec!["(unclosed".to_string()],
            keywords: vec![],
            weight: 1.0,
        };
        let err = CategoryRule::from_config(&config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("(unclosed"), "got: {message}");
        assert!(message.contains("comparison"), "got: {message}");
    }
}

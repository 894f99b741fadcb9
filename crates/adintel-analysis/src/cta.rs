//! Call-to-action phrase table used to find CTAs written into ad copy.

use std::sync::LazyLock;

use adintel_core::{CtaKind, CtaPatternConfig};
use regex::Regex;

use crate::error::AnalysisError;
use crate::rules::compile_pattern;

/// A CTA phrase found in copy, normalized to title case so it merges with
/// explicit button labels such as `"Learn More"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtaMatch {
    pub kind: CtaKind,
    pub phrase: String,
}

#[derive(Debug, Clone)]
pub struct CtaPatterns {
    groups: Vec<(CtaKind, Vec<Regex>)>,
}

impl Default for CtaPatterns {
    fn default() -> Self {
        DEFAULT_CTA_PATTERNS.clone()
    }
}

impl CtaPatterns {
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidPattern`] if a pattern fails to compile.
    pub fn from_config(groups: &[CtaPatternConfig]) -> Result<Self, AnalysisError> {
        let groups = groups
            .iter()
            .map(|group| {
                let context = format!("cta group '{}'", group.kind);
                let regexes = group
                    .patterns
                    .iter()
                    .map(|p| compile_pattern(p, &context))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((group.kind, regexes))
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;
        Ok(Self { groups })
    }

    /// Every CTA phrase in `text`, grouped in table order then match order.
    #[must_use]
    pub fn find_all(&self, text: &str) -> Vec<CtaMatch> {
        let mut found = Vec::new();
        for (kind, regexes) in &self.groups {
            for re in regexes {
                for m in re.find_iter(text) {
                    found.push(CtaMatch {
                        kind: *kind,
                        phrase: title_case(m.as_str()),
                    });
                }
            }
        }
        found
    }
}

fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

const CTA_DEFS: &[(CtaKind, &[&str])] = &[
    (
        CtaKind::Action,
        &[r"\b(shop now|buy now|order now|get started|sign up|start now|book now|try it (now|free))\b"],
    ),
    (
        CtaKind::Information,
        &[r"\b(learn more|find out more|read more|discover more|see how|watch now)\b"],
    ),
    (
        CtaKind::Contact,
        &[
            r"\b(call (us|now|today)|contact us|get in touch|message us)\b",
            r"\b(book|schedule) a (call|consultation|demo)\b",
        ],
    ),
    (
        CtaKind::FreeOffer,
        &[r"\b(free (trial|consultation|quote|guide|download|demo|audit)|claim your free \w+)\b"],
    ),
    (
        CtaKind::Urgency,
        &[r"\b(limited time|act now|today only|don'?t miss out|hurry|last chance)\b"],
    ),
];

static DEFAULT_CTA_PATTERNS: LazyLock<CtaPatterns> = LazyLock::new(|| {
    let groups = CTA_DEFS
        .iter()
        .map(|&(kind, patterns)| {
            let regexes = patterns
                .iter()
                .map(|p| {
                    compile_pattern(p, "built-in cta table")
                        .expect("built-in cta patterns are valid")
                })
                .collect();
            (kind, regexes)
        })
        .collect();
    CtaPatterns { groups }
});

//! Corpus-level synthesis across all campaigns of one competitor.

use std::sync::LazyLock;

use adintel_core::Ad;
use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde::Serialize;

use crate::rules::compile_pattern;
use crate::text::{percentage, sorted_by_count, truncate_chars, FrequencyMap};

use super::extract::{most_frequent, DEFAULT_OFFER};
use super::themes::Theme;
use super::Campaign;

const CONSERVATIVE_MONTHLY_PER_AD: u64 = 300;
const AGGRESSIVE_MONTHLY_PER_AD: u64 = 1200;
const PRIMARY_CHANNEL_MIN_ADS: usize = 20;
const MAX_PAIN_EXAMPLES: usize = 4;
const MAX_PAIN_EXAMPLE_CHARS: usize = 50;
const FATIGUE_MONTHS: i64 = 3;
const CTA_MONOTONY_PCT: f64 = 70.0;

pub(crate) const CREATIVE_STYLE: &str = "Direct-response copy with benefit-led hooks";
pub(crate) const PRODUCTION_LEVEL: &str = "Mix of native-feeling and polished creative";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentEstimate {
    pub monthly_low: u64,
    pub monthly_high: u64,
    pub signal: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PainPointCategory {
    pub category: String,
    pub matched_keywords: Vec<String>,
    /// Sentence snippets containing a keyword, at most 50 chars each.
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueProposition {
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeExecution {
    /// Media type → share of ads, percent.
    pub formats: IndexMap<String, u32>,
    pub video_percentage: u32,
    pub image_percentage: u32,
    pub style: String,
    pub production: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceSegment {
    pub segment: String,
    pub approach: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceTargeting {
    pub primary: Vec<String>,
    pub segments: Vec<AudienceSegment>,
}

const PAIN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Lead Generation",
        &["leads", "calls", "appointments", "bookings", "patients"],
    ),
    (
        "Time & Workload",
        &["time", "hours", "busy", "overwhelmed", "burnout"],
    ),
    (
        "Cost & Wasted Spend",
        &["expensive", "cost", "wasting", "budget", "money"],
    ),
    (
        "Competition & Visibility",
        &["competitor", "competition", "invisible", "stand out", "visibility"],
    ),
];

static PAIN_SNIPPET_RES: LazyLock<Vec<(&'static str, Vec<(&'static str, Regex)>)>> =
    LazyLock::new(|| {
        PAIN_CATEGORIES
            .iter()
            .map(|&(category, keywords)| {
                let regexes = keywords
                    .iter()
                    .map(|&kw| {
                        let pattern = format!(r"[^.]*{}[^.]*\.", regex::escape(kw));
                        let re = Regex::new(&pattern).expect("escaped keyword is a valid regex");
                        (kw, re)
                    })
                    .collect();
                (category, regexes)
            })
            .collect()
    });

static VALUE_PROPOSITIONS: LazyLock<Vec<(Regex, &'static str, &'static str)>> = LazyLock::new(|| {
    [
        (
            r"\b(guarantee|guaranteed)\b",
            "Risk reversal",
            "Guarantees remove the buyer's downside",
        ),
        (
            r"\b\d+(%|x)(\s|$)",
            "Quantified results",
            "Specific numbers make claims credible",
        ),
        (
            r"\b(free|no cost|complimentary)\b",
            "Free entry point",
            "A no-cost first step lowers acquisition friction",
        ),
        (
            r"\b(fast|quick|same[- ]day|in \d+ (minutes|hours|days))\b",
            "Speed",
            "Promises fast time-to-value",
        ),
        (
            r"\b(done[- ]for[- ]you|we handle|hands[- ]off)\b",
            "Done-for-you service",
            "Removes effort from the customer",
        ),
        (
            r"\b(expert|specialist|certified|award[- ]winning)\b",
            "Expertise",
            "Positions the brand as the authority",
        ),
        (
            r"\b(no contract|cancel anytime|no commitment)\b",
            "Flexibility",
            "No lock-in reduces perceived risk",
        ),
        (
            r"\b(exclusive|only for|limited spots)\b",
            "Exclusivity",
            "Scarcity signals demand and status",
        ),
    ]
    .iter()
    .map(|&(pattern, label, description)| {
        let re = compile_pattern(pattern, "value proposition table")
            .expect("built-in value proposition patterns are valid");
        (re, label, description)
    })
    .collect()
});

/// Scans each lowercased ad text on its own, so a snippet never spans two
/// ads.
pub(crate) fn pain_point_categories(lower_texts: &[String]) -> Vec<PainPointCategory> {
    PAIN_SNIPPET_RES
        .iter()
        .filter_map(|(category, keywords)| {
            let matched: Vec<String> = keywords
                .iter()
                .filter(|(kw, _)| lower_texts.iter().any(|t| t.contains(kw)))
                .map(|(kw, _)| (*kw).to_string())
                .collect();
            if matched.is_empty() {
                return None;
            }

            let mut examples = IndexSet::new();
            'keywords: for (_, re) in keywords {
                for m in lower_texts.iter().flat_map(|t| re.find_iter(t)) {
                    if examples.len() >= MAX_PAIN_EXAMPLES {
                        break 'keywords;
                    }
                    let snippet = truncate_chars(m.as_str().trim(), MAX_PAIN_EXAMPLE_CHARS);
                    if !snippet.is_empty() {
                        examples.insert(snippet);
                    }
                }
            }

            Some(PainPointCategory {
                category: (*category).to_string(),
                matched_keywords: matched,
                examples: examples.into_iter().collect(),
            })
        })
        .collect()
}

pub(crate) fn value_propositions(corpus: &str) -> Vec<ValueProposition> {
    VALUE_PROPOSITIONS
        .iter()
        .filter(|(re, _, _)| re.is_match(corpus))
        .map(|(_, label, description)| ValueProposition {
            label: (*label).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn creative_execution(ads: &[Ad]) -> CreativeExecution {
    let mut counts = FrequencyMap::new();
    for ad in ads {
        let kind = ad
            .media_type
            .as_deref()
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "unknown".to_string());
        *counts.entry(kind).or_insert(0) += 1;
    }

    let share = |count: usize| percentage(count, ads.len()).round() as u32;
    let video_percentage = share(counts.get("video").copied().unwrap_or(0));
    let image_percentage = share(counts.get("image").copied().unwrap_or(0));
    let formats = sorted_by_count(counts)
        .into_iter()
        .map(|(kind, count)| (kind, share(count)))
        .collect();

    CreativeExecution {
        formats,
        video_percentage,
        image_percentage,
        style: CREATIVE_STYLE.to_string(),
        production: PRODUCTION_LEVEL.to_string(),
    }
}

/// Raw `cta` field counts, `"Unknown"` when absent, most frequent first.
pub(crate) fn cta_distribution(ads: &[Ad]) -> FrequencyMap {
    let mut counts = FrequencyMap::new();
    for ad in ads {
        let cta = ad
            .cta
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("Unknown");
        *counts.entry(cta.to_string()).or_insert(0) += 1;
    }
    sorted_by_count(counts)
}

pub(crate) fn audience_targeting(campaigns: &[Campaign<'_>]) -> AudienceTargeting {
    let primary: IndexSet<String> = campaigns
        .iter()
        .flat_map(|c| c.target_audience.iter().cloned())
        .collect();

    let segment = |segment: &str, approach: &str, message: &str| AudienceSegment {
        segment: segment.to_string(),
        approach: approach.to_string(),
        message: message.to_string(),
    };

    AudienceTargeting {
        primary: primary.into_iter().collect(),
        segments: vec![
            segment(
                "Cold prospects",
                "Educational and brand-positioning content",
                "Problem awareness",
            ),
            segment(
                "Warm leads",
                "Lead magnets and case studies",
                "Proof and trust",
            ),
            segment(
                "Hot prospects",
                "Direct offers with a single clear CTA",
                "Conversion",
            ),
        ],
    }
}

/// Whole months (30-day blocks) between `from` and `as_of`, never negative.
pub(crate) fn months_since(from: DateTime<Utc>, as_of: DateTime<Utc>) -> i64 {
    (as_of - from).num_days().max(0) / 30
}

pub(crate) fn oldest_start(ads: &[Ad]) -> Option<DateTime<Utc>> {
    ads.iter().filter_map(Ad::start_time).min()
}

pub(crate) fn investment_estimate(ad_count: usize, months_running: Option<i64>) -> InvestmentEstimate {
    let n = ad_count as u64;
    let signal = if ad_count >= PRIMARY_CHANNEL_MIN_ADS {
        "Primary acquisition channel"
    } else {
        "Testing/secondary channel"
    };
    let duration = match months_running {
        None => "Recent".to_string(),
        Some(0) => "Less than 1 month".to_string(),
        Some(1) => "1 month".to_string(),
        Some(m) => format!("{m} months"),
    };

    InvestmentEstimate {
        monthly_low: n * CONSERVATIVE_MONTHLY_PER_AD,
        monthly_high: n * AGGRESSIVE_MONTHLY_PER_AD,
        signal: signal.to_string(),
        duration,
    }
}

/// Share of all ads carrying the single most common explicit CTA.
fn dominant_cta_share(ads: &[Ad]) -> f64 {
    let mut counts = FrequencyMap::new();
    for cta in ads
        .iter()
        .filter_map(|ad| ad.cta.as_deref().map(str::trim))
        .filter(|c| !c.is_empty())
    {
        *counts.entry(cta.to_string()).or_insert(0) += 1;
    }
    most_frequent(&counts).map_or(0.0, |(_, count)| percentage(count, ads.len()))
}

pub(crate) fn strategic_strengths(
    campaigns: &[Campaign<'_>],
    creative: &CreativeExecution,
    ad_count: usize,
) -> Vec<String> {
    let checks = [
        (
            campaigns.iter().any(|c| c.case_study.is_some()),
            "Documented case studies provide concrete social proof",
        ),
        (
            campaigns.iter().any(|c| c.variations >= 5),
            "Active creative testing with 5+ variations in a campaign",
        ),
        (
            campaigns.len() >= 3,
            "Multiple parallel campaigns suggest funnel progression",
        ),
        (
            creative.video_percentage >= 30,
            "Meaningful investment in video creative",
        ),
        (
            campaigns
                .iter()
                .any(|c| c.theme == Theme::LeadMagnet || c.offer != DEFAULT_OFFER),
            "Clear, low-friction offers",
        ),
        (
            ad_count >= PRIMARY_CHANNEL_MIN_ADS,
            "Sustained ad volume signals a committed channel",
        ),
    ];
    checks
        .into_iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, label)| label.to_string())
        .collect()
}

pub(crate) fn strategic_weaknesses(
    ads: &[Ad],
    campaigns: &[Campaign<'_>],
    creative: &CreativeExecution,
    months_running: Option<i64>,
) -> Vec<String> {
    let checks = [
        (
            months_running.is_some_and(|m| m >= FATIGUE_MONTHS),
            "Creative fatigue risk: oldest ads have run 3+ months",
        ),
        (
            dominant_cta_share(ads) >= CTA_MONOTONY_PCT,
            "CTA monotony: one call-to-action covers 70%+ of ads",
        ),
        (
            campaigns.len() == 1,
            "Single-theme messaging limits reach across the funnel",
        ),
        (
            campaigns.iter().all(|c| c.case_study.is_none()),
            "No quantified case studies to back claims",
        ),
        (
            ads.iter()
                .all(|ad| ad.destination_url.as_deref().is_none_or(|u| u.trim().is_empty())),
            "No dedicated landing pages detected",
        ),
        (
            creative.video_percentage == 0,
            "No video creative in rotation",
        ),
    ];
    checks
        .into_iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, label)| label.to_string())
        .collect()
}

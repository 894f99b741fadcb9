//! Per-campaign field extraction. Each extractor looks at one theme bucket
//! independently of the others.

use std::collections::HashSet;
use std::sync::LazyLock;

use adintel_core::Ad;
use regex::Regex;
use serde::Serialize;

use crate::rules::compile_pattern;
use crate::text::{percentage, truncate_chars, FrequencyMap};

use super::themes::Theme;

pub(crate) const NO_HOOK: &str = "N/A";
pub(crate) const DEFAULT_OFFER: &str = "Contact for details";
pub(crate) const DEFAULT_CTA: &str = "Learn More";
pub(crate) const DEFAULT_AUDIENCE: &str = "Business professionals";
const MAX_OFFER_CHARS: usize = 60;
const MAX_PAIN_POINTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    pub name: String,
    pub result: String,
    pub pain_point: String,
    pub solution_angle: String,
}

static FIRST_SENTENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^.!?]*[.!?]").expect("valid first sentence regex"));

static OFFER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bfree\s+[^.!?\n]+",
        r"\bget\s+(?:your\s+)?[^.!?\n]+",
        r"\bdownload\s+[^.!?\n]+",
        r"\baccess\s+to\s+[^.!?\n]+",
    ]
    .iter()
    .map(|p| compile_pattern(p, "offer table").expect("built-in offer patterns are valid"))
    .collect()
});

/// Keyword → pain point label. Table order decides output order.
const PAIN_POINTS: &[(&str, &str)] = &[
    ("tired of", "Frustrated with the status quo"),
    ("struggling", "Struggling to grow"),
    ("frustrated", "Frustrated with current results"),
    ("overwhelmed", "Overwhelmed by workload"),
    ("no time", "Lack of time"),
    ("expensive", "High costs"),
    ("wasting", "Wasted marketing spend"),
    ("not enough", "Not enough customers"),
    ("empty", "Empty schedule"),
    ("competition", "Competitive pressure"),
    ("stuck", "Stalled growth"),
    ("losing", "Losing customers"),
    ("hard to", "Difficult process"),
    ("don't know", "Lack of know-how"),
];

static AUDIENCE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\b(dentists?|dental|orthodontists?)\b", "Dentists & dental practices"),
        (r"\b(doctors?|physicians?|clinics?|medical)\b", "Medical practices"),
        (r"\b(lawyers?|attorneys?|law firms?)\b", "Law firms"),
        (r"\b(real estate|realtors?|brokers?)\b", "Real estate agents"),
        (r"\b(restaurants?|cafes?)\b", "Restaurant owners"),
        (r"\b(coaches|coach|consultants?)\b", "Coaches & consultants"),
        (r"\b(agency|agencies)\b", "Marketing agencies"),
        (r"\b(e-?commerce|online stores?|shopify)\b", "E-commerce brands"),
        (r"\b(saas|software|startups?)\b", "SaaS & tech companies"),
        (r"\b(small|local) business(es)?\b", "Small business owners"),
    ]
    .iter()
    .map(|&(p, label)| {
        let re = compile_pattern(p, "audience table").expect("built-in audience patterns are valid");
        (re, label)
    })
    .collect()
});

static RESULT_METRIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_pattern(
        r"\b\d[\d,.]*%?\s*(?:increase|growth|more|surge|boost|jump|rise|roi)\b(?:\s+in\s+[a-z]+)?",
        "case study metric",
    )
    .expect("valid result metric regex")
});

static DOCTOR_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_pattern(r"\bdr\.?\s+([a-z][a-z'-]+)", "case study name")
        .expect("valid doctor name regex")
});

/// Most frequent key; ties go to the earliest inserted.
pub(crate) fn most_frequent(counts: &FrequencyMap) -> Option<(&str, usize)> {
    let mut best: Option<(&str, usize)> = None;
    for (key, &count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((key.as_str(), count));
        }
    }
    best
}

/// Primary text, headline and description of one ad, original case. This is
/// the text theme detection reads.
pub(crate) fn copy_text(ad: &Ad) -> String {
    [
        Some(ad.primary_text.as_str()),
        ad.headline.as_deref(),
        ad.description.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

/// [`copy_text`] of every ad in the bucket joined with spaces.
pub(crate) fn bucket_text(ads: &[&Ad]) -> String {
    ads.iter()
        .map(|ad| copy_text(ad))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The most repeated first sentence across the bucket.
pub(crate) fn extract_hook(ads: &[&Ad]) -> String {
    let mut counts = FrequencyMap::new();
    for ad in ads {
        if let Some(m) = FIRST_SENTENCE_RE.find(ad.primary_text.trim()) {
            let sentence = m.as_str().trim();
            let body = sentence.trim_end_matches(['.', '!', '?']).trim();
            if !body.is_empty() {
                *counts.entry(sentence.to_string()).or_insert(0) += 1;
            }
        }
    }
    most_frequent(&counts).map_or_else(|| NO_HOOK.to_string(), |(hook, _)| hook.to_string())
}

/// First offer-shaped phrase, trying each pattern in order.
pub(crate) fn extract_offer(text: &str) -> String {
    OFFER_PATTERNS
        .iter()
        .find_map(|re| re.find(text))
        .map_or_else(
            || DEFAULT_OFFER.to_string(),
            |m| truncate_chars(m.as_str(), MAX_OFFER_CHARS),
        )
}

/// Dominant explicit CTA and the share of bucket ads that use it.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn dominant_cta(ads: &[&Ad]) -> (String, u32) {
    let mut counts = FrequencyMap::new();
    for ad in ads {
        if let Some(cta) = ad.cta.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            *counts.entry(cta.to_string()).or_insert(0) += 1;
        }
    }
    match most_frequent(&counts) {
        Some((cta, count)) => (
            cta.to_string(),
            percentage(count, ads.len()).round() as u32,
        ),
        None => (DEFAULT_CTA.to_string(), 0),
    }
}

pub(crate) fn extract_pain_points(lower_text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    PAIN_POINTS
        .iter()
        .filter(|(keyword, _)| lower_text.contains(keyword))
        .filter(|(_, label)| seen.insert(*label))
        .take(MAX_PAIN_POINTS)
        .map(|(_, label)| (*label).to_string())
        .collect()
}

pub(crate) fn infer_audience(text: &str, limit: usize) -> Vec<String> {
    let labels: Vec<String> = AUDIENCE_PATTERNS
        .iter()
        .filter(|(re, _)| re.is_match(text))
        .take(limit)
        .map(|(_, label)| (*label).to_string())
        .collect();
    if labels.is_empty() {
        vec![DEFAULT_AUDIENCE.to_string()]
    } else {
        labels
    }
}

/// `"Video"` or `"Image"` by majority of `mediaType`; ties are `"Mixed"`.
pub(crate) fn dominant_format(ads: &[&Ad]) -> String {
    let count = |kind: &str| {
        ads.iter()
            .filter(|ad| {
                ad.media_type
                    .as_deref()
                    .is_some_and(|m| m.trim().eq_ignore_ascii_case(kind))
            })
            .count()
    };
    let (video, image) = (count("video"), count("image"));
    match video.cmp(&image) {
        std::cmp::Ordering::Greater => "Video".to_string(),
        std::cmp::Ordering::Less => "Image".to_string(),
        std::cmp::Ordering::Equal => "Mixed".to_string(),
    }
}

pub(crate) fn video_lengths(ads: &[&Ad]) -> Vec<u32> {
    let mut lengths: Vec<u32> = ads.iter().filter_map(|ad| ad.video_duration_secs).collect();
    lengths.sort_unstable();
    lengths.dedup();
    lengths
}

/// Distinct primary texts in the bucket.
pub(crate) fn count_variations(ads: &[&Ad]) -> usize {
    ads.iter()
        .map(|ad| ad.primary_text.trim())
        .collect::<HashSet<_>>()
        .len()
}

pub(crate) fn landing_page(ads: &[&Ad]) -> Option<String> {
    ads.iter()
        .filter_map(|ad| ad.destination_url.as_deref())
        .map(str::trim)
        .find(|url| !url.is_empty())
        .map(str::to_string)
}

/// A case study exists only when a result metric is stated.
pub(crate) fn extract_case_study(
    text: &str,
    theme: Theme,
    pain_points: &[String],
) -> Option<CaseStudy> {
    let result = RESULT_METRIC_RE.find(text)?.as_str().trim().to_string();
    let name = DOCTOR_NAME_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or_else(
            || "Featured client".to_string(),
            |m| format!("Dr. {}", capitalize(m.as_str())),
        );
    let pain_point = pain_points
        .first()
        .cloned()
        .unwrap_or_else(|| "Growth plateau".to_string());

    Some(CaseStudy {
        name,
        result,
        pain_point,
        solution_angle: theme.solution_angle().to_string(),
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;

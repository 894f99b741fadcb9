//! Corpus-level copy statistics: vocabulary, phrases, CTAs, hashtags,
//! length, readability and emoji usage.

use std::sync::LazyLock;

use adintel_core::{Ad, CtaKind};
use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde::Serialize;

use crate::cta::CtaPatterns;
use crate::text::{
    flesch_reading_ease, is_stopword, is_token, sorted_by_count, split_sentences, tokenize, top_n,
    words, FrequencyMap, TermCount,
};

const TOP_KEYWORDS: usize = 20;
const TOP_PHRASES: usize = 10;
const TOP_HASHTAGS: usize = 10;
/// Phrases seen once are noise.
const MIN_PHRASE_COUNT: usize = 2;

static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{1F600}-\x{1F64F}\x{1F300}-\x{1F5FF}\x{1F680}-\x{1F6FF}]")
        .expect("valid emoji regex")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyAnalysis {
    pub total_ads: usize,
    /// Non-stopword token counts across all primary text.
    pub word_frequency: FrequencyMap,
    pub top_keywords: Vec<TermCount>,
    /// Sentence-scoped 2- and 3-grams seen at least twice.
    pub common_phrases: Vec<TermCount>,
    /// Explicit CTA buttons plus CTA phrases found in copy, most frequent first.
    pub cta_distribution: FrequencyMap,
    /// In-copy CTA matches per CTA kind.
    pub cta_kinds: IndexMap<CtaKind, usize>,
    pub hashtag_frequency: FrequencyMap,
    pub top_hashtags: Vec<TermCount>,
    /// Mean `primaryText` length in characters, rounded.
    pub avg_copy_length: usize,
    /// Flesch Reading Ease over all primary text, 0–100.
    pub readability_score: u32,
    /// Distinct emoji in first-seen order.
    pub emojis: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CopyAnalyzer {
    cta_patterns: CtaPatterns,
}

impl CopyAnalyzer {
    #[must_use]
    pub fn new(cta_patterns: CtaPatterns) -> Self {
        Self { cta_patterns }
    }

    #[must_use]
    pub fn analyze(&self, ads: &[Ad]) -> CopyAnalysis {
        if ads.is_empty() {
            return CopyAnalysis::default();
        }

        let word_frequency = word_frequency(ads);
        let top_keywords = top_n(&word_frequency, TOP_KEYWORDS);
        let (cta_distribution, cta_kinds) = self.cta_distribution(ads);
        let hashtag_frequency = hashtag_frequency(ads);
        let top_hashtags = top_n(&hashtag_frequency, TOP_HASHTAGS);

        let corpus = ads
            .iter()
            .map(|ad| ad.primary_text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let analysis = CopyAnalysis {
            total_ads: ads.len(),
            top_keywords,
            common_phrases: common_phrases(ads),
            cta_distribution,
            cta_kinds,
            top_hashtags,
            avg_copy_length: avg_copy_length(ads),
            readability_score: flesch_reading_ease(&corpus),
            emojis: extract_emojis(&corpus),
            word_frequency,
            hashtag_frequency,
        };

        tracing::debug!(
            ads = analysis.total_ads,
            vocabulary = analysis.word_frequency.len(),
            phrases = analysis.common_phrases.len(),
            readability = analysis.readability_score,
            "copy analysis complete"
        );
        analysis
    }

    fn cta_distribution(&self, ads: &[Ad]) -> (FrequencyMap, IndexMap<CtaKind, usize>) {
        let mut distribution = FrequencyMap::new();
        let mut kinds: IndexMap<CtaKind, usize> = IndexMap::new();

        for ad in ads {
            if let Some(cta) = ad.cta.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
                *distribution.entry(cta.to_string()).or_insert(0) += 1;
            }
            for found in self.cta_patterns.find_all(&ad.primary_text) {
                *distribution.entry(found.phrase).or_insert(0) += 1;
                *kinds.entry(found.kind).or_insert(0) += 1;
            }
        }

        (sorted_by_count(distribution), kinds)
    }
}

fn word_frequency(ads: &[Ad]) -> FrequencyMap {
    let mut frequency = FrequencyMap::new();
    for ad in ads {
        for token in tokenize(&ad.primary_text) {
            if !is_stopword(&token) {
                *frequency.entry(token).or_insert(0) += 1;
            }
        }
    }
    frequency
}

/// Counts 2- and 3-word windows inside each sentence. Windows run over every
/// word, so a phrase is always contiguous in the copy. A window is dropped if
/// it holds a word of two characters or fewer, or if half or more of its
/// words are stopwords.
fn common_phrases(ads: &[Ad]) -> Vec<TermCount> {
    let mut counts = FrequencyMap::new();

    for ad in ads {
        for sentence in split_sentences(&ad.primary_text) {
            let sentence_words = words(sentence);
            for n in 2..=3 {
                for window in sentence_words.windows(n) {
                    if !window.iter().all(|w| is_token(w)) {
                        continue;
                    }
                    let stopwords = window.iter().filter(|w| is_stopword(w)).count();
                    if stopwords * 2 >= n {
                        continue;
                    }
                    *counts.entry(window.join(" ")).or_insert(0) += 1;
                }
            }
        }
    }

    counts.retain(|_, count| *count >= MIN_PHRASE_COUNT);
    top_n(&counts, TOP_PHRASES)
}

fn hashtag_frequency(ads: &[Ad]) -> FrequencyMap {
    let mut frequency = FrequencyMap::new();
    for tag in ads.iter().flat_map(|ad| &ad.hashtags) {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() {
            *frequency.entry(tag).or_insert(0) += 1;
        }
    }
    frequency
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn avg_copy_length(ads: &[Ad]) -> usize {
    if ads.is_empty() {
        return 0;
    }
    let total: usize = ads.iter().map(|ad| ad.primary_text.chars().count()).sum();
    (total as f64 / ads.len() as f64).round() as usize
}

fn extract_emojis(text: &str) -> Vec<String> {
    EMOJI_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
#[path = "copy_test.rs"]
mod tests;

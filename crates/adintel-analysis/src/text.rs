//! Text helpers shared by the copy analyzer and campaign synthesizer.

use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

/// Term → occurrence count, in first-seen order.
pub type FrequencyMap = IndexMap<String, usize>;

/// A ranked entry pulled out of a [`FrequencyMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

pub(crate) static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "from", "up", "about", "into", "over", "after", "is", "are", "was", "were", "be", "been",
        "being", "have", "has", "had", "do", "does", "did", "will", "would", "could", "should",
        "may", "might", "can", "this", "that", "these", "those", "it", "its", "you", "your",
        "we", "our", "they", "their", "them", "he", "she", "his", "her", "i", "me", "my", "not",
        "no", "so", "if", "as", "just", "than", "then", "too", "very", "all", "any", "more",
        "what", "which", "who", "how", "when", "where", "why",
    ]
    .into_iter()
    .collect()
});

static NON_TOKEN_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s#@]").expect("valid token strip regex"));

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid sentence regex"));

pub(crate) fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// Lowercase, strip everything except word characters, `#` and `@`, and split
/// on whitespace. Every word is kept, in order.
pub(crate) fn words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    NON_TOKEN_CHARS
        .replace_all(&lower, "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Tokens of three or more characters. Stopwords are kept.
pub(crate) fn is_token(word: &str) -> bool {
    word.chars().count() > 2
}

/// [`words`] without the short ones.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    words(text).into_iter().filter(|w| is_token(w)).collect()
}

/// Non-empty, trimmed fragments between `.`, `!` and `?` runs.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Vowel-group syllable estimate. Words of three letters or fewer count as
/// one; a trailing silent `e` is dropped; never below one.
pub(crate) fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect();
    if letters.len() <= 3 {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0usize;
    let mut in_vowel_run = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !in_vowel_run {
            groups += 1;
        }
        in_vowel_run = vowel;
    }

    if letters.last() == Some(&'e') {
        groups = groups.saturating_sub(1);
    }
    groups.max(1)
}

/// Flesch Reading Ease over `text`, clamped to `[0, 100]` and rounded.
/// Text without words scores 0.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub(crate) fn flesch_reading_ease(text: &str) -> u32 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0;
    }
    let sentences = split_sentences(text).len().max(1);
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let words_per_sentence = words.len() as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words.len() as f64;
    let score = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    score.clamp(0.0, 100.0).round() as u32
}

/// Top `n` entries by count, descending. The sort is stable, so equal
/// counts keep the map's first-seen order.
pub(crate) fn top_n(map: &FrequencyMap, n: usize) -> Vec<TermCount> {
    let mut entries: Vec<(&String, &usize)> = map.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    entries
        .into_iter()
        .take(n)
        .map(|(term, &count)| TermCount {
            term: term.clone(),
            count,
        })
        .collect()
}

/// Reorder a frequency map by descending count, keeping first-seen order
/// among equal counts.
pub(crate) fn sorted_by_count(map: FrequencyMap) -> FrequencyMap {
    let mut entries: Vec<(String, usize)> = map.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.into_iter().collect()
}

/// First `max` characters of `s`, trimmed.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect::<String>().trim().to_string()
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    part as f64 / whole.max(1) as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_strips_punctuation_and_short_tokens() {
        let tokens = tokenize("Hi! Grow your #Practice @today, it's easy.");
        assert_eq!(
            tokens,
            vec!["grow", "your", "#practice", "@today", "its", "easy"]
        );
    }

    #[test]
    fn words_keep_short_words_in_order() {
        assert_eq!(words("Save 20% off!"), vec!["save", "20", "off"]);
    }

    #[test]
    fn split_sentences_drops_empty_fragments() {
        assert_eq!(
            split_sentences("One. Two!! Three?  "),
            vec!["One", "Two", "Three"]
        );
    }

    #[test]
    fn syllables_short_words_are_one() {
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("cat"), 1);
    }

    #[test]
    fn syllables_count_vowel_groups() {
        assert_eq!(count_syllables("marketing"), 3);
        assert_eq!(count_syllables("beautiful"), 3);
    }

    #[test]
    fn syllables_drop_silent_e_with_floor() {
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("practice"), 2);
    }

    #[test]
    fn flesch_is_zero_without_words() {
        assert_eq!(flesch_reading_ease("   "), 0);
    }

    #[test]
    fn flesch_simple_text_scores_high() {
        let score = flesch_reading_ease("The cat sat. The dog ran.");
        assert_eq!(score, 100);
    }

    #[test]
    fn flesch_dense_text_scores_low() {
        let score = flesch_reading_ease(
            "Comprehensive organizational transformation necessitates interdisciplinary collaboration",
        );
        assert_eq!(score, 0);
    }

    #[test]
    fn top_n_is_stable_for_ties() {
        let mut map = FrequencyMap::new();
        map.insert("alpha".to_string(), 1);
        map.insert("beta".to_string(), 2);
        map.insert("gamma".to_string(), 2);
        let top = top_n(&map, 2);
        assert_eq!(top[0].term, "beta");
        assert_eq!(top[1].term, "gamma");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
    }
}

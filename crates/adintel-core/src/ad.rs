use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::AdCategory;
use crate::CoreError;

/// A single ad as delivered by the extraction layer.
///
/// Only `id` and `primaryText` are required on the wire; everything else is
/// treated as absent when missing. The classifier is the only stage that
/// adds data, and it does so through [`Ad::with_category`], never in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    pub id: String,
    #[serde(default)]
    pub competitor: String,
    /// Source ad library, e.g. `"facebook"`, `"tiktok"`, `"linkedin"`.
    #[serde(default)]
    pub platform: String,
    pub primary_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Call-to-action button text, e.g. `"Learn More"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// Raw start date as scraped. Parsed lazily; unparseable values are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// `"video"`, `"image"`, `"carousel"`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_url: Option<String>,
    /// Placements the ad also runs on, when the library reports them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_duration_secs: Option<u32>,
    /// Reported impressions, when the ad library exposes delivery data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impressions: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reach: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spend: Option<SpendRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<AdCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_confidence: Option<f64>,
}

/// Reported spend bracket, in the ad library's currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpendRange {
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl Ad {
    /// Minimal ad with only the required fields set.
    #[must_use]
    pub fn new(id: impl Into<String>, primary_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            competitor: String::new(),
            platform: String::new(),
            primary_text: primary_text.into(),
            headline: None,
            description: None,
            cta: None,
            hashtags: Vec::new(),
            start_date: None,
            end_date: None,
            media_type: None,
            destination_url: None,
            platforms: Vec::new(),
            video_duration_secs: None,
            impressions: None,
            reach: None,
            spend: None,
            category: None,
            category_confidence: None,
        }
    }

    /// Returns a copy of this ad annotated with a category and confidence.
    #[must_use]
    pub fn with_category(&self, category: AdCategory, confidence: f64) -> Self {
        Self {
            category: Some(category),
            category_confidence: Some(confidence),
            ..self.clone()
        }
    }

    /// Checks the fields every downstream stage relies on.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidAd`] if the ad has a blank `id`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::InvalidAd {
                id: self.id.clone(),
                reason: "id must be non-empty".to_string(),
            });
        }
        Ok(())
    }

    /// Lowercased `primaryText`, `headline`, `description`, `cta` and
    /// hashtags joined by single spaces, skipping empty fields.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = vec![self.primary_text.as_str()];
        parts.extend(self.headline.as_deref());
        parts.extend(self.description.as_deref());
        parts.extend(self.cta.as_deref());
        parts.extend(self.hashtags.iter().map(String::as_str));
        parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// `true` when the ad library reported impressions or spend for this ad.
    #[must_use]
    pub fn has_delivery_data(&self) -> bool {
        self.impressions.is_some() || self.spend.is_some()
    }

    #[must_use]
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_date.as_deref().and_then(parse_loose_date)
    }

    #[must_use]
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_date.as_deref().and_then(parse_loose_date)
    }
}

/// Parses RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` timestamps (taken
/// as UTC) and bare `YYYY-MM-DD` dates. Anything else yields `None`.
fn parse_loose_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_camel_case_ad() {
        let json = r#"{"id": "a1", "primaryText": "Hello there"}"#;
        let ad: Ad = serde_json::from_str(json).expect("parse");
        assert_eq!(ad.id, "a1");
        assert_eq!(ad.primary_text, "Hello there");
        assert!(ad.hashtags.is_empty());
        assert!(ad.cta.is_none());
        assert!(ad.category.is_none());
    }

    #[test]
    fn missing_primary_text_is_a_parse_error() {
        let json = r#"{"id": "a1"}"#;
        assert!(serde_json::from_str::<Ad>(json).is_err());
    }

    #[test]
    fn deserializes_delivery_data() {
        let json = r#"{
            "id": "a2",
            "primaryText": "x",
            "impressions": 12000,
            "spend": {"lower_bound": 100.0, "upper_bound": 199.0},
            "destinationUrl": "https://example.com"
        }"#;
        let ad: Ad = serde_json::from_str(json).expect("parse");
        assert_eq!(ad.impressions, Some(12_000));
        assert_eq!(ad.spend.map(|s| s.upper_bound), Some(199.0));
        assert!(ad.has_delivery_data());
        assert_eq!(ad.destination_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn with_category_leaves_original_untouched() {
        let ad = Ad::new("a1", "text");
        let tagged = ad.with_category(AdCategory::Event, 0.5);
        assert!(ad.category.is_none());
        assert_eq!(tagged.category, Some(AdCategory::Event));
        assert_eq!(tagged.category_confidence, Some(0.5));
        assert_eq!(tagged.primary_text, ad.primary_text);
    }

    #[test]
    fn validate_rejects_blank_id() {
        let ad = Ad::new("  ", "text");
        let err = ad.validate().unwrap_err();
        assert!(err.to_string().contains("id must be non-empty"));
    }

    #[test]
    fn searchable_text_skips_missing_fields() {
        let mut ad = Ad::new("a1", "Buy NOW");
        ad.cta = Some("Shop Now".to_string());
        ad.hashtags = vec!["#Deal".to_string()];
        assert_eq!(ad.searchable_text(), "buy now shop now #deal");
    }

    #[test]
    fn parses_supported_date_shapes() {
        let mut ad = Ad::new("a1", "x");
        ad.start_date = Some("2024-03-01".to_string());
        ad.end_date = Some("2024-03-05T12:00:00Z".to_string());
        assert_eq!(
            ad.start_time().map(|d| d.to_rfc3339()),
            Some("2024-03-01T00:00:00+00:00".to_string())
        );
        assert!(ad.end_time().is_some());
    }

    #[test]
    fn unparseable_date_is_absent() {
        let mut ad = Ad::new("a1", "x");
        ad.start_date = Some("last tuesday".to_string());
        assert!(ad.start_time().is_none());
    }
}

//! End-to-end tests for `IntelPipeline` over JSON ad fixtures.

use std::path::PathBuf;

use adintel_analysis::{AnalysisError, Confidence, IntelPipeline, Theme};
use adintel_core::{Ad, AdCategory, AppConfig, Environment};
use chrono::{TimeZone, Utc};

fn pipeline() -> IntelPipeline {
    IntelPipeline::default()
        .with_reference_time(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
}

fn fixture_ads() -> Vec<Ad> {
    serde_json::from_value(serde_json::json!([
        {
            "id": "a1",
            "platform": "facebook",
            "primaryText": "\"This product changed my life!\" - John D. ★★★★★ Best purchase ever!",
            "cta": "Learn More",
            "startDate": "2024-05-02"
        },
        {
            "id": "a2",
            "platform": "instagram",
            "primaryText": "Get 20% off your first order. Limited time only!",
            "cta": "Shop Now",
            "mediaType": "image",
            "hashtags": ["#sale"]
        },
        {
            "id": "a3",
            "platform": "facebook",
            "primaryText": "5 tips to learn how to grow your practice. Learn more today.",
            "cta": "Learn More",
            "mediaType": "video",
            "videoDurationSecs": 30
        },
        {
            "id": "a4",
            "platform": "facebook",
            "primaryText": "We're hiring! Join our team of engineers. Apply now.",
            "cta": "Learn More"
        }
    ]))
    .expect("fixture ads should deserialize")
}

fn rules_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("rules.yaml")
}

fn config_with_rules(rules_path: Option<PathBuf>) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        rules_path,
        industry: None,
        max_audience_labels: 3,
    }
}

#[test]
fn classify_annotates_every_ad_with_bounded_confidence() {
    let ads = fixture_ads();
    let classified = pipeline().classify(&ads).expect("fixtures are valid");

    assert_eq!(classified.len(), ads.len());
    for ad in &classified {
        assert!(ad.category.is_some(), "ad {} not categorized", ad.id);
        let confidence = ad.category_confidence.expect("confidence set");
        assert!((0.0..=1.0).contains(&confidence), "confidence {confidence}");
    }
    assert!(ads.iter().all(|ad| ad.category.is_none()));
}

#[test]
fn quoted_review_with_stars_is_a_testimonial() {
    let classified = pipeline().classify(&fixture_ads()).expect("valid");
    assert_eq!(classified[0].category, Some(AdCategory::Testimonial));
    assert!(classified[0].category_confidence.unwrap_or_default() > 0.0);
    assert_eq!(classified[3].category, Some(AdCategory::Hiring));
}

#[test]
fn classify_rejects_blank_ids() {
    let mut ads = fixture_ads();
    ads[2].id = "  ".to_string();
    let err = pipeline().classify(&ads).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidAd(_)), "got {err:?}");
}

#[test]
fn report_covers_every_stage() {
    let pipeline = pipeline();
    let classified = pipeline.classify(&fixture_ads()).expect("valid");
    let report = pipeline.analyze("Acme", &classified, Some("ecommerce"));

    assert_eq!(report.total_ads, 4);
    assert_eq!(report.category_distribution.values().sum::<usize>(), 4);
    assert_eq!(report.category_distribution.len(), AdCategory::ALL.len());

    assert_eq!(report.copy.total_ads, 4);
    let (top_cta, _) = report
        .copy
        .cta_distribution
        .first()
        .expect("cta distribution populated");
    assert_eq!(top_cta, "Learn More");

    let campaign_ads: usize = report
        .campaigns
        .campaigns
        .iter()
        .map(|c| c.ads.len())
        .sum();
    assert_eq!(campaign_ads, 4);

    assert_eq!(report.spend.confidence, Confidence::Low);
    assert_eq!(report.spend.platforms.len(), 2);
    assert!(report.spend.total.low <= report.spend.total.mid);
    assert!(report.spend.total.mid <= report.spend.total.high);
}

#[test]
fn empty_corpus_produces_empty_report() {
    let report = pipeline().analyze("Acme", &[], None);
    assert_eq!(report.total_ads, 0);
    assert_eq!(report.category_distribution.values().sum::<usize>(), 0);
    assert!(report.copy.word_frequency.is_empty());
    assert!(report.campaigns.campaigns.is_empty());
    assert_eq!(report.spend.total.high, 0);
    assert_eq!(report.spend.confidence, Confidence::Low);
    assert_eq!(report.spend.methodology, "No ads to analyze");
}

#[test]
fn case_study_is_extracted_from_testimonial_copy() {
    let ads: Vec<Ad> = serde_json::from_value(serde_json::json!([
        {
            "id": "m1",
            "primaryText": "Dr. Mahmood saw a 196% surge in calls after switching to us."
        }
    ]))
    .expect("valid ad");
    let report = pipeline().analyze("Acme", &ads, None);

    let campaign = &report.campaigns.campaigns[0];
    assert_eq!(campaign.theme, Theme::Testimonial);
    let study = campaign.case_study.as_ref().expect("case study");
    assert!(study.result.contains("196%"));
    assert!(study.name.contains("Mahmood"));
}

#[test]
fn reported_delivery_data_switches_spend_to_high_confidence() {
    let ads: Vec<Ad> = serde_json::from_value(serde_json::json!([
        {
            "id": "d1",
            "platform": "facebook",
            "primaryText": "Shop now.",
            "spend": { "lower_bound": 100.0, "upper_bound": 200.0 }
        }
    ]))
    .expect("valid ad");
    let report = pipeline().analyze("Acme", &ads, None);
    assert_eq!(report.spend.confidence, Confidence::High);
    assert_eq!(report.spend.total.mid, 150);
}

#[test]
fn reports_are_byte_identical_across_runs() {
    let pipeline = pipeline();
    let classified = pipeline.classify(&fixture_ads()).expect("valid");
    let first = serde_json::to_string(&pipeline.analyze("Acme", &classified, None))
        .expect("serializes");
    let second = serde_json::to_string(&pipeline.analyze("Acme", &classified, None))
        .expect("serializes");
    assert_eq!(first, second);
}

#[test]
fn checked_in_rules_file_matches_built_in_tables() {
    let from_file = IntelPipeline::from_config(&config_with_rules(Some(rules_path())))
        .expect("checked-in rules load");
    let built_in = IntelPipeline::from_config(&config_with_rules(None)).expect("defaults");

    let ads = fixture_ads();
    let a = from_file.classify(&ads).expect("valid");
    let b = built_in.classify(&ads).expect("valid");
    assert_eq!(a, b);
    assert_eq!(
        from_file.classifier().rules().len(),
        built_in.classifier().rules().len()
    );
}

#[test]
fn missing_rules_file_is_a_config_error() {
    let config = config_with_rules(Some(PathBuf::from("/nonexistent/rules.yaml")));
    let err = IntelPipeline::from_config(&config).unwrap_err();
    assert!(matches!(err, AnalysisError::Config(_)), "got {err:?}");
}

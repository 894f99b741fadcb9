use adintel_core::SpendRange;
use chrono::TimeZone;

use super::*;

fn estimator() -> SpendEstimator {
    SpendEstimator::default()
        .with_reference_time(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
}

fn ad_on(id: &str, platform: &str) -> Ad {
    let mut ad = Ad::new(id, "Some copy.");
    ad.platform = platform.to_string();
    ad
}

#[test]
fn empty_input_is_all_zero_and_low_confidence() {
    let estimate = estimator().estimate(&[], Some("healthcare"));
    assert_eq!(estimate.total, SpendBand::default());
    assert_eq!(estimate.daily, SpendBand::default());
    assert_eq!(estimate.monthly, SpendBand::default());
    assert_eq!(estimate.confidence, Confidence::Low);
    assert_eq!(estimate.methodology, "No ads to analyze");
    assert!(estimate.platforms.is_empty());
}

#[test]
fn heuristic_path_uses_benchmark_impressions() {
    let mut ad = ad_on("1", "facebook");
    ad.start_date = Some("2024-05-02".to_string());
    let estimate = estimator().estimate(&[ad], None);

    assert_eq!(estimate.confidence, Confidence::Low);
    assert!((estimate.avg_days_active - 30.0).abs() < f64::EPSILON);
    // 4,000 daily impressions x 30 days at $8.50 CPM
    assert_eq!(estimate.total.mid, 1_020);
    assert_eq!(estimate.total.high, 3_978);
    assert_eq!(estimate.daily.mid, 34);
    assert_eq!(estimate.monthly.mid, 1_020);
    assert_eq!(estimate.platforms[0].impressions.mid, 120_000);
    assert!(estimate.methodology.starts_with("Heuristic"));
}

#[test]
fn industry_override_changes_cpm() {
    let ad = ad_on("1", "Facebook");
    let estimate = estimator().estimate(&[ad], Some("Healthcare"));
    assert!((estimate.platforms[0].cpm - 11.20).abs() < 1e-9);
    assert_eq!(estimate.total.mid, 1_344);
    assert!(estimate.methodology.contains("Healthcare"));
}

#[test]
fn untabled_industry_is_priced_at_platform_average() {
    let ad = ad_on("1", "facebook");
    let estimate = estimator().estimate(&[ad], Some("aerospace"));
    assert!((estimate.platforms[0].cpm - 8.50).abs() < 1e-9);
    assert!(estimate.methodology.contains("platform average"));
    assert!(!estimate.methodology.contains("aerospace"));
}

#[test]
fn partial_industry_coverage_is_named_as_mixed() {
    let ads = [ad_on("1", "facebook"), ad_on("2", "snapchat")];
    let estimate = estimator().estimate(&ads, Some("Healthcare"));
    assert!((estimate.platforms[1].cpm - 3.00).abs() < 1e-9);
    assert!(estimate
        .methodology
        .contains("Healthcare CPM benchmarks where tabled, platform averages elsewhere"));
}

#[test]
fn missing_start_dates_default_to_thirty_days() {
    let estimate = estimator().estimate(&[ad_on("1", "tiktok")], None);
    assert!((estimate.avg_days_active - 30.0).abs() < f64::EPSILON);
}

#[test]
fn days_active_uses_end_date_and_rounds_up() {
    let mut ended = ad_on("1", "facebook");
    ended.start_date = Some("2024-01-01".to_string());
    ended.end_date = Some("2024-01-11".to_string());
    let mut running = ad_on("2", "facebook");
    running.start_date = Some("2024-05-22".to_string());
    assert!((estimator().avg_days_active(&[ended, running]) - 10.0).abs() < f64::EPSILON);

    let mut partial = ad_on("3", "facebook");
    partial.start_date = Some("2024-05-31T12:00:00".to_string());
    assert!((estimator().avg_days_active(&[partial]) - 1.0).abs() < f64::EPSILON);
}

#[test]
fn actual_path_prefers_reported_spend_then_impressions() {
    let mut spent = ad_on("1", "facebook");
    spent.spend = Some(SpendRange {
        lower_bound: 100.0,
        upper_bound: 300.0,
    });
    let mut delivered = ad_on("2", "facebook");
    delivered.impressions = Some(10_000);
    let bare = ad_on("3", "facebook");

    let estimate = estimator().estimate(&[spent, delivered, bare], None);
    assert_eq!(estimate.confidence, Confidence::High);
    // 200 reported midpoint + 10k impressions at $8.50
    assert_eq!(estimate.total.mid, 285);
    assert_eq!(estimate.total.high, 428);
    assert_eq!(estimate.platforms[0].ad_count, 3);
    assert_eq!(estimate.platforms[0].impressions.mid, 10_000);
}

#[test]
fn reach_is_an_impression_proxy_with_wider_band() {
    let mut reached = ad_on("1", "facebook");
    reached.reach = Some(1_000);
    let mut delivered = ad_on("2", "instagram");
    delivered.impressions = Some(1);

    let estimate = estimator().estimate(&[reached, delivered], None);
    let facebook = &estimate.platforms[0];
    assert_eq!(facebook.platform, "facebook");
    assert_eq!(facebook.impressions.mid, 3_000);
    // 3k impressions at $8.50 = 25.50, banded x0.5 / x2.0
    assert_eq!(facebook.spend.mid, 26);
    assert_eq!(facebook.spend.high, 51);
}

#[test]
fn platforms_are_grouped_case_insensitively_in_first_seen_order() {
    let ads = vec![
        ad_on("1", "Facebook"),
        ad_on("2", "instagram"),
        ad_on("3", "FACEBOOK"),
    ];
    let estimate = estimator().estimate(&ads, None);
    let names: Vec<_> = estimate
        .platforms
        .iter()
        .map(|p| (p.platform.as_str(), p.ad_count))
        .collect();
    assert_eq!(names, vec![("facebook", 2), ("instagram", 1)]);
}

#[test]
fn unknown_platform_falls_back_to_default_benchmark() {
    let estimate = estimator().estimate(&[ad_on("1", "myspace")], Some("finance"));
    assert!((estimate.platforms[0].cpm - DEFAULT_BENCHMARK.cpm).abs() < 1e-9);
}

#[test]
fn bands_are_ordered() {
    let mut ad = ad_on("1", "linkedin");
    ad.start_date = Some("2024-03-01".to_string());
    let estimate = estimator().estimate(&[ad, ad_on("2", "pinterest")], Some("technology"));
    for band in [estimate.daily, estimate.monthly, estimate.total] {
        assert!(band.low <= band.mid && band.mid <= band.high, "{band:?}");
    }
}

#[test]
fn estimate_is_idempotent() {
    let mut ad = ad_on("1", "tiktok");
    ad.start_date = Some("2024-04-10".to_string());
    let ads = vec![ad, ad_on("2", "youtube")];
    let estimator = estimator();
    assert_eq!(
        estimator.estimate(&ads, Some("retail")),
        estimator.estimate(&ads, Some("retail"))
    );
}

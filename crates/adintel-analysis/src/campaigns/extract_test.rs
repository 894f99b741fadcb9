use super::*;

fn ad(id: &str, text: &str) -> Ad {
    Ad::new(id, text)
}

// -----------------------------------------------------------------------
// hook
// -----------------------------------------------------------------------

#[test]
fn hook_is_most_repeated_first_sentence() {
    let a = ad("1", "Tired of empty chairs? We can help.");
    let b = ad("2", "Your smile matters. Book now.");
    let c = ad("3", "Tired of empty chairs? Call today.");
    assert_eq!(extract_hook(&[&a, &b, &c]), "Tired of empty chairs?");
}

#[test]
fn hook_tie_goes_to_first_seen() {
    let a = ad("1", "First hook. Body.");
    let b = ad("2", "Second hook. Body.");
    assert_eq!(extract_hook(&[&a, &b]), "First hook.");
}

#[test]
fn hook_without_terminated_sentence_is_na() {
    let a = ad("1", "no punctuation here");
    assert_eq!(extract_hook(&[&a]), NO_HOOK);
}

// -----------------------------------------------------------------------
// offer
// -----------------------------------------------------------------------

#[test]
fn offer_prefers_free_pattern() {
    let text = "Download our app. Get your free dental marketing audit today!";
    assert_eq!(extract_offer(text), "free dental marketing audit today");
}

#[test]
fn offer_is_truncated_to_sixty_chars() {
    let text = format!("Access to {}", "x".repeat(100));
    let offer = extract_offer(&text);
    assert_eq!(offer.chars().count(), 60);
    assert!(offer.starts_with("Access to"));
}

#[test]
fn offer_defaults_when_nothing_matches() {
    assert_eq!(extract_offer("We fix teeth."), DEFAULT_OFFER);
}

// -----------------------------------------------------------------------
// cta
// -----------------------------------------------------------------------

#[test]
fn dominant_cta_reports_share() {
    let mut a = ad("1", "x");
    a.cta = Some("Book Now".to_string());
    let mut b = ad("2", "y");
    b.cta = Some("Book Now".to_string());
    let mut c = ad("3", "z");
    c.cta = Some("Learn More".to_string());
    assert_eq!(dominant_cta(&[&a, &b, &c]), ("Book Now".to_string(), 67));
}

#[test]
fn dominant_cta_defaults_without_explicit_ctas() {
    let a = ad("1", "x");
    assert_eq!(dominant_cta(&[&a]), (DEFAULT_CTA.to_string(), 0));
}

// -----------------------------------------------------------------------
// pain points & audience
// -----------------------------------------------------------------------

#[test]
fn pain_points_follow_table_order_and_cap_at_five() {
    let text = "losing patients, stuck, wasting money, tired of it, struggling, \
                frustrated, overwhelmed, no time";
    let points = extract_pain_points(text);
    assert_eq!(points.len(), 5);
    assert_eq!(points[0], "Frustrated with the status quo");
    assert_eq!(points[1], "Struggling to grow");
    assert!(!points.contains(&"Losing customers".to_string()));
}

#[test]
fn audience_defaults_to_business_professionals() {
    assert_eq!(
        infer_audience("Grow faster.", 3),
        vec![DEFAULT_AUDIENCE.to_string()]
    );
}

#[test]
fn audience_is_limited() {
    let text = "For dentists, doctors, lawyers and realtors.";
    let labels = infer_audience(text, 2);
    assert_eq!(
        labels,
        vec![
            "Dentists & dental practices".to_string(),
            "Medical practices".to_string()
        ]
    );
}

// -----------------------------------------------------------------------
// format, lengths, variations, landing page
// -----------------------------------------------------------------------

#[test]
fn format_majority_and_tie() {
    let mut v1 = ad("1", "a");
    v1.media_type = Some("video".to_string());
    let mut v2 = ad("2", "b");
    v2.media_type = Some("VIDEO".to_string());
    let mut i1 = ad("3", "c");
    i1.media_type = Some("image".to_string());
    assert_eq!(dominant_format(&[&v1, &v2, &i1]), "Video");
    assert_eq!(dominant_format(&[&v1, &i1]), "Mixed");
    assert_eq!(dominant_format(&[&i1]), "Image");
}

#[test]
fn video_lengths_are_sorted_and_unique() {
    let mut a = ad("1", "a");
    a.video_duration_secs = Some(30);
    let mut b = ad("2", "b");
    b.video_duration_secs = Some(15);
    let mut c = ad("3", "c");
    c.video_duration_secs = Some(30);
    assert_eq!(video_lengths(&[&a, &b, &c]), vec![15, 30]);
}

#[test]
fn variations_count_distinct_copy() {
    let a = ad("1", "Same copy");
    let b = ad("2", "Same copy ");
    let c = ad("3", "Other copy");
    assert_eq!(count_variations(&[&a, &b, &c]), 2);
}

#[test]
fn landing_page_skips_blank_urls() {
    let mut a = ad("1", "a");
    a.destination_url = Some("  ".to_string());
    let mut b = ad("2", "b");
    b.destination_url = Some("https://example.com/offer".to_string());
    assert_eq!(
        landing_page(&[&a, &b]).as_deref(),
        Some("https://example.com/offer")
    );
}

// -----------------------------------------------------------------------
// case study
// -----------------------------------------------------------------------

#[test]
fn case_study_extracts_doctor_and_metric() {
    let study = extract_case_study(
        "Dr. Mahmood saw a 196% surge in calls after switching.",
        Theme::Testimonial,
        &[],
    )
    .expect("metric present");
    assert!(study.result.contains("196%"), "result: {}", study.result);
    assert!(study.name.contains("Mahmood"), "name: {}", study.name);
    assert_eq!(study.pain_point, "Growth plateau");
}

#[test]
fn case_study_without_name_uses_placeholder() {
    let study = extract_case_study(
        "Clients see 40% growth in bookings.",
        Theme::Testimonial,
        &["Empty schedule".to_string()],
    )
    .expect("metric present");
    assert_eq!(study.name, "Featured client");
    assert_eq!(study.pain_point, "Empty schedule");
}

#[test]
fn case_study_requires_metric() {
    assert!(extract_case_study("Dr. Smith is great.", Theme::General, &[]).is_none());
}

#[test]
fn bucket_text_includes_headline_and_description() {
    let mut a = ad("1", "Body copy.");
    a.headline = Some("Big headline".to_string());
    a.description = Some(String::new());
    let b = ad("2", "Second body.");
    assert_eq!(bucket_text(&[&a, &b]), "Body copy. Big headline Second body.");
}

#[test]
fn most_frequent_prefers_first_on_tie() {
    let mut counts = FrequencyMap::new();
    counts.insert("a".to_string(), 2);
    counts.insert("b".to_string(), 2);
    assert_eq!(most_frequent(&counts), Some(("a", 2)));
    assert_eq!(most_frequent(&FrequencyMap::new()), None);
}

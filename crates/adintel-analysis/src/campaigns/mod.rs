//! Campaign clustering and synthesis.
//!
//! Ads are bucketed by [`Theme`]; every non-empty bucket becomes a
//! [`Campaign`] with its own extracted hook, offer, CTA mix, pain points,
//! audience and case study. Corpus-level fields are then synthesized across
//! the whole ad set.

mod extract;
mod synthesis;
mod themes;

use adintel_core::Ad;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::text::{percentage, FrequencyMap};

pub use extract::CaseStudy;
pub use synthesis::{
    AudienceSegment, AudienceTargeting, CreativeExecution, InvestmentEstimate, PainPointCategory,
    ValueProposition,
};
pub use themes::{detect_theme, Theme};

const DEFAULT_MAX_AUDIENCE_LABELS: usize = 3;

/// One theme bucket. `ads` borrows from the analyzed slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign<'a> {
    pub id: String,
    pub name: String,
    pub theme: Theme,
    pub ads: Vec<&'a Ad>,
    /// Share of the corpus in this bucket, percent, rounded.
    pub percentage: u32,
    pub variations: usize,
    pub hook: String,
    pub offer: String,
    pub cta: String,
    pub cta_percentage: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_page: Option<String>,
    pub target_audience: Vec<String>,
    pub pain_points: Vec<String>,
    pub format: String,
    pub video_lengths: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_study: Option<CaseStudy>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignAnalysis<'a> {
    pub competitor: String,
    pub total_ads: usize,
    /// Largest share first.
    pub campaigns: Vec<Campaign<'a>>,
    pub investment_estimate: InvestmentEstimate,
    pub pain_point_categories: Vec<PainPointCategory>,
    pub value_propositions: Vec<ValueProposition>,
    pub creative_execution: CreativeExecution,
    pub cta_distribution: FrequencyMap,
    pub audience_targeting: AudienceTargeting,
    pub strategic_strengths: Vec<String>,
    pub strategic_weaknesses: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CampaignAnalyzer {
    as_of: DateTime<Utc>,
    max_audience_labels: usize,
}

impl Default for CampaignAnalyzer {
    fn default() -> Self {
        Self {
            as_of: Utc::now(),
            max_audience_labels: DEFAULT_MAX_AUDIENCE_LABELS,
        }
    }
}

impl CampaignAnalyzer {
    /// Pin "now" for ad-age calculations so repeated runs agree.
    #[must_use]
    pub fn with_reference_time(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = as_of;
        self
    }

    #[must_use]
    pub fn with_max_audience_labels(mut self, limit: usize) -> Self {
        self.max_audience_labels = limit.max(1);
        self
    }

    #[must_use]
    pub fn analyze<'a>(&self, competitor: &str, ads: &'a [Ad]) -> CampaignAnalysis<'a> {
        if ads.is_empty() {
            return CampaignAnalysis {
                competitor: competitor.to_string(),
                total_ads: 0,
                campaigns: Vec::new(),
                investment_estimate: synthesis::investment_estimate(0, None),
                pain_point_categories: Vec::new(),
                value_propositions: Vec::new(),
                creative_execution: synthesis::creative_execution(ads),
                cta_distribution: FrequencyMap::new(),
                audience_targeting: synthesis::audience_targeting(&[]),
                strategic_strengths: Vec::new(),
                strategic_weaknesses: Vec::new(),
            };
        }

        let mut buckets: IndexMap<Theme, Vec<&'a Ad>> =
            Theme::ALL.iter().map(|&t| (t, Vec::new())).collect();
        for ad in ads {
            buckets.entry(detect_theme(ad)).or_default().push(ad);
        }

        let mut campaigns: Vec<Campaign<'a>> = buckets
            .into_iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(theme, bucket)| self.build_campaign(theme, bucket, ads.len()))
            .collect();
        campaigns.sort_by(|a, b| b.percentage.cmp(&a.percentage));

        let lower_texts: Vec<String> = ads
            .iter()
            .map(|ad| ad.primary_text.to_lowercase())
            .collect();
        let full_corpus = ads
            .iter()
            .map(extract::copy_text)
            .collect::<Vec<_>>()
            .join(" ");

        let months_running = synthesis::oldest_start(ads)
            .map(|oldest| synthesis::months_since(oldest, self.as_of));
        let creative_execution = synthesis::creative_execution(ads);

        let analysis = CampaignAnalysis {
            competitor: competitor.to_string(),
            total_ads: ads.len(),
            investment_estimate: synthesis::investment_estimate(ads.len(), months_running),
            pain_point_categories: synthesis::pain_point_categories(&lower_texts),
            value_propositions: synthesis::value_propositions(&full_corpus),
            cta_distribution: synthesis::cta_distribution(ads),
            audience_targeting: synthesis::audience_targeting(&campaigns),
            strategic_strengths: synthesis::strategic_strengths(
                &campaigns,
                &creative_execution,
                ads.len(),
            ),
            strategic_weaknesses: synthesis::strategic_weaknesses(
                ads,
                &campaigns,
                &creative_execution,
                months_running,
            ),
            creative_execution,
            campaigns,
        };

        tracing::debug!(
            competitor,
            ads = analysis.total_ads,
            campaigns = analysis.campaigns.len(),
            "campaign analysis complete"
        );
        analysis
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn build_campaign<'a>(&self, theme: Theme, bucket: Vec<&'a Ad>, total: usize) -> Campaign<'a> {
        let text = extract::bucket_text(&bucket);
        let lower = bucket
            .iter()
            .map(|ad| extract::copy_text(ad).to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        let pain_points = extract::extract_pain_points(&lower);
        let (cta, cta_percentage) = extract::dominant_cta(&bucket);

        Campaign {
            id: theme.slug().to_string(),
            name: theme.display_name().to_string(),
            theme,
            percentage: percentage(bucket.len(), total).round() as u32,
            variations: extract::count_variations(&bucket),
            hook: extract::extract_hook(&bucket),
            offer: extract::extract_offer(&text),
            cta,
            cta_percentage,
            landing_page: extract::landing_page(&bucket),
            target_audience: extract::infer_audience(&lower, self.max_audience_labels),
            format: extract::dominant_format(&bucket),
            video_lengths: extract::video_lengths(&bucket),
            case_study: extract::extract_case_study(&text, theme, &pain_points),
            pain_points,
            ads: bucket,
        }
    }
}

#[cfg(test)]
#[path = "campaigns_test.rs"]
mod tests;

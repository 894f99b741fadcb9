//! Pipeline orchestration.

use adintel_core::{load_rules, Ad, AdCategory, AppConfig};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::campaigns::{CampaignAnalysis, CampaignAnalyzer};
use crate::classifier::Classifier;
use crate::copy::{CopyAnalysis, CopyAnalyzer};
use crate::cta::CtaPatterns;
use crate::error::AnalysisError;
use crate::rules::compile_rules;
use crate::spend::{SpendEstimate, SpendEstimator};

/// Everything produced for one competitor's ad corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelReport<'a> {
    pub competitor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    pub total_ads: usize,
    pub category_distribution: IndexMap<AdCategory, usize>,
    pub copy: CopyAnalysis,
    pub campaigns: CampaignAnalysis<'a>,
    pub spend: SpendEstimate,
}

#[derive(Debug, Clone, Default)]
pub struct IntelPipeline {
    classifier: Classifier,
    copy_analyzer: CopyAnalyzer,
    campaign_analyzer: CampaignAnalyzer,
    spend_estimator: SpendEstimator,
}

impl IntelPipeline {
    #[must_use]
    pub fn new(
        classifier: Classifier,
        copy_analyzer: CopyAnalyzer,
        campaign_analyzer: CampaignAnalyzer,
        spend_estimator: SpendEstimator,
    ) -> Self {
        Self {
            classifier,
            copy_analyzer,
            campaign_analyzer,
            spend_estimator,
        }
    }

    /// Build a pipeline from application config.
    ///
    /// When `rules_path` is set, category rules come from that file and so do
    /// CTA patterns if the file declares any. Otherwise the built-in tables
    /// are used.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Config`] if the rules file cannot be read or
    /// fails validation, or [`AnalysisError::InvalidPattern`] if one of its
    /// patterns does not compile.
    pub fn from_config(config: &AppConfig) -> Result<Self, AnalysisError> {
        let (classifier, cta_patterns) = match &config.rules_path {
            Some(path) => {
                let file = load_rules(path)?;
                let classifier = Classifier::new(compile_rules(&file.categories)?);
                let cta_patterns = if file.cta_patterns.is_empty() {
                    CtaPatterns::default()
                } else {
                    CtaPatterns::from_config(&file.cta_patterns)?
                };
                tracing::info!(
                    path = %path.display(),
                    categories = file.categories.len(),
                    cta_groups = file.cta_patterns.len(),
                    "loaded rules file"
                );
                (classifier, cta_patterns)
            }
            None => (Classifier::default(), CtaPatterns::default()),
        };

        Ok(Self {
            classifier,
            copy_analyzer: CopyAnalyzer::new(cta_patterns),
            campaign_analyzer: CampaignAnalyzer::default()
                .with_max_audience_labels(config.max_audience_labels),
            spend_estimator: SpendEstimator::default(),
        })
    }

    /// Pin "now" for every time-dependent stage.
    #[must_use]
    pub fn with_reference_time(mut self, as_of: DateTime<Utc>) -> Self {
        self.campaign_analyzer = self.campaign_analyzer.with_reference_time(as_of);
        self.spend_estimator = self.spend_estimator.with_reference_time(as_of);
        self
    }

    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Validate every ad, then return annotated copies.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidAd`] for the first ad that fails
    /// validation; no ads are annotated in that case.
    pub fn classify(&self, ads: &[Ad]) -> Result<Vec<Ad>, AnalysisError> {
        for ad in ads {
            ad.validate()?;
        }
        Ok(self.classifier.categorize_and_update(ads))
    }

    /// Run the corpus-level stages over already-classified ads.
    ///
    /// Empty input produces an empty report rather than an error.
    #[must_use]
    pub fn analyze<'a>(
        &self,
        competitor: &str,
        ads: &'a [Ad],
        industry: Option<&str>,
    ) -> IntelReport<'a> {
        let report = IntelReport {
            competitor: competitor.to_string(),
            industry: industry.map(str::to_string),
            total_ads: ads.len(),
            category_distribution: self.classifier.category_distribution(ads),
            copy: self.copy_analyzer.analyze(ads),
            campaigns: self.campaign_analyzer.analyze(competitor, ads),
            spend: self.spend_estimator.estimate(ads, industry),
        };

        tracing::info!(
            competitor,
            ads = report.total_ads,
            campaigns = report.campaigns.campaigns.len(),
            spend_confidence = %report.spend.confidence,
            "intel report built"
        );
        report
    }
}

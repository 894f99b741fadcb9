//! Ad intelligence analysis for adintel.
//!
//! Classifies ads into marketing categories with a weighted rule table,
//! computes corpus-level copy statistics, clusters ads into themed campaigns
//! with extracted hooks, offers and case studies, and estimates spend from
//! CPM benchmarks. Every stage is a pure function of its input.

pub mod campaigns;
pub mod classifier;
pub mod copy;
pub mod cta;
pub mod error;
pub mod pipeline;
pub mod rules;
pub mod spend;

mod text;

pub use campaigns::{Campaign, CampaignAnalysis, CampaignAnalyzer, CaseStudy, Theme};
pub use classifier::{CategorizationResult, Classifier, CONFIDENCE_NORMALIZER};
pub use copy::{CopyAnalysis, CopyAnalyzer};
pub use cta::{CtaMatch, CtaPatterns};
pub use error::AnalysisError;
pub use pipeline::{IntelPipeline, IntelReport};
pub use rules::{compile_rules, default_rules, CategoryRule};
pub use spend::{Confidence, PlatformSpendBreakdown, SpendBand, SpendEstimate, SpendEstimator};
pub use text::{FrequencyMap, TermCount};

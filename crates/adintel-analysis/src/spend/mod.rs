//! Spend estimation from ad volume, run length and CPM benchmarks.
//!
//! When any ad carries delivery data (impressions or a spend range) the
//! estimate is built from those figures; otherwise it falls back to
//! benchmark daily impressions per platform.

pub mod benchmarks;

use adintel_core::Ad;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use benchmarks::{PlatformBenchmark, DEFAULT_BENCHMARK};

const DEFAULT_DAYS_ACTIVE: f64 = 30.0;
const DAYS_PER_MONTH: f64 = 30.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
/// Reach is converted to impressions at this frequency.
const REACH_FREQUENCY: f64 = 3.0;

const IMPRESSION_MULTIPLIERS: Multipliers = Multipliers(0.7, 1.0, 1.5);
const REACH_MULTIPLIERS: Multipliers = Multipliers(0.5, 1.0, 2.0);
const HEURISTIC_MULTIPLIERS: Multipliers = Multipliers(0.7, 1.0, 1.3);

#[derive(Debug, Clone, Copy)]
struct Multipliers(f64, f64, f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    High,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => f.write_str("low"),
            Self::High => f.write_str("high"),
        }
    }
}

/// Low / mid / high, rounded to whole units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SpendBand {
    pub low: u64,
    pub mid: u64,
    pub high: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSpendBreakdown {
    pub platform: String,
    pub ad_count: usize,
    pub cpm: f64,
    pub impressions: SpendBand,
    pub spend: SpendBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendEstimate {
    pub daily: SpendBand,
    pub monthly: SpendBand,
    pub total: SpendBand,
    pub confidence: Confidence,
    pub methodology: String,
    pub avg_days_active: f64,
    pub platforms: Vec<PlatformSpendBreakdown>,
}

impl SpendEstimate {
    fn empty() -> Self {
        Self {
            daily: SpendBand::default(),
            monthly: SpendBand::default(),
            total: SpendBand::default(),
            confidence: Confidence::Low,
            methodology: "No ads to analyze".to_string(),
            avg_days_active: 0.0,
            platforms: Vec::new(),
        }
    }
}

/// Unrounded accumulator behind a [`SpendBand`].
#[derive(Debug, Clone, Copy, Default)]
struct Band {
    low: f64,
    mid: f64,
    high: f64,
}

impl Band {
    fn flat(value: f64) -> Self {
        Self {
            low: value,
            mid: value,
            high: value,
        }
    }

    fn scaled(value: f64, m: Multipliers) -> Self {
        Self {
            low: value * m.0,
            mid: value * m.1,
            high: value * m.2,
        }
    }

    fn add(&mut self, other: Self) {
        self.low += other.low;
        self.mid += other.mid;
        self.high += other.high;
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            low: f(self.low),
            mid: f(self.mid),
            high: f(self.high),
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rounded(self) -> SpendBand {
        let round = |v: f64| v.max(0.0).round() as u64;
        SpendBand {
            low: round(self.low),
            mid: round(self.mid),
            high: round(self.high),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpendEstimator {
    as_of: DateTime<Utc>,
}

impl Default for SpendEstimator {
    fn default() -> Self {
        Self { as_of: Utc::now() }
    }
}

impl SpendEstimator {
    /// Pin "now" used for ads that are still running.
    #[must_use]
    pub fn with_reference_time(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = as_of;
        self
    }

    #[must_use]
    pub fn estimate(&self, ads: &[Ad], industry: Option<&str>) -> SpendEstimate {
        if ads.is_empty() {
            return SpendEstimate::empty();
        }

        let avg_days = self.avg_days_active(ads);
        let has_actual = ads.iter().any(Ad::has_delivery_data);

        let mut by_platform: IndexMap<String, Vec<&Ad>> = IndexMap::new();
        for ad in ads {
            by_platform
                .entry(benchmarks::normalize_platform(&ad.platform))
                .or_default()
                .push(ad);
        }

        let mut total = Band::default();
        let mut platforms = Vec::with_capacity(by_platform.len());
        let mut overridden = 0_usize;
        for (platform, group) in by_platform {
            let benchmark = benchmark_or_default(&platform);
            let industry_cpm = benchmark.industry_override(industry);
            if industry_cpm.is_some() {
                overridden += 1;
            }
            let cpm = industry_cpm.unwrap_or(benchmark.cpm);
            let (impressions, spend) = if has_actual {
                actual_platform_spend(&group, cpm)
            } else {
                heuristic_platform_spend(group.len(), benchmark, cpm, avg_days)
            };
            tracing::debug!(
                platform = %platform,
                ads = group.len(),
                cpm,
                spend_mid = spend.mid,
                "platform spend estimated"
            );
            total.add(spend);
            platforms.push(PlatformSpendBreakdown {
                platform,
                ad_count: group.len(),
                cpm,
                impressions: impressions.rounded(),
                spend: spend.rounded(),
            });
        }

        let per_day = avg_days.max(1.0);
        let daily = total.map(|v| v / per_day);
        let monthly = daily.map(|v| v * DAYS_PER_MONTH);

        let pricing = match industry.map(str::trim) {
            Some(name) if overridden == platforms.len() => format!("{name} CPM benchmarks"),
            Some(name) if overridden > 0 => {
                format!("{name} CPM benchmarks where tabled, platform averages elsewhere")
            }
            _ => "platform average CPM benchmarks".to_string(),
        };
        let (confidence, methodology) = if has_actual {
            (
                Confidence::High,
                format!(
                    "Based on reported spend, impressions and reach where available; \
                     impressions and reach are priced at {pricing}"
                ),
            )
        } else {
            (
                Confidence::Low,
                format!(
                    "Heuristic: ad count x benchmark daily impressions x {avg_days:.1} \
                     average active days, priced at {pricing}"
                ),
            )
        };

        SpendEstimate {
            daily: daily.rounded(),
            monthly: monthly.rounded(),
            total: total.rounded(),
            confidence,
            methodology,
            avg_days_active: avg_days,
            platforms,
        }
    }

    /// Mean whole days between start and end (or the reference time) over ads
    /// with a parseable start date.
    #[allow(clippy::cast_precision_loss)]
    fn avg_days_active(&self, ads: &[Ad]) -> f64 {
        let spans: Vec<f64> = ads
            .iter()
            .filter_map(|ad| {
                let start = ad.start_time()?;
                let end = ad.end_time().unwrap_or(self.as_of);
                let seconds = (end - start).num_seconds() as f64;
                Some((seconds / SECONDS_PER_DAY).ceil().max(0.0))
            })
            .collect();
        if spans.is_empty() {
            tracing::warn!(
                ads = ads.len(),
                default_days = DEFAULT_DAYS_ACTIVE,
                "no parseable start dates, using default days active"
            );
            return DEFAULT_DAYS_ACTIVE;
        }
        spans.iter().sum::<f64>() / spans.len() as f64
    }
}

fn benchmark_or_default(platform: &str) -> &'static PlatformBenchmark {
    benchmarks::lookup(platform).unwrap_or_else(|| {
        tracing::warn!(platform, "no CPM benchmark for platform, using default");
        &DEFAULT_BENCHMARK
    })
}

/// Returns `(impressions, spend)` from reported delivery data. Ads with none
/// of spend, impressions or reach contribute nothing.
#[allow(clippy::cast_precision_loss)]
fn actual_platform_spend(group: &[&Ad], cpm: f64) -> (Band, Band) {
    let mut impressions = Band::default();
    let mut spend = Band::default();
    for ad in group {
        if let Some(range) = &ad.spend {
            spend.add(Band {
                low: range.lower_bound,
                mid: (range.lower_bound + range.upper_bound) / 2.0,
                high: range.upper_bound,
            });
            if let Some(count) = ad.impressions {
                impressions.add(Band::flat(count as f64));
            }
        } else if let Some(count) = ad.impressions {
            let count = count as f64;
            impressions.add(Band::flat(count));
            spend.add(Band::scaled(count / 1000.0 * cpm, IMPRESSION_MULTIPLIERS));
        } else if let Some(reach) = ad.reach {
            let proxy = reach as f64 * REACH_FREQUENCY;
            impressions.add(Band::flat(proxy));
            spend.add(Band::scaled(proxy / 1000.0 * cpm, REACH_MULTIPLIERS));
        }
    }
    (impressions, spend)
}

#[allow(clippy::cast_precision_loss)]
fn heuristic_platform_spend(
    ad_count: usize,
    benchmark: &PlatformBenchmark,
    cpm: f64,
    avg_days: f64,
) -> (Band, Band) {
    let n = ad_count as f64;
    let daily = benchmark.daily_impressions;
    let impressions = Band {
        low: n * daily.low * avg_days,
        mid: n * daily.avg * avg_days,
        high: n * daily.high * avg_days,
    };
    let spend = Band {
        low: impressions.low / 1000.0 * cpm * HEURISTIC_MULTIPLIERS.0,
        mid: impressions.mid / 1000.0 * cpm * HEURISTIC_MULTIPLIERS.1,
        high: impressions.high / 1000.0 * cpm * HEURISTIC_MULTIPLIERS.2,
    };
    (impressions, spend)
}

#[cfg(test)]
#[path = "spend_test.rs"]
mod tests;

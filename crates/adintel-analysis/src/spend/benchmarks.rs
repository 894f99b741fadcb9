//! CPM and delivery benchmarks per platform, with industry overrides.
//!
//! Figures are USD per 1,000 impressions and per-ad daily impression ranges
//! for a typical always-on ad.

/// Daily impressions one ad is expected to deliver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyImpressions {
    pub low: f64,
    pub avg: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformBenchmark {
    pub platform: &'static str,
    /// Platform-average CPM.
    pub cpm: f64,
    pub daily_impressions: DailyImpressions,
    /// Industry key → CPM override. Keys are lowercase with underscores.
    pub industry_cpm: &'static [(&'static str, f64)],
}

impl PlatformBenchmark {
    /// Industry CPM when an override exists, otherwise the platform average.
    /// The industry is matched case-insensitively; spaces and hyphens are
    /// treated as underscores.
    #[must_use]
    pub fn cpm_for(&self, industry: Option<&str>) -> f64 {
        self.industry_override(industry).unwrap_or(self.cpm)
    }

    /// The industry CPM, or `None` when this platform has no override for it.
    #[must_use]
    pub fn industry_override(&self, industry: Option<&str>) -> Option<f64> {
        let key = normalize_key(industry?);
        self.industry_cpm
            .iter()
            .find(|(name, _)| *name == key)
            .map(|&(_, cpm)| cpm)
    }
}

pub const DEFAULT_BENCHMARK: PlatformBenchmark = PlatformBenchmark {
    platform: "default",
    cpm: 8.00,
    daily_impressions: DailyImpressions {
        low: 500.0,
        avg: 2_000.0,
        high: 8_000.0,
    },
    industry_cpm: &[],
};

pub const PLATFORM_BENCHMARKS: &[PlatformBenchmark] = &[
    PlatformBenchmark {
        platform: "facebook",
        cpm: 8.50,
        daily_impressions: DailyImpressions {
            low: 1_000.0,
            avg: 4_000.0,
            high: 12_000.0,
        },
        industry_cpm: &[
            ("ecommerce", 9.80),
            ("healthcare", 11.20),
            ("finance", 13.50),
            ("education", 7.40),
            ("technology", 10.30),
            ("retail", 8.90),
            ("real_estate", 9.20),
            ("legal", 12.40),
        ],
    },
    PlatformBenchmark {
        platform: "instagram",
        cpm: 9.10,
        daily_impressions: DailyImpressions {
            low: 800.0,
            avg: 3_500.0,
            high: 10_000.0,
        },
        industry_cpm: &[
            ("ecommerce", 10.50),
            ("healthcare", 12.00),
            ("finance", 14.20),
            ("retail", 9.60),
            ("technology", 11.10),
        ],
    },
    PlatformBenchmark {
        platform: "tiktok",
        cpm: 6.20,
        daily_impressions: DailyImpressions {
            low: 1_500.0,
            avg: 6_000.0,
            high: 20_000.0,
        },
        industry_cpm: &[
            ("ecommerce", 7.10),
            ("retail", 6.80),
            ("education", 5.40),
            ("technology", 7.60),
        ],
    },
    PlatformBenchmark {
        platform: "youtube",
        cpm: 9.70,
        daily_impressions: DailyImpressions {
            low: 700.0,
            avg: 3_000.0,
            high: 9_000.0,
        },
        industry_cpm: &[
            ("ecommerce", 10.80),
            ("education", 8.20),
            ("technology", 11.50),
            ("finance", 14.80),
        ],
    },
    PlatformBenchmark {
        platform: "google",
        cpm: 3.10,
        daily_impressions: DailyImpressions {
            low: 2_000.0,
            avg: 8_000.0,
            high: 25_000.0,
        },
        industry_cpm: &[
            ("ecommerce", 3.60),
            ("finance", 5.20),
            ("healthcare", 4.40),
            ("legal", 6.10),
        ],
    },
    PlatformBenchmark {
        platform: "linkedin",
        cpm: 33.80,
        daily_impressions: DailyImpressions {
            low: 200.0,
            avg: 800.0,
            high: 2_500.0,
        },
        industry_cpm: &[
            ("technology", 36.50),
            ("finance", 41.00),
            ("healthcare", 35.20),
            ("education", 28.40),
        ],
    },
    PlatformBenchmark {
        platform: "twitter",
        cpm: 6.50,
        daily_impressions: DailyImpressions {
            low: 500.0,
            avg: 2_000.0,
            high: 6_000.0,
        },
        industry_cpm: &[("technology", 7.20), ("finance", 8.40)],
    },
    PlatformBenchmark {
        platform: "snapchat",
        cpm: 3.00,
        daily_impressions: DailyImpressions {
            low: 1_000.0,
            avg: 4_500.0,
            high: 15_000.0,
        },
        industry_cpm: &[],
    },
    PlatformBenchmark {
        platform: "pinterest",
        cpm: 4.80,
        daily_impressions: DailyImpressions {
            low: 400.0,
            avg: 1_800.0,
            high: 5_500.0,
        },
        industry_cpm: &[("retail", 5.30), ("ecommerce", 5.60)],
    },
];

/// Canonical platform key: lowercase, trimmed, with common aliases folded.
#[must_use]
pub fn normalize_platform(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    match key.as_str() {
        "" => "unknown".to_string(),
        "meta" | "fb" => "facebook".to_string(),
        "ig" => "instagram".to_string(),
        "x" => "twitter".to_string(),
        _ => key,
    }
}

/// Benchmark for a normalized platform key, or `None` if it is not tabled.
#[must_use]
pub fn lookup(platform: &str) -> Option<&'static PlatformBenchmark> {
    PLATFORM_BENCHMARKS.iter().find(|b| b.platform == platform)
}

fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace([' ', '-'], "_")
}

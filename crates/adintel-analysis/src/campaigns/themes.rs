//! Theme detection used to bucket ads into campaigns.
//!
//! Deliberately broader than the category classifier: five ordered pattern
//! groups, first match wins, anything else is [`Theme::General`].

use std::sync::LazyLock;

use adintel_core::Ad;
use regex::Regex;
use serde::Serialize;

use crate::rules::compile_pattern;

use super::extract::copy_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Testimonial,
    LeadMagnet,
    BrandPositioning,
    Educational,
    Promotional,
    General,
}

impl Theme {
    /// Bucket order; campaigns with equal share keep this order.
    pub const ALL: [Theme; 6] = [
        Theme::Testimonial,
        Theme::LeadMagnet,
        Theme::BrandPositioning,
        Theme::Educational,
        Theme::Promotional,
        Theme::General,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Theme::Testimonial => "testimonial",
            Theme::LeadMagnet => "lead_magnet",
            Theme::BrandPositioning => "brand_positioning",
            Theme::Educational => "educational",
            Theme::Promotional => "promotional",
            Theme::General => "general",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Theme::Testimonial => "Results & Testimonials",
            Theme::LeadMagnet => "Lead Magnet",
            Theme::BrandPositioning => "Brand Positioning",
            Theme::Educational => "Educational Content",
            Theme::Promotional => "Promotional Offers",
            Theme::General => "General Awareness",
        }
    }

    /// How a case study in this theme is being used to sell.
    #[must_use]
    pub fn solution_angle(self) -> &'static str {
        match self {
            Theme::Testimonial => "Social proof through documented client results",
            Theme::LeadMagnet => "Free resource that demonstrates expertise before the sale",
            Theme::BrandPositioning => "Authority positioning as the category leader",
            Theme::Educational => "Teaching the method to earn trust",
            Theme::Promotional => "Price incentive to trigger immediate action",
            Theme::General => "General awareness messaging",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

const THEME_DEFS: &[(Theme, &[&str])] = &[
    (
        Theme::Testimonial,
        &[
            r"\d+%\s*(increase|growth|more|boost|surge|jump|rise)",
            r"\bfrom\s+\$?\d[\d,]*k?\s+to\s+\$?\d[\d,]*k?\b",
            r"\$\d[\d,]*k?\s+in\s+\d+\s+(days|weeks|months)",
            r"\bdr\.?\s+[a-z]+",
            r"\b(case study|success story)\b",
            r"\b(patients|clients|customers)\s+(said|say|love)\b",
        ],
    ),
    (
        Theme::LeadMagnet,
        &[
            r"\bfree\s+(guide|download|access|ebook|e-book|webinar|training|checklist|template|consultation|audit|trial)\b",
            r"\bdownload\s+(our|the|your|this)\b",
            r"\bhow\s+to\b",
            r"\bget\s+instant\s+access\b",
        ],
    ),
    (
        Theme::BrandPositioning,
        &[
            r"\bbecome\s+the\b",
            r"\beveryone\s+knows\b",
            r"\b(trusted|leading|go-to|number one)\s+\w+",
            r"\bthe\s+(authority|expert|leader)\s+in\b",
        ],
    ),
    (
        Theme::Educational,
        &[
            r"\b\d+\s+(tips|steps|ways|mistakes|secrets|strategies|reasons)\b",
            r"\blearn\s+how\b",
            r"\bdiscover\b",
            r"\bstep[-\s]by[-\s]step\b",
        ],
    ),
    (
        Theme::Promotional,
        &[
            r"\d+%\s*off\b",
            r"\b(sale|discount|promo|coupon|deal)\b",
            r"\blimited[-\s]time\b",
        ],
    ),
];

static THEME_PATTERNS: LazyLock<Vec<(Theme, Vec<Regex>)>> = LazyLock::new(|| {
    THEME_DEFS
        .iter()
        .map(|&(theme, patterns)| {
            let regexes = patterns
                .iter()
                .map(|p| {
                    compile_pattern(p, "built-in theme table")
                        .expect("built-in theme patterns are valid")
                })
                .collect();
            (theme, regexes)
        })
        .collect()
});

/// Theme of a single ad, judged on its primary text, headline and description.
#[must_use]
pub fn detect_theme(ad: &Ad) -> Theme {
    detect_text_theme(&copy_text(ad))
}

pub(crate) fn detect_text_theme(text: &str) -> Theme {
    THEME_PATTERNS
        .iter()
        .find(|(_, regexes)| regexes.iter().any(|re| re.is_match(text)))
        .map_or(Theme::General, |(theme, _)| *theme)
}

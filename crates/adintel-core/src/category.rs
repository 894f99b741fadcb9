use serde::{Deserialize, Serialize};

/// Creative category assigned to an ad by the classifier.
///
/// Declaration order matters: when two categories score the same, the one
/// declared first wins. [`AdCategory::ALL`] preserves that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdCategory {
    Testimonial,
    OfferPromo,
    Educational,
    ProductFeature,
    BrandAwareness,
    Event,
    Hiring,
    UrgencyScarcity,
    ProblemSolution,
    Comparison,
    Other,
}

impl AdCategory {
    /// Every category, in declaration order.
    pub const ALL: [AdCategory; 11] = [
        AdCategory::Testimonial,
        AdCategory::OfferPromo,
        AdCategory::Educational,
        AdCategory::ProductFeature,
        AdCategory::BrandAwareness,
        AdCategory::Event,
        AdCategory::Hiring,
        AdCategory::UrgencyScarcity,
        AdCategory::ProblemSolution,
        AdCategory::Comparison,
        AdCategory::Other,
    ];

    /// Stable machine tag, identical to the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AdCategory::Testimonial => "testimonial",
            AdCategory::OfferPromo => "offer_promo",
            AdCategory::Educational => "educational",
            AdCategory::ProductFeature => "product_feature",
            AdCategory::BrandAwareness => "brand_awareness",
            AdCategory::Event => "event",
            AdCategory::Hiring => "hiring",
            AdCategory::UrgencyScarcity => "urgency_scarcity",
            AdCategory::ProblemSolution => "problem_solution",
            AdCategory::Comparison => "comparison",
            AdCategory::Other => "other",
        }
    }

    /// Human-readable label for reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AdCategory::Testimonial => "Testimonial",
            AdCategory::OfferPromo => "Offer / Promo",
            AdCategory::Educational => "Educational",
            AdCategory::ProductFeature => "Product Feature",
            AdCategory::BrandAwareness => "Brand Awareness",
            AdCategory::Event => "Event",
            AdCategory::Hiring => "Hiring",
            AdCategory::UrgencyScarcity => "Urgency / Scarcity",
            AdCategory::ProblemSolution => "Problem / Solution",
            AdCategory::Comparison => "Comparison",
            AdCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for AdCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_other_last() {
        assert_eq!(AdCategory::ALL.len(), 11);
        assert_eq!(AdCategory::ALL[0], AdCategory::Testimonial);
        assert_eq!(AdCategory::ALL[10], AdCategory::Other);
    }

    #[test]
    fn display_matches_serde_tag() {
        for category in AdCategory::ALL {
            let json = serde_json::to_string(&category).expect("serialize");
            assert_eq!(json, format!("\"{category}\""));
        }
    }

    #[test]
    fn deserializes_snake_case_tag() {
        let category: AdCategory = serde_json::from_str("\"urgency_scarcity\"").expect("parse");
        assert_eq!(category, AdCategory::UrgencyScarcity);
    }
}

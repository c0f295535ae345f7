use super::types::RateTier;

// Best first; lookups rely on the descending `min_score` order.
pub const RATE_TABLE: [RateTier; 6] = [
    RateTier {
        min_score: 760,
        max_score: 850,
        apr: 6.404,
        label: "760-850",
    },
    RateTier {
        min_score: 700,
        max_score: 759,
        apr: 6.626,
        label: "700-759",
    },
    RateTier {
        min_score: 680,
        max_score: 699,
        apr: 6.767,
        label: "680-699",
    },
    RateTier {
        min_score: 660,
        max_score: 679,
        apr: 7.017,
        label: "660-679",
    },
    RateTier {
        min_score: 640,
        max_score: 659,
        apr: 7.447,
        label: "640-659",
    },
    RateTier {
        min_score: 620,
        max_score: 639,
        apr: 7.993,
        label: "620-639",
    },
];

pub const DEFAULT_CREDIT_SCORE: f64 = 700.0;

pub fn rate_tiers() -> &'static [RateTier] {
    &RATE_TABLE
}

pub fn apr_for_score(score: f64) -> f64 {
    RATE_TABLE
        .iter()
        .find(|tier| score >= f64::from(tier.min_score))
        .unwrap_or(&RATE_TABLE[RATE_TABLE.len() - 1])
        .apr
}

use super::types::{DownPaymentBracket, RatioTier, RatioTierPair};

const MID_DOWN_THRESHOLD_PERCENT: f64 = 10.0;
const HIGH_DOWN_THRESHOLD_PERCENT: f64 = 20.0;

// Separate from the bracket cuts above; only the conservative housing ratio reads it.
const CONSERVATIVE_LOW_DOWN_THRESHOLD_PERCENT: f64 = 20.0;

const HOUSING_RATIO_CONSERVATIVE: f64 = 0.30;
const HOUSING_RATIO_CONSERVATIVE_LOW_DOWN: f64 = 0.28;
const DEBT_TO_INCOME_RATIO_CONSERVATIVE: f64 = 0.36;

const AGGRESSIVE_LOW_DOWN: RatioTier = RatioTier {
    housing_ratio: 0.30,
    debt_to_income_ratio: 0.38,
};
const AGGRESSIVE_MID_DOWN: RatioTier = RatioTier {
    housing_ratio: 0.33,
    debt_to_income_ratio: 0.40,
};
const AGGRESSIVE_HIGH_DOWN: RatioTier = RatioTier {
    housing_ratio: 0.36,
    debt_to_income_ratio: 0.42,
};

const PMI_RATE_LOW_DOWN: f64 = 0.01152;
const PMI_RATE_MID_DOWN: f64 = 0.00336;
const PMI_RATE_HIGH_DOWN: f64 = 0.0;

pub const DEFAULT_DOWN_PAYMENT_PERCENT: f64 = 20.0;

impl DownPaymentBracket {
    pub fn from_percent(down_payment_percent: f64) -> Self {
        if down_payment_percent < MID_DOWN_THRESHOLD_PERCENT {
            DownPaymentBracket::LowDown
        } else if down_payment_percent < HIGH_DOWN_THRESHOLD_PERCENT {
            DownPaymentBracket::MidDown
        } else {
            DownPaymentBracket::HighDown
        }
    }
}

pub fn ratios_for(down_payment_percent: f64) -> RatioTierPair {
    let conservative_housing = if down_payment_percent < CONSERVATIVE_LOW_DOWN_THRESHOLD_PERCENT {
        HOUSING_RATIO_CONSERVATIVE_LOW_DOWN
    } else {
        HOUSING_RATIO_CONSERVATIVE
    };
    let aggressive = match DownPaymentBracket::from_percent(down_payment_percent) {
        DownPaymentBracket::LowDown => AGGRESSIVE_LOW_DOWN,
        DownPaymentBracket::MidDown => AGGRESSIVE_MID_DOWN,
        DownPaymentBracket::HighDown => AGGRESSIVE_HIGH_DOWN,
    };

    RatioTierPair {
        conservative: RatioTier {
            housing_ratio: conservative_housing,
            debt_to_income_ratio: DEBT_TO_INCOME_RATIO_CONSERVATIVE,
        },
        aggressive,
    }
}

pub fn pmi_rate_for(down_payment_percent: f64) -> f64 {
    match DownPaymentBracket::from_percent(down_payment_percent) {
        DownPaymentBracket::LowDown => PMI_RATE_LOW_DOWN,
        DownPaymentBracket::MidDown => PMI_RATE_MID_DOWN,
        DownPaymentBracket::HighDown => PMI_RATE_HIGH_DOWN,
    }
}

use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RateSource {
    CreditScore(f64),
    AprOverride(f64),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EstimateTier {
    Conservative,
    Aggressive,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DownPaymentBracket {
    LowDown,
    MidDown,
    HighDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTier {
    pub min_score: u32,
    pub max_score: u32,
    pub apr: f64,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioTier {
    pub housing_ratio: f64,
    pub debt_to_income_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioTierPair {
    pub conservative: RatioTier,
    pub aggressive: RatioTier,
}

impl RatioTierPair {
    pub fn for_tier(self, tier: EstimateTier) -> RatioTier {
        match tier {
            EstimateTier::Conservative => self.conservative,
            EstimateTier::Aggressive => self.aggressive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffordabilityInputs {
    pub monthly_income: f64,
    pub monthly_debts: f64,
    pub down_payment_percent: f64,
    pub rate: RateSource,
    pub loan_term_years: u32,
    pub monthly_taxes_and_insurance: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanEstimate {
    pub loan_amount: f64,
    pub home_price: f64,
    pub monthly_payment: f64,
    #[serde(rename = "monthlyPMI")]
    pub monthly_pmi: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingResult {
    pub conservative: LoanEstimate,
    pub aggressive: LoanEstimate,
    pub apr: f64,
}

impl BorrowingResult {
    pub fn estimate(&self, tier: EstimateTier) -> &LoanEstimate {
        match tier {
            EstimateTier::Conservative => &self.conservative,
            EstimateTier::Aggressive => &self.aggressive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub label: &'static str,
    pub apr: f64,
    pub monthly_payment: f64,
    pub total_interest: f64,
}

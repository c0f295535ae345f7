use log::debug;

use super::amortization::{monthly_payment, total_interest};
use super::error::{AffordabilityError, check_loan_term, check_non_negative};
use super::policy::{pmi_rate_for, ratios_for};
use super::rates::{RATE_TABLE, apr_for_score};
use super::solver::solve_loan_with_pmi;
use super::types::{
    AffordabilityInputs, BorrowingResult, ComparisonRow, EstimateTier, LoanEstimate, RateSource,
    RatioTier,
};

impl RateSource {
    pub fn resolve_apr(self) -> f64 {
        match self {
            RateSource::CreditScore(score) => apr_for_score(score),
            RateSource::AprOverride(apr) => apr,
        }
    }
}

impl AffordabilityInputs {
    pub fn validate(&self) -> Result<(), AffordabilityError> {
        check_non_negative("monthly income", self.monthly_income)?;
        check_non_negative("monthly debts", self.monthly_debts)?;
        check_non_negative("monthly taxes and insurance", self.monthly_taxes_and_insurance)?;

        if !self.down_payment_percent.is_finite() {
            return Err(AffordabilityError::NonFinite {
                field: "down payment percent",
            });
        }
        if !(0.0..100.0).contains(&self.down_payment_percent) {
            return Err(AffordabilityError::DownPaymentOutOfRange(
                self.down_payment_percent,
            ));
        }

        match self.rate {
            RateSource::CreditScore(score) if !score.is_finite() => {
                return Err(AffordabilityError::NonFinite {
                    field: "credit score",
                });
            }
            RateSource::CreditScore(_) => {}
            RateSource::AprOverride(apr) => check_non_negative("interest rate", apr)?,
        }

        check_loan_term(self.loan_term_years)
    }
}

// Total over its inputs; a 100% down payment divides by zero in the home price.
pub fn solve_affordability(inputs: &AffordabilityInputs) -> BorrowingResult {
    let apr = inputs.rate.resolve_apr();
    let ratios = ratios_for(inputs.down_payment_percent);
    let pmi_rate = pmi_rate_for(inputs.down_payment_percent);

    BorrowingResult {
        conservative: solve_tier(
            inputs,
            EstimateTier::Conservative,
            ratios.for_tier(EstimateTier::Conservative),
            apr,
            pmi_rate,
        ),
        aggressive: solve_tier(
            inputs,
            EstimateTier::Aggressive,
            ratios.for_tier(EstimateTier::Aggressive),
            apr,
            pmi_rate,
        ),
        apr,
    }
}

pub fn try_solve_affordability(
    inputs: &AffordabilityInputs,
) -> Result<BorrowingResult, AffordabilityError> {
    inputs.validate()?;
    Ok(solve_affordability(inputs))
}

fn solve_tier(
    inputs: &AffordabilityInputs,
    tier: EstimateTier,
    ratios: RatioTier,
    apr: f64,
    pmi_rate: f64,
) -> LoanEstimate {
    let housing_ceiling = inputs.monthly_income * ratios.housing_ratio;
    let dti_ceiling =
        (inputs.monthly_income * ratios.debt_to_income_ratio - inputs.monthly_debts).max(0.0);
    let max_piti = housing_ceiling.min(dti_ceiling);
    let max_p_and_i_plus_pmi = (max_piti - inputs.monthly_taxes_and_insurance).max(0.0);

    debug!(
        "{tier:?}: housing ceiling={housing_ceiling:.2} dti ceiling={dti_ceiling:.2} budget after taxes/insurance={max_p_and_i_plus_pmi:.2}"
    );

    if max_p_and_i_plus_pmi <= 0.0 {
        return LoanEstimate::default();
    }

    let years = inputs.loan_term_years;
    let loan_amount = solve_loan_with_pmi(max_p_and_i_plus_pmi, apr, years, pmi_rate);
    let monthly_pmi = loan_amount * pmi_rate / 12.0;
    let monthly_p_and_i = monthly_payment(loan_amount, apr, years);

    LoanEstimate {
        loan_amount,
        home_price: loan_amount / (1.0 - inputs.down_payment_percent / 100.0),
        monthly_payment: monthly_p_and_i + inputs.monthly_taxes_and_insurance + monthly_pmi,
        monthly_pmi,
        total_interest: total_interest(loan_amount, monthly_p_and_i, years),
    }
}

pub fn compare_across_tiers(loan_amount: f64, loan_term_years: u32) -> Vec<ComparisonRow> {
    RATE_TABLE
        .iter()
        .map(|tier| {
            let payment = monthly_payment(loan_amount, tier.apr, loan_term_years);
            ComparisonRow {
                label: tier.label,
                apr: tier.apr,
                monthly_payment: payment,
                total_interest: total_interest(loan_amount, payment, loan_term_years),
            }
        })
        .collect()
}

pub fn try_compare_across_tiers(
    loan_amount: f64,
    loan_term_years: u32,
) -> Result<Vec<ComparisonRow>, AffordabilityError> {
    check_non_negative("loan amount", loan_amount)?;
    check_loan_term(loan_term_years)?;
    Ok(compare_across_tiers(loan_amount, loan_term_years))
}

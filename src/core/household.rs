use serde::Serialize;

use super::error::{AffordabilityError, check_non_negative};
use super::types::LoanEstimate;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IncomeSources {
    pub wages: f64,
    pub investment: f64,
    pub rental: f64,
    pub other: f64,
}

impl IncomeSources {
    pub fn total(self) -> f64 {
        self.wages + self.investment + self.rental + self.other
    }

    pub fn validate(&self) -> Result<(), AffordabilityError> {
        check_non_negative("wages income", self.wages)?;
        check_non_negative("investment income", self.investment)?;
        check_non_negative("rental income", self.rental)?;
        check_non_negative("other income", self.other)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DebtPayments {
    pub auto_loans: f64,
    pub student_loans: f64,
    pub credit_cards: f64,
    pub alimony: f64,
    pub rental_loans: f64,
    pub other: f64,
}

impl DebtPayments {
    pub fn total(self) -> f64 {
        self.auto_loans
            + self.student_loans
            + self.credit_cards
            + self.alimony
            + self.rental_loans
            + self.other
    }

    pub fn validate(&self) -> Result<(), AffordabilityError> {
        check_non_negative("auto loan payments", self.auto_loans)?;
        check_non_negative("student loan payments", self.student_loans)?;
        check_non_negative("credit card payments", self.credit_cards)?;
        check_non_negative("alimony payments", self.alimony)?;
        check_non_negative("rental loan payments", self.rental_loans)?;
        check_non_negative("other debt payments", self.other)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CarryingCosts {
    pub property_tax_yearly: f64,
    pub insurance_yearly: f64,
}

impl CarryingCosts {
    pub fn validate(&self) -> Result<(), AffordabilityError> {
        check_non_negative("yearly property tax", self.property_tax_yearly)?;
        check_non_negative("yearly insurance", self.insurance_yearly)
    }

    pub fn monthly_property_tax(self) -> f64 {
        self.property_tax_yearly / 12.0
    }

    pub fn monthly_insurance(self) -> f64 {
        self.insurance_yearly / 12.0
    }

    pub fn monthly_taxes_and_insurance(self) -> f64 {
        (self.property_tax_yearly + self.insurance_yearly) / 12.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateBreakdown {
    pub down_payment: f64,
    pub principal_and_interest: f64,
    pub property_tax: f64,
    pub insurance: f64,
    pub pmi: f64,
}

impl EstimateBreakdown {
    pub fn from_estimate(
        estimate: &LoanEstimate,
        costs: CarryingCosts,
        down_payment_percent: f64,
    ) -> Self {
        let principal_and_interest = (estimate.monthly_payment
            - costs.monthly_taxes_and_insurance()
            - estimate.monthly_pmi)
            .max(0.0);
        Self {
            down_payment: estimate.home_price * (down_payment_percent / 100.0),
            principal_and_interest,
            property_tax: costs.monthly_property_tax(),
            insurance: costs.monthly_insurance(),
            pmi: estimate.monthly_pmi,
        }
    }
}

use thiserror::Error;

pub const MAX_LOAN_TERM_YEARS: u32 = 50;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AffordabilityError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be >= 0, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("down payment percent must be in [0, 100), got {0}")]
    DownPaymentOutOfRange(f64),

    #[error("loan term must be between 1 and 50 years, got {0}")]
    InvalidLoanTerm(u32),

    #[error("{0} is required")]
    MissingField(&'static str),
}

pub(crate) fn check_non_negative(
    field: &'static str,
    value: f64,
) -> Result<(), AffordabilityError> {
    if !value.is_finite() {
        return Err(AffordabilityError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(AffordabilityError::Negative { field, value });
    }
    Ok(())
}

pub(crate) fn check_loan_term(years: u32) -> Result<(), AffordabilityError> {
    if years == 0 || years > MAX_LOAN_TERM_YEARS {
        return Err(AffordabilityError::InvalidLoanTerm(years));
    }
    Ok(())
}

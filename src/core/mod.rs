mod amortization;
mod engine;
mod error;
mod household;
mod policy;
mod rates;
mod solver;
mod types;

pub use amortization::{loan_amount_from_payment, monthly_payment, total_interest};
pub use engine::{
    compare_across_tiers, solve_affordability, try_compare_across_tiers, try_solve_affordability,
};
pub use error::{AffordabilityError, MAX_LOAN_TERM_YEARS};
pub use household::{CarryingCosts, DebtPayments, EstimateBreakdown, IncomeSources};
pub use policy::{DEFAULT_DOWN_PAYMENT_PERCENT, pmi_rate_for, ratios_for};
pub use rates::{DEFAULT_CREDIT_SCORE, RATE_TABLE, apr_for_score, rate_tiers};
pub use solver::{PMI_BISECTION_ITERATIONS, payment_with_pmi, solve_loan_with_pmi};
pub use types::{
    AffordabilityInputs, BorrowingResult, ComparisonRow, DownPaymentBracket, EstimateTier,
    LoanEstimate, RateSource, RateTier, RatioTier, RatioTierPair,
};

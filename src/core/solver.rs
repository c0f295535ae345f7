use log::debug;

use super::amortization::{loan_amount_from_payment, monthly_payment};

// Halving the no-PMI bracket 60 times leaves ~2^-60 relative width.
pub const PMI_BISECTION_ITERATIONS: u32 = 60;

pub fn payment_with_pmi(loan_amount: f64, annual_rate_percent: f64, years: u32, pmi_rate: f64) -> f64 {
    monthly_payment(loan_amount, annual_rate_percent, years) + loan_amount * pmi_rate / 12.0
}

// PMI is charged on the loan itself, so there is no closed form once `pmi_rate > 0`.
pub fn solve_loan_with_pmi(
    target_payment: f64,
    annual_rate_percent: f64,
    years: u32,
    pmi_rate: f64,
) -> f64 {
    let target = target_payment.max(0.0);
    let upper = loan_amount_from_payment(target, annual_rate_percent, years);
    if pmi_rate <= 0.0 || target == 0.0 {
        return upper;
    }

    let mut lo = 0.0;
    let mut hi = upper;
    for _ in 0..PMI_BISECTION_ITERATIONS {
        let mid = (lo + hi) * 0.5;
        if payment_with_pmi(mid, annual_rate_percent, years, pmi_rate) > target {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    debug!(
        "pmi bisection: target={target:.4} pmi_rate={pmi_rate} bracket=[{lo:.6}, {hi:.6}] from upper={upper:.2}"
    );
    lo
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    #[test]
    fn bisection_lands_on_the_affordability_boundary() {
        // 18k income, 10% down: aggressive mid-down housing ceiling 5940 less 354 taxes/insurance.
        let target = 18_000.0 * 0.33 - 354.0;
        let pmi_rate = 0.00336;
        let loan = solve_loan_with_pmi(target, 6.0, 30, pmi_rate);

        assert!(payment_with_pmi(loan, 6.0, 30, pmi_rate) <= target);
        assert!(payment_with_pmi(loan + 0.01, 6.0, 30, pmi_rate) > target);
        assert_close(payment_with_pmi(loan, 6.0, 30, pmi_rate), target, 1e-6);
    }

    #[test]
    fn pmi_shrinks_the_loan_below_the_closed_form_bound() {
        let target = 4_000.0;
        let without = solve_loan_with_pmi(target, 6.5, 30, 0.0);
        let with = solve_loan_with_pmi(target, 6.5, 30, 0.01152);

        assert_close(without, loan_amount_from_payment(target, 6.5, 30), 1e-9);
        assert!(with < without);
        assert!(with > 0.0);
    }

    #[test]
    fn zero_rate_loan_with_pmi_converges() {
        let target = 1_500.0;
        let loan = solve_loan_with_pmi(target, 0.0, 30, 0.00336);
        // Closed form at 0%: L / 360 + L * pmi / 12 = target.
        let expected = target / (1.0 / 360.0 + 0.00336 / 12.0);
        assert_close(loan, expected, 1e-6);
    }

    #[test]
    fn non_positive_target_yields_zero_loan() {
        assert_eq!(solve_loan_with_pmi(0.0, 6.0, 30, 0.01152), 0.0);
        assert_eq!(solve_loan_with_pmi(-250.0, 6.0, 30, 0.01152), 0.0);
        assert_eq!(solve_loan_with_pmi(-250.0, 6.0, 30, 0.0), 0.0);
    }

    #[test]
    fn very_long_term_stays_on_the_boundary() {
        let target = 2_000.0;
        let pmi_rate = 0.01152;
        let loan = solve_loan_with_pmi(target, 6.0, 20_000, pmi_rate);

        assert!(loan.is_finite() && loan > 0.0);
        assert!(payment_with_pmi(loan, 6.0, 20_000, pmi_rate) <= target);
        // Interest-only limit: L * (r + pmi / 12) = target.
        assert_close(loan, target / (0.005 + pmi_rate / 12.0), 1e-3);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn payment_with_pmi_is_strictly_increasing(
            loan in 0.0f64..2_000_000.0,
            step in 1.0f64..10_000.0,
            rate in 0.0f64..15.0,
            years in 1u32..=40,
            pmi_rate in 0.0f64..0.02,
        ) {
            prop_assert!(
                payment_with_pmi(loan + step, rate, years, pmi_rate)
                    > payment_with_pmi(loan, rate, years, pmi_rate)
            );
        }

        #[test]
        fn solved_loan_never_exceeds_target(
            target in 1.0f64..20_000.0,
            rate in 0.0f64..15.0,
            years in 1u32..=40,
            pmi_rate in 0.0001f64..0.02,
        ) {
            let loan = solve_loan_with_pmi(target, rate, years, pmi_rate);
            let paid = payment_with_pmi(loan, rate, years, pmi_rate);
            prop_assert!(paid <= target);
            prop_assert!(paid >= target * (1.0 - 1e-9));
        }
    }
}

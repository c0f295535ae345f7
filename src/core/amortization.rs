fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

fn payment_count(years: u32) -> f64 {
    f64::from(years) * 12.0
}

/// Level monthly payment that amortizes `principal` over `years`.
///
/// `M = P·r(1+r)^n / ((1+r)^n − 1)`, evaluated as `P·r / (1 − (1+r)^−n)` so long terms
/// tend to `P·r` instead of ∞/∞. Straight-line `P / n` at a 0% rate.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, years: u32) -> f64 {
    let r = monthly_rate(annual_rate_percent);
    let n = payment_count(years);

    if r == 0.0 {
        return principal / n;
    }

    principal * r / (1.0 - (1.0 + r).powf(-n))
}

/// Inverse of [`monthly_payment`]: the principal a level `payment` retires over `years`.
pub fn loan_amount_from_payment(payment: f64, annual_rate_percent: f64, years: u32) -> f64 {
    let r = monthly_rate(annual_rate_percent);
    let n = payment_count(years);

    if r == 0.0 {
        return payment * n;
    }

    payment * (1.0 - (1.0 + r).powf(-n)) / r
}

pub fn total_interest(principal: f64, monthly_payment: f64, years: u32) -> f64 {
    monthly_payment * payment_count(years) - principal
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
    fn payment_matches_known_amortization_value() {
        // 300k at 6% for 30 years is the textbook 1798.65 payment.
        assert_close(monthly_payment(300_000.0, 6.0, 30), 1_798.65, 0.01);
        assert_close(monthly_payment(100_000.0, 12.0, 1), 8_884.88, 0.01);
    }

    #[test]
    fn zero_rate_is_straight_line() {
        assert_close(monthly_payment(360_000.0, 0.0, 30), 1_000.0, 1e-9);
        assert_close(loan_amount_from_payment(1_000.0, 0.0, 30), 360_000.0, 1e-9);
        assert_close(total_interest(360_000.0, 1_000.0, 30), 0.0, 1e-9);
    }

    #[test]
    fn total_interest_is_payments_less_principal() {
        let payment = monthly_payment(300_000.0, 6.0, 30);
        assert_close(total_interest(300_000.0, payment, 30), payment * 360.0 - 300_000.0, 1e-9);
        assert!(total_interest(300_000.0, payment, 30) > 0.0);
    }

    #[test]
    fn zero_principal_and_zero_payment_stay_zero() {
        assert_eq!(monthly_payment(0.0, 6.5, 30), 0.0);
        assert_eq!(loan_amount_from_payment(0.0, 6.5, 30), 0.0);
    }

    #[test]
    fn very_long_terms_stay_finite() {
        // (1+r)^n overflows long before u32::MAX years; the payment tends to interest-only.
        let payment = monthly_payment(300_000.0, 6.0, 20_000);
        assert_close(payment, 300_000.0 * 0.005, 1e-6);

        let payment = monthly_payment(300_000.0, 6.0, u32::MAX);
        assert_close(payment, 1_500.0, 1e-6);
        assert_close(loan_amount_from_payment(1_500.0, 6.0, u32::MAX), 300_000.0, 1e-6);
        assert!(total_interest(300_000.0, payment, u32::MAX).is_finite());
        assert!(monthly_payment(300_000.0, 0.0, u32::MAX).is_finite());
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn payment_and_principal_round_trip(
            principal in 0.0f64..5_000_000.0,
            rate in 0.0f64..20.0,
            years in 1u32..=40,
        ) {
            let payment = monthly_payment(principal, rate, years);
            let back = loan_amount_from_payment(payment, rate, years);
            prop_assert!((back - principal).abs() <= 1e-6 * principal.max(1.0));
        }

        #[test]
        fn payment_grows_with_rate(
            principal in 1_000.0f64..1_000_000.0,
            rate in 0.0f64..15.0,
            years in 1u32..=40,
        ) {
            prop_assert!(monthly_payment(principal, rate + 0.5, years) > monthly_payment(principal, rate, years));
        }
    }
}

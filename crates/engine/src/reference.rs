//! Closed-form Black-Scholes-Merton price.
//!
//! Used in tests to validate that the finite-difference engine converges
//! to the analytic European price as the grid is refined; not part of
//! the engine's pricing path (the PDE solver handles American exercise,
//! which has no closed form).

use crate::option::OptionKind;
use pricer_core::Real;
use pricer_math::normal_cdf;

/// The analytic Black-Scholes-Merton price of a European option.
///
/// `kind` must be `EuropeanCall` or `EuropeanPut`; passing an American
/// variant panics, since no closed form exists for it.
pub fn black_scholes_merton(
    kind: OptionKind,
    spot: Real,
    strike: Real,
    risk_free_rate: Real,
    dividend_yield: Real,
    volatility: Real,
    time_to_expiry: Real,
) -> Real {
    assert!(
        !kind.is_american(),
        "no closed-form price exists for an American option"
    );

    if time_to_expiry <= 0.0 {
        return match kind {
            OptionKind::EuropeanCall => (spot - strike).max(0.0),
            OptionKind::EuropeanPut => (strike - spot).max(0.0),
            _ => unreachable!(),
        };
    }

    let sqrt_t = time_to_expiry.sqrt();
    let d1 = ((spot / strike).ln()
        + (risk_free_rate - dividend_yield + 0.5 * volatility * volatility) * time_to_expiry)
        / (volatility * sqrt_t);
    let d2 = d1 - volatility * sqrt_t;

    let discounted_spot = spot * (-dividend_yield * time_to_expiry).exp();
    let discounted_strike = strike * (-risk_free_rate * time_to_expiry).exp();

    match kind {
        OptionKind::EuropeanCall => {
            discounted_spot * normal_cdf(d1) - discounted_strike * normal_cdf(d2)
        }
        OptionKind::EuropeanPut => {
            discounted_strike * normal_cdf(-d2) - discounted_spot * normal_cdf(-d1)
        }
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn atm_call_matches_known_value() {
        // S=100, K=100, r=5%, q=0, sigma=20%, T=1y -> ~10.4506
        let price =
            black_scholes_merton(OptionKind::EuropeanCall, 100.0, 100.0, 0.05, 0.0, 0.2, 1.0);
        assert_relative_eq!(price, 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn atm_put_matches_known_value() {
        // Same parameters, put side: ~5.5735
        let price =
            black_scholes_merton(OptionKind::EuropeanPut, 100.0, 100.0, 0.05, 0.0, 0.2, 1.0);
        assert_relative_eq!(price, 5.5735, epsilon = 1e-3);
    }

    #[test]
    fn put_call_parity_holds_with_dividends() {
        let (s, k, r, q, sigma, t) = (100.0, 95.0, 0.03, 0.02, 0.25, 0.75);
        let call = black_scholes_merton(OptionKind::EuropeanCall, s, k, r, q, sigma, t);
        let put = black_scholes_merton(OptionKind::EuropeanPut, s, k, r, q, sigma, t);
        let lhs = call - put;
        let rhs = s * (-q * t).exp() - k * (-r * t).exp();
        assert_relative_eq!(lhs, rhs, epsilon = 1e-9);
    }

    #[test]
    fn zero_maturity_reduces_to_intrinsic_value() {
        let call = black_scholes_merton(OptionKind::EuropeanCall, 110.0, 100.0, 0.05, 0.0, 0.2, 0.0);
        assert_relative_eq!(call, 10.0, epsilon = 1e-12);
        let put = black_scholes_merton(OptionKind::EuropeanPut, 90.0, 100.0, 0.05, 0.0, 0.2, 0.0);
        assert_relative_eq!(put, 10.0, epsilon = 1e-12);
    }

    #[test]
    #[should_panic]
    fn american_kind_has_no_closed_form() {
        black_scholes_merton(OptionKind::AmericanCall, 100.0, 100.0, 0.05, 0.0, 0.2, 1.0);
    }
}

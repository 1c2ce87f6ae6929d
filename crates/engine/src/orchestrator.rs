//! Per-job orchestration: turns a bare set of option parameters into a
//! sized mesh, runs the Crank-Nicolson sweep, and interpolates the price
//! at the requested spot.

use crate::config::EngineConfig;
use crate::crank_nicolson::CrankNicolsonDriver;
use crate::mesh::Mesh;
use crate::option::{build, ContractTerms, OptionKind};
use pricer_core::errors::{Error, Result};
use pricer_core::Real;
use tracing::debug;

/// The inputs needed to price a single contract, independent of any
/// job-queue or ticker bookkeeping a caller layers on top.
#[derive(Debug, Clone, Copy)]
pub struct PricingRequest {
    /// Contract variant to price.
    pub option_type: OptionKind,
    /// Strike price.
    pub strike: Real,
    /// Time to maturity, in years.
    pub maturity: Real,
    /// Current underlying price.
    pub spot: Real,
    /// Annualized risk-free rate.
    pub risk_free_rate: Real,
    /// Annualized volatility.
    pub volatility: Real,
    /// Continuous dividend yield.
    pub dividend_yield: Real,
}

fn validate(request: &PricingRequest) -> Result<()> {
    if !(request.strike.is_finite() && request.strike > 0.0) {
        return Err(Error::InvalidArgument(format!(
            "strike must be positive and finite, got {}",
            request.strike
        )));
    }
    if !(request.spot.is_finite() && request.spot > 0.0) {
        return Err(Error::InvalidArgument(format!(
            "spot must be positive and finite, got {}",
            request.spot
        )));
    }
    if !(request.volatility.is_finite() && request.volatility > 0.0) {
        return Err(Error::InvalidArgument(format!(
            "volatility must be positive and finite, got {}",
            request.volatility
        )));
    }
    if !request.maturity.is_finite() || request.maturity < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "maturity must be non-negative and finite, got {}",
            request.maturity
        )));
    }
    if !request.risk_free_rate.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "risk-free rate must be finite, got {}",
            request.risk_free_rate
        )));
    }
    Ok(())
}

/// Chooses `S_max`, `N`, `J` for `request` under the bounds in `config`.
fn grid_sizing(request: &PricingRequest, config: &EngineConfig) -> (Real, usize, usize) {
    let s_max = (2.0 * request.spot).max(4.0 * request.strike).ceil();
    let j = ((s_max * 100.0).round() as usize).min(config.max_grid_points);
    let days = request.maturity * config.trading_days_per_year;
    let n = ((days * 2.0).round() as usize).max(config.min_time_steps);
    (s_max, n, j)
}

/// Linearly interpolates `row` (values on grid `s`) at `spot`.
///
/// `spot` is clamped to `[s[0], s[last]]` before interpolating, since the
/// mesh never extends past `S_max`.
fn interpolate(s: &[Real], row: &[Real], spot: Real) -> Real {
    let last = s.len() - 1;
    if spot <= s[0] {
        return row[0];
    }
    if spot >= s[last] {
        return row[last];
    }
    let j = match s.binary_search_by(|probe| {
        probe.partial_cmp(&spot).unwrap_or(std::cmp::Ordering::Equal)
    }) {
        Ok(i) => return row[i],
        Err(i) => i - 1,
    };
    let (s0, s1) = (s[j], s[j + 1]);
    let (v0, v1) = (row[j], row[j + 1]);
    let weight = (spot - s0) / (s1 - s0);
    v0 + weight * (v1 - v0)
}

/// Prices `request` under `config`: sizes the mesh, runs the
/// Crank-Nicolson sweep, and interpolates the value at `request.spot`.
///
/// A zero (or negative, after validation, impossible) maturity is a
/// short-circuit: the price is simply the payoff at `spot`, since there
/// is nothing left to discretize.
pub fn solve(request: &PricingRequest, config: &EngineConfig) -> Result<Real> {
    validate(request)?;

    let terms = ContractTerms {
        strike: request.strike,
        maturity: request.maturity,
        risk_free_rate: request.risk_free_rate,
        dividend_yield: request.dividend_yield,
    };
    let option = build(request.option_type, terms);

    if request.maturity == 0.0 {
        return Ok(option.payoff(request.spot));
    }

    let (s_max, n, j) = grid_sizing(request, config);
    debug!(s_max, n, j, "grid sizing chosen for job");

    let mut mesh = Mesh::new(option.as_ref(), s_max, n, j)?;
    let dt = mesh.t[1] - mesh.t[0];
    let mut driver = CrankNicolsonDriver::new(option.as_ref(), request.volatility, &mesh.s, dt)?;
    driver.run(option.as_ref(), &mut mesh)?;

    Ok(interpolate(&mesh.s, &mesh.v[0], request.spot))
}

//! Option contract variants.
//!
//! Each variant supplies the three hooks the Crank-Nicolson driver needs:
//! a terminal payoff, a boundary condition, and (for American contracts)
//! an early-exercise projection. Dispatch happens once per job through
//! [`OptionVariant`], not per mesh point.

use pricer_core::errors::{Error, Result};
use pricer_core::Real;
use std::str::FromStr;

/// The four contract shapes this engine prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// Exercisable only at maturity, payoff `max(S-K, 0)`.
    EuropeanCall,
    /// Exercisable only at maturity, payoff `max(K-S, 0)`.
    EuropeanPut,
    /// Exercisable at any time up to maturity, payoff `max(S-K, 0)`.
    AmericanCall,
    /// Exercisable at any time up to maturity, payoff `max(K-S, 0)`.
    AmericanPut,
}

impl OptionKind {
    /// Whether this variant allows early exercise.
    pub fn is_american(self) -> bool {
        matches!(self, OptionKind::AmericanCall | OptionKind::AmericanPut)
    }

    /// Whether this variant is a call (vs. a put).
    pub fn is_call(self) -> bool {
        matches!(self, OptionKind::EuropeanCall | OptionKind::AmericanCall)
    }
}

impl FromStr for OptionKind {
    type Err = Error;

    /// Parses the case-sensitive job-construction strings from the
    /// external producer interface.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "european_call" => Ok(OptionKind::EuropeanCall),
            "european_put" => Ok(OptionKind::EuropeanPut),
            "american_call" => Ok(OptionKind::AmericanCall),
            "american_put" => Ok(OptionKind::AmericanPut),
            other => Err(Error::InvalidArgument(format!(
                "unrecognized option_type: {other:?}"
            ))),
        }
    }
}

/// Fixed economic parameters of a single contract.
///
/// Shared by all four variants; what differs between them is how these
/// numbers turn into a payoff, a boundary condition, and a projection.
#[derive(Debug, Clone, Copy)]
pub struct ContractTerms {
    /// Strike price.
    pub strike: Real,
    /// Time to maturity, in years.
    pub maturity: Real,
    /// Annualized risk-free rate.
    pub risk_free_rate: Real,
    /// Continuous dividend yield.
    pub dividend_yield: Real,
}

/// The capability set the Crank-Nicolson driver dispatches through.
pub trait OptionVariant: Send + Sync {
    /// This variant's tag.
    fn kind(&self) -> OptionKind;

    /// The contract's fixed terms.
    fn terms(&self) -> ContractTerms;

    /// Terminal payoff at underlying price `s`.
    fn payoff(&self, s: Real) -> Real;

    /// Terminal payoff evaluated over a whole price grid.
    fn payoff_curve(&self, s: &[Real]) -> Vec<Real> {
        s.iter().map(|&sv| self.payoff(sv)).collect()
    }

    /// Sets `v_row[0]` and `v_row[last]` for the mesh row at time `t_now`.
    fn apply_boundary(&self, v_row: &mut [Real], s: &[Real], t_now: Real);

    /// Projects `v_row` onto `v >= payoff(s)`. A no-op for European
    /// contracts.
    fn apply_early_exercise(&self, _v_row: &mut [Real], _s: &[Real]) {}
}

/// Discount factor used on the boundary: `e^{-(r-q)(T-t_now)}`.
///
/// Using `(r-q)` in place of `r` keeps the boundary consistent with a
/// nonzero dividend yield; for `q = 0` it reduces to the plain `r`
/// discount.
fn forward_discount(terms: &ContractTerms, t_now: Real) -> Real {
    let tau = (terms.maturity - t_now).max(0.0);
    (-(terms.risk_free_rate - terms.dividend_yield) * tau).exp()
}

struct EuropeanCall(ContractTerms);
struct EuropeanPut(ContractTerms);
struct AmericanCall(ContractTerms);
struct AmericanPut(ContractTerms);

impl OptionVariant for EuropeanCall {
    fn kind(&self) -> OptionKind {
        OptionKind::EuropeanCall
    }

    fn terms(&self) -> ContractTerms {
        self.0
    }

    fn payoff(&self, s: Real) -> Real {
        (s - self.0.strike).max(0.0)
    }

    fn apply_boundary(&self, v_row: &mut [Real], s: &[Real], t_now: Real) {
        let last = v_row.len() - 1;
        v_row[0] = 0.0;
        v_row[last] = s[last] - self.0.strike * forward_discount(&self.0, t_now);
    }
}

impl OptionVariant for EuropeanPut {
    fn kind(&self) -> OptionKind {
        OptionKind::EuropeanPut
    }

    fn terms(&self) -> ContractTerms {
        self.0
    }

    fn payoff(&self, s: Real) -> Real {
        (self.0.strike - s).max(0.0)
    }

    fn apply_boundary(&self, v_row: &mut [Real], s: &[Real], t_now: Real) {
        let last = v_row.len() - 1;
        v_row[0] = self.0.strike * forward_discount(&self.0, t_now);
        v_row[last] = 0.0;
        let _ = s;
    }
}

impl OptionVariant for AmericanCall {
    fn kind(&self) -> OptionKind {
        OptionKind::AmericanCall
    }

    fn terms(&self) -> ContractTerms {
        self.0
    }

    fn payoff(&self, s: Real) -> Real {
        (s - self.0.strike).max(0.0)
    }

    fn apply_boundary(&self, v_row: &mut [Real], s: &[Real], t_now: Real) {
        let last = v_row.len() - 1;
        v_row[0] = 0.0;
        let s_max = s[last];
        v_row[last] = (s_max - self.0.strike)
            .max(s_max - self.0.strike * forward_discount(&self.0, t_now));
    }

    fn apply_early_exercise(&self, v_row: &mut [Real], s: &[Real]) {
        for (v, &sv) in v_row.iter_mut().zip(s.iter()) {
            *v = v.max(self.payoff(sv));
        }
    }
}

impl OptionVariant for AmericanPut {
    fn kind(&self) -> OptionKind {
        OptionKind::AmericanPut
    }

    fn terms(&self) -> ContractTerms {
        self.0
    }

    fn payoff(&self, s: Real) -> Real {
        (self.0.strike - s).max(0.0)
    }

    fn apply_boundary(&self, v_row: &mut [Real], s: &[Real], t_now: Real) {
        let last = v_row.len() - 1;
        v_row[0] = (self.0.strike - s[0])
            .max(self.0.strike * forward_discount(&self.0, t_now) - s[0]);
        v_row[last] = 0.0;
    }

    fn apply_early_exercise(&self, v_row: &mut [Real], s: &[Real]) {
        for (v, &sv) in v_row.iter_mut().zip(s.iter()) {
            *v = v.max(self.payoff(sv));
        }
    }
}

/// Builds the option variant for `kind` with the given contract terms.
pub fn build(kind: OptionKind, terms: ContractTerms) -> Box<dyn OptionVariant> {
    match kind {
        OptionKind::EuropeanCall => Box::new(EuropeanCall(terms)),
        OptionKind::EuropeanPut => Box::new(EuropeanPut(terms)),
        OptionKind::AmericanCall => Box::new(AmericanCall(terms)),
        OptionKind::AmericanPut => Box::new(AmericanPut(terms)),
    }
}

//! The discretized price/time grid the Crank-Nicolson driver sweeps.

use crate::option::OptionVariant;
use pricer_core::errors::{Error, Result};
use pricer_core::Real;

/// A uniform grid over `[0, S_max] x [0, T]` plus the value surface `V`.
///
/// `v[n][j]` is the option value at price `s[j]` and time `t[n]`; row
/// `N` (the last row) holds the terminal payoff immediately after
/// construction.
pub struct Mesh {
    /// Underlying price grid, `J + 1` points from `0` to `S_max`.
    pub s: Vec<Real>,
    /// Time grid, `N + 1` points from `0` to `T`.
    pub t: Vec<Real>,
    /// Value surface, `(N + 1) x (J + 1)`.
    pub v: Vec<Vec<Real>>,
}

fn linspace(lo: Real, hi: Real, points: usize) -> Vec<Real> {
    if points == 1 {
        return vec![lo];
    }
    let step = (hi - lo) / (points - 1) as Real;
    (0..points).map(|i| lo + step * i as Real).collect()
}

impl Mesh {
    /// Builds the mesh for `option` over `[0, s_max]` with `j_steps`
    /// price intervals and `n_steps` time intervals, and fills the
    /// terminal row with the option's payoff.
    pub fn new(
        option: &dyn OptionVariant,
        s_max: Real,
        n_steps: usize,
        j_steps: usize,
    ) -> Result<Self> {
        if j_steps < 2 {
            return Err(Error::InvalidArgument(format!(
                "mesh requires at least 2 price steps, got {j_steps}"
            )));
        }
        if n_steps < 1 {
            return Err(Error::InvalidArgument(format!(
                "mesh requires at least 1 time step, got {n_steps}"
            )));
        }
        if !(s_max.is_finite() && s_max > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "s_max must be positive and finite, got {s_max}"
            )));
        }

        let s = linspace(0.0, s_max, j_steps + 1);
        let maturity = option.terms().maturity;
        let t = linspace(0.0, maturity, n_steps + 1);

        let mut v = vec![vec![0.0; j_steps + 1]; n_steps + 1];
        v[n_steps] = option.payoff_curve(&s);

        Ok(Mesh { s, t, v })
    }

    /// Number of price intervals, `J`.
    pub fn j_steps(&self) -> usize {
        self.s.len() - 1
    }

    /// Number of time intervals, `N`.
    pub fn n_steps(&self) -> usize {
        self.t.len() - 1
    }
}

//! The Crank-Nicolson backward sweep: builds the two constant-coefficient
//! tridiagonal operators once per job, then steps the mesh from the
//! terminal row back to `t = 0`, re-solving the interior system at each
//! step and re-applying the boundary and (for American contracts) the
//! early-exercise projection.

use crate::mesh::Mesh;
use crate::option::OptionVariant;
use crate::tridiagonal::solve_into;
use pricer_core::errors::{Error, Result};
use pricer_core::Real;

/// Owns the per-job coefficient arrays and Thomas-elimination scratch
/// space so a full backward sweep allocates nothing beyond its one-time
/// setup.
pub struct CrankNicolsonDriver {
    ml_lower: Vec<Real>,
    ml_main: Vec<Real>,
    ml_upper: Vec<Real>,
    mr_lower: Vec<Real>,
    mr_main: Vec<Real>,
    mr_upper: Vec<Real>,
    rhs: Vec<Real>,
    thomas_c: Vec<Real>,
    thomas_d: Vec<Real>,
    sol: Vec<Real>,
}

impl CrankNicolsonDriver {
    /// Builds the constant-coefficient operators `M_L` and `M_R` for a
    /// grid with price points `s` and a uniform time step `dt`, under
    /// volatility `sigma` and the option's rate and dividend yield.
    ///
    /// The coefficients `a_j, b_j, c_j` depend only on `j`, `sigma`,
    /// `r`, `q` and `dt` — not on the time step index `n` — so they, and
    /// the two operators built from them, are computed exactly once.
    pub fn new(option: &dyn OptionVariant, sigma: Real, s: &[Real], dt: Real) -> Result<Self> {
        let j = s.len().saturating_sub(1);
        if j < 2 {
            return Err(Error::InvalidArgument(format!(
                "Crank-Nicolson driver requires at least 2 price steps, got {j}"
            )));
        }
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "volatility must be positive and finite, got {sigma}"
            )));
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "time step must be positive and finite, got {dt}"
            )));
        }

        let ds = s[1] - s[0];
        let alpha = dt / (ds * ds);
        let beta = dt / ds;
        let terms = option.terms();
        let (r, q) = (terms.risk_free_rate, terms.dividend_yield);
        let sigma2 = sigma * sigma;

        let interior = j - 1;
        let mut ml_lower = vec![0.0; interior];
        let mut ml_main = vec![0.0; interior];
        let mut ml_upper = vec![0.0; interior];
        let mut mr_lower = vec![0.0; interior];
        let mut mr_main = vec![0.0; interior];
        let mut mr_upper = vec![0.0; interior];

        for (idx, jx) in (1..j).enumerate() {
            let sj = s[jx];
            let a = 0.5 * sigma2 * sj * sj * alpha - 0.5 * (r - q) * sj * beta;
            let b = -sigma2 * sj * sj * alpha - r * dt;
            let c = 0.5 * sigma2 * sj * sj * alpha + 0.5 * (r - q) * sj * beta;

            ml_lower[idx] = -0.5 * a;
            ml_main[idx] = 1.0 - 0.5 * b;
            ml_upper[idx] = -0.5 * c;
            mr_lower[idx] = 0.5 * a;
            mr_main[idx] = 1.0 + 0.5 * b;
            mr_upper[idx] = 0.5 * c;
        }

        Ok(Self {
            ml_lower,
            ml_main,
            ml_upper,
            mr_lower,
            mr_main,
            mr_upper,
            rhs: vec![0.0; interior],
            thomas_c: vec![0.0; interior],
            thomas_d: vec![0.0; interior],
            sol: vec![0.0; interior],
        })
    }

    /// Steps `mesh` backward from its terminal row to row 0 in place.
    pub fn run(&mut self, option: &dyn OptionVariant, mesh: &mut Mesh) -> Result<()> {
        let n_steps = mesh.n_steps();
        let j = mesh.j_steps();
        let interior = j - 1;
        if self.rhs.len() != interior {
            return Err(Error::InvalidArgument(
                "mesh price-grid size does not match the driver's coefficient arrays".to_string(),
            ));
        }

        for n in (0..n_steps).rev() {
            {
                let t_now = mesh.t[n];
                let v_n = &mut mesh.v[n];
                option.apply_boundary(v_n, &mesh.s, t_now);
            }

            let (known, v_next) = mesh.v.split_at(n + 1);
            let v_next = &v_next[0];
            let v_now = &known[n];

            for k in 0..interior {
                self.rhs[k] = self.mr_lower[k] * v_next[k]
                    + self.mr_main[k] * v_next[k + 1]
                    + self.mr_upper[k] * v_next[k + 2];
            }
            self.rhs[0] -= self.ml_lower[0] * v_now[0];
            let last = interior - 1;
            self.rhs[last] -= self.ml_upper[last] * v_now[j];

            solve_into(
                &self.ml_lower,
                &self.ml_main,
                &self.ml_upper,
                &self.rhs,
                &mut self.thomas_c,
                &mut self.thomas_d,
                &mut self.sol,
            )?;

            mesh.v[n][1..j].copy_from_slice(&self.sol);
            option.apply_early_exercise(&mut mesh.v[n], &mesh.s);
        }

        // Re-apply the boundary and early-exercise projection on row 0:
        // the sweep above already set it, but this keeps the operation
        // idempotent under repeated calls to `run` on the same mesh.
        option.apply_boundary(&mut mesh.v[0], &mesh.s, mesh.t[0]);
        option.apply_early_exercise(&mut mesh.v[0], &mesh.s);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{build, ContractTerms, OptionKind};

    fn terms() -> ContractTerms {
        ContractTerms {
            strike: 100.0,
            maturity: 1.0,
            risk_free_rate: 0.05,
            dividend_yield: 0.0,
        }
    }

    #[test]
    fn european_call_price_is_within_reasonable_bounds() {
        let opt = build(OptionKind::EuropeanCall, terms());
        let mut mesh = Mesh::new(opt.as_ref(), 200.0, 200, 200).unwrap();
        let dt = mesh.t[1] - mesh.t[0];
        let mut driver = CrankNicolsonDriver::new(opt.as_ref(), 0.2, &mesh.s, dt).unwrap();
        driver.run(opt.as_ref(), &mut mesh).unwrap();

        // Find the grid index nearest spot = 100.
        let idx = mesh
            .s
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (**a - 100.0).abs().partial_cmp(&(**b - 100.0).abs()).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        let price = mesh.v[0][idx];
        // ATM BS call with these parameters is roughly 10.45; grid error
        // at this resolution keeps it within a couple of dollars.
        assert!(price > 8.0 && price < 13.0, "price out of range: {price}");
    }

    #[test]
    fn boundary_values_hold_after_full_sweep() {
        let opt = build(OptionKind::EuropeanCall, terms());
        let mut mesh = Mesh::new(opt.as_ref(), 200.0, 100, 100).unwrap();
        let dt = mesh.t[1] - mesh.t[0];
        let mut driver = CrankNicolsonDriver::new(opt.as_ref(), 0.2, &mesh.s, dt).unwrap();
        driver.run(opt.as_ref(), &mut mesh).unwrap();
        assert_eq!(mesh.v[0][0], 0.0);
    }

    #[test]
    fn american_put_dominates_european_put() {
        let terms = terms();
        let euro = build(OptionKind::EuropeanPut, terms);
        let amer = build(OptionKind::AmericanPut, terms);

        let mut mesh_e = Mesh::new(euro.as_ref(), 200.0, 150, 150).unwrap();
        let dt = mesh_e.t[1] - mesh_e.t[0];
        let mut driver_e = CrankNicolsonDriver::new(euro.as_ref(), 0.3, &mesh_e.s, dt).unwrap();
        driver_e.run(euro.as_ref(), &mut mesh_e).unwrap();

        let mut mesh_a = Mesh::new(amer.as_ref(), 200.0, 150, 150).unwrap();
        let mut driver_a = CrankNicolsonDriver::new(amer.as_ref(), 0.3, &mesh_a.s, dt).unwrap();
        driver_a.run(amer.as_ref(), &mut mesh_a).unwrap();

        for j in 0..mesh_e.v[0].len() {
            assert!(mesh_a.v[0][j] >= mesh_e.v[0][j] - 1e-9);
        }
    }

    #[test]
    fn rejects_mismatched_mesh_size() {
        let opt = build(OptionKind::EuropeanCall, terms());
        let mesh = Mesh::new(opt.as_ref(), 200.0, 50, 100).unwrap();
        let dt = mesh.t[1] - mesh.t[0];
        // Build the driver for a different grid size, then run it
        // against this mesh.
        let other_s = vec![0.0, 50.0, 100.0, 150.0, 200.0];
        let mut driver = CrankNicolsonDriver::new(opt.as_ref(), 0.2, &other_s, dt).unwrap();
        let mut mesh = mesh;
        assert!(driver.run(opt.as_ref(), &mut mesh).is_err());
    }
}

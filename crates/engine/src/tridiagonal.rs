//! Tridiagonal linear solver (Thomas algorithm).
//!
//! Forward elimination followed by back-substitution, O(n). Inputs are
//! never mutated; scratch space for the elimination coefficients is
//! either allocated fresh ([`solve`]) or supplied by the caller
//! ([`solve_into`]) so the Crank-Nicolson driver can reuse one buffer
//! across every time step of a job.

use pricer_core::errors::{Error, Result};
use pricer_core::Real;

/// Solves `M x = rhs` for a tridiagonal `M` given by `(lower, main, upper)`,
/// allocating fresh scratch space and the output vector.
///
/// `lower[0]` and `upper[n-1]` are never read (there is no sub-diagonal
/// entry on the first row, nor a super-diagonal entry on the last).
pub fn solve(lower: &[Real], main: &[Real], upper: &[Real], rhs: &[Real]) -> Result<Vec<Real>> {
    let n = rhs.len();
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];
    let mut out = vec![0.0; n];
    solve_into(lower, main, upper, rhs, &mut c_prime, &mut d_prime, &mut out)?;
    Ok(out)
}

/// Same algorithm as [`solve`], writing into caller-supplied scratch
/// buffers (`c_prime`, `d_prime`) and output buffer (`out`) instead of
/// allocating. All four buffers plus `lower`/`main`/`upper` must have
/// length `rhs.len()`.
pub fn solve_into(
    lower: &[Real],
    main: &[Real],
    upper: &[Real],
    rhs: &[Real],
    c_prime: &mut [Real],
    d_prime: &mut [Real],
    out: &mut [Real],
) -> Result<()> {
    let n = rhs.len();
    if lower.len() != n || main.len() != n || upper.len() != n {
        return Err(Error::InvalidArgument(format!(
            "tridiagonal solve: length mismatch (lower={}, main={}, upper={}, rhs={})",
            lower.len(),
            main.len(),
            upper.len(),
            n
        )));
    }
    if c_prime.len() != n || d_prime.len() != n || out.len() != n {
        return Err(Error::InvalidArgument(
            "tridiagonal solve: scratch buffer length mismatch".to_string(),
        ));
    }

    if n == 0 {
        return Ok(());
    }

    let pivot0 = main[0];
    if pivot0 == 0.0 || !pivot0.is_finite() {
        return Err(Error::NumericalFailure(
            "zero or non-finite pivot at row 0 of Thomas elimination".to_string(),
        ));
    }
    c_prime[0] = upper[0] / pivot0;
    d_prime[0] = rhs[0] / pivot0;

    for i in 1..n {
        let denom = main[i] - lower[i] * c_prime[i - 1];
        if denom == 0.0 || !denom.is_finite() {
            return Err(Error::NumericalFailure(format!(
                "zero or non-finite pivot at row {i} of Thomas elimination"
            )));
        }
        if i < n - 1 {
            c_prime[i] = upper[i] / denom;
        }
        d_prime[i] = (rhs[i] - lower[i] * d_prime[i - 1]) / denom;
    }

    out[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        out[i] = d_prime[i] - c_prime[i] * out[i + 1];
    }

    if out.iter().any(|v| !v.is_finite()) {
        return Err(Error::NumericalFailure(
            "non-finite value produced by Thomas back-substitution".to_string(),
        ));
    }
    Ok(())
}

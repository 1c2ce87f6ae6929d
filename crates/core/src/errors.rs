//! Error types shared across the pricer workspace.
//!
//! A single `thiserror`-derived enum covers both generic precondition /
//! postcondition / runtime failures and the two error kinds specific to
//! this system: a failed numerical solve, and a failure surfaced by a
//! caller-supplied result callback. Preconditions map to the `ensure!`
//! and `fail!` convenience macros defined here.

use thiserror::Error;

/// The top-level error type used throughout the pricer crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Postcondition violated.
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),

    /// Index out of range.
    #[error("index ({index}) out of range [0, {size})")]
    IndexOutOfRange {
        /// The index that was out of range.
        index: usize,
        /// The size of the container.
        size: usize,
    },

    /// Invalid argument: unrecognized option type, non-positive strike or
    /// volatility, negative maturity, degenerate grid sizing.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The finite-difference solve failed to produce a usable result: a
    /// zero pivot in the Thomas elimination, or a non-finite value
    /// propagated through the mesh.
    #[error("numerical failure: {0}")]
    NumericalFailure(String),

    /// The caller-supplied result callback panicked or otherwise failed.
    #[error("callback failure: {0}")]
    CallbackFailure(String),
}

/// Shorthand `Result` type used throughout the pricer crates.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use pricer_core::{ensure, errors::Error};
/// fn positive(x: f64) -> pricer_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use pricer_core::{ensure_post, errors::Error};
/// fn compute(x: f64) -> pricer_core::errors::Result<f64> {
///     let result = x * 2.0;
///     ensure_post!(result > 0.0, "result must be positive, got {result}");
///     Ok(result)
/// }
/// assert!(compute(1.0).is_ok());
/// assert!(compute(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use pricer_core::{fail, errors::Error};
/// fn always_err() -> pricer_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}

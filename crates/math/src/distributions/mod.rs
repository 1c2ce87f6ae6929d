//! Probability distributions.
//!
//! Just the standard normal: the Crank-Nicolson solver never needs it,
//! but the closed-form Black-Scholes-Merton reference used to validate
//! it against the test tolerances in the engine crate does.

pub mod normal;

pub use normal::{normal_cdf, normal_cdf_inverse, normal_pdf};

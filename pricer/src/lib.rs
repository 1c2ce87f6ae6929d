//! # pricer
//!
//! A Crank-Nicolson finite-difference Black-Scholes option pricing
//! engine with a deduplicating, parallel job scheduler built on top of
//! it.
//!
//! This crate is a **façade** that re-exports the underlying workspace
//! crates. Application code should depend on this crate rather than the
//! individual `pricer-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! pricer = "0.1"
//! ```
//!
//! ```rust
//! use pricer::engine::{EngineConfig, OptionKind, PricingRequest};
//!
//! let request = PricingRequest {
//!     option_type: OptionKind::EuropeanCall,
//!     strike: 100.0,
//!     maturity: 1.0,
//!     spot: 100.0,
//!     risk_free_rate: 0.05,
//!     volatility: 0.2,
//!     dividend_yield: 0.0,
//! };
//! let price = pricer::engine::solve(&request, &EngineConfig::default()).unwrap();
//! assert!(price > 0.0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types and the shared error hierarchy.
pub use pricer_core as core;

/// Standard-normal distribution helpers.
pub use pricer_math as math;

/// The Crank-Nicolson finite-difference pricing engine.
pub use pricer_engine as engine;

/// The deduplicating job queue and parallel worker pool.
pub use pricer_scheduler as scheduler;

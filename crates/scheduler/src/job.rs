//! A single pricing job and the identity used to deduplicate it.

use ordered_float::OrderedFloat;
use pricer_core::errors::{Error, Result};
use pricer_core::Real;
use pricer_engine::{OptionKind, PricingRequest};

/// The dedup key for a job: two jobs with the same identity are the
/// same economic request, even if their market data (spot, rate,
/// volatility) has since moved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobIdentity {
    ticker: String,
    option_type: OptionKind,
    strike: OrderedFloat<Real>,
    maturity: OrderedFloat<Real>,
}

impl JobIdentity {
    /// The ticker symbol this job prices an option on.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// The contract variant.
    pub fn option_type(&self) -> OptionKind {
        self.option_type
    }

    /// The strike price.
    pub fn strike(&self) -> Real {
        self.strike.0
    }

    /// The time to maturity, in years.
    pub fn maturity(&self) -> Real {
        self.maturity.0
    }
}

/// A request to price one option, carrying both its identity (ticker,
/// type, strike, maturity) and the market data (spot, rate, volatility,
/// dividend yield) needed to price it.
#[derive(Debug, Clone)]
pub struct OptionJob {
    ticker: String,
    option_type: OptionKind,
    strike: Real,
    maturity: Real,
    spot: Real,
    current_option_price: Real,
    risk_free_rate: Real,
    volatility: Real,
    dividend_yield: Real,
}

impl OptionJob {
    /// Builds a job, validating the inputs a malformed market-data feed
    /// could otherwise hand this engine: a non-empty ticker, and
    /// positive strike/spot/volatility with a non-negative maturity
    /// expressed in years. `current_option_price` is the observed market
    /// quote; it is carried through to the result unchanged and never
    /// enters the pricing calculation itself.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ticker: impl Into<String>,
        option_type: OptionKind,
        strike: Real,
        maturity: Real,
        spot: Real,
        current_option_price: Real,
        risk_free_rate: Real,
        volatility: Real,
        dividend_yield: Real,
    ) -> Result<Self> {
        let ticker = ticker.into();
        if ticker.trim().is_empty() {
            return Err(Error::InvalidArgument("ticker must not be empty".to_string()));
        }
        if !(strike.is_finite() && strike > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "strike must be positive and finite, got {strike}"
            )));
        }
        if !(spot.is_finite() && spot > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "spot must be positive and finite, got {spot}"
            )));
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "volatility must be positive and finite, got {volatility}"
            )));
        }
        if !maturity.is_finite() || maturity < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "maturity must be non-negative and finite (in years), got {maturity}"
            )));
        }
        if !current_option_price.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "current option price must be finite, got {current_option_price}"
            )));
        }
        Ok(OptionJob {
            ticker,
            option_type,
            strike,
            maturity,
            spot,
            current_option_price,
            risk_free_rate,
            volatility,
            dividend_yield,
        })
    }

    /// This job's dedup identity.
    pub fn identity(&self) -> JobIdentity {
        JobIdentity {
            ticker: self.ticker.clone(),
            option_type: self.option_type,
            strike: OrderedFloat(self.strike),
            maturity: OrderedFloat(self.maturity),
        }
    }

    /// The current underlying spot price carried by this job.
    pub fn spot(&self) -> Real {
        self.spot
    }

    /// The observed market price for the option itself, passed through
    /// unchanged; never an input to the pricing calculation.
    pub fn current_option_price(&self) -> Real {
        self.current_option_price
    }

    /// Converts this job into the engine's variant-agnostic pricing
    /// request.
    pub fn to_request(&self) -> PricingRequest {
        PricingRequest {
            option_type: self.option_type,
            strike: self.strike,
            maturity: self.maturity,
            spot: self.spot,
            risk_free_rate: self.risk_free_rate,
            volatility: self.volatility,
            dividend_yield: self.dividend_yield,
        }
    }
}

/// The outcome of pricing one job.
#[derive(Debug, Clone)]
pub struct OptionJobResult {
    /// The job's identity.
    pub identity: JobIdentity,
    /// The underlying spot the job was priced at (`current_price`).
    pub spot: Real,
    /// The observed market price for the option, passed through from the
    /// job unchanged.
    pub current_option_price: Real,
    /// The computed theoretical price at `spot`.
    pub fair_value: Real,
}

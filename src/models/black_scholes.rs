use crate::models::{GreekModel, LegInputs, Regularization};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Volatility floor.
pub const MIN_SIGMA: f64 = 1e-4;

pub const DEFAULT_MIN_TIME_HOURS: f64 = 1.0;

/// Variance coefficient in the gamma d1 term as observed in the production
/// charts. The textbook value (used by delta) is 0.5.
pub const GAMMA_D1_DRIFT: f64 = 0.044;

/// Coefficient of sigma^2 in the textbook d1.
pub const STANDARD_D1_DRIFT: f64 = 0.5;

/// d1 = (ln(S/K) + (r + drift * sigma^2) * T) / (sigma * sqrt(T))
///
/// `t` and `sigma` must already be regularized.
#[inline]
fn d1(spot: f64, strike: f64, t: f64, r: f64, sigma: f64, drift: f64) -> f64 {
    ((spot / strike).ln() + (r + drift * sigma * sigma) * t) / (sigma * t.sqrt())
}

/// Black-Scholes delta of a European option.
///
/// N(d1) for calls, N(d1) - 1 for puts. `t` and `sigma` are floored by
/// `reg`; non-positive `spot` or `strike` yields NaN.
pub fn black_scholes_delta(
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
    is_call: bool,
    reg: &Regularization,
) -> f64 {
    delta_with(&Normal::standard(), spot, strike, t, r, sigma, is_call, reg)
}

/// Black-Scholes gamma using the observed `GAMMA_D1_DRIFT`.
///
/// phi(d1) / (S * sigma * sqrt(T)). Same for calls and puts.
pub fn black_scholes_gamma(
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
    reg: &Regularization,
) -> f64 {
    gamma_with(&Normal::standard(), spot, strike, t, r, sigma, GAMMA_D1_DRIFT, reg)
}

#[allow(clippy::too_many_arguments)]
#[inline]
fn delta_with(
    normal: &Normal,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
    is_call: bool,
    reg: &Regularization,
) -> f64 {
    let t = reg.time(t);
    let sigma = reg.sigma(sigma);
    let n_d1 = normal.cdf(d1(spot, strike, t, r, sigma, STANDARD_D1_DRIFT));
    if is_call {
        n_d1
    } else {
        n_d1 - 1.0
    }
}

#[allow(clippy::too_many_arguments)]
#[inline]
fn gamma_with(
    normal: &Normal,
    spot: f64,
    strike: f64,
    t: f64,
    r: f64,
    sigma: f64,
    drift: f64,
    reg: &Regularization,
) -> f64 {
    let t = reg.time(t);
    let sigma = reg.sigma(sigma);
    normal.pdf(d1(spot, strike, t, r, sigma, drift)) / (spot * sigma * t.sqrt())
}

pub struct BlackScholesDelta {
    normal: Normal,
    reg: Regularization,
}

impl BlackScholesDelta {
    pub fn new(reg: Regularization) -> Self {
        Self { normal: Normal::standard(), reg }
    }
}

impl GreekModel for BlackScholesDelta {
    #[inline]
    fn name(&self) -> &'static str {
        "Delta"
    }

    #[inline]
    fn value(&self, spot: f64, leg: &LegInputs) -> f64 {
        delta_with(
            &self.normal,
            spot,
            leg.strike,
            leg.ttl_years,
            leg.rate,
            leg.sigma,
            leg.kind.is_call(),
            &self.reg,
        )
    }
}

pub struct BlackScholesGamma {
    normal: Normal,
    reg: Regularization,
    drift: f64,
}

impl BlackScholesGamma {
    pub fn new(reg: Regularization) -> Self {
        Self::with_drift(reg, GAMMA_D1_DRIFT)
    }

    /// Gamma with a custom d1 variance coefficient; pass
    /// `STANDARD_D1_DRIFT` for the textbook formula.
    pub fn with_drift(reg: Regularization, drift: f64) -> Self {
        Self { normal: Normal::standard(), reg, drift }
    }
}

impl GreekModel for BlackScholesGamma {
    #[inline]
    fn name(&self) -> &'static str {
        "Gamma"
    }

    #[inline]
    fn value(&self, spot: f64, leg: &LegInputs) -> f64 {
        gamma_with(
            &self.normal,
            spot,
            leg.strike,
            leg.ttl_years,
            leg.rate,
            leg.sigma,
            self.drift,
            &self.reg,
        )
    }
}

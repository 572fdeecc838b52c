pub mod black_scholes;
pub mod portfolio;

use crate::config::AppConfig;
use crate::types::OptionKind;

/// Hours in a 365-day year.
const HOURS_PER_YEAR: f64 = 24.0 * 365.0;

/// Floors applied to time-to-expiry and volatility before any greek is
/// evaluated, so values stay finite as expiry approaches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regularization {
    pub min_time_years: f64,
    pub min_sigma: f64,
}

impl Regularization {
    pub fn from_min_time_hours(hours: f64) -> Self {
        Self {
            min_time_years: hours / HOURS_PER_YEAR,
            min_sigma: black_scholes::MIN_SIGMA,
        }
    }

    #[inline]
    pub fn time(&self, ttl_years: f64) -> f64 {
        ttl_years.max(self.min_time_years)
    }

    #[inline]
    pub fn sigma(&self, sigma: f64) -> f64 {
        sigma.max(self.min_sigma)
    }
}

impl Default for Regularization {
    fn default() -> Self {
        Self::from_min_time_hours(black_scholes::DEFAULT_MIN_TIME_HOURS)
    }
}

/// Per-leg inputs to a greek. Stack-allocated, Copy.
#[derive(Debug, Clone, Copy)]
pub struct LegInputs {
    pub strike: f64,
    pub ttl_years: f64,
    pub rate: f64,
    pub sigma: f64,
    pub kind: OptionKind,
}

/// All greeks implement this trait.
/// value() must be a pure function of its inputs.
pub trait GreekModel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Greek of one unit long of `leg` with the underlying at `spot`.
    fn value(&self, spot: f64, leg: &LegInputs) -> f64;

    fn curve(&self, spots: &[f64], leg: &LegInputs) -> Vec<f64> {
        spots.iter().map(|&s| self.value(s, leg)).collect()
    }
}

/// Everything besides the trades that a portfolio greek curve depends on.
#[derive(Debug, Clone, Copy)]
pub struct GreekSettings {
    pub rate: f64,
    /// Evaluate every trade as if it expired today.
    pub mock_zero_dte: bool,
    pub regularization: Regularization,
    pub gamma_d1_drift: f64,
}

impl Default for GreekSettings {
    fn default() -> Self {
        Self {
            rate: 0.05,
            mock_zero_dte: false,
            regularization: Regularization::default(),
            gamma_d1_drift: black_scholes::GAMMA_D1_DRIFT,
        }
    }
}

impl From<&AppConfig> for GreekSettings {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            rate: cfg.risk_free_rate,
            mock_zero_dte: cfg.mock_zero_dte,
            regularization: cfg.regularization(),
            gamma_d1_drift: cfg.gamma_d1_drift,
        }
    }
}

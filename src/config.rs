use crate::errors::{RiskError, RiskResult};
use crate::grid::PriceGrid;
use crate::models::Regularization;
use chrono::{DateTime, Utc};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub from_price: f64,
    pub to_price: f64,
    pub step: f64,
    pub zone_from_price: f64,
    pub zone_to_price: f64,
    pub risk_free_rate: f64,
    pub mock_zero_dte: bool,
    pub min_time_hours: f64,
    /// Explicit gamma magnification. `None` means auto-scale.
    pub gamma_plot_scale: Option<f64>,
    pub gamma_d1_drift: f64,
    pub index_cache_ttl_secs: u64,
    pub oi_bucket: f64,
    /// Default trade window: since UTC midnight this many days ago.
    /// `None` keeps the whole snapshot.
    pub from_days_ago: Option<i64>,
    /// Overrides `from_days_ago` when set.
    pub last_hedging_time: Option<DateTime<Utc>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            from_price: 1000.0,
            to_price: 6000.0,
            step: 10.0,
            zone_from_price: 1000.0,
            zone_to_price: 6000.0,
            risk_free_rate: 0.05,
            mock_zero_dte: false,
            min_time_hours: 1.0,
            gamma_plot_scale: None,
            gamma_d1_drift: crate::models::black_scholes::GAMMA_D1_DRIFT,
            index_cache_ttl_secs: 120,
            oi_bucket: 25.0,
            from_days_ago: None,
            last_hedging_time: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> RiskResult<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let gamma_plot_scale = match std::env::var("GREEKBOOK_GAMMA_PLOT_SCALE") {
            Ok(raw) => parse_gamma_scale(&raw)
                .map_err(|e| RiskError::Config(format!("GREEKBOOK_GAMMA_PLOT_SCALE: {e}")))?,
            Err(_) => defaults.gamma_plot_scale,
        };

        let mock_zero_dte = match std::env::var("GREEKBOOK_MOCK_0DTE") {
            Ok(raw) => parse_flag(&raw)
                .ok_or_else(|| RiskError::Config(format!("GREEKBOOK_MOCK_0DTE: not a flag: {raw}")))?,
            Err(_) => defaults.mock_zero_dte,
        };

        let from_days_ago = match std::env::var("GREEKBOOK_FROM_DAYS_AGO") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<i64>()
                    .map_err(|e| RiskError::Config(format!("GREEKBOOK_FROM_DAYS_AGO: {e}")))?,
            ),
            _ => defaults.from_days_ago,
        };

        let last_hedging_time = match std::env::var("GREEKBOOK_LAST_HEDGING_TIME") {
            Ok(raw) => parse_timestamp(&raw)
                .map_err(|e| RiskError::Config(format!("GREEKBOOK_LAST_HEDGING_TIME: {e}")))?,
            Err(_) => defaults.last_hedging_time,
        };

        let cfg = Self {
            from_price: env_parse("GREEKBOOK_FROM_PRICE", defaults.from_price)?,
            to_price: env_parse("GREEKBOOK_TO_PRICE", defaults.to_price)?,
            step: env_parse("GREEKBOOK_STEP", defaults.step)?,
            zone_from_price: env_parse("GREEKBOOK_ZONE_FROM_PRICE", defaults.zone_from_price)?,
            zone_to_price: env_parse("GREEKBOOK_ZONE_TO_PRICE", defaults.zone_to_price)?,
            risk_free_rate: env_parse("GREEKBOOK_RISK_FREE_RATE", defaults.risk_free_rate)?,
            mock_zero_dte,
            min_time_hours: env_parse("GREEKBOOK_MIN_TIME_HOURS", defaults.min_time_hours)?,
            gamma_plot_scale,
            gamma_d1_drift: env_parse("GREEKBOOK_GAMMA_D1_DRIFT", defaults.gamma_d1_drift)?,
            index_cache_ttl_secs: env_parse(
                "GREEKBOOK_INDEX_CACHE_TTL_SECS",
                defaults.index_cache_ttl_secs,
            )?,
            oi_bucket: env_parse("GREEKBOOK_OI_BUCKET", defaults.oi_bucket)?,
            from_days_ago,
            last_hedging_time,
        };
        cfg.validate()?;

        tracing::debug!(
            from = cfg.from_price,
            to = cfg.to_price,
            step = cfg.step,
            mock_zero_dte = cfg.mock_zero_dte,
            "config loaded"
        );

        Ok(cfg)
    }

    /// Rejects values that would let the greeks go non-finite.
    pub fn validate(&self) -> RiskResult<()> {
        if !(self.min_time_hours.is_finite() && self.min_time_hours > 0.0) {
            return Err(RiskError::Config(format!(
                "GREEKBOOK_MIN_TIME_HOURS: must be > 0, got {}",
                self.min_time_hours
            )));
        }
        Ok(())
    }

    pub fn price_grid(&self) -> RiskResult<PriceGrid> {
        PriceGrid::new(self.from_price, self.to_price, self.step)
    }

    pub fn zone_grid(&self) -> RiskResult<PriceGrid> {
        PriceGrid::new(self.zone_from_price, self.zone_to_price, self.step)
    }

    pub fn regularization(&self) -> Regularization {
        Regularization::from_min_time_hours(self.min_time_hours)
    }

    pub fn index_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.index_cache_ttl_secs)
    }
}

fn env_parse<T>(key: &str, default: T) -> RiskResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| RiskError::Config(format!("{key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Accepts the spellings an admin UI tends to store for booleans.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Zero, negative or empty means "auto".
fn parse_gamma_scale(raw: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let v = raw.parse::<f64>()?;
    Ok(if v > 0.0 { Some(v) } else { None })
}

/// RFC 3339 instant; empty means unset.
fn parse_timestamp(raw: &str) -> Result<Option<DateTime<Utc>>, chrono::ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    Ok(Some(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc)))
}

use crate::config::AppConfig;
use crate::errors::RiskResult;
use crate::models::portfolio::{portfolio_delta, portfolio_gamma};
use crate::models::GreekSettings;
use crate::plot::{gamma_peak, zero_delta_band, GammaPeak, PlotSeries, ScaledCurves, ViewType};
use crate::risk::{open_interest_by_strike, StrikeOpenInterest, TradeFilter};
use crate::strategy::OptionStrategy;
use crate::types::Trade;
use smallvec::SmallVec;

/// Values handed to the chart renderer for one risk chart. Pure
/// computation over an already-fetched trade snapshot and index price.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RiskReport {
    pub name: String,
    pub title: String,
    pub view: ViewType,
    pub index_price: f64,
    pub grid: Vec<f64>,
    pub payoff: Vec<f64>,
    pub delta: Vec<f64>,
    pub gamma: Vec<f64>,
    pub gamma_scale: f64,
    pub visual_max: f64,
    pub series: SmallVec<[PlotSeries; 3]>,
    pub zero_delta_band_halfwidth: f64,
    pub gamma_peak: Option<GammaPeak>,
    pub trade_count: usize,
    pub long_count: usize,
    pub short_count: usize,
}

impl RiskReport {
    /// Greeks are computed from `trades` on the strategy's grid; the payoff
    /// comes from whatever legs the strategy already holds.
    pub fn build(
        strategy: &OptionStrategy,
        trades: &[Trade],
        view: ViewType,
        settings: &GreekSettings,
        configured_gamma_scale: Option<f64>,
    ) -> Self {
        let grid = strategy.grid();
        let delta = portfolio_delta(grid, trades, settings);
        let gamma = portfolio_gamma(grid, trades, settings);

        let scaled = ScaledCurves::compute(strategy.payoff(), &delta, &gamma, configured_gamma_scale);
        let series = view.series(&scaled);

        let report = Self {
            name: strategy.name().to_string(),
            title: view.to_string(),
            view,
            index_price: strategy.spot(),
            grid: grid.points().to_vec(),
            payoff: strategy.payoff().to_vec(),
            zero_delta_band_halfwidth: zero_delta_band(&delta),
            gamma_peak: gamma_peak(grid.points(), &gamma),
            delta,
            gamma,
            gamma_scale: scaled.gamma_scale,
            visual_max: scaled.visual_max,
            series,
            trade_count: trades.len(),
            long_count: strategy.long_count(),
            short_count: strategy.short_count(),
        };

        tracing::info!(
            name = %report.name,
            view = %report.view,
            trades = report.trade_count,
            gamma_scale = report.gamma_scale,
            "risk report built"
        );

        report
    }

    /// Filters the book, builds the payoff strategy on the configured grid
    /// and computes the report.
    pub fn from_config(
        cfg: &AppConfig,
        name: &str,
        trades: &[Trade],
        filter: &TradeFilter,
        view: ViewType,
        index_price: f64,
    ) -> RiskResult<Self> {
        let selected = filter.apply(trades);
        let grid = cfg.price_grid()?;
        let strategy = OptionStrategy::from_trades(name, index_price, grid, &selected);
        let settings = GreekSettings::from(cfg);

        let mut report = Self::build(&strategy, &selected, view, &settings, cfg.gamma_plot_scale);
        report.title = format!("{} {}", filter.selection.title(), view);
        Ok(report)
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ZoneReport {
    pub name: String,
    pub index_price: f64,
    pub grid: Vec<f64>,
    pub longs: Vec<f64>,
    pub shorts: Vec<f64>,
    pub long_count: usize,
    pub short_count: usize,
}

impl ZoneReport {
    pub fn build(strategy: &OptionStrategy) -> Self {
        Self {
            name: strategy.name().to_string(),
            index_price: strategy.spot(),
            grid: strategy.grid().points().to_vec(),
            longs: strategy.longs().to_vec(),
            shorts: strategy.shorts().to_vec(),
            long_count: strategy.long_count(),
            short_count: strategy.short_count(),
        }
    }

    pub fn from_config(
        cfg: &AppConfig,
        name: &str,
        trades: &[Trade],
        filter: &TradeFilter,
        index_price: f64,
    ) -> RiskResult<Self> {
        let selected = filter.apply(trades);
        let grid = cfg.zone_grid()?;
        let strategy = OptionStrategy::zones_from_trades(name, index_price, grid, &selected);
        Ok(Self::build(&strategy))
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct OpenInterestReport {
    pub name: String,
    pub index_price: f64,
    pub rows: Vec<StrikeOpenInterest>,
}

impl OpenInterestReport {
    pub fn from_config(
        cfg: &AppConfig,
        name: &str,
        trades: &[Trade],
        filter: &TradeFilter,
        index_price: f64,
    ) -> Self {
        let selected = filter.apply(trades);
        let rows = open_interest_by_strike(&selected, cfg.from_price, cfg.to_price, cfg.oi_bucket);
        Self { name: name.to_string(), index_price, rows }
    }
}

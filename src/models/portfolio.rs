use crate::grid::PriceGrid;
use crate::models::black_scholes::{BlackScholesDelta, BlackScholesGamma};
use crate::models::{GreekModel, GreekSettings, LegInputs};
use crate::types::Trade;

/// Aggregate greek curve of a trade set over `spots`.
///
/// Each trade contributes `sign * |amount| * greek(S)`. Time to expiry is
/// `days_to_expiry / 365`, forced to zero under `mock_zero_dte` (the model's
/// own floor then applies). No trades yields an all-zero curve.
pub fn portfolio_greek(
    model: &dyn GreekModel,
    spots: &[f64],
    trades: &[Trade],
    settings: &GreekSettings,
) -> Vec<f64> {
    let mut total = vec![0.0; spots.len()];

    for trade in trades {
        let leg = LegInputs {
            strike: trade.strike,
            ttl_years: if settings.mock_zero_dte { 0.0 } else { trade.years_to_expiry() },
            rate: settings.rate,
            sigma: trade.sigma(),
            kind: trade.kind,
        };
        let weight = trade.signed_amount();

        for (acc, &s) in total.iter_mut().zip(spots) {
            *acc += weight * model.value(s, &leg);
        }
    }

    tracing::debug!(model = model.name(), trades = trades.len(), points = spots.len(), "portfolio greek computed");

    total
}

pub fn portfolio_delta(grid: &PriceGrid, trades: &[Trade], settings: &GreekSettings) -> Vec<f64> {
    let model = BlackScholesDelta::new(settings.regularization);
    portfolio_greek(&model, grid.points(), trades, settings)
}

pub fn portfolio_gamma(grid: &PriceGrid, trades: &[Trade], settings: &GreekSettings) -> Vec<f64> {
    let model = BlackScholesGamma::with_drift(settings.regularization, settings.gamma_d1_drift);
    portfolio_greek(&model, grid.points(), trades, settings)
}

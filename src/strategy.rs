use crate::grid::PriceGrid;
use crate::types::{OptionKind, Position, Side, Trade};

/// Payoff of one unit at `spot`.
#[inline]
fn unit_payoff(kind: OptionKind, side: Side, spot: f64, strike: f64, premium: f64) -> f64 {
    let intrinsic = match kind {
        OptionKind::Call => (spot - strike).max(0.0),
        OptionKind::Put => (strike - spot).max(0.0),
    };
    match side {
        Side::Long => intrinsic - premium,
        Side::Short => -intrinsic + premium,
    }
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Payoff,
    Longs,
    Shorts,
}

/// Payoff-at-expiry accumulator for a book of option legs.
///
/// Two independent accumulation targets share one grid:
///
/// - `payoff`, fed by `long_call` / `short_call` / `long_put` / `short_put`
/// - `longs` and `shorts`, fed by the `add_*_to_longs` / `add_*_to_shorts`
///   family and used for zone views
///
/// Nothing keeps the two in sync. A leg added through one family is
/// invisible to the other, so callers wanting `payoff == longs + shorts`
/// must add every leg through both.
///
/// Single-owner, write-then-read. Built once per request and discarded.
#[derive(Debug, Clone)]
pub struct OptionStrategy {
    name: String,
    spot: f64,
    grid: PriceGrid,
    payoff: Vec<f64>,
    longs: Vec<f64>,
    shorts: Vec<f64>,
    positions: Vec<Position>,
}

impl OptionStrategy {
    pub fn new(name: impl Into<String>, spot: f64, grid: PriceGrid) -> Self {
        let zeros = grid.zeros();
        Self {
            name: name.into(),
            spot,
            payoff: zeros.clone(),
            longs: zeros.clone(),
            shorts: zeros,
            grid,
            positions: Vec::new(),
        }
    }

    /// Payoff view of a trade set: every trade goes through the
    /// long/short call/put family at quantity 1.
    pub fn from_trades(name: impl Into<String>, spot: f64, grid: PriceGrid, trades: &[Trade]) -> Self {
        let mut strategy = Self::new(name, spot, grid);
        for trade in trades {
            strategy.add_trade(trade);
        }
        tracing::debug!(
            name = %strategy.name,
            trades = trades.len(),
            positions = strategy.positions.len(),
            "payoff strategy built"
        );
        strategy
    }

    /// Zone view of a trade set: longs and shorts accumulated separately.
    pub fn zones_from_trades(name: impl Into<String>, spot: f64, grid: PriceGrid, trades: &[Trade]) -> Self {
        let mut strategy = Self::new(name, spot, grid);
        for trade in trades {
            strategy.add_trade_to_zones(trade);
        }
        tracing::debug!(
            name = %strategy.name,
            longs = strategy.long_count(),
            shorts = strategy.short_count(),
            "zone strategy built"
        );
        strategy
    }

    pub fn add_trade(&mut self, trade: &Trade) {
        let premium = trade.premium();
        match (trade.kind, trade.side) {
            (OptionKind::Call, Side::Long) => self.long_call(trade.strike, premium, 1),
            (OptionKind::Call, Side::Short) => self.short_call(trade.strike, premium, 1),
            (OptionKind::Put, Side::Long) => self.long_put(trade.strike, premium, 1),
            (OptionKind::Put, Side::Short) => self.short_put(trade.strike, premium, 1),
        }
    }

    pub fn add_trade_to_zones(&mut self, trade: &Trade) {
        let premium = trade.premium();
        match (trade.kind, trade.side) {
            (OptionKind::Call, Side::Long) => self.add_call_to_longs(trade.strike, premium, 1),
            (OptionKind::Put, Side::Long) => self.add_put_to_longs(trade.strike, premium, 1),
            (OptionKind::Call, Side::Short) => self.add_call_to_shorts(trade.strike, premium, 1),
            (OptionKind::Put, Side::Short) => self.add_put_to_shorts(trade.strike, premium, 1),
        }
    }

    // ── payoff ──

    pub fn long_call(&mut self, strike: f64, premium: f64, quantity: u32) {
        self.accumulate(Target::Payoff, OptionKind::Call, Side::Long, strike, premium, quantity);
    }

    pub fn short_call(&mut self, strike: f64, premium: f64, quantity: u32) {
        self.accumulate(Target::Payoff, OptionKind::Call, Side::Short, strike, premium, quantity);
    }

    pub fn long_put(&mut self, strike: f64, premium: f64, quantity: u32) {
        self.accumulate(Target::Payoff, OptionKind::Put, Side::Long, strike, premium, quantity);
    }

    pub fn short_put(&mut self, strike: f64, premium: f64, quantity: u32) {
        self.accumulate(Target::Payoff, OptionKind::Put, Side::Short, strike, premium, quantity);
    }

    // ── zones ──

    pub fn add_call_to_longs(&mut self, strike: f64, premium: f64, quantity: u32) {
        self.accumulate(Target::Longs, OptionKind::Call, Side::Long, strike, premium, quantity);
    }

    pub fn add_put_to_longs(&mut self, strike: f64, premium: f64, quantity: u32) {
        self.accumulate(Target::Longs, OptionKind::Put, Side::Long, strike, premium, quantity);
    }

    pub fn add_call_to_shorts(&mut self, strike: f64, premium: f64, quantity: u32) {
        self.accumulate(Target::Shorts, OptionKind::Call, Side::Short, strike, premium, quantity);
    }

    pub fn add_put_to_shorts(&mut self, strike: f64, premium: f64, quantity: u32) {
        self.accumulate(Target::Shorts, OptionKind::Put, Side::Short, strike, premium, quantity);
    }

    fn accumulate(
        &mut self,
        target: Target,
        kind: OptionKind,
        side: Side,
        strike: f64,
        premium: f64,
        quantity: u32,
    ) {
        let curve = match target {
            Target::Payoff => &mut self.payoff,
            Target::Longs => &mut self.longs,
            Target::Shorts => &mut self.shorts,
        };
        let q = f64::from(quantity);
        for (acc, &s) in curve.iter_mut().zip(self.grid.points()) {
            *acc += q * unit_payoff(kind, side, s, strike, premium);
        }

        let position = Position { kind, strike, premium, side };
        self.positions
            .extend(std::iter::repeat(position).take(quantity as usize));
    }

    // ── accessors ──

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn grid(&self) -> &PriceGrid {
        &self.grid
    }

    pub fn payoff(&self) -> &[f64] {
        &self.payoff
    }

    pub fn longs(&self) -> &[f64] {
        &self.longs
    }

    pub fn shorts(&self) -> &[f64] {
        &self.shorts
    }

    /// One entry per unit, in insertion order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn long_count(&self) -> usize {
        self.positions.iter().filter(|p| p.side == Side::Long).count()
    }

    pub fn short_count(&self) -> usize {
        self.positions.iter().filter(|p| p.side == Side::Short).count()
    }
}

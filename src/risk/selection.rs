use crate::errors::{RiskError, RiskResult};
use crate::plot::ViewType;
use crate::types::{OptionKind, Side, Trade};
use chrono::{DateTime, Duration, Utc};

/// Which slice of the book a chart is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TradeSelection {
    All,
    Calls,
    Puts,
    Buys,
    Sells,
    Strike(f64),
}

impl TradeSelection {
    #[inline]
    pub fn matches(&self, trade: &Trade) -> bool {
        match *self {
            Self::All => true,
            Self::Calls => trade.kind == OptionKind::Call,
            Self::Puts => trade.kind == OptionKind::Put,
            Self::Buys => trade.side == Side::Long,
            Self::Sells => trade.side == Side::Short,
            Self::Strike(k) => trade.strike == k,
        }
    }

    /// Single-strike charts are read from the dealer's side.
    pub fn default_view(&self) -> ViewType {
        match self {
            Self::Strike(_) => ViewType::MarketMaker,
            _ => ViewType::Taker,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Self::All => "all".into(),
            Self::Calls => "calls".into(),
            Self::Puts => "puts".into(),
            Self::Buys => "buys".into(),
            Self::Sells => "sells".into(),
            Self::Strike(k) => format!("{k:.0}"),
        }
    }
}

/// Selection plus instrument and time-window filters.
#[derive(Debug, Clone)]
pub struct TradeFilter {
    pub selection: TradeSelection,
    /// Case-insensitive substring of the instrument name.
    pub instrument: Option<String>,
    /// Trades before this instant, or without a timestamp, are dropped.
    pub since: Option<DateTime<Utc>>,
}

impl TradeFilter {
    pub fn new(selection: TradeSelection) -> Self {
        Self { selection, instrument: None, since: None }
    }

    pub fn with_instrument(mut self, instrument: impl Into<String>) -> Self {
        let instrument: String = instrument.into();
        self.instrument = Some(instrument.to_ascii_lowercase());
        self
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn matches(&self, trade: &Trade) -> bool {
        if !self.selection.matches(trade) {
            return false;
        }

        if let Some(needle) = &self.instrument {
            let hit = trade
                .instrument
                .as_deref()
                .is_some_and(|name| name.to_ascii_lowercase().contains(needle.as_str()));
            if !hit {
                return false;
            }
        }

        match (self.since, trade.timestamp) {
            (Some(since), Some(ts)) => ts >= since,
            (Some(_), None) => false,
            (None, _) => true,
        }
    }

    pub fn apply(&self, trades: &[Trade]) -> Vec<Trade> {
        let selected: Vec<Trade> = trades.iter().filter(|t| self.matches(t)).cloned().collect();
        tracing::debug!(
            selection = %self.selection.title(),
            total = trades.len(),
            selected = selected.len(),
            "trades filtered"
        );
        selected
    }
}

/// UTC midnight `days_ago` days before `now`.
pub fn midnight_utc(now: DateTime<Utc>, days_ago: i64) -> DateTime<Utc> {
    let day = (now - Duration::days(days_ago)).date_naive();
    day.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or(now)
}

/// Today at `hour`:00 UTC. `None` for hours outside 0..24.
pub fn today_at_hour(now: DateTime<Utc>, hour: u32) -> Option<DateTime<Utc>> {
    now.date_naive().and_hms_opt(hour, 0, 0).map(|dt| dt.and_utc())
}

/// Candidate starts for a chart's trade window.
///
/// Precedence: `from_hour`, then `hours_ago`, then `last_hedging_time`,
/// then midnight `from_days_ago` days back. All unset means no window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TradeWindow {
    pub from_hour: Option<u32>,
    pub hours_ago: Option<i64>,
    pub last_hedging_time: Option<DateTime<Utc>>,
    pub from_days_ago: Option<i64>,
}

impl TradeWindow {
    pub fn start(&self, now: DateTime<Utc>) -> RiskResult<Option<DateTime<Utc>>> {
        if let Some(hour) = self.from_hour {
            return today_at_hour(now, hour)
                .map(Some)
                .ok_or_else(|| RiskError::Config(format!("from_hour out of range: {hour}")));
        }
        if let Some(hours) = self.hours_ago {
            return Ok(Some(now - Duration::hours(hours)));
        }
        if let Some(ts) = self.last_hedging_time {
            return Ok(Some(ts));
        }
        Ok(self.from_days_ago.map(|days| midnight_utc(now, days)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::trade;
    use chrono::TimeZone;

    fn book() -> Vec<Trade> {
        vec![
            trade(OptionKind::Call, Side::Long, 2500.0, 1.0),
            trade(OptionKind::Call, Side::Short, 2600.0, 2.0),
            trade(OptionKind::Put, Side::Long, 2400.0, 1.0),
            trade(OptionKind::Put, Side::Short, 2500.0, 3.0),
        ]
    }

    #[test]
    fn test_selection_families() {
        let b = book();
        let count = |sel| TradeFilter::new(sel).apply(&b).len();
        assert_eq!(count(TradeSelection::All), 4);
        assert_eq!(count(TradeSelection::Calls), 2);
        assert_eq!(count(TradeSelection::Puts), 2);
        assert_eq!(count(TradeSelection::Buys), 2);
        assert_eq!(count(TradeSelection::Sells), 2);
        assert_eq!(count(TradeSelection::Strike(2500.0)), 2);
        assert_eq!(count(TradeSelection::Strike(9999.0)), 0);
    }

    #[test]
    fn test_default_views() {
        assert_eq!(TradeSelection::Strike(2500.0).default_view(), ViewType::MarketMaker);
        assert_eq!(TradeSelection::Calls.default_view(), ViewType::Taker);
        assert_eq!(TradeSelection::Strike(2500.0).title(), "2500");
    }

    #[test]
    fn test_instrument_filter_case_insensitive() {
        let mut b = book();
        b[0].instrument = Some("BTC-27DEC24-90000-C".into());
        let eth = TradeFilter::new(TradeSelection::All).with_instrument("eth").apply(&b);
        assert_eq!(eth.len(), 3);
        b[1].instrument = None;
        let eth = TradeFilter::new(TradeSelection::All).with_instrument("ETH").apply(&b);
        assert_eq!(eth.len(), 2);
    }

    #[test]
    fn test_since_window() {
        let now = Utc.with_ymd_and_hms(2024, 12, 20, 15, 30, 0).unwrap();
        let mut b = book();
        b[0].timestamp = Some(now - Duration::hours(1));
        b[1].timestamp = Some(now - Duration::days(3));
        b[2].timestamp = Some(now);
        let f = TradeFilter::new(TradeSelection::All).since(midnight_utc(now, 0));
        let kept = f.apply(&b);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|t| t.timestamp.is_some()));
    }

    #[test]
    fn test_window_helpers() {
        let now = Utc.with_ymd_and_hms(2024, 12, 20, 15, 30, 0).unwrap();
        assert_eq!(midnight_utc(now, 1), Utc.with_ymd_and_hms(2024, 12, 19, 0, 0, 0).unwrap());
        assert_eq!(today_at_hour(now, 8), Some(Utc.with_ymd_and_hms(2024, 12, 20, 8, 0, 0).unwrap()));
        assert_eq!(today_at_hour(now, 25), None);
    }

    #[test]
    fn test_window_precedence() {
        let now = Utc.with_ymd_and_hms(2024, 12, 20, 15, 30, 0).unwrap();
        let hedge = Utc.with_ymd_and_hms(2024, 12, 18, 9, 0, 0).unwrap();
        let full = TradeWindow {
            from_hour: Some(8),
            hours_ago: Some(2),
            last_hedging_time: Some(hedge),
            from_days_ago: Some(3),
        };

        let at_8 = Utc.with_ymd_and_hms(2024, 12, 20, 8, 0, 0).unwrap();
        assert_eq!(full.start(now).unwrap(), Some(at_8));

        let w = TradeWindow { from_hour: None, ..full };
        assert_eq!(w.start(now).unwrap(), Some(now - Duration::hours(2)));

        let w = TradeWindow { hours_ago: None, ..w };
        assert_eq!(w.start(now).unwrap(), Some(hedge));

        let w = TradeWindow { last_hedging_time: None, ..w };
        assert_eq!(w.start(now).unwrap(), Some(Utc.with_ymd_and_hms(2024, 12, 17, 0, 0, 0).unwrap()));

        assert_eq!(TradeWindow::default().start(now).unwrap(), None);
    }

    #[test]
    fn test_window_bad_hour_is_config_error() {
        let now = Utc.with_ymd_and_hms(2024, 12, 20, 15, 30, 0).unwrap();
        let w = TradeWindow { from_hour: Some(24), ..TradeWindow::default() };
        assert!(matches!(w.start(now), Err(RiskError::Config(_))));
    }
}

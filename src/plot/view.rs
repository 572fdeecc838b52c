use crate::errors::RiskError;
use crate::plot::ScaledCurves;
use smallvec::SmallVec;

/// Chart perspective. Market-maker views flip greek signs; breakeven views
/// add the scaled payoff curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    MarketMaker,
    Taker,
    BreakevenMarketMaker,
    BreakevenTaker,
}

/// Legacy route spellings, resolved once at the boundary.
const VIEW_ALIASES: &[(&str, ViewType)] = &[
    ("mm", ViewType::MarketMaker),
    ("mmv", ViewType::MarketMaker),
    ("taker", ViewType::Taker),
    ("tv", ViewType::Taker),
    ("be_mm", ViewType::BreakevenMarketMaker),
    ("be-mm", ViewType::BreakevenMarketMaker),
    ("bem", ViewType::BreakevenMarketMaker),
    ("be_taker", ViewType::BreakevenTaker),
    ("be-taker", ViewType::BreakevenTaker),
    ("bet", ViewType::BreakevenTaker),
];

impl std::str::FromStr for ViewType {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        VIEW_ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, v)| *v)
            .ok_or_else(|| RiskError::UnknownView(s.to_string()))
    }
}

impl std::fmt::Display for ViewType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MarketMaker => write!(f, "mm"),
            Self::Taker => write!(f, "taker"),
            Self::BreakevenMarketMaker => write!(f, "be_mm"),
            Self::BreakevenTaker => write!(f, "be_taker"),
        }
    }
}

impl ViewType {
    #[inline]
    pub fn greek_sign(self) -> f64 {
        match self {
            Self::MarketMaker | Self::BreakevenMarketMaker => -1.0,
            Self::Taker | Self::BreakevenTaker => 1.0,
        }
    }

    #[inline]
    pub fn includes_payoff(self) -> bool {
        matches!(self, Self::BreakevenMarketMaker | Self::BreakevenTaker)
    }

    /// Legend label for the payoff line. The market-maker breakeven view
    /// still shows the takers' P&L, unsigned.
    pub fn payoff_label(self) -> Option<&'static str> {
        match self {
            Self::BreakevenTaker => Some("P&L"),
            Self::BreakevenMarketMaker => Some("Taker P&L"),
            Self::MarketMaker | Self::Taker => None,
        }
    }

    /// Curves to hand to the renderer, in drawing order.
    pub fn series(self, curves: &ScaledCurves) -> SmallVec<[PlotSeries; 3]> {
        let sign = self.greek_sign();
        let mut out = SmallVec::new();

        if let Some(label) = self.payoff_label() {
            out.push(PlotSeries { label, values: curves.payoff.clone() });
        }
        out.push(PlotSeries {
            label: "Delta",
            values: curves.delta.iter().map(|v| sign * v).collect(),
        });
        out.push(PlotSeries {
            label: "Gamma",
            values: curves.gamma.iter().map(|v| sign * v).collect(),
        });

        out
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PlotSeries {
    pub label: &'static str,
    pub values: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curves() -> ScaledCurves {
        ScaledCurves::compute(&[-5.0, 95.0], &[0.5, -1.0], &[0.01, 0.02], None)
    }

    #[test]
    fn test_aliases_resolve() {
        assert_eq!("mmv".parse::<ViewType>().unwrap(), ViewType::MarketMaker);
        assert_eq!("MM".parse::<ViewType>().unwrap(), ViewType::MarketMaker);
        assert_eq!("tv".parse::<ViewType>().unwrap(), ViewType::Taker);
        assert_eq!("be-mm".parse::<ViewType>().unwrap(), ViewType::BreakevenMarketMaker);
        assert_eq!("bem".parse::<ViewType>().unwrap(), ViewType::BreakevenMarketMaker);
        assert_eq!("bet".parse::<ViewType>().unwrap(), ViewType::BreakevenTaker);
        assert_eq!(" be_taker ".parse::<ViewType>().unwrap(), ViewType::BreakevenTaker);
    }

    #[test]
    fn test_unknown_view_rejected() {
        assert!(matches!("zones".parse::<ViewType>(), Err(RiskError::UnknownView(_))));
    }

    #[test]
    fn test_display_round_trips_through_alias_table() {
        for v in [
            ViewType::MarketMaker,
            ViewType::Taker,
            ViewType::BreakevenMarketMaker,
            ViewType::BreakevenTaker,
        ] {
            assert_eq!(v.to_string().parse::<ViewType>().unwrap(), v);
        }
    }

    #[test]
    fn test_market_maker_negates_greeks_only() {
        let c = curves();
        let mm = ViewType::MarketMaker.series(&c);
        assert_eq!(mm.len(), 2);
        assert_eq!(mm[0].label, "Delta");
        assert_eq!(mm[0].values, vec![-0.5, 1.0]);
        assert_eq!(mm[1].values, c.gamma.iter().map(|g| -g).collect::<Vec<_>>());
    }

    #[test]
    fn test_taker_passes_through() {
        let c = curves();
        let t = ViewType::Taker.series(&c);
        assert_eq!(t.len(), 2);
        assert_eq!(t[0].values, c.delta);
        assert_eq!(t[1].values, c.gamma);
    }

    #[test]
    fn test_breakeven_views_include_unsigned_payoff() {
        let c = curves();
        let bet = ViewType::BreakevenTaker.series(&c);
        let bem = ViewType::BreakevenMarketMaker.series(&c);
        assert_eq!(bet.len(), 3);
        assert_eq!(bet[0].label, "P&L");
        assert_eq!(bem[0].label, "Taker P&L");
        assert_eq!(bet[0].values, c.payoff);
        assert_eq!(bem[0].values, c.payoff);
        assert_eq!(bem[1].values, vec![-0.5, 1.0]);
        assert_eq!(bet[1].values, c.delta);
    }
}

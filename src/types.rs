use crate::errors::{RiskError, RiskResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Option legs ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Some(Self::Call),
            "put" | "p" => Some(Self::Put),
            _ => None,
        }
    }

    #[inline]
    pub fn is_call(self) -> bool {
        matches!(self, Self::Call)
    }
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Long,
    Short,
}

impl Side {
    /// Resolves a trade direction label. Unrecognized labels yield `None`
    /// so the caller can fall back to the amount sign.
    pub fn from_direction(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "buy" | "long" | "+" | "1" => Some(Self::Long),
            "sell" | "short" | "-" | "-1" => Some(Self::Short),
            _ => None,
        }
    }

    #[inline]
    pub fn from_amount(amount: f64) -> Self {
        if amount >= 0.0 {
            Self::Long
        } else {
            Self::Short
        }
    }

    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Self::Long => 1.0,
            Self::Short => -1.0,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Long => write!(f, "long"),
            Self::Short => write!(f, "short"),
        }
    }
}

/// One unit of an option leg held by the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub kind: OptionKind,
    pub strike: f64,
    pub premium: f64,
    pub side: Side,
}

// ── Trades ──

/// Trade as delivered by the persistence collaborator, before resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(default)]
    pub instrument: Option<String>,
    pub strike: f64,
    pub option_type: String,
    #[serde(default)]
    pub direction: Option<String>,
    pub amount: f64,
    pub iv: f64,
    pub days_to_expiry: i64,
    pub index_price: f64,
    pub price: f64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Trade with its kind and side resolved once at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trade {
    pub instrument: Option<String>,
    pub strike: f64,
    pub kind: OptionKind,
    pub side: Side,
    /// Unsigned contract count.
    pub amount: f64,
    /// Implied volatility in percent.
    pub iv: f64,
    pub days_to_expiry: i64,
    pub index_price: f64,
    /// Option price quoted in units of the underlying.
    pub price: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Trade {
    /// Premium in currency: quoted price times the index at fill.
    #[inline]
    pub fn premium(&self) -> f64 {
        self.price * self.index_price
    }

    #[inline]
    pub fn signed_amount(&self) -> f64 {
        self.side.sign() * self.amount
    }

    #[inline]
    pub fn sigma(&self) -> f64 {
        self.iv / 100.0
    }

    #[inline]
    pub fn years_to_expiry(&self) -> f64 {
        self.days_to_expiry as f64 / 365.0
    }
}

impl TryFrom<TradeRecord> for Trade {
    type Error = RiskError;

    fn try_from(rec: TradeRecord) -> RiskResult<Self> {
        let kind = OptionKind::parse(&rec.option_type).ok_or_else(|| {
            RiskError::InvalidTrade(format!("unknown option type: {}", rec.option_type))
        })?;

        let side = rec
            .direction
            .as_deref()
            .and_then(Side::from_direction)
            .unwrap_or_else(|| Side::from_amount(rec.amount));

        Ok(Self {
            instrument: rec.instrument,
            strike: rec.strike,
            kind,
            side,
            amount: rec.amount.abs(),
            iv: rec.iv,
            days_to_expiry: rec.days_to_expiry,
            index_price: rec.index_price,
            price: rec.price,
            timestamp: rec.timestamp,
        })
    }
}

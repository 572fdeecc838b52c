use crate::errors::{RiskError, RiskResult};
use crate::types::{Trade, TradeRecord};
use std::path::Path;

/// Loads a JSON array of trade records from disk.
pub fn load_trades(path: &Path) -> RiskResult<Vec<Trade>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| RiskError::Io(format!("read {}: {e}", path.display())))?;
    let trades = parse_trades(&raw)?;
    tracing::info!(path = %path.display(), trades = trades.len(), "trade snapshot loaded");
    Ok(trades)
}

/// Parses a JSON array of trade records. Only a malformed array is fatal;
/// records that fail to decode or resolve are skipped and logged.
pub fn parse_trades(raw: &str) -> RiskResult<Vec<Trade>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let total = values.len();

    let trades: Vec<Trade> = values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match resolve_record(value) {
            Ok(t) => Some(t),
            Err(e) => {
                tracing::warn!(index = i, error = %e, "skipping trade record");
                None
            }
        })
        .collect();

    if trades.len() < total {
        tracing::warn!(skipped = total - trades.len(), total, "some trade records were skipped");
    }

    Ok(trades)
}

fn resolve_record(value: serde_json::Value) -> RiskResult<Trade> {
    let rec: TradeRecord = serde_json::from_value(value)?;
    Trade::try_from(rec)
}

/// Index price of the most recent trade, falling back to the last record
/// when no trade carries a timestamp. `None` for an empty book.
pub fn latest_index_price(trades: &[Trade]) -> Option<f64> {
    trades
        .iter()
        .filter(|t| t.timestamp.is_some())
        .max_by_key(|t| t.timestamp)
        .or_else(|| trades.last())
        .map(|t| t.index_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OptionKind, Side};
    use std::io::Write;

    const BOOK: &str = r#"[
        {"instrument":"ETH-27DEC24-2500-C","strike":2500,"option_type":"call","direction":"buy",
         "amount":2,"iv":62.5,"days_to_expiry":7,"index_price":2480,"price":0.021,
         "timestamp":"2024-12-20T08:00:00Z"},
        {"instrument":"ETH-27DEC24-2300-P","strike":2300,"option_type":"put","direction":"sell",
         "amount":1,"iv":70,"days_to_expiry":7,"index_price":2510,"price":0.008,
         "timestamp":"2024-12-20T09:00:00Z"},
        {"strike":2400,"option_type":"future","amount":1,"iv":0,"days_to_expiry":0,
         "index_price":2500,"price":0}
    ]"#;

    #[test]
    fn test_parse_skips_unresolvable() {
        let trades = parse_trades(BOOK).unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].kind, OptionKind::Call);
        assert_eq!(trades[1].side, Side::Short);
    }

    #[test]
    fn test_undecodable_record_skipped_not_fatal() {
        let raw = r#"[
            {"strike":2500,"option_type":"call","direction":"buy","amount":1,"iv":60,
             "days_to_expiry":7,"index_price":2500,"price":0.01},
            {"strike":2500,"option_type":"call","direction":"buy","amount":1,
             "days_to_expiry":7,"index_price":2500,"price":0.01},
            {"strike":"high","option_type":"put","amount":1,"iv":60,
             "days_to_expiry":7,"index_price":2500,"price":0.01}
        ]"#;
        let trades = parse_trades(raw).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].iv, 60.0);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(parse_trades("{not json"), Err(RiskError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BOOK.as_bytes()).unwrap();
        let trades = load_trades(file.path()).unwrap();
        assert_eq!(trades.len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_trades(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, RiskError::Io(_)));
    }

    #[test]
    fn test_latest_index_price() {
        let trades = parse_trades(BOOK).unwrap();
        assert_eq!(latest_index_price(&trades), Some(2510.0));
        assert_eq!(latest_index_price(&[]), None);
    }
}

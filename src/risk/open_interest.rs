use crate::types::{OptionKind, Trade};

/// Net contracts bought minus sold, per option kind. Pure function.
pub fn open_interest(trades: &[Trade]) -> (f64, f64) {
    trades.iter().fold((0.0, 0.0), |(calls, puts), t| match t.kind {
        OptionKind::Call => (calls + t.signed_amount(), puts),
        OptionKind::Put => (calls, puts + t.signed_amount()),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct StrikeOpenInterest {
    pub strike: f64,
    pub call_oi: f64,
    pub put_oi: f64,
}

/// Open interest at every bucket strike `from, from + bucket, ...` below `to`.
/// Only trades struck exactly on a bucket strike are counted.
pub fn open_interest_by_strike(trades: &[Trade], from: f64, to: f64, bucket: f64) -> Vec<StrikeOpenInterest> {
    if bucket <= 0.0 || from >= to {
        return Vec::new();
    }

    let n = ((to - from) / bucket).ceil() as usize;
    (0..n)
        .map(|i| {
            let strike = from + i as f64 * bucket;
            let at_strike: Vec<Trade> = trades.iter().filter(|t| t.strike == strike).cloned().collect();
            let (call_oi, put_oi) = open_interest(&at_strike);
            StrikeOpenInterest { strike, call_oi, put_oi }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::trade;
    use crate::types::Side;

    #[test]
    fn test_buys_add_sells_subtract() {
        let trades = vec![
            trade(OptionKind::Call, Side::Long, 2500.0, 5.0),
            trade(OptionKind::Call, Side::Short, 2500.0, 2.0),
            trade(OptionKind::Put, Side::Short, 2500.0, 1.5),
        ];
        assert_eq!(open_interest(&trades), (3.0, -1.5));
        assert_eq!(open_interest(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_bucketed_rows() {
        let trades = vec![
            trade(OptionKind::Call, Side::Long, 2500.0, 5.0),
            trade(OptionKind::Put, Side::Long, 2525.0, 1.0),
            // Off-bucket strike is not counted anywhere
            trade(OptionKind::Put, Side::Long, 2510.0, 9.0),
        ];
        let rows = open_interest_by_strike(&trades, 2500.0, 2550.0, 25.0);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], StrikeOpenInterest { strike: 2500.0, call_oi: 5.0, put_oi: 0.0 });
        assert_eq!(rows[1], StrikeOpenInterest { strike: 2525.0, call_oi: 0.0, put_oi: 1.0 });
    }

    #[test]
    fn test_invalid_bucket_is_empty() {
        assert!(open_interest_by_strike(&[], 2500.0, 2550.0, 0.0).is_empty());
        assert!(open_interest_by_strike(&[], 2600.0, 2550.0, 25.0).is_empty());
    }
}

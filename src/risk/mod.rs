pub mod open_interest;
pub mod selection;

pub use open_interest::{open_interest, open_interest_by_strike, StrikeOpenInterest};
pub use selection::{TradeFilter, TradeSelection, TradeWindow};

pub mod config;
pub mod errors;
pub mod feeds;
pub mod grid;
pub mod models;
pub mod plot;
pub mod report;
pub mod risk;
pub mod snapshot;
pub mod strategy;
pub mod types;

pub use errors::{RiskError, RiskResult};
pub use grid::PriceGrid;
pub use strategy::OptionStrategy;

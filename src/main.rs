use clap::Parser;
use greekbook::config::AppConfig;
use greekbook::errors::{RiskError, RiskResult};
use greekbook::feeds::IndexPriceCache;
use greekbook::plot::ViewType;
use greekbook::report::{OpenInterestReport, RiskReport, ZoneReport};
use greekbook::risk::{TradeFilter, TradeSelection, TradeWindow};
use greekbook::snapshot;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "greekbook")]
#[command(about = "Payoff, delta and gamma curves for an options book")]
struct Args {
    /// JSON array of trade records
    #[arg(long)]
    trades: PathBuf,

    /// Instrument name filter (case-insensitive substring)
    #[arg(long)]
    instrument: Option<String>,

    /// Current index price; defaults to the latest trade's index price
    #[arg(long)]
    index_price: Option<f64>,

    /// View type: mm/mmv, taker/tv, be_mm/bem, be_taker/bet
    #[arg(long)]
    view: Option<String>,

    /// Trade slice: all, calls, puts, buys, sells
    #[arg(long, default_value = "all")]
    selection: String,

    /// Single-strike view (overrides --selection)
    #[arg(long)]
    strike: Option<f64>,

    /// Only trades since UTC midnight this many days ago
    /// (overrides GREEKBOOK_FROM_DAYS_AGO)
    #[arg(long)]
    days_ago: Option<i64>,

    /// Only trades since this hour (UTC) today
    #[arg(long, conflicts_with = "hours_ago")]
    from_hour: Option<u32>,

    /// Only trades from the last N hours
    #[arg(long)]
    hours_ago: Option<i64>,

    /// Emit longs/shorts zone curves instead of the risk report
    #[arg(long, conflicts_with = "oi")]
    zones: bool,

    /// Emit per-strike open interest instead of the risk report
    #[arg(long)]
    oi: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> RiskResult<()> {
    let cfg = AppConfig::from_env()?;
    let trades = snapshot::load_trades(&args.trades)?;

    let mut index_cache = IndexPriceCache::new(cfg.index_cache_ttl());
    let index_price = index_cache.get_or_refresh(Instant::now(), || {
        args.index_price
            .or_else(|| snapshot::latest_index_price(&trades))
            .ok_or_else(|| RiskError::Snapshot("no index price available".into()))
    })?;

    let selection = match args.strike {
        Some(k) => TradeSelection::Strike(k),
        None => parse_selection(&args.selection)?,
    };
    let filter = build_filter(&args, &cfg, selection)?;
    let name = args.instrument.as_deref().unwrap_or("book");

    let json = if args.zones {
        let report = ZoneReport::from_config(&cfg, name, &trades, &filter, index_price)?;
        serde_json::to_string_pretty(&report)?
    } else if args.oi {
        let report = OpenInterestReport::from_config(&cfg, name, &trades, &filter, index_price);
        serde_json::to_string_pretty(&report)?
    } else {
        let view = match args.view.as_deref() {
            Some(raw) => raw.parse::<ViewType>()?,
            None => selection.default_view(),
        };
        let report = RiskReport::from_config(&cfg, name, &trades, &filter, view, index_price)?;
        serde_json::to_string_pretty(&report)?
    };

    println!("{json}");
    Ok(())
}

fn parse_selection(raw: &str) -> RiskResult<TradeSelection> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "all" | "a" => Ok(TradeSelection::All),
        "calls" | "c" => Ok(TradeSelection::Calls),
        "puts" | "p" => Ok(TradeSelection::Puts),
        "buys" | "b" => Ok(TradeSelection::Buys),
        "sells" | "s" => Ok(TradeSelection::Sells),
        other => Err(RiskError::Config(format!("unknown selection: {other}"))),
    }
}

fn build_filter(args: &Args, cfg: &AppConfig, selection: TradeSelection) -> RiskResult<TradeFilter> {
    let mut filter = TradeFilter::new(selection);
    if let Some(instrument) = &args.instrument {
        filter = filter.with_instrument(instrument.as_str());
    }

    let window = TradeWindow {
        from_hour: args.from_hour,
        hours_ago: args.hours_ago,
        last_hedging_time: cfg.last_hedging_time,
        from_days_ago: args.days_ago.or(cfg.from_days_ago),
    };
    if let Some(since) = window.start(chrono::Utc::now())? {
        tracing::debug!(%since, "trade window applied");
        filter = filter.since(since);
    }

    Ok(filter)
}

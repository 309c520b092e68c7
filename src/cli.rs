//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::clock_adapter::SystemClock;
use crate::adapters::csv_ledger_adapter::CsvLedgerAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::StockbookError;
use crate::domain::portfolio::{Portfolio, ShareIndex, WeightedPrice};
use crate::domain::stock::Stock;
use crate::domain::trade::Trade;
use crate::ports::config_port::ConfigPort;
use crate::ports::ledger_port::LedgerPort;

const DEFAULT_WINDOW_MINUTES: f64 = 15.0;
const DEFAULT_OWNER: &str = "trader";

#[derive(Parser, Debug)]
#[command(name = "stockbook", about = "Equity trading record keeper")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the stock definitions in the ledger
    Stocks {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Dividend yield for a stock at a given price
    DividendYield {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        price: f64,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Price/earnings ratio for a stock at a given price
    PeRatio {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        price: f64,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Load the trade ledger and print portfolio analytics
    Report {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        /// Trailing window in minutes for weighted prices and the index
        #[arg(short, long)]
        window: Option<f64>,
        /// Portfolio owner name
        #[arg(short, long)]
        owner: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Stocks { config, data_dir } => run_stocks(config.as_ref(), data_dir.as_ref()),
        Command::DividendYield {
            symbol,
            price,
            config,
            data_dir,
        } => run_dividend_yield(&symbol, price, config.as_ref(), data_dir.as_ref()),
        Command::PeRatio {
            symbol,
            price,
            config,
            data_dir,
        } => run_pe_ratio(&symbol, price, config.as_ref(), data_dir.as_ref()),
        Command::Report {
            config,
            data_dir,
            window,
            owner,
        } => run_report(config.as_ref(), data_dir.as_ref(), window, owner.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(&err)
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, StockbookError> {
    FileConfigAdapter::from_file(path).map_err(|e| StockbookError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Resolve the ledger directory: the flag wins, then `[market] data_dir`
/// from config, then the current directory.
pub fn resolve_data_dir(
    flag: Option<&PathBuf>,
    config: Option<&FileConfigAdapter>,
) -> PathBuf {
    if let Some(dir) = flag {
        return dir.clone();
    }
    if let Some(adapter) = config {
        if let Some(dir) = adapter.get_string("market", "data_dir") {
            return PathBuf::from(dir);
        }
    }
    PathBuf::from(".")
}

/// Report parameters after merging flags over config over defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub owner: String,
    pub window_minutes: f64,
}

pub fn build_report_settings(
    config: Option<&FileConfigAdapter>,
    window_flag: Option<f64>,
    owner_flag: Option<&str>,
) -> ReportSettings {
    let config_owner = config.and_then(|c| c.get_string("report", "owner"));
    let config_window =
        config.map(|c| c.get_float("report", "window_minutes", DEFAULT_WINDOW_MINUTES));
    ReportSettings {
        owner: owner_flag
            .map(str::to_string)
            .or(config_owner)
            .unwrap_or_else(|| DEFAULT_OWNER.to_string()),
        window_minutes: window_flag
            .or(config_window)
            .unwrap_or(DEFAULT_WINDOW_MINUTES),
    }
}

/// Case-insensitive lookup in a loaded stock list.
pub fn find_stock<'a>(stocks: &'a [Stock], symbol: &str) -> Option<&'a Stock> {
    let symbol = symbol.to_uppercase();
    stocks.iter().find(|s| s.symbol() == symbol)
}

pub fn build_portfolio(owner: &str, trades: Vec<Trade>) -> Portfolio {
    let mut portfolio = Portfolio::new(owner);
    for trade in trades {
        portfolio.add_trade(trade);
    }
    portfolio
}

pub fn render_weighted_price(outcome: &WeightedPrice) -> String {
    match outcome {
        WeightedPrice::Value(v) => format!("{v:.4}"),
        WeightedPrice::NotFound => "not in portfolio".to_string(),
        WeightedPrice::NoTradesInRange => "no trades in window".to_string(),
    }
}

pub fn render_share_index(outcome: &ShareIndex) -> String {
    match outcome {
        ShareIndex::Value(v) => format!("{v:.4}"),
        ShareIndex::EmptyPortfolio => "empty portfolio".to_string(),
        ShareIndex::NoTradesInRange => "no trades in window".to_string(),
    }
}

fn load_ledger(
    config_path: Option<&PathBuf>,
    data_dir_flag: Option<&PathBuf>,
) -> Result<CsvLedgerAdapter, StockbookError> {
    let config = match config_path {
        Some(path) => Some(load_config(path)?),
        None => None,
    };
    let data_dir = resolve_data_dir(data_dir_flag, config.as_ref());
    eprintln!("Reading ledger from {}", data_dir.display());
    Ok(CsvLedgerAdapter::new(data_dir))
}

fn load_stock(
    config_path: Option<&PathBuf>,
    data_dir_flag: Option<&PathBuf>,
    symbol: &str,
) -> Result<Stock, StockbookError> {
    let ledger = load_ledger(config_path, data_dir_flag)?;
    let stocks = ledger.load_stocks()?;
    find_stock(&stocks, symbol)
        .cloned()
        .ok_or_else(|| StockbookError::Ledger {
            reason: format!("stock {} not found in ledger", symbol.to_uppercase()),
        })
}

fn run_stocks(
    config_path: Option<&PathBuf>,
    data_dir_flag: Option<&PathBuf>,
) -> Result<(), StockbookError> {
    let ledger = load_ledger(config_path, data_dir_flag)?;
    let stocks = ledger.load_stocks()?;
    for stock in &stocks {
        println!("{stock}");
    }
    eprintln!("{} stock(s)", stocks.len());
    Ok(())
}

fn run_dividend_yield(
    symbol: &str,
    price: f64,
    config_path: Option<&PathBuf>,
    data_dir_flag: Option<&PathBuf>,
) -> Result<(), StockbookError> {
    let stock = load_stock(config_path, data_dir_flag, symbol)?;
    let yield_value = stock.dividend_yield(price)?;
    println!("{yield_value}");
    Ok(())
}

fn run_pe_ratio(
    symbol: &str,
    price: f64,
    config_path: Option<&PathBuf>,
    data_dir_flag: Option<&PathBuf>,
) -> Result<(), StockbookError> {
    let stock = load_stock(config_path, data_dir_flag, symbol)?;
    let ratio = stock.pe_ratio(price)?;
    println!("{ratio}");
    Ok(())
}

fn run_report(
    config_path: Option<&PathBuf>,
    data_dir_flag: Option<&PathBuf>,
    window_flag: Option<f64>,
    owner_flag: Option<&str>,
) -> Result<(), StockbookError> {
    let config = match config_path {
        Some(path) => Some(load_config(path)?),
        None => None,
    };
    let settings = build_report_settings(config.as_ref(), window_flag, owner_flag);
    let data_dir = resolve_data_dir(data_dir_flag, config.as_ref());

    eprintln!("Reading ledger from {}", data_dir.display());
    let ledger = CsvLedgerAdapter::new(data_dir);
    let trades = ledger.load_trades()?;
    let portfolio = build_portfolio(&settings.owner, trades);
    let clock = SystemClock;

    println!("{}'s portfolio", portfolio.owner());
    println!(
        "  trades: {}, stocks: {}",
        portfolio.trade_count(),
        portfolio.distinct_stock_count()
    );

    for symbol in portfolio.distinct_stock_symbols() {
        let weighted =
            portfolio.volume_weighted_price(&symbol, settings.window_minutes, &clock);
        println!(
            "  {} volume-weighted price ({}m): {}",
            symbol,
            settings.window_minutes,
            render_weighted_price(&weighted)
        );
    }

    let index = portfolio.all_share_index(settings.window_minutes, &clock);
    println!(
        "  all-share index ({}m): {}",
        settings.window_minutes,
        render_share_index(&index)
    );

    match portfolio.earliest_trade() {
        Ok(trade) => println!("  earliest trade: {trade}"),
        Err(StockbookError::EmptyPortfolio { .. }) => println!("  earliest trade: none"),
        Err(err) => return Err(err),
    }

    Ok(())
}

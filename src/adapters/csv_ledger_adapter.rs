//! CSV file ledger adapter.
//!
//! Reads `stocks.csv` (`symbol,kind,last_dividend,fixed_dividend,par_value`,
//! with `fixed_dividend` given as a percentage and left blank for common
//! stock) and `trades.csv` (`symbol,price,quantity,direction,timestamp`,
//! RFC 3339 timestamps) from a base directory.

use chrono::{DateTime, Utc};
use csv::StringRecord;
use std::fs;
use std::path::PathBuf;

use crate::domain::error::StockbookError;
use crate::domain::stock::{Stock, StockKind};
use crate::domain::trade::{Direction, Trade};
use crate::ports::ledger_port::LedgerPort;

pub const STOCKS_FILE: &str = "stocks.csv";
pub const TRADES_FILE: &str = "trades.csv";

pub struct CsvLedgerAdapter {
    base_path: PathBuf,
}

impl CsvLedgerAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn read(&self, file: &str) -> Result<String, StockbookError> {
        let path = self.base_path.join(file);
        fs::read_to_string(&path).map_err(|e| StockbookError::Ledger {
            reason: format!("failed to read {}: {}", path.display(), e),
        })
    }
}

fn column<'a>(record: &'a StringRecord, index: usize, name: &str) -> Result<&'a str, StockbookError> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| StockbookError::Ledger {
            reason: format!("missing {name} column"),
        })
}

fn parse_float(value: &str, name: &str) -> Result<f64, StockbookError> {
    value.parse().map_err(|e| StockbookError::Ledger {
        reason: format!("invalid {name} value {value:?}: {e}"),
    })
}

impl LedgerPort for CsvLedgerAdapter {
    fn load_stocks(&self) -> Result<Vec<Stock>, StockbookError> {
        let content = self.read(STOCKS_FILE)?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut stocks = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| StockbookError::Ledger {
                reason: format!("CSV parse error in {STOCKS_FILE}: {e}"),
            })?;

            let symbol = column(&record, 0, "symbol")?;
            let kind = StockKind::parse(column(&record, 1, "kind")?)?;
            let last_dividend = parse_float(column(&record, 2, "last_dividend")?, "last_dividend")?;
            let fixed_field = column(&record, 3, "fixed_dividend")?;
            let fixed_dividend_pct = if fixed_field.is_empty() {
                None
            } else {
                Some(parse_float(fixed_field, "fixed_dividend")?)
            };
            let par_value = parse_float(column(&record, 4, "par_value")?, "par_value")?;

            stocks.push(Stock::new(
                symbol,
                kind,
                last_dividend,
                par_value,
                fixed_dividend_pct,
            )?);
        }

        Ok(stocks)
    }

    fn load_trades(&self) -> Result<Vec<Trade>, StockbookError> {
        let content = self.read(TRADES_FILE)?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut trades = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| StockbookError::Ledger {
                reason: format!("CSV parse error in {TRADES_FILE}: {e}"),
            })?;

            let symbol = column(&record, 0, "symbol")?;
            let price = parse_float(column(&record, 1, "price")?, "price")?;
            let quantity = parse_float(column(&record, 2, "quantity")?, "quantity")?;
            let direction = Direction::parse(column(&record, 3, "direction")?)?;
            let timestamp_str = column(&record, 4, "timestamp")?;
            let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
                .map_err(|e| StockbookError::Ledger {
                    reason: format!("invalid timestamp {timestamp_str:?}: {e}"),
                })?
                .with_timezone(&Utc);

            trades.push(Trade::new(symbol, price, quantity, direction, timestamp)?);
        }

        Ok(trades)
    }
}

//! Stock definitions and valuation.

use std::fmt;

use super::error::StockbookError;
use super::trade::{Direction, Trade};
use crate::ports::clock_port::ClockPort;

/// Equity class. Common stock yields from its last dividend; preferred
/// stock carries a fixed dividend rate applied to par value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockKind {
    Common,
    Preferred,
}

impl StockKind {
    pub fn parse(input: &str) -> Result<Self, StockbookError> {
        match input.to_lowercase().as_str() {
            "common" => Ok(StockKind::Common),
            "preferred" => Ok(StockKind::Preferred),
            _ => Err(StockbookError::InvalidStockKind {
                input: input.to_string(),
            }),
        }
    }
}

impl fmt::Display for StockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockKind::Common => write!(f, "common"),
            StockKind::Preferred => write!(f, "preferred"),
        }
    }
}

/// A listed security. Immutable after construction; `fixed_dividend` is
/// present exactly when the kind is preferred.
#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    symbol: String,
    kind: StockKind,
    last_dividend: f64,
    par_value: f64,
    fixed_dividend: Option<f64>,
}

impl Stock {
    /// Build a validated stock. The symbol is uppercased, and
    /// `fixed_dividend_pct` is given as a percentage (2 meaning 2%) and
    /// stored as a fraction.
    pub fn new(
        symbol: &str,
        kind: StockKind,
        last_dividend: f64,
        par_value: f64,
        fixed_dividend_pct: Option<f64>,
    ) -> Result<Self, StockbookError> {
        let symbol = symbol.to_uppercase();
        if !(last_dividend >= 0.0) || !last_dividend.is_finite() {
            return Err(StockbookError::InvalidLastDividend {
                symbol,
                last_dividend,
            });
        }
        if !(par_value > 0.0) || !par_value.is_finite() {
            return Err(StockbookError::InvalidParValue { symbol, par_value });
        }
        let fixed_dividend = match (kind, fixed_dividend_pct) {
            (StockKind::Preferred, Some(pct)) => {
                if !(pct >= 0.0) || !pct.is_finite() {
                    return Err(StockbookError::InvalidFixedDividend {
                        symbol,
                        fixed_dividend: pct,
                    });
                }
                Some(pct / 100.0)
            }
            (StockKind::Preferred, None) => {
                return Err(StockbookError::MissingFixedDividend { symbol });
            }
            (StockKind::Common, Some(_)) => {
                return Err(StockbookError::UnexpectedFixedDividend { symbol });
            }
            (StockKind::Common, None) => None,
        };
        Ok(Stock {
            symbol,
            kind,
            last_dividend,
            par_value,
            fixed_dividend,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn kind(&self) -> StockKind {
        self.kind
    }

    pub fn last_dividend(&self) -> f64 {
        self.last_dividend
    }

    pub fn par_value(&self) -> f64 {
        self.par_value
    }

    /// Fixed dividend as a fraction (0.02 for 2%); `None` for common stock.
    pub fn fixed_dividend(&self) -> Option<f64> {
        self.fixed_dividend
    }

    /// Dividend yield at the given price. Common: last dividend over
    /// price. Preferred: fixed dividend times par value, over price.
    pub fn dividend_yield(&self, price: f64) -> Result<f64, StockbookError> {
        if !(price > 0.0) || !price.is_finite() {
            return Err(StockbookError::InvalidPrice { price });
        }
        let yield_value = match self.kind {
            StockKind::Common => self.last_dividend / price,
            // The constructor guarantees the fixed dividend is present.
            StockKind::Preferred => self.fixed_dividend.unwrap_or(0.0) * self.par_value / price,
        };
        Ok(yield_value)
    }

    /// Price/earnings ratio at the given price. Defined as 0 when the
    /// last dividend is 0, guarding the division.
    pub fn pe_ratio(&self, price: f64) -> Result<f64, StockbookError> {
        if !(price > 0.0) || !price.is_finite() {
            return Err(StockbookError::InvalidPrice { price });
        }
        if self.last_dividend == 0.0 {
            return Ok(0.0);
        }
        Ok(price / self.last_dividend)
    }

    /// Execute a trade of this stock, stamped with the clock's current
    /// time. Validation failures surface immediately; there is no retry.
    pub fn execute_trade(
        &self,
        price: f64,
        quantity: f64,
        direction: Direction,
        clock: &dyn ClockPort,
    ) -> Result<Trade, StockbookError> {
        Trade::new(&self.symbol, price, quantity, direction, clock.now())
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) last dividend {}, par value {}",
            self.symbol, self.kind, self.last_dividend, self.par_value
        )?;
        if let Some(fixed) = self.fixed_dividend {
            write!(f, ", fixed dividend {}%", fixed * 100.0)?;
        }
        Ok(())
    }
}

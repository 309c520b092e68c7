//! Trade records.

use chrono::{DateTime, Utc};
use std::fmt;

use super::error::StockbookError;

/// Whether a trade bought or sold stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    /// Parse a direction indicator. Accepts the single letters `B`/`S`
    /// or the words `buy`/`sell`, in any case.
    pub fn parse(input: &str) -> Result<Self, StockbookError> {
        match input.to_uppercase().as_str() {
            "B" | "BUY" => Ok(Direction::Buy),
            "S" | "SELL" => Ok(Direction::Sell),
            _ => Err(StockbookError::InvalidDirection {
                input: input.to_string(),
            }),
        }
    }

    /// Past-tense word for display: "Bought" or "Sold".
    pub fn word(&self) -> &'static str {
        match self {
            Direction::Buy => "Bought",
            Direction::Sell => "Sold",
        }
    }
}

/// A single executed trade. Immutable once constructed; the only link to
/// the traded stock is the symbol string, so a portfolio can hold trades
/// for stocks it has never seen modeled.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    symbol: String,
    price: f64,
    quantity: f64,
    direction: Direction,
    timestamp: DateTime<Utc>,
}

impl Trade {
    /// Build a validated trade. Price and quantity must be positive and
    /// finite; the symbol is uppercased.
    pub fn new(
        symbol: &str,
        price: f64,
        quantity: f64,
        direction: Direction,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, StockbookError> {
        if !(price > 0.0) || !price.is_finite() {
            return Err(StockbookError::InvalidPrice { price });
        }
        if !(quantity > 0.0) || !quantity.is_finite() {
            return Err(StockbookError::InvalidQuantity { quantity });
        }
        Ok(Trade {
            symbol: symbol.to_uppercase(),
            price,
            quantity,
            direction,
            timestamp,
        })
    }

    /// Replace the timestamp, consuming the trade. Exists for backdating
    /// (ledger replay, time-window tests), not as a general mutation path.
    pub fn backdated(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  -- {} {} of {} at {}",
            self.timestamp.format("%Y-%m-%d, %H:%M:%S"),
            self.direction.word(),
            self.quantity,
            self.symbol,
            self.price
        )
    }
}

//! Portfolio aggregation and analytics.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use super::error::StockbookError;
use super::trade::Trade;
use crate::ports::clock_port::ClockPort;

/// Outcome of a volume-weighted price query. The original record keeper
/// collapsed all three cases to a bare 0; the tags keep "no such symbol"
/// and "nothing traded recently" distinguishable from a computed price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightedPrice {
    Value(f64),
    NotFound,
    NoTradesInRange,
}

impl WeightedPrice {
    /// Collapse to the bare-zero convention.
    pub fn value_or_zero(&self) -> f64 {
        match self {
            WeightedPrice::Value(v) => *v,
            WeightedPrice::NotFound | WeightedPrice::NoTradesInRange => 0.0,
        }
    }
}

/// Outcome of an all-share index calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShareIndex {
    Value(f64),
    EmptyPortfolio,
    NoTradesInRange,
}

impl ShareIndex {
    pub fn value_or_zero(&self) -> f64 {
        match self {
            ShareIndex::Value(v) => *v,
            ShareIndex::EmptyPortfolio | ShareIndex::NoTradesInRange => 0.0,
        }
    }
}

/// A trader's portfolio: an append-only trade list plus aggregate
/// queries over it. Nothing here deduplicates trades or checks symbols
/// against a stock list; that is the caller's job.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    owner: String,
    trades: Vec<Trade>,
}

impl Portfolio {
    pub fn new(owner: &str) -> Self {
        Portfolio {
            owner: owner.to_string(),
            trades: Vec::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Append a trade. Insertion order is preserved; it need not match
    /// timestamp order.
    pub fn add_trade(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    pub fn distinct_stock_count(&self) -> usize {
        self.trades
            .iter()
            .map(|t| t.symbol())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Distinct symbols traded, sorted.
    pub fn distinct_stock_symbols(&self) -> Vec<String> {
        self.trades
            .iter()
            .map(|t| t.symbol().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Volume-weighted price for `symbol` over the trailing window:
    /// Σ(price·quantity) / Σ(quantity) across matching in-window trades.
    /// The evaluation time is captured once, not per trade.
    pub fn volume_weighted_price(
        &self,
        symbol: &str,
        window_minutes: f64,
        clock: &dyn ClockPort,
    ) -> WeightedPrice {
        self.weighted_price_at(symbol, window_minutes, clock.now())
    }

    fn weighted_price_at(
        &self,
        symbol: &str,
        window_minutes: f64,
        now: DateTime<Utc>,
    ) -> WeightedPrice {
        let symbol = symbol.to_uppercase();
        let mut symbol_present = false;
        let mut price_quantity_sum = 0.0;
        let mut quantity_sum = 0.0;

        for trade in &self.trades {
            if trade.symbol() != symbol {
                continue;
            }
            symbol_present = true;
            let age_seconds = (now - trade.timestamp()).num_seconds() as f64;
            if age_seconds > window_minutes * 60.0 {
                continue;
            }
            price_quantity_sum += trade.price() * trade.quantity();
            quantity_sum += trade.quantity();
        }

        if !symbol_present {
            WeightedPrice::NotFound
        } else if quantity_sum == 0.0 {
            WeightedPrice::NoTradesInRange
        } else {
            WeightedPrice::Value(price_quantity_sum / quantity_sum)
        }
    }

    /// All-share index over the trailing window: the geometric mean of
    /// per-symbol volume-weighted prices across every distinct symbol.
    /// A symbol with nothing in-window contributes 0 to the product, so
    /// a partially stale portfolio indexes to 0; only the case where no
    /// symbol traded in-window is reported as `NoTradesInRange`.
    pub fn all_share_index(&self, window_minutes: f64, clock: &dyn ClockPort) -> ShareIndex {
        if self.trades.is_empty() {
            return ShareIndex::EmptyPortfolio;
        }

        let now = clock.now();
        let symbols = self.distinct_stock_symbols();
        let mut price_product = 1.0;
        let mut any_in_range = false;

        for symbol in &symbols {
            let weighted = self
                .weighted_price_at(symbol, window_minutes, now)
                .value_or_zero();
            if weighted > 0.0 {
                any_in_range = true;
            }
            price_product *= weighted;
        }

        if !any_in_range {
            ShareIndex::NoTradesInRange
        } else {
            ShareIndex::Value(price_product.powf(1.0 / symbols.len() as f64))
        }
    }

    /// The oldest trade by timestamp.
    pub fn earliest_trade(&self) -> Result<&Trade, StockbookError> {
        self.trades
            .iter()
            .min_by_key(|t| t.timestamp())
            .ok_or_else(|| StockbookError::EmptyPortfolio {
                owner: self.owner.clone(),
            })
    }
}

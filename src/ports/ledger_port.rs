//! Ledger access port trait.

use crate::domain::error::StockbookError;
use crate::domain::stock::Stock;
use crate::domain::trade::Trade;

/// Source of stock definitions and recorded trades.
pub trait LedgerPort {
    fn load_stocks(&self) -> Result<Vec<Stock>, StockbookError>;

    fn load_trades(&self) -> Result<Vec<Trade>, StockbookError>;
}

//! Domain error types.

/// Top-level error type for stockbook.
#[derive(Debug, thiserror::Error)]
pub enum StockbookError {
    #[error("invalid price {price}: must be greater than zero")]
    InvalidPrice { price: f64 },

    #[error("invalid quantity {quantity}: must be greater than zero")]
    InvalidQuantity { quantity: f64 },

    #[error("invalid trade direction {input:?}: expected B/buy or S/sell")]
    InvalidDirection { input: String },

    #[error("invalid stock kind {input:?}: expected common or preferred")]
    InvalidStockKind { input: String },

    #[error("invalid par value {par_value} for {symbol}: must be greater than zero")]
    InvalidParValue { symbol: String, par_value: f64 },

    #[error("invalid last dividend {last_dividend} for {symbol}: must be non-negative")]
    InvalidLastDividend { symbol: String, last_dividend: f64 },

    #[error("invalid fixed dividend {fixed_dividend} for {symbol}: must be non-negative")]
    InvalidFixedDividend { symbol: String, fixed_dividend: f64 },

    #[error("preferred stock {symbol} requires a fixed dividend")]
    MissingFixedDividend { symbol: String },

    #[error("common stock {symbol} must not carry a fixed dividend")]
    UnexpectedFixedDividend { symbol: String },

    #[error("{owner}'s portfolio holds no trades")]
    EmptyPortfolio { owner: String },

    #[error("ledger error: {reason}")]
    Ledger { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StockbookError> for std::process::ExitCode {
    fn from(err: &StockbookError) -> Self {
        let code: u8 = match err {
            StockbookError::Io(_) => 1,
            StockbookError::ConfigParse { .. } => 2,
            StockbookError::Ledger { .. } => 3,
            StockbookError::InvalidPrice { .. }
            | StockbookError::InvalidQuantity { .. }
            | StockbookError::InvalidDirection { .. }
            | StockbookError::InvalidStockKind { .. }
            | StockbookError::InvalidParValue { .. }
            | StockbookError::InvalidLastDividend { .. }
            | StockbookError::InvalidFixedDividend { .. }
            | StockbookError::MissingFixedDividend { .. }
            | StockbookError::UnexpectedFixedDividend { .. } => 4,
            StockbookError::EmptyPortfolio { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

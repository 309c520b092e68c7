#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use stockbook::adapters::clock_adapter::FixedClock;
use stockbook::domain::stock::{Stock, StockKind};
use stockbook::domain::trade::{Direction, Trade};

/// A fixed evaluation instant shared by the test suite.
pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn fixed_clock() -> FixedClock {
    FixedClock::new(noon())
}

/// The GBCE sample market.
pub fn sample_market() -> Vec<Stock> {
    vec![
        Stock::new("TEA", StockKind::Common, 0.0, 100.0, None).unwrap(),
        Stock::new("POP", StockKind::Common, 8.0, 100.0, None).unwrap(),
        Stock::new("ALE", StockKind::Common, 23.0, 60.0, None).unwrap(),
        Stock::new("GIN", StockKind::Preferred, 8.0, 100.0, Some(2.0)).unwrap(),
        Stock::new("JOE", StockKind::Common, 13.0, 250.0, None).unwrap(),
    ]
}

pub fn make_trade(symbol: &str, price: f64, quantity: f64, age_minutes: i64) -> Trade {
    Trade::new(
        symbol,
        price,
        quantity,
        Direction::Buy,
        noon() - Duration::minutes(age_minutes),
    )
    .unwrap()
}

pub fn make_sell(symbol: &str, price: f64, quantity: f64, age_minutes: i64) -> Trade {
    Trade::new(
        symbol,
        price,
        quantity,
        Direction::Sell,
        noon() - Duration::minutes(age_minutes),
    )
    .unwrap()
}

//! Integration tests for the record-keeping core.
//!
//! Tests cover:
//! - Stock valuation over the GBCE sample market
//! - Trade execution with an injected clock
//! - Portfolio aggregation (weighted price, all-share index, earliest trade)
//! - CSV ledger → portfolio → analytics pipeline on disk
//! - Idempotence of read-only queries under arbitrary inputs

mod common;

use approx::assert_relative_eq;
use chrono::Duration;
use common::*;
use proptest::prelude::*;
use std::io::Write;
use stockbook::adapters::csv_ledger_adapter::{CsvLedgerAdapter, STOCKS_FILE, TRADES_FILE};
use stockbook::domain::error::StockbookError;
use stockbook::domain::portfolio::{Portfolio, ShareIndex, WeightedPrice};
use stockbook::domain::stock::{Stock, StockKind};
use stockbook::domain::trade::Direction;
use stockbook::ports::ledger_port::LedgerPort;

mod valuation {
    use super::*;

    fn stock(symbol: &str) -> Stock {
        sample_market()
            .into_iter()
            .find(|s| s.symbol() == symbol)
            .unwrap()
    }

    #[test]
    fn preferred_dividend_yield_from_par_value() {
        // GIN: 2% of par 100 at price 40 → 0.05
        let yield_value = stock("GIN").dividend_yield(40.0).unwrap();
        assert!((yield_value - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn common_dividend_yield_from_last_dividend() {
        let yield_value = stock("ALE").dividend_yield(60.0).unwrap();
        assert!((yield_value - 23.0 / 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pe_ratio_sample_values() {
        assert!((stock("POP").pe_ratio(40.0).unwrap() - 5.0).abs() < f64::EPSILON);
        // TEA pays no dividend, so its P/E is pinned at 0 for any price.
        assert!(stock("TEA").pe_ratio(40.0).unwrap().abs() < f64::EPSILON);
        assert!(stock("TEA").pe_ratio(9999.0).unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn execute_trade_rejects_each_bad_input() {
        let clock = fixed_clock();
        let pop = stock("POP");
        assert!(matches!(
            pop.execute_trade(0.0, 70.0, Direction::Buy, &clock).unwrap_err(),
            StockbookError::InvalidPrice { .. }
        ));
        assert!(matches!(
            pop.execute_trade(-1.0, 70.0, Direction::Buy, &clock).unwrap_err(),
            StockbookError::InvalidPrice { .. }
        ));
        assert!(matches!(
            pop.execute_trade(40.0, 0.0, Direction::Buy, &clock).unwrap_err(),
            StockbookError::InvalidQuantity { .. }
        ));
        assert!(matches!(
            Direction::parse("c").unwrap_err(),
            StockbookError::InvalidDirection { .. }
        ));
    }
}

mod portfolio_analytics {
    use super::*;

    #[test]
    fn weighted_price_from_executed_trades() {
        let clock = fixed_clock();
        let market = sample_market();
        let pop = market.iter().find(|s| s.symbol() == "POP").unwrap();

        let mut portfolio = Portfolio::new("Graham");
        portfolio.add_trade(pop.execute_trade(40.0, 70.0, Direction::Buy, &clock).unwrap());
        portfolio.add_trade(pop.execute_trade(30.0, 54.0, Direction::Buy, &clock).unwrap());

        let expected = (40.0 * 70.0 + 30.0 * 54.0) / (70.0 + 54.0);
        assert_eq!(
            portfolio.volume_weighted_price("POP", 15.0, &clock),
            WeightedPrice::Value(expected)
        );
    }

    #[test]
    fn absent_symbol_reports_not_found() {
        let clock = fixed_clock();
        let mut portfolio = Portfolio::new("Graham");
        portfolio.add_trade(make_trade("POP", 40.0, 70.0, 1));
        assert_eq!(
            portfolio.volume_weighted_price("XYZ", 15.0, &clock),
            WeightedPrice::NotFound
        );
    }

    #[test]
    fn all_share_index_empty_portfolio_is_tagged() {
        let clock = fixed_clock();
        let portfolio = Portfolio::new("Graham");
        assert_eq!(
            portfolio.all_share_index(15.0, &clock),
            ShareIndex::EmptyPortfolio
        );
    }

    #[test]
    fn earliest_trade_prefers_backdated() {
        let mut portfolio = Portfolio::new("Graham");
        portfolio.add_trade(make_trade("POP", 40.0, 70.0, 0));
        portfolio.add_trade(make_trade("ALE", 25.0, 10.0, 20));

        let earliest = portfolio.earliest_trade().unwrap();
        assert_eq!(earliest.symbol(), "ALE");
        assert_eq!(earliest.timestamp(), noon() - Duration::minutes(20));
    }

    #[test]
    fn window_excludes_backdated_trades() {
        let clock = fixed_clock();
        let mut portfolio = Portfolio::new("Graham");
        portfolio.add_trade(make_trade("POP", 40.0, 70.0, 20));
        portfolio.add_trade(make_trade("POP", 30.0, 54.0, 1));

        // Only the recent trade is inside a 15-minute window.
        assert_eq!(
            portfolio.volume_weighted_price("POP", 15.0, &clock),
            WeightedPrice::Value(30.0)
        );
        // A wider window takes both.
        let expected = (40.0 * 70.0 + 30.0 * 54.0) / (70.0 + 54.0);
        assert_eq!(
            portfolio.volume_weighted_price("POP", 30.0, &clock),
            WeightedPrice::Value(expected)
        );
    }

    #[test]
    fn index_over_mixed_directions() {
        let clock = fixed_clock();
        let mut portfolio = Portfolio::new("Graham");
        portfolio.add_trade(make_trade("POP", 40.0, 70.0, 1));
        portfolio.add_trade(make_sell("ALE", 10.0, 5.0, 1));

        match portfolio.all_share_index(15.0, &clock) {
            ShareIndex::Value(v) => assert_relative_eq!(v, 20.0, max_relative = 1e-12),
            other => panic!("expected a value, got {other:?}"),
        }
    }
}

mod ledger_pipeline {
    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) {
        let mut f = std::fs::File::create(dir.path().join(name)).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn full_pipeline_from_csv_ledger() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            &dir,
            STOCKS_FILE,
            "symbol,kind,last_dividend,fixed_dividend,par_value\n\
             TEA,common,0,,100\n\
             POP,common,8,,100\n\
             GIN,preferred,8,2,100\n",
        );
        write_file(
            &dir,
            TRADES_FILE,
            "symbol,price,quantity,direction,timestamp\n\
             POP,40,70,B,2024-06-01T11:59:00Z\n\
             POP,30,54,B,2024-06-01T11:58:00Z\n\
             GIN,105,20,S,2024-06-01T11:30:00Z\n",
        );

        let ledger = CsvLedgerAdapter::new(dir.path().to_path_buf());
        let stocks = ledger.load_stocks().unwrap();
        assert_eq!(stocks.len(), 3);

        let clock = fixed_clock();
        let mut portfolio = Portfolio::new("Graham");
        for trade in ledger.load_trades().unwrap() {
            portfolio.add_trade(trade);
        }

        assert_eq!(portfolio.trade_count(), 3);
        assert_eq!(portfolio.distinct_stock_count(), 2);
        assert_eq!(portfolio.distinct_stock_symbols(), vec!["GIN", "POP"]);

        let expected_pop = (40.0 * 70.0 + 30.0 * 54.0) / (70.0 + 54.0);
        assert_eq!(
            portfolio.volume_weighted_price("POP", 15.0, &clock),
            WeightedPrice::Value(expected_pop)
        );
        // GIN traded half an hour ago, outside the window.
        assert_eq!(
            portfolio.volume_weighted_price("GIN", 15.0, &clock),
            WeightedPrice::NoTradesInRange
        );
        // GIN's zero pulls the product down, so the index values to 0.
        assert_eq!(
            portfolio.all_share_index(15.0, &clock),
            ShareIndex::Value(0.0)
        );
        // Widening the window brings GIN in: sqrt(vwap_pop * 105).
        match portfolio.all_share_index(60.0, &clock) {
            ShareIndex::Value(v) => {
                assert_relative_eq!(v, (expected_pop * 105.0).sqrt(), max_relative = 1e-12)
            }
            other => panic!("expected a value, got {other:?}"),
        }

        let earliest = portfolio.earliest_trade().unwrap();
        assert_eq!(earliest.symbol(), "GIN");
    }
}

mod properties {
    use super::*;

    proptest! {
        #[test]
        fn zero_dividend_common_always_yields_zero(price in 0.001f64..1e9) {
            let tea = Stock::new("TEA", StockKind::Common, 0.0, 100.0, None).unwrap();
            prop_assert!(tea.dividend_yield(price).unwrap().abs() < f64::EPSILON);
            prop_assert!(tea.pe_ratio(price).unwrap().abs() < f64::EPSILON);
        }

        #[test]
        fn read_queries_idempotent(
            prices in proptest::collection::vec(0.01f64..1e6, 1..20),
            window in 0.0f64..120.0,
        ) {
            let clock = fixed_clock();
            let mut portfolio = Portfolio::new("Graham");
            for (i, price) in prices.iter().enumerate() {
                portfolio.add_trade(make_trade("POP", *price, 10.0, i as i64));
            }

            prop_assert_eq!(portfolio.trade_count(), portfolio.trade_count());
            prop_assert_eq!(
                portfolio.volume_weighted_price("POP", window, &clock),
                portfolio.volume_weighted_price("POP", window, &clock)
            );
            prop_assert_eq!(
                portfolio.all_share_index(window, &clock),
                portfolio.all_share_index(window, &clock)
            );
            prop_assert_eq!(
                portfolio.distinct_stock_symbols(),
                portfolio.distinct_stock_symbols()
            );
        }
    }
}

//! Time source port trait.
//!
//! Every time-dependent domain operation takes a clock rather than
//! reading the wall clock itself, so tests and ledger replays can
//! supply deterministic timestamps.

use chrono::{DateTime, Utc};

pub trait ClockPort {
    fn now(&self) -> DateTime<Utc>;
}

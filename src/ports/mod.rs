//! Boundary traits between the domain and the outside world.

pub mod clock_port;
pub mod config_port;
pub mod ledger_port;

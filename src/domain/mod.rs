//! Core domain types and logic.

pub mod error;
pub mod portfolio;
pub mod stock;
pub mod trade;

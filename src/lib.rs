//! Portfolio analytics over a fixed set of stock holdings: sector and
//! market-cap allocation, benchmark returns over lookback windows, and
//! summary statistics, served over HTTP by the `portfolio_analytics` binary.

pub mod app;
pub mod config;
pub mod csv_history;
pub mod csv_store;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod usecases;

#[cfg(test)]
mod tests;

#![forbid(unsafe_code)]
#![warn(
    unused,
    clippy::cognitive_complexity,
    unused_crate_dependencies,
    unused_extern_crates,
    clippy::unused_self,
    clippy::useless_let_if_seq,
    missing_debug_implementations,
    rust_2018_idioms,
    rust_2024_compatibility
)]

//! # Aurum-Data
//! Candle data for Aurum scanners.
//!
//! A [`MarketDataSource`](source::MarketDataSource) fetches the most recent candles for an
//! instrument & timeframe, oldest first, where the final candle may still be forming. The
//! [`BinanceFuturesClient`](exchange::binance::BinanceFuturesClient) implementation polls the
//! public Binance USDⓈ-M klines endpoint.

/// All [`Error`](std::error::Error)s generated in Aurum-Data.
pub mod error;

/// Exchange specific [`MarketDataSource`](source::MarketDataSource) implementations.
pub mod exchange;

/// [`InstrumentName`](instrument::InstrumentName) used to address exchange markets.
pub mod instrument;

/// Defines the [`MarketDataSource`](source::MarketDataSource) abstraction.
pub mod source;

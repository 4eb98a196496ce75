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

//! # Aurum-TA
//! Candle series and technical analysis indicators for Aurum signal detectors.
//!
//! - [`CandleSeries`](candle::CandleSeries): validated, ascending OHLCV candles for one
//!   instrument & [`Timeframe`](candle::Timeframe), where the final entry may still be forming.
//! - [`indicators`]: causal EMA, SMA, standard deviation, Bollinger Bands & RSI. Each indicator
//!   has a streaming form (`update(value) -> Option<Decimal>`) and a whole-series form that is a
//!   fold of the streaming form.

/// [`Candle`](candle::Candle), [`Timeframe`](candle::Timeframe) &
/// [`CandleSeries`](candle::CandleSeries) definitions.
pub mod candle;

/// Causal technical analysis indicators.
pub mod indicators;

/// All [`Error`](std::error::Error)s generated in Aurum-TA.
pub mod error;

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

//! # Aurum-Strategy
//! Deterministic, state-free signal detectors evaluated against freshly fetched candles.
//!
//! Every detector implements [`Detector`](detector::Detector): it declares the candle
//! [`Feed`](detector::Feed)s it needs, and evaluates a [`Market`](detector::Market) built from
//! those feeds into at most one [`Signal`](signal::Signal).
//!
//! - [`DirectSweep`](sweep::DirectSweep): 15 minute liquidity sweep, entry at the sweep close.
//! - [`ConfluenceSweep`](sweep::ConfluenceSweep): 15 minute sweep confirmed by a 5 minute
//!   imbalance gap, entry at the gap edge.
//! - [`MeanReversion`](mean_reversion::MeanReversion): 5 minute Bollinger Band rejection with an
//!   RSI filter.

/// [`Signal`](signal::Signal), [`Direction`](signal::Direction) & risk/reward helpers.
pub mod signal;

/// [`Detector`](detector::Detector) abstraction & the [`Market`](detector::Market) it evaluates.
pub mod detector;

/// Liquidity sweep detectors.
pub mod sweep;

/// Bollinger Band & RSI mean-reversion detector.
pub mod mean_reversion;

/// [`StrategyKind`](kind::StrategyKind) selection & enum dispatch over every detector.
pub mod kind;

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

//! # Aurum
//! Always-on signal scanner for a single instrument (by default Binance USDⓈ-M `XAUUSDT`).
//!
//! Each configured [`StrategyKind`](aurum_strategy::kind::StrategyKind) runs in its own
//! [`Scanner`](scanner::Scanner) task: fetch candles → evaluate the detector → pass the
//! [`DedupGate`](dedup::DedupGate) → notify. Alongside the scanners run a Telegram command
//! poller answering `/start` & `/status`, and a liveness HTTP server.
//!
//! All tasks stop when a [`Shutdown`](shutdown::Shutdown) is broadcast (Ctrl-C or SIGTERM).

/// Immutable runtime [`Config`](config::Config) read from the environment.
pub mod config;

/// Idempotent alert gate that suppresses repeat detections of the same market event.
pub mod dedup;

/// All [`Error`](std::error::Error)s generated in Aurum.
pub mod error;

/// Provides default Aurum logging configurations.
pub mod logging;

/// [`Notifier`](notify::Notifier) abstraction & alert formatting.
pub mod notify;

/// Poll loop driving fetch → detect → dedup → notify cycles.
pub mod scanner;

/// Liveness HTTP endpoint.
pub mod server;

/// [`Shutdown`](shutdown::Shutdown) broadcast & process signal handling.
pub mod shutdown;

/// Telegram Bot API client, used both as the alert [`Notifier`](notify::Notifier) and to answer
/// operator commands.
pub mod telegram;

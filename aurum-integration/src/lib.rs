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

//! # Aurum-Integration
//! Low-level plumbing for the request/response web APIs Aurum depends on.
//!
//! The market data source (exchange klines) and the notification sink (chat bot API) are both
//! plain Http REST integrations, so they share one abstraction:
//! - **RestRequest** describes a single endpoint: path, method, query, body & response type.
//! - **RestClient** builds, executes and measures a [`RestRequest`](protocol::http::rest::RestRequest),
//!   handing the raw payload to an API specific [`HttpParser`](protocol::http::HttpParser).

/// All [`Error`](std::error::Error)s generated in Aurum-Integration.
pub mod error;

/// Http protocol abstractions: [`RestRequest`](protocol::http::rest::RestRequest),
/// [`RestClient`](protocol::http::rest::client::RestClient) & friends.
pub mod protocol;

/// Contains the flexible `Metric` type used for representing request latency.
pub mod metric;

/// Utilities to assist deserialisation.
pub mod de;

use serde::{Serialize, de::DeserializeOwned};
use std::{borrow::Cow, time::Duration};

/// [`client::RestClient`] that turns a [`RestRequest`] into a measured Http round trip.
pub mod client;

/// Upper bound on a single request round trip unless the [`RestRequest`] overrides it.
///
/// Long polls (eg/ Telegram `getUpdates`) must override [`RestRequest::timeout`] to outlive the
/// server side hold.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One Http endpoint: where it lives, how it is called, and what it returns.
///
/// eg/ Binance `GET /fapi/v1/klines` or Telegram `POST /bot{token}/sendMessage`.
pub trait RestRequest {
    /// Payload deserialised from a successful response.
    type Response: DeserializeOwned;

    /// Url encoded query string, `()` when the endpoint takes none.
    type QueryParams: Serialize;

    /// Json body, `()` when the endpoint takes none.
    type Body: Serialize;

    /// Path appended to the client base url. May embed path credentials.
    fn path(&self) -> Cow<'static, str>;

    fn method() -> reqwest::Method;

    fn query_params(&self) -> Option<&Self::QueryParams> {
        None
    }

    fn body(&self) -> Option<&Self::Body> {
        None
    }

    fn timeout(&self) -> Duration {
        DEFAULT_REQUEST_TIMEOUT
    }
}

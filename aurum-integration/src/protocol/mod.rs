/// Contains a Http client capable of executing [`RestRequest`](http::rest::RestRequest)s, and
/// the [`HttpParser`](http::HttpParser) abstraction used to interpret API responses.
pub mod http;

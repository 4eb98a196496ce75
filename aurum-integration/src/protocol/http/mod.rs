use self::rest::RestRequest;
use crate::error::SocketError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::error;

/// Defines an abstract [`RestRequest`] that can be executed by a fully
/// configurable [`RestClient`](rest::client::RestClient).
pub mod rest;

/// Defines a default [`BuildStrategy`] that builds a non-authenticated Http
/// [`RestRequest`] with no headers.
pub mod public;

/// [`RestRequest`] build strategy for the API being interacted with.
///
/// Aurum only talks to public market data endpoints and to APIs that carry their credentials in
/// the request path, so a strategy typically just adds mandatory headers before building.
pub trait BuildStrategy {
    /// Use a [`RestRequest`] and [`reqwest::RequestBuilder`] to construct a [`reqwest::Request`]
    /// that is ready for executing.
    fn build<Request>(
        &self,
        request: Request,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Request, SocketError>
    where
        Request: RestRequest;
}

/// Utilised by a [`RestClient`](rest::client::RestClient) to deserialise
/// [`RestRequest::Response`], and upon failure parses API errors
/// returned from the server.
pub trait HttpParser {
    type ApiError: DeserializeOwned;
    type OutputError: From<SocketError>;

    /// Attempt to parse a [`StatusCode`] & bytes payload into a deserialisable `Response`.
    fn parse<Response>(
        &self,
        status: StatusCode,
        payload: &[u8],
    ) -> Result<Response, Self::OutputError>
    where
        Response: DeserializeOwned,
    {
        // Attempt to deserialise reqwest::Response bytes into Ok(Response)
        let parse_ok_error = if status.is_success() {
            match serde_json::from_slice::<Response>(payload) {
                Ok(response) => return Ok(response),
                Err(serde_error) => Some(serde_error),
            }
        } else {
            None
        };

        // Attempt to deserialise API Error if Ok(Response) deserialisation failed
        let parse_api_error_error = match serde_json::from_slice::<Self::ApiError>(payload) {
            Ok(api_error) => return Err(self.parse_api_error(status, api_error)),
            Err(serde_error) => serde_error,
        };

        error!(
            status_code = ?status,
            ?parse_ok_error,
            ?parse_api_error_error,
            response_body = %String::from_utf8_lossy(payload),
            "error deserializing HTTP response"
        );

        let error = match parse_ok_error {
            Some(error) => SocketError::Deserialise {
                error,
                payload: String::from_utf8_lossy(payload).into_owned(),
            },
            None => SocketError::HttpResponse(status, String::from_utf8_lossy(payload).into_owned()),
        };

        Err(Self::OutputError::from(error))
    }

    /// If [`parse`](Self::parse) fails to deserialise the `Ok(Response)`, this function parses
    /// the API [`Self::ApiError`] associated with the response.
    fn parse_api_error(&self, status: StatusCode, error: Self::ApiError) -> Self::OutputError;
}

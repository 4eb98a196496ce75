use thiserror::Error;

/// All socket IO related errors generated in `aurum-integration`.
#[derive(Debug, Error)]
pub enum SocketError {
    #[error("Deserialising JSON error: {error} for payload: {payload}")]
    Deserialise {
        error: serde_json::Error,
        payload: String,
    },

    #[error("error parsing Url: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("HTTP request timed out")]
    HttpTimeout(reqwest::Error),

    /// REST http response error
    #[error("HTTP response (status={0}) error: {1}")]
    HttpResponse(reqwest::StatusCode, String),

    #[error("consumed error message from API: {0}")]
    Api(String),
}

impl SocketError {
    /// Determines if the error was caused by the remote end (as opposed to a malformed request or
    /// payload), and is therefore worth retrying on the next poll.
    pub fn is_transient(&self) -> bool {
        match self {
            SocketError::Http(_) | SocketError::HttpTimeout(_) => true,
            SocketError::HttpResponse(status, _) => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

impl From<reqwest::Error> for SocketError {
    fn from(error: reqwest::Error) -> Self {
        match error {
            error if error.is_timeout() => SocketError::HttpTimeout(error),
            error => SocketError::Http(error),
        }
    }
}

use crate::error::DataError;
use aurum_integration::{error::SocketError, protocol::http::HttpParser};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone)]
pub struct BinanceParser;

impl HttpParser for BinanceParser {
    type ApiError = BinanceApiError;
    type OutputError = DataError;

    fn parse_api_error(&self, status: reqwest::StatusCode, error: Self::ApiError) -> Self::OutputError {
        // Rate limit & IP ban responses carry an API error body too, but are retryable
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::IM_A_TEAPOT
            || status.is_server_error()
        {
            return DataError::Socket(SocketError::HttpResponse(status, error.msg));
        }

        DataError::Exchange {
            code: error.code,
            message: error.msg,
        }
    }
}

/// Binance API error body.
///
/// eg/ `{"code": -1121, "msg": "Invalid symbol."}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BinanceApiError {
    pub code: i64,
    pub msg: String,
}

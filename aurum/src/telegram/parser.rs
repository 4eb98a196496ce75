use crate::error::NotifyError;
use aurum_integration::{error::SocketError, protocol::http::HttpParser};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone)]
pub struct TelegramParser;

impl HttpParser for TelegramParser {
    type ApiError = TelegramApiError;
    type OutputError = NotifyError;

    fn parse_api_error(&self, status: reqwest::StatusCode, error: Self::ApiError) -> Self::OutputError {
        // Flood control & server failures are worth retrying
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return NotifyError::Socket(SocketError::HttpResponse(status, error.description));
        }

        NotifyError::Api {
            code: error.error_code,
            description: error.description,
        }
    }
}

/// Telegram API error body.
///
/// eg/ `{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TelegramApiError {
    pub error_code: u16,
    pub description: String,
}

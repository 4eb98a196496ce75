use aurum_data::error::DataError;
use aurum_integration::error::SocketError;
use aurum_ta::error::TaError;
use thiserror::Error;

/// Top level error returned by the `aurum` binary. Only startup can fail: once running, every
/// cycle failure is logged and retried.
#[derive(Debug, Error)]
pub enum AurumError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("detector: {0}")]
    Detector(#[from] TaError),

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid or missing environment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Failure to deliver an alert or command reply.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("SocketError: {0}")]
    Socket(#[from] SocketError),

    #[error("Telegram API error (code={code}): {description}")]
    Api { code: u16, description: String },
}

/// Failure that skips a whole scanner cycle.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("market data: {0}")]
    Data(#[from] DataError),

    #[error("indicator: {0}")]
    Indicator(TaError),
}

impl ScanError {
    /// Determines if the failure is likely to clear up by itself on a later cycle (eg/ exchange
    /// rate limits or timeouts), as opposed to a misconfiguration that will fail every cycle.
    pub fn is_transient(&self) -> bool {
        match self {
            ScanError::Data(error) => error.is_transient(),
            ScanError::Indicator(_) => false,
        }
    }
}

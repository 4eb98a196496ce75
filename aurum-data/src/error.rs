use crate::instrument::InstrumentName;
use aurum_integration::error::SocketError;
use aurum_ta::{candle::Timeframe, error::TaError};
use thiserror::Error;

/// All errors generated in `aurum-data`.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("SocketError: {0}")]
    Socket(#[from] SocketError),

    #[error("exchange API error (code={code}): {message}")]
    Exchange { code: i64, message: String },

    #[error("invalid candle series: {0}")]
    InvalidSeries(#[from] TaError),

    #[error("no candles returned for {instrument} {timeframe}")]
    Empty {
        instrument: InstrumentName,
        timeframe: Timeframe,
    },
}

impl DataError {
    /// Determines if the failure is likely to clear up by itself on the next poll.
    pub fn is_transient(&self) -> bool {
        match self {
            DataError::Socket(error) => error.is_transient(),
            DataError::Exchange { .. } | DataError::InvalidSeries(_) | DataError::Empty { .. } => {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_is_transient() {
        struct TestCase {
            input: DataError,
            expected: bool,
        }

        let tests = vec![
            TestCase {
                // TC0: rate limited by the exchange
                input: DataError::Socket(SocketError::HttpResponse(
                    reqwest::StatusCode::TOO_MANY_REQUESTS,
                    String::new(),
                )),
                expected: true,
            },
            TestCase {
                // TC1: exchange rejected the request
                input: DataError::Exchange {
                    code: -1121,
                    message: String::from("Invalid symbol."),
                },
                expected: false,
            },
            TestCase {
                // TC2: malformed series
                input: DataError::InvalidSeries(TaError::NonMonotonic { index: 3 }),
                expected: false,
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = test.input.is_transient();
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }
}

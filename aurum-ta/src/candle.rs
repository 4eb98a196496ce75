use crate::error::TaError;
use chrono::{DateTime, TimeDelta, Utc};
use derive_more::Constructor;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Normalised Aurum OHLCV [`Candle`] model.
///
/// `time` is the candle open time.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Constructor,
)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl Candle {
    /// Closed above where it opened.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Closed below where it opened.
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// Candle interval.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Timeframe {
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
}

impl Timeframe {
    /// Fixed spacing between consecutive candle open times.
    pub fn period(&self) -> TimeDelta {
        match self {
            Timeframe::M5 => TimeDelta::minutes(5),
            Timeframe::M15 => TimeDelta::minutes(15),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
        }
    }
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ascending [`Candle`]s for a single instrument & [`Timeframe`].
///
/// Open times are strictly increasing and spaced exactly one [`Timeframe::period`] apart. The
/// final candle is assumed to still be forming, so detectors only ever read
/// [`closed`](Self::closed) candles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleSeries {
    timeframe: Timeframe,
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Validate and construct a new [`Self`] from candles ordered oldest first.
    pub fn new(timeframe: Timeframe, candles: Vec<Candle>) -> Result<Self, TaError> {
        let expected = timeframe.period();

        for (index, pair) in candles.windows(2).enumerate() {
            let actual = pair[1].time - pair[0].time;

            if actual <= TimeDelta::zero() {
                return Err(TaError::NonMonotonic { index: index + 1 });
            }

            if actual != expected {
                return Err(TaError::IrregularSpacing {
                    index: index + 1,
                    expected,
                    actual,
                });
            }
        }

        Ok(Self { timeframe, candles })
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Every candle, including the final forming one.
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Every candle except the final forming one.
    pub fn closed(&self) -> &[Candle] {
        match self.candles.split_last() {
            Some((_forming, closed)) => closed,
            None => &[],
        }
    }

    /// Closed candles, provided there are at least `required` of them.
    pub fn require_closed(&self, required: usize) -> Result<&[Candle], TaError> {
        let closed = self.closed();
        if closed.len() < required {
            Err(TaError::InsufficientData {
                required,
                available: closed.len(),
            })
        } else {
            Ok(closed)
        }
    }
}

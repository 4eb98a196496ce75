use crate::{error::DataError, instrument::InstrumentName};
use async_trait::async_trait;
use aurum_ta::candle::{Candle, CandleSeries, Timeframe};

/// Source of recent candles for a single instrument & [`Timeframe`].
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch up to `limit` of the most recent candles, oldest first. The final candle may still
    /// be forming.
    async fn fetch_candles(
        &self,
        instrument: &InstrumentName,
        timeframe: Timeframe,
        limit: u16,
    ) -> Result<Vec<Candle>, DataError>;

    /// Fetch the most recent candles and validate them into a [`CandleSeries`].
    async fn fetch_series(
        &self,
        instrument: &InstrumentName,
        timeframe: Timeframe,
        limit: u16,
    ) -> Result<CandleSeries, DataError> {
        let candles = self.fetch_candles(instrument, timeframe, limit).await?;

        if candles.is_empty() {
            return Err(DataError::Empty {
                instrument: instrument.clone(),
                timeframe,
            });
        }

        CandleSeries::new(timeframe, candles).map_err(DataError::from)
    }
}

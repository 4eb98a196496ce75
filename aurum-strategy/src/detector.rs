use crate::{kind::StrategyKind, signal::Signal};
use aurum_ta::{
    candle::{CandleSeries, Timeframe},
    error::TaError,
};
use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Candle feed a [`Detector`] needs fetched before every evaluation.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Constructor,
)]
pub struct Feed {
    pub timeframe: Timeframe,
    /// Number of most recent candles to fetch, including the forming candle.
    pub limit: u16,
}

/// Freshly fetched [`CandleSeries`] for one instrument, keyed by [`Timeframe`].
///
/// Rebuilt every poll cycle & discarded once evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Market {
    series: BTreeMap<Timeframe, CandleSeries>,
}

impl Market {
    pub fn new<Iter>(series: Iter) -> Self
    where
        Iter: IntoIterator<Item = CandleSeries>,
    {
        Self {
            series: series
                .into_iter()
                .map(|series| (series.timeframe(), series))
                .collect(),
        }
    }

    /// [`CandleSeries`] for the provided [`Timeframe`]. A missing feed has no candles available.
    pub fn series(&self, timeframe: Timeframe) -> Result<&CandleSeries, TaError> {
        self.series
            .get(&timeframe)
            .ok_or(TaError::InsufficientData {
                required: 1,
                available: 0,
            })
    }
}

/// Pure, state-free signal detection over a [`Market`].
pub trait Detector {
    /// Strategy this detector implements.
    fn kind(&self) -> StrategyKind;

    /// Candle feeds that must be present in the [`Market`] passed to
    /// [`evaluate`](Self::evaluate).
    fn feeds(&self) -> Vec<Feed>;

    /// Evaluate the closed candles of the [`Market`].
    ///
    /// Returns `Ok(None)` when no setup passes every gate, and
    /// [`TaError::InsufficientData`] when a feed is too short to evaluate.
    fn evaluate(&self, market: &Market) -> Result<Option<Signal>, TaError>;
}

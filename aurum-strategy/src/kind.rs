use crate::{
    detector::{Detector, Feed, Market},
    mean_reversion::{MeanReversion, MeanReversionConfig},
    signal::Signal,
    sweep::{ConfluenceSweep, DirectSweep, SweepConfig},
};
use aurum_ta::error::TaError;
use derive_more::From;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};
use thiserror::Error;

/// Selectable signal detection strategy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    DirectSweep,
    ConfluenceSweep,
    MeanReversion,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::DirectSweep,
        StrategyKind::ConfluenceSweep,
        StrategyKind::MeanReversion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::DirectSweep => "direct_sweep",
            StrategyKind::ConfluenceSweep => "confluence_sweep",
            StrategyKind::MeanReversion => "mean_reversion",
        }
    }

    /// Liquidity sweep strategies share the slower poll cadence & sweep configuration.
    pub fn is_sweep(&self) -> bool {
        matches!(
            self,
            StrategyKind::DirectSweep | StrategyKind::ConfluenceSweep
        )
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy: {0}")]
pub struct ParseStrategyKindError(pub String);

impl FromStr for StrategyKind {
    type Err = ParseStrategyKindError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "direct_sweep" | "sweep" => Ok(StrategyKind::DirectSweep),
            "confluence_sweep" | "confluence" | "mss" => Ok(StrategyKind::ConfluenceSweep),
            "mean_reversion" | "scalp" => Ok(StrategyKind::MeanReversion),
            _ => Err(ParseStrategyKindError(input.to_owned())),
        }
    }
}

/// Enum dispatch over every [`Detector`], selected by [`StrategyKind`].
#[derive(Debug, Clone, From)]
pub enum StrategyDetector {
    DirectSweep(DirectSweep),
    ConfluenceSweep(ConfluenceSweep),
    MeanReversion(MeanReversion),
}

impl StrategyDetector {
    pub fn new(
        kind: StrategyKind,
        sweep: SweepConfig,
        mean_reversion: MeanReversionConfig,
    ) -> Result<Self, TaError> {
        match kind {
            StrategyKind::DirectSweep => DirectSweep::new(sweep).map(Self::from),
            StrategyKind::ConfluenceSweep => ConfluenceSweep::new(sweep).map(Self::from),
            StrategyKind::MeanReversion => MeanReversion::new(mean_reversion).map(Self::from),
        }
    }
}

impl Detector for StrategyDetector {
    fn kind(&self) -> StrategyKind {
        match self {
            StrategyDetector::DirectSweep(detector) => detector.kind(),
            StrategyDetector::ConfluenceSweep(detector) => detector.kind(),
            StrategyDetector::MeanReversion(detector) => detector.kind(),
        }
    }

    fn feeds(&self) -> Vec<Feed> {
        match self {
            StrategyDetector::DirectSweep(detector) => detector.feeds(),
            StrategyDetector::ConfluenceSweep(detector) => detector.feeds(),
            StrategyDetector::MeanReversion(detector) => detector.feeds(),
        }
    }

    fn evaluate(&self, market: &Market) -> Result<Option<Signal>, TaError> {
        match self {
            StrategyDetector::DirectSweep(detector) => detector.evaluate(market),
            StrategyDetector::ConfluenceSweep(detector) => detector.evaluate(market),
            StrategyDetector::MeanReversion(detector) => detector.evaluate(market),
        }
    }
}

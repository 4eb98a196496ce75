use crate::kind::StrategyKind;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Trade direction of a [`Signal`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Direction {
    #[serde(alias = "long", alias = "LONG")]
    Long,
    #[serde(alias = "short", alias = "SHORT")]
    Short,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Direction::Long => "LONG",
                Direction::Short => "SHORT",
            }
        )
    }
}

/// Trade setup produced by a [`Detector`](crate::detector::Detector).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Signal {
    pub direction: Direction,
    pub entry: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    /// Open time of the candle that confirmed the setup.
    pub time: DateTime<Utc>,
    pub risk_reward: Decimal,
    pub strategy: StrategyKind,
}

impl Signal {
    /// Construct a new [`Self`], computing the [`risk_reward`] from the provided levels.
    pub fn new(
        strategy: StrategyKind,
        direction: Direction,
        entry: Decimal,
        stop_loss: Decimal,
        take_profit: Decimal,
        time: DateTime<Utc>,
    ) -> Self {
        Self {
            direction,
            entry,
            stop_loss,
            take_profit,
            time,
            risk_reward: risk_reward(entry, stop_loss, take_profit),
            strategy,
        }
    }

    /// Identity used to recognise repeat detections of the same market event.
    pub fn id(&self) -> SignalId {
        SignalId {
            direction: self.direction,
            time: self.time,
        }
    }
}

/// Identity of a [`Signal`]: the same direction confirmed by the same candle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct SignalId {
    pub direction: Direction,
    pub time: DateTime<Utc>,
}

/// Reward distance divided by risk distance, rounded to 2 decimal places.
///
/// Zero risk yields a ratio of zero.
pub fn risk_reward(entry: Decimal, stop_loss: Decimal, take_profit: Decimal) -> Decimal {
    let risk = (entry - stop_loss).abs();
    if risk.is_zero() {
        return Decimal::ZERO;
    }

    let reward = (take_profit - entry).abs();
    (reward / risk).round_dp(2)
}

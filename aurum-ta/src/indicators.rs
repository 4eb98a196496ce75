use crate::error::TaError;
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Default Bollinger Band width, in standard deviations.
pub const DEFAULT_BOLLINGER_MULTIPLIER: Decimal = Decimal::TWO;

/// Exponential moving average with smoothing factor `2 / (period + 1)`.
///
/// The recursion is seeded with the first value and always starts from the first value, but
/// outputs are withheld until `period` values have been observed.
#[derive(Debug, Clone)]
pub struct ExponentialMovingAverage {
    period: usize,
    multiplier: Decimal,
    value: Option<Decimal>,
    observed: usize,
}

impl ExponentialMovingAverage {
    /// Create a new EMA with the given period.
    pub fn new(period: usize) -> Result<Self, TaError> {
        if period == 0 {
            return Err(TaError::InvalidPeriod(period));
        }

        Ok(Self {
            period,
            multiplier: Decimal::TWO / (Decimal::from(period) + Decimal::ONE),
            value: None,
            observed: 0,
        })
    }

    /// Update the EMA with a new price and return the latest value, if warmed up.
    pub fn update(&mut self, price: Decimal) -> Option<Decimal> {
        let next = match self.value {
            Some(value) => (price - value) * self.multiplier + value,
            None => price,
        };
        self.value = Some(next);
        self.observed += 1;
        self.value()
    }

    /// Current EMA value if warmed up.
    pub fn value(&self) -> Option<Decimal> {
        self.value.filter(|_| self.observed >= self.period)
    }
}

/// Simple moving average over a fixed window.
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    period: usize,
    window: VecDeque<Decimal>,
    sum: Decimal,
}

impl SimpleMovingAverage {
    /// Create a new SMA with the given period.
    pub fn new(period: usize) -> Result<Self, TaError> {
        if period == 0 {
            return Err(TaError::InvalidPeriod(period));
        }

        Ok(Self {
            period,
            window: VecDeque::new(),
            sum: Decimal::ZERO,
        })
    }

    /// Update the SMA with a new value and return the latest average, if the window is full.
    pub fn update(&mut self, value: Decimal) -> Option<Decimal> {
        self.window.push_back(value);
        self.sum += value;
        if self.window.len() > self.period {
            if let Some(old) = self.window.pop_front() {
                self.sum -= old;
            }
        }
        self.value()
    }

    /// Current average, if the window is full.
    pub fn value(&self) -> Option<Decimal> {
        (self.window.len() == self.period).then(|| self.sum / Decimal::from(self.period))
    }
}

/// Rolling sample standard deviation (`n - 1` denominator) over a fixed window.
#[derive(Debug, Clone)]
pub struct StandardDeviation {
    period: usize,
    window: VecDeque<Decimal>,
}

impl StandardDeviation {
    /// Create a new rolling standard deviation. Sample variance needs at least two values.
    pub fn new(period: usize) -> Result<Self, TaError> {
        if period < 2 {
            return Err(TaError::InvalidPeriod(period));
        }

        Ok(Self {
            period,
            window: VecDeque::new(),
        })
    }

    /// Update with a new value and return the latest standard deviation, if the window is full.
    pub fn update(&mut self, value: Decimal) -> Option<Decimal> {
        self.window.push_back(value);
        if self.window.len() > self.period {
            self.window.pop_front();
        }
        self.value()
    }

    /// Current standard deviation, if the window is full.
    pub fn value(&self) -> Option<Decimal> {
        if self.window.len() < self.period {
            return None;
        }

        let count = Decimal::from(self.period);
        let mean = self.window.iter().sum::<Decimal>() / count;
        let squares = self
            .window
            .iter()
            .map(|value| (*value - mean) * (*value - mean))
            .sum::<Decimal>();

        (squares / (count - Decimal::ONE)).sqrt()
    }
}

/// Bollinger Band values at a single index.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Bands {
    pub upper: Decimal,
    pub middle: Decimal,
    pub lower: Decimal,
}

/// Bollinger Bands: SMA middle band, upper & lower bands `multiplier` standard deviations away.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    multiplier: Decimal,
    sma: SimpleMovingAverage,
    deviation: StandardDeviation,
}

impl BollingerBands {
    pub fn new(period: usize, multiplier: Decimal) -> Result<Self, TaError> {
        Ok(Self {
            multiplier,
            sma: SimpleMovingAverage::new(period)?,
            deviation: StandardDeviation::new(period)?,
        })
    }

    /// Update with a new close and return the latest [`Bands`], if the window is full.
    pub fn update(&mut self, close: Decimal) -> Option<Bands> {
        let middle = self.sma.update(close);
        let deviation = self.deviation.update(close);
        let (middle, deviation) = middle.zip(deviation)?;
        let width = deviation * self.multiplier;

        Some(Bands {
            upper: middle + width,
            middle,
            lower: middle - width,
        })
    }
}

/// Relative Strength Index using Wilder style smoothing (`alpha = 1 / period`), seeded with the
/// first price change.
///
/// Undefined until `period` price changes have been observed. Reports exactly 100 when the
/// average loss is zero.
#[derive(Debug, Clone)]
pub struct RelativeStrengthIndex {
    period: usize,
    alpha: Decimal,
    previous: Option<Decimal>,
    average_gain: Decimal,
    average_loss: Decimal,
    changes: usize,
}

impl RelativeStrengthIndex {
    pub fn new(period: usize) -> Result<Self, TaError> {
        if period == 0 {
            return Err(TaError::InvalidPeriod(period));
        }

        Ok(Self {
            period,
            alpha: Decimal::ONE / Decimal::from(period),
            previous: None,
            average_gain: Decimal::ZERO,
            average_loss: Decimal::ZERO,
            changes: 0,
        })
    }

    /// Update with a new close and return the latest RSI, if warmed up.
    pub fn update(&mut self, close: Decimal) -> Option<Decimal> {
        let previous = self.previous.replace(close)?;

        let change = close - previous;
        let gain = change.max(Decimal::ZERO);
        let loss = (-change).max(Decimal::ZERO);

        if self.changes == 0 {
            self.average_gain = gain;
            self.average_loss = loss;
        } else {
            self.average_gain += (gain - self.average_gain) * self.alpha;
            self.average_loss += (loss - self.average_loss) * self.alpha;
        }
        self.changes += 1;

        self.value()
    }

    /// Current RSI, if warmed up.
    pub fn value(&self) -> Option<Decimal> {
        if self.changes < self.period {
            return None;
        }

        // Zero (or vanishingly small) average loss saturates the index
        let rsi = self
            .average_gain
            .checked_div(self.average_loss)
            .and_then(|strength| strength.checked_add(Decimal::ONE))
            .and_then(|divisor| HUNDRED.checked_div(divisor))
            .map_or(HUNDRED, |fraction| HUNDRED - fraction);

        Some(rsi)
    }
}

/// EMA for every value, aligned positionally with the input.
pub fn ema_series(values: &[Decimal], period: usize) -> Result<Vec<Option<Decimal>>, TaError> {
    let mut ema = ExponentialMovingAverage::new(period)?;
    Ok(values.iter().map(|value| ema.update(*value)).collect())
}

/// SMA for every value, aligned positionally with the input.
pub fn sma_series(values: &[Decimal], period: usize) -> Result<Vec<Option<Decimal>>, TaError> {
    let mut sma = SimpleMovingAverage::new(period)?;
    Ok(values.iter().map(|value| sma.update(*value)).collect())
}

/// Rolling sample standard deviation for every value, aligned positionally with the input.
pub fn stddev_series(values: &[Decimal], period: usize) -> Result<Vec<Option<Decimal>>, TaError> {
    let mut deviation = StandardDeviation::new(period)?;
    Ok(values.iter().map(|value| deviation.update(*value)).collect())
}

/// Bollinger [`Bands`] for every value, aligned positionally with the input.
pub fn bollinger_series(
    values: &[Decimal],
    period: usize,
    multiplier: Decimal,
) -> Result<Vec<Option<Bands>>, TaError> {
    let mut bands = BollingerBands::new(period, multiplier)?;
    Ok(values.iter().map(|value| bands.update(*value)).collect())
}

/// RSI for every value, aligned positionally with the input.
pub fn rsi_series(values: &[Decimal], period: usize) -> Result<Vec<Option<Decimal>>, TaError> {
    let mut rsi = RelativeStrengthIndex::new(period)?;
    Ok(values.iter().map(|value| rsi.update(*value)).collect())
}

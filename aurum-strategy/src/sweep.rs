use crate::{
    detector::{Detector, Feed, Market},
    kind::StrategyKind,
    signal::{Direction, Signal},
};
use aurum_ta::{
    candle::{Candle, Timeframe},
    error::TaError,
    indicators::ExponentialMovingAverage,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Timeframe liquidity sweeps are detected on.
pub const SWEEP_TIMEFRAME: Timeframe = Timeframe::M15;

/// Timeframe the [`ConfluenceSweep`] imbalance gap is confirmed on.
pub const CONFIRMATION_TIMEFRAME: Timeframe = Timeframe::M5;

/// Number of confirmation candles fetched for a [`ConfluenceSweep`].
pub const CONFIRMATION_CANDLES: u16 = 15;

/// Configuration shared by the liquidity sweep detectors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SweepConfig {
    /// Closed candles preceding the sweep candle that define the liquidity range.
    pub lookback: usize,
    /// Trend filter EMA period.
    pub ema_period: usize,
    /// Minimum risk/reward ratio (inclusive).
    pub rr_minimum: Decimal,
    /// Distance beyond the sweep wick the stop loss is placed.
    pub stop_buffer: Decimal,
    /// Number of sweep timeframe candles fetched every cycle.
    pub candles: u16,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            lookback: 50,
            ema_period: 200,
            rr_minimum: Decimal::new(15, 1),
            stop_buffer: Decimal::new(250, 2),
            candles: 250,
        }
    }
}

impl SweepConfig {
    /// Minimum number of closed candles required to evaluate a sweep.
    pub fn min_closed(&self) -> usize {
        self.ema_period.max(self.lookback.saturating_add(1))
    }

    fn validate(&self) -> Result<(), TaError> {
        if self.lookback == 0 || self.lookback.checked_add(1).is_none() {
            return Err(TaError::InvalidPeriod(self.lookback));
        }
        ExponentialMovingAverage::new(self.ema_period).map(|_| ())
    }

    fn feed(&self) -> Feed {
        // Always fetch enough candles to satisfy the minimum, plus the forming candle
        let required = u16::try_from(self.min_closed().saturating_add(1)).unwrap_or(u16::MAX);
        Feed::new(SWEEP_TIMEFRAME, self.candles.max(required))
    }
}

/// Last closed candle wicking through a liquidity pool, in the direction of the trend.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LiquiditySweep {
    pub direction: Direction,
    pub candle: Candle,
    pub swing_high: Decimal,
    pub swing_low: Decimal,
}

impl LiquiditySweep {
    /// Stop loss beyond the sweep wick.
    pub fn stop_loss(&self, buffer: Decimal) -> Decimal {
        match self.direction {
            Direction::Short => self.candle.high + buffer,
            Direction::Long => self.candle.low - buffer,
        }
    }

    /// Opposing liquidity pool.
    pub fn take_profit(&self) -> Decimal {
        match self.direction {
            Direction::Short => self.swing_low,
            Direction::Long => self.swing_high,
        }
    }
}

/// Find sweeps of the last closed candle that agree with the EMA trend filter, bearish first.
pub fn find_sweeps(closed: &[Candle], config: &SweepConfig) -> Result<Vec<LiquiditySweep>, TaError> {
    let required = config.min_closed();
    let insufficient = TaError::InsufficientData {
        required,
        available: closed.len(),
    };

    if closed.len() < required {
        return Err(insufficient);
    }

    let Some((last, history)) = closed.split_last() else {
        return Err(insufficient);
    };

    let range = &history[history.len() - config.lookback..];
    let (Some(swing_high), Some(swing_low)) = (
        range.iter().map(|candle| candle.high).max(),
        range.iter().map(|candle| candle.low).min(),
    ) else {
        return Err(insufficient);
    };

    let mut ema = ExponentialMovingAverage::new(config.ema_period)?;
    let Some(trend) = closed.iter().map(|candle| ema.update(candle.close)).last().flatten() else {
        return Err(insufficient);
    };

    let mut sweeps = Vec::with_capacity(2);

    if last.high > swing_high && last.close < swing_high {
        if last.close < trend {
            sweeps.push(LiquiditySweep {
                direction: Direction::Short,
                candle: *last,
                swing_high,
                swing_low,
            });
        } else {
            debug!(%swing_high, %trend, close = %last.close, "bearish sweep against the trend");
        }
    }

    if last.low < swing_low && last.close > swing_low {
        if last.close > trend {
            sweeps.push(LiquiditySweep {
                direction: Direction::Long,
                candle: *last,
                swing_high,
                swing_low,
            });
        } else {
            debug!(%swing_low, %trend, close = %last.close, "bullish sweep against the trend");
        }
    }

    Ok(sweeps)
}

/// Entry at the edge of a three candle imbalance gap confirming the `direction`, if present.
///
/// Bearish: `c1.low > c3.high` with a red `c3`, entry at `c3.high`. Bullish: `c1.high < c3.low`
/// with a green `c3`, entry at `c3.low`.
pub fn imbalance_entry(direction: Direction, c1: &Candle, c3: &Candle) -> Option<Decimal> {
    match direction {
        Direction::Short if c1.low > c3.high && c3.is_bearish() => Some(c3.high),
        Direction::Long if c1.high < c3.low && c3.is_bullish() => Some(c3.low),
        _ => None,
    }
}

fn passes_risk_reward(signal: &Signal, config: &SweepConfig) -> bool {
    let passes = signal.risk_reward >= config.rr_minimum;
    if !passes {
        debug!(
            direction = %signal.direction,
            risk_reward = %signal.risk_reward,
            rr_minimum = %config.rr_minimum,
            "sweep rejected by risk/reward gate"
        );
    }
    passes
}

/// Liquidity sweep entered at the close of the sweep candle.
#[derive(Debug, Clone)]
pub struct DirectSweep {
    config: SweepConfig,
}

impl DirectSweep {
    pub fn new(config: SweepConfig) -> Result<Self, TaError> {
        config.validate()?;
        Ok(Self { config })
    }
}

impl Detector for DirectSweep {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DirectSweep
    }

    fn feeds(&self) -> Vec<Feed> {
        vec![self.config.feed()]
    }

    fn evaluate(&self, market: &Market) -> Result<Option<Signal>, TaError> {
        let closed = market
            .series(SWEEP_TIMEFRAME)?
            .require_closed(self.config.min_closed())?;

        let signal = find_sweeps(closed, &self.config)?
            .into_iter()
            .map(|sweep| {
                Signal::new(
                    self.kind(),
                    sweep.direction,
                    sweep.candle.close,
                    sweep.stop_loss(self.config.stop_buffer),
                    sweep.take_profit(),
                    sweep.candle.time,
                )
            })
            .find(|signal| passes_risk_reward(signal, &self.config));

        Ok(signal)
    }
}

/// Liquidity sweep confirmed by a faster timeframe imbalance gap, entered at the gap edge.
#[derive(Debug, Clone)]
pub struct ConfluenceSweep {
    config: SweepConfig,
}

impl ConfluenceSweep {
    pub fn new(config: SweepConfig) -> Result<Self, TaError> {
        config.validate()?;
        Ok(Self { config })
    }
}

impl Detector for ConfluenceSweep {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ConfluenceSweep
    }

    fn feeds(&self) -> Vec<Feed> {
        vec![
            self.config.feed(),
            Feed::new(CONFIRMATION_TIMEFRAME, CONFIRMATION_CANDLES),
        ]
    }

    fn evaluate(&self, market: &Market) -> Result<Option<Signal>, TaError> {
        let closed = market
            .series(SWEEP_TIMEFRAME)?
            .require_closed(self.config.min_closed())?;

        let [.., c1, _, c3] = market.series(CONFIRMATION_TIMEFRAME)?.require_closed(3)? else {
            return Ok(None);
        };

        let signal = find_sweeps(closed, &self.config)?
            .into_iter()
            .filter_map(|sweep| {
                let entry = imbalance_entry(sweep.direction, c1, c3)?;
                Some(Signal::new(
                    self.kind(),
                    sweep.direction,
                    entry,
                    sweep.stop_loss(self.config.stop_buffer),
                    sweep.take_profit(),
                    c3.time,
                ))
            })
            .find(|signal| passes_risk_reward(signal, &self.config));

        Ok(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurum_ta::candle::CandleSeries;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn config() -> SweepConfig {
        SweepConfig {
            lookback: 5,
            ema_period: 10,
            rr_minimum: dec!(1.5),
            stop_buffer: dec!(2.5),
            candles: 12,
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
    }

    fn series(timeframe: Timeframe, bars: &[[Decimal; 4]]) -> CandleSeries {
        let candles = bars
            .iter()
            .chain(std::iter::once(&bars[bars.len() - 1]))
            .enumerate()
            .map(|(index, [open, high, low, close])| {
                Candle::new(
                    start() + timeframe.period() * index as i32,
                    *open,
                    *high,
                    *low,
                    *close,
                    dec!(1),
                )
            })
            .collect();

        CandleSeries::new(timeframe, candles).unwrap()
    }

    fn mirror(bars: &[[Decimal; 4]]) -> Vec<[Decimal; 4]> {
        let axis = dec!(4000);
        bars.iter()
            .map(|[open, high, low, close]| [axis - open, axis - low, axis - high, axis - close])
            .collect()
    }

    /// Five trend candles at `trend_close`, five range candles (swing high 2010, swing low
    /// `swing_low`), then the sweep candle.
    fn sweep_bars(trend_close: Decimal, swing_low: Decimal, sweep: [Decimal; 4]) -> Vec<[Decimal; 4]> {
        let trend = [trend_close, trend_close + dec!(1), trend_close - dec!(1), trend_close];
        let range = [dec!(2004), dec!(2008), dec!(2001.5), dec!(2005)];

        let mut bars = vec![trend; 5];
        bars.extend([range; 5]);
        bars[6][1] = dec!(2010);
        bars[8][2] = swing_low;
        bars.push(sweep);
        bars
    }

    const SWEEP_SHORT: [Decimal; 4] = [dec!(2009), dec!(2012), dec!(2007), dec!(2008.5)];

    #[test]
    fn test_direct_sweep_directionality() {
        let detector = DirectSweep::new(config()).unwrap();

        // EMA(10) at the sweep candle is ~2013.1, above the 2008.50 close
        let bars = sweep_bars(dec!(2030), dec!(1995), SWEEP_SHORT);

        let short = detector
            .evaluate(&Market::new([series(Timeframe::M15, &bars)]))
            .unwrap()
            .unwrap();

        assert_eq!(short.direction, Direction::Short);
        assert_eq!(short.entry, dec!(2008.5));
        assert_eq!(short.stop_loss, dec!(2014.5));
        assert_eq!(short.take_profit, dec!(1995));
        assert_eq!(short.risk_reward, dec!(2.25));
        assert_eq!(short.time, start() + TimeDelta::minutes(150));
        assert_eq!(short.strategy, StrategyKind::DirectSweep);

        let long = detector
            .evaluate(&Market::new([series(Timeframe::M15, &mirror(&bars))]))
            .unwrap()
            .unwrap();

        assert_eq!(long.direction, Direction::Long);
        assert_eq!(long.entry, dec!(1991.5));
        assert_eq!(long.stop_loss, dec!(1985.5));
        assert_eq!(long.take_profit, dec!(2005));
        assert_eq!(long.risk_reward, dec!(2.25));
    }

    #[test]
    fn test_direct_sweep_gates() {
        struct TestCase {
            config: SweepConfig,
            bars: Vec<[Decimal; 4]>,
            expected: Option<Direction>,
        }

        let tests = vec![
            TestCase {
                // TC0: R:R of 1.2 is below the 1.5 minimum
                config: config(),
                bars: sweep_bars(dec!(2030), dec!(2001.3), SWEEP_SHORT),
                expected: None,
            },
            TestCase {
                // TC1: R:R gate is inclusive
                config: SweepConfig {
                    rr_minimum: dec!(1.2),
                    ..config()
                },
                bars: sweep_bars(dec!(2030), dec!(2001.3), SWEEP_SHORT),
                expected: Some(Direction::Short),
            },
            TestCase {
                // TC2: bearish sweep while price is above the EMA
                config: config(),
                bars: sweep_bars(dec!(1990), dec!(1995), SWEEP_SHORT),
                expected: None,
            },
            TestCase {
                // TC3: wick through the swing high that also closes above it
                config: config(),
                bars: sweep_bars(
                    dec!(2030),
                    dec!(1995),
                    [dec!(2009), dec!(2012), dec!(2007), dec!(2011)],
                ),
                expected: None,
            },
            TestCase {
                // TC4: outside bar sweeping both pools resolves to the bearish setup
                config: config(),
                bars: sweep_bars(
                    dec!(2030),
                    dec!(1995),
                    [dec!(2009), dec!(2012), dec!(1993), dec!(2008.5)],
                ),
                expected: Some(Direction::Short),
            },
            TestCase {
                // TC5: no sweep inside the range
                config: config(),
                bars: sweep_bars(
                    dec!(2030),
                    dec!(1995),
                    [dec!(2004), dec!(2009), dec!(2003), dec!(2008.5)],
                ),
                expected: None,
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let market = Market::new([series(Timeframe::M15, &test.bars)]);
            let actual = DirectSweep::new(test.config)
                .unwrap()
                .evaluate(&market)
                .unwrap()
                .map(|signal| signal.direction);
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_direct_sweep_insufficient_data() {
        let bars = sweep_bars(dec!(2030), dec!(1995), SWEEP_SHORT);

        // Drop the oldest candle: 10 closed candles are required
        let market = Market::new([series(Timeframe::M15, &bars[2..])]);
        let actual = DirectSweep::new(config()).unwrap().evaluate(&market);

        assert_eq!(
            actual,
            Err(TaError::InsufficientData {
                required: 10,
                available: 9
            })
        );

        let actual = DirectSweep::new(config()).unwrap().evaluate(&Market::default());
        assert!(matches!(actual, Err(TaError::InsufficientData { .. })));
    }

    #[test]
    fn test_confluence_sweep() {
        let detector = ConfluenceSweep::new(config()).unwrap();
        let primary = sweep_bars(dec!(2030), dec!(1995), SWEEP_SHORT);

        let c1 = [dec!(2012), dec!(2013), dec!(2011), dec!(2012.5)];
        let c2 = [dec!(2011), dec!(2011.5), dec!(2008), dec!(2008.5)];
        let gap = [dec!(2009.5), dec!(2010), dec!(2006), dec!(2006.5)];
        let overlap = [dec!(2009.5), dec!(2011.5), dec!(2006), dec!(2006.5)];

        let market = Market::new([
            series(Timeframe::M15, &primary),
            series(Timeframe::M5, &[c1, c2, gap]),
        ]);
        let short = detector.evaluate(&market).unwrap().unwrap();

        assert_eq!(short.direction, Direction::Short);
        assert_eq!(short.entry, dec!(2010));
        assert_eq!(short.stop_loss, dec!(2014.5));
        assert_eq!(short.take_profit, dec!(1995));
        assert_eq!(short.risk_reward, dec!(3.33));
        assert_eq!(short.time, start() + TimeDelta::minutes(10));
        assert_eq!(short.strategy, StrategyKind::ConfluenceSweep);

        let market = Market::new([
            series(Timeframe::M15, &mirror(&primary)),
            series(Timeframe::M5, &mirror(&[c1, c2, gap])),
        ]);
        let long = detector.evaluate(&market).unwrap().unwrap();

        assert_eq!(long.direction, Direction::Long);
        assert_eq!(long.entry, dec!(1990));

        let market = Market::new([
            series(Timeframe::M15, &primary),
            series(Timeframe::M5, &[c1, c2, overlap]),
        ]);
        assert_eq!(detector.evaluate(&market), Ok(None));

        let market = Market::new([
            series(Timeframe::M15, &primary),
            series(Timeframe::M5, &[c2, gap]),
        ]);
        assert_eq!(
            detector.evaluate(&market),
            Err(TaError::InsufficientData {
                required: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_sweep_feeds() {
        let detector = ConfluenceSweep::new(SweepConfig::default()).unwrap();

        assert_eq!(
            detector.feeds(),
            vec![
                Feed::new(Timeframe::M15, 250),
                Feed::new(Timeframe::M5, CONFIRMATION_CANDLES),
            ]
        );

        let long_ema = SweepConfig {
            ema_period: 300,
            ..SweepConfig::default()
        };
        assert_eq!(
            DirectSweep::new(long_ema).unwrap().feeds(),
            vec![Feed::new(Timeframe::M15, 301)]
        );

        assert_eq!(
            DirectSweep::new(SweepConfig {
                lookback: 0,
                ..SweepConfig::default()
            })
            .map(|_| ()),
            Err(TaError::InvalidPeriod(0))
        );
    }

    #[test]
    fn test_sweep_rejects_unbounded_lookback() {
        let config = SweepConfig {
            lookback: usize::MAX,
            ..SweepConfig::default()
        };

        assert_eq!(config.min_closed(), usize::MAX);
        assert_eq!(
            DirectSweep::new(config).map(|_| ()),
            Err(TaError::InvalidPeriod(usize::MAX))
        );
        assert_eq!(
            ConfluenceSweep::new(config).map(|_| ()),
            Err(TaError::InvalidPeriod(usize::MAX))
        );
    }
}

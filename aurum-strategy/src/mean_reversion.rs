use crate::{
    detector::{Detector, Feed, Market},
    kind::StrategyKind,
    signal::{Direction, Signal},
};
use aurum_ta::{
    candle::Timeframe,
    error::TaError,
    indicators::{BollingerBands, DEFAULT_BOLLINGER_MULTIPLIER, RelativeStrengthIndex},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Timeframe mean-reversion scalps are detected on.
pub const SCALP_TIMEFRAME: Timeframe = Timeframe::M5;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MeanReversionConfig {
    pub bb_period: usize,
    pub bb_multiplier: Decimal,
    pub rsi_period: usize,
    /// RSI a short setup must exceed.
    pub rsi_overbought: Decimal,
    /// RSI a long setup must be below.
    pub rsi_oversold: Decimal,
    /// Distance beyond the rejection wicks the stop loss is placed.
    pub stop_buffer: Decimal,
    /// Entry to target distance a setup must exceed.
    pub min_move: Decimal,
    /// Number of candles fetched every cycle.
    pub candles: u16,
}

impl Default for MeanReversionConfig {
    fn default() -> Self {
        Self {
            bb_period: 20,
            bb_multiplier: DEFAULT_BOLLINGER_MULTIPLIER,
            rsi_period: 14,
            rsi_overbought: Decimal::from(60),
            rsi_oversold: Decimal::from(40),
            stop_buffer: Decimal::ONE,
            min_move: Decimal::new(80, 2),
            candles: 100,
        }
    }
}

impl MeanReversionConfig {
    /// Minimum number of closed candles required: both the previous & current candle need
    /// defined bands, the current candle needs a defined RSI.
    pub fn min_closed(&self) -> usize {
        self.bb_period.max(self.rsi_period).saturating_add(1)
    }
}

/// Band overshoot by the previous candle, rejected by the current candle closing back inside
/// the band, with RSI confirming the stretch. Targets the middle band.
#[derive(Debug, Clone)]
pub struct MeanReversion {
    config: MeanReversionConfig,
}

impl MeanReversion {
    pub fn new(config: MeanReversionConfig) -> Result<Self, TaError> {
        BollingerBands::new(config.bb_period, config.bb_multiplier)?;
        RelativeStrengthIndex::new(config.rsi_period)?;
        Ok(Self { config })
    }
}

impl Detector for MeanReversion {
    fn kind(&self) -> StrategyKind {
        StrategyKind::MeanReversion
    }

    fn feeds(&self) -> Vec<Feed> {
        let required = u16::try_from(self.config.min_closed().saturating_add(1)).unwrap_or(u16::MAX);
        vec![Feed::new(SCALP_TIMEFRAME, self.config.candles.max(required))]
    }

    fn evaluate(&self, market: &Market) -> Result<Option<Signal>, TaError> {
        let required = self.config.min_closed();
        let closed = market.series(SCALP_TIMEFRAME)?.require_closed(required)?;
        let insufficient = TaError::InsufficientData {
            required,
            available: closed.len(),
        };

        let mut bands = BollingerBands::new(self.config.bb_period, self.config.bb_multiplier)?;
        let mut rsi = RelativeStrengthIndex::new(self.config.rsi_period)?;
        let indicators = closed
            .iter()
            .map(|candle| (bands.update(candle.close), rsi.update(candle.close)))
            .collect::<Vec<_>>();

        let ([.., prev, curr], [.., (Some(prev_bands), _), (Some(curr_bands), Some(curr_rsi))]) =
            (closed, indicators.as_slice())
        else {
            return Err(insufficient);
        };

        let setup = if prev.high > prev_bands.upper
            && curr.is_bearish()
            && curr.close < curr_bands.upper
            && *curr_rsi > self.config.rsi_overbought
        {
            Some((Direction::Short, prev.high.max(curr.high) + self.config.stop_buffer))
        } else if prev.low < prev_bands.lower
            && curr.is_bullish()
            && curr.close > curr_bands.lower
            && *curr_rsi < self.config.rsi_oversold
        {
            Some((Direction::Long, prev.low.min(curr.low) - self.config.stop_buffer))
        } else {
            None
        };

        let Some((direction, stop_loss)) = setup else {
            return Ok(None);
        };

        let entry = curr.close;
        let target = curr_bands.middle;
        if (entry - target).abs() <= self.config.min_move {
            debug!(
                %direction,
                %entry,
                %target,
                min_move = %self.config.min_move,
                "band rejection too close to the mean"
            );
            return Ok(None);
        }

        Ok(Some(Signal::new(
            self.kind(),
            direction,
            entry,
            stop_loss,
            target,
            curr.time,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::risk_reward;
    use aurum_ta::{
        candle::{Candle, CandleSeries},
        indicators::{bollinger_series, rsi_series, sma_series},
    };
    use chrono::{TimeDelta, TimeZone, Utc};
    use rust_decimal_macros::dec;

    /// Forty candles climbing 0.50 per candle to a 2020 close, an upper band wick to 2023, then a
    /// red candle from 2020.50 to 2019.
    fn overshoot_bars() -> Vec<[Decimal; 4]> {
        let mut bars = (0..40)
            .map(|index| {
                let close = dec!(2000) + Decimal::from(index) * dec!(0.5);
                [close - dec!(0.5), close + dec!(0.25), close - dec!(0.75), close]
            })
            .collect::<Vec<_>>();

        bars.push([dec!(2019.5), dec!(2023), dec!(2019.3), dec!(2020)]);
        bars.push([dec!(2020.5), dec!(2021), dec!(2018.8), dec!(2019)]);
        bars
    }

    fn mirror(bars: &[[Decimal; 4]]) -> Vec<[Decimal; 4]> {
        let axis = dec!(4000);
        bars.iter()
            .map(|[open, high, low, close]| [axis - open, axis - low, axis - high, axis - close])
            .collect()
    }

    fn market(bars: &[[Decimal; 4]]) -> Market {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let candles = bars
            .iter()
            .chain(std::iter::once(&bars[bars.len() - 1]))
            .enumerate()
            .map(|(index, [open, high, low, close])| {
                Candle::new(
                    start + TimeDelta::minutes(5 * index as i64),
                    *open,
                    *high,
                    *low,
                    *close,
                    dec!(1),
                )
            })
            .collect();

        Market::new([CandleSeries::new(SCALP_TIMEFRAME, candles).unwrap()])
    }

    fn middle_band(bars: &[[Decimal; 4]]) -> Decimal {
        let closes = bars.iter().map(|[.., close]| *close).collect::<Vec<_>>();
        sma_series(&closes, 20).unwrap().last().copied().flatten().unwrap()
    }

    #[test]
    fn test_mean_reversion_short() {
        let bars = overshoot_bars();
        let detector = MeanReversion::new(MeanReversionConfig::default()).unwrap();

        let actual = detector.evaluate(&market(&bars)).unwrap().unwrap();

        let target = middle_band(&bars);
        assert_eq!(actual.direction, Direction::Short);
        assert_eq!(actual.entry, dec!(2019));
        assert_eq!(actual.take_profit, target);
        assert_eq!(actual.stop_loss, dec!(2024));
        assert_eq!(actual.risk_reward, risk_reward(dec!(2019), dec!(2024), target));
        assert_eq!(
            actual.time,
            Utc.with_ymd_and_hms(2024, 5, 1, 3, 25, 0).unwrap()
        );
        assert_eq!(actual.strategy, StrategyKind::MeanReversion);
    }

    #[test]
    fn test_mean_reversion_long() {
        let bars = mirror(&overshoot_bars());
        let detector = MeanReversion::new(MeanReversionConfig::default()).unwrap();

        let actual = detector.evaluate(&market(&bars)).unwrap().unwrap();

        assert_eq!(actual.direction, Direction::Long);
        assert_eq!(actual.entry, dec!(1981));
        assert_eq!(actual.take_profit, middle_band(&bars));
        assert_eq!(actual.stop_loss, dec!(1976));
    }

    #[test]
    fn test_mean_reversion_gates() {
        struct TestCase {
            config: MeanReversionConfig,
            bars: Vec<[Decimal; 4]>,
            expected: Result<Option<Direction>, TaError>,
        }

        let no_wick = {
            let mut bars = overshoot_bars();
            bars[40][1] = dec!(2020.25);
            bars
        };

        let green = {
            let mut bars = overshoot_bars();
            bars[41] = [dec!(2019), dec!(2021), dec!(2018.8), dec!(2020.5)];
            bars
        };

        let tests = vec![
            TestCase {
                // TC0: entry to target distance must exceed the minimum move
                config: MeanReversionConfig {
                    min_move: dec!(3.5),
                    ..MeanReversionConfig::default()
                },
                bars: overshoot_bars(),
                expected: Ok(None),
            },
            TestCase {
                // TC1: RSI must exceed the overbought threshold
                config: MeanReversionConfig {
                    rsi_overbought: dec!(90),
                    ..MeanReversionConfig::default()
                },
                bars: overshoot_bars(),
                expected: Ok(None),
            },
            TestCase {
                // TC2: previous candle must overshoot the upper band
                config: MeanReversionConfig::default(),
                bars: no_wick,
                expected: Ok(None),
            },
            TestCase {
                // TC3: current candle must reject (close red)
                config: MeanReversionConfig::default(),
                bars: green,
                expected: Ok(None),
            },
            TestCase {
                // TC4: exactly the minimum number of closed candles
                config: MeanReversionConfig::default(),
                bars: overshoot_bars()[21..].to_vec(),
                expected: Ok(Some(Direction::Short)),
            },
            TestCase {
                // TC5: one candle short of the minimum
                config: MeanReversionConfig::default(),
                bars: overshoot_bars()[22..].to_vec(),
                expected: Err(TaError::InsufficientData {
                    required: 21,
                    available: 20,
                }),
            },
            TestCase {
                // TC6: slow RSI dominates the requirement, current candle only needs its changes
                config: MeanReversionConfig {
                    rsi_period: 25,
                    ..MeanReversionConfig::default()
                },
                bars: overshoot_bars()[17..].to_vec(),
                expected: Err(TaError::InsufficientData {
                    required: 26,
                    available: 25,
                }),
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = MeanReversion::new(test.config)
                .unwrap()
                .evaluate(&market(&test.bars))
                .map(|signal| signal.map(|signal| signal.direction));
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_mean_reversion_min_closed() {
        assert_eq!(MeanReversionConfig::default().min_closed(), 21);
        assert_eq!(
            MeanReversionConfig {
                rsi_period: 25,
                ..MeanReversionConfig::default()
            }
            .min_closed(),
            26
        );
        assert_eq!(
            MeanReversion::new(MeanReversionConfig::default())
                .unwrap()
                .feeds(),
            vec![Feed::new(Timeframe::M5, 100)]
        );
    }

    #[test]
    fn test_mean_reversion_upper_band_rejection() {
        // Choppy climb of 0.50 per candle alternating one point either side, ending at 2018.50
        let mut bars = (0..40)
            .map(|index| {
                let swing = if index % 2 == 1 { dec!(1) } else { dec!(-1) };
                let close = dec!(1998) + Decimal::from(index) * dec!(0.5) + swing;
                [close, close + dec!(0.5), close - dec!(0.5), close]
            })
            .collect::<Vec<_>>();
        bars.push([dec!(2019.5), dec!(2021), dec!(2019.5), dec!(2020)]);
        bars.push([dec!(2020.5), dec!(2020.75), dec!(2018.8), dec!(2019)]);

        let closes = bars.iter().map(|[.., close]| *close).collect::<Vec<_>>();
        let bands = bollinger_series(&closes, 20, DEFAULT_BOLLINGER_MULTIPLIER).unwrap();
        let rsi = rsi_series(&closes, 14).unwrap();
        let prev_bands = bands[40].unwrap();
        let curr_bands = bands[41].unwrap();
        let curr_rsi = rsi[41].unwrap();

        // Previous candle wicks through the upper band, current closes back inside it
        assert_eq!(prev_bands.upper.round_dp(2), dec!(2020.01));
        assert_eq!(prev_bands.middle, dec!(2013.4));
        assert!(bars[40][1] > prev_bands.upper);
        assert_eq!(curr_bands.upper.round_dp(2), dec!(2020.66));
        assert_eq!(curr_bands.middle, dec!(2013.875));
        assert!(bars[41][3] < curr_bands.upper);
        assert_eq!(curr_rsi.round_dp(2), dec!(66.07));
        assert!(curr_rsi > dec!(60));

        let detector = MeanReversion::new(MeanReversionConfig::default()).unwrap();
        let actual = detector.evaluate(&market(&bars)).unwrap().unwrap();

        assert_eq!(actual.direction, Direction::Short);
        assert_eq!(actual.entry, dec!(2019));
        assert_eq!(actual.stop_loss, dec!(2022));
        assert_eq!(actual.take_profit, dec!(2013.875));
        assert_eq!(
            actual.risk_reward,
            risk_reward(dec!(2019), dec!(2022), dec!(2013.875))
        );
        assert_eq!(actual.risk_reward.round_dp(2), dec!(1.71));
    }
}

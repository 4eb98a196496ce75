use crate::{
    error::ConfigError,
    telegram::{BASE_URL_TELEGRAM, BotToken, ChatId},
};
use aurum_data::{
    exchange::binance::{BASE_URL_BINANCE_USD_FUTURES, MAX_KLINES_LIMIT},
    instrument::InstrumentName,
};
use aurum_strategy::{kind::StrategyKind, mean_reversion::MeanReversionConfig, sweep::SweepConfig};
use rust_decimal::Decimal;
use std::{str::FromStr, time::Duration};

/// Default instrument scanned: Binance USDⓈ-M gold perpetual.
pub const DEFAULT_INSTRUMENT: &str = "XAUUSDT";

/// Default delay between liquidity sweep scanner cycles.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Default delay between mean-reversion scanner cycles.
pub const DEFAULT_SCALP_INTERVAL: Duration = Duration::from_secs(20);

/// Default liveness server port.
pub const DEFAULT_PORT: u16 = 8080;

/// Immutable runtime configuration, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub instrument: InstrumentName,
    pub bot_token: BotToken,
    pub chat: ChatId,
    pub strategies: Vec<StrategyKind>,
    pub sweep: SweepConfig,
    pub mean_reversion: MeanReversionConfig,
    pub sweep_interval: Duration,
    pub scalp_interval: Duration,
    pub binance_base_url: String,
    pub telegram_base_url: String,
    pub port: u16,
    pub log_json: bool,
}

impl Config {
    /// Read the [`Config`] from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the [`Config`] using the provided variable lookup.
    ///
    /// Absent or blank optional variables fall back to their defaults; present but malformed
    /// values are rejected.
    pub fn from_lookup<Lookup>(lookup: Lookup) -> Result<Self, ConfigError>
    where
        Lookup: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let instrument = env
            .get("INSTRUMENT")
            .or_else(|| env.get("SYMBOL"))
            .map(InstrumentName::new)
            .unwrap_or_else(|| InstrumentName::new(DEFAULT_INSTRUMENT));

        let bot_token = BotToken::new(env.required("BOT_TOKEN")?);
        let chat = ChatId::new(env.required("CHAT_ID")?);

        let strategies = match env.get("STRATEGIES") {
            Some(value) => parse_strategies(&value)?,
            None => vec![StrategyKind::DirectSweep],
        };

        let sweep_defaults = SweepConfig::default();
        let sweep = SweepConfig {
            lookback: env.positive("LOOKBACK", sweep_defaults.lookback)?,
            ema_period: env.positive("EMA_PERIOD", sweep_defaults.ema_period)?,
            rr_minimum: env.non_negative("RR_MINIMUM", sweep_defaults.rr_minimum)?,
            stop_buffer: env.non_negative("SWEEP_STOP_BUFFER", sweep_defaults.stop_buffer)?,
            ..sweep_defaults
        };

        // Closed candles plus the forming candle must fit in a single klines request
        if sweep.min_closed().saturating_add(1) > usize::from(MAX_KLINES_LIMIT) {
            let (key, value) = if sweep.ema_period > sweep.lookback {
                ("EMA_PERIOD", sweep.ema_period)
            } else {
                ("LOOKBACK", sweep.lookback)
            };
            return Err(ConfigError::Invalid {
                key,
                value: value.to_string(),
            });
        }

        let scalp_defaults = MeanReversionConfig::default();
        let mean_reversion = MeanReversionConfig {
            stop_buffer: env.non_negative("SCALP_STOP_BUFFER", scalp_defaults.stop_buffer)?,
            min_move: env.non_negative("SCALP_MIN_MOVE", scalp_defaults.min_move)?,
            ..scalp_defaults
        };

        let sweep_interval = Duration::from_secs(
            env.positive("SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL.as_secs())?,
        );
        let scalp_interval = Duration::from_secs(
            env.positive("SCALP_INTERVAL_SECS", DEFAULT_SCALP_INTERVAL.as_secs())?,
        );

        Ok(Self {
            instrument,
            bot_token,
            chat,
            strategies,
            sweep,
            mean_reversion,
            sweep_interval,
            scalp_interval,
            binance_base_url: env.url("BINANCE_BASE_URL", BASE_URL_BINANCE_USD_FUTURES)?,
            telegram_base_url: env.url("TELEGRAM_BASE_URL", BASE_URL_TELEGRAM)?,
            port: env.parse("PORT", DEFAULT_PORT)?,
            log_json: env.flag("AURUM_LOG_JSON", false)?,
        })
    }

    /// Delay between cycles for scanners running the provided [`StrategyKind`].
    pub fn interval(&self, kind: StrategyKind) -> Duration {
        if kind.is_sweep() {
            self.sweep_interval
        } else {
            self.scalp_interval
        }
    }
}

fn parse_strategies(value: &str) -> Result<Vec<StrategyKind>, ConfigError> {
    let invalid = || ConfigError::Invalid {
        key: "STRATEGIES",
        value: value.to_owned(),
    };

    let mut strategies = Vec::new();
    for name in value.split(',').filter(|name| !name.trim().is_empty()) {
        let kind = StrategyKind::from_str(name).map_err(|_| invalid())?;
        if !strategies.contains(&kind) {
            strategies.push(kind);
        }
    }

    if strategies.is_empty() {
        return Err(invalid());
    }

    Ok(strategies)
}

struct Env<Lookup>(Lookup);

impl<Lookup> Env<Lookup>
where
    Lookup: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }

    fn parse<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
    {
        match self.get(key) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { key, value }),
            None => Ok(default),
        }
    }

    fn positive<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr + PartialOrd + Default,
    {
        let value = self.parse(key, default)?;
        if value > T::default() {
            Ok(value)
        } else {
            Err(ConfigError::Invalid {
                key,
                value: self.get(key).unwrap_or_default(),
            })
        }
    }

    fn non_negative(&self, key: &'static str, default: Decimal) -> Result<Decimal, ConfigError> {
        let value = self.parse(key, default)?;
        if value.is_sign_negative() {
            Err(ConfigError::Invalid {
                key,
                value: value.to_string(),
            })
        } else {
            Ok(value)
        }
    }

    fn flag(&self, key: &'static str, default: bool) -> Result<bool, ConfigError> {
        match self.get(key) {
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::Invalid { key, value }),
            },
            None => Ok(default),
        }
    }

    fn url(&self, key: &'static str, default: &str) -> Result<String, ConfigError> {
        let value = self.get(key).unwrap_or_else(|| default.to_owned());
        match url::Url::parse(&value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(value),
            _ => Err(ConfigError::Invalid { key, value }),
        }
    }
}

use crate::{error::NotifyError, telegram::ChatId};
use async_trait::async_trait;
use aurum_data::instrument::InstrumentName;
use aurum_strategy::{
    kind::StrategyKind,
    mean_reversion::MeanReversionConfig,
    signal::{Direction, Signal},
    sweep::SweepConfig,
};
use std::time::Duration;

/// Sink for alert text.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, chat: &ChatId, text: &str) -> Result<(), NotifyError>;
}

const SEPARATOR: &str = "-------------------------";

fn headline(kind: StrategyKind) -> &'static str {
    match kind {
        StrategyKind::DirectSweep => "GOLD SWEEP (24/7)",
        StrategyKind::ConfluenceSweep => "GOLD SWEEP + FVG (24/7)",
        StrategyKind::MeanReversion => "GOLD SCALP (24/7)",
    }
}

fn logic(kind: StrategyKind) -> &'static str {
    match kind {
        StrategyKind::DirectSweep => "15M liquidity swept and reclaimed with the 200 EMA trend.",
        StrategyKind::ConfluenceSweep => "15M liquidity swept with trend. 5M FVG formed.",
        StrategyKind::MeanReversion => "5M Bollinger Band rejection confirmed by RSI. Target: 20 SMA.",
    }
}

/// Markdown alert for a [`Signal`].
pub fn format_alert(instrument: &InstrumentName, signal: &Signal) -> String {
    let marker = match signal.direction {
        Direction::Short => "🔴",
        Direction::Long => "🟢",
    };

    format!(
        "{marker} *{headline}* {marker}\n\n\
         🪙 *Asset:* {instrument}\n\
         ⚡ *Action:* *{direction}* Limit\n\
         {SEPARATOR}\n\
         📥 *Entry Limit:* `${entry:.2}`\n\
         🛑 *Stop Loss:* `${stop_loss:.2}`\n\
         🎯 *Take Profit:* `${take_profit:.2}`\n\
         ⚖️ *R:R Ratio:* {risk_reward}R\n\
         {SEPARATOR}\n\
         📝 _Logic: {logic}_",
        headline = headline(signal.strategy),
        direction = signal.direction,
        entry = signal.entry,
        stop_loss = signal.stop_loss,
        take_profit = signal.take_profit,
        risk_reward = signal.risk_reward.normalize(),
        logic = logic(signal.strategy),
    )
}

/// Reply to the `/start` & `/status` operator commands.
pub fn format_status(
    instrument: &InstrumentName,
    strategies: &[(StrategyKind, Duration)],
    sweep: &SweepConfig,
    mean_reversion: &MeanReversionConfig,
) -> String {
    let mut reply = format!("🦅 *24/7 Gold Signal Bot Online.*\nScanning {instrument} for:");

    for (kind, interval) in strategies {
        let every = interval.as_secs();
        let line = match kind {
            StrategyKind::DirectSweep => format!(
                "• Liquidity sweeps (>={}R), every {every}s",
                sweep.rr_minimum.normalize()
            ),
            StrategyKind::ConfluenceSweep => format!(
                "• Liquidity sweeps with 5M FVG (>={}R), every {every}s",
                sweep.rr_minimum.normalize()
            ),
            StrategyKind::MeanReversion => format!(
                "• Band rejection scalps (>{} move), every {every}s",
                mean_reversion.min_move.normalize()
            ),
        };
        reply.push('\n');
        reply.push_str(&line);
    }

    reply
}

/// Static body served by the liveness endpoint.
pub fn format_liveness(instrument: &InstrumentName) -> String {
    format!("24/7 {instrument} Signal Bot is running!")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_alert() {
        let signal = Signal::new(
            StrategyKind::DirectSweep,
            Direction::Short,
            dec!(2005),
            dec!(2022.5),
            dec!(1975),
            Utc.with_ymd_and_hms(2024, 5, 3, 14, 45, 0).unwrap(),
        );

        let actual = format_alert(&InstrumentName::new("XAUUSDT"), &signal);

        let expected = "🔴 *GOLD SWEEP (24/7)* 🔴\n\n\
            🪙 *Asset:* XAUUSDT\n\
            ⚡ *Action:* *SHORT* Limit\n\
            -------------------------\n\
            📥 *Entry Limit:* `$2005.00`\n\
            🛑 *Stop Loss:* `$2022.50`\n\
            🎯 *Take Profit:* `$1975.00`\n\
            ⚖️ *R:R Ratio:* 1.71R\n\
            -------------------------\n\
            📝 _Logic: 15M liquidity swept and reclaimed with the 200 EMA trend._";

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_format_alert_long_scalp() {
        let signal = Signal::new(
            StrategyKind::MeanReversion,
            Direction::Long,
            dec!(1981),
            dec!(1976),
            dec!(1984.33),
            Utc.with_ymd_and_hms(2024, 5, 3, 14, 45, 0).unwrap(),
        );

        let actual = format_alert(&InstrumentName::new("XAUUSDT"), &signal);

        assert!(actual.starts_with("🟢 *GOLD SCALP (24/7)* 🟢"));
        assert!(actual.contains("*LONG* Limit"));
        assert!(actual.contains("`$1984.33`"));
        assert!(actual.contains("0.67R"));
    }

    #[test]
    fn test_format_status() {
        let actual = format_status(
            &InstrumentName::new("XAUUSDT"),
            &[
                (StrategyKind::DirectSweep, Duration::from_secs(60)),
                (StrategyKind::MeanReversion, Duration::from_secs(20)),
            ],
            &SweepConfig::default(),
            &MeanReversionConfig::default(),
        );

        assert_eq!(
            actual,
            "🦅 *24/7 Gold Signal Bot Online.*\nScanning XAUUSDT for:\n\
             • Liquidity sweeps (>=1.5R), every 60s\n\
             • Band rejection scalps (>0.8 move), every 20s"
        );
    }
}

use crate::{
    dedup::DedupGate,
    error::{NotifyError, ScanError},
    notify::{Notifier, format_alert},
    shutdown::Shutdown,
    telegram::ChatId,
};
use aurum_data::{instrument::InstrumentName, source::MarketDataSource};
use aurum_strategy::{
    detector::{Detector, Market},
    signal::Signal,
};
use aurum_ta::error::TaError;
use derive_more::Constructor;
use futures::future::try_join_all;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Per-scanner configuration.
#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct ScannerConfig {
    pub instrument: InstrumentName,
    pub chat: ChatId,
    /// Delay between the end of one cycle & the start of the next.
    pub interval: Duration,
}

/// Result of a single [`Scanner::run_cycle`].
#[derive(Debug)]
pub enum CycleOutcome {
    /// New [`Signal`] delivered to the [`Notifier`].
    Emitted(Signal),
    /// [`Signal`] identical to the last emitted one, not delivered again.
    Suppressed(Signal),
    NoSignal,
    InsufficientData { required: usize, available: usize },
    FetchFailure(ScanError),
    /// Delivery failed; the [`DedupGate`] was released so the alert is retried next cycle.
    NotifyFailure { signal: Signal, error: NotifyError },
}

/// Drives fetch → detect → dedup → notify cycles for one [`Detector`] on one instrument.
#[derive(Debug)]
pub struct Scanner<Source, Notify, Detect> {
    config: ScannerConfig,
    source: Source,
    notifier: Notify,
    detector: Detect,
    dedup: DedupGate,
}

impl<Source, Notify, Detect> Scanner<Source, Notify, Detect>
where
    Source: MarketDataSource,
    Notify: Notifier,
    Detect: Detector + Sync,
{
    pub fn new(config: ScannerConfig, source: Source, notifier: Notify, detector: Detect) -> Self {
        Self {
            config,
            source,
            notifier,
            detector,
            dedup: DedupGate::new(),
        }
    }

    /// Run cycles separated by the configured interval until a [`Shutdown`] is received.
    ///
    /// Every failure is contained to its cycle.
    pub async fn run(self, mut shutdown: broadcast::Receiver<Shutdown>) {
        let strategy = self.detector.kind();
        info!(
            instrument = %self.config.instrument,
            %strategy,
            interval_secs = self.config.interval.as_secs(),
            "scanner started"
        );

        loop {
            tokio::select! {
                outcome = self.run_cycle() => self.log_outcome(&outcome),
                _ = shutdown.recv() => break,
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {}
                _ = shutdown.recv() => break,
            }
        }

        info!(instrument = %self.config.instrument, %strategy, "scanner stopped");
    }

    /// Execute one fetch → detect → dedup → notify cycle.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let market = match self.fetch_market().await {
            Ok(market) => market,
            Err(error) => return CycleOutcome::FetchFailure(error),
        };

        let signal = match self.detector.evaluate(&market) {
            Ok(Some(signal)) => signal,
            Ok(None) => return CycleOutcome::NoSignal,
            Err(TaError::InsufficientData {
                required,
                available,
            }) => {
                return CycleOutcome::InsufficientData {
                    required,
                    available,
                };
            }
            Err(error) => return CycleOutcome::FetchFailure(ScanError::Indicator(error)),
        };

        if !self.dedup.should_emit(&signal) {
            return CycleOutcome::Suppressed(signal);
        }

        let text = format_alert(&self.config.instrument, &signal);
        match self.notifier.send(&self.config.chat, &text).await {
            Ok(()) => CycleOutcome::Emitted(signal),
            Err(error) => {
                self.dedup.release(&signal);
                CycleOutcome::NotifyFailure { signal, error }
            }
        }
    }

    async fn fetch_market(&self) -> Result<Market, ScanError> {
        let feeds = self.detector.feeds();
        let series = try_join_all(feeds.into_iter().map(|feed| {
            self.source
                .fetch_series(&self.config.instrument, feed.timeframe, feed.limit)
        }))
        .await?;

        Ok(Market::new(series))
    }

    fn log_outcome(&self, outcome: &CycleOutcome) {
        let instrument = &self.config.instrument;
        let strategy = self.detector.kind();

        match outcome {
            CycleOutcome::Emitted(signal) => info!(
                %instrument,
                %strategy,
                direction = %signal.direction,
                entry = %signal.entry,
                risk_reward = %signal.risk_reward,
                "signal emitted"
            ),
            CycleOutcome::Suppressed(signal) => debug!(
                %instrument,
                %strategy,
                direction = %signal.direction,
                time = %signal.time,
                "signal suppressed as duplicate"
            ),
            CycleOutcome::NoSignal => debug!(%instrument, %strategy, "no signal"),
            CycleOutcome::InsufficientData {
                required,
                available,
            } => debug!(%instrument, %strategy, required, available, "insufficient data"),
            CycleOutcome::FetchFailure(error) => warn!(
                %instrument,
                %strategy,
                transient = error.is_transient(),
                %error,
                "cycle skipped"
            ),
            CycleOutcome::NotifyFailure { signal, error } => error!(
                %instrument,
                %strategy,
                direction = %signal.direction,
                %error,
                "failed to deliver signal"
            ),
        }
    }
}

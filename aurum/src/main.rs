use aurum::{
    config::Config,
    error::AurumError,
    logging::{init_json_logging, init_logging},
    notify::{format_liveness, format_status},
    scanner::{Scanner, ScannerConfig},
    server,
    shutdown::{Shutdown, shutdown_channel, shutdown_signal},
    telegram::{TelegramClient, commands::CommandPoller},
};
use aurum_data::exchange::binance::BinanceFuturesClient;
use aurum_strategy::kind::StrategyDetector;
use futures::future::join_all;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), AurumError> {
    // Load immutable Config from the environment
    let config = Config::from_env()?;

    // Initialise Tracing
    if config.log_json {
        init_json_logging();
    } else {
        init_logging();
    }
    info!(?config, "loaded configuration");

    // Initialise Shutdown broadcast & bind liveness server before any task starts
    let shutdown_tx = shutdown_channel();
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;

    // Spawn one Scanner per configured strategy, each owning its own clients & DedupGate
    let mut tasks = Vec::with_capacity(config.strategies.len() + 1);
    for kind in config.strategies.iter().copied() {
        let detector = StrategyDetector::new(kind, config.sweep, config.mean_reversion)?;
        let scanner = Scanner::new(
            ScannerConfig::new(
                config.instrument.clone(),
                config.chat.clone(),
                config.interval(kind),
            ),
            BinanceFuturesClient::new(config.binance_base_url.clone()),
            TelegramClient::new(config.telegram_base_url.clone(), config.bot_token.clone()),
            detector,
        );
        tasks.push(tokio::spawn(scanner.run(shutdown_tx.subscribe())));
    }

    // Spawn operator CommandPoller
    let strategies = config
        .strategies
        .iter()
        .map(|kind| (*kind, config.interval(*kind)))
        .collect::<Vec<_>>();
    let poller = CommandPoller::new(
        TelegramClient::new(config.telegram_base_url.clone(), config.bot_token.clone()),
        format_status(
            &config.instrument,
            &strategies,
            &config.sweep,
            &config.mean_reversion,
        ),
    );
    tasks.push(tokio::spawn(poller.run(shutdown_tx.subscribe())));

    // Spawn liveness server
    let server_task = tokio::spawn(server::serve(
        listener,
        format_liveness(&config.instrument),
        shutdown_tx.subscribe(),
    ));

    // Run until Ctrl-C or SIGTERM
    if let Err(error) = shutdown_signal().await {
        error!(%error, "failed to listen for shutdown signal");
    }
    info!("shutdown requested");
    if shutdown_tx.send(Shutdown).is_err() {
        warn!("every task already stopped before shutdown");
    }

    for result in join_all(tasks).await {
        if let Err(error) = result {
            error!(%error, "task failed");
        }
    }
    match server_task.await {
        Ok(Ok(())) => {}
        Ok(Err(error)) => error!(%error, "liveness server failed"),
        Err(error) => error!(%error, "liveness server task failed"),
    }

    info!("shutdown complete");
    Ok(())
}

use super::{ChatId, TelegramClient, requests::Update};
use crate::{notify::Notifier, shutdown::Shutdown};
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Seconds Telegram holds a `getUpdates` long poll open while waiting for updates.
pub const LONG_POLL_TIMEOUT_SECS: u64 = 30;

/// Delay before polling again after a failed `getUpdates`.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Read-only operator commands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    Start,
    Status,
}

impl Command {
    /// Parse a command from message text, eg/ "/start" or "/status@AurumBot".
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        let name = first.split('@').next()?;

        match name.to_ascii_lowercase().as_str() {
            "/start" => Some(Command::Start),
            "/status" => Some(Command::Status),
            _ => None,
        }
    }
}

/// Long-polls Telegram for operator commands & answers each with a static status reply.
#[derive(Debug)]
pub struct CommandPoller {
    client: TelegramClient,
    reply: String,
    poll_timeout_secs: u64,
}

impl CommandPoller {
    pub fn new(client: TelegramClient, reply: String) -> Self {
        Self {
            client,
            reply,
            poll_timeout_secs: LONG_POLL_TIMEOUT_SECS,
        }
    }

    pub fn with_poll_timeout(self, poll_timeout_secs: u64) -> Self {
        Self {
            poll_timeout_secs,
            ..self
        }
    }

    /// Poll for commands until a [`Shutdown`] is received.
    pub async fn run(self, mut shutdown: broadcast::Receiver<Shutdown>) {
        info!("command poller started");
        let mut offset = None;

        loop {
            let updates = tokio::select! {
                updates = self.client.get_updates(offset, self.poll_timeout_secs) => updates,
                _ = shutdown.recv() => break,
            };

            match updates {
                Ok(updates) => {
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        self.answer(update).await;
                    }
                }
                Err(error) => {
                    warn!(%error, "failed to poll Telegram updates");
                    tokio::select! {
                        _ = tokio::time::sleep(RETRY_DELAY) => {}
                        _ = shutdown.recv() => break,
                    }
                }
            }
        }

        info!("command poller stopped");
    }

    async fn answer(&self, update: Update) {
        let Some(message) = update.message else {
            return;
        };
        let Some(command) = message.text.as_deref().and_then(Command::parse) else {
            return;
        };

        let chat = ChatId::from(message.chat.id);
        match self.client.send(&chat, &self.reply).await {
            Ok(()) => debug!(?command, %chat, "answered operator command"),
            Err(error) => warn!(?command, %chat, %error, "failed to answer operator command"),
        }
    }
}

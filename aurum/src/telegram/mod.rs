use self::{
    parser::TelegramParser,
    requests::{
        GetUpdates, GetUpdatesRequest, ParseMode, SendMessage, SendMessageRequest, SentMessage,
        Update,
    },
};
use crate::{error::NotifyError, notify::Notifier};
use async_trait::async_trait;
use aurum_integration::protocol::http::{public::PublicNoHeaders, rest::client::RestClient};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::{
    borrow::Cow,
    fmt::{Debug, Formatter},
};
use tracing::debug;

/// Operator command long-poller.
pub mod commands;

/// [`HttpParser`](aurum_integration::protocol::http::HttpParser) for Telegram API errors.
pub mod parser;

/// Telegram Bot API request & response models.
pub mod requests;

/// [`TelegramClient`] default base url.
pub const BASE_URL_TELEGRAM: &str = "https://api.telegram.org";

/// Telegram chat target: a numeric chat id or an `@channel` username.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Display)]
pub struct ChatId(pub SmolStr);

impl ChatId {
    pub fn new<S>(chat: S) -> Self
    where
        S: Into<SmolStr>,
    {
        Self(chat.into())
    }
}

impl From<i64> for ChatId {
    fn from(value: i64) -> Self {
        Self(SmolStr::from(value.to_string()))
    }
}

/// Telegram bot token. Redacted from [`Debug`] output.
#[derive(Clone, Eq, PartialEq)]
pub struct BotToken(SmolStr);

impl BotToken {
    pub fn new<S>(token: S) -> Self
    where
        S: Into<SmolStr>,
    {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl Debug for BotToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("BotToken(***)")
    }
}

/// Telegram Bot API client.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    rest_client: RestClient<'static, PublicNoHeaders, TelegramParser>,
    token: BotToken,
}

impl TelegramClient {
    pub fn new<Url>(base_url: Url, token: BotToken) -> Self
    where
        Url: Into<Cow<'static, str>>,
    {
        Self {
            rest_client: RestClient::new(base_url, PublicNoHeaders, TelegramParser),
            token,
        }
    }

    /// Send a Markdown formatted message to the provided chat.
    pub async fn send_message(&self, chat: &ChatId, text: &str) -> Result<SentMessage, NotifyError> {
        let request = SendMessageRequest {
            token: self.token.clone(),
            body: SendMessage {
                chat_id: chat.clone(),
                text: text.to_owned(),
                parse_mode: Some(ParseMode::Markdown),
            },
        };

        let (response, latency) = self.rest_client.execute(request).await?;
        debug!(
            %chat,
            message_id = response.result.message_id,
            duration_ms = latency.field("duration"),
            "sent Telegram message"
        );

        Ok(response.result)
    }

    /// Long-poll for updates after the provided offset.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, NotifyError> {
        let request = GetUpdatesRequest {
            token: self.token.clone(),
            params: GetUpdates {
                offset,
                timeout: timeout_secs,
            },
        };

        self.rest_client
            .execute(request)
            .await
            .map(|(response, _)| response.result)
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn send(&self, chat: &ChatId, text: &str) -> Result<(), NotifyError> {
        self.send_message(chat, text).await.map(|_| ())
    }
}

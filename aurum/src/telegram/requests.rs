use super::{BotToken, ChatId};
use aurum_integration::protocol::http::rest::RestRequest;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, time::Duration};

/// Telegram Bot API success envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TelegramResponse<T> {
    pub ok: bool,
    pub result: T,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum ParseMode {
    Markdown,
    MarkdownV2,
    #[serde(rename = "HTML")]
    Html,
}

/// <https://core.telegram.org/bots/api#sendmessage>
#[derive(Debug, Clone)]
pub struct SendMessageRequest {
    pub token: BotToken,
    pub body: SendMessage,
}

impl RestRequest for SendMessageRequest {
    type Response = TelegramResponse<SentMessage>;
    type QueryParams = ();
    type Body = SendMessage;

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/bot{}/sendMessage", self.token.expose()))
    }

    fn method() -> reqwest::Method {
        reqwest::Method::POST
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendMessage {
    pub chat_id: ChatId,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
pub struct SentMessage {
    pub message_id: i64,
}

/// <https://core.telegram.org/bots/api#getupdates>
#[derive(Debug, Clone)]
pub struct GetUpdatesRequest {
    pub token: BotToken,
    pub params: GetUpdates,
}

impl RestRequest for GetUpdatesRequest {
    type Response = TelegramResponse<Vec<Update>>;
    type QueryParams = GetUpdates;
    type Body = ();

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/bot{}/getUpdates", self.token.expose()))
    }

    fn method() -> reqwest::Method {
        reqwest::Method::GET
    }

    fn query_params(&self) -> Option<&Self::QueryParams> {
        Some(&self.params)
    }

    fn timeout(&self) -> Duration {
        // Long poll is held open server side for `timeout` seconds
        Duration::from_secs(self.params.timeout + 10)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
pub struct Chat {
    pub id: i64,
}

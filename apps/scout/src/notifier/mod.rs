//! Operator notifications. One fixed chat, plain text, link previews off.

pub mod messages;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::TelegramSettings;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Delivers a message to the operator. No retries.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), NotifierError>;
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

#[derive(Debug, Deserialize)]
struct TelegramErrorBody {
    description: Option<String>,
}

#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    settings: TelegramSettings,
}

impl TelegramNotifier {
    pub fn new(settings: TelegramSettings) -> Result<Self, NotifierError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            settings,
        })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{TELEGRAM_API_BASE}/bot{}/sendMessage",
            self.settings.bot_token
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifierError> {
        let body = SendMessageRequest {
            chat_id: &self.settings.chat_id,
            text,
            disable_web_page_preview: true,
        };

        let response = self
            .client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TelegramErrorBody>(&body)
                .ok()
                .and_then(|e| e.description)
                .unwrap_or(body);
            return Err(NotifierError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(chars = text.chars().count(), "Telegram message delivered");
        Ok(())
    }
}

use super::NotificationSink;
use crate::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const DISCORD_API_BASE: &str = "https://discord.com/api/v10";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends channel messages through the Discord REST API
#[derive(Clone)]
pub struct DiscordSink {
    client: Client,
    base_url: String,
    bot_token: String,
}

impl DiscordSink {
    pub fn new(bot_token: String) -> Result<Self> {
        Self::with_base_url(DISCORD_API_BASE.to_string(), bot_token)
    }

    pub fn with_base_url(base_url: String, bot_token: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BotError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            bot_token,
        })
    }

    fn messages_url(&self, channel_id: u64) -> String {
        format!("{}/channels/{}/messages", self.base_url, channel_id)
    }

    fn unreachable(channel_id: u64, reason: impl ToString) -> BotError {
        BotError::DestinationUnavailable {
            channel_id,
            reason: reason.to_string(),
        }
    }

    async fn check_status(channel_id: u64, response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            debug!(channel_id, "Discord message delivered");
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(Self::unreachable(
            channel_id,
            format!("HTTP {}: {}", status, body),
        ))
    }
}

#[async_trait]
impl NotificationSink for DiscordSink {
    async fn send_message(&self, channel_id: u64, text: &str) -> Result<()> {
        let response = self
            .client
            .post(self.messages_url(channel_id))
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(&json!({ "content": text }))
            .send()
            .await
            .map_err(|e| Self::unreachable(channel_id, e))?;

        Self::check_status(channel_id, response).await
    }

    async fn send_file(&self, channel_id: u64, path: &Path, text: &str) -> Result<()> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Self::unreachable(channel_id, format!("read {:?}: {}", path, e)))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "chart.png".to_string());

        let form = multipart::Form::new()
            .text(
                "payload_json",
                json!({ "content": text }).to_string(),
            )
            .part(
                "files[0]",
                multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str("image/png")
                    .map_err(|e| Self::unreachable(channel_id, e))?,
            );

        let response = self
            .client
            .post(self.messages_url(channel_id))
            .header("Authorization", format!("Bot {}", self.bot_token))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::unreachable(channel_id, e))?;

        Self::check_status(channel_id, response).await
    }
}

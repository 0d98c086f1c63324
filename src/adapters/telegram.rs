//! Telegram Bot API client.
//!
//! Every call is a JSON POST to `{api_base}/bot{token}/{method}`; the
//! `{ok, result, description}` envelope is unwrapped into `Result<T>`.

use crate::domain::model::{Message, Update, WebhookInfo};
use crate::domain::ports::ChatGateway;
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

const LONG_POLL_MARGIN: Duration = Duration::from_secs(10);

// ok=false 但沒有 description
const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct GetUpdatesParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: &'a [&'a str],
}

#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    api_base: String,
    token: String,
}

impl TelegramClient {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    async fn call<P: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: &str,
        params: &P,
    ) -> Result<T> {
        self.call_with_timeout(method, params, None).await
    }

    async fn call_with_timeout<P: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: &str,
        params: &P,
        timeout: Option<Duration>,
    ) -> Result<T> {
        tracing::debug!("Calling Telegram method {}", method);

        let mut request = self.client.post(self.method_url(method)).json(params);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            // reqwest 的錯誤訊息含完整 URL，也就是 token
            .map_err(|e| BotError::HttpError(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BotError::HttpError(e.without_url()))?;

        let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                return Err(BotError::TelegramError {
                    method: method.to_string(),
                    description: format!("HTTP {}: unreadable response ({})", status, e),
                })
            }
        };

        if !envelope.ok {
            return Err(BotError::TelegramError {
                method: method.to_string(),
                description: envelope
                    .description
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            });
        }
        if !status.is_success() {
            return Err(BotError::TelegramError {
                method: method.to_string(),
                description: format!("HTTP {}", status),
            });
        }

        envelope.result.ok_or_else(|| BotError::TelegramError {
            method: method.to_string(),
            description: "Response has no result".to_string(),
        })
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to: Option<i64>,
    ) -> Result<Message> {
        let mut params = json!({ "chat_id": chat_id, "text": text });
        if let Some(message_id) = reply_to {
            params["reply_parameters"] = json!({
                "message_id": message_id,
                "allow_sending_without_reply": true,
            });
        }
        self.call("sendMessage", &params).await
    }

    pub async fn edit_message_text(&self, chat_id: i64, message_id: i64, text: &str) -> Result<()> {
        // result 可能是 Message 或 true
        let _: serde_json::Value = self
            .call(
                "editMessageText",
                &json!({ "chat_id": chat_id, "message_id": message_id, "text": text }),
            )
            .await?;
        Ok(())
    }

    pub async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<bool> {
        self.call(
            "deleteMessage",
            &json!({ "chat_id": chat_id, "message_id": message_id }),
        )
        .await
    }

    pub async fn set_webhook(&self, url: &str) -> Result<bool> {
        self.call("setWebhook", &json!({ "url": url })).await
    }

    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<bool> {
        self.call(
            "deleteWebhook",
            &json!({ "drop_pending_updates": drop_pending_updates }),
        )
        .await
    }

    pub async fn get_webhook_info(&self) -> Result<WebhookInfo> {
        self.call("getWebhookInfo", &json!({})).await
    }

    pub async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>> {
        let params = GetUpdatesParams {
            offset,
            timeout: timeout_secs,
            allowed_updates: &["message"],
        };
        // 長輪詢會佔住連線 timeout_secs 秒，不能套用一般請求的逾時
        let timeout = Duration::from_secs(timeout_secs) + LONG_POLL_MARGIN;
        self.call_with_timeout("getUpdates", &params, Some(timeout)).await
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChatGateway for TelegramClient {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to: Option<i64>,
    ) -> Result<Message> {
        TelegramClient::send_message(self, chat_id, text, reply_to).await
    }

    async fn edit_message_text(&self, chat_id: i64, message_id: i64, text: &str) -> Result<()> {
        TelegramClient::edit_message_text(self, chat_id, message_id, text).await
    }

    async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<()> {
        TelegramClient::delete_message(self, chat_id, message_id).await?;
        Ok(())
    }
}

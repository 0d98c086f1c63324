use crate::adapters::telegram::TelegramClient;
use crate::server::WEBHOOK_PATH;
use crate::utils::error::{BotError, Result};
use url::Url;

/// Accepts only http(s) URLs with a host.
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// `https://host/any/path/` -> `https://host/api/webhook`.
///
/// The webhook path is absolute, so it replaces any path on the base URL.
pub fn webhook_url_for(base_url: &str) -> Result<String> {
    let base = Url::parse(base_url.trim_end_matches('/'))
        .map_err(|_| BotError::registration("Invalid URL format"))?;
    let joined = base
        .join(WEBHOOK_PATH)
        .map_err(|_| BotError::registration("Invalid URL format"))?;
    Ok(joined.to_string())
}

/// Replaces the bot's webhook with `<new_url>/api/webhook` and verifies it.
pub async fn update_webhook(client: &TelegramClient, new_url: &str) -> Result<String> {
    if !is_valid_url(new_url) {
        return Err(BotError::registration("Invalid URL format"));
    }

    // 刪除現有 webhook
    if let Err(e) = client.delete_webhook(false).await {
        tracing::warn!("deleteWebhook failed: {}", e);
        return Err(BotError::registration("Failed to delete existing webhook"));
    }

    let webhook_url = webhook_url_for(new_url)?;
    tracing::info!("Setting webhook to {}", webhook_url);

    // 設定新的 webhook
    if let Err(e) = client.set_webhook(&webhook_url).await {
        let description = match e {
            BotError::TelegramError { description, .. } => description,
            other => other.to_string(),
        };
        return Err(BotError::registration(format!(
            "Failed to set webhook: {}",
            description
        )));
    }

    // 驗證 webhook
    let info = client.get_webhook_info().await.map_err(|e| {
        tracing::warn!("getWebhookInfo failed: {}", e);
        BotError::registration("Could not verify webhook")
    })?;

    if info.url != webhook_url {
        tracing::warn!(
            "Webhook verification mismatch: expected {}, Telegram reports '{}'",
            webhook_url,
            info.url
        );
        return Err(BotError::registration("Webhook verification failed"));
    }

    if let Some(last_error) = &info.last_error_message {
        tracing::warn!("Telegram reports a previous delivery error: {}", last_error);
    }

    Ok(webhook_url)
}

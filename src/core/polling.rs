use crate::adapters::telegram::TelegramClient;
use crate::domain::ports::UpdateHandler;
use crate::utils::error::Result;
use std::future::Future;
use std::time::Duration;

pub const LONG_POLL_TIMEOUT_SECS: u64 = 30;
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Drives an [`UpdateHandler`] from `getUpdates` instead of a webhook.
pub struct UpdatePoller<'a, H: UpdateHandler> {
    client: &'a TelegramClient,
    handler: &'a H,
    timeout_secs: u64,
}

impl<'a, H: UpdateHandler> UpdatePoller<'a, H> {
    pub fn new(client: &'a TelegramClient, handler: &'a H) -> Self {
        Self {
            client,
            handler,
            timeout_secs: LONG_POLL_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Polls until `shutdown` resolves. Returns the number of updates handled.
    pub async fn run<F>(&self, shutdown: F) -> Result<u64>
    where
        F: Future<Output = ()>,
    {
        // getUpdates 與 webhook 不能同時使用
        self.client.delete_webhook(false).await?;
        tracing::info!("Webhook removed, starting long polling");

        tokio::pin!(shutdown);

        let mut offset: Option<i64> = None;
        let mut backoff = INITIAL_BACKOFF;
        let mut handled = 0u64;

        loop {
            let batch = tokio::select! {
                () = &mut shutdown => break,
                batch = self.client.get_updates(offset, self.timeout_secs) => batch,
            };

            let updates = match batch {
                Ok(updates) => {
                    backoff = INITIAL_BACKOFF;
                    updates
                }
                Err(e) => {
                    tracing::warn!("getUpdates failed: {} (retrying in {:?})", e, backoff);
                    tokio::select! {
                        () = &mut shutdown => break,
                        () = tokio::time::sleep(backoff) => {}
                    }
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                    continue;
                }
            };

            for update in updates {
                offset = Some(update.update_id + 1);
                let update_id = update.update_id;
                if let Err(e) = self.handler.handle_update(update).await {
                    tracing::error!("Error processing update {}: {}", update_id, e);
                }
                handled += 1;
            }
        }

        tracing::info!("Polling stopped after {} update(s)", handled);
        Ok(handled)
    }
}

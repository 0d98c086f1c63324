use crate::domain::model::{Message, Transcript, Update, VideoId};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch_transcript(&self, video_id: &VideoId) -> Result<Transcript>;
}

#[async_trait]
pub trait TutorialGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Outgoing side of a chat conversation.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn send_message(&self, chat_id: i64, text: &str, reply_to: Option<i64>)
        -> Result<Message>;
    async fn edit_message_text(&self, chat_id: i64, message_id: i64, text: &str) -> Result<()>;
    async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<()>;
}

#[async_trait]
pub trait UpdateHandler: Send + Sync {
    async fn handle_update(&self, update: Update) -> Result<()>;
}

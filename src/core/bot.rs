use crate::core::chunker::{split_message, MAX_MESSAGE_CHARS};
use crate::core::commands::{classify, Intent};
use crate::core::prompt::{render_prompt, DEFAULT_TUTORIAL_TEMPLATE};
use crate::core::video_url::extract_video_id;
use crate::domain::model::{Message, Update};
use crate::domain::ports::{ChatGateway, TranscriptSource, TutorialGenerator, UpdateHandler};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;

pub const WELCOME_MESSAGE: &str = "👋 Welcome! I create tutorials from YouTube videos.\n\n\
Simply send me a YouTube URL, and I'll:\n\
1. Extract the video transcript\n\
2. Generate an actionable tutorial\n\n\
Try it now by sending a YouTube URL!";

pub const PROCESSING_MESSAGE: &str = "Processing your request... This may take a minute. 🐵";

/// Answers `/start` and turns YouTube links into chunked tutorials.
pub struct TutorBot<T: TranscriptSource, G: TutorialGenerator, C: ChatGateway> {
    transcripts: T,
    generator: G,
    chat: C,
    prompt_template: String,
    max_message_chars: usize,
}

impl<T: TranscriptSource, G: TutorialGenerator, C: ChatGateway> TutorBot<T, G, C> {
    pub fn new(transcripts: T, generator: G, chat: C) -> Self {
        Self {
            transcripts,
            generator,
            chat,
            prompt_template: DEFAULT_TUTORIAL_TEMPLATE.to_string(),
            max_message_chars: MAX_MESSAGE_CHARS,
        }
    }

    pub fn with_prompt_template(mut self, template: impl Into<String>) -> Self {
        self.prompt_template = template.into();
        self
    }

    pub fn with_max_message_chars(mut self, max_chars: usize) -> Self {
        self.max_message_chars = max_chars.max(1);
        self
    }

    /// Transcript -> prompt -> generated tutorial.
    pub async fn generate_tutorial(&self, url: &str) -> Result<String> {
        let video_id = extract_video_id(url)?;
        tracing::info!("Fetching transcript for video {}", video_id);

        let transcript = self.transcripts.fetch_transcript(&video_id).await?;
        tracing::debug!(
            "Transcript for {}: {} segments (language: {}, generated: {})",
            video_id,
            transcript.segments.len(),
            transcript.language_code,
            transcript.is_generated
        );

        let prompt = render_prompt(&self.prompt_template, &transcript.plain_text());
        let tutorial = self.generator.generate(&prompt).await?;

        tracing::info!(
            "Generated tutorial for {} ({} characters)",
            video_id,
            tutorial.chars().count()
        );
        Ok(tutorial)
    }

    /// 失敗時回傳錯誤訊息文字，照常送給使用者
    async fn tutorial_or_error_text(&self, url: &str) -> String {
        match self.generate_tutorial(url).await {
            Ok(tutorial) => tutorial,
            Err(e) => {
                tracing::warn!("Tutorial generation failed for '{}': {}", url, e);
                format!("Error processing request! \n\n{}", e)
            }
        }
    }

    async fn handle_video_link(&self, message: &Message, url: &str) -> Result<()> {
        let chat_id = message.chat.id;
        let reply_to = reply_target(message);

        let status = self
            .chat
            .send_message(chat_id, PROCESSING_MESSAGE, reply_to)
            .await?;

        let tutorial = self.tutorial_or_error_text(url).await;

        if let Err(e) = self.deliver(message, status.message_id, &tutorial).await {
            tracing::error!("Failed to deliver tutorial to chat {}: {}", chat_id, e);
            self.chat
                .edit_message_text(chat_id, status.message_id, &format!("Error: {}", e))
                .await?;
        }

        Ok(())
    }

    async fn deliver(&self, message: &Message, status_id: i64, tutorial: &str) -> Result<()> {
        let chat_id = message.chat.id;
        let chunks = split_message(tutorial, self.max_message_chars);

        self.chat.delete_message(chat_id, status_id).await?;

        tracing::debug!("Sending {} chunk(s) to chat {}", chunks.len(), chat_id);
        for chunk in &chunks {
            self.chat
                .send_message(chat_id, chunk, reply_target(message))
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<T, G, C> UpdateHandler for TutorBot<T, G, C>
where
    T: TranscriptSource,
    G: TutorialGenerator,
    C: ChatGateway,
{
    async fn handle_update(&self, update: Update) -> Result<()> {
        let Some(message) = update.message else {
            tracing::debug!("Ignoring update {} without a message", update.update_id);
            return Ok(());
        };

        if let Some(sent_at) = message.sent_at() {
            tracing::debug!(
                "Update {} from chat {} ({}s old)",
                update.update_id,
                message.chat.id,
                (Utc::now() - sent_at).num_seconds()
            );
        }

        match classify(&message) {
            Intent::Start => {
                self.chat
                    .send_message(message.chat.id, WELCOME_MESSAGE, reply_target(&message))
                    .await?;
                Ok(())
            }
            Intent::VideoLink(url) => self.handle_video_link(&message, &url).await,
            Intent::OtherCommand(name) => {
                tracing::debug!("Ignoring unsupported command /{}", name);
                Ok(())
            }
            Intent::Ignored => Ok(()),
        }
    }
}

// 群組中引用原訊息，私訊不引用
fn reply_target(message: &Message) -> Option<i64> {
    if message.chat.is_private() {
        None
    } else {
        Some(message.message_id)
    }
}

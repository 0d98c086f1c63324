pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use adapters::{gemini::GeminiClient, telegram::TelegramClient, youtube::YoutubeTranscriptClient};
pub use config::{generation::GenerationSettings, BotConfig};
pub use core::{bot::TutorBot, polling::UpdatePoller};
pub use utils::error::{BotError, Result};

/// The production bot wired to the real APIs.
pub type LiveBot = TutorBot<YoutubeTranscriptClient, GeminiClient, TelegramClient>;

/// Builds the Telegram client and the bot from a validated configuration.
pub fn build_bot(config: &BotConfig) -> Result<(TelegramClient, LiveBot)> {
    let settings = config.generation_settings()?;
    let timeout = config.request_timeout();

    let telegram = TelegramClient::new(
        config.telegram_api_base.clone(),
        config.telegram_bot_token.clone(),
        timeout,
    )?;
    let transcripts =
        YoutubeTranscriptClient::new(config.youtube_base.clone(), config.languages(), timeout)?;
    let prompt_template = settings.prompt_template.clone();
    let generator = GeminiClient::new(
        config.gemini_api_base.clone(),
        config.gemini_api_key.clone(),
        settings,
        timeout,
    )?;

    let bot = TutorBot::new(transcripts, generator, telegram.clone())
        .with_prompt_template(prompt_template);
    Ok((telegram, bot))
}

pub mod generation;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_list, validate_positive_number, validate_secret, validate_url, Validate,
};
use clap::Parser;
use generation::GenerationSettings;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Clone, Parser)]
#[command(name = "tube-tutor")]
#[command(about = "Telegram bot that turns YouTube videos into tutorials")]
pub struct BotConfig {
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: String,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value = "8000")]
    pub port: u16,

    /// Overrides the model from the generation settings
    #[arg(long, env = "GEMINI_MODEL")]
    pub gemini_model: Option<String>,

    /// TOML file with a [generation] table
    #[arg(long, env = "GENERATION_CONFIG")]
    pub generation_config: Option<String>,

    #[arg(long, env = "TRANSCRIPT_LANGUAGES", value_delimiter = ',', default_value = "en")]
    pub transcript_languages: Vec<String>,

    #[arg(long, env = "TELEGRAM_API_BASE", default_value = "https://api.telegram.org")]
    pub telegram_api_base: String,

    #[arg(
        long,
        env = "GEMINI_API_BASE",
        default_value = "https://generativelanguage.googleapis.com"
    )]
    pub gemini_api_base: String,

    #[arg(long, env = "YOUTUBE_BASE", default_value = "https://www.youtube.com")]
    pub youtube_base: String,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "120")]
    pub request_timeout_secs: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, env = "LOG_JSON", help = "Emit logs as JSON")]
    pub log_json: bool,
}

// 手動實作以避免印出密鑰
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("gemini_model", &self.gemini_model)
            .field("generation_config", &self.generation_config)
            .field("transcript_languages", &self.transcript_languages)
            .field("telegram_api_base", &self.telegram_api_base)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("youtube_base", &self.youtube_base)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish_non_exhaustive()
    }
}

impl BotConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| crate::utils::error::BotError::InvalidConfigValueError {
                field: "host".to_string(),
                value: self.host.clone(),
                reason: format!("Not a valid bind address: {}", e),
            })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn languages(&self) -> Vec<String> {
        self.transcript_languages
            .iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect()
    }

    /// 載入生成設定，並套用命令列的模型覆蓋
    pub fn generation_settings(&self) -> Result<GenerationSettings> {
        let mut settings = match &self.generation_config {
            Some(path) => GenerationSettings::from_file(path)?,
            None => GenerationSettings::default(),
        };

        if let Some(model) = &self.gemini_model {
            settings.model = model.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<()> {
        validate_secret("TELEGRAM_BOT_TOKEN", &self.telegram_bot_token)?;
        validate_secret("GEMINI_API_KEY", &self.gemini_api_key)?;

        validate_url("telegram_api_base", &self.telegram_api_base)?;
        validate_url("gemini_api_base", &self.gemini_api_base)?;
        validate_url("youtube_base", &self.youtube_base)?;

        validate_positive_number("port", u64::from(self.port), 1)?;
        validate_positive_number("request_timeout_secs", self.request_timeout_secs, 1)?;
        validate_non_empty_list("transcript_languages", &self.transcript_languages)?;

        self.bind_addr()?;

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}

use crate::core::prompt::{DEFAULT_TUTORIAL_TEMPLATE, TRANSCRIPT_PLACEHOLDER};
use crate::utils::error::{BotError, Result};
use crate::utils::validation::{validate_positive_number, validate_range, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // 匹配 ${VAR_NAME}
    Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid")
});

/// Gemini model and sampling parameters plus the tutorial prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
    pub prompt_template: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash-8b".to_string(),
            temperature: 0.5,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
            response_mime_type: "text/plain".to_string(),
            prompt_template: DEFAULT_TUTORIAL_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerationFile {
    #[serde(default)]
    generation: GenerationSettings,
}

impl GenerationSettings {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BotError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定，缺少的欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let file: GenerationFile =
            toml::from_str(&processed_content).map_err(|e| BotError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;

        Ok(file.generation)
    }

    /// 替換環境變數，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl Validate for GenerationSettings {
    fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(BotError::InvalidConfigValueError {
                field: "generation.model".to_string(),
                value: self.model.clone(),
                reason: "Model name cannot be empty".to_string(),
            });
        }

        validate_range("generation.temperature", self.temperature, 0.0, 2.0)?;
        validate_range("generation.top_p", self.top_p, 0.0, 1.0)?;
        validate_positive_number("generation.top_k", u64::from(self.top_k), 1)?;
        validate_positive_number(
            "generation.max_output_tokens",
            u64::from(self.max_output_tokens),
            1,
        )?;

        if !self.prompt_template.contains(TRANSCRIPT_PLACEHOLDER) {
            return Err(BotError::InvalidConfigValueError {
                field: "generation.prompt_template".to_string(),
                value: self.prompt_template.chars().take(40).collect(),
                reason: format!("Template must contain {}", TRANSCRIPT_PLACEHOLDER),
            });
        }

        Ok(())
    }
}

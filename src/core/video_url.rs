use crate::domain::model::VideoId;
use crate::utils::error::{BotError, Result};
use url::Url;

/// Extracts the video id from `youtu.be`, `/watch`, `/embed/` and `/v/` links.
pub fn extract_video_id(url: &str) -> Result<VideoId> {
    let invalid = || BotError::InvalidVideoUrl {
        url: url.to_string(),
    };

    let parsed = Url::parse(url).map_err(|_| invalid())?;
    let host = parsed.host_str().unwrap_or_default();
    let path = parsed.path();

    let id = match host {
        "youtu.be" => path.strip_prefix('/').map(str::to_string),
        "youtube.com" | "www.youtube.com" => {
            if path == "/watch" {
                parsed
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned())
            } else if path.starts_with("/embed/") || path.starts_with("/v/") {
                path.split('/').nth(2).map(str::to_string)
            } else {
                None
            }
        }
        _ => None,
    };

    match id {
        Some(id) if !id.is_empty() => Ok(VideoId::new(id)),
        _ => Err(invalid()),
    }
}

//! YouTube transcript fetching.
//!
//! The watch page embeds the player response, whose `captionTracks` array
//! lists every subtitle track with a timed-text `baseUrl`. The chosen track
//! is downloaded as XML:
//!
//! ```text
//! <transcript><text start="0.0" dur="1.5">Hello &amp;amp; welcome</text>...</transcript>
//! ```

use crate::domain::model::{Transcript, TranscriptSegment, VideoId};
use crate::domain::ports::TranscriptSource;
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

const CAPTION_TRACKS_KEY: &str = "\"captionTracks\":";

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static HTML_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);").expect("entity pattern is valid")
});

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

#[derive(Clone, Debug)]
pub struct YoutubeTranscriptClient {
    client: Client,
    base_url: String,
    languages: Vec<String>,
}

impl YoutubeTranscriptClient {
    pub fn new(base_url: impl Into<String>, languages: Vec<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            languages,
        })
    }

    async fn fetch_watch_page(&self, video_id: &VideoId) -> Result<String> {
        let url = format!("{}/watch", self.base_url);
        tracing::debug!("Fetching watch page for {}", video_id);

        let html = self
            .client
            .get(&url)
            .query(&[("v", video_id.as_str())])
            .header(ACCEPT_LANGUAGE, "en-US")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(html)
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptClient {
    async fn fetch_transcript(&self, video_id: &VideoId) -> Result<Transcript> {
        let html = self.fetch_watch_page(video_id).await?;
        let tracks = parse_caption_tracks(&html, video_id)?;

        let track = select_track(&tracks, &self.languages).ok_or_else(|| {
            BotError::NoTranscriptFound {
                video_id: video_id.to_string(),
                languages: self.languages.join(", "),
            }
        })?;

        tracing::debug!(
            "Using {} transcript ({}) for {}",
            track.language_code,
            if track.is_generated() { "generated" } else { "manual" },
            video_id
        );

        let xml = self
            .client
            .get(&track.base_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(Transcript {
            video_id: video_id.clone(),
            language_code: track.language_code.clone(),
            is_generated: track.is_generated(),
            segments: parse_transcript_xml(&xml)?,
        })
    }
}

/// Reads the `captionTracks` array out of a watch page.
pub fn parse_caption_tracks(html: &str, video_id: &VideoId) -> Result<Vec<CaptionTrack>> {
    let unavailable = |reason: &str| BotError::TranscriptUnavailable {
        video_id: video_id.to_string(),
        reason: reason.to_string(),
    };

    let Some(position) = html.find(CAPTION_TRACKS_KEY) else {
        if html.contains("class=\"g-recaptcha\"") {
            return Err(unavailable(
                "YouTube is receiving too many requests from this IP",
            ));
        }
        if !html.contains("\"playabilityStatus\":") {
            return Err(unavailable("The video is no longer available"));
        }
        return Err(unavailable("Subtitles are disabled for this video"));
    };

    let rest = &html[position + CAPTION_TRACKS_KEY.len()..];
    let array = extract_json_array(rest)
        .ok_or_else(|| unavailable("Caption track list is malformed"))?;

    let tracks: Vec<CaptionTrack> = serde_json::from_str(array)?;
    if tracks.is_empty() {
        return Err(unavailable("Subtitles are disabled for this video"));
    }
    Ok(tracks)
}

/// Returns the leading `[...]` of `input`, honouring nested brackets and strings.
fn extract_json_array(input: &str) -> Option<&str> {
    let start = input.find('[')?;
    if !input[..start].trim().is_empty() {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in input[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&input[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Per language in order: a manually created track first, then a generated one.
pub fn select_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Option<&'a CaptionTrack> {
    languages.iter().find_map(|language| {
        let (manual, generated): (Vec<_>, Vec<_>) = tracks
            .iter()
            .filter(|t| &t.language_code == language)
            .partition(|t| !t.is_generated());
        manual.into_iter().next().or_else(|| generated.into_iter().next())
    })
}

pub fn parse_transcript_xml(xml: &str) -> Result<Vec<TranscriptSegment>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut segments = Vec::new();
    let mut current: Option<(f64, f64, String)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"text" => {
                let mut start = 0.0;
                let mut duration = 0.0;
                for attr in e.attributes() {
                    let attr = attr.map_err(quick_xml::Error::from)?;
                    let value = attr.unescape_value()?;
                    match attr.key.as_ref() {
                        b"start" => start = value.parse().unwrap_or(0.0),
                        b"dur" => duration = value.parse().unwrap_or(0.0),
                        _ => {}
                    }
                }
                current = Some((start, duration, String::new()));
            }
            Event::Text(t) => {
                if let Some((_, _, text)) = current.as_mut() {
                    text.push_str(&t.unescape()?);
                }
            }
            Event::End(e) if e.name().as_ref() == b"text" => {
                if let Some((start, duration, raw)) = current.take() {
                    let text = clean_caption_text(&raw);
                    if !text.is_empty() {
                        segments.push(TranscriptSegment {
                            text,
                            start,
                            duration,
                        });
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(segments)
}

// 字幕文字常被重複轉義 (&amp;#39;)，再解一次並移除格式標籤
fn clean_caption_text(raw: &str) -> String {
    let text = unescape_html(raw);
    HTML_TAG.replace_all(&text, "").trim().to_string()
}

/// Resolves HTML5 named and numeric entities; unknown ones are left as written.
fn unescape_html(raw: &str) -> String {
    HTML_ENTITY
        .replace_all(raw, |caps: &regex::Captures<'_>| {
            let entity = &caps[1];
            let resolved = match entity.strip_prefix('#') {
                Some(number) => {
                    let code = match number.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => number.parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32).map(String::from)
                }
                None => resolve_html5_entity(entity).map(str::to_string),
            };
            resolved.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

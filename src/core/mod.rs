pub mod bot;
pub mod chunker;
pub mod commands;
pub mod polling;
pub mod prompt;
pub mod registration;
pub mod video_url;

pub use crate::domain::model::{Message, Transcript, Update, VideoId};
pub use crate::domain::ports::{ChatGateway, TranscriptSource, TutorialGenerator, UpdateHandler};
pub use crate::utils::error::Result;

// Adapters layer: concrete clients for Telegram, Gemini and YouTube.

pub mod gemini;
pub mod telegram;
pub mod youtube;

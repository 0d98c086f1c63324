// Domain layer: Telegram/transcript models and the ports the bot talks through.

pub mod model;
pub mod ports;

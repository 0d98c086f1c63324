use clap::Parser;
use std::sync::Arc;
use tube_tutor::server::start_server;
use tube_tutor::utils::{logger, validation::Validate};
use tube_tutor::{build_bot, BotConfig, BotError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 不存在時忽略
    dotenvy::dotenv().ok();
    let config = BotConfig::parse();

    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting tube-tutor webhook server");
    tracing::debug!("Config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(&e, "Configuration validation failed");
    }

    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => exit_with(&e, "Invalid bind address"),
    };

    let (_telegram, bot) = match build_bot(&config) {
        Ok(parts) => parts,
        Err(e) => exit_with(&e, "Failed to initialise the bot"),
    };

    start_server(Arc::new(bot), addr).await?;
    Ok(())
}

fn exit_with(e: &BotError, context: &str) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

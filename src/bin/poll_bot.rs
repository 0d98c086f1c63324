use clap::Parser;
use tube_tutor::server::shutdown_signal;
use tube_tutor::utils::{logger, validation::Validate};
use tube_tutor::{build_bot, BotConfig, UpdatePoller};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = BotConfig::parse();

    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("🚀 Starting tube-tutor in long-polling mode");

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let (telegram, bot) = build_bot(&config)?;
    let handled = UpdatePoller::new(&telegram, &bot)
        .run(shutdown_signal())
        .await?;

    tracing::info!("✅ Handled {} update(s)", handled);
    Ok(())
}

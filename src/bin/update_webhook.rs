use clap::Parser;
use tube_tutor::core::registration::update_webhook;
use tube_tutor::utils::logger;
use tube_tutor::TelegramClient;

#[derive(Parser)]
#[command(name = "update_webhook")]
#[command(about = "Point the bot's Telegram webhook at a new public URL")]
struct Args {
    /// Public base URL of the webhook server, e.g. https://bot.example.com
    new_url: String,

    #[arg(long, env = "TELEGRAM_API_BASE", default_value = "https://api.telegram.org")]
    telegram_api_base: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    logger::init_logger(args.verbose, false);

    let token = match std::env::var("TELEGRAM_BOT_TOKEN") {
        Ok(token) if !token.trim().is_empty() => token,
        _ => {
            println!("Error: TELEGRAM_BOT_TOKEN not found in environment variables");
            std::process::exit(1);
        }
    };

    let client = match TelegramClient::new(
        args.telegram_api_base,
        token,
        std::time::Duration::from_secs(30),
    ) {
        Ok(client) => client,
        Err(e) => {
            println!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match update_webhook(&client, &args.new_url).await {
        Ok(webhook_url) => println!("Success: Webhook updated to {}", webhook_url),
        Err(e) => {
            println!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

use clap::{Parser, Subcommand};
use std::sync::Arc;

use zap_bot::application::context::AppContext;
use zap_bot::application::errors::BotError;
use zap_bot::application::messaging::MessageDispatcher;
use zap_bot::domain::traits::ChatPlatform;
use zap_bot::infrastructure::adapters::{ConsoleAdapter, DiscordAdapter, DiscordPlatform};
use zap_bot::infrastructure::config::{AdapterChoice, Config};
use zap_bot::infrastructure::translation::GoogleProvider;

#[derive(Parser)]
#[command(name = "zap-bot")]
#[command(about = "Discord bot that translates messages and keeps code blocks intact", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config and DISCORD_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot (default)
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_bot(&cli.config, cli.token),
        Commands::Version => {
            println!("zap-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(config_path: &str) -> Config {
    if std::path::Path::new(config_path).exists() {
        match Config::load(config_path) {
            Ok(config) => config.with_env(),
            Err(e) => {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::load_env()
            }
        }
    } else {
        Config::load_env()
    }
}

fn run_bot(config_path: &str, token_override: Option<String>) -> Result<(), BotError> {
    let mut config = load_config(config_path);
    if let Some(token) = token_override {
        config = config.with_token(token);
    }
    let adapter = config.adapter()?;
    tracing::info!("Starting {}", config.bot.name);

    let mut provider = GoogleProvider::new();
    if let Some(url) = &config.translation.base_url {
        provider = provider.with_base_url(url);
    }
    let provider = Arc::new(provider);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;

    match adapter {
        AdapterChoice::Discord { token } => rt.block_on(async {
            let mut platform = DiscordPlatform::new(&token);
            platform.fetch_bot_info().await?;
            tracing::info!("Bot started: @{}", platform.bot_info().username);

            let ctx = AppContext::new(Arc::new(platform), provider, &config.bot)
                .with_source_language(&config.translation.source);
            let dispatcher = MessageDispatcher::new(Arc::new(ctx));

            DiscordAdapter::new(token).run(dispatcher).await
        }),
        AdapterChoice::Console => {
            tracing::warn!("DISCORD_TOKEN not set, running console bot");
            rt.block_on(async {
                let console = Arc::new(ConsoleAdapter::new());
                let ctx = AppContext::new(console.clone(), provider, &config.bot)
                    .with_source_language(&config.translation.source);
                let dispatcher = MessageDispatcher::new(Arc::new(ctx));

                console.run(dispatcher).await
            })
        }
    }
}

fn init_config() -> Result<(), BotError> {
    let yaml = Config::default().to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}

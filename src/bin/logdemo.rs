use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fanout_logger::config::{build_logger, load_config};
use fanout_logger::{Context, DisplayHandler, ErrorDetails, FileHandler, Logger};

#[derive(Parser)]
#[command(name = "logdemo")]
#[command(about = "Demo driver for the fanout logger", long_about = None)]
struct Cli {
    /// TOML config describing the handlers. Without it, a file handler
    /// plus a display handler are used.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Severity for the demo message
    #[arg(short, long, default_value = "info")]
    level: String,

    /// Message template, placeholders allowed
    #[arg(short, long, default_value = "User '{username}' created.")]
    message: String,

    /// Log file used when no config is given
    #[arg(long, default_value = "default.log")]
    file: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fanout_logger=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut logger = match &cli.config {
        Some(path) => build_logger(&load_config(path)?)?,
        None => Logger::builder()
            .handler(FileHandler::new(&cli.file))
            .handler(DisplayHandler::new())
            .build(),
    };

    let context = Context::new()
        .with("username", "demo")
        .with("extra", true);
    logger.log_str(&cli.level, &cli.message, context)?;

    logger.critical(
        "Unexpected failure occurred.",
        Context::new().with(
            "exception",
            ErrorDetails::from_description("something went horribly wrong"),
        ),
    )?;

    if let Some(collection) = logger.collection() {
        tracing::info!(retained = collection.len(), "messages retained in memory");
    }

    Ok(())
}

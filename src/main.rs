mod ai;
mod app;
mod command;
mod config;
mod constants;
mod mail;
#[cfg(feature = "notifications")]
mod notification;
mod sync;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::env;
use std::path::Path;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ai::{CompletionClient, Summarizer};
use crate::app::App;
use crate::config::Config;
use crate::constants::ENV_SUMMARIZER_KEY;
use crate::mail::HostItem;
use crate::sync::{HttpSyncTransport, SyncSubmitter};

fn setup_logging() {
    use std::fs::OpenOptions;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mailtasks=debug"));

    // The pane owns the terminal, so prefer a log file in the config directory
    let log_file = Config::config_dir()
        .ok()
        .and_then(|dir| std::fs::create_dir_all(&dir).ok().map(|_| dir))
        .map(|dir| dir.join("mailtasks.log"))
        .and_then(|path| {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .ok()
        });

    if let Some(file) = log_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        // Fallback to stderr if file logging fails
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_usage() {
    eprintln!(
        r#"mailtasks - Turn an email into assignable action items

Usage: mailtasks <command | mail-file>

Commands:
    <mail-file> Open a pane on a .eml message or a .json item export
    init        Write a default configuration file
    help        Show this help message

Configuration file: ~/.config/mailtasks/config.toml
Summarizer proxy key (optional): {ENV_SUMMARIZER_KEY}
"#
    );
}

fn run_init() -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() {
        println!("Configuration already exists at {}", path.display());
        return Ok(());
    }

    Config::default().save()?;
    println!("Configuration written to {}", path.display());
    println!("Set [summarizer] endpoint and [sync] base_url before opening a pane.");
    Ok(())
}

async fn run_pane(item_path: &str) -> Result<()> {
    setup_logging();

    let config = Config::load()?;
    let item = HostItem::open(Path::new(item_path))?;
    tracing::info!("Opened mail item {}", item_path);

    let bearer = env::var(ENV_SUMMARIZER_KEY)
        .ok()
        .filter(|key| !key.is_empty());
    let summarizer = Summarizer::new(
        CompletionClient::new(&config.summarizer, bearer)?,
        &config.summarizer,
    );
    let submitter = SyncSubmitter::new(HttpSyncTransport::new(&config)?);

    let mut app = App::new(config, item, summarizer, submitter);
    app.run().await
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some("init") => run_init(),
        Some(path) => run_pane(path).await,
        None => {
            print_usage();
            std::process::exit(1);
        }
    }
}

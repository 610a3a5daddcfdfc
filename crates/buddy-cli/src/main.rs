use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser)]
#[command(name = "buddy")]
#[command(about = "Buddy Platform CLI - smoke-test an application against the web service", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/buddy/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the service answers
    Ping,
    /// Print the service clock
    Time,
    /// Print the service version
    Version,
    /// Sign in and print the profile
    Login {
        username: String,
        password: String,
    },
    /// Read or write application metadata
    Metadata {
        #[command(subcommand)]
        action: MetadataAction,
    },
    /// Inspect the client configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum MetadataAction {
    /// Print one value
    Get { key: String },
    /// Store a value
    Set { key: String, value: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    let cli = Cli::parse();
    let storage = commands::utils::storage(cli.config)?;

    match cli.command {
        Commands::Ping => commands::service::ping(&storage).await?,
        Commands::Time => commands::service::time(&storage).await?,
        Commands::Version => commands::service::version(&storage).await?,
        Commands::Login { username, password } => {
            commands::account::login(&storage, &username, &password).await?
        }
        Commands::Metadata { action } => match action {
            MetadataAction::Get { key } => commands::metadata::get(&storage, &key).await?,
            MetadataAction::Set { key, value } => {
                commands::metadata::set(&storage, &key, &value).await?
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&storage)?,
            ConfigAction::Path => commands::config::path(&storage),
        },
    }

    Ok(())
}

/// `RUST_LOG` when it is set and parses, `info` otherwise.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

mod config;
mod dispatch;
mod ops;
mod storage;

use std::io::Read;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use userstore_core::user::Response;

use crate::config::Config;

/// userstore - single-table user CRUD dispatcher
///
/// Reads one JSON request envelope, executes the requested operation
/// against the configured store, and prints the JSON response envelope.
#[derive(Parser, Debug)]
#[command(name = "userstore")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a JSON request envelope; reads stdin when omitted
    #[arg(long, short)]
    request: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userstore=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let body = match &cli.request {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let response = run(&config, &body).await;
    println!("{}", serde_json::to_string(&response)?);

    Ok(())
}

#[cfg(feature = "dynamodb")]
async fn run(config: &Config, body: &str) -> Response {
    let store = storage::dynamodb::DynamoDbStore::from_env(config.table_name.as_str()).await;
    tracing::debug!(table = store.table_name(), "using DynamoDB backend");

    dispatch::dispatch(&store, config, body).await
}

#[cfg(not(feature = "dynamodb"))]
async fn run(config: &Config, body: &str) -> Response {
    // Volatile backend: every invocation starts from an empty table.
    // Useful for exercising the dispatcher without AWS access.
    let store = storage::inmemory::InMemoryStore::new();
    tracing::debug!("using in-memory backend");

    dispatch::dispatch(&store, config, body).await
}

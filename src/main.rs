//! `assistant-engine` - runs one assistant session over stdin/stdout.
//!
//! Each stdin line is a JSON tool call (`{"name": ..., "parameters": {...}}`);
//! each stdout line is the JSON tool response. Logs go to stderr.
//!
//! `assistant-engine --tools [openai|anthropic]` prints the configured
//! assistant's tool definitions and exits.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use assistant_engine::adapters::{FileCatalogSource, FileOrderStore};
use assistant_engine::application::{load_catalog, AssistantSession, OrderLedger};
use assistant_engine::config::{AppConfig, LogFormat, RuntimeConfig};
use assistant_engine::domain::catalog::CatalogIndex;
use assistant_engine::domain::tools::ToolRegistry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.runtime);

    let kind = config.runtime.assistant;
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("--tools") {
        let registry = ToolRegistry::global();
        let tools = match args.get(1).map(String::as_str) {
            Some("anthropic") => registry.anthropic_tools(kind),
            _ => registry.openai_tools(kind),
        };
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    let catalog = if kind.uses_catalog() {
        let source = FileCatalogSource::new(&config.catalog.path);
        load_catalog(&source).await.index
    } else {
        CatalogIndex::empty()
    };

    let store = Arc::new(FileOrderStore::new(&config.ledger.path));
    let ledger = OrderLedger::new(store).with_write_timeout(config.ledger.write_timeout());
    let mut session = AssistantSession::new(kind, Arc::new(catalog), Arc::new(ledger));
    tracing::info!("Started {} session {}", kind, session.session_id());

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut line = Vec::new();
    loop {
        line.clear();
        if stdin.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        let Some(response) = session.execute_line(&line).await else {
            continue;
        };

        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        stdout.write_all(&out).await?;
        stdout.flush().await?;
    }

    tracing::info!("Session {} finished", session.session_id());
    Ok(())
}

/// `RUST_LOG` wins over the configured filter when set.
fn init_tracing(runtime: &RuntimeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&runtime.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match runtime.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

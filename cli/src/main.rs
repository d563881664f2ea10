//! `todo` — command-line front end for a remote todo service.
//!
//! Every invocation loads the list, performs at most one action through the
//! state manager, and prints the resulting list.
//!
//! ```bash
//! todo add Buy milk
//! todo toggle 3f2a
//! TODO_API_URL=http://127.0.0.1:9000/api todo list
//! ```

mod config;
mod render;

use std::process::ExitCode;

use clap::Parser;
use todo_core::{HttpTaskResource, ReqwestTransport, TaskResource, TodoClient, TodoStore};

use crate::config::{CliArgs, ClientConfig, Command};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = CliArgs::parse();
    let config = ClientConfig::load(&cli)?;
    init_logging(&config.log_level);

    let transport = ReqwestTransport::new(config.timeout)?;
    let resource = HttpTaskResource::new(TodoClient::new(&config.api_url), transport);
    tracing::debug!(api_url = %resource.client().base_url(), "using todo service");
    let store = TodoStore::new(resource);

    store.load().await;
    if store.last_error().is_none() {
        if let Err(msg) = run(&store, &cli.command).await {
            eprintln!("{msg}");
            return Ok(ExitCode::FAILURE);
        }
    }

    let snapshot = store.snapshot();
    print!("{}", render::render(&snapshot));

    if snapshot.last_error.is_some() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Apply one command to a loaded store. Errors are usage problems
/// (unknown id); remote failures land in the store's `last_error`.
async fn run<R: TaskResource>(store: &TodoStore<R>, command: &Command) -> Result<(), String> {
    match command {
        Command::List => {}
        Command::Add { text } => store.add(&text.join(" ")).await,
        Command::Toggle { id } => {
            let id = render::resolve_id(&store.snapshot(), id)
                .ok_or_else(|| format!("no unique todo matches '{id}'"))?;
            store.toggle(&id).await;
        }
        Command::Delete { id } => {
            let id = render::resolve_id(&store.snapshot(), id)
                .ok_or_else(|| format!("no unique todo matches '{id}'"))?;
            store.delete(&id).await;
        }
        Command::ClearCompleted => store.clear_completed().await,
    }
    Ok(())
}

fn init_logging(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();
}

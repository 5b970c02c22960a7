use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{AutoConfirm, ConfirmDelete, HttpTransport, StudentSession};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod controller;
mod prompt;
mod render;

use commands::{parse_command, HELP};
use config::{load_settings, normalize_server_url};
use controller::{execute, spawn_event_renderer, Flow};
use prompt::{show_prompt, InputLines, StdinConfirm};

#[derive(Parser, Debug)]
#[command(about = "Terminal client for the student record store")]
struct Args {
    /// Base URL of the record store, e.g. http://127.0.0.1:8080
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long, default_value = "student_manager.toml")]
    config: PathBuf,
    /// Quiet period before a search is sent
    #[arg(long)]
    debounce_ms: Option<u64>,
    /// Delete without asking for confirmation
    #[arg(long)]
    yes: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(debounce_ms) = args.debounce_ms {
        settings.search_debounce_ms = debounce_ms;
    }

    let server_url = normalize_server_url(&settings.server_url)?;
    let transport = HttpTransport::with_timeout(
        server_url.clone(),
        Duration::from_secs(settings.request_timeout_secs),
    )
    .context("failed to build HTTP client")?;

    let input = InputLines::stdin();
    let confirm: Arc<dyn ConfirmDelete> = if args.yes {
        Arc::new(AutoConfirm)
    } else {
        Arc::new(StdinConfirm::new(input.clone()))
    };
    let session = StudentSession::new_with_quiet_period(
        Arc::new(transport),
        confirm,
        Duration::from_millis(settings.search_debounce_ms),
    );
    info!(
        server_url = %server_url,
        debounce_ms = settings.search_debounce_ms,
        "student manager started"
    );

    let renderer = spawn_event_renderer(session.clone());
    session.start().await;
    println!("{HELP}");

    loop {
        show_prompt("> ");
        let Some(line) = input.next_line().await? else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        if let Flow::Quit = execute(&session, command).await {
            break;
        }
    }

    session.shutdown().await;
    renderer.abort();
    if let Err(err) = renderer.await {
        if !err.is_cancelled() {
            warn!("event renderer stopped unexpectedly: {err}");
        }
    }
    Ok(())
}

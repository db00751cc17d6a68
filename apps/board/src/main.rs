use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    load_settings, view::TODO_LIST_ELEMENT_ID, ClientEvent, HttpTodoApi, UiController,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{broadcast, watch},
};
use tokio_stream::{wrappers::WatchStream, StreamExt};
use tracing::{info, warn};

mod commands;

use commands::{parse_command, Command, HELP};

#[derive(Parser, Debug)]
#[command(about = "Terminal board for a to-do list server")]
struct Args {
    /// Base url of the todo server.
    #[arg(long)]
    server_url: Option<String>,
    /// Refresh interval in milliseconds.
    #[arg(long)]
    interval_ms: Option<u64>,
    /// TOML settings file (defaults to ./board.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(ms) = args.interval_ms.filter(|ms| *ms > 0) {
        settings.poll_interval_ms = ms;
    }
    settings
        .validate()
        .with_context(|| format!("unusable server url '{}'", settings.server_url))?;

    let api = Arc::new(HttpTodoApi::new(&settings.server_url)?);
    let controller = UiController::new(api, settings.poll_interval());
    info!(server_url = %settings.server_url, "board: connected");

    let printer = tokio::spawn(print_list(controller.list().subscribe()));
    let reporter = tokio::spawn(report_mutations(controller.subscribe_events()));
    let poller = controller.start_polling();

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(Command::Submit(submission)) => {
                // Fire-and-forget; the next refresh shows the result.
                let _ = controller.submit(submission);
            }
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Quit) => break,
            Ok(Command::Empty) => {}
            Err(err) => warn!("board: {err}"),
        }
    }

    poller.stop().await;
    printer.abort();
    reporter.abort();
    Ok(())
}

async fn print_list(rx: watch::Receiver<String>) {
    let mut renders = WatchStream::from_changes(rx);
    while let Some(markup) = renders.next().await {
        println!("--- #{TODO_LIST_ELEMENT_ID} ---");
        if markup.is_empty() {
            println!("(empty)");
        } else {
            println!("{markup}");
        }
    }
}

async fn report_mutations(mut events: broadcast::Receiver<ClientEvent>) {
    loop {
        match events.recv().await {
            Ok(ClientEvent::MutationSent { request }) => {
                println!("ok: {} {}", request.method().as_str(), request.path());
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "board: event reporter fell behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

mod cli;
mod client;
mod config;
mod error;
mod middleware;
mod models;
mod pipeline;
mod routes;
mod services;
mod state;

use crate::config::Config;
use crate::state::AppState;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about = "Summarize articles with an LLM and estimate what it costs", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web UI and JSON API (default)
    Serve {
        /// Port to listen on, overrides PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Summarize an article through a running server
    Summarize(cli::SummarizeArgs),
    /// Print the token and cost estimate for an article without calling anything
    Estimate(cli::InputArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "summarizer=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => serve(port).await,
        Command::Summarize(args) => {
            if !cli::summarize(args).await? {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Estimate(args) => cli::estimate(args).await,
    }
}

async fn serve(port: Option<u16>) -> anyhow::Result<()> {
    // Load config
    let config = Config::from_env()?.with_port(port);
    let port = config.port;

    tracing::info!("Starting summarizer on port {}", port);

    let state = AppState::new(config)?;
    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Listening on 0.0.0.0:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

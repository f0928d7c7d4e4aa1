//! Chatbot CLI and REST API entry point.
//!
//! Binary name: `chatbot`
//!
//! Loads `.env`, parses CLI arguments, initializes tracing, configuration,
//! the database and services, then dispatches to the requested command or
//! starts the REST API server.

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;

use chatbot_api::cli::{self, Cli, Commands};
use chatbot_api::http;
use chatbot_api::state::AppState;
use chatbot_infra::config::{load_config, resolve_data_dir};
use chatbot_observe::tracing_setup::{
    filter_for_verbosity, init_tracing, shutdown_tracing, TracingOptions,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal; the environment may be set another way.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&TracingOptions {
        enable_otel: cli.otel,
        json: cli.json,
        default_filter: filter_for_verbosity(cli.verbose, cli.quiet).to_string(),
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "chatbot", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    let mut config = load_config(&data_dir).await;

    if let Commands::Serve { port, host } = &cli.command {
        if let Some(port) = port {
            config.server.port = *port;
        }
        if let Some(host) = host {
            config.server.host = host.clone();
        }
    }

    let state = AppState::init(data_dir, config)
        .await
        .context("failed to initialize application state")?;

    let result = run(cli, state).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli, state: AppState) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { .. } => {
            // Refuse to serve traffic that can only fail.
            state
                .chat_service
                .model()
                .check_credentials()
                .context("model credential check failed")?;

            let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;

            if !cli.quiet {
                println!(
                    "  {} Chatbot API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(%addr, data_dir = %state.data_dir.display(), "Server started");

            let db_pool = state.db_pool.clone();
            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            db_pool.close().await;
            tracing::info!("Server stopped");
            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::List { page, limit } => {
            cli::list::list_conversations(&state, page, limit, cli.json).await?;
        }

        Commands::Completions { .. } => {}
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

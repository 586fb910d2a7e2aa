//! Hemonet CLI and REST API entry point.
//!
//! Binary name: `hemonet`
//!
//! Parses CLI arguments, loads configuration, runs the startup bootstrap
//! (backing-store snapshot plus assistant wiring), then either serves the
//! chat API or runs a one-shot command.

mod http;
mod state;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::generate;

use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "hemonet", about = "Grounded hospital-assistant chat gateway")]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the gateway config file
    #[arg(long, default_value = "hemonet.toml", global = true)]
    config: PathBuf,

    /// Export spans via OpenTelemetry (stdout exporter)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the chat gateway HTTP server
    Serve {
        /// Override the configured bind port
        #[arg(long)]
        port: Option<u16>,
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,
    },

    /// Bootstrap, print the rendered knowledge snapshot, and exit
    Snapshot,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn,hemonet=info",
        1 => "info,hemonet=debug",
        _ => "trace",
    };
    hemonet_observe::tracing_setup::init_tracing(Some(filter), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        generate(*shell, &mut cmd, "hemonet", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state; bootstrap runs to completion here and
    // an exhausted retry budget is fatal.
    let state = AppState::init(&cli.config).await?;

    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Hemonet gateway listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Snapshot => {
            if let Some(snapshot) = state.chat_service.snapshot() {
                println!(
                    "  {} Snapshot loaded {}",
                    console::style("✓").green(),
                    console::style(snapshot.loaded_at.to_rfc3339()).dim()
                );
                println!();
                println!("{}", snapshot.rendered_text);
            }
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    hemonet_observe::tracing_setup::shutdown_tracing();
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

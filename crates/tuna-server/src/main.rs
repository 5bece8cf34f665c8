mod server;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tuna_core::overlay::status_line;
use tuna_core::Dispatcher;
use tuna_runtime::{run_with, AppConfig, HttpSink, SnapshotFile, TunaError};

#[derive(Debug, Parser)]
#[command(name = "tuna", version, about = "Now-playing reporter for web music players")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Accept reports and serve the current track as JSON.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Report a recorded page snapshot, re-reading the file every tick.
    Replay {
        file: PathBuf,
        /// Listener port to post to.
        #[arg(short, long)]
        port: Option<u16>,
        /// Polling period in milliseconds.
        #[arg(long)]
        refresh_ms: Option<u64>,
        /// Don't log a status line per captured state.
        #[arg(long)]
        quiet: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), TunaError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tuna=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.listener.host = host;
            }
            if let Some(port) = port {
                config.listener.port = port;
            }
            server::serve(&config.listener, shutdown_signal()).await
        }
        Command::Replay {
            file,
            port,
            refresh_ms,
            quiet,
        } => {
            let reporter = &mut config.reporter;
            if let Some(port) = port {
                reporter.port = port;
            }
            if let Some(ms) = refresh_ms {
                reporter.refresh_rate_ms = ms;
            }
            let overlay = reporter.debug_overlay && !quiet;

            let sink = HttpSink::new(reporter.port);
            info!(
                endpoint = %sink.endpoint(),
                refresh_ms = reporter.refresh_rate_ms,
                "Tuna reporter started"
            );
            let mut dispatcher = Dispatcher::standard(sink);
            run_with(
                SnapshotFile::new(file),
                &mut dispatcher,
                reporter.refresh_period(),
                shutdown_signal(),
                |outcome| {
                    if let Some(state) = outcome.state().filter(|_| overlay) {
                        info!("{}", status_line(state));
                    }
                },
            )
            .await;
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until killed.
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

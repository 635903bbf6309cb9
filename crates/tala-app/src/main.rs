use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tala_config::Config;
use tokio::signal;

pub mod controller;
pub mod events;
pub mod io;
pub mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

/// Translation client: live-typed input, history, settings mirrored to the host
#[derive(Parser, Debug)]
#[command(name = "tala", version)]
struct Cli {
    /// Base URL of the host bridge, e.g. http://127.0.0.1:5173
    #[arg(long)]
    bridge_url: Option<String>,

    /// Directory holding the persisted settings record
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Quiet period before typed input is translated
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Keep settings in memory only
    #[arg(long)]
    ephemeral: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.bridge_url {
            config.bridge.url = Some(url.clone());
        }
        if let Some(dir) = &self.config_dir {
            config.storage.dir = dir.clone();
        }
        if let Some(ms) = self.debounce_ms {
            config.translation.debounce_ms = ms;
        }
        config.log_json |= self.log_json;
    }
}

fn init_logging(json: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout belongs to the console UI
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::new();
    cli.apply(&mut config);

    init_logging(config.log_json);
    tracing::info!("tala starting up");

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(controller.settings_storage(cli.ephemeral));

    tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("failed to listen for ctrl+c: {e}");
            }
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("task exited, shutting down"),
                Ok(Err(e)) => tracing::error!("task failed: {e}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;

    Ok(())
}

//! # engine_host: demo host
//!
//! Runs the demo scripts against the in-memory [`SceneHost`] at a fixed
//! tick rate.
//!
//! ## Startup Sequence
//!
//! 1. Load the runtime config (`--config`, or defaults).
//! 2. Register the demo script classes and build the scene.
//! 3. Tick until `max_ticks` is reached or Ctrl-C is pressed.
//!
//! [`SceneHost`]: engine_glue::SceneHost

mod scripts;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use engine_runtime::RuntimeConfig;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use session::Session;

#[derive(Parser)]
#[command(name = "engine_host", about = "Run entity scripts against an in-memory scene")]
struct Args {
    /// Path to a JSON runtime config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many ticks (overrides the config; 0 = unlimited)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Ticks per second (overrides the config)
    #[arg(long)]
    tick_rate: Option<f64>,
}

impl Args {
    fn runtime_config(&self) -> Result<RuntimeConfig> {
        let mut config = match &self.config {
            Some(path) => RuntimeConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => RuntimeConfig::new("demo"),
        };
        if let Some(ticks) = self.ticks {
            config = config.with_max_ticks(ticks);
        }
        if let Some(tick_rate) = self.tick_rate {
            config = config.with_tick_rate(tick_rate);
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.runtime_config()?;
    info!(
        domain = %config.domain_name,
        tick_rate = config.tick_rate,
        max_ticks = config.max_ticks,
        "engine host starting"
    );

    let mut session = Session::new(config.clone())?;
    info!(
        player = %session.player(),
        scripts = session.runtime().instance_count(),
        "session ready"
    );

    let mut interval = tokio::time::interval(config.tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                session.step();
                if config.max_ticks > 0 && session.tick() >= config.max_ticks {
                    info!(ticks = session.tick(), "tick limit reached");
                    break;
                }
            }
            result = &mut shutdown => {
                if let Err(err) = result {
                    warn!(%err, "failed to listen for Ctrl-C");
                }
                info!(ticks = session.tick(), "interrupted");
                break;
            }
        }
    }

    session.shutdown();
    info!(
        entities = session.host().entity_count(),
        "engine host shut down"
    );
    Ok(())
}

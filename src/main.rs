use clap::Parser;
use parking_lot::Mutex;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use smarthome::{
    init_logging, register_console_handlers, run_demo, should_wait_for_enter, Config, EventHub,
};

/// Simulate motion, door, and temperature sensors publishing to an event hub.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (.toml or .json). Defaults to the platform config
    /// directory when present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Exit right after the demo instead of waiting for Enter.
    #[arg(long, default_value_t = false)]
    once: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (config, source) = Config::load_or_default(args.config.as_deref())?;
    init_logging(config.logging.level()?)?;
    tracing::info!("SmartHome {} (built {})", smarthome::VERSION, smarthome::BUILD_DATE);
    if source.is_fallback() {
        tracing::warn!("Using {}", source);
    } else {
        tracing::debug!("Using {}", source);
    }

    let hub = EventHub::new();
    register_console_handlers(
        &hub,
        Arc::new(Mutex::new(std::io::stdout())),
        &config.output.timestamp_format,
    );

    run_demo(&hub, &config.demo)?;

    if should_wait_for_enter(&config.demo, args.once) {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
    }

    Ok(())
}

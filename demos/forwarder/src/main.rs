//! Forwarder demo entry-point: load settings, install logging, report readiness.

use std::io::IsTerminal;

use cascade_config::{ParseOptions, Program};
use forwarder::{Config, log_filter};
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "config/config.yaml";

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let program = Program::new("forwarder")
        .usage("forward short videos to a chat")
        .version(env!("CARGO_PKG_VERSION"));
    let config: Config = cascade_config::load(&program, CONFIG_PATH, &ParseOptions::file_and_env())?;
    let app = &config.application;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter(&app.log_level)))
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    info!(
        port = app.port,
        domain = %app.domain,
        proxy = !app.proxy_url.is_empty(),
        "forwarder configured"
    );
    Ok(())
}

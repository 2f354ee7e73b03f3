use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lcd_chain::{config::Config, demos::Demo, App};

#[derive(Parser, Debug)]
#[command(name = "lcd-chain")]
#[command(about = "Drive daisy-chained four-digit LCD panels over a serial link")]
#[command(version)]
struct Cli {
    /// Serial device the chain is attached to
    #[arg(long)]
    port: Option<String>,

    /// Number of daisy-chained panels
    #[arg(long, value_name = "N")]
    panels: Option<usize>,

    /// Firmware dump to pull the glyph table from
    #[arg(long, value_name = "PATH")]
    firmware: Option<PathBuf>,

    /// Show a string, one char per digit, and exit
    #[arg(long, value_name = "TEXT")]
    text: Option<String>,

    /// Run one animation and exit
    #[arg(long, value_enum, value_name = "NAME")]
    demo: Option<Demo>,

    /// Light every segment and exit
    #[arg(long)]
    fill: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration and fold the flags over it
    let mut config = Config::load()?;
    if let Some(port) = cli.port {
        config.link.port = Some(port);
    }
    if let Some(panels) = cli.panels {
        config.chain.panels = panels;
    }
    if let Some(firmware) = cli.firmware {
        config.font.firmware = Some(firmware);
    }

    let mut app = App::open(&config)?;

    if cli.fill {
        return app.fill();
    }
    if let Some(text) = cli.text {
        return app.show_text(&text);
    }
    match cli.demo {
        Some(demo) => app.run_demo(demo),
        None => app.run_cycle(),
    }
}

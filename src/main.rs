use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use media_carousel::config::Config;
use media_carousel::logging::init_tracing;
use media_carousel::scenario::{Scenario, Snapshot};

#[derive(Parser, Debug)]
#[command(name = "media-carousel")]
#[command(about = "Run a scripted carousel and lazy-loading session against a simulated page", long_about = None)]
struct Cli {
    /// Scenario file (TOML)
    scenario: PathBuf,

    /// Config file (defaults to the user config, or built-in defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print snapshots as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let scenario = Scenario::load_from(&cli.scenario)?;
    let snapshots = scenario.run(config);

    if cli.json {
        let out = serde_json::to_string_pretty(&snapshots).context("serializing snapshots")?;
        println!("{}", out);
    } else {
        for snapshot in &snapshots {
            println!("{}", format_snapshot(snapshot));
        }
    }
    Ok(())
}

fn format_snapshot(snapshot: &Snapshot) -> String {
    let mut line = format!("[{:>6}ms] {:<24}", snapshot.time_ms, snapshot.step);
    if let Some(current) = snapshot.current_slide {
        line.push_str(&format!(
            " slide={} autoplay={}",
            current,
            if snapshot.autoplay { "on" } else { "off" }
        ));
    }
    for image in &snapshot.images {
        let status = image
            .status
            .map(|s| format!("{:?}", s).to_lowercase())
            .unwrap_or_else(|| "-".to_string());
        line.push_str(&format!(" {}={}", image.label, status));
    }
    line
}

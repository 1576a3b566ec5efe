mod config;
mod output;

use clap::Parser;
use config::{Config, OutputFormat};
use ripdisc_core::analyze_logs;
use ripdisc_core::text_encoding::read_text_file;
use std::path::PathBuf;
use tracing::{error, info};

/// Compute MusicBrainz DiscIDs from CD ripping logs (EAC, XLD).
#[derive(Parser, Debug)]
#[command(name = "ripdisc")]
struct Args {
    /// Ripping log files of one release. Discs are deduplicated across all of them.
    #[arg(required = true)]
    logs: Vec<PathBuf>,

    /// YAML config file.
    #[arg(long, env = "RIPDISC_CONFIG")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, env = "RIPDISC_OUTPUT")]
    output: Option<OutputFormat>,

    /// Also print the legacy CDDB disc id.
    #[arg(long)]
    cddb: bool,

    /// Artist name to prefill in attach links.
    #[arg(long)]
    artist: Option<String>,

    /// Release title to prefill in attach links.
    #[arg(long)]
    release: Option<String>,

    /// Base URL for attach links (e.g. a MusicBrainz test server).
    #[arg(long, env = "RIPDISC_ATTACH_BASE_URL")]
    attach_base_url: Option<String>,
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() {
    dotenvy::dotenv().ok();
    configure_logging();
    let args = Args::parse();

    let config = Config::load(&args).unwrap_or_else(|e| {
        error!("Invalid configuration: {e}");
        std::process::exit(1);
    });

    let mut texts = Vec::with_capacity(args.logs.len());
    for path in &args.logs {
        let decoded = read_text_file(path).unwrap_or_else(|e| {
            error!("Failed to read {}: {e}", path.display());
            std::process::exit(1);
        });
        info!(
            "Read {} ({}, {} chars)",
            path.display(),
            decoded.encoding.name(),
            decoded.text.len()
        );
        texts.push(decoded.text);
    }

    let analysis = analyze_logs(texts.iter().map(String::as_str));
    if analysis.is_empty() {
        error!("No TOC found in {} log file(s)", args.logs.len());
        std::process::exit(1);
    }

    match config.output {
        OutputFormat::Text => print!("{}", output::render_text(&analysis, &config)),
        OutputFormat::Json => {
            let json = output::render_json(&analysis, &config).unwrap_or_else(|e| {
                error!("Failed to serialize results: {e}");
                std::process::exit(1);
            });
            println!("{}", json);
        }
    }
}

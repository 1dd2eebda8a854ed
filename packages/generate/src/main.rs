#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI tool for writing the earthquake map's display files.
//!
//! Fetches the USGS feed and writes styled marker `GeoJSON`, the legend,
//! and the map settings for a map widget to load.

use std::path::PathBuf;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Parser, Subcommand};
use quake_map_feed_models::{FeedLevel, FeedPeriod};
use quake_map_generate::{
    ALL_OUTPUTS, GenerateArgs, OUTPUT_LEGEND, OUTPUT_MAP, OUTPUT_MARKERS, output_dir, run,
};

#[derive(Parser)]
#[command(name = "quake_map_generate", about = "Earthquake map generation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Map configuration TOML file (defaults to the embedded configuration)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Feed URL, overriding the configured feed
    #[arg(long, global = true)]
    feed_url: Option<String>,

    /// Feed magnitude tier
    #[arg(long, global = true, value_parser = level_parser())]
    level: Option<FeedLevel>,

    /// Feed time window
    #[arg(long, global = true, value_parser = period_parser())]
    period: Option<FeedPeriod>,

    /// Directory to write into (defaults to `data/generated`)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate styled earthquake markers as `GeoJSON`
    Markers,
    /// Generate the legend as JSON and HTML
    Legend,
    /// Generate the map settings (view, base layers)
    Map,
    /// Generate all outputs
    All,
}

fn level_parser() -> impl TypedValueParser<Value = FeedLevel> {
    PossibleValuesParser::new(FeedLevel::all().iter().map(AsRef::<str>::as_ref))
        .try_map(|value| value.parse::<FeedLevel>())
}

fn period_parser() -> impl TypedValueParser<Value = FeedPeriod> {
    PossibleValuesParser::new(FeedPeriod::all().iter().map(AsRef::<str>::as_ref))
        .try_map(|value| value.parse::<FeedPeriod>())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = quake_map_cli_utils::init_logger();
    let cli = Cli::parse();

    let dir = cli.output_dir.unwrap_or_else(output_dir);
    let requested_outputs: &[&str] = match cli.command {
        Commands::Markers => &[OUTPUT_MARKERS],
        Commands::Legend => &[OUTPUT_LEGEND],
        Commands::Map => &[OUTPUT_MAP],
        Commands::All => ALL_OUTPUTS,
    };

    let args = GenerateArgs {
        config: cli.config,
        feed_url: cli.feed_url,
        level: cli.level,
        period: cli.period,
    };

    let written = run(&args, &dir, requested_outputs, Some(&multi)).await?;
    for path in &written {
        log::info!("Wrote {}", path.display());
    }

    Ok(())
}

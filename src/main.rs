use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use meter_dial::{FaceConfig, MeterFace};

/// Generate the vector artwork for an analog multi-gauge meter face
#[derive(Parser)]
#[command(name = "meter-dial")]
#[command(version, long_about = None)]
struct Cli {
    /// Face description in TOML; the reference four-gauge face when omitted
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// SVG file to write
    #[arg(short, long, default_value = "out.svg")]
    output: PathBuf,

    /// Override the mechanical span of the meter movement, in degrees
    #[arg(long)]
    span_degrees: Option<f64>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger with default level (overridden by RUST_LOG)
    let env = Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let mut config = match &cli.config {
        Some(path) => FaceConfig::from_path(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => FaceConfig::default(),
    };
    if let Some(span) = cli.span_degrees {
        config.span_degrees = span;
    }

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let face = MeterFace::new(config)?;
    face.save(&cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!("done!");

    Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gridboard::replay;
use gridboard::settings::{default_settings_path, CanvasSettings};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridboard")]
#[command(about = "Drive the image-grid canvas core from the command line", long_about = None)]
#[command(version)]
struct Cli {
    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a JSON input script against a fresh canvas and print the result
    Replay {
        script: PathBuf,

        #[arg(long)]
        pretty: bool,
    },

    /// Print the effective settings
    Settings {
        /// Settings file; defaults to the platform config directory
        path: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Replay { script, pretty } => {
            let loaded = replay::load_script(&script)
                .with_context(|| format!("Failed to load script {}", script.display()))?;
            let report = replay::run(&loaded).context("Replay failed")?;
            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{}", json);
        }
        Commands::Settings { path } => {
            let settings = match path.or_else(default_settings_path) {
                Some(path) => CanvasSettings::load_or_default(&path),
                None => CanvasSettings::default(),
            };
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }
    Ok(())
}

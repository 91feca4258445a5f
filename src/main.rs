#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use reading_report::{config, render_cmd, serve_cmd};

#[derive(Parser, Debug)]
#[command(name = "reading-report")]
#[command(about = "Chart report generator for reading-log CSV exports", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set READING_REPORT_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the upload form and report over HTTP
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Render a report from a CSV file on disk
    Render {
        /// Reading-log CSV export
        #[arg(long)]
        input: PathBuf,
        /// Path of the HTML report to write
        #[arg(long)]
        output: PathBuf,
        /// Write the aggregated counts as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("READING_REPORT_LOG").unwrap_or_else(|_| {
        if verbose { "reading_report=debug".to_string() } else { "reading_report=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = config::load_or_default(cli.config.as_deref()).and_then(|cfg| match cli.command {
        Commands::Serve { bind } => serve_cmd::run(cfg, bind),
        Commands::Render { input, output, json } => render_cmd::run(input, output, json, &cfg),
    });

    if let Err(e) = result {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

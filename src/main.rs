//! Connector Router CLI
//!
//! Usage:
//!   connector-router [OPTIONS] [FILE]
//!
//! Options:
//!   -o, --orthogonal       Force the two-bend orthogonal route
//!   -n, --no-grid          Disable the grid obstacle router
//!   -f, --format <FORMAT>  Output format: text or toml
//!   -v, --verbose          Log routing decisions to stderr
//!   -h, --help             Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use connector_router::{connect_with_config, ConnectConfig, OutputFormat, RoutingMode};

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Toml,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Toml => OutputFormat::Toml,
        }
    }
}

#[derive(Parser)]
#[command(name = "connector-router")]
#[command(about = "Route a connector between two rectangular nodes")]
struct Cli {
    /// Scene file in TOML format (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Force the orthogonal route, ignoring the scene's routing mode
    #[arg(short, long)]
    orthogonal: bool,

    /// Disable the grid obstacle router; smart mode falls back to the orthogonal route
    #[arg(short, long)]
    no_grid: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Log routing decisions to stderr (RUST_LOG overrides the level)
    #[arg(short, long)]
    verbose: bool,
}

fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut config = ConnectConfig::new()
        .with_format(cli.format.into())
        .with_grid(!cli.no_grid);
    if cli.orthogonal {
        config = config.with_mode(RoutingMode::Orthogonal);
    }

    match connect_with_config(&source, config) {
        Ok(out) => {
            print!("{}", out);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    println!(
        r#"Connector Router - route a connector between two rectangular nodes

USAGE:
    connector-router [OPTIONS] [FILE]
    cat scene.toml | connector-router

OPTIONS:
    -o, --orthogonal     Force the two-bend orthogonal route
    -n, --no-grid        Disable the grid obstacle router
    -f, --format         Output format: text (default) or toml
    -v, --verbose        Log routing decisions to stderr
    -h, --help           Print help

SCENE:
    [routing]
    smart = true                            # optional, default true

    [a]
    center = {{ x = 200.0, y = 200.0 }}
    size = {{ width = 60.0, height = 60.0 }}
    angle = 0                               # 0 right, 90 down, 180 left, -90 up
    offset = 0.0                            # optional, along the side

    [b]
    center = {{ x = 400.0, y = 400.0 }}
    size = {{ width = 60.0, height = 60.0 }}
    angle = 180
    point = {{ x = 370.0, y = 400.0 }}        # optional, instead of offset"#
    );
}

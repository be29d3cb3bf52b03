use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use tracing::info;

mod color;
mod config;
mod error;
mod renderer;
mod spiral;
mod terminal;

use color::ColorScheme;
use config::Config;

#[derive(Parser, Debug)]
#[command(name = "spiral-ascii")]
#[command(author, version, about = "Draw an Archimedean spiral as ASCII art sized to the terminal")]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Write a commented default config to the XDG config path and exit
    #[arg(long)]
    init_config: bool,

    /// Number of full revolutions (also divides the radius)
    #[arg(short = 'f', long)]
    circulation: Option<f64>,

    /// Degrees between sampled points
    #[arg(short, long)]
    granularity: Option<f64>,

    /// Reference width in columns (defaults to the terminal width)
    #[arg(short, long)]
    width: Option<u16>,

    /// Columns taken off the radius
    #[arg(long)]
    inset: Option<f64>,

    /// Character drawn at occupied positions
    #[arg(long)]
    fill: Option<char>,

    /// Text written at the start of every line
    #[arg(long)]
    prefix: Option<String>,

    /// Prefix every line with its row number
    #[arg(long)]
    line_numbers: bool,

    /// Columns of empty space left of the drawing
    #[arg(long)]
    margin: Option<u16>,

    /// Color scheme: spectrum, rainbow, fire, ocean, forest, purple, monochrome
    #[arg(long)]
    colors: Option<ColorScheme>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so they never mix with the drawing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("spiral_ascii={}", level).parse()?),
        )
        .init();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "spiral-ascii", &mut std::io::stdout());
        return Ok(());
    }

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);

    info!(
        "Drawing spiral: circulation_factor={}, granularity={}",
        config.spiral.circulation_factor, config.spiral.granularity
    );

    terminal::run(&config)
}

//! dungen: generate a dungeon layout from the command line
//!
//! Prints the glyph grid and a one-line summary, or the full result as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use dg_core::{generate, ConfigurationError, DistanceMetric, GameRng, GenConfig, GridSize};

/// Procedural dungeon generator
#[derive(Parser, Debug)]
#[command(name = "dungen")]
#[command(author, version, about = "Generate a dungeon layout", long_about = None)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// RNG seed (random when omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Grid width
    #[arg(long = "width", requires = "height")]
    width: Option<usize>,

    /// Grid height
    #[arg(long = "height", requires = "width")]
    height: Option<usize>,

    /// Number of rooms to place
    #[arg(short = 'r', long = "rooms")]
    rooms: Option<usize>,

    /// Number of dead-end branches to grow
    #[arg(short = 'd', long = "dead-ends")]
    dead_ends: Option<usize>,

    /// Keep rocks in a side layer instead of replacing floor
    #[arg(long = "overlay")]
    overlay: bool,

    /// Distance used to pick the exit
    #[arg(short = 'm', long = "metric", value_enum)]
    metric: Option<Metric>,

    /// Prefer an exit at the end of a dead end
    #[arg(long = "prefer-dead-end-exit")]
    prefer_dead_end_exit: bool,

    /// Print the result as JSON
    #[arg(long = "json")]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long = "log", default_value = "warn")]
    log: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Metric {
    Manhattan,
    Euclidean,
}

impl From<Metric> for DistanceMetric {
    fn from(metric: Metric) -> Self {
        match metric {
            Metric::Manhattan => DistanceMetric::Manhattan,
            Metric::Euclidean => DistanceMetric::Euclidean,
        }
    }
}

fn init_logging(level: &str) -> Result<(), String> {
    let directive: Directive = level
        .parse()
        .map_err(|e| format!("invalid log level '{level}': {e}"))?;
    let filter = EnvFilter::from_default_env().add_directive(directive);
    tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Build the config from the optional file, then apply flag overrides
fn build_config(args: &Args) -> Result<GenConfig, ConfigurationError> {
    let mut config = match &args.config {
        Some(path) => GenConfig::load_from_file(path)?,
        None => GenConfig::default(),
    };

    if let (Some(width), Some(height)) = (args.width, args.height) {
        config.grid = GridSize::Fixed { width, height };
    }
    if let Some(rooms) = args.rooms {
        config.room_count = rooms;
    }
    if let Some(dead_ends) = args.dead_ends {
        config.dead_end_count = dead_ends;
    }
    if args.overlay {
        config.obstacle_overlay = true;
    }
    if let Some(metric) = args.metric {
        config.exit_metric = metric.into();
    }
    if args.prefer_dead_end_exit {
        config.prefer_dead_end_exit = true;
    }
    Ok(config)
}

fn run(args: &Args) -> Result<(), String> {
    let config = build_config(args).map_err(|e| e.to_string())?;
    let mut rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };

    let result = generate(&config, &mut rng).map_err(|e| e.to_string())?;

    if args.json {
        let json = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        print!("{}", result.to_text());
        println!("{}", result.summary());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log) {
        eprintln!("dungen: {e}");
        return ExitCode::from(2);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dungen: {e}");
            ExitCode::FAILURE
        }
    }
}

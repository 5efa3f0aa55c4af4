use clap::{ArgAction, Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sporadic_barcode::{
    generate_bars, generate_starfield, load_book, load_or_new_book, render_starfield_svg, render_svg, replay_book, save_book,
    BarcodeConfig, BarcodeError, PatternLog, StarfieldConfig,
};

#[derive(Parser)]
#[command(name = "barcode")]
#[command(about = "Seeded barcode bands and starfields as SVG")]
struct Cli {
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the band as SVG.
    Svg {
        #[command(flatten)]
        band: BandArgs,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print the bar descriptors as JSON.
    Bars {
        #[command(flatten)]
        band: BandArgs,
    },
    /// Write a seeded starfield as SVG.
    Stars {
        #[arg(long, default_value = "")]
        seed: String,
        #[arg(long, default_value_t = 1200.0)]
        width: f64,
        #[arg(long, default_value_t = 84.0)]
        height: f64,
        #[arg(long, default_value_t = 45)]
        count: usize,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Append the generated band to a pattern book.
    Record {
        #[command(flatten)]
        band: BandArgs,
        #[arg(long)]
        book: PathBuf,
    },
    /// Regenerate every band in a pattern book and compare.
    Replay { book: PathBuf },
}

#[derive(Args)]
struct BandArgs {
    /// JSON file with a partial or full band config; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<String>,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(long)]
    ink: Option<String>,
    #[arg(long)]
    bg: Option<String>,
    #[arg(long)]
    density: Option<f64>,
    #[arg(long)]
    min_bar: Option<f64>,
    #[arg(long)]
    max_bar: Option<f64>,
    #[arg(long)]
    min_gap: Option<f64>,
    #[arg(long)]
    max_gap: Option<f64>,
    #[arg(long)]
    cluster_chance: Option<f64>,
    #[arg(long)]
    class: Option<String>,
}

impl BandArgs {
    fn resolve(self) -> Result<BarcodeConfig, BarcodeError> {
        let mut cfg = match &self.config {
            Some(path) => BarcodeConfig::from_json_file(path)?,
            None => BarcodeConfig::default(),
        };
        if let Some(v) = self.seed { cfg.seed = v; }
        if let Some(v) = self.width { cfg.width = v; }
        if let Some(v) = self.height { cfg.height = v; }
        if let Some(v) = self.ink { cfg.ink = v; }
        if let Some(v) = self.bg { cfg.bg = v; }
        if let Some(v) = self.density { cfg.density = v; }
        if let Some(v) = self.min_bar { cfg.min_bar = v; }
        if let Some(v) = self.max_bar { cfg.max_bar = v; }
        if let Some(v) = self.min_gap { cfg.min_gap = v; }
        if let Some(v) = self.max_gap { cfg.max_gap = v; }
        if let Some(v) = self.cluster_chance { cfg.cluster_chance = v; }
        if self.class.is_some() { cfg.class_name = self.class; }
        Ok(cfg)
    }
}

fn init_tracing(verbose: u8, json: bool) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn emit(out: Option<&Path>, body: &str) -> Result<(), BarcodeError> {
    match out {
        Some(path) => {
            fs::write(path, body)?;
            tracing::info!(path = %path.display(), bytes = body.len(), "wrote svg");
        }
        None => print!("{body}"),
    }
    Ok(())
}

fn run(command: Commands) -> Result<(), BarcodeError> {
    match command {
        Commands::Svg { band, out } => {
            let cfg = band.resolve()?;
            let bars = generate_bars(&cfg);
            emit(out.as_deref(), &render_svg(&cfg, &bars))
        }
        Commands::Bars { band } => {
            let cfg = band.resolve()?;
            println!("{}", serde_json::to_string_pretty(&generate_bars(&cfg))?);
            Ok(())
        }
        Commands::Stars { seed, width, height, count, out } => {
            let cfg = StarfieldConfig { seed, width, height, count, ..StarfieldConfig::default() };
            emit(out.as_deref(), &render_starfield_svg(&cfg, &generate_starfield(&cfg)))
        }
        Commands::Record { band, book } => {
            let cfg = band.resolve()?;
            let mut patterns = load_or_new_book(&book)?;
            let log = PatternLog::record(&cfg);
            println!("Recorded {} bars for seed {:?}", log.bars.len(), cfg.seed);
            patterns.push(log);
            save_book(&patterns, &book)
        }
        Commands::Replay { book } => {
            let patterns = load_book(&book)?;
            let n = replay_book(&patterns)?;
            println!("Replay OK for {} patterns", n);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "barcode command failed");
            match e {
                BarcodeError::Replay { .. } => eprintln!("Replay FAILED: {e}"),
                _ => eprintln!("error: {e}"),
            }
            ExitCode::FAILURE
        }
    }
}

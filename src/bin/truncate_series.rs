use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use series_ephem::accuracy::compare;
use series_ephem::io::{read_dataset, write_tiers};
use series_ephem::{
    EphemError, LunarDataset, LunarEphemeris, PlanetaryDataset, PlanetaryEphemeris,
    SeriesDataset, SeriesEphemeris, SizeTier, TruncationConfig, Truncator,
};

#[derive(Parser)]
#[command(name = "truncate_series")]
#[command(about = "Truncate VSOP87A and ELP/MPP02 series datasets into size tiers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Truncate a VSOP87A planetary dataset
    Planetary(TruncateArgs),
    /// Truncate an ELP/MPP02 lunar dataset
    Lunar(TruncateArgs),
}

#[derive(Args)]
struct TruncateArgs {
    /// Full-precision JSON dataset
    #[arg(short, long)]
    input: Utf8PathBuf,
    /// Directory receiving one JSON file per tier
    #[arg(short, long, default_value = "out")]
    output_dir: Utf8PathBuf,
    /// TOML file overriding the default thresholds and weights
    #[arg(short, long)]
    config: Option<Utf8PathBuf>,
    /// Tiers to produce, all of them when omitted
    #[arg(short, long = "tier")]
    tiers: Vec<SizeTier>,
    /// Compare each tier against the input with this many samples per interval
    #[arg(long)]
    compare: Option<usize>,
}

fn run<D, E>(
    args: TruncateArgs,
    build: impl Fn(D) -> Result<E, EphemError>,
) -> Result<(), EphemError>
where
    D: SeriesDataset,
    E: SeriesEphemeris,
{
    let config = match &args.config {
        Some(path) => TruncationConfig::from_file(path)?,
        None => TruncationConfig::default(),
    };
    let truncator = Truncator::new(config)?;
    let tiers = if args.tiers.is_empty() {
        SizeTier::ALL.to_vec()
    } else {
        args.tiers.clone()
    };

    let raw: D = read_dataset(&args.input)?;
    info!(input = %args.input, terms = raw.term_count(), "dataset loaded");

    let outputs = truncator.truncate_tiers(&raw, &tiers);
    for output in &outputs {
        println!("{}", output.report);
    }
    for written in write_tiers(&outputs, &args.input, &args.output_dir)? {
        println!("{} tier: {} ({} bytes)", written.tier, written.path, written.bytes);
    }

    if let Some(num) = args.compare {
        let reference = build(raw)?;
        for output in outputs {
            println!("\nAccuracy of the {} tier", output.tier);
            let bodies = output.dataset.body_names();
            let candidate = build(output.dataset)?;
            for body in bodies {
                println!("{}", compare(&candidate, &reference, Some(&body), num)?);
            }
        }
    }
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Planetary(args) => run::<PlanetaryDataset, _>(args, PlanetaryEphemeris::new),
        Commands::Lunar(args) => run::<LunarDataset, _>(args, LunarEphemeris::new),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

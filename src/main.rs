// ManaBox Enrich - CLI
// ManaBox CSV export → Scryfall lookups → JSON

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use manabox_enrich::{
    create_concise_output, csv_to_json, enrich_csv_with_scryfall, import_from_csv, save_to_json,
    EnrichedCard, ImportError, LookupConfig, OutputMode, ScryfallClient,
};

/// Import a ManaBox CSV export and enrich it with Scryfall data
#[derive(Parser, Debug)]
#[command(name = "manabox-enrich", version)]
#[command(after_help = "Examples:
    manabox-enrich --input cards.csv --output enriched_cards.json
    manabox-enrich -i input.csv -o output.json --delay 200 --verbose
    manabox-enrich -i input.csv -o concise.json --concise
    manabox-enrich -i input.csv -o concise.json --concise --flatten-legalities")]
struct Args {
    /// Path to input ManaBox CSV file
    #[arg(short, long)]
    input: PathBuf,

    /// Path for output JSON file
    #[arg(short, long)]
    output: PathBuf,

    /// Delay between Scryfall API requests in milliseconds
    #[arg(long, default_value_t = 100)]
    delay: u64,

    /// Output only game-mechanics fields (mana cost, type, power/toughness, colors, legalities, ...)
    #[arg(short, long)]
    concise: bool,

    /// Flatten legalities to commander_legal, standard_legal, modern_legal (only with --concise)
    #[arg(short, long)]
    flatten_legalities: bool,

    /// Convert the CSV without querying Scryfall
    #[arg(long)]
    skip_lookup: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn output_mode(&self) -> OutputMode {
        if self.concise {
            OutputMode::Concise {
                flatten_legalities: self.flatten_legalities,
            }
        } else {
            OutputMode::Full
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);

    match run(&args) {
        Ok(()) => {
            info!("Process completed successfully!");
            ExitCode::SUCCESS
        }
        Err(err) => {
            if err.downcast_ref::<ImportError>().is_some() {
                error!("ManaBox processing error: {:#}", err);
            } else {
                error!("Unexpected error: {:#}", err);
            }
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins when set; otherwise info, or debug with --verbose
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run(args: &Args) -> Result<()> {
    info!("Starting Scryfall ManaBox import");
    info!("Input: {}", args.input.display());
    info!("Output: {}", args.output.display());

    let mode = args.output_mode();
    match mode {
        OutputMode::Concise { flatten_legalities } => {
            info!("Using concise output (game-mechanics fields only)");
            if flatten_legalities {
                info!("Using flattened legalities (commander/standard/modern boolean fields)");
            }
        }
        OutputMode::Full if args.flatten_legalities => {
            warn!("--flatten-legalities has no effect without --concise");
        }
        OutputMode::Full => {}
    }

    if args.skip_lookup {
        return convert_without_lookup(args, mode);
    }

    let config = LookupConfig::from_env()?;
    let client = ScryfallClient::new(&config);
    let enriched = enrich_csv_with_scryfall(&args.input, &client, Duration::from_millis(args.delay))?;

    write_output(&enriched, mode, &args.output)
}

fn convert_without_lookup(args: &Args, mode: OutputMode) -> Result<()> {
    info!("Skipping Scryfall lookups");

    if mode == OutputMode::Full {
        csv_to_json(&args.input, &args.output)?;
        return Ok(());
    }

    let enriched: Vec<EnrichedCard> = import_from_csv(&args.input)?
        .into_iter()
        .map(|card| EnrichedCard {
            card,
            scryfall_data: None,
        })
        .collect();

    write_output(&enriched, mode, &args.output)
}

fn write_output(enriched: &[EnrichedCard], mode: OutputMode, path: &Path) -> Result<()> {
    match mode {
        OutputMode::Full => save_to_json(enriched, path),
        OutputMode::Concise { flatten_legalities } => {
            save_to_json(&create_concise_output(enriched, flatten_legalities), path)
        }
    }
}

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use lead_scout::config::{self, Config, SourceConfig, DEFAULT_LOG_LEVEL};
use lead_scout::scoring::{factors::parse_expiry, Clock, FixedClock, ScoreLabel, SystemClock};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_OUTPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List listings ranked by lead score (default if no subcommand)
    List {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show the factor breakdown for a listing by its index number
    Show {
        /// Index number of the listing (1-based, as shown in list)
        index: usize,
    },
    /// Write scored listings, with `score` set, to a JSON file
    Export {
        /// Output file path
        out: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(name = "lead-scout")]
#[command(about = "Expired-listing lead scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/lead-scout/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Listing files or glob patterns; replaces configured sources
    #[arg(short, long, global = true)]
    input: Vec<String>,

    /// Score as of this date or timestamp (e.g. 2024-06-15) instead of now
    #[arg(long, global = true, value_parser = parse_as_of)]
    as_of: Option<DateTime<Utc>>,

    /// Hide listings labelled below this (hot, warm, cool, cold)
    #[arg(long, global = true)]
    min_label: Option<ScoreLabel>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn parse_as_of(value: &str) -> Result<DateTime<Utc>, String> {
    parse_expiry(value)
        .ok_or_else(|| format!("expected a date such as 2024-06-15, got '{}'", value))
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::List {
        format: OutputFormat::Table,
    });
    let start_time = Instant::now();

    // Config file is optional when sources come from the command line
    let config_path = cli.config.map(PathBuf::from);
    let config_required = config_path.is_some() || cli.input.is_empty();
    let mut config: Config = match config::load_config(config_path, config_required) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if !cli.input.is_empty() {
        config.sources = cli.input.iter().map(SourceConfig::from_path).collect();
    }
    if cli.min_label.is_some() {
        config.min_label = cli.min_label;
    }

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let log_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    };
    if let Err(e) = lead_scout::telemetry::init(log_level) {
        eprintln!("Logging setup failed: {:#}", e);
        std::process::exit(EXIT_CONFIG);
    }

    if config.sources.is_empty() {
        eprintln!("No listing sources configured.");
        eprintln!("Pass --input or add sources to ~/.config/lead-scout/config.yaml:");
        eprintln!("  sources:");
        eprintln!("    - name: expired");
        eprintln!("      path: \"exports/expired-*.json\"");
        std::process::exit(EXIT_CONFIG);
    }

    let clock: Box<dyn Clock> = match cli.as_of {
        Some(instant) => Box::new(FixedClock(instant)),
        None => Box::new(SystemClock),
    };

    let listings = match lead_scout::source::load_listings(&config.sources) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    let ranked = lead_scout::rank::rank_listings(listings, clock.as_ref(), config.min_label);
    let use_colors = !cli.no_color && lead_scout::output::should_use_colors();

    match command {
        Commands::List { format } => match format {
            OutputFormat::Table => {
                println!(
                    "{}",
                    lead_scout::output::format_scored_table(&ranked, use_colors)
                );
            }
            OutputFormat::Tsv => {
                let output = lead_scout::output::format_tsv(&ranked);
                if !output.is_empty() {
                    println!("{}", output);
                }
            }
            OutputFormat::Json => match lead_scout::output::format_json(&ranked) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Output error: {:#}", e);
                    std::process::exit(EXIT_OUTPUT);
                }
            },
        },
        Commands::Show { index } => {
            // Validate index bounds (1-based)
            if index < 1 || index > ranked.len() {
                eprintln!(
                    "Invalid index {}. Must be between 1 and {}.",
                    index,
                    ranked.len()
                );
                std::process::exit(EXIT_INPUT);
            }
            println!(
                "{}",
                lead_scout::output::format_listing_detail(&ranked[index - 1], use_colors)
            );
        }
        Commands::Export { out } => {
            if let Err(e) = lead_scout::export::export_scored(&out, &ranked) {
                eprintln!("Export error: {:#}", e);
                std::process::exit(EXIT_OUTPUT);
            }
            println!("Wrote {} scored listings to {}", ranked.len(), out.display());
        }
    }

    info!(
        total = ranked.len(),
        elapsed = ?start_time.elapsed(),
        "done"
    );
    std::process::exit(EXIT_SUCCESS);
}

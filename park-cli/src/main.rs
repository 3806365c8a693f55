use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use park_cli::config::AppConfig;
use park_cli::form::BookingForm;
use park_cli::{app, logging};
use park_core::calculations::{COUNTER_TICK, parse_counter_target};
use park_core::checkout::CheckoutCoordinator;
use park_core::{BookingId, Rate, SlotSummary};
use park_data::{BookingLoader, DEFAULT_HISTORY_LIMIT, SlotLoader, recent_bookings};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// ParkWise booking helper.
///
/// Estimates parking costs, ends bookings through the ParkWise server and
/// shows dashboard counters and booking history from CSV exports.
#[derive(Debug, Parser)]
#[command(name = "parkwise", version, about)]
struct Cli {
    /// Configuration file (defaults to ./parkwise.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive; overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Hide log output on stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate the cost of a booking window.
    Estimate {
        /// Start date-time, e.g. 2024-01-01T10:00.
        #[arg(long)]
        start: String,

        /// End date-time, e.g. 2024-01-01T12:30.
        #[arg(long)]
        end: String,

        /// Hourly rate; overrides the config file.
        #[arg(long)]
        rate: Option<String>,
    },

    /// End a booking and settle its cost.
    Checkout {
        /// Booking id.
        booking_id: i64,

        /// Checkout server root; overrides the config file.
        #[arg(long)]
        base_url: Option<String>,

        /// Skip the confirmation prompt.
        #[arg(short, long, default_value_t = false)]
        yes: bool,
    },

    /// Show slot occupancy counters.
    Dashboard {
        /// Slots CSV export.
        #[arg(long)]
        slots: PathBuf,

        /// Count up to the values instead of printing them.
        #[arg(long, default_value_t = false)]
        animate: bool,
    },

    /// Recommend the best slot to park in right now.
    Recommend {
        /// Slots CSV export.
        #[arg(long)]
        slots: PathBuf,

        /// Also list every slot with its score.
        #[arg(long, default_value_t = false)]
        all: bool,
    },

    /// Count up to a value read from raw page text.
    CountUp {
        /// Text whose leading integer is the target, e.g. "42 slots".
        text: String,

        /// Count up instead of printing the target.
        #[arg(long, default_value_t = false)]
        animate: bool,
    },

    /// List recent bookings with their estimated cost.
    History {
        /// Bookings CSV export.
        #[arg(long)]
        bookings: PathBuf,

        /// Number of bookings to show.
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,

        /// Hourly rate; overrides the config file.
        #[arg(long)]
        rate: Option<String>,
    },
}

// ─── logging ─────────────────────────────────────────────────────────────────

fn apply_logging(
    cli: &Cli,
    config: &AppConfig,
) -> anyhow::Result<()> {
    if cli.quiet {
        logging::set_stderr_enabled(false)?;
    }
    let level = cli.log_level.as_deref().or_else(|| {
        (!logging::env_filter_set()).then_some(config.logging.level.as_str())
    });
    if let Some(level) = level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &config.logging.file {
        logging::enable_file_logging(path)?;
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    logging::init_default_logging();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    apply_logging(&cli, &config)?;

    let ansi = io::stdout().is_terminal();
    let mut stdout = io::stdout();

    match cli.command {
        Command::Estimate { start, end, rate } => {
            let rate = rate.or_else(|| Some(config.pricing.hourly_rate.to_string()));
            let form = BookingForm::new(start, end, rate);
            let view = form.view(&config.pricing.currency_symbol);
            println!("Estimated price: {}", view.price);
            if !view.duration.is_empty() {
                println!("Duration: {}", view.duration);
            }
        }

        Command::Checkout {
            booking_id,
            base_url,
            yes,
        } => {
            if let Some(base_url) = base_url {
                config.checkout.base_url = base_url;
            }
            let gateway_config = config.checkout.gateway_config();
            debug!(backend = %gateway_config.backend, base_url = %gateway_config.base_url, "creating checkout gateway");
            let gateway = app::build_registry()
                .create(&gateway_config)
                .await
                .context("Failed to set up checkout")?;
            let coordinator = CheckoutCoordinator::new(gateway);

            let outcome = app::run_checkout(
                &coordinator,
                BookingId(booking_id),
                &config.pricing.currency_symbol,
                yes,
                &mut io::stdin().lock(),
                &mut stdout,
                ansi,
            )
            .await?;

            return Ok(ExitCode::from(app::checkout_exit_status(outcome.as_ref())));
        }

        Command::Dashboard { slots, animate } => {
            let file = File::open(&slots)
                .with_context(|| format!("Failed to open: {}", slots.display()))?;
            let records = SlotLoader::parse(file)
                .with_context(|| format!("Failed to parse CSV: {}", slots.display()))?;
            let summary = SlotSummary::from_slots(&records);
            app::render_dashboard(&summary, animate, COUNTER_TICK, &mut stdout).await?;
        }

        Command::Recommend { slots, all } => {
            let file = File::open(&slots)
                .with_context(|| format!("Failed to open: {}", slots.display()))?;
            let records = SlotLoader::parse(file)
                .with_context(|| format!("Failed to parse CSV: {}", slots.display()))?;
            for line in app::recommendation_lines(&records, Utc::now(), all) {
                println!("{line}");
            }
        }

        Command::CountUp { text, animate } => match parse_counter_target(None, &text) {
            Some(target) => app::render_counter(target, animate, &mut stdout).await?,
            None => warn!(text = %text, "no leading integer, nothing to count"),
        },

        Command::History {
            bookings,
            limit,
            rate,
        } => {
            let file = File::open(&bookings)
                .with_context(|| format!("Failed to open: {}", bookings.display()))?;
            let records = BookingLoader::parse(file)
                .with_context(|| format!("Failed to parse CSV: {}", bookings.display()))?;
            let rate = match rate {
                Some(raw) => Rate::parse(Some(&raw)),
                None => config.pricing.hourly_rate,
            };

            let recent = recent_bookings(records, limit);
            for line in app::history_lines(&recent, rate, &config.pricing.currency_symbol) {
                println!("{line}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

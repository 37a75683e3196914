//! boktaisim - sunlight meter for players without a solar sensor
//!
//! Reads manual weather from a JSON config (or flags), computes the value
//! the cartridge's sensor would report, and prints it as a gauge.

mod gauge;
mod helpers;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use boktaisim_core::{Clock, FixedClock, SimConfig, SystemClock, TemperatureScale};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

use helpers::{time_today, Overrides, ReadingReport, Session};

#[derive(Parser, Debug)]
#[command(name = "boktaisim")]
#[command(version, about = "Simulate the Boktai solar sensor from the weather")]
struct Cli {
    /// Path to the JSON config file
    #[arg(long, global = true, default_value = "boktaisim.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one meter reading
    Reading {
        #[command(flatten)]
        overrides: Overrides,

        /// Seed for reproducible readings
        #[arg(long)]
        seed: Option<u64>,

        /// Read at this time today instead of now (HH:MM)
        #[arg(long)]
        at: Option<String>,

        /// Show temperatures in this unit (F or C)
        #[arg(long)]
        show_in: Option<TemperatureScale>,

        /// Print JSON instead of the gauge
        #[arg(long)]
        json: bool,
    },

    /// Print a fresh reading every update interval
    Watch {
        #[command(flatten)]
        overrides: Overrides,

        /// Number of readings, 0 = until interrupted
        #[arg(long, default_value = "0")]
        count: u64,

        /// Seconds between readings (defaults to the config interval)
        #[arg(long)]
        interval: Option<u64>,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        show_in: Option<TemperatureScale>,

        /// One JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// Sample many readings and print how often each value occurs
    Distribution {
        #[command(flatten)]
        overrides: Overrides,

        /// Number of readings to sample
        #[arg(long, default_value = "1000")]
        samples: usize,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        at: Option<String>,
    },

    /// Show or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a config file with default settings plus any flags
    Init {
        #[command(flatten)]
        overrides: Overrides,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logging comes up before the config is read so load failures are reported
    let from_env = EnvFilter::try_from_default_env().ok();
    let explicit = from_env.is_some();
    let filter = from_env.unwrap_or_else(|| EnvFilter::new(default_directives("info")));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = SimConfig::load(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))
        .and_then(|config| {
            // RUST_LOG wins over the config's level
            if !explicit {
                let level = default_directives(&config.logging_level);
                if let Err(e) = handle.reload(EnvFilter::new(level)) {
                    warn!("could not apply logging_level from config: {e}");
                }
            }
            run(&cli, config)
        });

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Filter directives for both crates at `level`
fn default_directives(level: &str) -> String {
    let level = level.trim().to_lowercase();
    format!("boktaisim={level},boktaisim_core={level}")
}

fn run(cli: &Cli, config: SimConfig) -> Result<()> {
    match &cli.command {
        Command::Reading {
            overrides,
            seed,
            at,
            show_in,
            json,
        } => {
            let mut session = Session::new(overrides.apply(config)?, *seed)?;
            let now = resolve_now(at.as_deref())?;
            let report = session.read(now)?;
            print_report(report, *show_in, *json)
        }

        Command::Watch {
            overrides,
            count,
            interval,
            seed,
            show_in,
            json,
        } => {
            let mut session = Session::new(overrides.apply(config)?, *seed)?;
            let interval = interval.unwrap_or(session.config().update_interval_secs);
            if interval == 0 {
                bail!("--interval must be at least 1 second");
            }
            info!("updating every {interval}s");

            let clock = SystemClock;
            let mut taken = 0u64;
            loop {
                match session.read(clock.now()) {
                    Ok(report) => print_report(report, *show_in, *json)?,
                    Err(e) => warn!("reading failed: {:#}", e),
                }
                taken += 1;
                if *count != 0 && taken >= *count {
                    break;
                }
                thread::sleep(Duration::from_secs(interval));
            }
            Ok(())
        }

        Command::Distribution {
            overrides,
            samples,
            seed,
            at,
        } => {
            if *samples == 0 {
                bail!("--samples must be at least 1");
            }
            let mut session = Session::new(overrides.apply(config)?, *seed)?;
            let now = resolve_now(at.as_deref())?;
            let (snapshot, histogram) = session.distribution(now, *samples)?;

            println!(
                "{} {} at {:.1}{}, sun {}",
                session.config().edition,
                snapshot.condition,
                snapshot.temperature_current,
                session.config().temp_scale.symbol(),
                snapshot.sun_position.phase(),
            );
            println!("{}", gauge::histogram(&histogram));
            Ok(())
        }

        Command::Config { action } => match action {
            ConfigAction::Show => {
                println!("{}", serde_json::to_string_pretty(&config)?);
                Ok(())
            }
            ConfigAction::Init { overrides, force } => {
                if cli.config.exists() && !*force {
                    bail!(
                        "{} already exists, pass --force to overwrite",
                        cli.config.display()
                    );
                }
                let config = overrides.apply(SimConfig::default())?;
                config.save(&cli.config)?;
                info!("wrote {}", cli.config.display());
                Ok(())
            }
        },
    }
}

fn resolve_now(at: Option<&str>) -> Result<boktaisim_core::Timestamp> {
    let clock = SystemClock;
    match at {
        Some(at) => Ok(FixedClock::new(time_today(at, clock.now())?).now()),
        None => Ok(clock.now()),
    }
}

fn print_report(report: ReadingReport, show_in: Option<TemperatureScale>, json: bool) -> Result<()> {
    let report = match show_in {
        Some(unit) => report.in_unit(unit),
        None => report,
    };
    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!(
            "{}  {}",
            report.at.format("%H:%M"),
            gauge::detailed(&report.reading, &report.snapshot, report.unit)
        );
    }
    Ok(())
}

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shellstate_booking::{FlightFilter, InMemoryFlightService, facade};
use shellstate_hydration::{HydrationAction, HydrationConfig};
use shellstate_persist::{FileStorage, KeyValueStorage, PersistenceGateway};
use shellstate_shell::{FLIGHT_BOOKING_PREFIX, Shell};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shellstate-cli", about = "Boot the shell against on-disk storage")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding persistence records
    #[arg(long, default_value = "./shell_data")]
    data_dir: PathBuf,

    /// YAML file with hydration settings
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print versions, configuration and storage location
    Info,
    /// Boot the shell and print the hydration outcome
    Boot,
    /// Search flights on the booking route
    Search {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Only flights departing within a day
        #[arg(long)]
        urgent: bool,
    },
    /// Delay a loaded flight
    Delay {
        #[arg(long)]
        id: u64,
    },
    /// Clear loaded flights
    Clear,
    /// Print the stored record
    Show,
    /// Remove the stored record
    Forget,
}

const SEARCH_ROUTE: &str = "flight-search";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => HydrationConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => HydrationConfig::default(),
    };
    config.validate()?;
    let storage = FileStorage::open(&cli.data_dir)
        .with_context(|| format!("opening data dir {}", cli.data_dir.display()))?;

    match cli.command {
        Commands::Info => {
            println!("shellstate-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("hydration key: {}", config.hydration_key);
            println!("router state key: {}", config.router_state_key);
            println!(
                "record: {}",
                storage.record_path(&config.hydration_key)?.display()
            );
        }
        Commands::Boot => {
            let shell = Shell::boot(config, storage, InMemoryFlightService::seeded(), "/")?;
            print_outcome(shell.hydration_outcome());
            println!("{}", serde_json::to_string_pretty(shell.store().state())?);
        }
        Commands::Search { from, to, urgent } => {
            let mut shell = boot_booking(config, storage)?;
            let filter = FlightFilter::new(from, to).urgent(urgent);
            if !facade::search(shell.store_mut(), filter) {
                anyhow::bail!("both --from and --to are required");
            }
            let flights = facade::flights(shell.store())?;
            println!("{} flight(s)", flights.len());
            for flight in flights {
                let mark = if flight.delayed { " (delayed)" } else { "" };
                println!(
                    "#{} {} -> {} at {}{mark}",
                    flight.id, flight.from, flight.to, flight.date
                );
            }
        }
        Commands::Delay { id } => {
            let mut shell = boot_booking(config, storage)?;
            let flight = facade::delay(shell.store_mut(), id)?;
            println!("flight #{} now departs at {}", flight.id, flight.date);
        }
        Commands::Clear => {
            let mut shell = boot_booking(config, storage)?;
            facade::clear(shell.store_mut());
            println!("flights cleared");
        }
        Commands::Show => match storage.get_item(&config.hydration_key)? {
            Some(record) => println!("{record}"),
            None => println!("no record under {}", config.hydration_key),
        },
        Commands::Forget => {
            let mut gateway = PersistenceGateway::new(storage);
            gateway.remove(&config.hydration_key);
            println!("record {} removed", config.hydration_key);
        }
    }

    Ok(())
}

/// Boot at the root route, then enter the booking routes so the ticket
/// feature is mounted and lazily hydrated.
fn boot_booking(config: HydrationConfig, storage: FileStorage) -> anyhow::Result<Shell> {
    let mut shell = Shell::boot(config, storage, InMemoryFlightService::seeded(), "/")?;
    print_outcome(shell.hydration_outcome());
    shell.navigate(&format!("{FLIGHT_BOOKING_PREFIX}/{SEARCH_ROUTE}"))?;
    Ok(shell)
}

fn print_outcome(outcome: Option<&HydrationAction>) {
    match outcome {
        Some(action) => println!("hydration: {}", action.kind()),
        None => println!("hydration: pending"),
    }
}

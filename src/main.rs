use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process;

use mrp_dashboard::config::Config;
use mrp_dashboard::period::PeriodKey;
use mrp_dashboard::{dashboard, logging, snapshot, ConfigError, DashboardError};

#[derive(Parser)]
#[command(name = "mrp-dashboard")]
#[command(about = "Production planning dashboard in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Simulated fetch latency in milliseconds
    #[arg(long, global = true)]
    latency_ms: Option<u64>,

    /// Start in the empty state
    #[arg(long, global = true)]
    no_data: bool,

    /// Reporting period of the production status panel
    #[arg(short, long, global = true, value_enum)]
    period: Option<PeriodKey>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive dashboard (default)
    Tui,
    /// Print the settled dashboard state as JSON
    Snapshot {
        /// Viewport width in pixels used for the donut geometry
        #[arg(short, long, default_value_t = 1280)]
        width: u32,
    },
    /// Write the effective configuration to the config file
    Init,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(_) => (),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.verbose && std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "mrp_dashboard=debug,warn");
    }

    let mut config = match Config::load() {
        Ok(config) => config,
        // No home directory, e.g. in a bare container
        Err(DashboardError::Config(ConfigError::DirectoryUnavailable)) => Config::default(),
        Err(e) => return Err(e).context("Failed to load configuration"),
    };
    if let Some(latency_ms) = cli.latency_ms {
        config.latency_ms = latency_ms;
    }
    if cli.no_data {
        config.has_data = false;
    }
    if let Some(period) = cli.period {
        config.period = period;
    }

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            // Keep the guard alive so buffered log lines get flushed on exit
            let _guard = logging::init_with_file(&config.log_file)
                .context("Failed to initialize file logging")?;
            tracing::info!(?config, "Starting dashboard");
            dashboard::run_dashboard(config).await
        }
        Commands::Snapshot { width } => {
            logging::init();
            let snapshot =
                snapshot::capture(config.latency(), config.has_data, config.period, width).await;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            Ok(())
        }
        Commands::Init => {
            config.save().context("Failed to save configuration")?;
            if let Some(path) = Config::get_config_path() {
                println!("Configuration written to {}", path.display());
            }
            Ok(())
        }
    }
}

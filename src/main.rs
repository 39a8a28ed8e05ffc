/// Version injected at compile time via IBMREAD_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("IBMREAD_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ibmread::config::Config;
use ibmread::datasource::{pi_snapshot, virtual_network_interface, ReadResult};
use ibmread::ibm::{auth, format_ibm_error, ClientSettings, IbmClient};
use ibmread::schema;
use serde::Serialize;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Read IBM Cloud resources as flattened data source attributes
#[derive(Parser, Debug)]
#[command(name = "ibmread", version = VERSION, about, long_about = None)]
struct Args {
    /// IBM Cloud region to use
    #[arg(short, long, global = true)]
    region: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a virtual network interface (ibm_is_virtual_network_interface)
    VirtualNetworkInterface {
        /// The virtual network interface identifier
        #[arg(long)]
        id: String,
    },
    /// Read the snapshots of a PVM instance (ibm_pi_pvm_snapshots)
    PiSnapshots {
        /// The GUID of the Power service instance
        #[arg(long)]
        cloud_instance_id: String,
        /// The identifier or name of the PVM instance
        #[arg(long)]
        instance: String,
        /// Account owning the workspace (overrides power_account_id)
        #[arg(long)]
        account_id: Option<String>,
        /// Zone of the workspace, e.g. dal12 (overrides power_zone)
        #[arg(long)]
        zone: Option<String>,
    },
    /// Print the declared schema of a data source
    Schema {
        /// Data source name, e.g. ibm_is_virtual_network_interface
        name: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("ibmread started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("ibmread").join("ibmread.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".ibmread").join("ibmread.log");
    }
    PathBuf::from("ibmread.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    if let Err(err) = run(&args).await {
        tracing::error!("{:#}", err);
        eprintln!("Error: {}", format_ibm_error(&err));
        std::process::exit(1);
    }

    Ok(())
}

async fn run(args: &Args) -> Result<()> {
    let (data_source, result) = match &args.command {
        Command::VirtualNetworkInterface { id } => {
            let client = connect(args, |_| {})?;
            (
                virtual_network_interface::DATA_SOURCE_NAME,
                virtual_network_interface::read(&client, id).await?,
            )
        },
        Command::PiSnapshots {
            cloud_instance_id,
            instance,
            account_id,
            zone,
        } => {
            let client = connect(args, |settings| {
                if let Some(account_id) = account_id {
                    settings.power_account_id = Some(account_id.clone());
                }
                if let Some(zone) = zone {
                    settings.power_zone = Some(zone.clone());
                }
            })?;
            (
                pi_snapshot::DATA_SOURCE_NAME,
                pi_snapshot::read(&client, cloud_instance_id, instance).await?,
            )
        },
        Command::Schema { name } => {
            let schema = schema::get_data_source(name).with_context(|| {
                format!(
                    "Unknown data source: {} (known: {})",
                    name,
                    schema::get_all_data_source_names().join(", ")
                )
            })?;
            return print_output(schema, args.output);
        },
    };

    check_contract(data_source, &result)?;
    print_output(&result, args.output)
}

/// Build the API client (CLI > config > environment > defaults)
fn connect(args: &Args, overrides: impl FnOnce(&mut ClientSettings)) -> Result<IbmClient> {
    let config = Config::load();
    let region = config.effective_region(args.region.as_deref());
    let api_key = auth::api_key_from_env().with_context(|| {
        format!(
            "No API key configured. Set one of: {}",
            auth::API_KEY_ENV_VARS.join(", ")
        )
    })?;

    let mut settings = config.client_settings(&region);
    overrides(&mut settings);

    tracing::info!("Using region: {}", region);
    IbmClient::new(settings, &api_key)
}

/// Reject trees that break the data source's declared schema
fn check_contract(data_source: &str, result: &ReadResult) -> Result<()> {
    let schema = schema::get_data_source(data_source)
        .with_context(|| format!("No schema declared for {}", data_source))?;

    let violations = schema.validate(&result.attributes);
    if violations.is_empty() {
        return Ok(());
    }

    for violation in &violations {
        tracing::error!("{}: {}", data_source, violation);
    }
    Err(anyhow::anyhow!(
        "{} produced {} schema violation(s), first: {}",
        data_source,
        violations.len(),
        violations[0]
    ))
}

fn print_output<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    println!("{}", rendered);
    Ok(())
}

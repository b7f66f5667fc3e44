#![forbid(unsafe_code)]

use clap::{error::ErrorKind, ArgAction, Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;
use synthbench_model::{
    all_problems, parse_dataset_name, DatasetName, PSB1_PROBLEMS, PSB2_PROBLEMS,
};
use synthbench_store::{
    DatasetStore, ReadOptions, DATASET_BUCKET, DEFAULT_ENDPOINT, EDGE_CASE_COLUMN,
    ENV_SYNTHBENCH_CACHE_DIR,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    DependencyFailure = 4,
    Internal = 10,
}

impl ExitCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Usage => "usage",
            Self::DependencyFailure => "dependency_failure",
            Self::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl MachineError {
    #[must_use]
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.details.insert(key.to_string(), value.to_string());
        self
    }
}

#[derive(Parser)]
#[command(name = "synthbench")]
#[command(about = "Program-synthesis benchmark dataset operations CLI")]
#[command(
    after_help = "Environment:\n  SYNTHBENCH_CACHE_DIR   Default --cache-dir for read\n  RUST_LOG               Log verbosity override"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    Download {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
        #[arg(long, default_value = DATASET_BUCKET)]
        bucket: String,
        #[arg(long, default_value_t = false)]
        all: bool,
        datasets: Vec<String>,
    },
    Read {
        #[arg(long)]
        dataset: String,
        #[arg(long)]
        cache_dir: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        force_download: bool,
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
        #[arg(long, default_value = DATASET_BUCKET)]
        bucket: String,
    },
}

#[derive(Subcommand)]
enum CatalogCommand {
    List {
        #[arg(long, value_enum)]
        group: Option<GroupCli>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GroupCli {
    Psb1,
    Psb2,
}

#[derive(Clone, Copy)]
struct OutputMode {
    json: bool,
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code as u8)
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                return Err(CliError::usage("invalid command line arguments")
                    .with_detail("error", &err.to_string()));
            }
        },
    };
    init_logging(cli.quiet, cli.verbose);
    let output_mode = OutputMode { json: cli.json };

    let command = cli
        .command
        .ok_or_else(|| CliError::usage("missing command; see --help"))?;

    match command {
        Commands::Catalog { command } => match command {
            CatalogCommand::List { group } => run_catalog_list(group, output_mode),
        },
        Commands::Download {
            out,
            endpoint,
            bucket,
            all,
            datasets,
        } => run_download(out, endpoint, bucket, all, &datasets, output_mode),
        Commands::Read {
            dataset,
            cache_dir,
            force_download,
            endpoint,
            bucket,
        } => run_read(&dataset, cache_dir, force_download, endpoint, bucket, output_mode),
    }
}

fn run_catalog_list(group: Option<GroupCli>, output_mode: OutputMode) -> Result<(), CliError> {
    let names: Vec<String> = match group {
        Some(GroupCli::Psb1) => PSB1_PROBLEMS.iter().map(ToString::to_string).collect(),
        Some(GroupCli::Psb2) => PSB2_PROBLEMS.iter().map(ToString::to_string).collect(),
        None => all_problems()
            .into_iter()
            .map(DatasetName::into_inner)
            .collect(),
    };
    if output_mode.json {
        emit_ok(output_mode, json!({"command": "catalog list", "problems": names}))?;
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}

fn run_download(
    out: PathBuf,
    endpoint: String,
    bucket: String,
    all: bool,
    datasets: &[String],
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let names = if all {
        if !datasets.is_empty() {
            return Err(CliError::usage("--all cannot be combined with dataset names"));
        }
        all_problems()
    } else {
        if datasets.is_empty() {
            return Err(CliError::usage("no datasets requested; pass names or --all"));
        }
        let mut names = Vec::with_capacity(datasets.len());
        for raw in datasets {
            names.push(parse_dataset_name(raw).map_err(|e| {
                CliError::usage("invalid dataset name").with_detail("error", &e.to_string())
            })?);
        }
        names
    };

    let store = DatasetStore::new()
        .with_endpoint(endpoint)
        .with_bucket(bucket);
    tracing::info!(count = names.len(), out = %out.display(), "downloading datasets");
    store
        .download_datasets(&out, &names)
        .map_err(|e| CliError::dependency(&e.to_string()))?;
    tracing::info!(count = names.len(), "download finished");

    emit_ok(
        output_mode,
        json!({
            "command": "download",
            "status": "ok",
            "datasets": names.len(),
            "out": out,
        }),
    )
}

fn run_read(
    dataset: &str,
    cache_dir: Option<PathBuf>,
    force_download: bool,
    endpoint: String,
    bucket: String,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let dataset = parse_dataset_name(dataset)
        .map_err(|e| CliError::usage("invalid dataset name").with_detail("error", &e.to_string()))?;

    let mut options = ReadOptions::new().with_force_download(force_download);
    if let Some(dir) = cache_dir.or_else(cache_dir_from_env) {
        options = options.with_cache_dir(dir);
    }

    let store = DatasetStore::new()
        .with_endpoint(endpoint)
        .with_bucket(bucket);
    tracing::info!(dataset = %dataset, force_download, "reading dataset");
    let table = store
        .read_dataset(&dataset, &options)
        .map_err(|e| CliError::dependency(&e.to_string()))?;

    if output_mode.json {
        let ndjson = table
            .to_ndjson()
            .map_err(|e| CliError::internal(&e.to_string()))?;
        print!("{ndjson}");
        return Ok(());
    }

    let edge_rows = table
        .rows()
        .iter()
        .filter(|row| row.value(EDGE_CASE_COLUMN) == &Value::Bool(true))
        .count();
    println!(
        "dataset={} rows={} edge_rows={} columns={}",
        dataset,
        table.row_count(),
        edge_rows,
        table.columns().join(",")
    );
    Ok(())
}

/// Default `--cache-dir` from the environment; blank values count as unset.
fn cache_dir_from_env() -> Option<PathBuf> {
    let raw = std::env::var(ENV_SYNTHBENCH_CACHE_DIR).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

fn init_logging(quiet: bool, verbose: u8) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn emit_ok(output_mode: OutputMode, payload: Value) -> Result<(), CliError> {
    let encoded = if output_mode.json {
        serde_json::to_string(&payload).map_err(|e| CliError::internal(&e.to_string()))?
    } else {
        serde_json::to_string_pretty(&payload).map_err(|e| CliError::internal(&e.to_string()))?
    };
    println!("{encoded}");
    Ok(())
}

#[derive(Debug)]
pub struct CliError {
    exit_code: ExitCode,
    machine: MachineError,
}

impl CliError {
    fn usage(message: &str) -> Self {
        Self {
            exit_code: ExitCode::Usage,
            machine: MachineError::new("usage_error", message),
        }
    }

    fn dependency(message: &str) -> Self {
        Self {
            exit_code: ExitCode::DependencyFailure,
            machine: MachineError::new("dependency_failure", message),
        }
    }

    fn internal(message: &str) -> Self {
        Self {
            exit_code: ExitCode::Internal,
            machine: MachineError::new("internal_error", message),
        }
    }

    fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.machine = self.machine.with_detail(key, value);
        self
    }
}

fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine.message);
    }
}

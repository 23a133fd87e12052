//! Render a grid definition on the "server" and optionally replay client
//! interactions against the hydrated result.

mod definition;
mod script;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::PoisonError;

use clap::Parser;
use griddom::Document;
use gridui::{Grid, GridError, SnapshotCodec};
use log::{LevelFilter, error, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

use definition::GridDefinition;

#[derive(Parser, Debug)]
#[command(name = "gridui")]
#[command(about = "Render grids server-side and replay client interactions", long_about = None)]
struct Cli {
    /// Path to the JSON grid definition
    definition: PathBuf,

    /// JSON script of interactions to replay after hydrating
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Hydrate the rendered markup even without a script
    #[arg(long)]
    hydrate: bool,

    /// Print the decoded snapshot instead of markup
    #[arg(long)]
    snapshot: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,

    /// Write the log to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn init_logging(cli: &Cli) -> Result<(), CliError> {
    match &cli.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            WriteLogger::init(cli.log_level, Config::default(), file)?;
        }
        None => TermLogger::init(
            cli.log_level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?,
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let definition =
        GridDefinition::from_json(&read(&cli.definition)?).map_err(|source| CliError::Json {
            path: cli.definition.clone(),
            source,
        })?;
    let grid = definition.build()?;
    info!(
        "built grid '{}' with {} rows",
        definition.id,
        grid.num_rows()
    );

    if cli.snapshot {
        return Ok(SnapshotCodec::to_json(&grid.snapshot()));
    }

    let html = grid.render()?;
    if cli.script.is_none() && !cli.hydrate {
        return Ok(html);
    }

    let doc = Document::parse(&html).into_shared();
    let client = Grid::hydrate(doc.clone(), &definition.id)?;
    if let Some(path) = &cli.script {
        let steps = script::parse_script(&read(path)?).map_err(|source| CliError::Json {
            path: path.clone(),
            source,
        })?;
        script::replay(&client, &steps)?;
        info!("replayed {} steps", steps.len());
    }

    let guard = doc.read().unwrap_or_else(PoisonError::into_inner);
    Ok(guard.to_html())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

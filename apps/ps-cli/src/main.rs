mod export;
mod sweep;

use clap::{Parser, Subcommand, ValueEnum};
use ps_batch::{Batch, BatchError, ExtremeKind};
use ps_project::{OutputFormat, ProjectError};
use ps_sim::{MODEL_NAMES, Model, SimError};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "ps-cli")]
#[command(about = "paramsweep CLI - batch sensitivity analysis of model runs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a sweep configuration and resolve its varying parameters
    Validate {
        /// Path to the sweep YAML or JSON file
        config_path: PathBuf,
    },
    /// List the built-in models
    Models,
    /// Run a sweep and export a cross-run summary
    Run {
        /// Path to the sweep YAML or JSON file
        config_path: PathBuf,
        /// Report values at this time (defaults to the config, then the end time)
        #[arg(long)]
        value_at: Option<f64>,
        /// Report an extreme instead: tMin, tMax, yMin or yMax
        #[arg(long, conflicts_with = "value_at")]
        extreme: Option<ExtremeKind>,
        /// Output format (defaults to the config)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Run one combination at a time, reporting progress
        #[arg(long)]
        step: bool,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Models => {
            for name in MODEL_NAMES {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Run {
            config_path,
            value_at,
            extreme,
            format,
            output,
            step,
        } => cmd_run(
            &config_path,
            value_at,
            extreme,
            format.map(OutputFormat::from),
            output.as_deref(),
            step,
        ),
    }
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    eprintln!("Validating sweep: {}", config_path.display());
    let config = ps_project::load(config_path)?;
    sweep::build_model(&config)?;
    let pars = sweep::build_pars(&config)?;
    eprintln!(
        "✓ Sweep is valid: model '{}', {} runs",
        config.model,
        pars.n_combinations()
    );
    Ok(())
}

fn cmd_run(
    config_path: &Path,
    value_at: Option<f64>,
    extreme: Option<ExtremeKind>,
    format: Option<OutputFormat>,
    output: Option<&Path>,
    step: bool,
) -> CliResult<()> {
    let config = ps_project::load(config_path)?;
    let model = sweep::build_model(&config)?;
    let pars = sweep::build_pars(&config)?;
    let varying: Vec<String> = pars.varying.iter().map(|v| v.name.clone()).collect();
    let n_runs = pars.n_combinations();
    eprintln!(
        "Running sweep '{}': model '{}', {} runs",
        config.name, config.model, n_runs
    );

    let started = Instant::now();
    let mut batch = Batch::new(
        model,
        pars,
        config.time.t_start,
        config.time.t_end,
        sweep::batch_options(&config),
    )?;
    if step {
        run_stepwise(&mut batch, n_runs)?;
    } else {
        batch.run()?;
    }
    info!(elapsed_s = started.elapsed().as_secs_f64(), "sweep finished");
    print_run_summary(&batch);

    let set = match extreme {
        Some(kind) => batch.extreme(kind)?,
        None => {
            let time = value_at
                .or(config.output.value_at)
                .unwrap_or(config.time.t_end);
            batch.value_at_time(time)?
        }
    };

    let content = match format.unwrap_or(config.output.format) {
        OutputFormat::Csv => export::to_csv(&set, &varying),
        OutputFormat::Json => export::to_json(&set)?,
    };
    write_output(&content, output, set.x.len())
}

fn run_stepwise(batch: &mut Batch<Model>, n_runs: usize) -> CliResult<()> {
    let width = 28usize;
    loop {
        let done = batch.compute()?;
        let completed = batch.run_statuses().len();
        let fraction = completed as f64 / n_runs.max(1) as f64;
        let filled = ((fraction * width as f64).round() as usize).min(width);
        let last = batch
            .run_statuses()
            .last()
            .map(|s| format!("{} {}", if s.success { "ok" } else { "failed" }, s.pars))
            .unwrap_or_default();
        eprint!(
            "\r[{}{}] {:>3}/{}  {}",
            "#".repeat(filled),
            "-".repeat(width - filled),
            completed,
            n_runs,
            last
        );
        let _ = io::stderr().flush();
        if done {
            eprintln!();
            return Ok(());
        }
    }
}

fn print_run_summary(batch: &Batch<Model>) {
    let errors = batch.errors();
    eprintln!(
        "✓ {} of {} runs succeeded",
        batch.solutions().len(),
        batch.run_statuses().len()
    );
    for status in errors {
        eprintln!(
            "  ✗ {}: {}",
            status.pars,
            status.error.as_deref().unwrap_or_default()
        );
    }
}

fn write_output(content: &str, output: Option<&Path>, rows: usize) -> CliResult<()> {
    if let Some(path) = output {
        std::fs::write(path, content)?;
        eprintln!("✓ Exported {} rows to {}", rows, path.display());
    } else {
        print!("{}", content);
    }
    Ok(())
}

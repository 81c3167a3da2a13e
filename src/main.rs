use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use reckon::calculator::Calculator;
use reckon::config::CalculatorConfig;
use reckon::{logging, repl};

#[derive(Parser)]
#[command(name = "reckon", version, about = "An interactive arithmetic REPL calculator")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the history file location.
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Log at debug level by default.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CalculatorConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => CalculatorConfig::default(),
    };

    if let Some(path) = &args.history_file {
        apply_history_override(&mut config, path)?;
    }

    let _logging = logging::init(&config, args.verbose)?;
    info!(history = %config.history_path().display(), "starting reckon");

    let mut calculator = Calculator::new(config).context("failed to initialize calculator")?;
    repl::run(&mut calculator)
}

/// Split a `--history-file` path into the config's directory/file pair.
fn apply_history_override(config: &mut CalculatorConfig, path: &Path) -> anyhow::Result<()> {
    let file = path
        .file_name()
        .with_context(|| format!("{} has no file name", path.display()))?;
    config.history_file = file.to_string_lossy().into_owned();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        config.history_dir = parent.to_path_buf();
    }
    Ok(())
}

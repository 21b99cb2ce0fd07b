mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod repl;
mod session;
mod status;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use larder_core::store;
use larder_core::warnings::scan_dataset;

use cli::{Cli, CliCommand};
use config::EditorConfig;
use error::CommandResult;
use session::Session;

fn main() -> ExitCode {
    let args = Cli::parse();

    let (config, config_error) = config::load_or_default(&args.config);
    if let Err(e) = logging::install(&config.editor.log_level) {
        eprintln!("failed to install logger: {e}");
    }
    match config_error {
        Some(e) => log::warn!("No config file ({e}), using defaults"),
        None => log::info!("Loaded config {}", args.config.display()),
    }
    log::debug!("larder v{}, core v{}", env!("CARGO_PKG_VERSION"), larder_core::VERSION);

    let result = match args.command {
        CliCommand::Check { file } => check(&file),
        CliCommand::Convert { input, output } => convert(&input, &output),
        CliCommand::Edit { file } => edit(file, &config),
    };

    result.unwrap_or_else(|err| {
        log::error!("{err}");
        ExitCode::FAILURE
    })
}

/// Prints entry counts and duplicate-id warnings. Fails when there are warnings.
fn check(path: &Path) -> CommandResult<ExitCode> {
    let data = store::load(path)?;
    println!(
        "{}: {} ingredients, {} recipes",
        path.display(),
        data.ingredients.len(),
        data.recipes.len()
    );

    let warnings = scan_dataset(&data.ingredients, &data.recipes);
    for warning in &warnings {
        println!("{warning}");
    }
    Ok(if warnings.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn convert(input: &Path, output: &Path) -> CommandResult<ExitCode> {
    // Resolve both formats up front so a bad output name fails before reading.
    let from = store::format_for(input)?;
    let to = store::format_for(output)?;
    let data = store::load(input)?;
    store::save(output, &data)?;
    log::info!("Converted {from} -> {to}");
    Ok(ExitCode::SUCCESS)
}

fn edit(file: Option<PathBuf>, config: &EditorConfig) -> CommandResult<ExitCode> {
    let mut session = Session::new(config.warnings.duplicate_ids);
    let file = file.or_else(|| config.editor.default_file.clone());
    match file {
        Some(path) => {
            if let Err(err) = session.open(&path) {
                log::error!("{err}");
                session.status_mut().set_error(err.banner());
            }
        }
        None => session.new_document(),
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    if let Err(e) = repl::run(&mut session, stdin.lock(), &mut stdout) {
        log::error!("Session ended: {e}");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

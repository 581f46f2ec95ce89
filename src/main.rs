// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error};
use std::io::Write;
use std::path::PathBuf;

use pretranslate::app_config::{self, Config};
use pretranslate::{AppError, Controller, Phase};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a pipeline phase (default command)
    Run(RunArgs),

    /// Generate shell completions for pretranslate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Phase to run: 1 aggregates documents, 2 repairs the translated table
    #[arg(value_name = "PHASE")]
    phase: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Directory tree holding the documents to translate
    #[arg(long)]
    todo_dir: Option<PathBuf>,

    /// Staging directory between the two phases
    #[arg(long)]
    intermediate_dir: Option<PathBuf>,

    /// Destination of the repaired table and the documents
    #[arg(long)]
    final_dir: Option<PathBuf>,
}

/// pretranslate - glossary pretranslation for XML spreadsheet string tables
///
/// Runs one of the two batch phases around an external bulk translation step.
#[derive(Parser, Debug)]
#[command(name = "pretranslate")]
#[command(version)]
#[command(about = "Prepare spreadsheet string tables for bulk translation")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "pretranslate prepares XML spreadsheet string tables for bulk machine translation.

PHASES:
    1   Move every .xml document from the todo tree into the intermediate
        directory and aggregate their rows into intermediate.csv, with
        glossary terms already pretranslated in the Target column.
    2   Repair placeholders in the translated intermediate.csv, write it to
        final.csv and move the documents to the final directory.

EXAMPLES:
    pretranslate 1                              # Aggregate ../todo
    pretranslate 2                              # Repair and finalize
    pretranslate --todo-dir ./in 1              # Use another input tree
    pretranslate --log-level debug 1            # Verbose run
    pretranslate completions bash > pretranslate.bash")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and marker for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌ "),
            Level::Warn => ("\x1B[1;33m", "🚧 "),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍 "),
            Level::Trace => ("\x1B[1;35m", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, marker) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() {
    // Start at info; the level is adjusted once the configuration is known
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "pretranslate", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Run(args)) => run(args),
        None => run(cli.run),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        let app_error = AppError::from(e);
        debug!("Exiting with {:?}", app_error);
        std::process::exit(app_error.exit_code());
    }
}

fn run(options: RunArgs) -> Result<()> {
    if let Some(level) = &options.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    // The phase is checked before anything touches the filesystem
    let phase: Phase = options
        .phase
        .as_deref()
        .ok_or_else(|| anyhow!("PHASE is required, use 1 or 2"))?
        .parse()?;

    let mut config = Config::load_or_default(&options.config_path)?;

    if let Some(todo_dir) = options.todo_dir {
        config.paths.todo_dir = todo_dir;
    }
    if let Some(intermediate_dir) = options.intermediate_dir {
        config.paths.intermediate_dir = intermediate_dir;
    }
    if let Some(final_dir) = options.final_dir {
        config.paths.final_dir = final_dir;
    }

    match &options.log_level {
        Some(level) => config.log_level = level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }
    debug!("Using configuration: {:?}", config);

    let controller = Controller::with_config(config)?;
    controller.run_phase(phase)
}

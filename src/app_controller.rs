use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{info, warn};
use std::fmt;
use std::time::Instant;

use crate::aggregator::{AggregateStats, Aggregator};
use crate::app_config::Config;
use crate::errors::ConfigError;
use crate::file_utils::{FileManager, FlattenStats};
use crate::translation::repair::{self, RepairStats};

// @module: Application controller for the two pipeline phases

/// Pipeline phase selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Collect documents and build the pretranslated table
    Aggregate,
    /// Repair the translated table and move documents to the final directory
    Finalize,
}

impl TryFrom<u8> for Phase {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Phase::Aggregate),
            2 => Ok(Phase::Finalize),
            other => Err(ConfigError::InvalidPhase(other.to_string())),
        }
    }
}

impl std::str::FromStr for Phase {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| ConfigError::InvalidPhase(s.to_string()))
            .and_then(Phase::try_from)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Aggregate => write!(f, "1"),
            Phase::Finalize => write!(f, "2"),
        }
    }
}

/// Outcome of phase 1
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateReport {
    pub flatten: FlattenStats,
    pub aggregate: AggregateStats,
}

/// Outcome of phase 2
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalizeReport {
    pub repair: RepairStats,
    pub flatten: FlattenStats,
}

/// Main application controller for the pretranslation pipeline
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Draw progress bars on stderr
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self {
            config,
            show_progress: true,
        })
    }

    /// Disable progress bars, for tests and non-interactive runs
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Run one phase and log its summary
    pub fn run_phase(&self, phase: Phase) -> Result<()> {
        let start_time = Instant::now();
        info!("Starting phase {}", phase);

        match phase {
            Phase::Aggregate => {
                let report = self.run_aggregate()?;
                info!(
                    "Moved {} documents, wrote {} rows from {} documents ({} glossary substitutions)",
                    report.flatten.moved,
                    report.aggregate.rows,
                    report.aggregate.documents,
                    report.aggregate.substitutions
                );
                if report.aggregate.oversized_entries > 0 {
                    warn!(
                        "{} entries exceed {} characters and must be split for translation",
                        report.aggregate.oversized_entries, self.config.max_entry_chars
                    );
                }
                info!("Table ready for translation: {:?}", self.config.intermediate_table_path());
            }
            Phase::Finalize => {
                let report = self.run_finalize()?;
                info!(
                    "Repaired {} placeholders in {} of {} rows, moved {} documents",
                    report.repair.repaired_placeholders,
                    report.repair.repaired_rows,
                    report.repair.candidate_rows,
                    report.flatten.moved
                );
                if report.repair.rows_with_leftovers > 0 {
                    warn!(
                        "{} rows still contain corrupted placeholders",
                        report.repair.rows_with_leftovers
                    );
                }
                info!("Final table: {:?}", self.config.final_table_path());
            }
        }

        info!("Phase {} finished in {:.2?}", phase, start_time.elapsed());
        Ok(())
    }

    /// Phase 1: flatten the todo tree into the intermediate directory and
    /// aggregate its documents into the intermediate table.
    pub fn run_aggregate(&self) -> Result<AggregateReport> {
        let paths = &self.config.paths;
        let extension = &self.config.source_extension;

        let flatten = FileManager::flatten_tree(&paths.todo_dir, &paths.intermediate_dir, extension)
            .with_context(|| format!("Failed to collect documents from {:?}", paths.todo_dir))?;

        let documents = FileManager::find_files(&paths.intermediate_dir, extension)?;
        let aggregate = Aggregator::new()
            .with_max_entry_chars(self.config.max_entry_chars)
            .with_progress(self.progress_bar(documents.len() as u64))
            .run(&documents, &self.config.intermediate_table_path())?;

        Ok(AggregateReport { flatten, aggregate })
    }

    /// Phase 2: repair the translated table into the final directory and move
    /// the documents there. The intermediate directory ends up empty.
    pub fn run_finalize(&self) -> Result<FinalizeReport> {
        let paths = &self.config.paths;
        let source = self.config.intermediate_table_path();

        if !FileManager::file_exists(&source) {
            return Err(anyhow::anyhow!("Intermediate table does not exist: {:?}", source));
        }
        FileManager::ensure_dir(&paths.final_dir)?;

        let repair = repair::repair_file(&source, &self.config.final_table_path())?;
        let flatten = FileManager::flatten_tree(
            &paths.intermediate_dir,
            &paths.final_dir,
            &self.config.source_extension,
        )
        .with_context(|| format!("Failed to move documents to {:?}", paths.final_dir))?;

        Ok(FinalizeReport { repair, flatten })
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::stderr());
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(style);
        progress
    }
}

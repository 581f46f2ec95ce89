/*!
 * Aggregation of spreadsheet documents into one delimited table.
 *
 * For every document the table gets a marker record holding only the file
 * name, followed by the document's rows with their target column pretranslated.
 */

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use log::{debug, warn};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::spreadsheet;
use crate::table::TableWriter;
use crate::translation::glossary::pretranslate_row;

/// Per-entry character limit of the bulk translator
pub const DEFAULT_MAX_ENTRY_CHARS: usize = 5000;

/// Counters collected while aggregating
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateStats {
    /// Documents written to the table
    pub documents: usize,

    /// Translation rows written
    pub rows: usize,

    /// Rows that carried a glossary
    pub glossary_rows: usize,

    /// Tokens replaced from glossaries
    pub substitutions: usize,

    /// Rows whose source is longer than the entry limit
    pub oversized_entries: usize,
}

/// Aggregates documents into a table, pretranslating every row.
pub struct Aggregator {
    max_entry_chars: usize,
    progress: ProgressBar,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            max_entry_chars: DEFAULT_MAX_ENTRY_CHARS,
            progress: ProgressBar::hidden(),
        }
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Warn about source texts longer than `max_entry_chars` characters.
    pub fn with_max_entry_chars(mut self, max_entry_chars: usize) -> Self {
        self.max_entry_chars = max_entry_chars;
        self
    }

    /// Report progress on `progress`, one tick per document.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Aggregate `paths`, in order, into the table file at `target`.
    pub fn run(&self, paths: &[PathBuf], target: &Path) -> Result<AggregateStats> {
        let file = File::create(target)
            .with_context(|| format!("Failed to create table: {:?}", target))?;
        let mut writer = TableWriter::new(BufWriter::new(file));

        let stats = self.write_documents(paths, &mut writer)?;
        writer
            .flush()
            .with_context(|| format!("Failed to write table: {:?}", target))?;

        Ok(stats)
    }

    /// Aggregate `paths` into an already open table writer.
    ///
    /// Each document is parsed before its marker is written, so a document that
    /// fails to parse leaves no marker behind.
    pub fn write_documents<W: Write>(
        &self,
        paths: &[PathBuf],
        writer: &mut TableWriter<W>,
    ) -> Result<AggregateStats> {
        let mut stats = AggregateStats::default();
        self.progress.set_length(paths.len() as u64);

        for path in paths {
            let name = path
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_default();
            self.progress.set_message(name.clone());

            let rows = spreadsheet::extract_rows(path)?;
            debug!("{}: {} rows", name, rows.len());

            writer.write_record([name.as_str()])?;
            for mut row in rows {
                if row.glossary.is_some() {
                    stats.glossary_rows += 1;
                }
                stats.substitutions += pretranslate_row(&mut row);

                let length = row.source.as_deref().map_or(0, |s| s.chars().count());
                if length > self.max_entry_chars {
                    stats.oversized_entries += 1;
                    warn!(
                        "{}: entry '{}' has {} characters, over the limit of {}",
                        name,
                        row.id.as_deref().unwrap_or_default(),
                        length,
                        self.max_entry_chars
                    );
                }

                writer.write_optional(&row.into_fields())?;
                stats.rows += 1;
            }

            stats.documents += 1;
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        Ok(stats)
    }
}

/// Aggregate `paths` into `target` with default settings.
pub fn aggregate_documents(paths: &[PathBuf], target: &Path) -> Result<AggregateStats> {
    Aggregator::new().run(paths, target)
}

/*!
 * Placeholder repair for bulk-translated tables.
 *
 * The bulk translator rewrites the inline placeholder `<x id="N"/>` as
 * `<x id = "N" />`. Placeholder indices inside one string start at 1 and
 * increase by one per placeholder, so the repair walks the indices upwards
 * and stops at the first index that has no corrupted occurrence.
 */

use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::errors::TableError;
use crate::table::{TableReader, TableWriter};
use crate::translation::row::{FIELD_COUNT, TARGET_INDEX};

/// Matches any corrupted placeholder, whatever its index
static CORRUPTED_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<x id = "(\d+)" />"#).expect("valid placeholder pattern"));

/// Counters collected while repairing a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairStats {
    /// Records read, markers included
    pub records: usize,

    /// Records with exactly seven fields
    pub candidate_rows: usize,

    /// Rows whose target changed
    pub repaired_rows: usize,

    /// Placeholder indices restored across all rows
    pub repaired_placeholders: usize,

    /// Rows still holding a corrupted placeholder after repair
    pub rows_with_leftovers: usize,
}

fn corrupted(index: usize) -> String {
    format!("<x id = \"{}\" />", index)
}

fn canonical(index: usize) -> String {
    format!("<x id=\"{}\"/>", index)
}

/// Restore corrupted placeholders in `text`.
///
/// Returns the repaired text and how many indices were restored. Indices after
/// a gap are left as they are.
pub fn repair_placeholders(text: &str) -> (String, usize) {
    let mut repaired = text.to_string();
    let mut index = 1;

    loop {
        let pattern = corrupted(index);
        if !repaired.contains(&pattern) {
            break;
        }
        repaired = repaired.replace(&pattern, &canonical(index));
        index += 1;
    }

    (repaired, index - 1)
}

/// Indices of corrupted placeholders still present in `text`
pub fn leftover_placeholders(text: &str) -> Vec<usize> {
    CORRUPTED_PLACEHOLDER
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).and_then(|m| m.as_str().parse().ok()))
        .collect()
}

/// Copy every record from `reader` to `writer`, repairing seven-field rows.
///
/// Records with any other field count are written back unchanged.
pub fn repair_table<R: BufRead, W: Write>(
    reader: TableReader<R>,
    writer: &mut TableWriter<W>,
) -> Result<RepairStats, TableError> {
    let mut stats = RepairStats::default();

    for record in reader {
        let mut record = record?;
        stats.records += 1;

        if record.len() != FIELD_COUNT {
            if record.len() > 1 {
                debug!(
                    "Passing through record {} with {} fields",
                    stats.records,
                    record.len()
                );
            }
            writer.write_record(&record)?;
            continue;
        }

        stats.candidate_rows += 1;
        let (target, restored) = repair_placeholders(&record[TARGET_INDEX]);
        if restored > 0 {
            stats.repaired_rows += 1;
            stats.repaired_placeholders += restored;
            record[TARGET_INDEX] = target;
        }

        let leftovers = leftover_placeholders(&record[TARGET_INDEX]);
        if !leftovers.is_empty() {
            stats.rows_with_leftovers += 1;
            warn!(
                "Row '{}' still has corrupted placeholders {:?}, fix them by hand",
                record[0], leftovers
            );
        }

        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(stats)
}

/// Repair the table at `source` and write the result to `target`.
pub fn repair_file(source: &Path, target: &Path) -> Result<RepairStats> {
    let input = File::open(source)
        .with_context(|| format!("Failed to open table: {:?}", source))?;
    let output = File::create(target)
        .with_context(|| format!("Failed to create table: {:?}", target))?;

    let reader = TableReader::new(BufReader::new(input));
    let mut writer = TableWriter::new(BufWriter::new(output));

    repair_table(reader, &mut writer)
        .with_context(|| format!("Failed to repair table {:?} into {:?}", source, target))
}

/*!
 * Common test utilities for the pretranslate test suite
 */

// Not every test module uses every helper
#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Routes library log output through the test harness, `RUST_LOG=debug` to see it
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Helper to get the absolute path to a test resource
pub fn test_resource_path(relative_path: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("resources");
    path.push(relative_path);
    path
}

/// Copies a resource file into `dir` under the same name
pub fn copy_resource(dir: &Path, name: &str) -> Result<PathBuf> {
    let target = dir.join(name);
    fs::copy(test_resource_path(name), &target)?;
    Ok(target)
}

/// Builds a minimal spreadsheet document with eight metadata rows and the given data rows
pub fn workbook(rows: &[&[&str]]) -> String {
    let mut table = String::new();
    for i in 1..=8 {
        table.push_str(&format!("<Row><Cell><Data ss:Type=\"String\">meta {}</Data></Cell></Row>", i));
    }
    for row in rows {
        table.push_str("<Row>");
        for value in row.iter() {
            table.push_str(&format!("<Cell><Data ss:Type=\"String\">{}</Data></Cell>", value));
        }
        table.push_str("</Row>");
    }

    format!(
        r#"<?xml version="1.0"?>
<Workbook xmlns="urn:schemas-microsoft-com:office:spreadsheet"
 xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet">
 <Worksheet ss:Name="Sheet1"><Table>{}</Table></Worksheet>
</Workbook>
"#,
        table
    )
}

/// Reads a table file into its lines, terminators removed
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    Ok(fs::read_to_string(path)?.lines().map(str::to_string).collect())
}

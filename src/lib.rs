/*!
 * # pretranslate - glossary pretranslation pipeline for spreadsheet string tables
 *
 * A Rust library for preparing XML spreadsheet string tables for bulk
 * machine translation and cleaning up the result.
 *
 * ## Features
 *
 * - Collect spreadsheet documents from a nested directory tree
 * - Aggregate all translatable rows into a single `|` delimited table
 * - Pretranslate project specific terms from each row's glossary
 * - Repair placeholders mangled by the bulk translator
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `file_utils`: Locating and flattening document trees
 * - `spreadsheet`: Row extraction from XML spreadsheets
 * - `table`: The delimited table codec
 * - `aggregator`: Building the table from many documents
 * - `translation`: Row model and text transformations:
 *   - `translation::glossary`: Glossary pretranslation
 *   - `translation::repair`: Placeholder repair
 * - `app_controller`: Phase orchestration
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod aggregator;
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod spreadsheet;
pub mod table;
pub mod translation;

// Re-export main types for easier usage
pub use aggregator::{AggregateStats, Aggregator, aggregate_documents};
pub use app_config::Config;
pub use app_controller::{Controller, Phase};
pub use errors::{AppError, ConfigError, SpreadsheetError, TableError};
pub use file_utils::FileManager;
pub use translation::TranslationRow;

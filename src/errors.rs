/*!
 * Error types for the pretranslate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while reading a spreadsheet document
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// The document is not well-formed XML
    #[error("Malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The root element has no Worksheet child
    #[error("Document has no Worksheet element")]
    MissingWorksheet,

    /// The worksheet has no Table child
    #[error("Worksheet has no Table element")]
    MissingTable,

    /// A data row did not flatten to a full translation row
    #[error("Row {row} has {found} fields, expected 7")]
    FieldCount {
        /// 1-based row number within the table, header rows included
        row: usize,
        /// Number of fields found in the row
        found: usize,
    },
}

/// Errors that can occur while reading or writing the delimited table
#[derive(Error, Debug)]
pub enum TableError {
    /// Underlying reader or writer failed
    #[error("Table I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input ended right after an escape character
    #[error("Unexpected end of data after escape character on line {line}")]
    DanglingEscape {
        /// 1-based line number of the escape character
        line: usize,
    },
}

/// Errors raised while building or checking the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The phase argument is not one of the known phases
    #[error("The value for phase should be one of 1, 2 (got {0})")]
    InvalidPhase(String),

    /// A configuration value failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration handling
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from spreadsheet parsing
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] SpreadsheetError),

    /// Error from the table codec
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Process exit code reported by the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 2,
            AppError::File(_) => 3,
            AppError::Spreadsheet(_) => 4,
            AppError::Table(_) => 5,
            AppError::Unknown(_) => 1,
        }
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    // Classifies by the typed error underneath any added context
    fn from(error: anyhow::Error) -> Self {
        let error = match error.downcast::<ConfigError>() {
            Ok(e) => return Self::Config(e),
            Err(error) => error,
        };
        let error = match error.downcast::<SpreadsheetError>() {
            Ok(e) => return Self::Spreadsheet(e),
            Err(error) => error,
        };
        let error = match error.downcast::<TableError>() {
            Ok(e) => return Self::Table(e),
            Err(error) => error,
        };
        if error.downcast_ref::<std::io::Error>().is_some() {
            return Self::File(format!("{:#}", error));
        }
        Self::Unknown(format!("{:#}", error))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

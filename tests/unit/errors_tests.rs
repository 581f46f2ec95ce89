/*!
 * Tests for error types and conversions
 */

use pretranslate::errors::{AppError, ConfigError, SpreadsheetError, TableError};
use pretranslate::Phase;

#[test]
fn test_configError_invalidPhase_shouldDisplayCorrectly() {
    let error = ConfigError::InvalidPhase("3".to_string());
    let display = format!("{}", error);
    assert!(display.contains("should be one of 1, 2"));
    assert!(display.contains("3"));
}

#[test]
fn test_spreadsheetError_fieldCount_shouldDisplayRowAndCount() {
    let error = SpreadsheetError::FieldCount { row: 10, found: 5 };
    let display = format!("{}", error);
    assert!(display.contains("Row 10"));
    assert!(display.contains("5 fields"));
}

#[test]
fn test_tableError_danglingEscape_shouldDisplayLine() {
    let error = TableError::DanglingEscape { line: 4 };
    assert!(format!("{}", error).contains("line 4"));
}

#[test]
fn test_appError_fromConfigError_shouldWrapCorrectly() {
    let app_error: AppError = ConfigError::Invalid("bad".to_string()).into();
    let display = format!("{}", app_error);
    assert!(display.contains("Configuration error"));
    assert!(display.contains("bad"));
}

#[test]
fn test_appError_fromSpreadsheetError_shouldWrapCorrectly() {
    let app_error: AppError = SpreadsheetError::MissingTable.into();
    assert!(format!("{}", app_error).contains("Spreadsheet error"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_phase_fromStr_withKnownValues_shouldParse() {
    assert_eq!("1".parse::<Phase>().unwrap(), Phase::Aggregate);
    assert_eq!("2".parse::<Phase>().unwrap(), Phase::Finalize);
}

#[test]
fn test_phase_fromStr_withOtherValues_shouldBeConfigError() {
    for value in ["0", "3", "x", "", "1.5"] {
        assert!(matches!(value.parse::<Phase>(), Err(ConfigError::InvalidPhase(_))));
    }
    assert!(matches!(Phase::try_from(7u8), Err(ConfigError::InvalidPhase(v)) if v == "7"));
}

#[test]
fn test_appError_fromAnyhowWithContext_shouldKeepTypedVariant() {
    let error = anyhow::Error::from(SpreadsheetError::MissingWorksheet).context("Failed to parse spreadsheet: a.xml");
    let app_error = AppError::from(error);
    assert!(matches!(app_error, AppError::Spreadsheet(SpreadsheetError::MissingWorksheet)));
    assert_eq!(app_error.exit_code(), 4);

    let error = anyhow::Error::from(ConfigError::InvalidPhase("3".to_string()));
    assert_eq!(AppError::from(error).exit_code(), 2);

    let error = anyhow::Error::from(TableError::DanglingEscape { line: 2 }).context("Failed to repair table");
    assert!(matches!(AppError::from(error), AppError::Table(TableError::DanglingEscape { line: 2 })));
}

#[test]
fn test_appError_fromAnyhowIoError_shouldBeFileErrorWithContext() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let error = anyhow::Error::from(io_error).context("Failed to read file: a.xml");

    let app_error = AppError::from(error);

    assert_eq!(app_error.exit_code(), 3);
    let display = format!("{}", app_error);
    assert!(display.contains("a.xml"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromPlainAnyhow_shouldBeUnknown() {
    let app_error = AppError::from(anyhow::anyhow!("Intermediate table does not exist"));
    assert!(matches!(&app_error, AppError::Unknown(msg) if msg.contains("does not exist")));
    assert_eq!(app_error.exit_code(), 1);
}

/*!
 * Text transformations applied to translation rows.
 *
 * - `row`: The seven-column translation row
 * - `glossary`: Glossary parsing and pretranslation
 * - `repair`: Placeholder repair after bulk translation
 */

// Re-export main types for easier usage
pub use self::glossary::{Glossary, pretranslate_row, title_case};
pub use self::repair::{RepairStats, repair_placeholders, repair_table};
pub use self::row::TranslationRow;

// Submodules
pub mod glossary;
pub mod repair;
pub mod row;

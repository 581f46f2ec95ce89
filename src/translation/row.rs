/*!
 * Translation row model.
 *
 * One data row of a spreadsheet document, in table column order:
 * `ID | Resource | Source | Target | Context | Glossary | Notes`.
 */

use crate::errors::SpreadsheetError;

/// Number of fields in a translation row
pub const FIELD_COUNT: usize = 7;

/// Column index of the `Target` field
pub const TARGET_INDEX: usize = 3;

/// A single translatable entry. Every field may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationRow {
    pub id: Option<String>,
    pub resource: Option<String>,
    pub source: Option<String>,
    /// Empty until pretranslation fills it
    pub target: Option<String>,
    pub context: Option<String>,
    /// Raw glossary field, `term = translation; ...`
    pub glossary: Option<String>,
    pub notes: Option<String>,
}

impl TranslationRow {
    /// Build a row from flattened cell texts.
    ///
    /// `row_number` is only used to report a field count mismatch.
    pub fn from_fields(
        fields: Vec<Option<String>>,
        row_number: usize,
    ) -> Result<Self, SpreadsheetError> {
        let found = fields.len();
        let Ok([id, resource, source, target, context, glossary, notes]) =
            <[Option<String>; FIELD_COUNT]>::try_from(fields)
        else {
            return Err(SpreadsheetError::FieldCount {
                row: row_number,
                found,
            });
        };

        Ok(Self {
            id,
            resource,
            source,
            target,
            context,
            glossary,
            notes,
        })
    }

    /// Fields in column order
    pub fn into_fields(self) -> [Option<String>; FIELD_COUNT] {
        [
            self.id,
            self.resource,
            self.source,
            self.target,
            self.context,
            self.glossary,
            self.notes,
        ]
    }
}

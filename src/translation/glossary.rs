/*!
 * Glossary pretranslation.
 *
 * Each row carries its own glossary field shaped as
 * `term1 = translation1; term2 = translation2; ...`. Before the row is handed
 * to the bulk translator, the source text is copied into the target column and
 * every whitespace token that is a glossary term is replaced by its
 * translation. Project specific and technical words then reach the translator
 * already translated, which keeps terminology and grammatical case consistent.
 */

use log::{debug, warn};
use std::collections::HashMap;

use crate::translation::row::TranslationRow;

/// Separator between glossary entries
const ENTRY_SEPARATOR: char = ';';

/// Separator between a term and its translation
const TERM_SEPARATOR: char = '=';

/// Term lookup table built from one row's glossary field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glossary {
    /// Exact token to replacement
    terms: HashMap<String, String>,

    /// Number of entries that were not `term = translation`
    skipped: usize,
}

impl Glossary {
    /// Create a new empty glossary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a glossary field. Malformed entries are dropped.
    pub fn parse(field: &str) -> Self {
        let mut glossary = Self::new();

        for entry in field.split(ENTRY_SEPARATOR) {
            let parts: Vec<&str> = entry.split(TERM_SEPARATOR).map(str::trim).collect();
            match parts.as_slice() {
                [term, translation] => glossary.add_term(term, translation),
                _ => {
                    glossary.skipped += 1;
                    if entry.trim().is_empty() {
                        debug!("Skipping empty glossary entry in '{}'", field);
                    } else {
                        warn!("Skipping malformed glossary entry '{}'", entry.trim());
                    }
                }
            }
        }

        glossary
    }

    /// Add a term. Its title-cased form maps to the title-cased translation.
    pub fn add_term(&mut self, term: &str, translation: &str) {
        self.terms.insert(term.to_string(), translation.to_string());
        self.terms.insert(title_case(term), title_case(translation));
    }

    /// Get the replacement for an exact token.
    pub fn get_translation(&self, token: &str) -> Option<&str> {
        self.terms.get(token).map(String::as_str)
    }

    /// Number of lookup keys, title-cased aliases included
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of malformed entries dropped while parsing
    pub fn skipped_entries(&self) -> usize {
        self.skipped
    }

    /// Replace glossary terms in `text`, token by token.
    ///
    /// Tokens are split on single spaces only, so repeated spaces survive as
    /// empty tokens. Returns the rewritten text and the number of replaced tokens.
    pub fn apply(&self, text: &str) -> (String, usize) {
        let mut replaced = 0;
        let tokens: Vec<&str> = text
            .split(' ')
            .map(|token| match self.get_translation(token) {
                Some(translation) => {
                    replaced += 1;
                    translation
                }
                None => token,
            })
            .collect();

        (tokens.join(" "), replaced)
    }
}

/// Capitalize the first letter of every word and lowercase the rest.
///
/// A word starts at any cased character that does not follow another cased
/// character, so `it's` becomes `It'S` and `4th` becomes `4Th`. Word starts
/// use the titlecase form of the letter: `ßa` becomes `Ssa` and `ǆemal`
/// becomes `ǅemal`. Greek letters carrying both an iota subscript and a
/// second diacritic are the exception: the subscript comes out as a plain `ι`.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_cased = false;

    for c in text.chars() {
        let cased = is_cased(c);
        if cased && !previous_cased {
            push_titlecase(&mut result, c);
        } else if cased {
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
        previous_cased = cased;
    }

    result
}

/// Letters of the titlecase category, which are neither upper nor lower case
fn is_titlecase_letter(c: char) -> bool {
    matches!(
        c,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase() || is_titlecase_letter(c)
}

fn push_titlecase(out: &mut String, c: char) {
    let single = match c {
        '\u{01C4}'..='\u{01C6}' => Some('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => Some('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => Some('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => Some('\u{01F2}'),
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            char::from_u32(c as u32 + 8)
        }
        '\u{1FB3}' => Some('\u{1FBC}'),
        '\u{1FC3}' => Some('\u{1FCC}'),
        '\u{1FF3}' => Some('\u{1FFC}'),
        c if is_titlecase_letter(c) => Some(c),
        _ => None,
    };
    if let Some(title) = single {
        out.push(title);
        return;
    }
    if c == '\u{0149}' {
        out.push_str("\u{02BC}N");
        return;
    }

    // Multi-letter uppercase forms keep only their first letter capital
    let mut upper = c.to_uppercase();
    if let Some(first) = upper.next() {
        out.push(first);
    }
    for rest in upper {
        out.extend(rest.to_lowercase());
    }
}

/// Fill the target column of `row` from its source column.
///
/// Without a glossary the source is copied verbatim. Returns the number of
/// glossary substitutions made.
pub fn pretranslate_row(row: &mut TranslationRow) -> usize {
    let Some(field) = row.glossary.as_deref() else {
        row.target = row.source.clone();
        return 0;
    };

    let Some(source) = row.source.as_deref() else {
        row.target = None;
        return 0;
    };

    let glossary = Glossary::parse(field);
    let (target, replaced) = glossary.apply(source);
    row.target = Some(target);
    replaced
}

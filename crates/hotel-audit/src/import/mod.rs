mod parser;

use std::io::Read;
use std::path::Path;

use crate::checklist::{ChecklistCatalog, ItemScores};

#[derive(Debug)]
pub enum ScoreImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ScoreImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreImportError::Io(err) => write!(f, "failed to read score sheet: {}", err),
            ScoreImportError::Csv(err) => write!(f, "invalid score sheet CSV data: {}", err),
        }
    }
}

impl std::error::Error for ScoreImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreImportError::Io(err) => Some(err),
            ScoreImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ScoreImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ScoreImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Imports raw item scores from a field score sheet export with
/// `Item ID,Score` columns.
///
/// Rows referencing unknown items, rows without a parseable score, and
/// scores outside the item's range are skipped so a partially filled sheet
/// still yields a usable report. A later row for the same item overrides an
/// earlier one, matching how correction rows are appended in the field.
pub struct ScoreSheetImporter;

impl ScoreSheetImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        catalog: &ChecklistCatalog,
    ) -> Result<ItemScores, ScoreImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, catalog)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        catalog: &ChecklistCatalog,
    ) -> Result<ItemScores, ScoreImportError> {
        let mut scores = ItemScores::new();

        for record in parser::parse_records(reader)? {
            let item = match catalog.find_item(&record.item_id) {
                Some(item) => item,
                None => continue,
            };
            let score = match record.score {
                Some(score) => score,
                None => continue,
            };
            if score < 0.0 || score > item.max_score as f64 {
                continue;
            }
            scores.insert(record.item_id, score);
        }

        Ok(scores)
    }
}

use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct ScoreRecord {
    pub(crate) item_id: String,
    pub(crate) score: Option<f64>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ScoreRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<ScoreRow>() {
        let row = record?;
        let score = row.score.as_deref().and_then(parse_score);
        records.push(ScoreRecord {
            item_id: row.item_id,
            score,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    #[serde(rename = "Item ID")]
    item_id: String,
    #[serde(rename = "Score", default, deserialize_with = "empty_string_as_none")]
    score: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_score(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed: f64 = trimmed.parse().ok()?;
    if parsed.is_finite() {
        Some(parsed)
    } else {
        None
    }
}

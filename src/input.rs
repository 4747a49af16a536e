use crate::error::ConfigError;
use serde_json::{Map, Value};

/// One input row. Arbitrary extra fields ride along untouched; only the
/// configured word/weight keys are interpreted.
pub type WordRecord = Map<String, Value>;

#[derive(Debug, Clone)]
pub struct WordEntry {
    pub text: String,
    pub weight: f64,
}

pub fn parse_records(json: &str) -> anyhow::Result<Vec<WordRecord>> {
    let records: Vec<WordRecord> = serde_json::from_str(json)?;
    Ok(records)
}

/// Validates every record and pulls out the (text, weight) pairs in input
/// order. Weights must be finite and non-negative.
pub fn extract_entries(
    records: &[WordRecord],
    word_key: &str,
    weight_key: &str,
) -> Result<Vec<WordEntry>, ConfigError> {
    let mut entries = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let text = match record.get(word_key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => {
                return Err(ConfigError::MissingWordKey {
                    index,
                    key: word_key.to_string(),
                });
            }
        };
        let weight = match record.get(weight_key) {
            Some(value) => value.as_f64().ok_or_else(|| ConfigError::InvalidWeight {
                index,
                key: weight_key.to_string(),
            })?,
            None => {
                return Err(ConfigError::MissingWeightKey {
                    index,
                    key: weight_key.to_string(),
                });
            }
        };
        if !weight.is_finite() || weight < 0.0 {
            return Err(ConfigError::InvalidWeight {
                index,
                key: weight_key.to_string(),
            });
        }
        entries.push(WordEntry { text, weight });
    }
    Ok(entries)
}

use super::data_loader::{check_required_columns, ensure_not_empty, DataLoader};
use crate::error::{PipelineError, Result};
use crate::session::SessionRecord;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// JSON Data Loader - implementácia Strategy pattern pre JSON súbory
pub struct JsonDataLoader;

impl JsonDataLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parsuje JSON array of objects formát
    /// Príklad: [{"Administrative": 0, ..., "Weekend": false, "Revenue": true}, ...]
    pub fn load_from_string(&self, json_text: &str) -> Result<Vec<SessionRecord>> {
        let parsed: Value = serde_json::from_str(json_text)?;

        let array = parsed
            .as_array()
            .ok_or_else(|| PipelineError::UnsupportedFormat("JSON musí byť array objektov".into()))?;

        let mut records = Vec::with_capacity(array.len());
        for (idx, item) in array.iter().enumerate() {
            let obj = item.as_object().ok_or_else(|| PipelineError::InvalidValue {
                column: "*".to_string(),
                row: idx + 1,
                reason: "element nie je objekt".to_string(),
            })?;

            let keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
            check_required_columns(&keys)?;

            let record = SessionRecord::deserialize(item).map_err(|e| {
                PipelineError::InvalidValue {
                    column: "*".to_string(),
                    row: idx + 1,
                    reason: e.to_string(),
                }
            })?;
            records.push(record);
        }

        debug!(rows = records.len(), "JSON loaded");
        ensure_not_empty(records)
    }
}

impl DataLoader for JsonDataLoader {
    fn get_name(&self) -> &str {
        "JSON Data Loader"
    }

    fn load(&self, source: &Path) -> Result<Vec<SessionRecord>> {
        let text = fs::read_to_string(source)?;
        self.load_from_string(&text)
    }

    fn get_available_columns(&self, source: &Path) -> Result<Vec<String>> {
        let parsed: Value = serde_json::from_str(&fs::read_to_string(source)?)?;
        let first = parsed
            .as_array()
            .and_then(|a| a.first())
            .and_then(|v| v.as_object())
            .ok_or(PipelineError::EmptyDataset)?;
        Ok(first.keys().cloned().collect())
    }
}

impl Default for JsonDataLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(revenue: &str) -> String {
        format!(
            r#"{{"Administrative": 1, "Administrative_Duration": 12.0,
                "Informational": 0, "Informational_Duration": 0,
                "ProductRelated": 8, "ProductRelated_Duration": 240.5,
                "BounceRates": 0.02, "ExitRates": 0.04, "SpecialDay": 0.2,
                "Month": "May", "OperatingSystems": 3, "Browser": 2, "Region": 4,
                "TrafficType": 1, "VisitorType": "Other", "Weekend": true,
                "Revenue": {}}}"#,
            revenue
        )
    }

    #[test]
    fn loads_array_of_objects() {
        let text = format!("[{}, {}]", row("false"), row("\"TRUE\""));
        let records = JsonDataLoader::new().load_from_string(&text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label(), 0);
        assert_eq!(records[1].label(), 1);
        assert_eq!(records[1].visitor_type, "Other");
    }

    #[test]
    fn rejects_non_array() {
        let err = JsonDataLoader::new().load_from_string("{\"a\": 1}").unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat(_)));
    }

    #[test]
    fn rejects_missing_keys() {
        let err = JsonDataLoader::new()
            .load_from_string("[{\"Administrative\": 1}]")
            .unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumns(_)));
    }

    #[test]
    fn empty_array_is_empty_dataset() {
        let err = JsonDataLoader::new().load_from_string("[]").unwrap_err();
        assert!(matches!(err, PipelineError::EmptyDataset));
    }
}

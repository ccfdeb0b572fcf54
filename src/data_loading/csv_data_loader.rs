use super::data_loader::{check_required_columns, ensure_not_empty, DataLoader};
use crate::error::{PipelineError, Result};
use crate::session::SessionRecord;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// CSV Data Loader - implementácia Strategy pattern pre CSV súbory
/// s hlavičkou podľa UCI datasetu (Administrative, ..., Revenue)
pub struct CsvDataLoader;

impl CsvDataLoader {
    pub fn new() -> Self {
        Self
    }

    /// Načíta záznamy z ľubovoľného readera (súbor, string v testoch)
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Vec<SessionRecord>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
        check_required_columns(&headers)?;

        let mut records = Vec::new();
        for (idx, row) in rdr.deserialize::<SessionRecord>().enumerate() {
            let record = row.map_err(|e| PipelineError::InvalidValue {
                column: csv_error_column(&e, &headers),
                row: idx + 1,
                reason: e.to_string(),
            })?;
            records.push(record);
        }

        debug!(rows = records.len(), "CSV loaded");
        ensure_not_empty(records)
    }

    pub fn load_from_string(&self, csv_text: &str) -> Result<Vec<SessionRecord>> {
        self.load_from_reader(csv_text.as_bytes())
    }
}

/// Názov stĺpca, v ktorom deserializácia zlyhala (ak ho csv chyba obsahuje)
fn csv_error_column(err: &csv::Error, headers: &[String]) -> String {
    if let csv::ErrorKind::Deserialize { err, .. } = err.kind() {
        if let Some(field) = err.field() {
            if let Some(name) = headers.get(field as usize) {
                return name.clone();
            }
        }
    }
    "?".to_string()
}

impl DataLoader for CsvDataLoader {
    fn get_name(&self) -> &str {
        "CSV Data Loader"
    }

    fn load(&self, source: &Path) -> Result<Vec<SessionRecord>> {
        let file = File::open(source)?;
        self.load_from_reader(file)
    }

    fn get_available_columns(&self, source: &Path) -> Result<Vec<String>> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_path(source)?;
        Ok(rdr.headers()?.iter().map(|h| h.trim().to_string()).collect())
    }
}

impl Default for CsvDataLoader {
    fn default() -> Self {
        Self::new()
    }
}

use super::csv_data_loader::CsvDataLoader;
use super::data_loader::DataLoader;
use super::json_data_loader::JsonDataLoader;
use super::sqlite_data_loader::SqliteDataLoader;
use crate::error::{PipelineError, Result};
use std::path::Path;

/// Factory pre vytváranie data loaderov podľa typu
pub struct DataLoaderFactory;

impl DataLoaderFactory {
    /// Vytvorí loader na základe typu. `table` sa použije iba pre SQLite.
    pub fn create(loader_type: &str, table: &str) -> Result<Box<dyn DataLoader>> {
        match loader_type.to_lowercase().as_str() {
            "csv" => Ok(Box::new(CsvDataLoader::new())),
            "json" => Ok(Box::new(JsonDataLoader::new())),
            "sqlite" | "db" | "sqlite3" => Ok(Box::new(SqliteDataLoader::new(table)?)),
            _ => Err(PipelineError::UnsupportedFormat(format!(
                "Neznámy typ loadera: {}",
                loader_type
            ))),
        }
    }

    /// Vyberie loader podľa prípony súboru
    pub fn create_for_path(path: &Path, table: &str) -> Result<Box<dyn DataLoader>> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                PipelineError::UnsupportedFormat(format!(
                    "Súbor '{}' nemá príponu",
                    path.display()
                ))
            })?;
        Self::create(extension, table)
    }

    /// Vráti zoznam všetkých podporovaných formátov
    pub fn available_formats() -> Vec<&'static str> {
        vec!["sqlite", "csv", "json"]
    }
}

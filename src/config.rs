//! Konfigurácia behu. Každé pole má predvolenú hodnotu, JSON súbor je voliteľný.

use crate::data_loading::sqlite_data_loader::DEFAULT_TABLE;
use crate::error::{PipelineError, Result};
use crate::models::LogisticRegressionParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Názov konfiguračného súboru hľadaného v pracovnom adresári
pub const CONFIG_FILE: &str = "purchase_intent.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub data: DataConfig,
    pub split: SplitConfig,
    pub model: LogisticRegressionParams,
    pub output: OutputConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Zdroj dát; formát sa určí podľa prípony
    pub path: PathBuf,
    /// Tabuľka pre SQLite zdroj
    pub table: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub test_fraction: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub chart_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("shoppers.db"),
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            chart_path: PathBuf::from("04_predictive_model.svg"),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl PipelineConfig {
    /// Načíta konfiguráciu zo súboru, ak existuje; inak vráti predvolené hodnoty.
    /// Nečitateľný alebo neplatný súbor je chyba; načítaná konfigurácia je už validovaná.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.split.test_fraction > 0.0 && self.split.test_fraction < 1.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "split.test_fraction musí byť v intervale (0, 1), zadané {}",
                self.split.test_fraction
            )));
        }
        if self.data.table.trim().is_empty() {
            return Err(PipelineError::InvalidConfig("data.table nesmie byť prázdny".into()));
        }
        if self.output.chart_path.as_os_str().is_empty() {
            return Err(PipelineError::InvalidConfig(
                "output.chart_path nesmie byť prázdny".into(),
            ));
        }
        self.model.validate()
    }

    pub fn log_summary(&self) {
        info!(
            data = %self.data.path.display(),
            table = %self.data.table,
            test_fraction = self.split.test_fraction,
            seed = self.split.seed,
            c = self.model.c,
            max_iter = self.model.max_iter,
            "configuration loaded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClassWeight;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_run() {
        let config = PipelineConfig::default();
        assert_eq!(config.data.path, PathBuf::from("shoppers.db"));
        assert_eq!(config.data.table, "sessions");
        assert_eq!(config.split.test_fraction, 0.2);
        assert_eq!(config.split.seed, 42);
        assert_eq!(config.model.c, 1.0);
        assert_eq!(config.model.max_iter, 1000);
        assert_eq!(config.model.class_weight, ClassWeight::Balanced);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = PipelineConfig::from_json(
            r#"{ "split": { "seed": 7 }, "model": { "c": 0.5, "class_weight": "uniform" } }"#,
        )
        .unwrap();
        assert_eq!(config.split.seed, 7);
        assert_eq!(config.split.test_fraction, 0.2);
        assert_eq!(config.model.c, 0.5);
        assert_eq!(config.model.max_iter, 1000);
        assert_eq!(config.model.class_weight, ClassWeight::Uniform);
        assert_eq!(config.data.table, "sessions");
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for json in [
            r#"{ "split": { "test_fraction": 1.5 } }"#,
            r#"{ "model": { "c": -1.0 } }"#,
            r#"{ "data": { "table": "  " } }"#,
        ] {
            assert!(matches!(
                PipelineConfig::from_json(json),
                Err(PipelineError::InvalidConfig(_))
            ));
        }
        assert!(matches!(
            PipelineConfig::from_json("{ not json"),
            Err(PipelineError::Json(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.split.seed, 42);
    }

    #[test]
    fn reads_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "data": {{ "path": "sessions.csv" }}, "log": {{ "json": true }} }}"#).unwrap();
        let config = PipelineConfig::load(file.path()).unwrap();
        assert_eq!(config.data.path, PathBuf::from("sessions.csv"));
        assert!(config.log.json);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn load_validates_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "split": {{ "test_fraction": 1.5 }} }}"#).unwrap();
        assert!(matches!(
            PipelineConfig::load(file.path()),
            Err(PipelineError::InvalidConfig(_))
        ));
    }
}

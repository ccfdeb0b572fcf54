//! Chybové typy celého pipeline.

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Chýbajúce stĺpce v zdroji dát
    #[error("V dátach chýbajú stĺpce: {0:?}")]
    MissingColumns(Vec<String>),

    /// Hodnotu v riadku nie je možné prečítať ako očakávaný typ
    #[error("Hodnota v stĺpci '{column}' (riadok {row}) je neplatná: {reason}")]
    InvalidValue {
        column: String,
        row: usize,
        reason: String,
    },

    #[error("Dataset neobsahuje žiadne záznamy")]
    EmptyDataset,

    #[error("Neznáma kategória '{value}' v stĺpci '{column}'")]
    UnknownCategory { column: String, value: String },

    #[error("Nesúlad rozmerov: očakávané {expected}, skutočné {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("Neplatná konfigurácia: {0}")]
    InvalidConfig(String),

    #[error("Nie je možné rozdeliť dáta: {0}")]
    InvalidSplit(String),

    /// Trénovacia množina obsahuje iba jednu triedu
    #[error("Trénovacie dáta obsahujú iba triedu {0}, class-balanced váhy nie sú definované")]
    SingleClass(u8),

    #[error("Numerický solver zlyhal: {0}")]
    Solver(String),

    #[error("Nepodporovaný formát dát: {0}")]
    UnsupportedFormat(String),

    #[error("I/O chyba: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite chyba: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("CSV chyba: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON chyba: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Chyba matice: {0}")]
    Matrix(#[from] smartcore::error::Failed),

    #[error("Chyba pri skladaní reportu: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Chyba pri kreslení grafu: {0}")]
    Chart(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for PipelineError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        PipelineError::Chart(err.to_string())
    }
}

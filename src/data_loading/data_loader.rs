use std::path::Path;

use crate::error::{PipelineError, Result};
use crate::session::{SessionRecord, REQUIRED_COLUMNS};

/// Strategy pattern pre načítanie session záznamov z rôznych zdrojov
pub trait DataLoader {
    /// Názov loadera
    fn get_name(&self) -> &str;

    /// Načíta všetky session zo zdroja (bulk read)
    fn load(&self, source: &Path) -> Result<Vec<SessionRecord>>;

    /// Získa dostupné stĺpce zo zdroja
    fn get_available_columns(&self, source: &Path) -> Result<Vec<String>>;
}

/// Overí, že zdroj obsahuje všetky povinné stĺpce.
/// Chýbajúce stĺpce vráti naraz, nie po jednom.
pub fn check_required_columns<S: AsRef<str>>(columns: &[S]) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !columns.iter().any(|c| c.as_ref() == **required))
        .map(|c| c.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::MissingColumns(missing))
    }
}

/// Prázdny dataset je chyba tvaru dát
pub fn ensure_not_empty(records: Vec<SessionRecord>) -> Result<Vec<SessionRecord>> {
    if records.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }
    Ok(records)
}

use super::data_loader::{check_required_columns, ensure_not_empty, DataLoader};
use crate::error::{PipelineError, Result};
use crate::session::{parse_flag, SessionRecord};
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, Row};
use std::path::Path;
use tracing::debug;

pub const DEFAULT_TABLE: &str = "sessions";

/// SQLite Data Loader - číta celú tabuľku session jedným SELECT-om
pub struct SqliteDataLoader {
    table: String,
}

impl SqliteDataLoader {
    pub fn new(table: &str) -> Result<Self> {
        validate_table_name(table)?;
        Ok(Self {
            table: table.to_string(),
        })
    }

    fn open(&self, source: &Path) -> Result<Connection> {
        Ok(Connection::open_with_flags(
            source,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?)
    }

    /// Načíta záznamy z už otvoreného spojenia
    pub fn load_from_connection(&self, conn: &Connection) -> Result<Vec<SessionRecord>> {
        let mut stmt = conn.prepare(&format!("SELECT * FROM \"{}\"", self.table))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        check_required_columns(&columns)?;

        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        let mut row_idx = 0;
        while let Some(row) = rows.next()? {
            row_idx += 1;
            records.push(read_session(row, row_idx)?);
        }

        debug!(rows = records.len(), table = %self.table, "SQLite table loaded");
        ensure_not_empty(records)
    }
}

/// Názov tabuľky sa skladá do SQL, preto povoľujeme iba identifikátory
fn validate_table_name(table: &str) -> Result<()> {
    let valid = !table.is_empty()
        && table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !table.starts_with(|c: char| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(PipelineError::InvalidConfig(format!(
            "'{}' nie je platný názov tabuľky",
            table
        )))
    }
}

fn read_session(row: &Row<'_>, row_idx: usize) -> Result<SessionRecord> {
    Ok(SessionRecord {
        administrative: number(row, "Administrative", row_idx)?,
        administrative_duration: number(row, "Administrative_Duration", row_idx)?,
        informational: number(row, "Informational", row_idx)?,
        informational_duration: number(row, "Informational_Duration", row_idx)?,
        product_related: number(row, "ProductRelated", row_idx)?,
        product_related_duration: number(row, "ProductRelated_Duration", row_idx)?,
        bounce_rates: number(row, "BounceRates", row_idx)?,
        exit_rates: number(row, "ExitRates", row_idx)?,
        special_day: number(row, "SpecialDay", row_idx)?,
        operating_systems: number(row, "OperatingSystems", row_idx)?,
        browser: number(row, "Browser", row_idx)?,
        region: number(row, "Region", row_idx)?,
        traffic_type: number(row, "TrafficType", row_idx)?,
        visitor_type: text(row, "VisitorType", row_idx)?,
        month: text(row, "Month", row_idx)?,
        weekend: flag(row, "Weekend", row_idx)?,
        revenue: flag(row, "Revenue", row_idx)?,
    })
}

fn invalid(column: &str, row: usize, reason: impl Into<String>) -> PipelineError {
    PipelineError::InvalidValue {
        column: column.to_string(),
        row,
        reason: reason.into(),
    }
}

fn number(row: &Row<'_>, column: &str, row_idx: usize) -> Result<f64> {
    match row.get::<_, Value>(column)? {
        Value::Integer(i) => Ok(i as f64),
        Value::Real(r) => Ok(r),
        Value::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(column, row_idx, format!("'{}' nie je číslo", s))),
        Value::Null => Err(invalid(column, row_idx, "chýbajúca hodnota")),
        Value::Blob(_) => Err(invalid(column, row_idx, "binárna hodnota")),
    }
}

fn text(row: &Row<'_>, column: &str, row_idx: usize) -> Result<String> {
    match row.get::<_, Value>(column)? {
        Value::Text(s) => Ok(s),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Null => Err(invalid(column, row_idx, "chýbajúca hodnota")),
        _ => Err(invalid(column, row_idx, "očakávaný text")),
    }
}

fn flag(row: &Row<'_>, column: &str, row_idx: usize) -> Result<bool> {
    match row.get::<_, Value>(column)? {
        Value::Integer(0) => Ok(false),
        Value::Integer(1) => Ok(true),
        Value::Text(s) => {
            parse_flag(&s).ok_or_else(|| invalid(column, row_idx, format!("'{}' nie je boolean", s)))
        }
        Value::Null => Err(invalid(column, row_idx, "chýbajúca hodnota")),
        other => Err(invalid(column, row_idx, format!("{:?} nie je boolean", other))),
    }
}

impl DataLoader for SqliteDataLoader {
    fn get_name(&self) -> &str {
        "SQLite Data Loader"
    }

    fn load(&self, source: &Path) -> Result<Vec<SessionRecord>> {
        let conn = self.open(source)?;
        self.load_from_connection(&conn)
    }

    fn get_available_columns(&self, source: &Path) -> Result<Vec<String>> {
        let conn = self.open(source)?;
        let stmt = conn.prepare(&format!("SELECT * FROM \"{}\" LIMIT 0", self.table))?;
        let columns = stmt.column_names().iter().map(|c| c.to_string()).collect();
        Ok(columns)
    }
}

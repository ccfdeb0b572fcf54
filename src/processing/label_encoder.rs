use crate::error::{PipelineError, Result};
use std::collections::{BTreeSet, HashMap};

/// Label Encoder - enkóduje kategorické hodnoty na čísla (0, 1, 2, ...)
/// Kód je pozícia hodnoty v zoradenej množine všetkých pozorovaných hodnôt.
/// Po `fit` je mapovanie nemenné.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    column: String,
    classes: Vec<String>,
    mapping: HashMap<String, usize>,
}

impl LabelEncoder {
    /// Prvý prechod: zozbiera unikátne hodnoty a zostaví mapovaciu tabuľku
    pub fn fit<'a, I>(column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: Vec<String> = values
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|v| v.to_string())
            .collect();

        let mapping = classes
            .iter()
            .enumerate()
            .map(|(code, class)| (class.clone(), code))
            .collect();

        Self {
            column: column.to_string(),
            classes,
            mapping,
        }
    }

    /// Druhý prechod: preloží hodnotu cez pevnú tabuľku
    pub fn transform(&self, value: &str) -> Result<usize> {
        self.mapping
            .get(value)
            .copied()
            .ok_or_else(|| PipelineError::UnknownCategory {
                column: self.column.clone(),
                value: value.to_string(),
            })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

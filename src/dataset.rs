//! The in-memory dataset served by the search endpoint.
//!
//! Loaded once from the converter's JSON output and never mutated afterwards;
//! the server shares it across requests behind an `Arc`.

use anyhow::{Context, Result};
use std::path::Path;

use crate::models::Record;

/// Ordered, read-only collection of records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Reads and parses a JSON array of records.
    ///
    /// Fails if the file is missing, is not valid JSON, or contains an element
    /// that is not an object of string values.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file: {}", path.display()))?;

        let records: Vec<Record> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse data file: {}", path.display()))?;

        let dataset = Self::from_records(records);

        let missing = dataset.missing_company_name();
        if missing > 0 {
            tracing::warn!(
                missing,
                path = %path.display(),
                "records without a Company Name will never match a search"
            );
        }

        Ok(dataset)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records that carry no `Company Name` column.
    pub fn missing_company_name(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.company_key().is_none())
            .count()
    }

    /// Distinct column names in first-seen order.
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for record in &self.records {
            for (name, _) in record.fields() {
                if !columns.contains(&name) {
                    columns.push(name);
                }
            }
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_preserves_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        fs::write(
            &path,
            r#"[
  {"Company Name": "Acme Corp", "City": "Riyadh"},
  {"Company Name": "Zenith"},
  {"City": "Dammam"}
]"#,
        )
        .unwrap();

        let ds = Dataset::load(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records()[0].company_name(), Some("Acme Corp"));
        assert_eq!(ds.records()[1].company_name(), Some("Zenith"));
        assert_eq!(ds.missing_company_name(), 1);
        assert_eq!(ds.columns(), vec!["Company Name", "City"]);
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = Dataset::load(&tmp.path().join("data.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read data file"));
    }

    #[test]
    fn test_load_invalid_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        fs::write(&path, "[{\"Company Name\": ").unwrap();
        let err = Dataset::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse data file"));
    }

    #[test]
    fn test_load_rejects_non_array() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        fs::write(&path, r#"{"Company Name": "Acme"}"#).unwrap();
        assert!(Dataset::load(&path).is_err());
    }
}

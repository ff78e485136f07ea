//! CSV → JSON conversion.
//!
//! Reads a CSV export with a header row and writes a pretty-printed JSON array
//! with one object per data row. Cells stay strings. Rows are not validated:
//! a short row produces an object with only the columns it has, and cells past
//! the last header are keyed `_<index>`.
//!
//! The whole input is parsed before anything is written, and the output goes
//! through a temporary file that is renamed over the destination, so a failed
//! run never leaves a partial `data.json` behind.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::models::Record;

const BOM: char = '\u{feff}';

/// Outcome of a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub rows: usize,
    pub columns: Vec<String>,
}

/// Parses CSV text into records, in row order.
pub fn read_records<R: Read>(reader: R) -> Result<(Vec<String>, Vec<Record>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches(BOM).to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut records = Vec::new();
    for (idx, row) in rdr.records().enumerate() {
        let row = row.with_context(|| format!("Failed to parse CSV row {}", idx + 1))?;
        let record = Record::from_pairs(row.iter().enumerate().map(|(i, cell)| {
            let name = headers
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("_{}", i));
            (name, cell)
        }));
        records.push(record);
    }

    Ok((headers, records))
}

/// Writes `records` as a pretty-printed JSON array, replacing `output`.
pub fn write_records(records: &[Record], output: &Path) -> Result<()> {
    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, records)
            .with_context(|| format!("Failed to serialize records for {}", output.display()))?;
        writer.flush()?;
    }

    tmp.persist(output)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    Ok(())
}

/// Converts the CSV at `input` into the JSON array at `output`.
pub fn convert_file(input: &Path, output: &Path) -> Result<ConvertSummary> {
    let file = File::open(input)
        .with_context(|| format!("Failed to read CSV file: {}", input.display()))?;

    let (columns, records) = read_records(file)
        .with_context(|| format!("Failed to parse CSV file: {}", input.display()))?;

    write_records(&records, output)?;

    tracing::info!(
        rows = records.len(),
        input = %input.display(),
        output = %output.display(),
        "converted CSV to JSON"
    );

    Ok(ConvertSummary {
        rows: records.len(),
        columns,
    })
}

/// CLI entry point for `company-search convert`.
pub fn run_convert(
    config: &Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let input = input.unwrap_or_else(|| config.data.csv_path.clone());
    let output = output.unwrap_or_else(|| config.data.json_path.clone());

    let summary = convert_file(&input, &output)?;

    println!("CSV data converted to JSON");
    println!("  rows:    {}", summary.rows);
    println!("  columns: {}", summary.columns.join(", "));
    println!("  output:  {}", output.display());

    Ok(())
}

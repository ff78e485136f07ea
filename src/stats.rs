//! Dataset statistics.
//!
//! Quick summary of the converted JSON file: record count, columns, and how
//! many records lack a `Company Name` (those never show up in search results).
//! Used by `company-search stats` to check a conversion before serving it.

use anyhow::Result;

use crate::config::Config;
use crate::dataset::Dataset;

/// Run the stats command: load the dataset and print a summary.
pub fn run_stats(config: &Config) -> Result<()> {
    let path = &config.data.json_path;
    let dataset = Dataset::load(path)?;

    let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    let missing = dataset.missing_company_name();
    let searchable = dataset.len() - missing;

    println!("Company Search — Dataset Stats");
    println!("==============================");
    println!();
    println!("  Data file:   {}", path.display());
    println!("  Size:        {}", format_bytes(file_size));
    println!();
    println!("  Records:     {}", dataset.len());
    println!(
        "  Searchable:  {} / {} ({}%)",
        searchable,
        dataset.len(),
        if dataset.is_empty() {
            0
        } else {
            (searchable * 100) / dataset.len()
        }
    );
    println!();

    let columns = dataset.columns();
    println!("  Columns ({}):", columns.len());
    for column in columns {
        println!("    {}", column);
    }

    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }
}

//! Plaintext views of a decrypted batch: CSV files and terminal previews.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use itertools::Itertools;
use tracing::info;

use super::record::WalletBatch;

/// rows shown by a preview unless asked otherwise
pub const DEFAULT_PREVIEW_ROWS: usize = 20;

/// `decrypted_{stem}.csv` for the vault at `vault_path`
pub fn csv_file_name(vault_path: &Path) -> String {
    let stem = vault_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wallets".to_string());
    format!("decrypted_{stem}.csv")
}

/// Render `batch` as CSV.
///
/// Columns are the first record's keys in order. A later record missing one
/// of those keys gets an empty cell; keys the first record lacks are not
/// exported. An empty batch yields an empty string.
pub fn to_csv(batch: &WalletBatch) -> String {
    let Some(first) = batch.first() else {
        return String::new();
    };
    let columns: Vec<&str> = first.keys().collect();

    let mut out = String::new();
    out.push_str(&columns.iter().map(|c| csv_field(c)).join(","));
    out.push('\n');
    for record in batch {
        let row = columns
            .iter()
            .map(|c| csv_field(&record.get(c).unwrap_or_default()))
            .join(",");
        out.push_str(&row);
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Write `batch` as CSV to `path`, refusing to replace an existing file.
pub fn write_csv(batch: &WalletBatch, path: &Path) -> Result<()> {
    if path.exists() {
        bail!("refusing to overwrite existing export {}", path.display());
    }
    fs::write(path, to_csv(batch))
        .with_context(|| format!("Failed to write CSV export to {}", path.display()))?;
    info!("exported {} wallets to {}", batch.len(), path.display());
    Ok(())
}

/// Column-aligned table of the first `limit` records.
#[derive(Debug, Clone, Copy)]
pub struct BatchPreview<'a> {
    batch: &'a WalletBatch,
    limit: usize,
}

impl<'a> BatchPreview<'a> {
    pub fn new(batch: &'a WalletBatch, limit: usize) -> Self {
        Self { batch, limit }
    }
}

impl fmt::Display for BatchPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.batch.first() else {
            return writeln!(f, "(empty vault)");
        };
        let columns: Vec<&str> = first.keys().collect();
        let rows: Vec<Vec<String>> = self
            .batch
            .iter()
            .take(self.limit)
            .map(|r| columns.iter().map(|c| r.get(c).unwrap_or_default()).collect())
            .collect();

        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .chain([c.chars().count()])
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        writeln!(f, "{}", table_line(columns.iter().copied(), &widths))?;
        writeln!(f, "{}", widths.iter().map(|w| "-".repeat(*w)).join("-+-"))?;
        for row in &rows {
            writeln!(f, "{}", table_line(row.iter().map(String::as_str), &widths))?;
        }

        let hidden = self.batch.len().saturating_sub(self.limit);
        if hidden > 0 {
            writeln!(f, "... and {hidden} more")?;
        }
        Ok(())
    }
}

fn table_line<'s>(cells: impl Iterator<Item = &'s str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .join(" | ")
}

/// Address and the first three mnemonic words of the first record, shown
/// after generation.
#[derive(Debug, Clone, Copy)]
pub struct FirstWalletPreview<'a>(pub &'a WalletBatch);

impl fmt::Display for FirstWalletPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.0.first() else {
            return Ok(());
        };
        let words = first.mnemonic.split_whitespace().take(3).join(" ");
        writeln!(f, "Address:  {}", first.address)?;
        writeln!(f, "Mnemonic: {words} ...")
    }
}

//! Vault files on disk: naming, writing, reading, listing.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use chrono::NaiveDateTime;
use tracing::debug;
use tracing::info;

/// extension of every vault file
pub const VAULT_FILE_EXTENSION: &str = "enc";

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `wallets_{SYMBOL}{_tag}_{YYYYmmdd_HHMMSS}.enc`
///
/// The tag is reduced to ASCII alphanumerics, `-` and `_`. A tag that is
/// empty after that is left out.
pub fn vault_file_name(symbol: &str, tag: Option<&str>, timestamp: NaiveDateTime) -> String {
    let tag_part = tag
        .map(sanitize_tag)
        .filter(|t| !t.is_empty())
        .map(|t| format!("_{t}"))
        .unwrap_or_default();

    format!(
        "wallets_{}{}_{}.{}",
        symbol,
        tag_part,
        timestamp.format(TIMESTAMP_FORMAT),
        VAULT_FILE_EXTENSION
    )
}

fn sanitize_tag(tag: &str) -> String {
    tag.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Write a complete container to `path` in one write.
///
/// Fails if the file already exists. On unix the file is created with mode
/// `0o600`.
pub fn write_vault_file(path: &Path, container: &[u8]) -> Result<()> {
    if path.exists() {
        bail!("refusing to overwrite existing vault {}", path.display());
    }

    let mut file = open_new(path)
        .with_context(|| format!("Failed to create vault file {}", path.display()))?;
    file.write_all(container)
        .with_context(|| format!("Failed to write vault file {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("Failed to flush vault file {}", path.display()))?;

    info!("wrote {} byte vault to {}", container.len(), path.display());
    Ok(())
}

#[cfg(unix)]
fn open_new(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::prelude::OpenOptionsExt;
    fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_new(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new().create_new(true).write(true).open(path)
}

pub fn read_vault_file(path: &Path) -> Result<Vec<u8>> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read vault from {}", path.display()))?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// All `*.enc` files directly inside `dir`, sorted by path. A missing
/// directory holds no vaults.
pub fn list_vault_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(vec![]);
    }

    let mut files = vec![];
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?
    {
        let path = entry?.path();
        let is_vault = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == VAULT_FILE_EXTENSION);
        if is_vault {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

//! What each subcommand does, separated from argument parsing and printing
//! so the flows can be driven from tests.

use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use chrono::Local;
use tracing::debug;
use tracing::info;

use crate::config_models::data_directory::DataDirectory;
use crate::generator::BatchGenerator;
use crate::generator::GenerationSettings;
use crate::network::NetworkRegistry;
use crate::vault::VaultCodec;
use crate::vault::VaultError;
use crate::wallet::export;
use crate::wallet::vault_file;
use crate::wallet::WalletBatch;

/// Inputs of the `generate` flow other than the password.
#[derive(Debug, Clone)]
pub struct GenerateRequest<'a> {
    pub network: &'a str,
    pub options: &'a [(String, String)],
    pub settings: GenerationSettings,
    pub tag: Option<&'a str>,
}

/// A vault that was written to disk.
#[derive(Debug)]
pub struct SavedVault {
    pub path: PathBuf,
    pub batch: WalletBatch,
    pub skipped: usize,
}

/// Generate a batch and write it as a new vault in the encrypted directory.
///
/// Nothing is written unless at least one wallet was generated.
pub fn generate_vault(
    data_dir: &DataDirectory,
    registry: &NetworkRegistry,
    request: &GenerateRequest<'_>,
    password: &str,
) -> Result<SavedVault> {
    let provider = registry.lookup(request.network)?;
    let config = provider
        .configure(request.options)
        .with_context(|| format!("Invalid options for {}", provider.name()))?;

    let generated = BatchGenerator::new(provider, config).generate(&request.settings)?;
    let container = VaultCodec::encode(&generated.batch, password)?;

    let dir = data_dir.encrypted_dir_path();
    DataDirectory::create_dir_if_not_exists(&dir)?;
    let file_name =
        vault_file::vault_file_name(&generated.symbol, request.tag, Local::now().naive_local());
    let path = dir.join(file_name);
    vault_file::write_vault_file(&path, &container)?;

    Ok(SavedVault {
        path,
        batch: generated.batch,
        skipped: generated.skipped,
    })
}

/// Read and decrypt the vault at `path`.
///
/// A wrong password and a damaged file produce the same error message.
pub fn open_vault(path: &Path, password: &str) -> Result<WalletBatch> {
    let bytes = vault_file::read_vault_file(path)?;
    let batch = VaultCodec::decode(&bytes, password).inspect_err(|e| {
        if let VaultError::MalformedContainer { detail } = e {
            debug!("{} is malformed: {}", path.display(), detail);
        }
    })?;
    info!("decrypted {} wallets from {}", batch.len(), path.display());
    Ok(batch)
}

/// Write `batch` as `decrypted_<name>.csv` in the decrypted directory.
pub fn export_csv(data_dir: &DataDirectory, vault_path: &Path, batch: &WalletBatch) -> Result<PathBuf> {
    let dir = data_dir.decrypted_dir_path();
    DataDirectory::create_dir_if_not_exists(&dir)?;
    let path = dir.join(export::csv_file_name(vault_path));
    export::write_csv(batch, &path)?;
    Ok(path)
}

/// Vault files available for `decrypt`.
pub fn list_vaults(data_dir: &DataDirectory) -> Result<Vec<PathBuf>> {
    vault_file::list_vault_files(&data_dir.encrypted_dir_path())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use zeroize::Zeroizing;

    use super::*;
    use crate::wallet::WordCount;

    fn data_dir() -> (TempDir, DataDirectory) {
        let tmp = TempDir::new().unwrap();
        let data_dir = DataDirectory::get(Some(tmp.path().to_path_buf())).unwrap();
        (tmp, data_dir)
    }

    fn request<'a>(network: &'a str, options: &'a [(String, String)]) -> GenerateRequest<'a> {
        GenerateRequest {
            network,
            options,
            settings: GenerationSettings {
                count: 2,
                word_count: WordCount::Twelve,
                passphrase: Zeroizing::new(String::new()),
            },
            tag: Some("test"),
        }
    }

    #[test]
    fn generate_list_open_export() {
        let (_tmp, data_dir) = data_dir();
        let registry = NetworkRegistry::with_defaults();
        let options = [("mode".to_string(), "LEGACY".to_string())];

        let saved =
            generate_vault(&data_dir, &registry, &request("btc", &options), "pw").unwrap();
        let name = saved.path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("wallets_BTC_LEGACY_test_"), "{name}");
        assert!(name.ends_with(".enc"));

        assert_eq!(vec![saved.path.clone()], list_vaults(&data_dir).unwrap());

        let batch = open_vault(&saved.path, "pw").unwrap();
        assert_eq!(saved.batch, batch);
        assert!(batch.iter().all(|r| r.address.starts_with('1')));

        let csv = export_csv(&data_dir, &saved.path, &batch).unwrap();
        assert_eq!(data_dir.decrypted_dir_path(), csv.parent().unwrap());
        assert_eq!(
            format!("decrypted_{}", name.replace(".enc", ".csv")),
            csv.file_name().unwrap().to_string_lossy()
        );
    }

    #[test]
    fn wrong_password_message_does_not_say_which() {
        let (_tmp, data_dir) = data_dir();
        let registry = NetworkRegistry::with_defaults();
        let saved = generate_vault(&data_dir, &registry, &request("SUI", &[]), "pw").unwrap();

        let err = open_vault(&saved.path, "nope").unwrap_err();
        assert_eq!("wrong password or corrupted file", err.to_string());

        let truncated = saved.path.with_file_name("short.enc");
        std::fs::write(&truncated, b"too short").unwrap();
        let err = open_vault(&truncated, "pw").unwrap_err();
        assert_eq!("wrong password or corrupted file", err.to_string());
    }

    #[test]
    fn polkadot_symbol_option_names_the_file() {
        let (_tmp, data_dir) = data_dir();
        let registry = NetworkRegistry::with_defaults();
        let options = [
            ("prefix".to_string(), "2".to_string()),
            ("network_name".to_string(), "Kusama".to_string()),
            ("symbol".to_string(), "KSM".to_string()),
        ];

        let saved =
            generate_vault(&data_dir, &registry, &request("dot", &options), "pw").unwrap();
        let name = saved.path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("wallets_KSM_test_"), "{name}");

        let batch = open_vault(&saved.path, "pw").unwrap();
        assert_eq!(2, batch.len());
        assert!(batch.iter().all(|r| r.extra()["ss58_prefix"] == 2));
        assert!(batch.iter().all(|r| r.extra()["type"] == "Kusama (Sr25519 / Mnemonic)"));
    }

    #[test]
    fn unknown_network_writes_nothing() {
        let (_tmp, data_dir) = data_dir();
        let registry = NetworkRegistry::with_defaults();

        assert!(generate_vault(&data_dir, &registry, &request("XRP", &[]), "pw").is_err());
        assert!(list_vaults(&data_dir).unwrap().is_empty());
    }

    #[test]
    fn bad_option_writes_nothing() {
        let (_tmp, data_dir) = data_dir();
        let registry = NetworkRegistry::with_defaults();
        let options = [("prefix".to_string(), "not-letters".to_string())];

        assert!(generate_vault(&data_dir, &registry, &request("ATOM", &options), "pw").is_err());
        assert!(!data_dir.encrypted_dir_path().exists());
    }
}

//! Turns a [`WalletBatch`] plus a password into container bytes and back.
//!
//! This is the only place that knows the payload encoding (a JSON array of
//! flat objects) and drives key derivation and the cipher.

use tracing::debug;
use zeroize::Zeroizing;

use super::cipher::VaultCipher;
use super::container::VaultContainer;
use super::error::VaultError;
use super::kdf::VaultKeyManager;
use crate::wallet::record::WalletBatch;

/// Stateless vault encoder/decoder.
///
/// Every call derives its own key and draws its own salt and nonce, so
/// concurrent calls share nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaultCodec;

impl VaultCodec {
    /// Encrypt `batch` under `password`.
    ///
    /// The whole batch is serialized and sealed in memory; the returned bytes
    /// are the complete container. Two calls with identical inputs never
    /// return identical bytes.
    pub fn encode(batch: &WalletBatch, password: &str) -> Result<Vec<u8>, VaultError> {
        let plaintext = Zeroizing::new(
            serde_json::to_vec(batch)
                .map_err(|e| VaultError::Configuration(format!("batch serialization: {}", e)))?,
        );

        let salt = VaultKeyManager::generate_salt();
        let key_manager = VaultKeyManager::from_password(password, &salt)?;
        let nonce = VaultCipher::generate_nonce();
        let ciphertext = VaultCipher::new(&key_manager).seal(&nonce, &plaintext, None)?;

        let container = VaultContainer {
            salt,
            nonce,
            ciphertext,
        };
        let bytes = container.to_bytes();

        debug!(
            "encoded {} wallet records into {} byte vault",
            batch.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Decrypt a container produced by [`Self::encode`].
    ///
    /// # Errors
    ///
    /// - [`VaultError::MalformedContainer`] if `container` is too short to be
    ///   a vault, or the authenticated plaintext is not a batch of flat
    ///   records.
    /// - [`VaultError::Authentication`] for a wrong password or any altered
    ///   byte. The two causes cannot be told apart.
    pub fn decode(container: &[u8], password: &str) -> Result<WalletBatch, VaultError> {
        let container = VaultContainer::from_bytes(container)?;

        let key_manager = VaultKeyManager::from_password(password, &container.salt)?;
        let plaintext = Zeroizing::new(VaultCipher::new(&key_manager).open(
            &container.nonce,
            &container.ciphertext,
            None,
        )?);

        let batch: WalletBatch = serde_json::from_slice(&plaintext).map_err(|e| {
            debug!("authenticated payload failed to parse: {}", e);
            VaultError::malformed(format!("payload is not a wallet batch: {}", e))
        })?;

        if let Some(index) = batch.iter().position(|record| !record.is_flat()) {
            debug!("record {} has nested fields", index);
            return Err(VaultError::malformed(format!(
                "record {} has nested fields",
                index
            )));
        }

        debug!("decoded {} wallet records", batch.len());
        Ok(batch)
    }
}

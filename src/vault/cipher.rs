//! AES-256-GCM authenticated encryption for vault payloads

use aead::Aead;
use aead::KeyInit;
use aead::Payload;
use aes_gcm::Aes256Gcm;
use aes_gcm::Key;
use aes_gcm::Nonce;
use rand::Rng;

use super::error::VaultError;
use super::kdf::VaultKeyManager;

/// byte length of the AES-GCM nonce stored after the salt
pub const NONCE_LEN: usize = 12;

/// byte length of the authentication tag appended to every ciphertext
pub const TAG_LEN: usize = 16;

/// Seals and opens vault payloads under one derived key
pub struct VaultCipher {
    cipher: Aes256Gcm,
}

impl VaultCipher {
    pub fn new(key_manager: &VaultKeyManager) -> Self {
        Self::from_key(key_manager.key())
    }

    pub(crate) fn from_key(key: &[u8; 32]) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key)),
        }
    }

    /// Generate a random 96-bit nonce. Called once per seal; nonces are never
    /// incremented or reused.
    pub fn generate_nonce() -> [u8; NONCE_LEN] {
        let mut nonce = [0u8; NONCE_LEN];
        rand::rng().fill(&mut nonce);
        nonce
    }

    /// Encrypt `plaintext`, binding optional `associated_data`.
    ///
    /// Returns the ciphertext with the 16-byte tag appended.
    pub fn seal(
        &self,
        nonce: &[u8; NONCE_LEN],
        plaintext: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, VaultError> {
        let payload = Payload {
            msg: plaintext,
            aad: associated_data.unwrap_or_default(),
        };

        // only reachable for payloads beyond the GCM length limit
        self.cipher
            .encrypt(Nonce::from_slice(nonce), payload)
            .map_err(|_| VaultError::Configuration("payload too large for AES-256-GCM".into()))
    }

    /// Decrypt and verify `ciphertext`. Either the whole plaintext is returned
    /// or [`VaultError::Authentication`]; nothing partial is ever exposed.
    pub fn open(
        &self,
        nonce: &[u8; NONCE_LEN],
        ciphertext: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, VaultError> {
        let payload = Payload {
            msg: ciphertext,
            aad: associated_data.unwrap_or_default(),
        };

        self.cipher
            .decrypt(Nonce::from_slice(nonce), payload)
            .map_err(|_| VaultError::Authentication)
    }
}

impl std::fmt::Debug for VaultCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultCipher").finish_non_exhaustive()
    }
}

//! On-disk layout of a vault.
//!
//! ```text
//! offset  size  field
//! ------  ----  -----
//!      0    16  salt   (scrypt, fresh per container)
//!     16    12  nonce  (AES-256-GCM, fresh per container)
//!     28   var  ciphertext with 16-byte tag appended
//! ```
//!
//! There is no magic or version byte, so changing the layout makes existing
//! vaults unreadable.

use super::cipher::NONCE_LEN;
use super::cipher::TAG_LEN;
use super::error::VaultError;
use super::kdf::SALT_LEN;

/// salt + nonce
pub const HEADER_LEN: usize = SALT_LEN + NONCE_LEN;

/// smallest container that can possibly authenticate: header plus a bare tag
pub const MIN_CONTAINER_LEN: usize = HEADER_LEN + TAG_LEN;

/// parsed view of a container's bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultContainer {
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
}

impl VaultContainer {
    /// `salt || nonce || ciphertext`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    /// Split raw bytes into salt, nonce and ciphertext.
    ///
    /// # Errors
    ///
    /// [`VaultError::MalformedContainer`] if `bytes` is shorter than
    /// [`MIN_CONTAINER_LEN`]. Such input is rejected before any key is derived.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VaultError> {
        if bytes.len() < MIN_CONTAINER_LEN {
            return Err(VaultError::malformed(format!(
                "container is {} bytes, need at least {}",
                bytes.len(),
                MIN_CONTAINER_LEN
            )));
        }

        let (salt, rest) = bytes.split_at(SALT_LEN);
        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

        Ok(Self {
            salt: salt.try_into().map_err(|_| VaultError::malformed("salt"))?,
            nonce: nonce.try_into().map_err(|_| VaultError::malformed("nonce"))?,
            ciphertext: ciphertext.to_vec(),
        })
    }
}
